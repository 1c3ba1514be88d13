use super::{SearchError, CLIENT};

/// Raw RGBA image data handed from worker tasks to the UI thread.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl ImageData {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(
            rgba.len(),
            (width * height * 4) as usize,
            "RGBA buffer size mismatch"
        );
        Self {
            width,
            height,
            rgba,
        }
    }

    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }

    /// Decode any format the `image` crate knows into RGBA8.
    pub fn decode(bytes: &[u8]) -> Result<Self, SearchError> {
        let img =
            image::load_from_memory(bytes).map_err(|e| SearchError::Decode(e.to_string()))?;
        let rgba = img.to_rgba8();
        let (w, h) = rgba.dimensions();
        Ok(Self::new(w, h, rgba.into_raw()))
    }
}

/// Download an image (result thumbnail or frame picture) and decode it off the UI thread.
pub async fn fetch_image(url: &str) -> Result<ImageData, SearchError> {
    log::debug!("fetch_image: GET {url}");
    let resp = CLIENT
        .get(url)
        .header("Accept", "image/jpeg,image/png,image/gif,image/webp")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_owned();
    let bytes = resp.bytes().await?;
    log::debug!(
        "fetch_image: {url} content-type={content_type} size={}B",
        bytes.len()
    );

    tokio::task::spawn_blocking(move || ImageData::decode(&bytes))
        .await
        .map_err(|e| SearchError::Decode(format!("join error: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba};
    use std::io::Cursor;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(w, h, Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn decodes_png_to_rgba() {
        let data = ImageData::decode(&png_bytes(3, 2)).unwrap();
        assert_eq!(data.size(), [3, 2]);
        assert_eq!(data.rgba.len(), 3 * 2 * 4);
        assert_eq!(&data.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = ImageData::decode(b"definitely not an image").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }
}
