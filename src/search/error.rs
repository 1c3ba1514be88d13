use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("http status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("image decode error: {0}")]
    Decode(String),

    #[error("search service unavailable: {0}")]
    Unavailable(String),

    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
