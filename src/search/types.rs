// Wire format of the search service and its validation into `SearchResult`.
//
// Expected body:
// { "results": [ { "id": "x" | 1, "name": "...",
//                  "image": { "icon_url": "...", "original_url": "..." } } ] }

use serde::{Deserialize, Deserializer};

use super::SearchError;

/// One search hit. `icon_url` is the thumbnail shown in the list,
/// `original_url` is what lands in a frame when the hit is picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    pub icon_url: String,
    pub original_url: String,
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Option::<IdValue>::deserialize(deserializer)? {
        Some(IdValue::Str(s)) => Some(s),
        Some(IdValue::Num(n)) => Some(n.to_string()),
        None => None,
    })
}

#[derive(Debug, Deserialize)]
struct RawImage {
    icon_url: Option<String>,
    original_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: Option<String>,
    name: Option<String>,
    image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawResponse {
    results: Option<Vec<serde_json::Value>>,
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawResult {
    fn into_result(self, position: usize) -> Option<SearchResult> {
        let name = self.name?;
        let image = self.image?;
        let icon_url = non_empty(image.icon_url)?;
        let original_url = non_empty(image.original_url)?;
        Some(SearchResult {
            id: self.id.unwrap_or_else(|| format!("#{position}")),
            name,
            icon_url,
            original_url,
        })
    }
}

/// Validate a response body. A body without a `results` array is an error;
/// individual entries that lack a name or an image URL are skipped.
pub fn parse_search_response(body: &[u8]) -> Result<Vec<SearchResult>, SearchError> {
    let raw: RawResponse = serde_json::from_slice(body)
        .map_err(|e| SearchError::Malformed(format!("invalid JSON: {e}")))?;
    let entries = raw
        .results
        .ok_or_else(|| SearchError::Malformed("missing `results` array".to_string()))?;

    let mut out = Vec::with_capacity(entries.len());
    for (idx, value) in entries.into_iter().enumerate() {
        let parsed = serde_json::from_value::<RawResult>(value)
            .ok()
            .and_then(|r| r.into_result(idx));
        match parsed {
            Some(result) => out.push(result),
            None => log::warn!("skipping malformed search result at position {idx}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_results_in_server_order() {
        let body = br#"{"results":[
            {"id":"b","name":"Second","image":{"icon_url":"http://x/b_i.png","original_url":"http://x/b.png"}},
            {"id":7,"name":"First","image":{"icon_url":"http://x/a_i.png","original_url":"http://x/a.png"}}
        ]}"#;
        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Second");
        assert_eq!(results[1].id, "7");
        assert_eq!(results[1].original_url, "http://x/a.png");
        assert_eq!(results[1].icon_url, "http://x/a_i.png");
    }

    #[test]
    fn empty_results_is_ok() {
        let results = parse_search_response(br#"{"results":[]}"#).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn missing_results_array_is_malformed() {
        let err = parse_search_response(br#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));

        let err = parse_search_response(br#"{"results":null}"#).unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_search_response(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, SearchError::Malformed(_)));
    }

    #[test]
    fn entries_without_images_or_names_are_skipped() {
        let body = br#"{"results":[
            {"id":1,"name":"No image"},
            {"id":2,"name":"Half image","image":{"icon_url":"http://x/i.png"}},
            {"id":3,"image":{"icon_url":"http://x/i.png","original_url":"http://x/o.png"}},
            {"id":4,"name":"Blank url","image":{"icon_url":"http://x/i.png","original_url":"  "}},
            {"id":5,"name":"Wrong type","image":"http://x/o.png"},
            {"id":6,"name":"Good","image":{"icon_url":"http://x/i.png","original_url":"http://x/o.png"}}
        ]}"#;
        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "6");
    }

    #[test]
    fn missing_id_falls_back_to_position() {
        let body = br#"{"results":[
            {"name":"Anon","image":{"icon_url":"http://x/i.png","original_url":"http://x/o.png"}}
        ]}"#;
        let results = parse_search_response(body).unwrap();
        assert_eq!(results[0].id, "#0");
    }
}
