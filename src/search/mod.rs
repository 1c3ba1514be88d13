// Client for the remote search service.
// Public API:
//   - resolve_service_origin(configured, page_origin) -> Url
//   - search_endpoint(&origin, query) -> Url
//   - fetch_search_results(&origin, query) -> Result<Vec<SearchResult>, SearchError>
//   - SearchBackend / HttpSearchBackend: the seam the app sends searches through
//   - fetch_image(url) -> Result<ImageData, SearchError>: thumbnails and frame images
//
// Endpoint sample:
// http://localhost:5000/api/search?query=zelda

use lazy_static::lazy_static;
use std::time::Duration;
use url::Url;

mod backend;
mod error;
mod images;
mod types;

pub use backend::{HttpSearchBackend, SearchBackend, UnavailableBackend};
pub use error::SearchError;
pub use images::{fetch_image, ImageData};
pub use types::{parse_search_response, SearchResult};

pub const SEARCH_PATH: &str = "/api/search";

/// Port the page is served on during development.
pub const DEV_PAGE_PORT: &str = ":3000";
/// Port the search service listens on next to it.
pub const SERVICE_PORT: &str = ":5000";

lazy_static! {
    static ref CLIENT: reqwest::Client = reqwest::Client::builder()
        .user_agent(concat!("frame-picker/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("reqwest client");
}

/// Pick the search service origin. An explicitly configured origin wins;
/// otherwise the page origin with the dev port swapped for the service port.
/// Only scheme, host and port are kept: the endpoint always lives at
/// `/api/search` on the service root.
pub fn resolve_service_origin(
    configured: Option<&str>,
    page_origin: &str,
) -> Result<Url, SearchError> {
    if let Some(origin) = configured.map(str::trim).filter(|s| !s.is_empty()) {
        return Ok(bare_origin(Url::parse(origin)?));
    }
    let derived = page_origin.trim().replacen(DEV_PAGE_PORT, SERVICE_PORT, 1);
    Ok(bare_origin(Url::parse(&derived)?))
}

fn bare_origin(mut url: Url) -> Url {
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        log::warn!(
            "search origin {url} has a path or query; using {}/ instead",
            url.origin().ascii_serialization()
        );
        url.set_path("/");
        url.set_query(None);
        url.set_fragment(None);
    }
    url
}

/// Build `<origin>/api/search?query=<text>` with the query URL-encoded.
pub fn search_endpoint(origin: &Url, query: &str) -> Result<Url, SearchError> {
    let mut url = origin.join(SEARCH_PATH)?;
    url.query_pairs_mut().append_pair("query", query);
    Ok(url)
}

/// Issue one search request and validate the body.
pub async fn fetch_search_results(
    origin: &Url,
    query: &str,
) -> Result<Vec<SearchResult>, SearchError> {
    let endpoint = search_endpoint(origin, query)?;
    log::info!("Searching for: {query}");
    log::debug!("search: GET {endpoint}");

    let resp = CLIENT.get(endpoint.clone()).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(SearchError::Status {
            status: status.as_u16(),
            url: endpoint.to_string(),
        });
    }

    let body = resp.bytes().await?;
    let results = parse_search_response(&body)?;
    log::info!("Search results for {query:?}: {} item(s)", results.len());
    Ok(results)
}
