use async_trait::async_trait;
use url::Url;

use super::{fetch_search_results, resolve_service_origin, SearchError, SearchResult};
use crate::app::config::AppConfig;

/// Where searches go. The app only talks to this trait, so tests can
/// swap the HTTP client for a canned backend.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;

    /// Human-readable target, used in log lines.
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpSearchBackend {
    origin: Url,
}

impl HttpSearchBackend {
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, SearchError> {
        let origin = resolve_service_origin(cfg.search_origin.as_deref(), &cfg.page_origin)?;
        Ok(Self::new(origin))
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        fetch_search_results(self.origin(), query).await
    }

    fn describe(&self) -> String {
        format!("{}{}", self.origin().as_str().trim_end_matches('/'), super::SEARCH_PATH)
    }
}

/// Used when the configured origin cannot be parsed; every search fails with the reason.
#[derive(Debug, Clone)]
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl SearchBackend for UnavailableBackend {
    async fn search(&self, _query: &str) -> Result<Vec<SearchResult>, SearchError> {
        Err(SearchError::Unavailable(self.reason.clone()))
    }

    fn describe(&self) -> String {
        format!("<unavailable: {}>", self.reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_derives_service_origin() {
        let cfg = AppConfig {
            search_origin: None,
            page_origin: "http://localhost:3000".to_string(),
            ..AppConfig::default()
        };
        let backend = HttpSearchBackend::from_config(&cfg).unwrap();
        assert_eq!(backend.origin().port(), Some(5000));
        assert_eq!(backend.describe(), "http://localhost:5000/api/search");
    }

    #[tokio::test]
    async fn unavailable_backend_always_fails() {
        let backend = UnavailableBackend::new("bad origin");
        let err = backend.search("zelda").await.unwrap_err();
        assert!(matches!(err, SearchError::Unavailable(ref r) if r == "bad origin"));
    }

    #[test]
    fn from_config_prefers_explicit_origin() {
        let cfg = AppConfig {
            search_origin: Some("https://api.example.com/".to_string()),
            ..AppConfig::default()
        };
        let backend = HttpSearchBackend::from_config(&cfg).unwrap();
        assert_eq!(backend.describe(), "https://api.example.com/api/search");
    }
}
