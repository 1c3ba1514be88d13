use serde::{Deserialize, Serialize};

/// State of the search session, shown as a one-line label above the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Searching,
    Results,
    NoResults,
    Error,
}

impl SearchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SearchStatus::Idle => "",
            SearchStatus::Searching => "Searching...",
            SearchStatus::Results => "Click to add to frame",
            SearchStatus::NoResults => "No results",
            SearchStatus::Error => "Error fetching results",
        }
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// What to do with a search response that arrives after a newer search was issued
/// (or after the session was closed).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Apply every response when it arrives; the last one to arrive wins.
    #[serde(rename = "last_arrived")]
    #[default]
    LastArrived,
    /// Apply only the response to the most recently issued request.
    #[serde(rename = "latest_issued")]
    LatestIssued,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_match_ui_text() {
        assert_eq!(SearchStatus::Idle.to_string(), "");
        assert_eq!(SearchStatus::Searching.to_string(), "Searching...");
        assert_eq!(SearchStatus::Results.to_string(), "Click to add to frame");
        assert_eq!(SearchStatus::NoResults.to_string(), "No results");
        assert_eq!(SearchStatus::Error.to_string(), "Error fetching results");
    }

    #[test]
    fn stale_policy_uses_snake_case_names() {
        let p: StalePolicy = serde_json::from_str("\"latest_issued\"").unwrap();
        assert_eq!(p, StalePolicy::LatestIssued);
        assert_eq!(
            serde_json::to_string(&StalePolicy::LastArrived).unwrap(),
            "\"last_arrived\""
        );
    }
}
