use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::ResultItem;

/// Structured trace of what a search controller did
///
/// Emitted on the optional channel configured through
/// `SearchOptions::events`. Each event is a flat JSON object tagged with
/// its kind, so a host can pipe them as JSON lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// Input value changed (before any eligibility check)
    InputChanged {
        timestamp: DateTime<Utc>,
        value: String,
    },

    /// Query fell below the minimum length or the controller is disabled
    Cleared { timestamp: DateTime<Utc> },

    /// Debounce timer armed for the trimmed query
    Armed {
        timestamp: DateTime<Utc>,
        query: String,
        delay_ms: u64,
    },

    /// Timer fired but issuance was aborted
    Skipped {
        timestamp: DateTime<Utc>,
        query: String,
        reason: String, // "disabled" | "missing_search"
    },

    /// Lookup issued
    Issued {
        timestamp: DateTime<Utc>,
        request: u64,
        query: String,
    },

    /// Current lookup succeeded; `items` is what the results list now shows
    Resolved {
        timestamp: DateTime<Utc>,
        request: u64,
        items: Vec<ResultItem>,
    },

    /// Current lookup failed
    Failed {
        timestamp: DateTime<Utc>,
        request: u64,
        message: String,
    },

    /// Outcome arrived for a superseded request and was dropped
    Discarded {
        timestamp: DateTime<Utc>,
        request: u64,
        latest: u64,
    },

    /// A cached result was selected
    Selected {
        timestamp: DateTime<Utc>,
        id: String,
        label: String,
    },
}

impl SearchEvent {
    /// Get timestamp from any event variant
    pub fn timestamp(&self) -> &DateTime<Utc> {
        match self {
            SearchEvent::InputChanged { timestamp, .. } => timestamp,
            SearchEvent::Cleared { timestamp } => timestamp,
            SearchEvent::Armed { timestamp, .. } => timestamp,
            SearchEvent::Skipped { timestamp, .. } => timestamp,
            SearchEvent::Issued { timestamp, .. } => timestamp,
            SearchEvent::Resolved { timestamp, .. } => timestamp,
            SearchEvent::Failed { timestamp, .. } => timestamp,
            SearchEvent::Discarded { timestamp, .. } => timestamp,
            SearchEvent::Selected { timestamp, .. } => timestamp,
        }
    }

    /// Request id for lookup-related events
    pub fn request(&self) -> Option<u64> {
        match self {
            SearchEvent::Issued { request, .. }
            | SearchEvent::Resolved { request, .. }
            | SearchEvent::Failed { request, .. }
            | SearchEvent::Discarded { request, .. } => Some(*request),
            _ => None,
        }
    }

    /// One-line human rendering used by the CLI
    pub fn summary(&self) -> String {
        match self {
            SearchEvent::InputChanged { value, .. } => format!("input {:?}", value),
            SearchEvent::Cleared { .. } => "cleared".to_string(),
            SearchEvent::Armed { query, delay_ms, .. } => {
                format!("armed {:?} ({}ms)", query, delay_ms)
            }
            SearchEvent::Skipped { query, reason, .. } => {
                format!("skipped {:?}: {}", query, reason)
            }
            SearchEvent::Issued { request, query, .. } => {
                format!("#{} issued {:?}", request, query)
            }
            SearchEvent::Resolved { request, items, .. } => {
                format!("#{} resolved with {} result(s)", request, items.len())
            }
            SearchEvent::Failed { request, message, .. } => {
                format!("#{} failed: {}", request, message)
            }
            SearchEvent::Discarded {
                request, latest, ..
            } => format!("#{} discarded (latest is #{})", request, latest),
            SearchEvent::Selected { id, label, .. } => format!("selected {} ({})", label, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_issued() {
        let event = SearchEvent::Issued {
            timestamp: Utc::now(),
            request: 3,
            query: "ab".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""event":"issued""#));
        assert!(json.contains(r#""request":3"#));
        assert!(json.contains(r#""query":"ab""#));
    }

    #[test]
    fn test_resolved_carries_items() {
        let event = SearchEvent::Resolved {
            timestamp: Utc::now(),
            request: 2,
            items: vec![ResultItem::new("vega", "Vega")],
        };

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""items":[{"id":"vega","label":"Vega"}]"#));
        assert_eq!(event.summary(), "#2 resolved with 1 result(s)");
    }

    #[test]
    fn test_deserialize_discarded() {
        let json = r#"{"event":"discarded","timestamp":"2026-01-14T12:00:00Z","request":1,"latest":2}"#;
        let event: SearchEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.request(), Some(1));
        assert_eq!(event.summary(), "#1 discarded (latest is #2)");
    }

    #[test]
    fn test_request_absent_for_input_events() {
        let event = SearchEvent::Cleared {
            timestamp: Utc::now(),
        };
        assert_eq!(event.request(), None);
    }
}
