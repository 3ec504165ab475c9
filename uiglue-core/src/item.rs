use serde::{Deserialize, Serialize};

/// One entry of a result set, as returned by a search provider
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResultItem {
    /// Unique within a result set
    pub id: String,
    /// Display text
    pub label: String,
}

impl ResultItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
