//! Catalog search - in-memory items with simulated latency and failures

use std::fs;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use crate::error::{Result, WidgetError};
use crate::item::ResultItem;
use crate::search::fuzzy;
use crate::search::options::SearchContext;
use crate::search::provider::{SearchOutcome, SearchProvider};

/// Default cap on returned results
pub const DEFAULT_LIMIT: usize = 20;

/// Provider that fuzzy-ranks a fixed list of items
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    items: Vec<ResultItem>,
    latency: Duration,
    failure_rate: f64,
    limit: usize,
}

impl CatalogSearch {
    pub fn new(items: Vec<ResultItem>) -> Self {
        Self {
            items,
            latency: Duration::ZERO,
            failure_rate: 0.0,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Load a JSON array of `{ "id": ..., "label": ... }` objects
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WidgetError::io(path, e))?;
        let items: Vec<ResultItem> =
            serde_json::from_str(&content).map_err(|source| WidgetError::Catalog {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(items))
    }

    /// Sleep this long before answering each lookup
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Probability in `[0, 1]` that a lookup fails with "Network error"
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate)
    }
}

#[async_trait]
impl SearchProvider for CatalogSearch {
    async fn search(&self, query: &str, _ctx: &SearchContext) -> SearchOutcome {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.should_fail() {
            anyhow::bail!("Network error");
        }

        let items = fuzzy::rank(query, &self.items)
            .into_iter()
            .take(self.limit)
            .map(|scored| scored.item)
            .collect();

        Ok(Some(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"[{{"id":"1","label":"Alpha"}},{{"id":"2","label":"Beta"}}]"#
        )
        .unwrap();

        let catalog = CatalogSearch::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_from_json_file_rejects_objects() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"id":"1"}}"#).unwrap();

        let err = CatalogSearch::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, WidgetError::Catalog { .. }));
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        let catalog = CatalogSearch::new(vec![]).with_failure_rate(4.0);
        assert!(catalog.should_fail());

        let catalog = CatalogSearch::new(vec![]).with_failure_rate(-1.0);
        assert!(!catalog.should_fail());
    }
}
