use std::fmt;

use serde::{Deserialize, Serialize};

/// Sequence number of an issued lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Last-issued-wins guard for overlapping lookups
///
/// Only the most recently issued request may touch display state when it
/// completes. Clears and selections do not change which request that is.
#[derive(Debug, Default)]
pub struct SequenceGuard {
    last_issued: u64,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next request id; the first id is 1
    pub fn issue(&mut self) -> RequestId {
        self.last_issued += 1;
        RequestId(self.last_issued)
    }

    /// Whether an outcome for `request` is still authoritative
    pub fn is_current(&self, request: RequestId) -> bool {
        request.0 == self.last_issued
    }

    pub fn last_issued(&self) -> u64 {
        self.last_issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one_and_increase() {
        let mut guard = SequenceGuard::new();
        assert_eq!(guard.last_issued(), 0);
        assert_eq!(guard.issue(), RequestId(1));
        assert_eq!(guard.issue(), RequestId(2));
        assert_eq!(guard.last_issued(), 2);
    }

    #[test]
    fn test_only_latest_is_current() {
        let mut guard = SequenceGuard::new();
        let first = guard.issue();
        assert!(guard.is_current(first));

        let second = guard.issue();
        assert!(!guard.is_current(first));
        assert!(guard.is_current(second));
    }
}
