use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use tokio::runtime::{Builder, Runtime};
use uiglue_core::search::MockSearch;
use uiglue_core::{MemoryElement, ResultItem, SearchController, SearchOptions};

fn paused_runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap()
}

fn search_root() -> Arc<MemoryElement> {
    MemoryElement::with_classes(&["search"])
        .with_child(MemoryElement::with_classes(&["input"]))
        .with_child(MemoryElement::with_classes(&["status"]))
        .with_child(MemoryElement::with_classes(&["results"]))
        .into_ref()
}

proptest! {
    /// Property: a burst of keystrokes closer together than the delay
    /// issues exactly one lookup, for the last value
    #[test]
    fn prop_burst_issues_only_last_query(
        words in prop::collection::vec("[a-z]{2,6}", 1..8),
        gaps in prop::collection::vec(0u64..300, 8),
    ) {
        let rt = paused_runtime();
        let calls = rt.block_on(async {
            let mock = Arc::new(MockSearch::new());
            let controller = SearchController::bind(
                search_root(),
                SearchOptions::default().search(mock.clone()),
            )
            .unwrap();

            for (word, gap) in words.iter().zip(gaps.iter()) {
                controller.input(word);
                tokio::time::sleep(Duration::from_millis(*gap)).await;
            }
            tokio::time::sleep(Duration::from_millis(400)).await;
            mock.calls()
        });

        prop_assert_eq!(calls, vec![words.last().unwrap().clone()]);
    }

    /// Property: whatever order lookups finish in, the display ends up
    /// showing the outcome of the last one issued
    #[test]
    fn prop_display_follows_last_issued(
        latencies in prop::collection::vec(0u64..1000, 1..6),
        gaps in prop::collection::vec(301u64..600, 6),
    ) {
        let rt = paused_runtime();
        let root = search_root();
        let (labels, last_issued) = rt.block_on(async {
            let mock = Arc::new(MockSearch::new());
            for (i, latency) in latencies.iter().enumerate() {
                mock.respond_after(
                    Duration::from_millis(*latency),
                    vec![ResultItem::new(i.to_string(), format!("r{}", i))],
                );
            }
            let controller = SearchController::bind(
                root.clone(),
                SearchOptions::default().search(mock.clone()),
            )
            .unwrap();

            for (i, gap) in gaps.iter().take(latencies.len()).enumerate() {
                controller.input(&format!("q{}", i));
                tokio::time::sleep(Duration::from_millis(*gap)).await;
            }
            tokio::time::sleep(Duration::from_millis(2000)).await;
            (root.child("results").unwrap().labels(), controller.last_issued())
        });

        prop_assert_eq!(last_issued, latencies.len() as u64);
        prop_assert_eq!(labels, vec![format!("r{}", latencies.len() - 1)]);
    }
}
