//! Fuzzy ranking of result items by label

use crate::item::ResultItem;

/// A ranked item
#[derive(Debug, Clone)]
pub struct ScoredItem {
    pub item: ResultItem,
    /// Match score (higher is better)
    pub score: i64,
}

/// Rank items whose label contains the query as a subsequence
///
/// An empty query keeps every item, in input order, with score 0.
pub fn rank(query: &str, items: &[ResultItem]) -> Vec<ScoredItem> {
    if query.is_empty() {
        return items
            .iter()
            .map(|item| ScoredItem {
                item: item.clone(),
                score: 0,
            })
            .collect();
    }

    let query_chars: Vec<char> = query.to_lowercase().chars().collect();

    let mut results: Vec<ScoredItem> = items
        .iter()
        .filter_map(|item| {
            let score = fuzzy_match(&query_chars, &item.label);
            (score > 0).then(|| ScoredItem {
                item: item.clone(),
                score,
            })
        })
        .collect();

    // Stable: equal scores keep catalog order
    results.sort_by(|a, b| b.score.cmp(&a.score));

    results
}

/// Fuzzy match a lowercased query against a target string
/// Score 0 means no match
fn fuzzy_match(query_chars: &[char], target: &str) -> i64 {
    if query_chars.is_empty() {
        return 0;
    }

    let original: Vec<char> = target.chars().collect();
    let lowered: Vec<char> = original
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let mut score: i64 = 0;
    let mut query_idx = 0;
    let mut prev_match_idx: Option<usize> = None;

    for (target_idx, target_char) in lowered.iter().enumerate() {
        if query_idx >= query_chars.len() {
            break;
        }
        if *target_char != query_chars[query_idx] {
            continue;
        }

        // Scoring:
        // - Base match: +10
        // - Consecutive match: +15 bonus
        // - First char match: +20 bonus
        // - Word boundary or camelCase hump: +10 bonus each
        score += 10;

        if prev_match_idx.is_some_and(|prev| target_idx == prev + 1) {
            score += 15;
        }

        if target_idx == 0 {
            score += 20;
        } else {
            let prev_char = original[target_idx - 1];
            if prev_char == ' ' || prev_char == '_' || prev_char == '-' {
                score += 10;
            }
            if original[target_idx].is_uppercase() {
                score += 10;
            }
        }

        prev_match_idx = Some(target_idx);
        query_idx += 1;
    }

    // All query chars must match
    if query_idx == query_chars.len() {
        // Length penalty - shorter labels rank higher
        let length_penalty = (lowered.len() as i64 - query_chars.len() as i64) / 2;
        score = score.saturating_sub(length_penalty);
        score.max(1)
    } else {
        0
    }
}
