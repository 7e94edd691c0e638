//! Candidate ranking: minimum rank wins, earliest candidate wins ties

use super::types::Candidate;
use std::cmp::Ordering;

/// Total order on rank scores, lower first.
pub fn compare_rank(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Return the minimum item under the strict `less` relation.
///
/// An item only replaces the current best if it is strictly less, so among
/// equal items the first one in iteration order is returned.
pub fn select_min_by<T, F>(items: impl IntoIterator<Item = T>, less: F) -> Option<T>
where
    F: Fn(&T, &T) -> bool,
{
    let mut best: Option<T> = None;
    for item in items {
        let replace = match &best {
            Some(current) => less(&item, current),
            None => true,
        };
        if replace {
            best = Some(item);
        }
    }
    best
}

/// Pick the best candidate.
pub fn select_best(candidates: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    select_min_by(candidates, |a, b| compare_rank(a.rank, b.rank) == Ordering::Less)
}

/// Index of the best candidate in a slice.
pub fn best_index(candidates: &[Candidate]) -> Option<usize> {
    select_min_by(0..candidates.len(), |&a, &b| {
        compare_rank(candidates[a].rank, candidates[b].rank) == Ordering::Less
    })
}

/// Candidates sorted best first; ties keep enumeration order.
pub fn rank_order(candidates: &[Candidate]) -> Vec<&Candidate> {
    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| compare_rank(a.rank, b.rank));
    ordered
}
