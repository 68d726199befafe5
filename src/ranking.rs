use std::cmp::Ordering;

use crate::models::ScoredRecommendation;

/// Fixed cutoff returned per call.
pub const DEFAULT_TOP_K: usize = 3;

/// Descending stable sort by score, truncated to `k`. Equal scores keep
/// their encounter order; there is no secondary key.
pub fn top_k(mut scored: Vec<ScoredRecommendation>, k: usize) -> Vec<ScoredRecommendation> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_sorts_descending_and_truncates() {
        let scored = vec![
            ScoredRecommendation::new("a", 0.2),
            ScoredRecommendation::new("b", 0.9),
            ScoredRecommendation::new("c", 0.5),
            ScoredRecommendation::new("d", 0.7),
        ];

        let top = top_k(scored, DEFAULT_TOP_K);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["b", "d", "c"]);
    }

    #[test]
    fn test_top_k_never_exceeds_cutoff() {
        let scored = (0..10)
            .map(|i| ScoredRecommendation::new(format!("r{i}"), i as f64))
            .collect();
        assert_eq!(top_k(scored, 3).len(), 3);

        let short = vec![ScoredRecommendation::new("only", 1.0)];
        assert_eq!(top_k(short, 3).len(), 1);
    }

    #[test]
    fn test_top_k_preserves_encounter_order_for_ties() {
        let scored = vec![
            ScoredRecommendation::new("first", 0.5),
            ScoredRecommendation::new("second", 0.5),
            ScoredRecommendation::new("third", 0.5),
        ];

        let top = top_k(scored, 3);
        let names: Vec<&str> = top.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_top_k_zero_score_sorts_last() {
        let scored = vec![
            ScoredRecommendation::new("none", 0.0),
            ScoredRecommendation::new("some", 0.1),
        ];

        let top = top_k(scored, 3);
        assert_eq!(top[0].name, "some");
        assert_eq!(top[1].name, "none");
    }
}
