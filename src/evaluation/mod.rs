//! Retrieval-quality evaluation
//!
//! Scores a ranked list of retrieved document IDs against a single known-relevant
//! ID under a binary relevance model. Each query has exactly one ground-truth
//! document (the file the user asked about), so `total_relevant` is fixed at 1.
//!
//! The evaluator is a pure function: no state, no I/O, safe to call concurrently.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The five ranking-quality metrics for a single query.
///
/// Serializes with the conventional metric names as keys:
/// `Recall@K`, `Precision@K`, `MAP`, `MRR`, `nDCG@K`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankingMetrics {
    /// Fraction of relevant documents found in the top-K window
    #[serde(rename = "Recall@K")]
    pub recall_at_k: f64,
    /// Fraction of the top-K window that is relevant
    #[serde(rename = "Precision@K")]
    pub precision_at_k: f64,
    /// Average precision over relevant hits (single query, so MAP = AP)
    #[serde(rename = "MAP")]
    pub map: f64,
    /// Reciprocal rank of the first relevant hit, 0 if absent
    #[serde(rename = "MRR")]
    pub mrr: f64,
    /// Rank-discounted gain normalized against the ideal ordering
    #[serde(rename = "nDCG@K")]
    pub ndcg_at_k: f64,
}

impl RankingMetrics {
    /// All-zero metrics, the score for an empty or fully irrelevant window.
    pub fn zero() -> Self {
        Self {
            recall_at_k: 0.0,
            precision_at_k: 0.0,
            map: 0.0,
            mrr: 0.0,
            ndcg_at_k: 0.0,
        }
    }

    /// Language-neutral `metric name -> score` view.
    pub fn to_map(&self) -> HashMap<String, f64> {
        HashMap::from([
            ("Recall@K".to_string(), self.recall_at_k),
            ("Precision@K".to_string(), self.precision_at_k),
            ("MAP".to_string(), self.map),
            ("MRR".to_string(), self.mrr),
            ("nDCG@K".to_string(), self.ndcg_at_k),
        ])
    }

    /// True when every metric is exactly zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// Compute Recall@K, Precision@K, MAP, MRR and nDCG@K for one query.
///
/// `retrieved` is the index output ordered by descending relevance score,
/// `relevant` the single ground-truth document ID, and `k` the cutoff: only
/// `retrieved[0..k]` is scored (the whole list when it is shorter than `k`).
///
/// `k == 0` yields an empty window and all-zero metrics; the Precision@K
/// denominator is guarded so the call never panics. Duplicate IDs are scored
/// positionally: MRR stops at the first hit, while the summation metrics
/// (Recall, Precision, MAP, nDCG) count every matching position in the window.
pub fn evaluate_ranking(retrieved: &[String], relevant: &str, k: usize) -> RankingMetrics {
    let window = &retrieved[..retrieved.len().min(k)];

    // Binary relevance vector over the top-K window
    let relevance: Vec<u32> = window
        .iter()
        .map(|id| u32::from(id == relevant))
        .collect();

    // Exactly one relevant document per query
    let total_relevant = 1.0_f64;

    let hits_in_window: u32 = relevance.iter().sum();
    let recall_at_k = f64::from(hits_in_window) / total_relevant;

    let precision_at_k = if k > 0 {
        f64::from(hits_in_window) / k as f64
    } else {
        0.0
    };

    // Average precision: precision at each relevant position, summed
    let mut ap = 0.0;
    let mut relevant_count = 0u32;
    for (i, &rel) in relevance.iter().enumerate() {
        if rel == 1 {
            relevant_count += 1;
            ap += f64::from(relevant_count) / (i as f64 + 1.0);
        }
    }
    let map = ap / total_relevant;

    // Reciprocal rank of the first hit only
    let mut mrr = 0.0;
    for (i, &rel) in relevance.iter().enumerate() {
        if rel == 1 {
            mrr = 1.0 / (i as f64 + 1.0);
            break;
        }
    }

    // DCG with log2 rank discount; ideal DCG puts the one relevant doc at rank 1
    let dcg: f64 = relevance
        .iter()
        .enumerate()
        .map(|(i, &rel)| f64::from(rel) / (i as f64 + 2.0).log2())
        .sum();
    let idcg = 1.0 / 2.0_f64.log2();
    let ndcg_at_k = dcg / idcg;

    RankingMetrics {
        recall_at_k,
        precision_at_k,
        map,
        mrr,
        ndcg_at_k,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_retrieval_is_all_zero() {
        let metrics = evaluate_ranking(&[], "doc1", 3);
        assert!(metrics.is_zero());
    }

    #[test]
    fn test_perfect_rank_one_hit() {
        let metrics = evaluate_ranking(&ids(&["doc1", "docX", "docY"]), "doc1", 3);
        assert_eq!(metrics.recall_at_k, 1.0);
        assert!((metrics.precision_at_k - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(metrics.map, 1.0);
        assert_eq!(metrics.mrr, 1.0);
        assert!((metrics.ndcg_at_k - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_hit_at_rank_three() {
        let metrics = evaluate_ranking(&ids(&["docX", "docY", "doc1"]), "doc1", 3);
        assert_eq!(metrics.recall_at_k, 1.0);
        assert!((metrics.precision_at_k - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.map - 1.0 / 3.0).abs() < 1e-12);
        assert!((metrics.mrr - 1.0 / 3.0).abs() < 1e-12);
        // DCG = 1/log2(4) = 0.5, IDCG = 1
        assert!((metrics.ndcg_at_k - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_no_hit_in_window() {
        let metrics = evaluate_ranking(&ids(&["docX", "docY", "docZ"]), "doc1", 3);
        assert!(metrics.is_zero());
    }

    #[test]
    fn test_hit_beyond_cutoff_excluded() {
        let metrics = evaluate_ranking(&ids(&["docX", "doc1", "docY"]), "doc1", 1);
        assert!(metrics.is_zero());
    }

    #[test]
    fn test_degenerate_cutoff_zero() {
        let metrics = evaluate_ranking(&ids(&["doc1"]), "doc1", 0);
        assert!(metrics.is_zero());
    }

    #[test]
    fn test_cutoff_larger_than_list() {
        let metrics = evaluate_ranking(&ids(&["doc1"]), "doc1", 10);
        assert_eq!(metrics.recall_at_k, 1.0);
        // Precision denominator stays K even when fewer results exist
        assert!((metrics.precision_at_k - 0.1).abs() < 1e-12);
        assert_eq!(metrics.mrr, 1.0);
    }

    #[test]
    fn test_deterministic() {
        let retrieved = ids(&["docA", "doc1", "docB"]);
        let first = evaluate_ranking(&retrieved, "doc1", 3);
        let second = evaluate_ranking(&retrieved, "doc1", 3);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_hit_asymmetry() {
        // MRR stops at the first occurrence; the summation metrics count both.
        let metrics = evaluate_ranking(&ids(&["doc1", "docX", "doc1"]), "doc1", 3);
        assert_eq!(metrics.mrr, 1.0);
        assert_eq!(metrics.recall_at_k, 2.0);
        assert!((metrics.precision_at_k - 2.0 / 3.0).abs() < 1e-12);
        // AP = 1/1 + 2/3
        assert!((metrics.map - 5.0 / 3.0).abs() < 1e-12);
        // DCG = 1/log2(2) + 1/log2(4) = 1.5
        assert!((metrics.ndcg_at_k - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_metric_names() {
        let metrics = evaluate_ranking(&ids(&["doc1"]), "doc1", 3);
        let json = serde_json::to_value(metrics).unwrap();
        for key in ["Recall@K", "Precision@K", "MAP", "MRR", "nDCG@K"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_to_map_matches_fields() {
        let metrics = evaluate_ranking(&ids(&["docX", "doc1"]), "doc1", 3);
        let map = metrics.to_map();
        assert_eq!(map["MRR"], metrics.mrr);
        assert_eq!(map["Recall@K"], metrics.recall_at_k);
        assert_eq!(map.len(), 5);
    }
}
