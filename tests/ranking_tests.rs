//! End-to-end ranking engine tests with injected stub services

use async_trait::async_trait;
use resume_ranker::config::ScoringConfig;
use resume_ranker::error::{RankerError, Result};
use resume_ranker::ranking::assembler::{RankingEngine, RankingMode};
use resume_ranker::ranking::candidate::{Candidate, Query};
use resume_ranker::ranking::judgment::{Judgment, Recommendation};
use resume_ranker::services::{EmbeddingService, JudgmentService};
use std::sync::Arc;

/// Deterministic embedder: the vector is a pure function of the text
/// (letter-frequency counts), so identical inputs always embed identically
/// and repeated runs are reproducible. Texts containing "embedfail" error
/// out; empty input yields an empty vector per the service contract.
struct LetterCountEmbedder;

#[async_trait]
impl EmbeddingService for LetterCountEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        if text.contains("embedfail") {
            return Err(RankerError::Embedding("stub embedding outage".to_string()));
        }
        let mut vector = vec![0.0f32; 26];
        for c in text.chars().filter(|c| c.is_ascii_alphabetic()) {
            let index = (c.to_ascii_lowercase() as u8 - b'a') as usize;
            vector[index] += 1.0;
        }
        Ok(vector)
    }
}

/// Judge keyed on marker words; errors for texts containing "judgefail".
struct MarkerJudge;

#[async_trait]
impl JudgmentService for MarkerJudge {
    async fn judge(&self, candidate_text: &str, _query_text: &str) -> Result<Judgment> {
        if candidate_text.contains("judgefail") {
            return Err(RankerError::Judgment("stub judge outage".to_string()));
        }
        let overall = if candidate_text.contains("senior") {
            0.9
        } else if candidate_text.contains("junior") {
            0.6
        } else {
            0.3
        };
        let mut judgment = Judgment::neutral();
        judgment.overall_score = overall;
        judgment.recommendation = Recommendation::Consider;
        judgment.concerns.clear();
        Ok(judgment)
    }
}

fn hybrid_engine() -> RankingEngine {
    RankingEngine::new(Arc::new(LetterCountEmbedder), None, ScoringConfig::default())
}

fn judgment_engine() -> RankingEngine {
    RankingEngine::new(
        Arc::new(LetterCountEmbedder),
        Some(Arc::new(MarkerJudge)),
        ScoringConfig::default(),
    )
}

fn query() -> Query {
    Query::new("Senior Rust engineer building distributed backend systems")
}

#[tokio::test]
async fn test_no_candidate_is_ever_dropped() {
    let engine = hybrid_engine();
    let candidates = vec![
        Candidate::new("a.txt", "rust backend services"),
        Candidate::new("b.txt", "embedfail resume body"),
        Candidate::new("c.txt", ""),
        Candidate::new("d.txt", "oil painting and gardening"),
        Candidate::new("e.txt", "distributed systems in rust"),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    assert_eq!(results.len(), candidates.len());
}

#[tokio::test]
async fn test_ranks_are_a_contiguous_permutation() {
    let engine = hybrid_engine();
    let candidates: Vec<Candidate> = (0..7)
        .map(|i| Candidate::new(format!("c{}.txt", i), format!("resume body variant {}", i)))
        .collect();

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    let mut ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=7).collect::<Vec<_>>());
    ranks.sort_unstable();
    ranks.dedup();
    assert_eq!(ranks.len(), 7);
}

#[tokio::test]
async fn test_equal_scores_preserve_input_order() {
    let engine = hybrid_engine();
    // Three byte-identical candidates tie exactly; one distinct candidate
    // lands elsewhere without disturbing their relative order.
    let shared = "rust engineer with backend experience";
    let candidates = vec![
        Candidate::new("tie-1.txt", shared),
        Candidate::new("tie-2.txt", shared),
        Candidate::new("other.txt", "completely unrelated pastry chef"),
        Candidate::new("tie-3.txt", shared),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    let tied_order: Vec<&str> = results
        .iter()
        .filter(|r| r.id.starts_with("tie-"))
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(tied_order, vec!["tie-1.txt", "tie-2.txt", "tie-3.txt"]);

    let tied_scores: Vec<f32> = results
        .iter()
        .filter(|r| r.id.starts_with("tie-"))
        .map(|r| r.fused_score)
        .collect();
    assert_eq!(tied_scores[0], tied_scores[1]);
    assert_eq!(tied_scores[1], tied_scores[2]);
}

#[tokio::test]
async fn test_same_batch_ranks_identically_twice() {
    let engine = hybrid_engine();
    let candidates = vec![
        Candidate::new("a.txt", "rust services and databases"),
        Candidate::new("b.txt", "python data pipelines"),
        Candidate::new("c.txt", "distributed rust backend"),
    ];

    let first = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();
    let second = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    let first_view: Vec<(String, f32, usize)> = first
        .iter()
        .map(|r| (r.id.clone(), r.fused_score, r.rank))
        .collect();
    let second_view: Vec<(String, f32, usize)> = second
        .iter()
        .map(|r| (r.id.clone(), r.fused_score, r.rank))
        .collect();
    assert_eq!(first_view, second_view);
}

#[tokio::test]
async fn test_identical_candidates_receive_identical_scores() {
    let engine = hybrid_engine();
    let candidates = vec![
        Candidate::new("left.txt", "senior rust engineer"),
        Candidate::new("right.txt", "senior rust engineer"),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    assert_eq!(results[0].fused_score, results[1].fused_score);
    assert_eq!(results[0].semantic_score, results[1].semantic_score);
    assert_eq!(results[0].lexical_score, results[1].lexical_score);
}

#[tokio::test]
async fn test_empty_candidate_scores_zero_and_ranks_last() {
    let engine = hybrid_engine();
    let candidates = vec![
        Candidate::new("full-1.txt", "senior rust engineer for backend systems"),
        Candidate::new("empty.txt", ""),
        Candidate::new("full-2.txt", "distributed systems engineer"),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, Some(0.7))
        .await
        .unwrap();

    let empty = results.iter().find(|r| r.id == "empty.txt").unwrap();
    assert_eq!(empty.semantic_score, Some(0.0));
    assert_eq!(empty.lexical_score, Some(0.0));
    assert_eq!(empty.fused_score, 0.0);
    assert_eq!(empty.rank, 3);
}

#[tokio::test]
async fn test_all_component_scores_stay_in_unit_range() {
    let engine = hybrid_engine();
    let candidates = vec![
        Candidate::new("a.txt", "rust rust rust rust"),
        Candidate::new("b.txt", "zzzz qqqq xxxx"),
        Candidate::new("c.txt", ""),
        Candidate::new("d.txt", "embedfail body"),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::LexicalSemantic, None)
        .await
        .unwrap();

    for result in &results {
        assert!((0.0..=1.0).contains(&result.fused_score));
        assert!((0.0..=1.0).contains(&result.semantic_score.unwrap()));
        assert!((0.0..=1.0).contains(&result.lexical_score.unwrap()));
    }
}

#[tokio::test]
async fn test_judgment_outage_is_isolated_to_one_candidate() {
    let engine = judgment_engine();
    let candidates = vec![
        Candidate::new("a.txt", "senior rust engineer"),
        Candidate::new("b.txt", "judgefail resume body"),
        Candidate::new("c.txt", "junior rust developer"),
    ];

    let results = engine
        .rank(&query(), &candidates, RankingMode::KeywordJudgment, None)
        .await
        .unwrap();

    let a = results.iter().find(|r| r.id == "a.txt").unwrap();
    let b = results.iter().find(|r| r.id == "b.txt").unwrap();
    let c = results.iter().find(|r| r.id == "c.txt").unwrap();

    assert_eq!(b.judgment.as_ref().unwrap(), &Judgment::neutral());
    assert!(b.error.as_deref().unwrap().contains("stub judge outage"));

    assert_eq!(a.judgment.as_ref().unwrap().overall_score, 0.9);
    assert_eq!(c.judgment.as_ref().unwrap().overall_score, 0.6);
    assert!(a.error.is_none());
    assert!(c.error.is_none());
}

#[tokio::test]
async fn test_judgment_mode_weight_endpoints() {
    let candidates = vec![Candidate::new("a.txt", "senior rust engineer")];

    // keyword_weight = 1.0: fused equals the overlap ratio exactly.
    let engine = judgment_engine();
    let results = engine
        .rank(&query(), &candidates, RankingMode::KeywordJudgment, Some(1.0))
        .await
        .unwrap();
    assert_eq!(results[0].fused_score, results[0].keyword_score.unwrap());

    // keyword_weight = 0.0: fused equals the judgment overall exactly.
    let results = engine
        .rank(&query(), &candidates, RankingMode::KeywordJudgment, Some(0.0))
        .await
        .unwrap();
    let judgment_overall = results[0].judgment.as_ref().unwrap().overall_score;
    assert!((results[0].fused_score - judgment_overall).abs() < 1e-4);
}

#[tokio::test]
async fn test_missing_query_is_a_hard_failure() {
    let engine = hybrid_engine();
    let result = engine
        .rank(
            &Query::new(""),
            &[Candidate::new("a.txt", "text")],
            RankingMode::LexicalSemantic,
            None,
        )
        .await;
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}
