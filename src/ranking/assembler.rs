//! Batch ranking assembler
//!
//! Coordinates the scoring signals for one batch and assembles the final
//! ordered result list. A ranking operation is one unit of work: no partial
//! results are observable mid-batch, and dropping the returned future
//! abandons in-flight service calls without corrupting anything for a retry
//! (no state survives across calls).

use crate::config::ScoringConfig;
use crate::error::{RankerError, Result};
use crate::ranking::candidate::{validate_input, Candidate, Query, RankedResult};
use crate::ranking::fusion::{blend, round4, Signal};
use crate::ranking::judgment::Judgment;
use crate::ranking::lexical::{keyword_overlap, TfidfScorer};
use crate::ranking::semantic;
use crate::services::{EmbeddingService, JudgmentService};
use futures::future::join_all;
use std::sync::Arc;

/// Which two signals are fused into the ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
    /// `alpha * semantic + (1 - alpha) * lexical`, semantic favored.
    LexicalSemantic,
    /// `keyword_weight * overlap + (1 - keyword_weight) * judgment.overall`,
    /// judgment favored.
    KeywordJudgment,
}

/// Per-batch lifecycle. Tracked for logging; the phases are sequential and
/// the join before `Fusing` is the ordering barrier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BatchPhase {
    Collecting,
    Scoring,
    Fusing,
    Sorted,
    Delivered,
}

pub struct RankingEngine {
    embedder: Arc<dyn EmbeddingService>,
    judge: Option<Arc<dyn JudgmentService>>,
    scoring: ScoringConfig,
}

impl RankingEngine {
    /// Service handles are injected so tests can substitute stubs; the
    /// engine never constructs clients itself.
    pub fn new(
        embedder: Arc<dyn EmbeddingService>,
        judge: Option<Arc<dyn JudgmentService>>,
        scoring: ScoringConfig,
    ) -> Self {
        Self {
            embedder,
            judge,
            scoring,
        }
    }

    /// Ranks a batch of candidates against the query. Every submitted
    /// candidate yields exactly one result, in final rank order; only
    /// input-contract violations fail the whole call.
    pub async fn rank(
        &self,
        query: &Query,
        candidates: &[Candidate],
        mode: RankingMode,
        weight_override: Option<f32>,
    ) -> Result<Vec<RankedResult>> {
        let mut phase = BatchPhase::Collecting;

        validate_input(query, candidates)?;
        let weight = self.resolve_weight(mode, weight_override)?;

        if candidates.is_empty() {
            Self::advance(&mut phase, BatchPhase::Delivered, 0);
            return Ok(Vec::new());
        }

        Self::advance(&mut phase, BatchPhase::Scoring, candidates.len());
        let mut scored = match mode {
            RankingMode::LexicalSemantic => self.score_lexical_semantic(query, candidates).await,
            RankingMode::KeywordJudgment => self.score_keyword_judgment(query, candidates).await?,
        };

        Self::advance(&mut phase, BatchPhase::Fusing, candidates.len());
        for entry in &mut scored {
            entry.fuse(weight);
        }

        Self::advance(&mut phase, BatchPhase::Sorted, candidates.len());
        // Stable descending sort: equal fused scores retain their input order.
        scored.sort_by(|a, b| {
            b.raw_fused
                .partial_cmp(&a.raw_fused)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Self::advance(&mut phase, BatchPhase::Delivered, candidates.len());
        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(position, entry)| entry.deliver(position + 1))
            .collect())
    }

    fn resolve_weight(&self, mode: RankingMode, weight_override: Option<f32>) -> Result<f32> {
        let weight = match (mode, weight_override) {
            (_, Some(w)) => {
                if !(0.0..=1.0).contains(&w) {
                    return Err(RankerError::InvalidInput(format!(
                        "fusion weight {} is outside [0, 1]",
                        w
                    )));
                }
                w
            }
            (RankingMode::LexicalSemantic, None) => self.scoring.semantic_weight,
            (RankingMode::KeywordJudgment, None) => self.scoring.keyword_weight,
        };
        Ok(weight)
    }

    /// Lexical+semantic scoring. The TF-IDF fit is a batch barrier; the
    /// per-candidate embedding calls run concurrently.
    async fn score_lexical_semantic(
        &self,
        query: &Query,
        candidates: &[Candidate],
    ) -> Vec<ScoredCandidate> {
        let candidate_texts: Vec<String> = candidates
            .iter()
            .map(|c| c.extracted_text.clone())
            .collect();

        let scorer = TfidfScorer::new(self.scoring.max_features);
        let lexical_scores = match scorer.score(&candidate_texts, &query.raw_text) {
            Ok(scores) => scores,
            Err(e) => {
                // One batch-wide vectorization failure degrades gracefully
                // to "no lexical signal" rather than aborting ranking.
                log::warn!("lexical scoring failed for the whole batch: {}", e);
                vec![0.0; candidates.len()]
            }
        };

        let semantic_signals = match self.embedder.embed(&query.raw_text).await {
            Ok(query_embedding) => {
                join_all(candidates.iter().map(|candidate| {
                    let embedding = &query_embedding;
                    async move {
                        match semantic::score_candidate(self.embedder.as_ref(), embedding, candidate)
                            .await
                        {
                            Ok(score) => Signal::Score(score),
                            Err(e) => {
                                log::warn!("embedding failed for candidate {}: {}", candidate.id, e);
                                Signal::Failed(e.to_string())
                            }
                        }
                    }
                }))
                .await
            }
            Err(e) => {
                log::warn!("query embedding failed, semantic signal floored: {}", e);
                vec![Signal::Failed(e.to_string()); candidates.len()]
            }
        };

        candidates
            .iter()
            .zip(lexical_scores)
            .zip(semantic_signals)
            .map(|((candidate, lexical), semantic_signal)| ScoredCandidate {
                result: skeleton(candidate),
                signal_a: semantic_signal,
                signal_b: Signal::Score(lexical),
                mode: RankingMode::LexicalSemantic,
                raw_fused: 0.0,
            })
            .collect()
    }

    /// Keyword+judgment scoring. Judgment calls run concurrently; the
    /// overlap ratio is cheap and computed inline.
    async fn score_keyword_judgment(
        &self,
        query: &Query,
        candidates: &[Candidate],
    ) -> Result<Vec<ScoredCandidate>> {
        let judge = self.judge.as_ref().ok_or_else(|| {
            RankerError::Configuration(
                "keyword+judgment mode requires a judgment service".to_string(),
            )
        })?;

        let judgments = join_all(candidates.iter().map(|candidate| {
            let judge = Arc::clone(judge);
            async move {
                match judge
                    .judge(&candidate.judgment_text(), &query.raw_text)
                    .await
                {
                    Ok(judgment) => (judgment, None),
                    Err(e) => {
                        log::warn!(
                            "judgment failed for candidate {}, substituting neutral: {}",
                            candidate.id,
                            e
                        );
                        (Judgment::neutral(), Some(e.to_string()))
                    }
                }
            }
        }))
        .await;

        Ok(candidates
            .iter()
            .zip(judgments)
            .map(|(candidate, (judgment, failure))| {
                let overlap = keyword_overlap(&candidate.judgment_text(), &query.raw_text);
                let overall = judgment.overall_score;

                let mut result = skeleton(candidate);
                result.judgment = Some(judgment);
                result.error = failure;

                ScoredCandidate {
                    result,
                    signal_a: Signal::Score(overlap),
                    signal_b: Signal::Score(overall),
                    mode: RankingMode::KeywordJudgment,
                    raw_fused: 0.0,
                }
            })
            .collect())
    }

    fn advance(phase: &mut BatchPhase, next: BatchPhase, batch_size: usize) {
        log::debug!(
            "ranking batch ({} candidates): {:?} -> {:?}",
            batch_size,
            phase,
            next
        );
        *phase = next;
    }
}

/// One candidate's signals awaiting fusion and delivery.
struct ScoredCandidate {
    result: RankedResult,
    /// Semantic score or keyword overlap, depending on mode.
    signal_a: Signal,
    /// Lexical score or judgment overall, depending on mode.
    signal_b: Signal,
    mode: RankingMode,
    raw_fused: f32,
}

impl ScoredCandidate {
    fn fuse(&mut self, weight: f32) {
        let a = self.signal_a.value_or(0.0);
        let b = self.signal_b.value_or(0.0);
        self.raw_fused = blend(a, b, weight);

        match self.mode {
            RankingMode::LexicalSemantic => {
                self.result.semantic_score = Some(round4(a));
                self.result.lexical_score = Some(round4(b));
            }
            RankingMode::KeywordJudgment => {
                self.result.keyword_score = Some(round4(a));
            }
        }
        if self.result.error.is_none() {
            self.result.error = self
                .signal_a
                .failure()
                .or_else(|| self.signal_b.failure())
                .map(|reason| reason.to_string());
        }
    }

    fn deliver(mut self, rank: usize) -> RankedResult {
        self.result.rank = rank;
        self.result.fused_score = round4(self.raw_fused);
        self.result
    }
}

fn skeleton(candidate: &Candidate) -> RankedResult {
    let fields = candidate.structured_fields.as_ref();
    RankedResult {
        id: candidate.id.clone(),
        rank: 0,
        fused_score: 0.0,
        semantic_score: None,
        lexical_score: None,
        keyword_score: None,
        judgment: None,
        candidate_name: fields.and_then(|f| f.name.clone()),
        email: fields.and_then(|f| f.email.clone()),
        skills: candidate.skills().to_vec(),
        error: None,
    }
}
