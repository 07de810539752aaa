//! External scoring collaborators
//!
//! The engine never constructs service clients on its own; handles are
//! injected into the ranking engine so tests can substitute stubs.

pub mod openai;
pub mod prompts;

use crate::error::Result;
use crate::ranking::judgment::Judgment;
use async_trait::async_trait;

/// Produces a fixed-length dense vector for a text.
///
/// Contract: empty or whitespace-only input yields an empty vector, not an
/// error. Any other failure is the caller's responsibility to catch.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Judges one candidate/query pair against the fixed rubric and returns a
/// structured judgment, or an error the caller degrades to the neutral
/// fallback.
#[async_trait]
pub trait JudgmentService: Send + Sync {
    async fn judge(&self, candidate_text: &str, query_text: &str) -> Result<Judgment>;
}
