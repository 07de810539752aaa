//! Embedding-based semantic scoring

use crate::error::Result;
use crate::ranking::candidate::Candidate;
use crate::services::EmbeddingService;

/// Cosine similarity between two dense vectors. Defined as 0.0 when either
/// vector is empty, has a zero norm, or the dimensions disagree — never a
/// division by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

/// Rescales a raw cosine in [-1, 1] to [0, 1], clamping floating-point
/// overshoot, so the semantic signal combines fairly with lexical scores.
pub fn normalize_similarity(raw: f32) -> f32 {
    ((raw + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Embeds one candidate's skill-suffixed text and scores it against the
/// query embedding. An empty vector on either side means "no signal" and
/// floors the score at 0.0 without rescaling. A failed embedding call
/// propagates; the caller records it on that candidate alone and
/// substitutes the same floor.
pub async fn score_candidate(
    embedder: &dyn EmbeddingService,
    query_embedding: &[f32],
    candidate: &Candidate,
) -> Result<f32> {
    let embedding = embedder.embed(&candidate.embedding_text()).await?;
    if query_embedding.is_empty() || embedding.is_empty() {
        return Ok(0.0);
    }
    Ok(normalize_similarity(cosine_similarity(
        query_embedding,
        &embedding,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors() {
        let v = vec![0.5, 0.5, 0.5];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_empty_and_zero_vectors() {
        assert_eq!(cosine_similarity(&[], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
    }

    #[test]
    fn test_normalization_bounds() {
        // Antiparallel vectors land at the bottom of the unit range.
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        let raw = cosine_similarity(&a, &b);
        assert!((raw + 1.0).abs() < 1e-6);
        assert_eq!(normalize_similarity(raw), 0.0);

        assert_eq!(normalize_similarity(1.0), 1.0);
        assert_eq!(normalize_similarity(0.0), 0.5);
        // Floating-point overshoot is absorbed.
        assert_eq!(normalize_similarity(1.000001), 1.0);
        assert_eq!(normalize_similarity(-1.000001), 0.0);
    }
}
