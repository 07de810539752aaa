//! Term-frequency lexical scoring
//!
//! Two deliberately distinct lexical measures live here. `TfidfScorer` is
//! the full term-weighted cosine used alongside embeddings; `keyword_overlap`
//! is a cheaper significant-word ratio used only when the judgment signal
//! already captures depth.

use crate::error::{RankerError, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

/// Practical ceiling on vocabulary size to bound memory on large batches.
pub const DEFAULT_MAX_FEATURES: usize = 20_000;

/// Lowercase, strip everything but letters, collapse whitespace.
pub fn normalize_text(text: &str) -> String {
    let non_letter = Regex::new(r"[^a-z\s]").expect("invalid letter regex");
    let whitespace = Regex::new(r"\s+").expect("invalid whitespace regex");

    let lowered = text.to_lowercase();
    let letters_only = non_letter.replace_all(&lowered, " ");
    whitespace.replace_all(&letters_only, " ").trim().to_string()
}

/// TF-IDF scorer over a joint vocabulary of candidates plus the query.
///
/// The vocabulary is fit fresh on every call, over {candidate texts} ∪
/// {query text}; the query must never be fit separately. No state survives
/// across ranking operations.
pub struct TfidfScorer {
    max_features: usize,
    stop_words: HashSet<&'static str>,
}

impl Default for TfidfScorer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FEATURES)
    }
}

impl TfidfScorer {
    pub fn new(max_features: usize) -> Self {
        Self {
            max_features,
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    /// Returns one cosine similarity per candidate text, in input order,
    /// each clamped to [0, 1]. An empty candidate list yields an empty
    /// result. A degenerate corpus (no terms at all) is an error; the call
    /// site degrades it to an all-zero score list for the batch.
    pub fn score(&self, candidate_texts: &[String], query_text: &str) -> Result<Vec<f32>> {
        if candidate_texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut docs: Vec<Vec<String>> = candidate_texts
            .iter()
            .map(|t| self.terms(t))
            .collect();
        docs.push(self.terms(query_text));

        let vocabulary = self.fit_vocabulary(&docs)?;
        let idf = Self::inverse_document_frequencies(&docs, &vocabulary);

        let vectors: Vec<HashMap<usize, f32>> = docs
            .iter()
            .map(|doc| Self::weighted_vector(doc, &vocabulary, &idf))
            .collect();

        // Last vector is the query.
        let query_vector = &vectors[vectors.len() - 1];
        let scores = vectors[..vectors.len() - 1]
            .iter()
            .map(|v| sparse_cosine(v, query_vector).clamp(0.0, 1.0))
            .collect();

        Ok(scores)
    }

    /// Unigrams and bigrams after lowercasing and stop-word removal.
    fn terms(&self, text: &str) -> Vec<String> {
        let normalized = normalize_text(text);
        let words: Vec<&str> = normalized
            .unicode_words()
            .filter(|w| !self.stop_words.contains(*w))
            .collect();

        let mut terms: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        for pair in words.windows(2) {
            terms.push(format!("{} {}", pair[0], pair[1]));
        }
        terms
    }

    /// Joint vocabulary over the whole corpus, capped at `max_features`
    /// terms selected by corpus-wide frequency (alphabetical tie-break for
    /// determinism).
    fn fit_vocabulary(&self, docs: &[Vec<String>]) -> Result<HashMap<String, usize>> {
        let mut corpus_counts: HashMap<&str, usize> = HashMap::new();
        for doc in docs {
            for term in doc {
                *corpus_counts.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        if corpus_counts.is_empty() {
            return Err(RankerError::Lexical(
                "empty vocabulary: corpus contains no terms".to_string(),
            ));
        }

        let mut ranked: Vec<(&str, usize)> = corpus_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        Ok(ranked
            .into_iter()
            .enumerate()
            .map(|(index, (term, _))| (term.to_string(), index))
            .collect())
    }

    /// Smoothed IDF: ln((1 + n) / (1 + df)) + 1.
    fn inverse_document_frequencies(
        docs: &[Vec<String>],
        vocabulary: &HashMap<String, usize>,
    ) -> Vec<f32> {
        let mut document_frequency = vec![0usize; vocabulary.len()];
        for doc in docs {
            let mut seen: HashSet<usize> = HashSet::new();
            for term in doc {
                if let Some(&index) = vocabulary.get(term) {
                    seen.insert(index);
                }
            }
            for index in seen {
                document_frequency[index] += 1;
            }
        }

        let n = docs.len() as f32;
        document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect()
    }

    /// L2-normalized TF-IDF vector for one document, keyed by vocabulary
    /// index. An empty document yields an empty (zero) vector.
    fn weighted_vector(
        doc: &[String],
        vocabulary: &HashMap<String, usize>,
        idf: &[f32],
    ) -> HashMap<usize, f32> {
        let mut counts: HashMap<usize, f32> = HashMap::new();
        for term in doc {
            if let Some(&index) = vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, value) in counts.iter_mut() {
            *value *= idf[*index];
        }

        let norm: f32 = counts.values().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in counts.values_mut() {
                *value /= norm;
            }
        }
        counts
    }
}

fn sparse_cosine(a: &HashMap<usize, f32>, b: &HashMap<usize, f32>) -> f32 {
    // Both vectors are already L2-normalized; cosine reduces to a dot product.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(index, value)| large.get(index).map(|other| value * other))
        .sum()
}

/// Jaccard-style overlap between a candidate's significant words and the
/// query's, divided by the size of the query's significant-word set. Used
/// only in keyword+judgment mode; not the TF-IDF measure above.
pub fn keyword_overlap(candidate_text: &str, query_text: &str) -> f32 {
    if candidate_text.is_empty() || query_text.is_empty() {
        return 0.0;
    }

    let candidate_words = significant_words(candidate_text);
    let query_words = significant_words(query_text);

    if query_words.is_empty() {
        return 0.0;
    }

    let common = candidate_words.intersection(&query_words).count();
    common as f32 / query_words.len() as f32
}

/// Words longer than 2 characters, lowercased, minus a small stop-word set.
fn significant_words(text: &str) -> HashSet<String> {
    let stop_words: HashSet<&str> = OVERLAP_STOP_WORDS.iter().copied().collect();
    text.split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.len() > 2 && !stop_words.contains(w.as_str()))
        .collect()
}

// Compact stop set for the overlap ratio; the TF-IDF list below is broader.
const OVERLAP_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "had", "with", "have", "this", "will", "his", "from", "they", "she", "been", "than", "has",
    "were",
];

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];
