//! Input and output data types for a ranking operation

use crate::error::{RankerError, Result};
use crate::ranking::judgment::Judgment;
use serde::{Deserialize, Serialize};

/// The query document a batch of candidates is ranked against.
/// Created once per ranking request and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub raw_text: String,
}

impl Query {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
        }
    }
}

/// Structured fields supplied by the external parsing collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
}

/// One candidate document. Read-only input to the engine; the extracted
/// text and structured fields are trusted as given (an empty extracted
/// text is a valid, scorable input).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Source filename or other caller-chosen identifier.
    pub id: String,
    pub extracted_text: String,
    #[serde(default)]
    pub structured_fields: Option<StructuredFields>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, extracted_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extracted_text: extracted_text.into(),
            structured_fields: None,
        }
    }

    pub fn with_fields(mut self, fields: StructuredFields) -> Self {
        self.structured_fields = Some(fields);
        self
    }

    pub fn skills(&self) -> &[String] {
        self.structured_fields
            .as_ref()
            .map(|f| f.skills.as_slice())
            .unwrap_or(&[])
    }

    /// Text representation fed to the embedding service: the normalized
    /// extracted text with the skill list appended as a labeled suffix.
    /// Skill tokens are otherwise diluted in long narrative text. A
    /// candidate with no content at all yields an empty string, which the
    /// embedding contract maps to an empty vector and a 0.0 semantic score.
    pub fn embedding_text(&self) -> String {
        let text = crate::ranking::lexical::normalize_text(&self.extracted_text);
        let skills = self.skills().join(" ");
        if text.is_empty() && skills.is_empty() {
            return String::new();
        }
        format!("{}\nSkills: {}", text, skills)
    }

    /// Assembles the content sent to the judgment service, preferring the
    /// structured fields and falling back to the raw extracted text when
    /// the parsed data is minimal.
    pub fn judgment_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(fields) = &self.structured_fields {
            if let Some(name) = &fields.name {
                parts.push(format!("Name: {}", name));
            }
            if let Some(email) = &fields.email {
                parts.push(format!("Email: {}", email));
            }
            if !fields.experience.is_empty() {
                parts.push("\nEXPERIENCE:".to_string());
                for entry in &fields.experience {
                    parts.push(format!("- {}", entry));
                }
            }
            if !fields.education.is_empty() {
                parts.push("\nEDUCATION:".to_string());
                for entry in &fields.education {
                    parts.push(format!("- {}", entry));
                }
            }
            if !fields.skills.is_empty() {
                parts.push(format!("\nSKILLS: {}", fields.skills.join(", ")));
            }
        }

        let structured = parts.join("\n");
        if structured.len() < 200 && !self.extracted_text.trim().is_empty() {
            return self.extracted_text.clone();
        }
        if structured.is_empty() {
            return "No resume content available".to_string();
        }
        structured
    }
}

/// The terminal, externally visible artifact: one per candidate, the full
/// set totally ordered by fused score descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    /// 1-based position in the final order (1 = best).
    pub rank: usize,
    /// Fused score rounded to 4 decimal digits for presentation stability.
    pub fused_score: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semantic_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_score: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judgment: Option<Judgment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Input contract checks. Violations here are the only error class that
/// propagates to the caller as a hard failure; there is nothing meaningful
/// to rank without a query or with malformed candidates.
pub fn validate_input(query: &Query, candidates: &[Candidate]) -> Result<()> {
    if query.raw_text.trim().is_empty() {
        return Err(RankerError::InvalidInput(
            "query text is empty".to_string(),
        ));
    }
    for (i, candidate) in candidates.iter().enumerate() {
        if candidate.id.trim().is_empty() {
            return Err(RankerError::InvalidInput(format!(
                "candidate at index {} has an empty identifier",
                i
            )));
        }
    }
    Ok(())
}
