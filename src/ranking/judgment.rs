//! Structured multi-criteria judgment produced by the external reasoning
//! service, plus the canonical neutral fallback.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Hiring recommendation levels the rubric allows the judge to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "Strong Hire")]
    StrongHire,
    #[serde(rename = "Hire")]
    Hire,
    #[serde(rename = "Consider")]
    Consider,
    #[serde(rename = "Weak Fit")]
    WeakFit,
    #[serde(rename = "No Hire")]
    NoHire,
    #[serde(rename = "Manual Review Required", other)]
    ManualReviewRequired,
}

impl Recommendation {
    /// The wire/display form, identical to the serde rename strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongHire => "Strong Hire",
            Recommendation::Hire => "Hire",
            Recommendation::Consider => "Consider",
            Recommendation::WeakFit => "Weak Fit",
            Recommendation::NoHire => "No Hire",
            Recommendation::ManualReviewRequired => "Manual Review Required",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate's judgment against the six-criterion rubric. Immutable
/// after creation. Any field the service omits is defaulted to a neutral
/// midpoint rather than failing validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    #[serde(default = "neutral_criterion")]
    pub overall_score: f32,
    #[serde(default = "neutral_criterion")]
    pub experience_score: f32,
    #[serde(default = "neutral_criterion")]
    pub skills_score: f32,
    #[serde(default = "neutral_criterion")]
    pub education_score: f32,
    #[serde(default = "neutral_criterion")]
    pub projects_score: f32,
    #[serde(default = "neutral_criterion")]
    pub career_progression_score: f32,
    #[serde(default = "neutral_criterion")]
    pub cultural_fit_score: f32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub concerns: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default = "default_recommendation")]
    pub recommendation: Recommendation,
    #[serde(default = "not_specified")]
    pub reasoning: String,
    #[serde(default = "not_specified")]
    pub total_experience: String,
    #[serde(default = "not_specified")]
    pub education_level: String,
    #[serde(default)]
    pub key_achievements: Vec<String>,
}

fn neutral_criterion() -> f32 {
    0.5
}

fn default_recommendation() -> Recommendation {
    Recommendation::ManualReviewRequired
}

fn not_specified() -> String {
    "Not specified".to_string()
}

impl Judgment {
    /// The canonical neutral judgment substituted when the judgment service
    /// fails for a candidate. A fallback value, not an error signal: it
    /// participates in fusion like any other judgment.
    pub fn neutral() -> Self {
        Self {
            overall_score: 0.5,
            experience_score: 0.5,
            skills_score: 0.5,
            education_score: 0.5,
            projects_score: 0.5,
            career_progression_score: 0.5,
            cultural_fit_score: 0.5,
            strengths: Vec::new(),
            concerns: vec!["Unable to evaluate due to processing error".to_string()],
            missing_skills: Vec::new(),
            recommendation: Recommendation::ManualReviewRequired,
            reasoning: "Automated evaluation failed".to_string(),
            total_experience: "Unknown".to_string(),
            education_level: "Unknown".to_string(),
            key_achievements: Vec::new(),
        }
    }

    /// Parses a service response body into a judgment, applying per-field
    /// neutral defaults for anything absent and clamping criterion scores
    /// to the unit range.
    pub fn from_response(content: &str) -> Result<Self> {
        let judgment: Judgment = serde_json::from_str(content)?;
        Ok(judgment.clamped())
    }

    fn clamped(mut self) -> Self {
        self.overall_score = self.overall_score.clamp(0.0, 1.0);
        self.experience_score = self.experience_score.clamp(0.0, 1.0);
        self.skills_score = self.skills_score.clamp(0.0, 1.0);
        self.education_score = self.education_score.clamp(0.0, 1.0);
        self.projects_score = self.projects_score.clamp(0.0, 1.0);
        self.career_progression_score = self.career_progression_score.clamp(0.0, 1.0);
        self.cultural_fit_score = self.cultural_fit_score.clamp(0.0, 1.0);
        self
    }
}
