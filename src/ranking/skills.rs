//! Predefined-skill extraction fallback
//!
//! Used when the parsing collaborator supplied no skill list, so the
//! semantic skill suffix and the reported skills column are still populated.

use crate::error::{RankerError, Result};
use aho_corasick::AhoCorasick;

pub struct SkillExtractor {
    matcher: AhoCorasick,
    skill_database: Vec<String>,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(Vec::new())
    }

    pub fn with_custom_skills(additional_skills: Vec<String>) -> Result<Self> {
        let mut skill_database: Vec<String> = Self::default_skill_database()
            .iter()
            .map(|s| s.to_string())
            .collect();
        skill_database.extend(additional_skills);

        // Longest patterns first so compound skills win over their prefixes.
        skill_database.sort_by(|a, b| b.len().cmp(&a.len()));

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(aho_corasick::MatchKind::LeftmostLongest)
            .build(&skill_database)
            .map_err(|e| {
                RankerError::Configuration(format!("failed to build skill matcher: {}", e))
            })?;

        Ok(Self {
            matcher,
            skill_database,
        })
    }

    /// Unique skills found in the text, in first-occurrence order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for mat in self.matcher.find_iter(text) {
            let skill = self.skill_database[mat.pattern()].to_lowercase();
            if !found.contains(&skill) {
                found.push(skill);
            }
        }
        found
    }

    pub fn skill_count(&self) -> usize {
        self.skill_database.len()
    }

    fn default_skill_database() -> &'static [&'static str] {
        &[
            "python", "java", "c++", "javascript", "typescript", "rust", "go", "sql", "mysql",
            "postgresql", "mongodb", "redis", "html", "css", "react", "angular", "vue",
            "nodejs", "node.js", "flask", "django", "fastapi", "spring", "machine learning",
            "deep learning", "nlp", "tensorflow", "pytorch", "scikit-learn", "pandas", "numpy",
            "azure", "aws", "gcp", "docker", "kubernetes", "terraform", "git", "jira", "linux",
            "ci/cd", "rest api", "graphql", "microservices", "kafka", "spark",
        ]
    }
}
