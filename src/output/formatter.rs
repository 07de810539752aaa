//! Console and JSON rendering of a ranked batch

use crate::config::OutputFormat;
use crate::error::Result;
use crate::ranking::candidate::RankedResult;
use colored::Colorize;
use serde_json::json;

pub struct ResultFormatter {
    color_output: bool,
}

impl ResultFormatter {
    pub fn new(color_output: bool) -> Self {
        Self { color_output }
    }

    pub fn format(&self, results: &[RankedResult], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.to_console(results)),
            OutputFormat::Json => self.to_json(results),
        }
    }

    fn to_console(&self, results: &[RankedResult]) -> String {
        let mut out = String::new();

        out.push_str(&format!(
            "{}\n",
            self.paint_bold(&format!("Ranked {} candidate(s)", results.len()))
        ));
        out.push_str(&format!(
            "{:<5} {:<30} {:>10}  {}\n",
            "Rank", "Candidate", "Score", "Detail"
        ));

        for result in results {
            let score = self.paint_score(result.fused_score);
            let mut detail = Vec::new();

            if let Some(semantic) = result.semantic_score {
                detail.push(format!("semantic {:.4}", semantic));
            }
            if let Some(lexical) = result.lexical_score {
                detail.push(format!("lexical {:.4}", lexical));
            }
            if let Some(keyword) = result.keyword_score {
                detail.push(format!("keyword {:.4}", keyword));
            }
            if let Some(judgment) = &result.judgment {
                detail.push(format!(
                    "judgment {:.4} ({})",
                    judgment.overall_score,
                    judgment.recommendation.as_str()
                ));
            }
            if let Some(error) = &result.error {
                detail.push(format!("error: {}", self.paint_error(error)));
            }

            out.push_str(&format!(
                "{:<5} {:<30} {:>10}  {}\n",
                result.rank,
                truncate(&result.id, 30),
                score,
                detail.join(", ")
            ));

            if !result.skills.is_empty() {
                out.push_str(&format!("      skills: {}\n", result.skills.join(", ")));
            }
        }

        out
    }

    fn to_json(&self, results: &[RankedResult]) -> Result<String> {
        let report = json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "candidate_count": results.len(),
            "results": results,
        });
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn paint_score(&self, score: f32) -> String {
        let text = format!("{:.4}", score);
        if !self.color_output {
            return text;
        }
        if score >= 0.75 {
            text.green().to_string()
        } else if score >= 0.5 {
            text.yellow().to_string()
        } else {
            text.red().to_string()
        }
    }

    fn paint_bold(&self, text: &str) -> String {
        if self.color_output {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_error(&self, text: &str) -> String {
        if self.color_output {
            text.red().to_string()
        } else {
            text.to_string()
        }
    }
}

fn truncate(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
