//! CLI interface for the resume ranker

use crate::config::OutputFormat;
use crate::ranking::assembler::RankingMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank a batch of resumes against a job description")]
#[command(
    long_about = "Rank candidate resumes against a job description by fusing TF-IDF, embedding similarity, and LLM judgment signals into one ordered list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank a directory of candidate resumes against a job description
    Rank {
        /// Path to the job description file (plain text)
        #[arg(short, long)]
        job: PathBuf,

        /// Directory of candidate resume files (plain text)
        #[arg(short, long)]
        candidates: PathBuf,

        /// Fusion mode: lexical+semantic or keyword+judgment
        #[arg(short, long, default_value = "lexical+semantic")]
        mode: String,

        /// Fusion weight override in [0, 1] (defaults per mode)
        #[arg(short, long)]
        weight: Option<f32>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file instead of printing
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
}

pub fn parse_mode(mode: &str) -> Result<RankingMode, String> {
    match mode.to_lowercase().as_str() {
        "lexical+semantic" | "hybrid" => Ok(RankingMode::LexicalSemantic),
        "keyword+judgment" | "judgment" => Ok(RankingMode::KeywordJudgment),
        other => Err(format!(
            "unknown mode '{}'; expected lexical+semantic or keyword+judgment",
            other
        )),
    }
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown output format '{}'; expected console or json", other)),
    }
}
