//! Resume ranker: rank candidate resumes against a job description

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::Config;
use resume_ranker::error::{RankerError, Result};
use resume_ranker::output::formatter::ResultFormatter;
use resume_ranker::ranking::assembler::{RankingEngine, RankingMode};
use resume_ranker::ranking::candidate::{Candidate, Query, StructuredFields};
use resume_ranker::ranking::skills::SkillExtractor;
use resume_ranker::services::openai::OpenAiClient;
use resume_ranker::services::{EmbeddingService, JudgmentService};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            candidates,
            mode,
            weight,
            output,
            save,
        } => {
            let mode = cli::parse_mode(&mode).map_err(RankerError::InvalidInput)?;
            let output_format =
                cli::parse_output_format(&output).map_err(RankerError::InvalidInput)?;

            info!("Ranking candidates in {} against {}", candidates.display(), job.display());

            let query = Query::new(std::fs::read_to_string(&job)?);
            let batch = load_candidates(&candidates)?;
            println!(
                "{} {} candidate file(s) loaded",
                "»".bold(),
                batch.len().to_string().bold()
            );

            let client = Arc::new(OpenAiClient::new(&config.services, config.api_key()?)?);
            let embedder: Arc<dyn EmbeddingService> = client.clone();
            let judge: Option<Arc<dyn JudgmentService>> = match mode {
                RankingMode::KeywordJudgment => Some(client),
                RankingMode::LexicalSemantic => None,
            };

            let engine = RankingEngine::new(embedder, judge, config.scoring.clone());

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.set_message("Scoring batch...");
            spinner.enable_steady_tick(Duration::from_millis(100));

            let results = engine.rank(&query, &batch, mode, weight).await;
            spinner.finish_and_clear();
            let results = results?;

            let formatter = ResultFormatter::new(config.output.color_output && save.is_none());
            let rendered = formatter.format(&results, &output_format)?;

            match save {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("{} results written to {}", "✓".green(), path.display());
                }
                None => print!("{}", rendered),
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    RankerError::Configuration(format!("Failed to render config: {}", e))
                })?;
                println!("{}", rendered);
                Ok(())
            }
        },
    }
}

/// Reads each plain-text file in the directory as one candidate, in
/// filename order so input order (and therefore tie-breaking) is
/// deterministic. Skill lists are backfilled from the text when the file
/// carries none.
fn load_candidates(dir: &Path) -> Result<Vec<Candidate>> {
    if !dir.is_dir() {
        return Err(RankerError::InvalidInput(format!(
            "{} is not a directory",
            dir.display()
        )));
    }

    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(RankerError::InvalidInput(format!(
            "no .txt candidate files found in {}",
            dir.display()
        )));
    }

    let extractor = SkillExtractor::new()?;
    let mut candidates = Vec::with_capacity(paths.len());
    for path in paths {
        let id = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("unknown")
            .to_string();
        let text = std::fs::read_to_string(&path)?;
        let skills = extractor.extract(&text);

        let mut candidate = Candidate::new(id, text);
        if !skills.is_empty() {
            candidate = candidate.with_fields(StructuredFields {
                skills,
                ..Default::default()
            });
        }
        candidates.push(candidate);
    }

    Ok(candidates)
}
