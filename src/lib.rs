//! Resume ranker library

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod ranking;
pub mod services;

pub use config::Config;
pub use error::{RankerError, Result};
pub use ranking::assembler::{RankingEngine, RankingMode};
pub use ranking::candidate::{Candidate, Query, RankedResult, StructuredFields};
