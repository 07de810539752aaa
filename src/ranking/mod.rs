//! Hybrid relevance scoring and ranking engine

pub mod assembler;
pub mod candidate;
pub mod fusion;
pub mod judgment;
pub mod lexical;
pub mod semantic;
pub mod skills;
