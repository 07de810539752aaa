//! Result rendering

pub mod formatter;
