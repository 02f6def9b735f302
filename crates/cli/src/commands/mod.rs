//! Subcommand implementations.

pub mod data;
pub mod passwords;
