//! CLI subcommand implementations.

pub mod programs;
