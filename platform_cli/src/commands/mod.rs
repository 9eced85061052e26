//! Subcommands

pub mod equations;
pub mod solve;
pub mod sweep;
