//! session2gource CLI library.
//!
//! This crate provides the command-line interface for converting session logs.

mod cli;
mod config;
pub mod convert;

pub use cli::Cli;
pub use config::Config;
