//! CLI module for stepr - command-line interface and subcommands.

pub mod commands;

pub use commands::Cli;
