//! stepr - an interactive plan/act/observe coding agent
//!
//! The model answers every request with exactly one JSON step. Action steps
//! name a scaffolding tool (folders, files, package installs, project setup);
//! the agent runs it and feeds the report back as an observation until the
//! model produces an output step.

pub mod agent;
pub mod error;
pub mod llm;
pub mod prompt;
pub mod repl;
pub mod tools;

pub use error::{Result, StepError};
