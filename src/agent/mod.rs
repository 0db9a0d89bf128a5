//! Plan/act/observe agent
//!
//! - `Step` / `StepKind`: the structured reply protocol
//! - `Transcript`: session history sent to the model
//! - `Agent`: the turn loop
//! - `StepReporter`: progress output

mod reporter;
mod runner;
mod step;
mod transcript;

pub use reporter::{ConsoleReporter, RecordingReporter, StepReporter};
pub use runner::{Agent, AgentConfig};
pub use step::{Step, StepKind};
pub use transcript::Transcript;
