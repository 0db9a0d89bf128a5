//! Step reporting - how a turn's progress reaches the user

use colored::*;

use super::step::{Step, StepKind};

/// Receives every step of a turn as it happens
pub trait StepReporter {
    fn report(&mut self, step: &Step);
}

/// Prints tagged, coloured status lines to stdout
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// The line printed for a step, without colour
    pub fn line(step: &Step) -> String {
        match step.kind {
            StepKind::Start => format!("🧠 start - {}", step.content),
            StepKind::Plan => format!("🧠 plan - {}", step.content),
            StepKind::Action => format!(
                "🛠️ action - Tool: {}",
                step.function.as_deref().unwrap_or("<none>")
            ),
            StepKind::Observe => format!("🔍 observe - {}", step.content),
            StepKind::Output => format!("✅ output - {}", step.content),
        }
    }
}

impl StepReporter for ConsoleReporter {
    fn report(&mut self, step: &Step) {
        let line = Self::line(step);
        let styled = match step.kind {
            StepKind::Start | StepKind::Plan => line.cyan(),
            StepKind::Action => line.yellow(),
            StepKind::Observe => line.normal(),
            StepKind::Output => line.green().bold(),
        };
        println!("{}", styled);

        if self.verbose
            && let Some(output) = &step.output
        {
            println!("{}", output.to_string().dimmed());
        }
    }
}

/// Keeps every reported step; used by tests and embedding callers
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub steps: Vec<Step>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }
}

impl StepReporter for RecordingReporter {
    fn report(&mut self, step: &Step) {
        self.steps.push(step.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_console_lines() {
        assert_eq!(
            ConsoleReporter::line(&Step::new(StepKind::Start, "User wants an app")),
            "🧠 start - User wants an app"
        );
        assert_eq!(
            ConsoleReporter::line(&Step::action("write_files", json!({}), "Writing")),
            "🛠️ action - Tool: write_files"
        );
        assert_eq!(
            ConsoleReporter::line(&Step::new(StepKind::Output, "done")),
            "✅ output - done"
        );
    }

    #[test]
    fn test_action_without_function_line() {
        let line = ConsoleReporter::line(&Step::new(StepKind::Action, ""));
        assert!(line.contains("<none>"));
    }

    #[test]
    fn test_recording_reporter() {
        let mut reporter = RecordingReporter::new();
        reporter.report(&Step::new(StepKind::Plan, "a"));
        reporter.report(&Step::new(StepKind::Output, "b"));
        assert_eq!(reporter.kinds(), vec![StepKind::Plan, StepKind::Output]);
    }
}
