//! Step - one unit of the start/plan/action/observe/output protocol

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Result, StepError};
use crate::tools::{ToolCall, ToolError};

/// Kind of a step, carried on the wire as `"step"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Start,
    Plan,
    Action,
    Observe,
    Output,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::Plan => "plan",
            StepKind::Action => "action",
            StepKind::Observe => "observe",
            StepKind::Output => "output",
        }
    }

    /// Output ends the turn
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepKind::Output)
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single step as exchanged with the model
///
/// `function` and `input` are only meaningful on action steps; `output`
/// carries the tool report on observe steps produced by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    #[serde(rename = "step", alias = "kind")]
    pub kind: StepKind,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

impl Step {
    pub fn new(kind: StepKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            function: None,
            input: None,
            output: None,
        }
    }

    pub fn action(function: impl Into<String>, input: Value, content: impl Into<String>) -> Self {
        Self {
            function: Some(function.into()),
            input: Some(input),
            ..Self::new(StepKind::Action, content)
        }
    }

    pub fn observe(content: impl Into<String>, output: Option<Value>) -> Self {
        Self {
            output,
            ..Self::new(StepKind::Observe, content)
        }
    }

    /// Parse one step from a completion reply
    pub fn parse(reply: &str) -> Result<Step> {
        serde_json::from_str(strip_code_fence(reply)).map_err(|e| StepError::MalformedStep(format!("{}: {}", e, preview(reply))))
    }

    /// Serialize for the transcript
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode the tool invocation of an action step
    pub fn tool_call(&self) -> std::result::Result<ToolCall, ToolError> {
        let function = self.function.as_deref().ok_or(ToolError::MissingFunction)?;
        ToolCall::decode(function, self.input.as_ref())
    }
}

/// JSON-mode replies often carry `null` for fields the model considers optional
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Some providers wrap JSON-mode replies in a markdown fence anyway
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn preview(reply: &str) -> String {
    const MAX: usize = 200;
    if reply.chars().count() <= MAX {
        reply.to_string()
    } else {
        format!("{}...", reply.chars().take(MAX).collect::<String>())
    }
}
