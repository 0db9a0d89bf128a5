//! Tool system for action steps
//!
//! The registry is a closed set: every tool the model may name is a
//! `ToolKind`, and every decoded invocation is a `ToolCall` carrying that
//! tool's typed input. Tools never fail as a whole; each item they process
//! becomes one entry of a `ToolReport`.

mod command;
mod context;
mod create_folders;
mod executor;
mod initial_setup;
mod install_packages;
mod report;
mod write_files;

pub use context::{ToolContext, ToolError};
pub use executor::ToolExecutor;
pub use report::{ItemReport, ToolReport};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Every tool the agent can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    CreateFolders,
    WriteFiles,
    InstallPackages,
    InitialSetupFromInput,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::CreateFolders,
        ToolKind::WriteFiles,
        ToolKind::InstallPackages,
        ToolKind::InitialSetupFromInput,
    ];

    /// Tool name (matches the step's `function` field)
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::CreateFolders => "create_folders",
            ToolKind::WriteFiles => "write_files",
            ToolKind::InstallPackages => "install_packages",
            ToolKind::InitialSetupFromInput => "initial_setup_from_input",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::CreateFolders => "Create folders based on list of folder paths",
            ToolKind::WriteFiles => "Write files to specified paths with given content",
            ToolKind::InstallPackages => "Install npm packages in frontend or backend",
            ToolKind::InitialSetupFromInput => "Initial setup of frontend/backend from structured plan",
        }
    }

    /// Shape of the `input` value, for the system prompt
    pub fn input_shape(&self) -> &'static str {
        match self {
            ToolKind::CreateFolders => r#"["path/one", "path/two"]"#,
            ToolKind::WriteFiles => r#"{"path/to/file": "file contents"}"#,
            ToolKind::InstallPackages => r#"{"section_dir": ["package", "package"]}"#,
            ToolKind::InitialSetupFromInput => {
                r#"{"frontend": {"commands": ["cmd"]}, "backend": {"folder": "backend", "commands": ["cmd"], "folders": ["dir"], "files": {"name": "contents"}}}"#
            }
        }
    }

    /// Look a tool up by its wire name
    pub fn lookup(name: &str) -> Option<ToolKind> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Input used when an action step omits `input`
    fn empty_input(&self) -> Value {
        match self {
            ToolKind::CreateFolders => Value::Array(Vec::new()),
            _ => Value::Object(Default::default()),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded tool invocation; `input`'s shape is fixed by `function`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", content = "input", rename_all = "snake_case")]
pub enum ToolCall {
    CreateFolders(Vec<String>),
    WriteFiles(BTreeMap<String, String>),
    InstallPackages(BTreeMap<String, Vec<String>>),
    InitialSetupFromInput(SetupPlan),
}

impl ToolCall {
    /// Decode `function` + `input` from an action step
    pub fn decode(function: &str, input: Option<&Value>) -> Result<ToolCall, ToolError> {
        let kind = ToolKind::lookup(function).ok_or_else(|| ToolError::UnknownTool {
            name: function.to_string(),
        })?;

        let input = match input {
            None | Some(Value::Null) => kind.empty_input(),
            Some(value) => value.clone(),
        };

        let decoded = match kind {
            ToolKind::CreateFolders => serde_json::from_value(input).map(ToolCall::CreateFolders),
            ToolKind::WriteFiles => serde_json::from_value(input).map(ToolCall::WriteFiles),
            ToolKind::InstallPackages => serde_json::from_value(input).map(ToolCall::InstallPackages),
            ToolKind::InitialSetupFromInput => serde_json::from_value(input).map(ToolCall::InitialSetupFromInput),
        };

        decoded.map_err(|e| ToolError::InvalidInput {
            tool: kind.name().to_string(),
            message: e.to_string(),
        })
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolCall::CreateFolders(_) => ToolKind::CreateFolders,
            ToolCall::WriteFiles(_) => ToolKind::WriteFiles,
            ToolCall::InstallPackages(_) => ToolKind::InstallPackages,
            ToolCall::InitialSetupFromInput(_) => ToolKind::InitialSetupFromInput,
        }
    }
}

/// Input of `initial_setup_from_input`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontend: Option<FrontendSetup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendSetup>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontendSetup {
    #[serde(default)]
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSetup {
    #[serde(default = "default_backend_folder")]
    pub folder: String,
    #[serde(default)]
    pub commands: Vec<String>,
    #[serde(default)]
    pub folders: Vec<String>,
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

fn default_backend_folder() -> String {
    "backend".to_string()
}

impl Default for BackendSetup {
    fn default() -> Self {
        Self {
            folder: default_backend_folder(),
            commands: Vec::new(),
            folders: Vec::new(),
            files: BTreeMap::new(),
        }
    }
}
