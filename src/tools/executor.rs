//! Tool executor - dispatches decoded tool calls

use serde_json::Value;

use super::create_folders::create_folders;
use super::initial_setup::initial_setup;
use super::install_packages::install_packages;
use super::write_files::write_files;
use super::{ToolCall, ToolContext, ToolError, ToolKind, ToolReport};

/// Runs tool calls against one context
#[derive(Debug, Clone)]
pub struct ToolExecutor {
    ctx: ToolContext,
}

impl ToolExecutor {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ToolContext {
        &self.ctx
    }

    /// `(name, description)` for every registered tool
    pub fn descriptors(&self) -> Vec<(&'static str, &'static str)> {
        ToolKind::ALL.iter().map(|k| (k.name(), k.description())).collect()
    }

    /// Execute a decoded tool call
    pub async fn execute(&self, call: &ToolCall) -> ToolReport {
        log::info!("Dispatching tool {}", call.kind());
        match call {
            ToolCall::CreateFolders(paths) => create_folders(paths, &self.ctx).await,
            ToolCall::WriteFiles(files) => write_files(files, &self.ctx).await,
            ToolCall::InstallPackages(sections) => install_packages(sections, &self.ctx).await,
            ToolCall::InitialSetupFromInput(plan) => initial_setup(plan, &self.ctx).await,
        }
    }

    /// Decode `function` + `input` and execute
    pub async fn dispatch(&self, function: &str, input: Option<&Value>) -> Result<ToolReport, ToolError> {
        let call = ToolCall::decode(function, input)?;
        Ok(self.execute(&call).await)
    }
}
