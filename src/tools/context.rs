//! Tool execution context - the working root and process settings

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default package manager used by `install_packages`
pub const DEFAULT_PACKAGE_MANAGER: &str = "npm";

/// Default cap on captured command output in a report item
pub const DEFAULT_MAX_OUTPUT_CHARS: usize = 4_000;

/// Execution context shared by every tool in a session
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Relative tool paths resolve against this directory
    pub root: PathBuf,

    /// Program invoked per `install_packages` section
    pub package_manager: String,

    /// Arguments placed before the package names
    pub install_args: Vec<String>,

    /// Upper bound for each external command; `None` waits forever
    pub command_timeout: Option<Duration>,

    /// Captured output beyond this many chars is truncated
    pub max_output_chars: usize,
}

impl ToolContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            install_args: vec!["install".to_string()],
            command_timeout: None,
            max_output_chars: DEFAULT_MAX_OUTPUT_CHARS,
        }
    }

    /// Context rooted at the process working directory
    pub fn current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// Override the package manager program and its leading arguments
    pub fn with_package_manager<I, S>(mut self, program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.package_manager = program.into();
        self.install_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_command_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn with_max_output_chars(mut self, max: usize) -> Self {
        self.max_output_chars = max;
        self
    }

    /// Resolve a tool-supplied path. Absolute paths are trusted as-is.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() { path.to_path_buf() } else { self.root.join(path) }
    }

    /// Get the root path
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Errors that can occur while decoding or running a tool
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Tool not found: {name}")]
    UnknownTool { name: String },

    #[error("Action step has no function")]
    MissingFunction,

    #[error("Invalid input for {tool}: {message}")]
    InvalidInput { tool: String, message: String },

    #[error("IO error during {operation}: {source}")]
    IoError {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` exited with {status}: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    #[error("Command `{command}` timed out after {timeout_ms}ms")]
    CommandTimeout { command: String, timeout_ms: u64 },
}

impl ToolError {
    pub(crate) fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        ToolError::IoError {
            operation: operation.into(),
            source,
        }
    }
}
