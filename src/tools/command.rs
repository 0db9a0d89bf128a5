//! External process execution shared by install and setup tools

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use super::{ToolContext, ToolError};

/// Run a shell command line with `sh -c` in `dir`
pub async fn run_shell(command: &str, dir: &Path, ctx: &ToolContext) -> Result<String, ToolError> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    run(cmd, command, dir, ctx).await
}

/// Run `program args..` directly (no shell) in `dir`
pub async fn run_program(program: &str, args: &[String], dir: &Path, ctx: &ToolContext) -> Result<String, ToolError> {
    let label = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    let mut cmd = Command::new(program);
    cmd.args(args);
    run(cmd, &label, dir, ctx).await
}

async fn run(mut cmd: Command, label: &str, dir: &Path, ctx: &ToolContext) -> Result<String, ToolError> {
    log::info!("Executing `{}` in {}", label, dir.display());

    let child = cmd
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = match ctx.command_timeout {
        Some(timeout) => tokio::time::timeout(timeout, child)
            .await
            .map_err(|_| ToolError::CommandTimeout {
                command: label.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            })?,
        None => child.await,
    }
    .map_err(|e| ToolError::io(format!("spawn `{}`", label), e))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    let combined = if stdout.is_empty() && !stderr.is_empty() {
        stderr.to_string()
    } else if stderr.is_empty() {
        stdout.to_string()
    } else {
        format!("{}\n\nSTDERR:\n{}", stdout, stderr)
    };
    let combined = truncate(combined.trim_end(), ctx.max_output_chars);

    if output.status.success() {
        Ok(combined)
    } else {
        Err(ToolError::CommandFailed {
            command: label.to_string(),
            status: output.status.to_string(),
            output: combined,
        })
    }
}

/// Truncate on a char boundary, noting the original length
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}...\n[truncated, {} chars total]", kept, total)
}
