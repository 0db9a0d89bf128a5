//! create_folders tool - Create each directory in a list

use log::{info, warn};

use super::{ToolContext, ToolError, ToolKind, ToolReport};

/// Create every path (and its parents). Existing directories count as success.
pub async fn create_folders(paths: &[String], ctx: &ToolContext) -> ToolReport {
    let mut report = ToolReport::new(ToolKind::CreateFolders);

    for path in paths {
        match tokio::fs::create_dir_all(ctx.resolve(path)).await {
            Ok(()) => {
                info!("Created folder: {}", path);
                report.push_ok(path, "created");
            }
            Err(e) => {
                let err = ToolError::io(format!("create folder '{}'", path), e);
                warn!("{}", err);
                report.push_failed(path, err.to_string());
            }
        }
    }

    report
}
