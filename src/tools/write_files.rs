//! write_files tool - Write content to files, creating parents

use std::collections::BTreeMap;
use std::path::Path;

use log::{info, warn};

use super::{ToolContext, ToolError, ToolKind, ToolReport};

/// Write each file, overwriting existing content
pub async fn write_files(files: &BTreeMap<String, String>, ctx: &ToolContext) -> ToolReport {
    let mut report = ToolReport::new(ToolKind::WriteFiles);

    for (path, content) in files {
        match write_one(&ctx.resolve(path), content).await {
            Ok(()) => {
                info!("Created file: {}", path);
                report.push_ok(path, format!("wrote {} bytes", content.len()));
            }
            Err(e) => {
                let err = ToolError::io(format!("write file '{}'", path), e);
                warn!("{}", err);
                report.push_failed(path, err.to_string());
            }
        }
    }

    report
}

pub(super) async fn write_one(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await
}
