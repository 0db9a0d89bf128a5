//! Per-item tool reports fed back to the model as observations

use serde::{Deserialize, Serialize};

use super::ToolKind;

/// Outcome of one item (folder, file, section, setup sub-action)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReport {
    pub target: String,
    pub success: bool,
    pub detail: String,
}

/// Everything a single tool call did, in processing order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolReport {
    pub tool: ToolKind,
    pub items: Vec<ItemReport>,
}

impl ToolReport {
    pub fn new(tool: ToolKind) -> Self {
        Self { tool, items: Vec::new() }
    }

    pub fn push_ok(&mut self, target: impl Into<String>, detail: impl Into<String>) {
        self.items.push(ItemReport {
            target: target.into(),
            success: true,
            detail: detail.into(),
        });
    }

    pub fn push_failed(&mut self, target: impl Into<String>, detail: impl Into<String>) {
        self.items.push(ItemReport {
            target: target.into(),
            success: false,
            detail: detail.into(),
        });
    }

    pub fn failures(&self) -> impl Iterator<Item = &ItemReport> {
        self.items.iter().filter(|item| !item.success)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failure_count() == 0
    }

    /// One-line summary, e.g. `write_files: 3 succeeded, 1 failed`
    pub fn summary(&self) -> String {
        let failed = self.failure_count();
        format!("{}: {} succeeded, {} failed", self.tool, self.items.len() - failed, failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts() {
        let mut report = ToolReport::new(ToolKind::CreateFolders);
        report.push_ok("a", "created");
        report.push_failed("b", "permission denied");
        report.push_ok("c", "created");

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.failure_count(), 1);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures().next().unwrap().target, "b");
        assert_eq!(report.summary(), "create_folders: 2 succeeded, 1 failed");
    }

    #[test]
    fn test_empty_report_succeeds() {
        let report = ToolReport::new(ToolKind::WriteFiles);
        assert!(report.all_succeeded());
        assert_eq!(report.summary(), "write_files: 0 succeeded, 0 failed");
    }

    #[test]
    fn test_report_json_shape() {
        let mut report = ToolReport::new(ToolKind::InstallPackages);
        report.push_ok("frontend", "added 1 package");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["tool"], "install_packages");
        assert_eq!(value["items"][0]["target"], "frontend");
        assert_eq!(value["items"][0]["success"], true);
    }
}
