//! install_packages tool - Run the package manager once per section directory

use std::collections::BTreeMap;

use log::{info, warn};

use super::command::run_program;
use super::{ToolContext, ToolKind, ToolReport};

/// For each section, run `<package_manager> <install_args..> <packages..>` inside it
pub async fn install_packages(sections: &BTreeMap<String, Vec<String>>, ctx: &ToolContext) -> ToolReport {
    let mut report = ToolReport::new(ToolKind::InstallPackages);

    for (section, packages) in sections {
        let dir = ctx.resolve(section);
        if !dir.is_dir() {
            warn!("Section directory missing: {}", dir.display());
            report.push_failed(section, format!("directory '{}' does not exist", section));
            continue;
        }

        info!("Installing packages in '{}': {}", section, packages.join(", "));
        let args: Vec<String> = ctx.install_args.iter().chain(packages).cloned().collect();

        match run_program(&ctx.package_manager, &args, &dir, ctx).await {
            Ok(output) => {
                info!("Installed packages in {}", section);
                report.push_ok(section, output);
            }
            Err(e) => {
                warn!("Install failed in {}: {}", section, e);
                report.push_failed(section, e.to_string());
            }
        }
    }

    report
}
