//! initial_setup_from_input tool - Composite frontend/backend bootstrap
//!
//! Every sub-action is best-effort: a failed command, folder or file is
//! recorded and the remaining sub-actions still run. Nothing is rolled back.

use log::{info, warn};

use super::command::run_shell;
use super::write_files::write_one;
use super::{BackendSetup, FrontendSetup, SetupPlan, ToolContext, ToolError, ToolKind, ToolReport};

pub async fn initial_setup(plan: &SetupPlan, ctx: &ToolContext) -> ToolReport {
    let mut report = ToolReport::new(ToolKind::InitialSetupFromInput);

    if let Some(frontend) = &plan.frontend {
        setup_frontend(frontend, ctx, &mut report).await;
    }

    if let Some(backend) = &plan.backend {
        setup_backend(backend, ctx, &mut report).await;
    }

    report
}

async fn setup_frontend(frontend: &FrontendSetup, ctx: &ToolContext, report: &mut ToolReport) {
    info!("Running frontend setup commands...");
    for cmd in &frontend.commands {
        let target = format!("frontend: {}", cmd);
        match run_shell(cmd, ctx.root(), ctx).await {
            Ok(output) => report.push_ok(target, output),
            Err(e) => {
                warn!("{}", e);
                report.push_failed(target, e.to_string());
            }
        }
    }
}

async fn setup_backend(backend: &BackendSetup, ctx: &ToolContext, report: &mut ToolReport) {
    let folder = ctx.resolve(&backend.folder);

    info!("Creating backend folder: {}", backend.folder);
    match tokio::fs::create_dir_all(&folder).await {
        Ok(()) => report.push_ok(&backend.folder, "created"),
        Err(e) => {
            let err = ToolError::io(format!("create backend folder '{}'", backend.folder), e);
            warn!("{}", err);
            report.push_failed(&backend.folder, err.to_string());
        }
    }

    for cmd in &backend.commands {
        let target = format!("{}: {}", backend.folder, cmd);
        match run_shell(cmd, &folder, ctx).await {
            Ok(output) => report.push_ok(target, output),
            Err(e) => {
                warn!("{}", e);
                report.push_failed(target, e.to_string());
            }
        }
    }

    for subfolder in &backend.folders {
        let target = format!("{}/{}", backend.folder, subfolder);
        match tokio::fs::create_dir_all(folder.join(subfolder)).await {
            Ok(()) => {
                info!("Created backend subfolder: {}", target);
                report.push_ok(target, "created");
            }
            Err(e) => {
                let err = ToolError::io(format!("create folder '{}'", target), e);
                warn!("{}", err);
                report.push_failed(target, err.to_string());
            }
        }
    }

    for (file_name, content) in &backend.files {
        let target = format!("{}/{}", backend.folder, file_name);
        match write_one(&folder.join(file_name), content).await {
            Ok(()) => {
                info!("Created backend file: {}", target);
                report.push_ok(target, format!("wrote {} bytes", content.len()));
            }
            Err(e) => {
                let err = ToolError::io(format!("write file '{}'", target), e);
                warn!("{}", err);
                report.push_failed(target, err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn backend(folder: &str) -> BackendSetup {
        BackendSetup {
            folder: folder.to_string(),
            commands: vec!["echo '{}' > package.json".to_string()],
            folders: vec!["routes".to_string(), "models".to_string()],
            files: BTreeMap::from([(
                "index.js".to_string(),
                "const express = require('express');".to_string(),
            )]),
        }
    }

    #[tokio::test]
    async fn test_full_setup() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let plan = SetupPlan {
            frontend: Some(FrontendSetup {
                commands: vec!["mkdir -p frontend/src".to_string()],
            }),
            backend: Some(backend("server")),
        };

        let report = initial_setup(&plan, &ctx).await;

        assert!(report.all_succeeded(), "{:?}", report);
        // 1 frontend command + folder + 1 backend command + 2 subfolders + 1 file
        assert_eq!(report.items.len(), 6);
        assert!(dir.path().join("frontend/src").is_dir());
        assert!(dir.path().join("server/package.json").is_file());
        assert!(dir.path().join("server/routes").is_dir());
        assert!(dir.path().join("server/models").is_dir());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("server/index.js")).unwrap(),
            "const express = require('express');"
        );
    }

    #[tokio::test]
    async fn test_empty_plan_does_nothing() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let report = initial_setup(&SetupPlan::default(), &ctx).await;

        assert!(report.items.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_failed_command_does_not_stop_setup() {
        let dir = tempdir().unwrap();
        let ctx = ToolContext::new(dir.path());

        let mut backend = backend("backend");
        backend.commands = vec!["exit 7".to_string(), "touch ran.txt".to_string()];
        let plan = SetupPlan {
            frontend: None,
            backend: Some(backend),
        };

        let report = initial_setup(&plan, &ctx).await;

        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.failures().next().unwrap().target, "backend: exit 7");
        assert!(dir.path().join("backend/ran.txt").is_file());
        assert!(dir.path().join("backend/index.js").is_file());
    }
}
