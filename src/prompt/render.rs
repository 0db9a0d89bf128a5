//! Prompt Renderer - Render the system prompt template with Handlebars

use std::path::Path;

use handlebars::Handlebars;
use serde::Serialize;

use crate::error::{Result, StepError};
use crate::tools::ToolKind;

/// Built-in system prompt template
pub const SYSTEM_TEMPLATE: &str = include_str!("system.hbs");

/// One tool as listed in the prompt
#[derive(Debug, Clone, Serialize)]
struct ToolEntry {
    name: &'static str,
    description: &'static str,
    shape: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct SystemContext {
    tools: Vec<ToolEntry>,
    cwd: String,
}

/// Renders prompt templates using Handlebars templating
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl Default for PromptRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptRenderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // prompts are plain text, not HTML
        handlebars.register_escape_fn(handlebars::no_escape);
        Self { handlebars }
    }

    /// Render a template string with any serializable context
    pub fn render_with<T: Serialize>(&self, template: &str, context: &T) -> Result<String> {
        self.handlebars
            .render_template(template, context)
            .map_err(|e| StepError::Prompt(format!("Failed to render template: {}", e)))
    }

    /// Render the system prompt listing every tool
    pub fn system_prompt(&self, template: &str, cwd: &Path) -> Result<String> {
        let context = SystemContext {
            tools: ToolKind::ALL
                .iter()
                .map(|kind| ToolEntry {
                    name: kind.name(),
                    description: kind.description(),
                    shape: kind.input_shape(),
                })
                .collect(),
            cwd: cwd.display().to_string(),
        };
        self.render_with(template, &context)
    }
}

/// Load a template override from disk, or the built-in template
pub fn load_template(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            StepError::Prompt(format!("Failed to load template from {}: {}", path.display(), e))
        }),
        None => Ok(SYSTEM_TEMPLATE.to_string()),
    }
}
