//! Prompt System - system prompt template and rendering

mod render;

pub use render::{PromptRenderer, SYSTEM_TEMPLATE, load_template};
