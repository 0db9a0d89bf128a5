use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use stepr::agent::AgentConfig;
use stepr::llm::OpenAiConfig;
use stepr::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use stepr::tools::ToolContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub llm: LlmConfig,
    pub agent: AgentSection,
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Environment variable that overrides `base_url`
    pub base_url_env: String,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "api_key".to_string(),
            base_url_env: "base_url".to_string(),
            max_tokens: None,
            temperature: None,
            timeout_ms: 300000,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub max_steps_per_turn: Option<usize>,
    pub transcript_window: Option<usize>,
    pub system_prompt_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub package_manager: String,
    pub install_args: Vec<String>,
    pub command_timeout_ms: Option<u64>,
    pub max_output_chars: usize,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            package_manager: "npm".to_string(),
            install_args: vec!["install".to_string()],
            command_timeout_ms: None,
            max_output_chars: 4000,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            llm: LlmConfig::default(),
            agent: AgentSection::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        let project_name = env!("CARGO_PKG_NAME");
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(project_name).join(format!("{}.yml", project_name));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", project_name));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// API key from the configured environment variable; empty when unset
    pub fn api_key(&self) -> String {
        std::env::var(&self.llm.api_key_env).unwrap_or_else(|_| {
            log::warn!("{} is not set; completion calls will likely be rejected", self.llm.api_key_env);
            String::new()
        })
    }

    /// Base URL from the environment, else the config file value
    pub fn base_url(&self) -> String {
        std::env::var(&self.llm.base_url_env).unwrap_or_else(|_| self.llm.base_url.clone())
    }

    pub fn openai_config(&self) -> OpenAiConfig {
        OpenAiConfig {
            base_url: self.base_url(),
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            timeout: Duration::from_millis(self.llm.timeout_ms),
        }
    }

    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            model: None,
            max_tokens: self.llm.max_tokens,
            temperature: self.llm.temperature,
            max_steps_per_turn: self.agent.max_steps_per_turn,
        }
    }

    pub fn tool_context(&self, root: PathBuf) -> ToolContext {
        ToolContext::new(root)
            .with_package_manager(self.tools.package_manager.clone(), self.tools.install_args.clone())
            .with_command_timeout(self.tools.command_timeout_ms.map(Duration::from_millis))
            .with_max_output_chars(self.tools.max_output_chars)
    }
}
