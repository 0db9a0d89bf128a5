use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::{LevelFilter, info};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod cli;
mod config;

use cli::Cli;
use cli::commands::Commands;
use config::Config;
use stepr::agent::{Agent, ConsoleReporter, Step, StepKind, Transcript};
use stepr::llm::OpenAiClient;
use stepr::prompt::{PromptRenderer, load_template};
use stepr::repl;
use stepr::tools::{ToolExecutor, ToolKind};

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stepr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("stepr.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // Config is not loaded yet; its level is applied by apply_log_level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .target(env_logger::Target::Pipe(target))
        .init();
    if std::env::var_os("RUST_LOG").is_none() {
        log::set_max_level(LevelFilter::Info);
    }

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

/// RUST_LOG wins over the config file
fn apply_log_level(config_level: Option<&str>) {
    if std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    let level = log_level_filter(config_level);
    log::set_max_level(level);
    info!("Log level set to {}", level);
}

fn log_level_filter(level: Option<&str>) -> LevelFilter {
    level.and_then(|l| l.parse().ok()).unwrap_or(LevelFilter::Info)
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => run_session(cli, config).await,
        Some(Commands::Tools) => handle_tools_command(),
        Some(Commands::Step { path }) => handle_step_command(path),
    }
}

async fn run_session(cli: &Cli, config: &Config) -> Result<()> {
    let root = std::env::current_dir().context("Failed to resolve working directory")?;

    let template = load_template(config.agent.system_prompt_path.as_deref())?;
    let system_prompt = PromptRenderer::new().system_prompt(&template, &root)?;

    let mut client_config = config.openai_config();
    if let Some(model) = &cli.model {
        client_config.model = model.clone();
    }
    info!("Using model {} at {}", client_config.model, client_config.base_url);
    let llm = Arc::new(OpenAiClient::with_api_key(config.api_key(), client_config)?);

    let tools = ToolExecutor::new(config.tool_context(root));
    let transcript = Transcript::new(system_prompt).with_window(config.agent.transcript_window);
    let mut agent = Agent::with_config(llm, tools, transcript, config.agent_config());

    let mut reporter = ConsoleReporter::new(cli.is_verbose());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    let turns = repl::run(&mut agent, &mut reporter, stdin.lock(), &mut stdout)
        .await
        .context("Session failed")?;

    let usage = agent.llm().total_usage();
    info!(
        "Session ended after {} turns, {} tokens ({} prompt, {} completion)",
        turns,
        usage.total(),
        usage.prompt_tokens,
        usage.completion_tokens
    );
    Ok(())
}

fn handle_tools_command() -> Result<()> {
    for kind in ToolKind::ALL {
        println!("{} - {}", kind.name().green(), kind.description());
        println!("    input: {}", kind.input_shape().dimmed());
    }
    Ok(())
}

fn handle_step_command(path: &Path) -> Result<()> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read step from stdin")?;
        buf
    } else {
        fs::read_to_string(path).context(format!("Failed to read {}", path.display()))?
    };

    let step = Step::parse(&text)?;
    println!("{} {}", "kind:".green(), step.kind);
    println!("{} {}", "content:".green(), step.content);

    if step.kind == StepKind::Action {
        match step.tool_call() {
            Ok(call) => println!("{} {}", "dispatches to:".green(), serde_json::to_string_pretty(&call)?),
            Err(e) => println!("{} {}", "not dispatchable:".red(), e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    setup_logging().context("Failed to setup logging")?;

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    apply_log_level(config.log_level.as_deref());

    info!("Starting with config from: {:?}", cli.config);

    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
