//! Agent runner - the plan/act/observe loop.
//!
//! A turn starts with a user query and ends at the first `output` step.
//! Each iteration sends the transcript, parses exactly one step from the
//! reply, appends it, and branches on its kind. Action steps are executed
//! through the `ToolExecutor` and answered with an `observe` step.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::error::{Result, StepError};
use crate::llm::{CompletionRequest, LlmClient, Message};
use crate::tools::ToolExecutor;

use super::reporter::StepReporter;
use super::step::{Step, StepKind};
use super::transcript::Transcript;

/// Configuration for the Agent.
#[derive(Debug, Clone, Default)]
pub struct AgentConfig {
    /// Model override sent with every request
    pub model: Option<String>,
    /// Maximum tokens for each reply
    pub max_tokens: Option<u32>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Completions allowed in one turn before giving up; `None` is unbounded
    pub max_steps_per_turn: Option<usize>,
}

/// Drives one interactive session against a completion provider.
pub struct Agent<L>
where
    L: LlmClient,
{
    /// LLM client for completions
    llm: Arc<L>,
    /// Executes action steps
    tools: ToolExecutor,
    /// Session history, owned exclusively by the agent
    transcript: Transcript,
    /// Configuration
    config: AgentConfig,
}

impl<L> Agent<L>
where
    L: LlmClient,
{
    pub fn new(llm: Arc<L>, tools: ToolExecutor, transcript: Transcript) -> Self {
        Self {
            llm,
            tools,
            transcript,
            config: AgentConfig::default(),
        }
    }

    pub fn with_config(llm: Arc<L>, tools: ToolExecutor, transcript: Transcript, config: AgentConfig) -> Self {
        Self {
            llm,
            tools,
            transcript,
            config,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Run one turn for `query`, returning the content of the output step.
    ///
    /// Malformed replies and provider failures end the turn with an error;
    /// whatever was appended before the failure stays in the transcript.
    pub async fn run_turn<R>(&mut self, query: &str, reporter: &mut R) -> Result<String>
    where
        R: StepReporter + ?Sized,
    {
        info!("Starting turn: {}", query);
        self.transcript.push(Message::user(query));

        let mut completions = 0usize;
        loop {
            if let Some(limit) = self.config.max_steps_per_turn
                && completions >= limit
            {
                return Err(StepError::StepLimit(limit));
            }
            completions += 1;

            let step = self.next_step().await?;
            debug!("Received {} step: {}", step.kind, step.content);
            self.transcript.push_step(&step)?;
            reporter.report(&step);

            match step.kind {
                StepKind::Start | StepKind::Plan | StepKind::Observe => continue,
                StepKind::Action => {
                    let observation = self.act(&step).await;
                    self.transcript.push_step(&observation)?;
                    reporter.report(&observation);
                }
                StepKind::Output => {
                    info!("Turn finished after {} completions", completions);
                    return Ok(step.content);
                }
            }
        }
    }

    /// Request and parse the next step
    async fn next_step(&self) -> Result<Step> {
        let mut request = CompletionRequest::new(self.transcript.request_messages()).json_object();
        request.model = self.config.model.clone();
        request.max_tokens = self.config.max_tokens;
        request.temperature = self.config.temperature;

        let response = self.llm.complete(request).await?;
        if response.finish_reason.is_truncated() {
            warn!("Reply truncated at max tokens");
        }

        Step::parse(&response.content)
    }

    /// Execute an action step and build the observation for it.
    ///
    /// An unknown tool or a badly shaped input is reported back to the model
    /// instead of being dropped.
    async fn act(&self, step: &Step) -> Step {
        match step.tool_call() {
            Ok(call) => {
                let report = self.tools.execute(&call).await;
                info!("{}", report.summary());
                let output = serde_json::to_value(&report).ok();
                Step::observe(report.summary(), output)
            }
            Err(e) => {
                warn!("Action not executed: {}", e);
                Step::observe(format!("Action not executed: {}", e), None)
            }
        }
    }
}
