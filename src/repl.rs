//! Interactive read loop: one query per line until `close`

use std::io::{BufRead, Write};

use colored::*;
use log::{error, info};

use crate::agent::{Agent, StepReporter};
use crate::error::Result;
use crate::llm::LlmClient;

/// Shown before every query
pub const PROMPT: &str = "Write your query > ";

/// Entering this instead of a query ends the session
pub const CLOSE_SENTINEL: &str = "close";

/// Read queries from `input` until the sentinel or EOF, running one turn each.
///
/// A failed turn is printed and the loop returns to waiting for input.
/// Returns the number of turns that reached an output step.
pub async fn run<L, R, I, W>(agent: &mut Agent<L>, reporter: &mut R, mut input: I, out: &mut W) -> Result<usize>
where
    L: LlmClient,
    R: StepReporter + ?Sized,
    I: BufRead,
    W: Write,
{
    let mut completed = 0;
    let mut line = String::new();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            info!("Input closed, ending session");
            break;
        }

        let query = line.trim_end_matches(['\n', '\r']);
        if query == CLOSE_SENTINEL {
            info!("Session closed by user");
            break;
        }
        if query.trim().is_empty() {
            continue;
        }

        match agent.run_turn(query, reporter).await {
            Ok(_) => completed += 1,
            Err(e) => {
                error!("Turn failed: {}", e);
                writeln!(out, "{} {}", "❌ error -".red(), e)?;
            }
        }
    }

    Ok(completed)
}
