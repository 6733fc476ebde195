use std::future::Future;
use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::agent::ResearchAgent;

pub const PROMPT: &str = "Enter your research query: ";
const RULE: &str = "==================================================";

fn is_exit_command(input: &str) -> bool {
    matches!(input.to_lowercase().as_str(), "quit" | "exit" | "q")
}

/// Interactive loop: read a query per line, print the raw summary.
///
/// Stops on `quit`/`exit`/`q`, end of input, or when `shutdown` resolves.
pub async fn run<R, W, S>(agent: &ResearchAgent, input: R, out: &mut W, shutdown: S) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();

    writeln!(out, "Research Assistant - Ready to help!")?;
    writeln!(out, "Type 'quit' or 'exit' to stop\n")?;

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let line = tokio::select! {
            _ = &mut shutdown => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            break;
        };

        let query = line.trim();
        if is_exit_command(query) {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let result = tokio::select! {
            _ = &mut shutdown => break,
            result = agent.research(query) => result,
        };

        match result {
            Ok(output) => {
                writeln!(out, "\n{RULE}")?;
                writeln!(out, "RESULT:")?;
                writeln!(out, "{RULE}")?;
                writeln!(out, "{output}")?;
                writeln!(out, "{RULE}\n")?;
            }
            Err(e) => {
                tracing::error!("research failed: {e}");
                writeln!(out, "Error: {e}\n")?;
            }
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}
