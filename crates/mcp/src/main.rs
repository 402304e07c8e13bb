use anyhow::Result;
use std::io::{self, BufRead, Write};

use foundry_core::{FoundryClient, FoundryConfig};

mod server;
mod tools;
mod transport;

use server::McpServer;

fn main() -> Result<()> {
    // stdout carries protocol frames only; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let config = FoundryConfig::from_env();
    let server = McpServer::new(Box::new(FoundryClient::new(config)));

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        if let Some(response) = server.handle_line(&line) {
            writeln!(stdout, "{}", response)?;
            stdout.flush()?;
        }
    }

    Ok(())
}
