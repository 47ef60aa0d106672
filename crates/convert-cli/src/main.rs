use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use conversion_tools::ExchangeRateApi;
use mock_brain::FailingBrain;
use orchestrator::{Orchestrator, ProcessResult, SessionContext};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "convert-cli")]
#[command(about = "Answer unit, currency and date/time conversion questions")]
struct Args {
    /// Print the full result bag as JSON instead of the answer
    #[arg(long)]
    json: bool,

    /// Skip the language model; classification and answers use local fallbacks
    #[arg(long)]
    offline: bool,

    /// Query to answer. Reads one query per line from stdin when omitted.
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let orchestrator = build_orchestrator(args.offline);

    if !args.query.is_empty() {
        let result = orchestrator.process(&args.query.join(" ")).await;
        print_result(&result, args.json)?;
        return Ok(if result.success {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    // One session for the whole stream, so history carries across lines
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        if matches!(query, "exit" | "quit") {
            break;
        }
        let result = orchestrator.process(query).await;
        print_result(&result, args.json)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Gemini plus live rates, or an always-failing brain when offline or when
/// no API key is configured.
fn build_orchestrator(offline: bool) -> Orchestrator {
    let session = SessionContext::new();

    if !offline {
        match Orchestrator::from_env(session.clone()) {
            Ok(orchestrator) => return orchestrator,
            Err(e) => warn!("{}; continuing offline", e),
        }
    }

    info!("Running offline: answers come from the local fallbacks");
    Orchestrator::new(
        Arc::new(FailingBrain::unavailable("offline mode")),
        Arc::new(ExchangeRateApi::from_env()),
        session,
    )
}

fn print_result(result: &ProcessResult, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result.final_response);
        if let (false, Some(error)) = (result.success, &result.error) {
            eprintln!("error: {}", error);
        }
    }
    Ok(())
}
