use signal_core::config::engine::EngineConfig;
use signal_core::error::{CoreError, CoreResult};
use signal_core::pipeline::analysis::{analyze, AnalysisRequest};
use signal_core::quality::score::{score_content, ScoreBreakdown};
use serde_json::Value;
use std::path::Path;
use tracing::error;

const USAGE: &str = "usage: signal_runner <analyze|score> <path/to/input.json> [--config path/to/engine_config.json]";

fn load_config(args: &[String]) -> CoreResult<EngineConfig> {
    match args.iter().position(|a| a == "--config") {
        Some(idx) => {
            let path = args
                .get(idx + 1)
                .ok_or_else(|| CoreError::InvalidInput("--config needs a path".to_string()))?;
            EngineConfig::from_json(&std::fs::read_to_string(path)?)
        }
        None => EngineConfig::default_v1(),
    }
}

/// `score` input: `{ "breakdown": {...}, "hints": [...] }` or a bare breakdown.
fn run_score(json: &str) -> CoreResult<String> {
    let value: Value = serde_json::from_str(json)?;
    let (breakdown, hints) = match value.get("breakdown") {
        Some(b) => {
            let hints: Vec<String> = match value.get("hints") {
                Some(h) => serde_json::from_value(h.clone())?,
                None => Vec::new(),
            };
            (serde_json::from_value::<ScoreBreakdown>(b.clone())?, hints)
        }
        None => (serde_json::from_value::<ScoreBreakdown>(value)?, Vec::new()),
    };
    Ok(serde_json::to_string_pretty(&score_content(breakdown, hints))?)
}

fn run(command: &str, input: &Path, args: &[String]) -> CoreResult<String> {
    let config = load_config(args)?;
    let json = std::fs::read_to_string(input)?;
    match command {
        "analyze" => {
            let request = AnalysisRequest::from_json(&json)?;
            Ok(serde_json::to_string_pretty(&analyze(&request, &config))?)
        }
        "score" => run_score(&json),
        other => Err(CoreError::InvalidInput(format!("unknown command: {}", other))),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || !matches!(args[1].as_str(), "analyze" | "score") {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    }

    match run(&args[1], Path::new(&args[2]), &args[3..]) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            error!(error = %e, "signal_runner failed");
            std::process::exit(1);
        }
    }
}
