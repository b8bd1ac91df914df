//! Hazard Alert Service - HTTP server
//!
//! Serves the live NWS alert feed, county boundaries, historical presets, and
//! derived map summaries to the hazard map client.
//!
//! Usage:
//!   cargo run --release                          # port from config (default 3003)
//!   cargo run --release -- --port 8080           # override port
//!   cargo run --release -- --config ops.toml -v  # alternate config, debug logging
//!
//! Environment:
//!   HAZMON_CONFIG - path to service.toml (overridden by --config)
//!   PORT          - listen port (overridden by --port)
//!   RUST_LOG      - tracing filter (overrides -v/--quiet)

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use hazmon_service::cache::{AlertCache, ReferenceDataCache};
use hazmon_service::config::{load_config, DEFAULT_CONFIG_PATH};
use hazmon_service::endpoint::{start_endpoint_server, AppState};
use hazmon_service::ingest::counties::CountyBoundarySource;
use hazmon_service::ingest::nws::NwsAlertSource;
use hazmon_service::ingest::presets::PresetRegistry;
use hazmon_service::logging::init_logging;
use hazmon_service::model::HazmonError;

struct Args {
    port: Option<u16>,
    config: Option<PathBuf>,
    verbose: u8,
    quiet: bool,
}

fn usage(program: &str) -> String {
    format!("Usage: {} [--port PORT] [--config PATH] [-v|-vv] [--quiet]", program)
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let program = args.first().map(String::as_str).unwrap_or("hazmon_service");
    let mut parsed = Args {
        port: None,
        config: None,
        verbose: 0,
        quiet: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" => {
                let value = args.get(i + 1).ok_or("--port requires a port number")?;
                parsed.port = Some(value.parse().map_err(|_| format!("invalid port: {}", value))?);
                i += 2;
            }
            "--config" => {
                let value = args.get(i + 1).ok_or("--config requires a path")?;
                parsed.config = Some(PathBuf::from(value));
                i += 2;
            }
            "-v" => {
                parsed.verbose = parsed.verbose.saturating_add(1);
                i += 1;
            }
            "-vv" => {
                parsed.verbose = parsed.verbose.saturating_add(2);
                i += 1;
            }
            "--quiet" | "-q" => {
                parsed.quiet = true;
                i += 1;
            }
            other => return Err(format!("Unknown argument: {}\n{}", other, usage(program))),
        }
    }

    Ok(parsed)
}

fn main() {
    let _ = dotenv::dotenv();

    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };

    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        error!(error = %e, "service failed");
        eprintln!("\n❌ {}\n", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), HazmonError> {
    let config_path = args
        .config
        .or_else(|| env::var("HAZMON_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    let config = load_config(&config_path)?;
    info!(path = %config_path.display(), "configuration loaded");

    let port = match args.port {
        Some(port) => port,
        None => match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| HazmonError::Config(format!("invalid PORT: {}", value)))?,
            Err(_) => config.port,
        },
    };

    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    let presets = PresetRegistry::load(&config.presets, base_dir)?;
    info!(presets = ?presets.names(), "historical presets registered");

    let upstream = &config.upstream;
    let alerts_url = upstream.alerts_request_url();
    let alerts = NwsAlertSource::new(&alerts_url, &upstream.user_agent, upstream.timeout())
        .map_err(|e| HazmonError::Config(format!("failed to build alerts client: {}", e)))?;
    let counties = CountyBoundarySource::new(
        &upstream.counties_url,
        &upstream.user_agent,
        upstream.reference_timeout(),
    )
    .map_err(|e| HazmonError::Config(format!("failed to build counties client: {}", e)))?;

    info!(url = alerts.url(), "alert upstream");

    let state = Arc::new(AppState {
        alerts: AlertCache::new(Box::new(alerts)),
        counties: ReferenceDataCache::new(Box::new(counties)),
        presets,
    });

    start_endpoint_server(port, config.worker_threads, state)
}
