mod logging;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use breezybrief_api::{
    AirportSearch, ApiClient, ApiError, CancellationToken, ForecastClient, SuggestionFetcher,
};
use breezybrief_core::error::ExitCode;
use breezybrief_core::url::absolute_map_url;
use breezybrief_core::{AppConfig, FormInput};
use breezybrief_tui::app::App;

use logging::{LogTarget, LoggingGuard};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "breezybrief",
    about = "Turbulence briefings for your route, in the terminal",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output in JSON format (for scripts).
    /// Also enabled by setting BREEZYBRIEF_JSON=1.
    #[arg(long, global = true)]
    json: bool,

    /// Forecast API host, e.g. https://api.example.com.
    /// Overrides the config file and BREEZYBRIEF_API_BASE_URL.
    #[arg(long, global = true, value_name = "URL")]
    api_base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search airports by ICAO code or name.
    Search {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Request a route briefing.
    Forecast {
        origin: String,
        destination: String,
        /// Standard (technical) wording instead of calm mode.
        #[arg(long)]
        standard: bool,
        /// Cruise flight level, e.g. 340 or FL340.
        #[arg(long, value_name = "FL")]
        cruise_fl: Option<String>,
    },

    /// Config management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show version information.
    Version,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration.
    Show,
    /// Write the effective configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Print the config file path.
    Path,
}

// ─── Main ────────────────────────────────────────────────────────────────────

fn main() -> Result<std::process::ExitCode> {
    let start = Instant::now();
    let cli = Cli::parse();

    let json_output = cli.json || std::env::var("BREEZYBRIEF_JSON").as_deref() == Ok("1");

    let mut config = AppConfig::load()?;
    if let Some(base) = &cli.api_base_url {
        config
            .set_base_url(base)
            .with_context(|| format!("--api-base-url {base}"))?;
    }

    let target = if cli.command.is_none() {
        LogTarget::FileOnly
    } else {
        LogTarget::FileAndStderr
    };
    // Dropped only after `run` returns, so buffered log lines are flushed.
    let _guard = start_logging(&config, target);

    let code = run(cli.command, config, json_output, start)?;
    Ok(code.into())
}

fn run(
    command: Option<Commands>,
    config: AppConfig,
    json_output: bool,
    start: Instant,
) -> Result<ExitCode> {
    let rt = tokio::runtime::Runtime::new()?;

    match command {
        None => {
            // Background searches and the forecast run on the runtime while
            // the UI loop stays on this thread.
            let _enter = rt.enter();
            let mut app = App::from_config(config)?;
            breezybrief_tui::run_tui(&mut app)?;
        }

        Some(Commands::Search { query, limit }) => {
            let limit = limit.unwrap_or(config.api.search_limit);
            let fetcher = SuggestionFetcher::with_limit(ApiClient::from_config(&config)?, limit);
            let results = rt.block_on(fetcher.search(&query, &CancellationToken::new()));
            let dur = start.elapsed().as_millis();

            if json_output {
                print_json(&serde_json::json!({
                    "status": "ok",
                    "data": { "items": results, "total": results.len(), "query": query },
                    "meta": { "duration_ms": dur }
                }))?;
            } else if results.is_empty() {
                println!("No matches for: {query}");
            } else {
                for airport in &results {
                    println!("{}", airport.display_label());
                }
            }
        }

        Some(Commands::Forecast {
            origin,
            destination,
            standard,
            cruise_fl,
        }) => {
            let input = FormInput {
                origin,
                destination,
                cruise_fl: cruise_fl.unwrap_or_default(),
                calm: !standard,
            };
            let payload = match input.validate() {
                Ok(payload) => payload,
                Err(e) => {
                    let dur = start.elapsed().as_millis();
                    return fail(json_output, "invalid_args", &e.to_string(), dur, ExitCode::InvalidArgs);
                }
            };
            let request = payload.into_request(config.ui.default_cruise_fl);

            let client = ApiClient::from_config(&config)?;
            let forecast = ForecastClient::with_timeout(client, config.forecast_timeout());
            let result = rt.block_on(forecast.fetch_forecast(&request));
            let dur = start.elapsed().as_millis();

            match result {
                Ok(response) => {
                    let map_url = absolute_map_url(&config.api.base_url, &response.map_url);
                    info!(origin = %request.origin, destination = %request.destination, "forecast received");
                    if json_output {
                        print_json(&serde_json::json!({
                            "status": "ok",
                            "data": {
                                "request": request,
                                "briefing": response.briefing,
                                "summary": response.summary,
                                "map_url": map_url,
                            },
                            "meta": { "duration_ms": dur }
                        }))?;
                    } else {
                        let mode = if request.calm { "Calm" } else { "Standard" };
                        println!(
                            "Route Briefing: {} → {} ({mode}, FL{})",
                            request.origin, request.destination, request.cruise_fl
                        );
                        println!();
                        println!("{}", response.briefing.trim_end());
                        println!();
                        match map_url {
                            Some(url) => println!("Route Map: {url}"),
                            None => println!("No map URL returned from server."),
                        }
                    }
                }
                Err(e) => {
                    error!(error = %e, "forecast failed");
                    let (kind, code) = match &e {
                        ApiError::Timeout => ("timeout", ExitCode::NetworkError),
                        ApiError::Network(_) => ("network", ExitCode::NetworkError),
                        _ => ("api_error", ExitCode::GeneralError),
                    };
                    return fail(json_output, kind, &e.to_string(), dur, code);
                }
            }
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                if json_output {
                    let dur = start.elapsed().as_millis();
                    print_json(&serde_json::json!({"status":"ok","data":config,"meta":{"duration_ms":dur}}))?;
                } else {
                    print!("{}", toml::to_string_pretty(&config)?);
                }
            }
            ConfigAction::Init { force } => {
                let path = AppConfig::config_path();
                if path.exists() && !force {
                    let dur = start.elapsed().as_millis();
                    let message = format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                    return fail(json_output, "exists", &message, dur, ExitCode::GeneralError);
                }
                config.save_to(&path)?;
                info!(path = %path.display(), "config written");
                if json_output {
                    let dur = start.elapsed().as_millis();
                    print_json(&serde_json::json!({"status":"ok","data":{"path":path},"meta":{"duration_ms":dur}}))?;
                } else {
                    println!("Wrote {}", path.display());
                }
            }
            ConfigAction::Path => {
                let path = AppConfig::config_path();
                if json_output {
                    let dur = start.elapsed().as_millis();
                    print_json(&serde_json::json!({
                        "status": "ok",
                        "data": { "path": path, "exists": path.exists() },
                        "meta": { "duration_ms": dur }
                    }))?;
                } else {
                    println!("{}", path.display());
                }
            }
        },

        Some(Commands::Version) => {
            let version = env!("CARGO_PKG_VERSION");
            let dur = start.elapsed().as_millis();
            if json_output {
                print_json(&serde_json::json!({"status":"ok","data":{"version":version},"meta":{"duration_ms":dur}}))?;
            } else {
                println!("breezybrief v{version}");
            }
        }
    }

    Ok(ExitCode::Success)
}

fn start_logging(config: &AppConfig, target: LogTarget) -> Option<LoggingGuard> {
    match logging::init_logging(&config.log_dir(), &config.logging.file, target) {
        Ok(guard) => Some(guard),
        Err(e) => {
            if target == LogTarget::FileAndStderr {
                eprintln!("warning: logging disabled: {e}");
            }
            None
        }
    }
}

/// Report a failure; the returned code becomes the process exit status.
fn fail(json_output: bool, kind: &str, message: &str, dur: u128, code: ExitCode) -> Result<ExitCode> {
    if json_output {
        print_json(&serde_json::json!({
            "status": "error",
            "error": kind,
            "message": message,
            "meta": { "duration_ms": dur }
        }))?;
    } else {
        eprintln!("{message}");
    }
    Ok(code)
}

fn print_json(val: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(val)?);
    Ok(())
}
