//! MAIRE - Terminal client for the Multi-Anchor Immutable Reasoning Engine

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use maire::app::{Actions, SlotBoard};
use maire::client::fallback::{fetch_models, run_or_mock};
use maire::client::{ActiveSlot, AnswerSource, backend_from_config};
use maire::config::BackendKind;
use maire::engine::{DEFAULT_LEDGER_MODELS, Engine};
use maire::{App, Config, Topology, paths};

/// Terminal client for the Multi-Anchor Immutable Reasoning Engine
#[derive(Parser)]
#[command(name = "maire")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: Connection,

    /// Topology selected at startup
    #[arg(long, global = true)]
    topology: Option<Topology>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where requests go
#[derive(Args)]
struct Connection {
    /// Base URL of the MAIRE service
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Answer with the in-process ledger engine instead of the service
    #[arg(long, global = true, conflicts_with = "endpoint")]
    local: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the models the service offers
    Models,
    /// Send one prompt and print the answer with its reasoning trace
    Run {
        /// Prompt to send
        prompt: String,
        /// Model to include, in order (repeatable)
        #[arg(long = "model")]
        models: Vec<String>,
    },
    /// Run the local ledger engine and print its ledger and bodies
    Ledger {
        /// Prompt to run
        prompt: String,
        /// Stub model name, in order (repeatable)
        #[arg(long = "model")]
        models: Vec<String>,
    },
    /// Show the effective configuration
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
        /// Write the effective configuration to the config file
        #[arg(long, conflicts_with = "path")]
        init: bool,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Let --help and --version exit normally
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                e.exit();
            }
            eprintln!("error: {}\n", e.kind());
            Cli::command().print_help()?;
            std::process::exit(1);
        }
    };

    let config = effective_config(&cli)?;
    tracing::info!(
        endpoint = %config.endpoint,
        backend = ?config.backend,
        topology = config.default_topology.slug(),
        "Starting MAIRE"
    );

    match cli.command {
        None => {
            let actions = Actions::new(backend_from_config(&config));
            maire::tui::run(App::new(config), &actions)
        }
        Some(Commands::Models) => {
            cmd_models(&config);
            Ok(())
        }
        Some(Commands::Run { prompt, models }) => {
            cmd_run(&config, &prompt, &models);
            Ok(())
        }
        Some(Commands::Ledger { prompt, models }) => {
            cmd_ledger(&prompt, config.default_topology, &models)
        }
        Some(Commands::Config { path, init }) => cmd_config(&config, path, init),
    }
}

/// Log to the temp dir - tail with: tail -f $TMPDIR/maire.log
/// Set DEBUG=0-3 to control verbosity (0=off, 1=warn, 2=info, 3=debug)
fn init_logging() {
    let log_path = paths::log_path();
    if let Err(e) = std::fs::write(&log_path, "") {
        eprintln!("Warning: Failed to clear log file: {e}");
    }

    let debug_level = std::env::var("DEBUG")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    if debug_level == 0 {
        return;
    }

    let level = match debug_level {
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let (Some(dir), Some(file_name)) = (log_path.parent(), log_path.file_name()) else {
        return;
    };
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    tracing_subscriber::fmt()
        .with_writer(file_appender)
        .with_max_level(level)
        .with_ansi(false)
        .init();
}

/// The config file with command-line overrides applied
fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load().context("Failed to load config")?;
    if let Some(endpoint) = &cli.connection.endpoint {
        config.endpoint.clone_from(endpoint);
        config.backend = BackendKind::Remote;
    }
    if cli.connection.local {
        config.backend = BackendKind::Local;
    }
    if let Some(topology) = cli.topology {
        config.default_topology = topology;
    }
    Ok(config)
}

fn cmd_models(config: &Config) {
    let backend = backend_from_config(config);
    let list = fetch_models(backend.as_ref());
    for model in &list.models {
        println!("{}\t{}", model.id, model.name);
    }
}

/// Explicit `--model` ids, or the slots a fresh TUI session would start with
fn run_slots(config: &Config, models: &[String]) -> Vec<ActiveSlot> {
    if !models.is_empty() {
        return models
            .iter()
            .enumerate()
            .map(|(position, model_id)| ActiveSlot {
                position,
                model_id: model_id.clone(),
            })
            .collect();
    }

    let backend = backend_from_config(config);
    let list = fetch_models(backend.as_ref());
    let mut board = SlotBoard::new();
    board.initialize(&list.models, config.slot_count, config.enabled_slots);
    board.active_slots()
}

fn cmd_run(config: &Config, prompt: &str, models: &[String]) {
    let active = run_slots(config, models);
    let backend = backend_from_config(config);
    let answer = run_or_mock(
        backend.as_ref(),
        prompt,
        config.default_topology,
        &active,
    );

    let source = match answer.source {
        AnswerSource::Remote => "MAIRE",
        AnswerSource::Local => "local engine",
        AnswerSource::Mock => "mock",
    };
    println!("MAIRE Final Response ({source}, {})", config.default_topology.label());
    println!("{}", answer.content);

    if let Some(layers) = answer.header_stack.filter(|layers| !layers.is_empty()) {
        println!();
        println!("Full Reasoning Trace ({} layers)", layers.len());
        for layer in layers {
            println!();
            println!("[{}]", layer.model);
            println!("{}", layer.response);
        }
    }
}

fn cmd_ledger(prompt: &str, topology: Topology, models: &[String]) -> Result<()> {
    let engine = if models.is_empty() {
        Engine::with_stubs(DEFAULT_LEDGER_MODELS)
    } else {
        Engine::with_stubs(models)
    };
    let transcript = engine
        .run(prompt, topology)
        .context("Local engine run failed")?;

    print!("{}", transcript.header.render());
    println!();
    println!("Bodies ({} stored)", transcript.store.len());
    for entry in transcript.header.entries() {
        let body = transcript.store.get(&entry.reference).unwrap_or_default();
        println!();
        println!("{} ref:{}", entry.label(), entry.short_reference());
        println!("{body}");
    }
    println!();
    println!("Final: {}", transcript.final_response);
    Ok(())
}

fn cmd_config(config: &Config, path: bool, init: bool) -> Result<()> {
    if path {
        println!("{}", Config::default_path().display());
        return Ok(());
    }
    if init {
        config.save()?;
        println!("Wrote {}", Config::default_path().display());
        return Ok(());
    }
    let json = serde_json::to_string_pretty(config).context("Failed to serialize config")?;
    println!("{json}");
    Ok(())
}
