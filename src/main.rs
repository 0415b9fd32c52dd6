#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing::{error, info, warn, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use hud_overlay::display::console::ConsoleDisplay;
use hud_overlay::text::{compose_facing, translate_alternate_codes};
use hud_overlay::{
    HudConfig, HudHost, OverlayController, OverlayMode, Placement, RuntimeInfo, SessionContext,
    TargetResolver, ViewerId,
};

/// Drive one overlay session from stdin, one status line per tick
#[derive(Parser)]
#[command(name = "hud-overlay", version)]
struct Cli {
    /// Config file (defaults to the platform config dir)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "viewer")]
    viewer: String,

    /// Server flavor to probe (paper, spigot, ...)
    #[arg(long, default_value = "paper")]
    flavor: String,

    #[arg(long, default_value = "1.20.1")]
    game_version: String,

    /// Override the configured placement (bossbar, hotbar, ...)
    #[arg(long)]
    placement: Option<String>,

    #[arg(long)]
    keep_text_colors: bool,
}

/// Hands the most recent stdin line to the session
#[derive(Default)]
struct LineResolver {
    current: Option<String>,
}

impl TargetResolver for LineResolver {
    fn resolve(&mut self, _ctx: &SessionContext<'_>) -> Result<Option<String>> {
        Ok(self.current.clone())
    }
}

enum Input {
    Pause,
    Resume,
    Mode(OverlayMode),
    Status(String),
}

fn parse_line(line: &str) -> Result<Input> {
    if let Some(directive) = line.strip_prefix(':') {
        let mut parts = directive.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("pause"), None) => Ok(Input::Pause),
            (Some("resume"), None) => Ok(Input::Resume),
            (Some("mode"), Some(mode)) => Ok(Input::Mode(mode.parse()?)),
            _ => anyhow::bail!("Unknown directive '{}'", line),
        };
    }

    let status = match line.split_once('\t') {
        Some((name, info)) => compose_facing(name, info),
        None => translate_alternate_codes('&', line),
    };
    Ok(Input::Status(status))
}

fn load_config(cli: &Cli) -> Result<HudConfig> {
    let mut config = match &cli.config {
        Some(path) => HudConfig::load_from(path)?,
        None => HudConfig::load()?,
    };

    if let Some(placement) = &cli.placement {
        config.placement = Placement::parse_or_default(placement);
    }
    if cli.keep_text_colors {
        config.keep_text_colors = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout carries the JSON result, logs go to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let runtime = RuntimeInfo::parse(&cli.flavor, &cli.game_version);
    info!(flavor = ?runtime.flavor, version = %cli.game_version, "Runtime");

    let controller = OverlayController::from_config(&config, &runtime, Box::new(ConsoleDisplay));
    let mut host = HudHost::new(controller, LineResolver::default());
    let handle = host.attach(ViewerId::new(cli.viewer.as_str()), None);

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match parse_line(&line) {
            Ok(Input::Pause) => {
                host.set_paused(handle, true);
            }
            Ok(Input::Resume) => {
                host.set_paused(handle, false);
            }
            Ok(Input::Mode(mode)) => {
                host.set_mode(handle, mode);
            }
            Ok(Input::Status(status)) => {
                host.resolver_mut().current = Some(status);
                if let Err(e) = host.tick(handle) {
                    error!(error = ?e, "Tick failed");
                }
            }
            Err(e) => warn!(error = %e, "Skipping input line"),
        }
    }

    let overlay = host.detach(handle).unwrap_or_default();
    let json = serde_json::to_string_pretty(&overlay).context("Failed to serialize overlay")?;
    println!("{json}");
    Ok(())
}
