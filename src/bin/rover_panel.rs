//! Rover panel CLI
//!
//! Runs the telemetry loop headless and prints the power supply table (or one
//! JSON object per tick) until the tick limit or Ctrl-C.

use anyhow::{bail, Context, Result};
use clap::Parser;
use rover_panel::config::{ConfigError, ConfigLoader, PanelConfig};
use rover_panel::hal::DeviceHandle;
use rover_panel::panel::{render_power_table, ControlPanel, EmergencyAction, LedCommand, PanelEvent, PowerBoard};
use rover_panel::telemetry::{FnSink, TelemetryDriver, TickSnapshot};
use std::path::PathBuf;
use tokio::sync::watch;

/// Rover ground-control panel
#[derive(Parser, Debug)]
#[command(name = "rover-panel")]
#[command(about = "Headless rover control panel with synthetic power-rail telemetry", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of ticks to run (0 runs until Ctrl-C)
    #[arg(short = 'n', long, default_value_t = 0)]
    ticks: u64,

    /// Tick interval in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// RNG seed for reproducible telemetry
    #[arg(long)]
    seed: Option<u64>,

    /// Serial port of the rover controller (enables the device link)
    #[arg(short, long, value_name = "PORT")]
    port: Option<String>,

    /// LED command to send once at startup (on, off, blink)
    #[arg(long, value_name = "COMMAND")]
    led: Option<LedCommand>,

    /// Emergency button to press once at startup (stop, partial, main-bus, go)
    #[arg(long, value_name = "ACTION")]
    emergency: Option<EmergencyAction>,

    /// Print each tick as a JSON line instead of a table
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Rover panel v{}", rover_panel::VERSION);

    let config = load_config(&args)?;
    let mut panel = ControlPanel::new(&config).context("failed to build control panel")?;

    if config.link.enabled {
        // The panel runs without a device; only the LED commands need one
        match DeviceHandle::open(&config.link) {
            Ok(device) => panel.attach_device(device),
            Err(e) => log::warn!("Device link unavailable: {}", e),
        }
    }

    if let Some(command) = args.led {
        panel.handle(PanelEvent::Led(command))?;
    }
    if let Some(action) = args.emergency {
        panel.handle(PanelEvent::Emergency(action))?;
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Ctrl-C received, stopping");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut driver = TelemetryDriver::from_settings(&config.telemetry);
    if args.ticks > 0 {
        driver = driver.with_max_ticks(args.ticks);
    }

    let board = panel.board().clone();
    let json = args.json;
    let quiet = args.quiet;
    let mut sink = FnSink(move |snapshot: &TickSnapshot| {
        if quiet && !json {
            return;
        }
        match format_tick(&board, snapshot, json) {
            Ok(text) => println!("{}", text),
            Err(e) => log::error!("Failed to encode tick {}: {}", snapshot.sequence, e),
        }
    });

    let ticks = driver.run(&mut panel, &mut sink, shutdown_rx).await;
    log::info!("Ran {} ticks", ticks);

    if let Some(mut device) = panel.detach_device() {
        device.close();
    }

    Ok(())
}

/// One JSON line, or a numbered power table
fn format_tick(board: &PowerBoard, snapshot: &TickSnapshot, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(snapshot)
    } else {
        Ok(format!(
            "Tick {}\n{}",
            snapshot.sequence,
            render_power_table(board, &snapshot.readings)
        ))
    }
}

fn load_config(args: &Args) -> Result<PanelConfig> {
    let mut loader = match &args.config {
        Some(path) => {
            if !path.exists() {
                bail!(ConfigError::FileNotFound(path.display().to_string()));
            }
            ConfigLoader::with_paths(vec![path.clone()])
        }
        None => ConfigLoader::new(),
    };

    let mut config = loader.load().context("failed to load configuration")?;

    if let Some(interval_ms) = args.interval_ms {
        config.telemetry.tick_interval_ms = interval_ms;
    }
    if args.seed.is_some() {
        config.telemetry.seed = args.seed;
    }
    if let Some(port) = &args.port {
        config.link.enabled = true;
        config.link.port_name = Some(port.clone());
    }

    config
        .validate()
        .map_err(ConfigError::ValidationError)
        .context("invalid command line overrides")?;

    Ok(config)
}

fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{} {}] {}", record.level(), record.target(), record.args()))
        .parse_default_env()
        .init();
}
