//! Device HAL - command-line access to the desktop backend.
//!
//! Prints one-off snapshots, streams periodic telemetry, and lists the
//! discovered thermal zones.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use device_hal::{
    telemetry_stream, BackendConfig, HardwareBackend, PcBackend, TelemetrySnapshot,
    DEFAULT_INTERVAL_MS,
};
use futures_util::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "device_hal")]
#[command(about = "Device HAL - platform telemetry through one interface")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Query memory, storage, thermal, network and SIM state of this machine")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Backend configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a single telemetry snapshot and exit (default)
    Snapshot(SnapshotArgs),

    /// Print a snapshot at a fixed interval
    Watch(WatchArgs),

    /// List discovered thermal zones
    Thermal,

    /// Show device identity
    Info,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Output format: json or pretty
    #[arg(short, long, default_value = "pretty")]
    format: String,
}

#[derive(Args)]
struct WatchArgs {
    /// Sampling interval in milliseconds
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    interval: u64,

    /// Stop after this many snapshots
    #[arg(short = 'n', long)]
    count: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let backend = build_backend(&cli)?;
    backend.initialize_hardware();

    match &cli.command {
        Some(Commands::Snapshot(args)) => snapshot_command(&backend, args)?,
        Some(Commands::Watch(args)) => watch_command(backend, args).await?,
        Some(Commands::Thermal) => thermal_command(&backend),
        Some(Commands::Info) => info_command(&backend),
        None => {
            let args = SnapshotArgs {
                format: "pretty".to_string(),
            };
            snapshot_command(&backend, &args)?;
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn build_backend(cli: &Cli) -> anyhow::Result<PcBackend> {
    let config = match &cli.config {
        Some(path) => {
            info!("Loading backend configuration from {}", path.display());
            BackendConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => BackendConfig::default(),
    };
    Ok(PcBackend::with_config(config)?)
}

fn snapshot_command(backend: &PcBackend, args: &SnapshotArgs) -> anyhow::Result<()> {
    let snapshot = TelemetrySnapshot::collect(backend);

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        "pretty" => print_pretty_snapshot(&snapshot),
        _ => {
            error!("Unsupported format: {}. Use 'json' or 'pretty'", args.format);
            std::process::exit(1);
        }
    }

    Ok(())
}

async fn watch_command(backend: PcBackend, args: &WatchArgs) -> anyhow::Result<()> {
    info!("Sampling every {}ms", args.interval);
    let stream = telemetry_stream(Arc::new(backend), Duration::from_millis(args.interval));
    let mut stream = match args.count {
        Some(count) => stream.take(count).boxed(),
        None => stream,
    };

    while let Some(snapshot) = stream.next().await {
        println!("{}", serde_json::to_string(&snapshot)?);
    }

    Ok(())
}

fn thermal_command(backend: &PcBackend) {
    let config = backend.get_thermal_config();
    println!("CPU zones:");
    for zone in &config.cpu {
        match zone.sample() {
            Some(celsius) => println!("  {}: {}°C", zone.label(), celsius),
            None => println!("  {}: unavailable", zone.label()),
        }
    }
    for (name, zones) in [
        ("GPU", &config.gpu),
        ("Memory", &config.memory),
        ("PMIC", &config.pmic),
    ] {
        match zones {
            Some(zones) => println!("{} zones: {}", name, zones.len()),
            None => println!("{} zones: not present", name),
        }
    }
}

fn info_command(backend: &PcBackend) {
    println!("Device type: {}", backend.get_device_type());
    println!(
        "OS version:  {}",
        backend.get_os_version().as_deref().unwrap_or("unknown")
    );
    println!("Serial:      {}", backend.get_serial());
    println!("IMEI (0):    {}", backend.get_imei(0));
    match backend.get_sim_lpa() {
        Ok(_) => println!("eSIM:        supported"),
        Err(err) if err.is_unsupported() => println!("eSIM:        not supported"),
        Err(err) => println!("eSIM:        error ({})", err),
    }
}

fn print_pretty_snapshot(snapshot: &TelemetrySnapshot) {
    println!(
        "System Snapshot ({})",
        chrono::DateTime::from_timestamp_millis(snapshot.timestamp as i64)
            .unwrap_or_default()
            .format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("==========================================");
    println!("  Device:      {}", snapshot.device_type);
    println!("  Memory used: {}%", snapshot.memory_usage_percent);
    println!("  Disk free:   {:.1}%", snapshot.free_space_percent);
    println!("  GPU busy:    {}%", snapshot.gpu_usage_percent);
    println!();

    println!("Temperature:");
    for reading in &snapshot.thermal.cpu {
        match reading.celsius {
            Some(celsius) => println!("  {}: {}°C", reading.label, celsius),
            None => println!("  {}: unavailable", reading.label),
        }
    }
    println!();

    println!("Network:");
    println!("  Type:     {}", snapshot.network_type);
    println!("  Strength: {}", snapshot.network_strength);
    println!(
        "  SIM:      {}",
        snapshot.sim.sim_state.first().map(String::as_str).unwrap_or("unknown")
    );
    println!();

    println!("Power:");
    println!("  Device: {} mW", snapshot.power_draw_mw);
    println!("  SoM:    {} mW", snapshot.som_power_draw_mw);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from(["device_hal", "watch", "--interval", "250", "-n", "3"])
            .unwrap();
        match cli.command {
            Some(Commands::Watch(args)) => {
                assert_eq!(args.interval, 250);
                assert_eq!(args.count, Some(3));
            }
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::try_parse_from(["device_hal"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
        assert!(!cli.verbose && !cli.debug);

        let cli = Cli::try_parse_from(["device_hal", "watch"]).unwrap();
        match cli.command {
            Some(Commands::Watch(args)) => assert_eq!(args.interval, DEFAULT_INTERVAL_MS),
            _ => panic!("expected watch command"),
        }
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["device_hal", "watch", "--interval", "0"]).is_err());
        assert!(Cli::try_parse_from(["device_hal", "watch", "--interval", "1"]).is_ok());
    }
}
