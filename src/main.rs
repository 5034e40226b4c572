use clap::Parser;
use cubesat_node::config::cli::Command;
use cubesat_node::core::{ModuleRecord, Transmitter};
use cubesat_node::utils::error::ErrorSeverity;
use cubesat_node::utils::logger;
use cubesat_node::{
    CliConfig, DeviceRegistry, FileConfigSource, FileTransmitter, LogFaultIndicator, NodeError,
    NodeInitializer, StdoutTransmitter, TelemetryEngine,
};
use std::time::Duration;

fn exit_code(error: &NodeError) -> i32 {
    match error.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting cubesat-node");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match cli.command {
        Command::Run {
            config,
            interval_ms,
            cycles,
            output,
        } => run(&config, interval_ms, cycles, output).await,
        Command::Check { config } => check(&config),
        Command::Decode { stream } => {
            let records = ModuleRecord::parse_many(stream.trim())?;
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
    }
}

fn initializer(path: &str) -> NodeInitializer<FileConfigSource, DeviceRegistry, LogFaultIndicator> {
    tracing::info!("📁 Loading configuration from: {}", path);
    NodeInitializer::new(
        FileConfigSource::new(path),
        DeviceRegistry::with_defaults(),
        LogFaultIndicator,
    )
}

async fn run(
    config_path: &str,
    interval_ms: Option<u64>,
    cycles: Option<u64>,
    output: Option<String>,
) -> anyhow::Result<()> {
    let (config, module) = match initializer(config_path).initialize_with_config() {
        Ok(built) => built,
        Err(e) => fail(e),
    };

    let interval_ms = interval_ms.unwrap_or_else(|| config.refresh_interval_ms()).max(1);
    let interval = Duration::from_millis(interval_ms);
    let output = output.or_else(|| config.output_path().map(str::to_string));

    let transmitter: Box<dyn Transmitter> = match output {
        Some(path) => {
            tracing::info!("📡 Writing streams to: {}", path);
            Box::new(FileTransmitter::new(path))
        }
        None => Box::new(StdoutTransmitter),
    };

    let engine = TelemetryEngine::new(module, transmitter);
    let completed = engine.run(interval, cycles).await?;
    tracing::info!("✅ {} refresh cycles completed", completed);
    Ok(())
}

fn check(config_path: &str) -> anyhow::Result<()> {
    let module = match initializer(config_path).initialize() {
        Ok(module) => module,
        Err(e) => fail(e),
    };

    println!(
        "✅ Module {} ({}) with {} devices, {} online",
        module.module_id(),
        if module.check_is_hub() { "hub" } else { "module" },
        module.devices().len(),
        module.online_devices()
    );
    for device in module.devices() {
        println!(
            "   - device {} [{}] {}",
            device.device_id(),
            device.device_type(),
            if device.status() { "online" } else { "offline" }
        );
    }
    Ok(())
}

/// The fault indicator has already been signalled by the initializer.
fn fail(error: NodeError) -> ! {
    eprintln!("❌ {}", error);
    eprintln!("💡 Suggestion: {}", error.recovery_suggestion());
    std::process::exit(exit_code(&error).max(1));
}
