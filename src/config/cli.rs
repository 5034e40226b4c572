use crate::config::DEFAULT_CONFIG_FILE;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cubesat-node")]
#[command(about = "Collects sensor readings and emits the module telemetry stream")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build the node from its configuration and run refresh cycles
    Run {
        /// Path to the JSON or TOML configuration document
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,

        /// Override the refresh interval from the configuration (milliseconds)
        #[arg(long)]
        interval_ms: Option<u64>,

        /// Stop after this many cycles; runs until Ctrl-C when omitted
        #[arg(long)]
        cycles: Option<u64>,

        /// Append streams to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Load, validate and build the node without reading any sensor
    Check {
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: String,
    },

    /// Decode one or more module streams and print them as JSON
    Decode {
        stream: String,
    },
}
