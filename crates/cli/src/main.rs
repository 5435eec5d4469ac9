use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
use commands::{
    handle_config_command, print_error, run_benchmark, run_select, ConfigCommands,
};

#[derive(Parser)]
#[command(name = "waypoint")]
#[command(about = "Waypoint CLI - Endpoint benchmarking and selection for multi-chain wallets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file (overrides WAYPOINT_CONFIG)
    #[arg(long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe every configured endpoint for a chain and report latency,
    /// height, and health
    Benchmark {
        /// Chain name from the configuration
        #[arg(short, long)]
        chain: String,
    },

    /// Benchmark a chain's endpoints and print the selected winner
    Select {
        /// Chain name from the configuration
        #[arg(short, long)]
        chain: String,

        /// Selection algorithm (fastest, round-robin, failover); defaults
        /// to the chain's configured algorithm
        #[arg(short, long)]
        algorithm: Option<String>,
    },

    /// Configuration Management
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,waypoint_core=info,waypoint=info"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    let config_file = cli.config.as_deref();

    let outcome = match cli.command {
        Commands::Benchmark { chain } => run_benchmark(config_file, &chain).await,
        Commands::Select { chain, algorithm } => {
            run_select(config_file, &chain, algorithm.as_deref()).await
        }
        Commands::Config(config_command) => handle_config_command(config_command),
    };

    if let Err(error) = outcome {
        print_error(&error.to_string());
        std::process::exit(1);
    }
}
