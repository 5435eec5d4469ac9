use clap::Subcommand;
use std::path::Path;
use waypoint_core::config::Settings;

use super::utils::{print_error, print_info, print_success, CliError, CliResult};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Validate the current configuration
    Validate {
        /// Path to config file (defaults to config/waypoint.toml)
        #[arg(short, long, default_value = "config/waypoint.toml")]
        file: String,
    },

    /// Show current configuration
    Show {
        /// Path to config file (defaults to config/waypoint.toml)
        #[arg(short, long, default_value = "config/waypoint.toml")]
        file: String,
    },
}

pub fn handle_config_command(command: ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Validate { file } => validate_config(&file),
        ConfigCommands::Show { file } => show_config(&file),
    }
}

fn validate_config(file: &str) -> CliResult<()> {
    if !Path::new(file).exists() {
        print_error(&format!("Configuration file not found: {file}"));
        return Err(CliError::Config(format!("File not found: {file}")));
    }

    print_info(&format!("Loading configuration from {file}..."));
    let settings = Settings::from_file(file)?;

    print_info("Validating configuration...");
    settings.validate().map_err(CliError::Config)?;

    print_success("Configuration is valid!");

    println!("Configuration Summary:");
    println!("  Chains: {}", settings.chains.len());
    for chain in &settings.chains {
        println!(
            "    {} ({} endpoints, algorithm: {})",
            chain.name,
            chain.rpc_urls.len(),
            chain.algorithm
        );
    }
    println!("  Log level: {}", settings.logging.level);

    Ok(())
}

fn show_config(file: &str) -> CliResult<()> {
    let settings = Settings::from_file(file)?;

    println!("Configuration from {file}:");

    for chain in &settings.chains {
        println!("\n[Chain: {}]", chain.name);
        println!("  Algorithm: {}", chain.algorithm);
        if let Some(method) = &chain.height_method {
            println!("  Height method: {method}");
        }
        println!("  Endpoints:");
        for url in &chain.rpc_urls {
            println!("    {url}");
        }
    }

    println!("\n[Logging]");
    println!("  Level: {}", settings.logging.level);

    Ok(())
}
