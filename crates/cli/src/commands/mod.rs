mod benchmark;
mod config;
mod select;
mod utils;

pub use benchmark::run_benchmark;
pub use config::{handle_config_command, ConfigCommands};
pub use select::run_select;
pub use utils::{print_error, CliError, CliResult};

use waypoint_core::{
    config::{ChainConfig, Settings},
    rpc::JsonRpcProbe,
};

/// Loads settings, validates them, and looks up one chain entry.
pub(crate) fn resolve_chain(config_file: Option<&str>, chain: &str) -> CliResult<ChainConfig> {
    let settings = match config_file {
        Some(path) => Settings::from_file(path)?,
        None => Settings::load()?,
    };
    settings.validate().map_err(CliError::Config)?;

    let chain_config = settings
        .chain(chain)
        .cloned()
        .ok_or_else(|| CliError::Config(format!("Unknown chain: {chain}")))?;

    tracing::debug!(
        chain = %chain_config.name,
        endpoints = chain_config.rpc_urls.len(),
        algorithm = %chain_config.algorithm,
        "resolved chain configuration"
    );

    Ok(chain_config)
}

/// Builds the probe for a chain, honoring a custom height method.
pub(crate) fn probe_for(chain: &ChainConfig) -> CliResult<JsonRpcProbe> {
    match &chain.height_method {
        Some(method) => Ok(JsonRpcProbe::with_height_method(method.clone())?),
        None => Ok(JsonRpcProbe::new()?),
    }
}
