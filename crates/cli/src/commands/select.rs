use waypoint_core::selection::select_best;

use super::{
    probe_for, resolve_chain,
    utils::{print_info, print_success, CliResult},
};

/// Runs one-shot endpoint selection for a chain and prints the winner.
///
/// `algorithm` overrides the chain's configured algorithm when given.
pub async fn run_select(
    config_file: Option<&str>,
    chain: &str,
    algorithm: Option<&str>,
) -> CliResult<()> {
    let chain_config = resolve_chain(config_file, chain)?;
    let probe = probe_for(&chain_config)?;

    let algorithm = algorithm.unwrap_or(&chain_config.algorithm);
    print_info(&format!(
        "Selecting from {} endpoints for chain '{}' using '{algorithm}'...",
        chain_config.rpc_urls.len(),
        chain_config.name
    ));

    let url = select_best(&probe, &chain_config.rpc_urls, algorithm).await?;

    print_success(&format!("Selected endpoint: {url}"));
    Ok(())
}
