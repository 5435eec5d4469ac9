use waypoint_core::selection::{benchmark_endpoints, results_to_endpoints};

use super::{
    probe_for, resolve_chain,
    utils::{print_info, CliResult},
};

/// Probes every configured endpoint for a chain and prints the results.
pub async fn run_benchmark(config_file: Option<&str>, chain: &str) -> CliResult<()> {
    let chain_config = resolve_chain(config_file, chain)?;
    let probe = probe_for(&chain_config)?;

    print_info(&format!(
        "Benchmarking {} endpoints for chain '{}'...",
        chain_config.rpc_urls.len(),
        chain_config.name
    ));

    let results = benchmark_endpoints(&probe, &chain_config.rpc_urls).await;
    let endpoints = results_to_endpoints(results);

    println!("{:<56} {:>10} {:>12} {:>10}", "URL", "LATENCY", "HEIGHT", "STATUS");
    for endpoint in &endpoints {
        let latency = if endpoint.healthy {
            format!("{}ms", endpoint.latency.as_millis())
        } else {
            "-".to_string()
        };
        let height = if endpoint.healthy {
            endpoint.block_height.to_string()
        } else {
            "-".to_string()
        };
        let status = if endpoint.healthy { "healthy" } else { "unhealthy" };

        println!("{:<56} {:>10} {:>12} {:>10}", endpoint.url, latency, height, status);
    }

    let healthy = endpoints.iter().filter(|e| e.healthy).count();
    println!("\n{healthy}/{} endpoints healthy", endpoints.len());

    Ok(())
}
