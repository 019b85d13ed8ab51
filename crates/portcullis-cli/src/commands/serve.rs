//! Serve command - runs the Portcullis web server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use portcullis::{Argon2Verifier, PrincipalStore, RouteCatalog};
use portcullis_config::PortcullisConfig;
use portcullis_server::{AppState, run as serve, shutdown_signal};
use tracing::info;

use crate::style::{print_labeled, print_spacer, print_success};

pub fn run(mut config: PortcullisConfig, address: Option<&str>) -> Result<()> {
    if let Some(address) = address {
        config.server.bind_address = parse_address(address)?.to_string();
    }
    config.validate()?;
    let bind_addr = config.bind_address()?;

    let store = PrincipalStore::seeded(Arc::new(Argon2Verifier::new()))
        .context("Failed to build principal directory")?;
    let catalog = RouteCatalog::standard();

    print_spacer();
    println!("Portcullis - access-controlled web routes");
    print_spacer();
    print_labeled("Bind address", &bind_addr.to_string());
    print_labeled("Principals", &store.len().to_string());
    print_labeled("Protected routes", &catalog.len().to_string());
    print_labeled("Session TTL", &format!("{}s", config.session.ttl_secs));
    print_spacer();
    println!("Server is ready. Press Ctrl+C to stop.");

    let state = AppState::new(store, catalog, &config.session);

    info!(address = %bind_addr, "Starting Portcullis server");
    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime
        .block_on(serve(state, bind_addr, shutdown_signal()))
        .context("Server error during operation")?;

    print_spacer();
    print_success("Server stopped gracefully.");
    Ok(())
}

fn parse_address(address: &str) -> Result<SocketAddr> {
    // Try parsing as a full address first
    if let Ok(addr) = address.parse::<SocketAddr>() {
        return Ok(addr);
    }

    // Try parsing as just a port
    if let Ok(port) = address.parse::<u16>() {
        return Ok(SocketAddr::from(([127, 0, 0, 1], port)));
    }

    bail!(
        "Invalid address '{address}'. Use a port (e.g., '3000') or full address (e.g., '127.0.0.1:3000')"
    );
}
