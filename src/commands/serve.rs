//! Serve command - run the portal API

use rollcall::adapters::PhpBackend;
use rollcall::api::Portal;
use rollcall::config::RollcallConfig;
use rollcall::core::ports::SystemClock;
use rollcall::server::tiny_http;

/// Serve the portal API until interrupted
pub fn serve(config: &RollcallConfig, port: Option<u16>) -> anyhow::Result<()> {
    let backend = PhpBackend::new(&config.backend)?;
    let clock = SystemClock;
    let portal = Portal::new(&backend, &clock, config.site.geofence()?, config.token.policy()?);
    let port = port.unwrap_or(config.portal.port);

    println!("Serving rollcall portal API on http://localhost:{port}/api/v1");
    println!("Backend: {}", config.backend.base_url);
    println!();
    println!("Press Ctrl+C to stop");

    tiny_http::serve(port, &portal)
}
