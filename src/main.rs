//! MoveDID Resolver - HTTP service
//!
//! Serves `GET /1.0/identifiers/{address}` and `POST /1.0/identifiers`
//! backed by an Aptos full node.

use move_did_resolver::{
    config::{LoggingConfig, ResolverConfig},
    context::AppContext,
    server, ResolverResult,
};
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ResolverResult<()> {
    // Load configuration, but install logging before reporting any failure
    let config = ResolverConfig::from_env();

    // Initialize logging
    let logging = match &config {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    };
    init_tracing(&logging);

    let config = config.map_err(|e| {
        error!(error = %e, "failed to load configuration");
        e
    })?;

    let ctx = AppContext::new(config).map_err(|e| {
        error!(error = %e, "failed to initialize resolver");
        e
    })?;

    server::serve(ctx).await.map_err(|e| {
        error!(error = %e, "server stopped");
        e
    })
}

fn init_tracing(logging: &LoggingConfig) {
    let registry = tracing_subscriber::registry().with(logging.env_filter());
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
