/// Application context and dependency injection
use crate::{
    config::ResolverConfig,
    error::ResolverResult,
    identity::DidResolver,
    ledger::{LedgerClient, RestLedgerClient},
};
use std::sync::Arc;

/// Application context holding all shared services
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<ResolverConfig>,
    pub resolver: Arc<DidResolver>,
}

impl AppContext {
    /// Create a new application context backed by the configured full node
    pub fn new(config: ResolverConfig) -> ResolverResult<Self> {
        config.validate()?;

        let ledger: Arc<dyn LedgerClient> = Arc::new(RestLedgerClient::new(&config.ledger)?);
        Self::with_ledger(config, ledger)
    }

    /// Create a context over any ledger client
    pub fn with_ledger(config: ResolverConfig, ledger: Arc<dyn LedgerClient>) -> ResolverResult<Self> {
        let resolver = DidResolver::new(ledger, &config.identity)?;

        Ok(Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
        })
    }

    /// Listen address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.config.service.hostname, self.config.service.port)
    }
}
