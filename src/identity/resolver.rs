/// DID Resolver - Orchestrates the ledger reads and document assembly
use crate::{
    config::IdentityConfig,
    error::{ResolverError, ResolverResult},
    identity::{
        assemble, AddrAggregatorReader, DidDocument, ServiceAggregatorReader,
        VerificationMethodResolver,
    },
    ledger::{AccountAddress, LedgerClient, MoveTypes},
    metrics,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Resolves MoveDID accounts into DID documents
///
/// Every call reads a fresh snapshot from the ledger. Nothing is cached.
#[derive(Clone)]
pub struct DidResolver {
    ledger: Arc<dyn LedgerClient>,
    types: MoveTypes,
    did_syntax: String,
    deadline: Duration,
}

impl DidResolver {
    /// Create a new resolver over a ledger client
    pub fn new(ledger: Arc<dyn LedgerClient>, config: &IdentityConfig) -> ResolverResult<Self> {
        let module_address = AccountAddress::parse(&config.module_address)
            .map_err(|e| ResolverError::Config(format!("Invalid module address: {}", e)))?;

        Ok(Self {
            ledger,
            types: MoveTypes::new(&module_address),
            did_syntax: config.did_syntax.clone(),
            deadline: config.resolve_timeout(),
        })
    }

    pub fn did_syntax(&self) -> &str {
        &self.did_syntax
    }

    /// Resolve the DID document for an account address
    ///
    /// Fails with `Input` for a malformed address (no ledger access),
    /// `NotFound` when the account has no aggregator, key or service, and
    /// `Transport` on ledger failures or when the configured deadline expires.
    pub async fn resolve(&self, address: &str) -> ResolverResult<DidDocument> {
        self.resolve_with_deadline(address, self.deadline).await
    }

    /// Resolve with an explicit deadline for the whole pipeline
    pub async fn resolve_with_deadline(
        &self,
        address: &str,
        deadline: Duration,
    ) -> ResolverResult<DidDocument> {
        let start = Instant::now();

        let result = match AccountAddress::parse(address) {
            Ok(address) => match tokio::time::timeout(deadline, self.resolve_address(&address)).await {
                Ok(result) => result,
                Err(_) => Err(ResolverError::cancelled(format!(
                    "resolution of {} exceeded {:?}",
                    address, deadline
                ))),
            },
            Err(e) => Err(e),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(doc) => {
                info!(
                    address,
                    methods = doc.verification_methods.len(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "DID resolved"
                );
                metrics::record_resolution("ok", elapsed.as_secs_f64());
            }
            Err(e) => {
                warn!(address, error = %e, elapsed_ms = elapsed.as_millis() as u64, "DID resolution failed");
                metrics::record_resolution(e.code(), elapsed.as_secs_f64());
            }
        }

        result
    }

    /// Run the pipeline for an already validated address
    ///
    /// 1. Read the address aggregator
    /// 2. Resolve the first key and the first service concurrently
    /// 3. Assemble
    pub async fn resolve_address(&self, address: &AccountAddress) -> ResolverResult<DidDocument> {
        let ledger = self.ledger.as_ref();

        let aggregator = AddrAggregatorReader::new(ledger, &self.types)
            .read(address)
            .await?;

        let methods = VerificationMethodResolver::new(
            ledger,
            &self.types,
            &aggregator.addr_infos_map.handle,
            &self.did_syntax,
        );
        let services = ServiceAggregatorReader::new(ledger, &self.types, &self.did_syntax);

        let (verification_methods, service) = tokio::try_join!(
            methods.resolve_first(&aggregator.addrs),
            services.resolve_first(&aggregator.key_addr),
        )?;

        debug!(%address, "branches resolved, assembling document");

        Ok(assemble(
            &self.did_syntax,
            &aggregator,
            verification_methods,
            service,
        ))
    }
}
