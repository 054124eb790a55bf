/// Service aggregator reader
use crate::{
    error::{ResolverError, ResolverResult},
    identity::{document::entry_id, ServiceEntry, TableRef},
    ledger::{AccountAddress, LedgerClient, MoveTypes, TableItemRequest},
};
use futures::{
    stream::{self, BoxStream},
    StreamExt,
};
use serde::Deserialize;
use tracing::debug;

/// `service_aggregator::ServiceAggregator` resource
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceAggregator {
    /// Service names, in registration order
    pub names: Vec<String>,
    pub services_map: TableRef,
}

/// `service_aggregator::Service` table value
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub description: String,
    pub verification_url: String,
    pub url: String,
}

pub struct ServiceAggregatorReader<'a> {
    ledger: &'a dyn LedgerClient,
    types: &'a MoveTypes,
    did_syntax: &'a str,
}

impl<'a> ServiceAggregatorReader<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, types: &'a MoveTypes, did_syntax: &'a str) -> Self {
        Self {
            ledger,
            types,
            did_syntax,
        }
    }

    /// Fetch the aggregator stored under the account's key address
    pub async fn read(&self, key_addr: &AccountAddress) -> ResolverResult<ServiceAggregator> {
        let resource_type = self.types.service_aggregator();

        let data = self
            .ledger
            .get_account_resource(key_addr, &resource_type)
            .await?
            .ok_or_else(|| {
                ResolverError::NotFound(format!("no service aggregator at {}", key_addr))
            })?;

        let aggregator: ServiceAggregator = serde_json::from_value(data).map_err(|e| {
            ResolverError::serialization(format!(
                "Invalid service aggregator at {}: {}",
                key_addr, e
            ))
        })?;

        debug!(%key_addr, services = aggregator.names.len(), "service aggregator fetched");

        Ok(aggregator)
    }

    /// Resolve one named service from the aggregator's table
    pub async fn resolve(&self, handle: &str, name: &str) -> ResolverResult<ServiceEntry> {
        let request = TableItemRequest::string_key(self.types.service(), name);

        let value = self
            .ledger
            .get_table_item(handle, &request)
            .await?
            .ok_or_else(|| {
                ResolverError::NotFound(format!("no service {:?} in table {}", name, handle))
            })?;

        let service: Service = serde_json::from_value(value).map_err(|e| {
            ResolverError::serialization(format!("Invalid service {:?}: {}", name, e))
        })?;

        Ok(ServiceEntry {
            id: entry_id(self.did_syntax, name),
            description: service.description,
            verification_url: service.verification_url,
            url: service.url,
        })
    }

    /// Lazily resolve every registered service in order. Restartable.
    pub fn resolve_all<'s>(
        &'s self,
        aggregator: &'s ServiceAggregator,
    ) -> BoxStream<'s, ResolverResult<ServiceEntry>> {
        let handle = aggregator.services_map.handle.as_str();
        stream::iter(&aggregator.names)
            .then(move |name| self.resolve(handle, name))
            .boxed()
    }

    /// Service for the document: the first registered name only
    pub async fn resolve_first(&self, key_addr: &AccountAddress) -> ResolverResult<ServiceEntry> {
        let aggregator = self.read(key_addr).await?;

        let first = self.resolve_all(&aggregator).next().await;
        match first {
            Some(service) => service,
            None => Err(ResolverError::NotFound(format!(
                "no registered service at {}",
                key_addr
            ))),
        }
    }
}
