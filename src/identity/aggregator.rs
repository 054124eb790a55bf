/// Address aggregator reader
use crate::{
    error::{ResolverError, ResolverResult},
    identity::{string_or_number, TableRef},
    ledger::{AccountAddress, LedgerClient, MoveTypes},
};
use serde::Deserialize;
use tracing::debug;

/// `addr_aggregator::AddrAggregator` resource
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddrAggregator {
    /// Account holding the service aggregator
    pub key_addr: AccountAddress,
    #[serde(rename = "type", deserialize_with = "string_or_number")]
    pub type_code: String,
    pub description: String,
    /// Registered key identifiers, in registration order
    pub addrs: Vec<String>,
    /// `key identifier -> AddrInfo`
    pub addr_infos_map: TableRef,
}

pub struct AddrAggregatorReader<'a> {
    ledger: &'a dyn LedgerClient,
    types: &'a MoveTypes,
}

impl<'a> AddrAggregatorReader<'a> {
    pub fn new(ledger: &'a dyn LedgerClient, types: &'a MoveTypes) -> Self {
        Self { ledger, types }
    }

    /// Fetch and parse the aggregator stored under `address`
    pub async fn read(&self, address: &AccountAddress) -> ResolverResult<AddrAggregator> {
        let resource_type = self.types.addr_aggregator();

        let data = self
            .ledger
            .get_account_resource(address, &resource_type)
            .await?
            .ok_or_else(|| {
                ResolverError::NotFound(format!("no address aggregator at {}", address))
            })?;

        let aggregator: AddrAggregator = serde_json::from_value(data).map_err(|e| {
            ResolverError::serialization(format!("Invalid address aggregator at {}: {}", address, e))
        })?;

        debug!(
            %address,
            key_addr = %aggregator.key_addr,
            keys = aggregator.addrs.len(),
            "address aggregator fetched"
        );

        Ok(aggregator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use serde_json::json;

    fn types() -> MoveTypes {
        MoveTypes::new(&AccountAddress::parse("0xd1d").unwrap())
    }

    #[tokio::test]
    async fn test_read_aggregator() {
        let types = types();
        let account = AccountAddress::parse("0xa11ce").unwrap();
        let ledger = MemoryLedger::new().with_resource(
            account,
            &types.addr_aggregator(),
            json!({
                "key_addr": "0xa11ce",
                "type": "1",
                "description": "d",
                "addrs": ["alice", "bob"],
                "addr_infos_map": {"handle": "0xh1"},
                "max_id": "2"
            }),
        );

        let aggregator = AddrAggregatorReader::new(&ledger, &types)
            .read(&account)
            .await
            .unwrap();

        assert_eq!(aggregator.key_addr, account);
        assert_eq!(aggregator.type_code, "1");
        assert_eq!(aggregator.addrs, vec!["alice", "bob"]);
        assert_eq!(aggregator.addr_infos_map.handle, "0xh1");
    }

    #[tokio::test]
    async fn test_missing_aggregator_is_not_found() {
        let types = types();
        let ledger = MemoryLedger::new();
        let account = AccountAddress::parse("0xb0b").unwrap();

        let err = AddrAggregatorReader::new(&ledger, &types)
            .read(&account)
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_malformed_aggregator_is_serialization_error() {
        let types = types();
        let account = AccountAddress::parse("0xa").unwrap();
        let ledger = MemoryLedger::new().with_resource(
            account,
            &types.addr_aggregator(),
            json!({"key_addr": "0xa", "type": "0"}),
        );

        let err = AddrAggregatorReader::new(&ledger, &types)
            .read(&account)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ResolverError::Transport {
                kind: crate::error::TransportKind::Serialization,
                ..
            }
        ));
    }
}
