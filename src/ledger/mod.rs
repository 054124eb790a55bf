/// Ledger access layer
///
/// The resolver only needs two reads from an Aptos full node: an account
/// resource by type, and a table item by handle and key. Backends implement
/// [`LedgerClient`]; absence is reported as `Ok(None)` so callers decide
/// which missing entry is an error.

pub mod memory;
pub mod rest;

pub use memory::MemoryLedger;
pub use rest::RestLedgerClient;

use crate::error::{ResolverError, ResolverResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Move type of table keys used by the MoveDID modules
pub const STRING_TYPE: &str = "0x1::string::String";

/// Ledger client trait
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Fetch the `data` of a resource stored under an account
    async fn get_account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> ResolverResult<Option<Value>>;

    /// Fetch a single value from a table
    async fn get_table_item(
        &self,
        handle: &str,
        request: &TableItemRequest,
    ) -> ResolverResult<Option<Value>>;
}

/// Body of a table item lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItemRequest {
    pub key_type: String,
    pub value_type: String,
    pub key: Value,
}

impl TableItemRequest {
    /// Lookup keyed by a Move `String`
    pub fn string_key(value_type: impl Into<String>, key: &str) -> Self {
        Self {
            key_type: STRING_TYPE.to_string(),
            value_type: value_type.into(),
            key: Value::String(key.to_string()),
        }
    }
}

/// 32-byte Aptos account address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; 32]);

impl AccountAddress {
    /// Parse a hex address, with or without `0x`, short or long form
    pub fn parse(input: &str) -> ResolverResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ResolverError::Input("address is empty".to_string()));
        }

        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 64 {
            return Err(ResolverError::Input(format!(
                "address must have 1 to 64 hex digits: {}",
                trimmed
            )));
        }

        let padded = format!("{:0>64}", digits);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|e| {
            ResolverError::Input(format!("address is not hex ({}): {}", e, trimmed))
        })?;

        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl std::str::FromStr for AccountAddress {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Fully qualified Move type names of the MoveDID modules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTypes {
    module_address: String,
}

impl MoveTypes {
    pub fn new(module_address: &AccountAddress) -> Self {
        Self {
            module_address: module_address.to_string(),
        }
    }

    pub fn addr_aggregator(&self) -> String {
        format!("{}::addr_aggregator::AddrAggregator", self.module_address)
    }

    pub fn addr_info(&self) -> String {
        format!("{}::addr_info::AddrInfo", self.module_address)
    }

    pub fn service_aggregator(&self) -> String {
        format!(
            "{}::service_aggregator::ServiceAggregator",
            self.module_address
        )
    }

    pub fn service(&self) -> String {
        format!("{}::service_aggregator::Service", self.module_address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_to_long_form() {
        let short = AccountAddress::parse("0x1").unwrap();
        assert_eq!(
            short.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );

        let upper = AccountAddress::parse("  0XABCDEF ").unwrap();
        let lower = AccountAddress::parse("abcdef").unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let too_long = format!("0x{}", "1".repeat(65));
        for bad in ["", "   ", "0x", "0xzz", "hello", too_long.as_str()] {
            assert!(
                matches!(AccountAddress::parse(bad), Err(ResolverError::Input(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_move_types() {
        let module = AccountAddress::parse(crate::config::DEFAULT_MODULE_ADDRESS).unwrap();
        let types = MoveTypes::new(&module);
        assert_eq!(
            types.addr_info(),
            "0x65f4a0954aa6e68d2381ff98b7676df2fe57beee3ca37a4a8a57fa621c1db872::addr_info::AddrInfo"
        );
        assert!(types.service().ends_with("::service_aggregator::Service"));
    }

    #[test]
    fn test_string_key_request_shape() {
        let req = TableItemRequest::string_key("0x1::m::V", "alice");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "key_type": "0x1::string::String",
                "value_type": "0x1::m::V",
                "key": "alice"
            })
        );
    }
}
