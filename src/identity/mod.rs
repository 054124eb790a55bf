/// Identity Resolution System
///
/// Reads a MoveDID account's aggregators from the ledger and assembles
/// the DID document:
/// 1. address aggregator (keys, account type, table handle)
/// 2. verification method and service lookups, issued concurrently
/// 3. document assembly

pub mod aggregator;
pub mod document;
pub mod resolver;
pub mod service;
pub mod verification;

pub use aggregator::{AddrAggregator, AddrAggregatorReader};
pub use document::{
    assemble, AccountType, DidDocument, KeyProperties, ServiceEntry, Verification,
    VerificationKeyType, VerificationMethod,
};
pub use resolver::DidResolver;
pub use service::{Service, ServiceAggregator, ServiceAggregatorReader};
pub use verification::{AddrInfo, VerificationMethodResolver};

use serde::{Deserialize, Deserializer};

/// Handle of an on-chain `Table`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableRef {
    pub handle: String,
}

/// Move u64 values come back from the REST API as strings, older indexers
/// and fixtures sometimes emit bare numbers
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
