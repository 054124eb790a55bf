/// Verification method resolution
use crate::{
    error::{ResolverError, ResolverResult},
    identity::{
        document::entry_id, string_or_number, KeyProperties, Verification, VerificationKeyType,
        VerificationMethod,
    },
    ledger::{LedgerClient, MoveTypes, TableItemRequest},
};
use futures::{
    stream::{self, BoxStream},
    StreamExt,
};
use serde::Deserialize;
use tracing::debug;

/// Signature value recorded for keys that were registered without proof
pub const UNSIGNED_SIGNATURE: &str = "0x";

/// `addr_info::AddrInfo` table value
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddrInfo {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub description: String,
    pub chains: Vec<String>,
    #[serde(deserialize_with = "string_or_number")]
    pub addr_type: String,
    pub addr: String,
    pub pubkey: String,
    pub signature: String,
    pub msg: String,
    #[serde(deserialize_with = "string_or_number")]
    pub created_at: String,
    #[serde(deserialize_with = "string_or_number")]
    pub expired_at: String,
}

impl AddrInfo {
    pub fn is_signed(&self) -> bool {
        self.signature != UNSIGNED_SIGNATURE
    }

    /// Map the on-chain record to the method registered under `key`
    pub fn into_verification_method(self, did_syntax: &str, key: &str) -> VerificationMethod {
        let verificated = self.is_signed();
        VerificationMethod {
            id: entry_id(did_syntax, key),
            internal_id: self.id,
            properties: KeyProperties {
                description: self.description,
                chains: self.chains,
            },
            key_type: VerificationKeyType::from_code(&self.addr_type),
            addr: self.addr,
            pubkey: self.pubkey,
            verificated,
            verification: Verification {
                msg: self.msg,
                signature: self.signature,
            },
            created_at: self.created_at,
            expired_at: self.expired_at,
        }
    }
}

/// Looks up `AddrInfo` records in one aggregator's table
pub struct VerificationMethodResolver<'a> {
    ledger: &'a dyn LedgerClient,
    value_type: String,
    handle: &'a str,
    did_syntax: &'a str,
}

impl<'a> VerificationMethodResolver<'a> {
    pub fn new(
        ledger: &'a dyn LedgerClient,
        types: &MoveTypes,
        handle: &'a str,
        did_syntax: &'a str,
    ) -> Self {
        Self {
            ledger,
            value_type: types.addr_info(),
            handle,
            did_syntax,
        }
    }

    /// Resolve the method registered under a single key
    pub async fn resolve(&self, key: &str) -> ResolverResult<VerificationMethod> {
        let request = TableItemRequest::string_key(self.value_type.as_str(), key);

        let value = self
            .ledger
            .get_table_item(self.handle, &request)
            .await?
            .ok_or_else(|| {
                ResolverError::NotFound(format!(
                    "no key record for {:?} in table {}",
                    key, self.handle
                ))
            })?;

        let info: AddrInfo = serde_json::from_value(value).map_err(|e| {
            ResolverError::serialization(format!("Invalid key record for {:?}: {}", key, e))
        })?;

        debug!(handle = self.handle, key, addr_type = %info.addr_type, "key record fetched");

        Ok(info.into_verification_method(self.did_syntax, key))
    }

    /// Lazily resolve every key in order, one table lookup per item pulled.
    /// Calling this again restarts from the first key.
    pub fn resolve_all<'s>(
        &'s self,
        keys: &'s [String],
    ) -> BoxStream<'s, ResolverResult<VerificationMethod>> {
        stream::iter(keys).then(move |key| self.resolve(key)).boxed()
    }

    /// Methods for the document: only the first registered key is resolved
    pub async fn resolve_first(&self, keys: &[String]) -> ResolverResult<Vec<VerificationMethod>> {
        let first = self.resolve_all(keys).next().await;
        match first {
            Some(method) => Ok(vec![method?]),
            None => Err(ResolverError::NotFound(format!(
                "no registered key in table {}",
                self.handle
            ))),
        }
    }
}
