/// In-memory ledger
///
/// Serves resources and table items from maps seeded up front. Used as a
/// fixture in tests and for embedding the resolver without a full node.
use crate::{
    error::{ResolverError, ResolverResult},
    ledger::{AccountAddress, LedgerClient, TableItemRequest},
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
struct TableEntry {
    value_type: String,
    value: Value,
}

/// Ledger snapshot held in memory
#[derive(Debug, Default)]
pub struct MemoryLedger {
    resources: HashMap<(AccountAddress, String), Value>,
    tables: HashMap<(String, String), TableEntry>,
    requests: AtomicUsize,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` as the resource `resource_type` under `address`
    pub fn insert_resource(&mut self, address: AccountAddress, resource_type: &str, data: Value) {
        self.resources
            .insert((address, resource_type.to_string()), data);
    }

    /// Store a string-keyed table item
    pub fn insert_table_item(&mut self, handle: &str, key: &str, value_type: &str, value: Value) {
        self.tables.insert(
            (handle.to_string(), key.to_string()),
            TableEntry {
                value_type: value_type.to_string(),
                value,
            },
        );
    }

    pub fn with_resource(mut self, address: AccountAddress, resource_type: &str, data: Value) -> Self {
        self.insert_resource(address, resource_type, data);
        self
    }

    pub fn with_table_item(mut self, handle: &str, key: &str, value_type: &str, value: Value) -> Self {
        self.insert_table_item(handle, key, value_type, value);
        self
    }

    /// Number of reads served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn get_account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> ResolverResult<Option<Value>> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .resources
            .get(&(*address, resource_type.to_string()))
            .cloned())
    }

    async fn get_table_item(
        &self,
        handle: &str,
        request: &TableItemRequest,
    ) -> ResolverResult<Option<Value>> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        let key = match &request.key {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        match self.tables.get(&(handle.to_string(), key)) {
            // The full node fails to decode a value read back as the wrong type
            Some(entry) if entry.value_type != request.value_type => {
                Err(ResolverError::serialization(format!(
                    "table {} holds {}, requested {}",
                    handle, entry.value_type, request.value_type
                )))
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }
}
