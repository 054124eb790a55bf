/// Aptos full node REST client
use crate::{
    config::LedgerConfig,
    error::{ResolverError, ResolverResult},
    ledger::{AccountAddress, LedgerClient, TableItemRequest},
    metrics,
};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Envelope returned by `/v1/accounts/{address}/resource/{type}`
#[derive(Debug, Deserialize)]
struct MoveResource {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    resource_type: String,
    data: Value,
}

/// Ledger client backed by the full node REST API
#[derive(Clone)]
pub struct RestLedgerClient {
    http_client: Client,
    node_url: String,
}

impl RestLedgerClient {
    /// Create a client from ledger configuration
    pub fn new(config: &LedgerConfig) -> ResolverResult<Self> {
        let http_client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ResolverError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(&config.node_url, http_client))
    }

    /// Use a preconfigured HTTP client
    pub fn with_client(node_url: &str, http_client: Client) -> Self {
        Self {
            http_client,
            node_url: node_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn node_url(&self) -> &str {
        &self.node_url
    }

    /// Turn a full node response into `Some(json)`, `None` on 404, or an error
    async fn read_json(&self, operation: &str, response: Response) -> ResolverResult<Option<Value>> {
        let status = response.status();
        metrics::record_ledger_request(operation, status.as_str());

        if status == StatusCode::NOT_FOUND {
            debug!(operation, "full node returned 404");
            return Ok(None);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResolverError::network(format!(
                "{} returned {}: {}",
                operation, status, body
            )));
        }

        let value = response.json::<Value>().await.map_err(transport_error)?;
        Ok(Some(value))
    }
}

#[async_trait]
impl LedgerClient for RestLedgerClient {
    async fn get_account_resource(
        &self,
        address: &AccountAddress,
        resource_type: &str,
    ) -> ResolverResult<Option<Value>> {
        let url = format!(
            "{}/v1/accounts/{}/resource/{}",
            self.node_url, address, resource_type
        );
        debug!(%address, resource_type, "fetching account resource");

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            metrics::record_ledger_request("get_account_resource", "error");
            transport_error(e)
        })?;

        match self.read_json("get_account_resource", response).await? {
            Some(raw) => {
                let resource: MoveResource = serde_json::from_value(raw).map_err(|e| {
                    ResolverError::serialization(format!(
                        "Invalid resource {} at {}: {}",
                        resource_type, address, e
                    ))
                })?;
                Ok(Some(resource.data))
            }
            None => Ok(None),
        }
    }

    async fn get_table_item(
        &self,
        handle: &str,
        request: &TableItemRequest,
    ) -> ResolverResult<Option<Value>> {
        let url = format!("{}/v1/tables/{}/item", self.node_url, handle);
        debug!(handle, key = %request.key, "fetching table item");

        let response = self
            .http_client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                metrics::record_ledger_request("get_table_item", "error");
                transport_error(e)
            })?;

        self.read_json("get_table_item", response).await
    }
}

fn transport_error(e: reqwest::Error) -> ResolverError {
    if e.is_timeout() {
        ResolverError::cancelled(format!("Full node request timed out: {}", e))
    } else if e.is_decode() {
        ResolverError::serialization(format!("Invalid full node response: {}", e))
    } else {
        ResolverError::network(format!("Full node request failed: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_url_trailing_slash_trimmed() {
        let client = RestLedgerClient::with_client("http://localhost:8080/", Client::new());
        assert_eq!(client.node_url(), "http://localhost:8080");
    }

    #[tokio::test]
    async fn test_unreachable_node_is_network_error() {
        // Port 9 (discard) on loopback is closed in test environments
        let client = RestLedgerClient::with_client("http://127.0.0.1:9", Client::new());
        let address = AccountAddress::parse("0x1").unwrap();

        let err = client
            .get_account_resource(&address, "0x1::account::Account")
            .await
            .unwrap_err();

        assert!(matches!(err, ResolverError::Transport { .. }));
    }
}
