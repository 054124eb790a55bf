//! Shared fixtures for integration tests
#![allow(dead_code)]

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use move_did_resolver::{
    config::{ResolverConfig, DEFAULT_MODULE_ADDRESS},
    ledger::{MoveTypes, TableItemRequest},
    AccountAddress, LedgerClient, MemoryLedger,
};
use serde_json::{json, Value};
use std::sync::Arc;

pub const ACCOUNT: &str = "0xa11ce";
pub const KEY_HANDLE: &str = "0x1d0c";
pub const SERVICE_HANDLE: &str = "0x5e7c";

/// Knobs for the on-chain records of the end-to-end scenarios
pub struct Scenario {
    pub type_code: &'static str,
    pub addr_type: &'static str,
    pub signature: &'static str,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            type_code: "1",
            addr_type: "1",
            signature: "0x1234",
        }
    }
}

pub fn types() -> MoveTypes {
    MoveTypes::new(&AccountAddress::parse(DEFAULT_MODULE_ADDRESS).unwrap())
}

pub fn account() -> AccountAddress {
    AccountAddress::parse(ACCOUNT).unwrap()
}

/// `AddrAggregator` data for the test account
pub fn addr_aggregator_json(type_code: &str) -> Value {
    json!({
        "key_addr": ACCOUNT,
        "type": type_code,
        "description": "d",
        "addrs": ["alice"],
        "addr_infos_map": {"handle": KEY_HANDLE},
        "max_id": "1"
    })
}

/// Ledger holding one MoveDID account with one key and one service
pub fn seeded_ledger(scenario: &Scenario) -> MemoryLedger {
    let types = types();

    MemoryLedger::new()
        .with_resource(
            account(),
            &types.addr_aggregator(),
            addr_aggregator_json(scenario.type_code),
        )
        .with_table_item(
            KEY_HANDLE,
            "alice",
            &types.addr_info(),
            json!({
                "id": "vm1",
                "description": "k",
                "chains": ["aptos"],
                "addr_type": scenario.addr_type,
                "addr": "a1",
                "pubkey": "p1",
                "signature": scenario.signature,
                "msg": "hello",
                "created_at": "1",
                "expired_at": "0"
            }),
        )
        .with_resource(
            account(),
            &types.service_aggregator(),
            json!({
                "names": ["svc"],
                "services_map": {"handle": SERVICE_HANDLE}
            }),
        )
        .with_table_item(
            SERVICE_HANDLE,
            "svc",
            &types.service(),
            json!({"description": "s", "verification_url": "u1", "url": "u2"}),
        )
}

/// Stand-in for the full node REST API, serving from a `MemoryLedger`
pub async fn spawn_fake_node(ledger: Arc<MemoryLedger>) -> String {
    let app = Router::new()
        .route(
            "/v1/accounts/:address/resource/:resource_type",
            get(account_resource),
        )
        .route("/v1/tables/:handle/item", post(table_item))
        .route("/broken/v1/accounts/:address/resource/:resource_type", get(broken))
        .with_state(ledger);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn account_resource(
    State(ledger): State<Arc<MemoryLedger>>,
    Path((address, resource_type)): Path<(String, String)>,
) -> Response {
    let Ok(address) = AccountAddress::parse(&address) else {
        return (StatusCode::BAD_REQUEST, "bad address").into_response();
    };

    match ledger.get_account_resource(&address, &resource_type).await {
        Ok(Some(data)) => Json(json!({"type": resource_type, "data": data})).into_response(),
        Ok(None) => node_error(StatusCode::NOT_FOUND, "resource_not_found"),
        Err(e) => node_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn table_item(
    State(ledger): State<Arc<MemoryLedger>>,
    Path(handle): Path<String>,
    Json(request): Json<TableItemRequest>,
) -> Response {
    match ledger.get_table_item(&handle, &request).await {
        Ok(Some(value)) => Json(value).into_response(),
        Ok(None) => node_error(StatusCode::NOT_FOUND, "table_item_not_found"),
        Err(e) => node_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

async fn broken() -> Response {
    node_error(StatusCode::SERVICE_UNAVAILABLE, "node is syncing")
}

fn node_error(status: StatusCode, code: &str) -> Response {
    (status, Json(json!({"message": code, "error_code": code}))).into_response()
}

pub fn config_for(node_url: &str) -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.ledger.node_url = node_url.to_string();
    config
}

pub fn as_ledger(ledger: MemoryLedger) -> Arc<dyn LedgerClient> {
    Arc::new(ledger)
}

pub fn value_of<T: serde::Serialize>(v: &T) -> Value {
    serde_json::to_value(v).unwrap()
}
