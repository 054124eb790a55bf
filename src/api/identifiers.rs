/// DID resolution endpoints
///
/// `GET /1.0/identifiers/{address}` follows the universal resolver path
/// layout and answers with the bare DID document. `POST /1.0/identifiers`
/// takes the function-runner payload `{"addr": "<hex>"}`.
use crate::{
    context::AppContext,
    error::{ResolverError, ResolverResult},
    identity::DidDocument,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

/// Build identifier routes
pub fn routes() -> Router<AppContext> {
    Router::new()
        .route("/1.0/identifiers", post(resolve_payload))
        .route("/1.0/identifiers/:address", get(resolve_identifier))
}

/// Resolve the DID document for an account address
pub async fn resolve_identifier(
    State(ctx): State<AppContext>,
    Path(address): Path<String>,
) -> ResolverResult<Json<DidDocument>> {
    let doc = ctx.resolver.resolve(&address).await?;
    Ok(Json(doc))
}

#[derive(Debug, Deserialize)]
pub struct ResolvePayload {
    pub addr: String,
}

/// Resolve from a JSON body. A body without a string `addr` is bad input.
pub async fn resolve_payload(
    State(ctx): State<AppContext>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> ResolverResult<Json<DidDocument>> {
    let Json(body) =
        payload.map_err(|e| ResolverError::Input(format!("Invalid JSON body: {}", e.body_text())))?;

    let payload: ResolvePayload = serde_json::from_value(body)
        .map_err(|e| ResolverError::Input(format!("Expected {{\"addr\": \"<hex>\"}}: {}", e)))?;

    let doc = ctx.resolver.resolve(&payload.addr).await?;
    Ok(Json(doc))
}
