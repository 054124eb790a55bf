//! MoveDID Resolver
//!
//! Resolves DIDs anchored on an Aptos account (the MoveDID address and
//! service aggregators) into DID documents, either as a library through
//! [`identity::DidResolver`] or over HTTP.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod metrics;
pub mod server;

pub use config::ResolverConfig;
pub use context::AppContext;
pub use error::{ResolverError, ResolverResult, TransportKind};
pub use identity::{DidDocument, DidResolver};
pub use ledger::{AccountAddress, LedgerClient, MemoryLedger, RestLedgerClient};
