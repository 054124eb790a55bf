/// Configuration management for the MoveDID resolver
use crate::{
    error::{ResolverError, ResolverResult},
    ledger::AccountAddress,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Address the MoveDID modules are published under
pub const DEFAULT_MODULE_ADDRESS: &str =
    "0x65f4a0954aa6e68d2381ff98b7676df2fe57beee3ca37a4a8a57fa621c1db872";

/// DID used as the document id and as the prefix of method and service ids
pub const DEFAULT_DID_SYNTAX: &str =
    "did:movedid:0x2df41622c0c1baabaa73b2c24360d205e23e803959ebbcb0e5b80462165893ed";

pub const DEFAULT_NODE_URL: &str = "https://fullnode.testnet.aptoslabs.com";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    pub service: ServiceConfig,
    pub ledger: LedgerConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub hostname: String,
    pub port: u16,
}

/// Full node connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    pub node_url: String,
    pub user_agent: String,
    /// Per HTTP request
    pub request_timeout_secs: u64,
}

/// On-chain identity layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub module_address: String,
    pub did_syntax: String,
    /// Whole resolution pipeline
    pub resolve_timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `move_did_resolver=debug,tower_http=info`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Filter for the subscriber. An unparsable directive falls back to the default level.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                hostname: "0.0.0.0".to_string(),
                port: 8090,
            },
            ledger: LedgerConfig {
                node_url: DEFAULT_NODE_URL.to_string(),
                user_agent: format!("move-did-resolver/{}", env!("CARGO_PKG_VERSION")),
                request_timeout_secs: 10,
            },
            identity: IdentityConfig {
                module_address: DEFAULT_MODULE_ADDRESS.to_string(),
                did_syntax: DEFAULT_DID_SYNTAX.to_string(),
                resolve_timeout_secs: 30,
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl IdentityConfig {
    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

impl LedgerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ResolverConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> ResolverResult<Self> {
        dotenv::dotenv().ok();

        let defaults = Self::default();

        let hostname = env::var("MOVEDID_HOSTNAME").unwrap_or(defaults.service.hostname);
        let port = match env::var("MOVEDID_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ResolverError::Config(format!("Invalid port number: {}", raw)))?,
            Err(_) => defaults.service.port,
        };

        let node_url = env::var("MOVEDID_NODE_URL").unwrap_or(defaults.ledger.node_url);
        let user_agent = env::var("MOVEDID_USER_AGENT").unwrap_or(defaults.ledger.user_agent);
        let request_timeout_secs = parse_secs(
            "MOVEDID_REQUEST_TIMEOUT_SECS",
            defaults.ledger.request_timeout_secs,
        )?;

        let module_address =
            env::var("MOVEDID_MODULE_ADDRESS").unwrap_or(defaults.identity.module_address);
        let did_syntax = env::var("MOVEDID_DID_SYNTAX").unwrap_or(defaults.identity.did_syntax);
        let resolve_timeout_secs = parse_secs(
            "MOVEDID_RESOLVE_TIMEOUT_SECS",
            defaults.identity.resolve_timeout_secs,
        )?;

        let level = env::var("RUST_LOG").unwrap_or(defaults.logging.level);
        let json = env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(ResolverConfig {
            service: ServiceConfig { hostname, port },
            ledger: LedgerConfig {
                node_url: node_url.trim_end_matches('/').to_string(),
                user_agent,
                request_timeout_secs,
            },
            identity: IdentityConfig {
                module_address,
                did_syntax,
                resolve_timeout_secs,
            },
            logging: LoggingConfig { level, json },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> ResolverResult<()> {
        if self.service.hostname.is_empty() {
            return Err(ResolverError::Config("Hostname cannot be empty".to_string()));
        }

        let url = &self.ledger.node_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ResolverError::Config(format!(
                "Node URL must be http(s): {:?}",
                url
            )));
        }

        AccountAddress::parse(&self.identity.module_address).map_err(|e| {
            ResolverError::Config(format!("Invalid module address: {}", e))
        })?;

        if !self.identity.did_syntax.starts_with("did:") {
            return Err(ResolverError::Config(format!(
                "DID syntax must start with \"did:\": {}",
                self.identity.did_syntax
            )));
        }

        if self.ledger.request_timeout_secs == 0 || self.identity.resolve_timeout_secs == 0 {
            return Err(ResolverError::Config(
                "Timeouts must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_secs(var: &str, default: u64) -> ResolverResult<u64> {
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ResolverError::Config(format!("{} must be an integer: {}", var, raw))),
        Err(_) => Ok(default),
    }
}
