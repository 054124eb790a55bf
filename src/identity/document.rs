/// DID document model and assembly
use crate::identity::AddrAggregator;
use serde::{Deserialize, Serialize};

/// Kind of entity controlling the DID, from the aggregator's `type` code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    Human,
    #[serde(rename = "DAO")]
    Dao,
    Bot,
    #[serde(rename = "other")]
    Other,
}

impl AccountType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => AccountType::Human,
            "1" => AccountType::Dao,
            "2" => AccountType::Bot,
            _ => AccountType::Other,
        }
    }
}

/// Verification method type, from the key record's `addr_type` code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationKeyType {
    EcdsaSecp256k1VerificationKey2019,
    Ed25519VerificationKey2020,
    #[serde(rename = "other")]
    Other,
}

impl VerificationKeyType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "0" => VerificationKeyType::EcdsaSecp256k1VerificationKey2019,
            "1" => VerificationKeyType::Ed25519VerificationKey2020,
            _ => VerificationKeyType::Other,
        }
    }
}

/// Resolved DID document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DidDocument {
    pub id: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub description: String,
    pub verification_methods: Vec<VerificationMethod>,
    pub services: ServiceEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// `<did>-<key>`
    pub id: String,
    /// Record id assigned on-chain
    pub internal_id: String,
    pub properties: KeyProperties,
    #[serde(rename = "type")]
    pub key_type: VerificationKeyType,
    pub addr: String,
    pub pubkey: String,
    /// Whether an ownership signature was recorded. Not a cryptographic check.
    pub verificated: bool,
    pub verification: Verification,
    pub created_at: String,
    pub expired_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyProperties {
    pub description: String,
    pub chains: Vec<String>,
}

/// Material the caller needs to check the ownership signature itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub msg: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// `<did>-<service name>`
    pub id: String,
    pub description: String,
    pub verification_url: String,
    pub url: String,
}

/// Build the document from the pipeline's outputs. No ledger access.
pub fn assemble(
    did_syntax: &str,
    aggregator: &AddrAggregator,
    verification_methods: Vec<VerificationMethod>,
    services: ServiceEntry,
) -> DidDocument {
    DidDocument {
        id: did_syntax.to_string(),
        account_type: AccountType::from_code(&aggregator.type_code),
        description: aggregator.description.clone(),
        verification_methods,
        services,
    }
}

/// Id of a method or service entry derived from the DID
pub(crate) fn entry_id(did_syntax: &str, name: &str) -> String {
    format!("{}-{}", did_syntax, name)
}
