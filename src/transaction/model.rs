use chrono::Local;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{LedgerError, Result};
use crate::wallet::Identity;

/// Literal used in place of an identifier for system seed transactions.
pub const GENESIS: &str = "Genesis";

/// Timestamp layout captured at construction (local time, microseconds).
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Who a transfer comes from: a registered identity or the genesis sentinel.
#[derive(Debug, Clone)]
pub enum Sender {
    Client(Arc<Identity>),
    // Seed transactions only; the ledger never submits one itself.
    #[allow(dead_code)]
    Genesis,
}

impl Sender {
    /// Identifier embedded in the canonical form.
    pub fn identifier(&self) -> String {
        match self {
            Sender::Client(id) => id.identifier(),
            Sender::Genesis => GENESIS.to_string(),
        }
    }

    /// Display form used in pool snapshots.
    pub fn short_identifier(&self) -> String {
        match self {
            Sender::Client(id) => id.short_identifier(),
            Sender::Genesis => GENESIS.to_string(),
        }
    }
}

/// Fixed-order record that is signed. Field order is part of the contract:
/// it serializes as `{"sender":..,"recipient":..,"value":..,"time":..}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalForm {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
    pub time: String,
}

/// A value transfer. No rule restricts `value`; zero and negative amounts
/// are accepted.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub sender: Sender,
    pub recipient: Arc<Identity>,
    pub value: f64,
    pub time: String,
}

impl Transaction {
    /// Build a transaction stamped with the current local time.
    pub fn new(sender: Sender, recipient: Arc<Identity>, value: f64) -> Self {
        let time = Local::now().format(TIME_FORMAT).to_string();
        Self::with_time(sender, recipient, value, time)
    }

    pub fn with_time(sender: Sender, recipient: Arc<Identity>, value: f64, time: String) -> Self {
        Self {
            sender,
            recipient,
            value,
            time,
        }
    }

    pub fn canonical_form(&self) -> CanonicalForm {
        CanonicalForm {
            sender: self.sender.identifier(),
            recipient: self.recipient.identifier(),
            value: self.value,
            time: self.time.clone(),
        }
    }

    /// The exact string that gets signed.
    pub fn hash_input(&self) -> String {
        // A struct of strings and an f64 cannot fail to serialize; a NaN or
        // infinite value serializes as `null`.
        serde_json::to_string(&self.canonical_form()).unwrap_or_default()
    }

    /// Hex DER signature over `hash_input()` by the sender's key.
    ///
    /// Never cached: it is recomputed from the current fields on every call.
    /// Genesis transactions have no key and are unsigned.
    pub fn signature(&self) -> Result<String> {
        match &self.sender {
            Sender::Client(id) => Ok(hex::encode(id.sign(self.hash_input().as_bytes()))),
            Sender::Genesis => Err(LedgerError::Identity(
                "genesis transactions have no signing key".into(),
            )),
        }
    }
}
