use log::warn;
use std::env;
use std::str::FromStr;

use crate::blockchain::{
    DEFAULT_DIFFICULTY, DEFAULT_NONCE_LIMIT, HASH_HEX_LEN, MAX_DIFFICULTY, VALIDATION_DIFFICULTY,
};

/// Knobs consumed by the ledger core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Leading zeros every block must carry to pass validation.
    pub validation_difficulty: u32,
    /// Highest difficulty a mining request may ask for.
    pub max_difficulty: u32,
    /// Nonce ceiling for a single mining run.
    pub nonce_limit: u64,
}

impl LedgerConfig {
    /// Cap `max_difficulty` at the digest length.
    pub fn clamped(mut self) -> Self {
        if self.max_difficulty > HASH_HEX_LEN {
            warn!(
                "max difficulty {} exceeds the {HASH_HEX_LEN}-char hash, capping",
                self.max_difficulty
            );
            self.max_difficulty = HASH_HEX_LEN;
        }
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            validation_difficulty: VALIDATION_DIFFICULTY,
            max_difficulty: MAX_DIFFICULTY,
            nonce_limit: DEFAULT_NONCE_LIMIT,
        }
    }
}

/// Process-level configuration, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub default_difficulty: u32,
    pub ledger: LedgerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = LedgerConfig::default();
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 5001),
            default_difficulty: parse_var("DEFAULT_DIFFICULTY", DEFAULT_DIFFICULTY),
            ledger: LedgerConfig {
                validation_difficulty: parse_var(
                    "VALIDATION_DIFFICULTY",
                    defaults.validation_difficulty,
                ),
                max_difficulty: parse_var("MAX_DIFFICULTY", defaults.max_difficulty),
                nonce_limit: parse_var("NONCE_LIMIT", defaults.nonce_limit),
            }
            .clamped(),
        }
    }
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{key}={raw:?} is not valid, using default {default}");
            default
        }),
        Err(_) => default,
    }
}
