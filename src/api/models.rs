use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::blockchain::views::MinedBlock;
use crate::blockchain::{CancelToken, DEFAULT_DIFFICULTY, Ledger};
use crate::config::LedgerConfig;
use crate::error::Result;

/// Shared application state.
///
/// `ledger` is only ever held for short reads and writes. `mining` serializes
/// mining runs, and the search itself runs with the ledger unlocked, so reads
/// and cancel requests are served while a block is being mined.
pub struct AppState {
    pub ledger: Mutex<Ledger>,
    pub mining: Mutex<()>,
    pub cancel: CancelToken,
    pub default_difficulty: u32,
}

impl AppState {
    pub fn new(config: LedgerConfig, default_difficulty: u32) -> Self {
        let ledger = Ledger::new(config);
        Self {
            cancel: ledger.cancel_token(),
            ledger: Mutex::new(ledger),
            mining: Mutex::new(()),
            default_difficulty,
        }
    }

    /// Lock the ledger. Every mutation completes or fails before touching
    /// state, so a poisoned lock still guards a consistent ledger.
    pub fn ledger(&self) -> MutexGuard<'_, Ledger> {
        self.ledger.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot, search and commit one block. Blocks the calling thread for
    /// the whole search, so call it off the async workers.
    pub fn mine(&self, difficulty: u32) -> Result<MinedBlock> {
        let _slot = self.mining.lock().unwrap_or_else(PoisonError::into_inner);
        let job = self.ledger().prepare_mining(difficulty)?;
        let block = job.run()?;
        self.ledger().commit_mined(job, block)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LedgerConfig::default(), DEFAULT_DIFFICULTY)
    }
}

/// Success envelope: `{"success": true, "data": ...}`.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope returned with a 4xx status.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub detail: String,
}

#[derive(Serialize)]
pub struct HomeResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Request Models ---------- */

#[derive(Deserialize)]
pub struct ClientRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct TransactionRequest {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
}

#[derive(Deserialize, Default)]
pub struct MineRequest {
    #[serde(default)]
    pub difficulty: Option<u32>,
}
