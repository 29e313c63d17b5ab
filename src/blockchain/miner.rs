use log::debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use super::block::{Block, meets_difficulty, sha256_hex};
use crate::error::{LedgerError, Result};

/// How many nonces are tried between cancellation checks.
const CANCEL_CHECK_INTERVAL: u64 = 1024;

/// Shared flag that asks a running search to stop.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

/// Brute-force Proof-of-Work search over nonces `0..nonce_limit`.
#[derive(Debug, Clone)]
pub struct Miner {
    nonce_limit: u64,
    cancel: CancelToken,
}

impl Miner {
    pub fn new(nonce_limit: u64) -> Self {
        Self {
            nonce_limit,
            cancel: CancelToken::new(),
        }
    }

    /// Handle that can stop a search running on another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Find the first nonce whose block hash starts with `difficulty` zeros.
    ///
    /// Clears any stale cancellation before starting.
    pub fn mine(
        &self,
        transactions: &[String],
        previous_hash: &str,
        difficulty: u32,
    ) -> Result<Block> {
        self.cancel.clear();
        let started = Instant::now();

        for nonce in 0..self.nonce_limit {
            if nonce % CANCEL_CHECK_INTERVAL == 0 && nonce > 0 && self.cancel.is_cancelled() {
                debug!("MINER - cancelled at nonce {nonce}");
                return Err(LedgerError::MiningCancelled { attempts: nonce });
            }

            // Hash the canonical data first; only materialize the block on a hit.
            let data = Block::canonical_data(transactions, previous_hash, nonce);
            if meets_difficulty(&sha256_hex(&data), difficulty) {
                debug!(
                    "MINER - nonce {nonce} found at difficulty {difficulty} in {} ms",
                    started.elapsed().as_millis()
                );
                return Ok(Block::new(
                    transactions.to_vec(),
                    previous_hash.to_string(),
                    nonce,
                ));
            }
        }

        Err(LedgerError::MiningExhausted {
            limit: self.nonce_limit,
        })
    }
}
