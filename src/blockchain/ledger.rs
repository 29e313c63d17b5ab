use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::views::{
    BlockView, ClientRecord, ClientSummary, HistoryEntry, MinedBlock, PendingTransaction,
    ResetReport, TamperReport, TransactionReceipt,
};
use super::{
    Block, CancelToken, GENESIS_PREVIOUS_HASH, HASH_PREFIX_LEN, Miner, ValidationReport,
    validation,
};
use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::transaction::{Sender, Transaction};
use crate::wallet::Identity;

/// A mined transaction plus where its signature sits in the chain.
#[derive(Debug)]
struct MinedTransaction {
    tx: Transaction,
    block: usize,
    position: usize,
}

/// Snapshot a mining run works from: the signed pool prefix and the tip it
/// extends. Running it needs no access to the ledger.
#[derive(Debug, Clone)]
pub struct MiningJob {
    signatures: Vec<String>,
    previous_hash: String,
    difficulty: u32,
    height: usize,
    epoch: u64,
    miner: Miner,
}

impl MiningJob {
    pub fn run(&self) -> Result<Block> {
        self.miner
            .mine(&self.signatures, &self.previous_hash, self.difficulty)
    }
}

/// In-memory ledger: client directory, mined chain, pending pool and the
/// audit trail of every mined transaction.
///
/// Mining is split into `prepare_mining`, `MiningJob::run` and
/// `commit_mined` so a shared ledger need not stay locked during the search.
/// Callers that mine concurrently must serialize the three steps; the commit
/// rejects a job whose tip or pool changed underneath it.
#[derive(Debug)]
pub struct Ledger {
    clients: BTreeMap<String, Arc<Identity>>,
    chain: Vec<Block>,
    pending: Vec<Transaction>,
    history: Vec<MinedTransaction>,
    /// Bumped on reset so jobs prepared before it go stale.
    epoch: u64,
    miner: Miner,
    config: LedgerConfig,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        let config = config.clamped();
        Self {
            clients: BTreeMap::new(),
            chain: Vec::new(),
            pending: Vec::new(),
            history: Vec::new(),
            epoch: 0,
            miner: Miner::new(config.nonce_limit),
            config,
        }
    }

    /// Handle that stops an in-flight search from another thread.
    pub fn cancel_token(&self) -> CancelToken {
        self.miner.cancel_token()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    #[cfg(test)]
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Register a client under a fresh identity. Names are unique.
    pub fn create_client(&mut self, name: &str) -> Result<ClientRecord> {
        if self.clients.contains_key(name) {
            warn!("CLIENT - rejected duplicate name {name:?}");
            return Err(LedgerError::DuplicateClient(name.to_string()));
        }

        let identity = Identity::generate();
        let record = ClientRecord {
            name: name.to_string(),
            identity: identity.identifier(),
        };
        self.clients.insert(name.to_string(), Arc::new(identity));
        info!("CLIENT - registered {name:?} ({} clients)", self.clients.len());
        Ok(record)
    }

    pub fn client(&self, name: &str) -> Result<Arc<Identity>> {
        self.clients
            .get(name)
            .cloned()
            .ok_or_else(|| LedgerError::UnknownClient(name.to_string()))
    }

    pub fn clients(&self) -> Vec<ClientSummary> {
        self.clients
            .iter()
            .map(|(name, id)| ClientSummary {
                name: name.clone(),
                identity: id.short_identifier(),
            })
            .collect()
    }

    /// Queue a transfer between two registered clients.
    pub fn create_transaction(
        &mut self,
        sender_name: &str,
        recipient_name: &str,
        value: f64,
    ) -> Result<TransactionReceipt> {
        let sender = self.client(sender_name)?;
        let recipient = self.client(recipient_name)?;

        let tx = Transaction::new(Sender::Client(sender), recipient, value);
        let receipt = TransactionReceipt {
            sender: sender_name.to_string(),
            recipient: recipient_name.to_string(),
            value,
            time: tx.time.clone(),
            signature: tx.signature()?,
        };

        self.pending.push(tx);
        debug!(
            "TX - {sender_name} -> {recipient_name} ({value}) queued, pool size {}",
            self.pending.len()
        );
        Ok(receipt)
    }

    pub fn pending(&self) -> Vec<PendingTransaction> {
        self.pending
            .iter()
            .map(|t| PendingTransaction {
                sender: t.sender.short_identifier(),
                recipient: t.recipient.short_identifier(),
                value: t.value,
                time: t.time.clone(),
            })
            .collect()
    }

    /// Audit trail. Each entry carries the signature stored in its block and
    /// whether that signature still matches the sender and the transaction's
    /// current fields.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history
            .iter()
            .map(|m| {
                let stored = self
                    .chain
                    .get(m.block)
                    .and_then(|b| b.verified_transactions.get(m.position))
                    .cloned();
                let verified = match (&m.tx.sender, &stored) {
                    (Sender::Client(id), Some(sig)) => {
                        id.verify_hex(m.tx.hash_input().as_bytes(), sig)
                    }
                    _ => false,
                };
                HistoryEntry {
                    sender: m.tx.sender.identifier(),
                    recipient: m.tx.recipient.identifier(),
                    value: m.tx.value,
                    time: m.tx.time.clone(),
                    block_number: m.block,
                    position: m.position,
                    signature: stored,
                    verified,
                }
            })
            .collect()
    }

    /// Snapshot the pending pool and the chain tip for a mining run.
    pub fn prepare_mining(&self, difficulty: u32) -> Result<MiningJob> {
        if self.pending.is_empty() {
            warn!("MINER - nothing to mine");
            return Err(LedgerError::EmptyPool);
        }
        if difficulty > self.config.max_difficulty {
            return Err(LedgerError::DifficultyTooHigh {
                requested: difficulty,
                max: self.config.max_difficulty,
            });
        }

        let signatures = self
            .pending
            .iter()
            .map(Transaction::signature)
            .collect::<Result<Vec<_>>>()?;

        Ok(MiningJob {
            signatures,
            previous_hash: self.tip_hash(),
            difficulty,
            height: self.chain.len(),
            epoch: self.epoch,
            miner: self.miner.clone(),
        })
    }

    /// Append a block found for `job`, moving the transactions it covers from
    /// the pool into the audit trail.
    ///
    /// Fails with `StaleMiningJob`, changing nothing, if the chain tip moved,
    /// the ledger was reset, or the block does not belong to the job.
    pub fn commit_mined(&mut self, job: MiningJob, block: Block) -> Result<MinedBlock> {
        let count = job.signatures.len();
        let stale = job.epoch != self.epoch
            || job.height != self.chain.len()
            || job.previous_hash != self.tip_hash()
            || self.pending.len() < count
            || block.previous_block_hash != job.previous_hash
            || block.verified_transactions != job.signatures;
        if stale {
            warn!("MINER - discarding block for stale tip {}", job.previous_hash);
            return Err(LedgerError::StaleMiningJob);
        }

        let block_number = self.chain.len();
        let mined = MinedBlock {
            block_number,
            nonce: block.nonce,
            block_hash: block.block_hash.clone(),
            previous_hash: block.previous_block_hash.clone(),
            transactions_count: count,
        };
        self.chain.push(block);
        self.history.extend(
            self.pending
                .drain(..count)
                .enumerate()
                .map(|(position, tx)| MinedTransaction {
                    tx,
                    block: block_number,
                    position,
                }),
        );

        info!(
            "MINER - sealed block #{} (hash={}, nonce={}, txs={})",
            mined.block_number, mined.block_hash, mined.nonce, mined.transactions_count
        );
        Ok(mined)
    }

    /// Mine every pending transaction into a new block, holding `&mut self`
    /// throughout. The server goes through `AppState::mine` instead.
    ///
    /// On any failure the pool and chain are left exactly as they were.
    #[allow(dead_code)]
    pub fn mine_block(&mut self, difficulty: u32) -> Result<MinedBlock> {
        let job = self.prepare_mining(difficulty)?;
        let block = job.run()?;
        self.commit_mined(job, block)
    }

    fn tip_hash(&self) -> String {
        self.chain
            .last()
            .map(|b| b.block_hash.clone())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string())
    }

    pub fn blocks(&self) -> Vec<BlockView> {
        self.chain
            .iter()
            .enumerate()
            .map(|(i, b)| block_view(i, b))
            .collect()
    }

    pub fn block(&self, index: usize) -> Result<BlockView> {
        self.chain
            .get(index)
            .map(|b| block_view(index, b))
            .ok_or(LedgerError::BlockNotFound(index))
    }

    /// Check difficulty, content integrity and linkage for every block.
    pub fn validate_chain(&self) -> ValidationReport {
        let report = validation::validate_chain(&self.chain, self.config.validation_difficulty);
        if !report.valid {
            debug!("VALIDATE - {} violation(s)", report.errors.len());
        }
        report
    }

    /// Append the tamper marker to a block and rehash it.
    pub fn tamper_block(&mut self, index: usize) -> Result<TamperReport> {
        let block = self
            .chain
            .get_mut(index)
            .ok_or(LedgerError::BlockNotFound(index))?;

        let old_hash = block.tamper();
        let old_hash_prefix = prefix(&old_hash);
        let new_hash_prefix = prefix(&block.block_hash);
        warn!("TAMPER - block #{index} {old_hash_prefix}... -> {new_hash_prefix}...");

        Ok(TamperReport {
            block_number: index,
            message: format!(
                "Block {index} tampered! Hash changed from {old_hash_prefix}... to {new_hash_prefix}..."
            ),
            old_hash_prefix,
            new_hash_prefix,
        })
    }

    pub fn reset(&mut self) -> ResetReport {
        self.clients.clear();
        self.chain.clear();
        self.pending.clear();
        self.history.clear();
        self.epoch += 1;
        info!("RESET - ledger cleared");
        ResetReport {
            message: "Blockchain reset successfully".into(),
        }
    }
}

fn block_view(index: usize, block: &Block) -> BlockView {
    let is_tampered = block.is_tampered();
    BlockView {
        block_number: index,
        nonce: block.nonce,
        block_hash: block.block_hash.clone(),
        previous_hash: block.previous_block_hash.clone(),
        transactions: block.verified_transactions.clone(),
        block_data: block.block_data.clone(),
        is_tampered,
        actual_hash: if is_tampered {
            block.compute_hash()
        } else {
            block.block_hash.clone()
        },
    }
}

fn prefix(hash: &str) -> String {
    hash.chars().take(HASH_PREFIX_LEN).collect()
}
