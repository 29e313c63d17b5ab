use serde::Serialize;
use sha2::{Digest, Sha256};

/// Separator between the parts of a block's canonical data.
pub const SEPARATOR: &str = " - ";

/// Suffix appended to `block_data` by the tamper operation.
pub const TAMPER_MARKER: &str = " [TAMPERED]";

/// SHA-256 of a string, lowercase hex.
pub fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

/// True when `hash` starts with `difficulty` `'0'` characters.
pub fn meets_difficulty(hash: &str, difficulty: u32) -> bool {
    let difficulty = difficulty as usize;
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|c| c == b'0')
}

/// A mined block: transaction signatures bound to the previous hash and nonce.
///
/// `block_data` is `"<sig1> - <sig2> - ... - <previous_block_hash> - <nonce>"`
/// and `block_hash` is its SHA-256.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub verified_transactions: Vec<String>,
    pub previous_block_hash: String,
    pub nonce: u64,
    pub block_data: String,
    pub block_hash: String,
}

impl Block {
    pub fn new(
        verified_transactions: Vec<String>,
        previous_block_hash: String,
        nonce: u64,
    ) -> Self {
        let block_data =
            Self::canonical_data(&verified_transactions, &previous_block_hash, nonce);
        let block_hash = sha256_hex(&block_data);
        Self {
            verified_transactions,
            previous_block_hash,
            nonce,
            block_data,
            block_hash,
        }
    }

    /// Canonical byte string shared by hashing and validation.
    pub fn canonical_data(transactions: &[String], previous_hash: &str, nonce: u64) -> String {
        format!(
            "{}{SEPARATOR}{previous_hash}{SEPARATOR}{nonce}",
            transactions.join(SEPARATOR)
        )
    }

    /// Hash of the current `block_data` (differs from `block_hash` only if
    /// the data was mutated without rehashing).
    pub fn compute_hash(&self) -> String {
        sha256_hex(&self.block_data)
    }

    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        meets_difficulty(&self.block_hash, difficulty)
    }

    pub fn is_tampered(&self) -> bool {
        self.block_data.contains(TAMPER_MARKER.trim_start())
    }

    /// Append the tamper marker and rehash, keeping data and hash consistent.
    /// Returns the previous hash.
    pub fn tamper(&mut self) -> String {
        self.block_data.push_str(TAMPER_MARKER);
        let new_hash = self.compute_hash();
        std::mem::replace(&mut self.block_hash, new_hash)
    }
}
