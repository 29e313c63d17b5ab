use serde::Serialize;

/// Returned when a client registers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRecord {
    pub name: String,
    pub identity: String,
}

/// Directory snapshot entry; `identity` is shortened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSummary {
    pub name: String,
    pub identity: String,
}

/// Returned when a transaction enters the pending pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionReceipt {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
    pub time: String,
    pub signature: String,
}

/// Pool snapshot entry with shortened identities.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingTransaction {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
    pub time: String,
}

/// Audit trail entry for a mined transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub recipient: String,
    pub value: f64,
    pub time: String,
    /// Block holding the transaction and its index in `verified_transactions`.
    pub block_number: usize,
    pub position: usize,
    /// Signature as stored in the block.
    pub signature: Option<String>,
    /// The stored signature verifies against the sender's key and the
    /// transaction's current canonical form. Genesis entries report `false`.
    pub verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinedBlock {
    pub block_number: usize,
    pub nonce: u64,
    pub block_hash: String,
    pub previous_hash: String,
    pub transactions_count: usize,
}

/// Read-only view of one block. `actual_hash` is the hash of the current
/// `block_data` when the tamper marker is present, else the stored hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockView {
    pub block_number: usize,
    pub nonce: u64,
    pub block_hash: String,
    pub previous_hash: String,
    pub transactions: Vec<String>,
    pub block_data: String,
    pub is_tampered: bool,
    pub actual_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TamperReport {
    pub block_number: usize,
    pub old_hash_prefix: String,
    pub new_hash_prefix: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub message: String,
}
