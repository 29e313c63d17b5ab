pub mod block;
pub mod ledger;
pub mod miner;
pub mod validation;
pub mod views;

pub use block::Block;
pub use ledger::Ledger;
pub use miner::{CancelToken, Miner};
pub use validation::ValidationReport;

/// Difficulty used when a mining request does not name one.
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Leading zeros every stored hash must carry to pass validation,
/// regardless of the difficulty the block was mined at.
pub const VALIDATION_DIFFICULTY: u32 = 2;

/// Mining requests above this are rejected (keeps dev waits short).
pub const MAX_DIFFICULTY: u32 = 6;

/// Hex characters in a SHA-256 digest; no difficulty above this can be met.
pub const HASH_HEX_LEN: u32 = 64;

/// Safety ceiling on the nonce search.
pub const DEFAULT_NONCE_LIMIT: u64 = 10_000_000_000;

/// Previous-hash reference of the first block.
pub const GENESIS_PREVIOUS_HASH: &str = "0000000000000000";

/// Hash characters shown in tamper reports.
pub const HASH_PREFIX_LEN: usize = 20;
