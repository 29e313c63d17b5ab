use thiserror::Error;

/// Domain errors raised by the ledger core. All of them are recoverable and
/// leave existing state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("client not found: {0}")]
    UnknownClient(String),

    #[error("client already registered: {0}")]
    DuplicateClient(String),

    #[error("no pending transactions to mine")]
    EmptyPool,

    #[error("mining exhausted: no nonce below {limit} satisfies the difficulty")]
    MiningExhausted { limit: u64 },

    #[error("mining cancelled after {attempts} attempts")]
    MiningCancelled { attempts: u64 },

    #[error("chain changed while mining; retry")]
    StaleMiningJob,

    #[error("difficulty {requested} too high (max {max})")]
    DifficultyTooHigh { requested: u32, max: u32 },

    #[error("block not found: {0}")]
    BlockNotFound(usize),

    #[error("identity error: {0}")]
    Identity(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
