use serde::Serialize;
use std::fmt;

use super::block::Block;

/// A single broken rule, tagged with the block index it was found at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Stored hash lacks the required zero prefix.
    Difficulty { block: usize },
    /// Stored hash differs from the hash of the current block data.
    HashMismatch { block: usize },
    /// `previous_block_hash` differs from the prior block's hash.
    BrokenLink { block: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Difficulty { block } => {
                write!(f, "Block {block}: Invalid hash (doesn't meet difficulty)")
            }
            Violation::HashMismatch { block } => {
                write!(f, "Block {block}: Hash mismatch (block was tampered)")
            }
            Violation::BrokenLink { block } => write!(
                f,
                "Block {block}: Chain broken (previous hash doesn't match)"
            ),
        }
    }
}

/// Outcome of a full-chain check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
    pub block_count: usize,
    #[serde(skip)]
    pub violations: Vec<Violation>,
}

/// Run every rule over every block, collecting all violations.
pub fn check_chain(chain: &[Block], difficulty: u32) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (i, block) in chain.iter().enumerate() {
        if !block.meets_difficulty(difficulty) {
            violations.push(Violation::Difficulty { block: i });
        }
        if block.block_hash != block.compute_hash() {
            violations.push(Violation::HashMismatch { block: i });
        }
        if i > 0 && block.previous_block_hash != chain[i - 1].block_hash {
            violations.push(Violation::BrokenLink { block: i });
        }
    }

    violations
}

pub fn validate_chain(chain: &[Block], difficulty: u32) -> ValidationReport {
    let block_count = chain.len();
    if chain.is_empty() {
        return ValidationReport {
            valid: true,
            message: Some("Blockchain is empty".into()),
            errors: Vec::new(),
            block_count,
            violations: Vec::new(),
        };
    }

    let violations = check_chain(chain, difficulty);
    if violations.is_empty() {
        ValidationReport {
            valid: true,
            message: Some(format!("Blockchain is valid ({block_count} blocks)")),
            errors: Vec::new(),
            block_count,
            violations,
        }
    } else {
        ValidationReport {
            valid: false,
            message: None,
            errors: violations.iter().map(ToString::to_string).collect(),
            block_count,
            violations,
        }
    }
}
