// ⚠️ Errors - What can go wrong outside the points engine
// The engine itself never fails; these cover ids, storage and lookup

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptError {
    /// The OS randomness source could not produce identifier bytes
    #[error("failed to generate receipt id: {0}")]
    IdGeneration(#[from] rand::Error),

    /// No receipt was ever stored under this id
    #[error("no receipt found for id: {0}")]
    NotFound(String),

    /// An entry already exists under this id; entries are never overwritten
    #[error("receipt id already in use: {0}")]
    DuplicateId(String),
}

pub type ReceiptResult<T> = Result<T, ReceiptError>;
