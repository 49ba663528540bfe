use thiserror::Error;
use wikirank_scanner::ScanError;

#[derive(Error, Debug)]
pub enum RankError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error("Convergence threshold must be a positive number, got {0}")]
    InvalidEpsilon(f64),

    #[error("Requested top {requested} but only {available} candidates exist")]
    OutOfRange { requested: usize, available: usize },

    #[error("Unknown {kind}: {value}")]
    UnknownName { kind: &'static str, value: String },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RankError>;
