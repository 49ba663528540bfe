use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid crawl configuration: {0}")]
    InvalidConfig(String),

    #[error("Edge list I/O failed for {}: {source}", path.display())]
    EdgeListIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed edge on line {line}: {content:?}")]
    MalformedLine { line: usize, content: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
