//! Error types shared across the workspace.

use thiserror::Error;

/// All the ways a reminder run can fail.
#[derive(Debug, Error)]
pub enum CobrancaError {
    /// Configuration file unreadable or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// Contact spreadsheet unreadable, corrupt, or missing columns.
    /// Always fatal — no sends are attempted after this.
    #[error("failed to load contacts: {0}")]
    Load(String),

    /// Template could not be rendered for a record. Recoverable
    /// per-record; the batch keeps going.
    #[error("template error: {0}")]
    Template(String),

    /// A record is missing data the channel needs.
    #[error("invalid record: {0}")]
    Record(String),

    /// Channel transport failure (API error, network, bad number).
    #[error("channel error: {0}")]
    Channel(String),

    /// Channel session could not be authenticated.
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CobrancaError>;
