/// Domain-specific error types for the auction simulator.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type AuctionResult<T> = Result<T, AuctionError>;
