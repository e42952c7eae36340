use commons::CustomContractError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid range: from {from} exceeds to {to}")]
    InvalidRange { from: u64, to: u64 },

    #[error("Cannot pick an element from an empty sequence")]
    EmptySequence,

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Ether price does not fit in u128")]
    PriceOverflow,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Minting blob error: {0:?}")]
    Blob(CustomContractError),
}

pub type Result<T> = std::result::Result<T, Error>;
