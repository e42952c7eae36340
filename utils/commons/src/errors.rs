use super::*;

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Failed to invoke a contract (Error code: -4).
    InvokeContractError,
    /// Accessory types and accessory ids are empty or differ in length
    /// (Error code: -5).
    InvalidLength,
    /// Sender does not own the portrait (Error code: -6).
    NotOwner,
    /// Portrait, or one of its accessory slots, is already combined
    /// (Error code: -7).
    AlreadyCombined,
    /// Accessory slot is not wired to an accessory contract (Error code: -8).
    InvalidAccessory,
    /// No token ids left to mint (Error code: -9).
    TokenIdOverflow,
    /// Minting blob does not fit in 32 bytes (Error code: -10).
    BlobTooLong,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping CustomContractError to ContractError
impl From<CustomContractError> for ContractError {
    fn from(c: CustomContractError) -> Self {
        Cis2Error::Custom(c)
    }
}
