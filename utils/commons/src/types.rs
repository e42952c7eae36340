use super::*;

pub type ContractResult<A> = Result<A, ContractError>;

/// Contract token ID type.
/// Tokens are numbered sequentially from 1, so a `u32` is sufficient. The id
/// `0` never exists and marks an empty accessory slot.
pub type ContractTokenId = TokenIdU32;

/// Contract token amount type. Every token is unique, so a balance is 0 or 1.
pub type ContractTokenAmount = TokenAmountU8;

/// Wrapping the custom errors in a type with CIS2 errors.
pub type ContractError = Cis2Error<CustomContractError>;

pub type TransferParameter = TransferParams<ContractTokenId, ContractTokenAmount>;

/// Parameter type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenIDs used by this contract.
pub type ContractBalanceOfQueryParams = BalanceOfQueryParams<ContractTokenId>;

/// Response type for the CIS-2 function `balanceOf` specialized to the subset
/// of TokenAmounts used by this contract.
pub type ContractBalanceOfQueryResponse = BalanceOfQueryResponse<ContractTokenAmount>;

pub type ContractOnReceivingParams = OnReceivingCis2Params<ContractTokenId, ContractTokenAmount>;

pub type ContractEvent = Cis2Event<ContractTokenId, ContractTokenAmount>;
