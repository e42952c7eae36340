use super::*;

/// The parameter type for initializing an accessory layer.
#[derive(Serialize, SchemaType)]
pub struct InitParams {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// The only address allowed to mint.
    pub minter: Address,
}

/// The parameter type for the contract function `mintMultiple`.
#[derive(Serialize, SchemaType, Clone)]
pub struct MintParams {
    /// Owner of the newly minted tokens.
    pub owner: Address,
    /// Number of tokens to mint.
    pub amount: u32,
}

/// The parameter type for the contract function `approve`.
#[derive(Serialize, SchemaType, Clone)]
pub struct ApproveParams {
    /// Address allowed to transfer the token on behalf of its owner.
    pub spender: Address,
    pub token_id: ContractTokenId,
}
