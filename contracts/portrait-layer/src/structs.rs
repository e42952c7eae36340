use super::*;

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Tokens, owners, approvals and operators.
    pub layer: LayerState<S>,
    /// Accessory layer wired to each slot.
    pub accessories: AccessoryAddresses,
    /// Metadata of every combined portrait.
    pub metadata: StateMap<ContractTokenId, PortraitMetadata, S>,
}
