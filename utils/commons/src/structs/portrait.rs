use super::*;

/// Accessory slot of a portrait.
#[derive(Serialize, SchemaType, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessory {
    Eye,
    Body,
    Mouth,
    Head,
}

impl Accessory {
    pub const ALL: [Accessory; 4] = [
        Accessory::Eye,
        Accessory::Body,
        Accessory::Mouth,
        Accessory::Head,
    ];
}

/// The parameter type for initializing a portrait layer.
#[derive(Serialize, SchemaType)]
pub struct PortraitInitParams {
    /// Collection name.
    pub name: String,
    /// Collection symbol.
    pub symbol: String,
    /// The only address allowed to mint.
    pub minter: Address,
    /// Eye accessory layer.
    pub eye: Address,
    /// Body accessory layer.
    pub body: Address,
    /// Mouth accessory layer.
    pub mouth: Address,
    /// Head accessory layer.
    pub head: Address,
}

/// The parameter type for the contract function `combine`.
#[derive(Serialize, SchemaType, Clone)]
pub struct CombineParams {
    /// Portrait to combine.
    pub token_id: ContractTokenId,
    /// Slots to fill, parallel to `accessory_ids`.
    pub types: Vec<Accessory>,
    /// Accessory tokens to put in the slots.
    pub accessory_ids: Vec<ContractTokenId>,
}

/// Composed metadata of a portrait. Empty slots hold token id 0.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct PortraitMetadata {
    pub tier: u8,
    pub eye: ContractTokenId,
    pub body: ContractTokenId,
    pub mouth: ContractTokenId,
    pub head: ContractTokenId,
}

impl Default for PortraitMetadata {
    fn default() -> Self {
        Self {
            tier: 0,
            eye: EMPTY_SLOT,
            body: EMPTY_SLOT,
            mouth: EMPTY_SLOT,
            head: EMPTY_SLOT,
        }
    }
}

/// Token id stored in an accessory slot that holds nothing.
pub const EMPTY_SLOT: ContractTokenId = TokenIdU32(0);

impl PortraitMetadata {
    pub fn slot(&self, accessory: Accessory) -> &ContractTokenId {
        match accessory {
            Accessory::Eye => &self.eye,
            Accessory::Body => &self.body,
            Accessory::Mouth => &self.mouth,
            Accessory::Head => &self.head,
        }
    }

    pub fn slot_mut(&mut self, accessory: Accessory) -> &mut ContractTokenId {
        match accessory {
            Accessory::Eye => &mut self.eye,
            Accessory::Body => &mut self.body,
            Accessory::Mouth => &mut self.mouth,
            Accessory::Head => &mut self.head,
        }
    }

    /// Slot values in `[eye, body, mouth, head]` order.
    pub fn slots(&self) -> [ContractTokenId; 4] {
        [self.eye, self.body, self.mouth, self.head]
    }
}

/// Accessory layers a portrait layer is wired to, one per slot.
#[derive(Serialize, SchemaType, Debug, Clone, PartialEq, Eq)]
pub struct AccessoryAddresses {
    pub eye: Address,
    pub body: Address,
    pub mouth: Address,
    pub head: Address,
}

impl AccessoryAddresses {
    pub fn get(&self, accessory: Accessory) -> &Address {
        match accessory {
            Accessory::Eye => &self.eye,
            Accessory::Body => &self.body,
            Accessory::Mouth => &self.mouth,
            Accessory::Head => &self.head,
        }
    }

    /// Check if `address` is one of the wired accessory contracts.
    pub fn contains_contract(&self, address: &Address) -> bool {
        match address {
            Address::Account(_) => false,
            Address::Contract(_) => Accessory::ALL.iter().any(|slot| self.get(*slot) == address),
        }
    }
}
