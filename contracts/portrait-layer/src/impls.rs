use super::*;

// Functions for creating, updating and querying the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a state with no portraits.
    pub fn new(state_builder: &mut StateBuilder<S>, params: PortraitInitParams) -> Self {
        Self {
            layer: LayerState::new(state_builder, params.name, params.symbol, params.minter),
            accessories: AccessoryAddresses {
                eye: params.eye,
                body: params.body,
                mouth: params.mouth,
                head: params.head,
            },
            metadata: state_builder.new_map(),
        }
    }

    pub fn is_combined(&self, token_id: &ContractTokenId) -> bool {
        self.metadata.get(token_id).is_some()
    }

    /// Metadata of a portrait. A portrait that was never combined has all
    /// slots empty.
    pub fn metadata_of(&self, token_id: &ContractTokenId) -> ContractResult<PortraitMetadata> {
        ensure!(
            self.layer.contains_token(token_id),
            ContractError::InvalidTokenId
        );

        Ok(self
            .metadata
            .get(token_id)
            .map(|metadata| metadata.clone())
            .unwrap_or_default())
    }

    /// Validate a combine request from `sender` and record the new metadata.
    /// Returns the accessory contract and token id of every filled slot, in
    /// the order of the request.
    pub fn combine(
        &mut self,
        sender: &Address,
        params: &CombineParams,
    ) -> ContractResult<Vec<(ContractAddress, ContractTokenId)>> {
        ensure!(
            !params.types.is_empty() && params.types.len() == params.accessory_ids.len(),
            CustomContractError::InvalidLength.into()
        );

        ensure!(
            self.layer.owner_of(&params.token_id).as_ref() == Some(sender),
            CustomContractError::NotOwner.into()
        );

        let repeats_slot = params
            .types
            .iter()
            .enumerate()
            .any(|(i, accessory)| params.types[..i].contains(accessory));
        ensure!(
            !self.is_combined(&params.token_id) && !repeats_slot,
            CustomContractError::AlreadyCombined.into()
        );

        let mut metadata = PortraitMetadata::default();
        let mut pulls = Vec::with_capacity(params.types.len());
        for (accessory, accessory_id) in params.types.iter().zip(params.accessory_ids.iter()) {
            ensure!(*accessory_id != EMPTY_SLOT, ContractError::InvalidTokenId);

            let layer = match self.accessories.get(*accessory) {
                Address::Contract(address) => *address,
                Address::Account(_) => bail!(CustomContractError::InvalidAccessory.into()),
            };

            *metadata.slot_mut(*accessory) = *accessory_id;
            pulls.push((layer, *accessory_id));
        }

        self.metadata.insert(params.token_id, metadata);
        Ok(pulls)
    }

    /// Accessories are only accepted from the wired accessory layers.
    pub fn receive_accessory(&self, sender: &Address) -> ContractResult<()> {
        ensure!(
            self.accessories.contains_contract(sender),
            ContractError::Unauthorized
        );
        Ok(())
    }
}

impl<S: HasStateApi> HasLayer<S> for State<S> {
    fn layer(&self) -> &LayerState<S> {
        &self.layer
    }

    fn layer_mut(&mut self) -> &mut LayerState<S> {
        &mut self.layer
    }
}
