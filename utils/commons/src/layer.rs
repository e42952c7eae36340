//! Token ledger shared by every layer contract.
//!
//! Portraits and accessories are unique CIS-2 tokens numbered sequentially
//! from 1. On top of the CIS-2 operators the ledger keeps a single approved
//! address per token, which is how a holder lets the portrait layer pull an
//! accessory during `combine`.
//!
//! The entrypoint handlers at the bottom of this module are generic over the
//! contract state through [`HasLayer`], so both layer contracts expose the
//! same token interface.
use super::*;

/// Ledger and collection info of a layer contract.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct LayerState<S: HasStateApi> {
    /// Collection name.
    name: String,
    /// Collection symbol.
    symbol: String,
    /// The only address allowed to mint.
    minter: Address,
    /// Id of the last minted token, 0 before the first mint.
    last_token_id: u32,
    /// Owner of every minted token.
    owners: StateMap<ContractTokenId, Address, S>,
    /// Address approved to transfer a specific token.
    approvals: StateMap<ContractTokenId, Address, S>,
    /// Operators for each owner address.
    operators: StateMap<Address, StateSet<Address, S>, S>,
}

impl<S: HasStateApi> LayerState<S> {
    /// Creates a ledger with no tokens.
    pub fn new(
        state_builder: &mut StateBuilder<S>,
        name: String,
        symbol: String,
        minter: Address,
    ) -> Self {
        Self {
            name,
            symbol,
            minter,
            last_token_id: 0,
            owners: state_builder.new_map(),
            approvals: state_builder.new_map(),
            operators: state_builder.new_map(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn minter(&self) -> Address {
        self.minter
    }

    #[inline(always)]
    pub fn is_minter(&self, address: &Address) -> bool {
        self.minter == *address
    }

    /// Number of tokens minted so far.
    pub fn total_minted(&self) -> u32 {
        self.last_token_id
    }

    /// Mint the next token to `owner` and return its id.
    pub fn mint(&mut self, owner: Address) -> ContractResult<ContractTokenId> {
        let next = self
            .last_token_id
            .checked_add(1)
            .ok_or(CustomContractError::TokenIdOverflow)?;
        self.last_token_id = next;

        let token_id = TokenIdU32(next);
        self.owners.insert(token_id, owner);
        Ok(token_id)
    }

    /// Check that the token ID currently exists in this contract.
    #[inline(always)]
    pub fn contains_token(&self, token_id: &ContractTokenId) -> bool {
        self.owners.get(token_id).is_some()
    }

    pub fn owner_of(&self, token_id: &ContractTokenId) -> Option<Address> {
        self.owners.get(token_id).map(|owner| *owner)
    }

    /// Get the current balance of a given token ID for a given address.
    /// Results in an error if the token ID does not exist in the state.
    pub fn balance(
        &self,
        token_id: &ContractTokenId,
        address: &Address,
    ) -> ContractResult<ContractTokenAmount> {
        let owner = self
            .owner_of(token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        Ok(if owner == *address {
            ContractTokenAmount::from(1)
        } else {
            ContractTokenAmount::from(0)
        })
    }

    /// Check if `address` is an operator of `owner`.
    pub fn is_operator(&self, owner: &Address, address: &Address) -> bool {
        self.operators
            .get(owner)
            .map(|operators| operators.contains(address))
            .unwrap_or(false)
    }

    pub fn approved(&self, token_id: &ContractTokenId) -> Option<Address> {
        self.approvals.get(token_id).map(|spender| *spender)
    }

    /// Check if `sender` may move `token_id` out of `from`.
    pub fn is_authorized(
        &self,
        sender: &Address,
        from: &Address,
        token_id: &ContractTokenId,
    ) -> bool {
        sender == from
            || self.is_operator(from, sender)
            || self.approved(token_id).as_ref() == Some(sender)
    }

    /// Approve `spender` for a single token, replacing any earlier approval.
    /// Only the owner or one of its operators may approve. Returns the owner.
    pub fn approve(
        &mut self,
        sender: &Address,
        spender: Address,
        token_id: ContractTokenId,
    ) -> ContractResult<Address> {
        let owner = self
            .owner_of(&token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        ensure!(
            owner == *sender || self.is_operator(&owner, sender),
            ContractError::Unauthorized
        );

        self.approvals.insert(token_id, spender);
        Ok(owner)
    }

    /// Update the state with a transfer of some token.
    /// Results in an error if the token ID does not exist in the state, if the
    /// sender may not move it, or if `from` does not hold it.
    pub fn transfer(
        &mut self,
        sender: &Address,
        transfer: &Transfer<ContractTokenId, ContractTokenAmount>,
    ) -> ContractResult<()> {
        let owner = self
            .owner_of(&transfer.token_id)
            .ok_or(ContractError::InvalidTokenId)?;

        ensure!(
            self.is_authorized(sender, &transfer.from, &transfer.token_id),
            ContractError::Unauthorized
        );

        // A zero transfer does not modify the state.
        if transfer.amount == ContractTokenAmount::from(0) {
            return Ok(());
        }

        ensure!(
            transfer.amount == ContractTokenAmount::from(1) && owner == transfer.from,
            ContractError::InsufficientFunds
        );

        self.owners.insert(transfer.token_id, transfer.to.address());
        self.approvals.remove(&transfer.token_id);
        Ok(())
    }

    /// Update the state adding a new operator for a given address.
    /// Succeeds even if the `operator` is already an operator for the
    /// `address`.
    pub fn add_operator(
        &mut self,
        owner: &Address,
        operator: &Address,
        state_builder: &mut StateBuilder<S>,
    ) {
        let mut operators = self
            .operators
            .entry(*owner)
            .or_insert_with(|| state_builder.new_set());
        operators.insert(*operator);
    }

    /// Update the state removing an operator for a given address.
    /// Succeeds even if the `operator` is _not_ an operator for the `address`.
    pub fn remove_operator(&mut self, owner: &Address, operator: &Address) {
        self.operators
            .get_mut(owner)
            .map(|mut operators| operators.remove(operator));
    }
}

/// Access to the ledger embedded in a contract state.
pub trait HasLayer<S: HasStateApi> {
    fn layer(&self) -> &LayerState<S>;

    fn layer_mut(&mut self) -> &mut LayerState<S>;
}

/// An untagged event of a token approval.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ApprovalEvent {
    /// Owner of the token.
    pub owner: Address,
    /// Address allowed to transfer the token.
    pub spender: Address,
    pub token_id: ContractTokenId,
}

/// Tagged ledger event to be serialized for the event log.
#[derive(Debug)]
pub enum LayerEvent {
    /// Approving an address for a single token
    Approval(ApprovalEvent),
}

impl Serial for LayerEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            LayerEvent::Approval(event) => {
                out.write_u8(APPROVAL_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for LayerEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            APPROVAL_TAG => ApprovalEvent::deserial(source).map(LayerEvent::Approval),
            _ => Err(ParseError::default()),
        }
    }
}

/// Mint `amount` new tokens to `owner`, logging a `Mint` event for each.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the minter.
/// - The token ids are exhausted.
/// - Fails to log `Mint` event. The event log caps a single call at 64
///   entries, which bounds `amount`.
pub fn mint_multiple<S, T>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<T, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let params: MintParams = ctx.parameter_cursor().get()?;
    let layer = host.state_mut().layer_mut();

    ensure!(layer.is_minter(&ctx.sender()), ContractError::Unauthorized);

    for _ in 0..params.amount {
        let token_id = layer.mint(params.owner)?;

        logger.log(&ContractEvent::Mint(MintEvent {
            token_id,
            amount: ContractTokenAmount::from(1),
            owner: params.owner,
        }))?;
    }

    Ok(())
}

/// Approve an address to transfer a single token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The token does not exist.
/// - The sender is neither the owner nor an operator of the owner.
/// - Fails to log `Approval` event.
pub fn approve<S, T>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<T, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let params: ApproveParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    let owner = host
        .state_mut()
        .layer_mut()
        .approve(&sender, params.spender, params.token_id)?;

    logger.log(&LayerEvent::Approval(ApprovalEvent {
        owner,
        spender: params.spender,
        token_id: params.token_id,
    }))?;

    Ok(())
}

/// Execute a list of token transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list and calls the
/// receive hook of every contract receiving a token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - Any of the transfers fail to be executed, which could be if:
///     - The `token_id` does not exist.
///     - The sender is not the owner of the token, an operator of the owner,
///       or the address approved for the token.
///     - The token is not owned by the `from`.
/// - Fails to log event.
/// - Any of the messages sent to contracts receiving a transfer choose to
///   reject.
pub fn transfer<S, T>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<T, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let TransferParams(transfers): TransferParameter = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    for transfer in transfers {
        host.state_mut().layer_mut().transfer(&sender, &transfer)?;

        logger.log(&ContractEvent::Transfer(TransferEvent {
            token_id: transfer.token_id,
            amount: transfer.amount,
            from: transfer.from,
            to: transfer.to.address(),
        }))?;

        if let Receiver::Contract(address, entrypoint_name) = transfer.to {
            let parameter = OnReceivingCis2Params {
                token_id: transfer.token_id,
                amount: transfer.amount,
                from: transfer.from,
                data: transfer.data,
            };

            host.invoke_contract(
                &address,
                &parameter,
                entrypoint_name.as_entrypoint_name(),
                Amount::zero(),
            )
            .map_err(CustomContractError::from)?;
        }
    }

    Ok(())
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event for each update.
pub fn update_operator<S, T>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<T, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let UpdateOperatorParams(params) = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    let (state, state_builder) = host.state_and_builder();
    for param in params {
        match param.update {
            OperatorUpdate::Add => {
                state
                    .layer_mut()
                    .add_operator(&sender, &param.operator, state_builder)
            }
            OperatorUpdate::Remove => state.layer_mut().remove_operator(&sender, &param.operator),
        }

        logger.log(&ContractEvent::UpdateOperator(UpdateOperatorEvent {
            owner: sender,
            operator: param.operator,
            update: param.update,
        }))?;
    }

    Ok(())
}

/// Answer a list of `owner`/`address` operator queries, in order.
pub fn operator_of<S, T>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<T, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let params: OperatorOfQueryParams = ctx.parameter_cursor().get()?;
    let layer = host.state().layer();

    let response: Vec<bool> = params
        .queries
        .iter()
        .map(|query| layer.is_operator(&query.owner, &query.address))
        .collect();

    Ok(OperatorOfQueryResponse::from(response))
}

/// Get the balance of given token IDs and addresses.
///
/// It rejects if any of the queried `token_id` does not exist.
pub fn balance_of<S, T>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<T, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse>
where
    S: HasStateApi,
    T: HasLayer<S>,
{
    let params: ContractBalanceOfQueryParams = ctx.parameter_cursor().get()?;
    let layer = host.state().layer();

    let mut response = Vec::with_capacity(params.queries.len());
    for query in params.queries {
        response.push(layer.balance(&query.token_id, &query.address)?);
    }

    Ok(ContractBalanceOfQueryResponse::from(response))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use test_infrastructure::*;

    const MINTER: Address = Address::Account(AccountAddress([9u8; 32]));
    const ACCOUNT_0: AccountAddress = AccountAddress([0u8; 32]);
    const ADDRESS_0: Address = Address::Account(ACCOUNT_0);
    const ACCOUNT_1: AccountAddress = AccountAddress([1u8; 32]);
    const ADDRESS_1: Address = Address::Account(ACCOUNT_1);
    const SPENDER: Address = Address::Contract(ContractAddress {
        index: 7,
        subindex: 0,
    });

    fn new_layer(state_builder: &mut TestStateBuilder) -> LayerState<TestStateApi> {
        LayerState::new(
            state_builder,
            String::from("BaseAccessory"),
            String::from("BaseA"),
            MINTER,
        )
    }

    fn transfer_of(
        token_id: ContractTokenId,
        from: Address,
        to: AccountAddress,
        amount: u8,
    ) -> Transfer<ContractTokenId, ContractTokenAmount> {
        Transfer {
            token_id,
            amount: ContractTokenAmount::from(amount),
            from,
            to: Receiver::from_account(to),
            data: AdditionalData::empty(),
        }
    }

    #[concordium_test]
    fn mint_numbers_tokens_from_one() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);

        claim_eq!(layer.mint(ADDRESS_0), Ok(TokenIdU32(1)));
        claim_eq!(layer.mint(ADDRESS_1), Ok(TokenIdU32(2)));
        claim_eq!(layer.total_minted(), 2);
        claim_eq!(layer.owner_of(&TokenIdU32(1)), Some(ADDRESS_0));
        claim_eq!(layer.owner_of(&TokenIdU32(2)), Some(ADDRESS_1));
        claim!(!layer.contains_token(&TokenIdU32(0)));
        claim!(!layer.contains_token(&TokenIdU32(3)));
    }

    #[concordium_test]
    fn balance_of_unknown_token_fails() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);
        let token_id = layer.mint(ADDRESS_0).expect_report("Mint failed");

        claim_eq!(
            layer.balance(&token_id, &ADDRESS_0),
            Ok(ContractTokenAmount::from(1))
        );
        claim_eq!(
            layer.balance(&token_id, &ADDRESS_1),
            Ok(ContractTokenAmount::from(0))
        );
        claim_eq!(
            layer.balance(&TokenIdU32(5), &ADDRESS_0),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn approval_lets_spender_transfer_once() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);
        let token_id = layer.mint(ADDRESS_0).expect_report("Mint failed");

        claim_eq!(layer.approve(&ADDRESS_0, SPENDER, token_id), Ok(ADDRESS_0));
        claim_eq!(layer.approved(&token_id), Some(SPENDER));

        let result = layer.transfer(&SPENDER, &transfer_of(token_id, ADDRESS_0, ACCOUNT_1, 1));
        claim_eq!(result, Ok(()));
        claim_eq!(layer.owner_of(&token_id), Some(ADDRESS_1));

        // The approval does not survive the transfer.
        claim_eq!(layer.approved(&token_id), None);
        let result = layer.transfer(&SPENDER, &transfer_of(token_id, ADDRESS_1, ACCOUNT_0, 1));
        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    #[concordium_test]
    fn only_owner_or_operator_may_approve() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);
        let token_id = layer.mint(ADDRESS_0).expect_report("Mint failed");

        claim_eq!(
            layer.approve(&ADDRESS_1, SPENDER, token_id),
            Err(ContractError::Unauthorized)
        );

        layer.add_operator(&ADDRESS_0, &ADDRESS_1, &mut state_builder);
        claim_eq!(layer.approve(&ADDRESS_1, SPENDER, token_id), Ok(ADDRESS_0));

        claim_eq!(
            layer.approve(&ADDRESS_0, SPENDER, TokenIdU32(2)),
            Err(ContractError::InvalidTokenId)
        );
    }

    #[concordium_test]
    fn transfer_rejects_wrong_amounts_and_holders() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);
        let token_id = layer.mint(ADDRESS_0).expect_report("Mint failed");

        claim_eq!(
            layer.transfer(&ADDRESS_0, &transfer_of(token_id, ADDRESS_0, ACCOUNT_1, 2)),
            Err(ContractError::InsufficientFunds)
        );
        claim_eq!(
            layer.transfer(&ADDRESS_1, &transfer_of(token_id, ADDRESS_1, ACCOUNT_0, 1)),
            Err(ContractError::InsufficientFunds)
        );
        claim_eq!(
            layer.transfer(&ADDRESS_1, &transfer_of(token_id, ADDRESS_0, ACCOUNT_1, 1)),
            Err(ContractError::Unauthorized)
        );

        // A zero transfer does not move the token.
        claim_eq!(
            layer.transfer(&ADDRESS_0, &transfer_of(token_id, ADDRESS_0, ACCOUNT_1, 0)),
            Ok(())
        );
        claim_eq!(layer.owner_of(&token_id), Some(ADDRESS_0));
    }

    #[concordium_test]
    fn operators_can_be_removed() {
        let mut state_builder = TestStateBuilder::new();
        let mut layer = new_layer(&mut state_builder);

        layer.add_operator(&ADDRESS_0, &ADDRESS_1, &mut state_builder);
        claim!(layer.is_operator(&ADDRESS_0, &ADDRESS_1));
        claim!(!layer.is_operator(&ADDRESS_1, &ADDRESS_0));

        layer.remove_operator(&ADDRESS_0, &ADDRESS_1);
        claim!(!layer.is_operator(&ADDRESS_0, &ADDRESS_1));
    }

    #[concordium_test]
    fn approval_event_round_trips_through_the_log_format() {
        let event = LayerEvent::Approval(ApprovalEvent {
            owner: ADDRESS_0,
            spender: SPENDER,
            token_id: TokenIdU32(1),
        });
        let bytes = to_bytes(&event);

        claim_eq!(bytes[0], APPROVAL_TAG);
        let parsed: LayerEvent = from_bytes(&bytes).expect_report("Event should parse");
        let LayerEvent::Approval(parsed) = parsed;
        claim_eq!(parsed.spender, SPENDER);
    }
}
