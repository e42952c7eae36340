use super::*;

/// Initialize contract instance with no portraits, wired to one accessory
/// layer per slot.
#[init(contract = "PortraitLayer", parameter = "PortraitInitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: PortraitInitParams = ctx.parameter_cursor().get()?;

    // Construct the initial contract state.
    Ok(State::new(state_builder, params))
}

/// Mint new portraits to a given owner. Logs a `Mint` event for each token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the minter.
/// - Fails to log `Mint` event.
#[receive(
    contract = "PortraitLayer",
    name = "mintMultiple",
    parameter = "MintParams",
    enable_logger,
    mutable
)]
fn mint_multiple<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    commons::layer::mint_multiple(ctx, host, logger)
}

/// Approve an address to transfer a single portrait of the sender.
/// Logs an `Approval` event.
#[receive(
    contract = "PortraitLayer",
    name = "approve",
    parameter = "ApproveParams",
    enable_logger,
    mutable
)]
fn approve<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    commons::layer::approve(ctx, host, logger)
}

#[receive(
    contract = "PortraitLayer",
    name = "getApproved",
    parameter = "ContractTokenId",
    return_value = "Option<Address>"
)]
fn get_approved<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Address>> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    Ok(host.state().layer.approved(&token_id))
}

/// Execute a list of portrait transfers, in the order of the list.
/// A combined portrait keeps its accessories when it changes hands.
#[receive(
    contract = "PortraitLayer",
    name = "transfer",
    parameter = "TransferParameter",
    enable_logger,
    mutable
)]
fn transfer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    commons::layer::transfer(ctx, host, logger)
}

/// Enable or disable addresses as operators of the sender address.
/// Logs an `UpdateOperator` event.
#[receive(
    contract = "PortraitLayer",
    name = "updateOperator",
    parameter = "UpdateOperatorParams",
    enable_logger,
    mutable
)]
fn update_operator<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    commons::layer::update_operator(ctx, host, logger)
}

#[receive(
    contract = "PortraitLayer",
    name = "balanceOf",
    parameter = "ContractBalanceOfQueryParams",
    return_value = "ContractBalanceOfQueryResponse"
)]
fn balance_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<ContractBalanceOfQueryResponse> {
    commons::layer::balance_of(ctx, host)
}

#[receive(
    contract = "PortraitLayer",
    name = "operatorOf",
    parameter = "OperatorOfQueryParams",
    return_value = "OperatorOfQueryResponse"
)]
fn operator_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<OperatorOfQueryResponse> {
    commons::layer::operator_of(ctx, host)
}

#[receive(
    contract = "PortraitLayer",
    name = "ownerOf",
    parameter = "ContractTokenId",
    return_value = "Option<Address>"
)]
fn owner_of<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Address>> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    Ok(host.state().layer.owner_of(&token_id))
}

#[receive(contract = "PortraitLayer", name = "name", return_value = "String")]
fn name<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    Ok(host.state().layer.name().into())
}

#[receive(contract = "PortraitLayer", name = "symbol", return_value = "String")]
fn symbol<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    Ok(host.state().layer.symbol().into())
}

#[receive(contract = "PortraitLayer", name = "minter", return_value = "Address")]
fn minter<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    Ok(host.state().layer.minter())
}

/// Accessory layer wired to a slot.
#[receive(
    contract = "PortraitLayer",
    name = "accessoryLayer",
    parameter = "Accessory",
    return_value = "Address"
)]
fn accessory_layer<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    let accessory: Accessory = ctx.parameter_cursor().get()?;
    Ok(*host.state().accessories.get(accessory))
}

/// Combine a portrait with accessories of the sender.
///
/// Records the accessory ids in the portrait metadata, logs a `Combined`
/// event and then pulls every accessory from the sender into this contract
/// through the `transfer` entrypoint of its accessory layer. The sender has
/// to approve this contract for each accessory beforehand.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - `types` is empty or differs in length from `accessory_ids`.
/// - The sender does not own the portrait.
/// - The portrait was combined before, or a slot is named twice.
/// - An accessory id is 0.
/// - A slot is not wired to an accessory contract.
/// - Fails to log `Combined` event.
/// - Any of the accessory transfers fail.
#[receive(
    contract = "PortraitLayer",
    name = "combine",
    parameter = "CombineParams",
    enable_logger,
    mutable
)]
fn combine<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: CombineParams = ctx.parameter_cursor().get()?;
    let sender = ctx.sender();

    let pulls = host.state_mut().combine(&sender, &params)?;

    logger.log(&CustomEvent::Combined(CombinedEvent {
        token_id: params.token_id,
        types: params.types,
        accessory_ids: params.accessory_ids,
    }))?;

    for (layer, accessory_id) in pulls {
        let parameter: TransferParameter = TransferParams(vec![Transfer {
            token_id: accessory_id,
            amount: ContractTokenAmount::from(1),
            from: sender,
            to: Receiver::Contract(
                ctx.self_address(),
                OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into()),
            ),
            data: AdditionalData::empty(),
        }]);

        host.invoke_contract(
            &layer,
            &parameter,
            EntrypointName::new_unchecked("transfer"),
            Amount::zero(),
        )
        .map_err(CustomContractError::from)?;
    }

    Ok(())
}

/// Composed metadata of a portrait.
///
/// It rejects if the portrait does not exist.
#[receive(
    contract = "PortraitLayer",
    name = "getMetadata",
    parameter = "ContractTokenId",
    return_value = "PortraitMetadata"
)]
fn get_metadata<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<PortraitMetadata> {
    let token_id: ContractTokenId = ctx.parameter_cursor().get()?;
    host.state().metadata_of(&token_id)
}

/// Receive hook for accessories pulled in by `combine`. Only the wired
/// accessory layers may send tokens to this contract.
#[receive(
    contract = "PortraitLayer",
    name = "onReceivingCIS2",
    parameter = "ContractOnReceivingParams"
)]
fn on_receiving_cis2<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<()> {
    let _params: ContractOnReceivingParams = ctx.parameter_cursor().get()?;
    host.state().receive_accessory(&ctx.sender())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use std::{cell::RefCell, rc::Rc};
    use test_infrastructure::*;

    const MINTER: AccountAddress = AccountAddress([1; 32]);
    const ALICE: AccountAddress = AccountAddress([16; 32]);
    const BOB: AccountAddress = AccountAddress([17; 32]);
    const MOUTH: AccountAddress = AccountAddress([32; 32]);
    const HEAD: AccountAddress = AccountAddress([33; 32]);

    const PORTRAIT: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const EYE: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const BODY: ContractAddress = ContractAddress {
        index: 3,
        subindex: 0,
    };

    /// Test helper function which creates a portrait layer wired to the `EYE`
    /// and `BODY` contracts and the `MOUTH` and `HEAD` accounts, with one
    /// portrait owned by `ALICE`.
    fn default_host() -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&PortraitInitParams {
            name: String::from("BasePortrait"),
            symbol: String::from("BaseP"),
            minter: Address::Account(MINTER),
            eye: Address::Contract(EYE),
            body: Address::Contract(BODY),
            mouth: Address::Account(MOUTH),
            head: Address::Account(HEAD),
        });
        ctx.set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state =
            init(&ctx, &mut state_builder).expect_report("Failed during init_PortraitLayer");
        let mut host = TestHost::new(state, state_builder);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&MintParams {
            owner: Address::Account(ALICE),
            amount: 1,
        });
        ctx.set_sender(Address::Account(MINTER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();
        let result = mint_multiple(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        host
    }

    fn combine_params(types: Vec<Accessory>, accessory_ids: Vec<u32>) -> CombineParams {
        CombineParams {
            token_id: TokenIdU32(1),
            types,
            accessory_ids: accessory_ids.into_iter().map(TokenIdU32).collect(),
        }
    }

    fn call_combine(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        params: &CombineParams,
    ) -> (ContractResult<()>, TestLogger) {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(params);
        ctx.set_sender(Address::Account(sender))
            .set_self_address(PORTRAIT)
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = combine(&ctx, host, &mut logger);
        (result, logger)
    }

    fn metadata_of(
        host: &TestHost<State<TestStateApi>>,
        token_id: u32,
    ) -> ContractResult<PortraitMetadata> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&TokenIdU32(token_id));
        ctx.set_parameter(&bytes);
        get_metadata(&ctx, host)
    }

    fn accessory_ledger(name: &str) -> SharedLedger {
        let mut state_builder = TestStateBuilder::new();
        Rc::new(RefCell::new(LayerState::new(
            &mut state_builder,
            String::from(name),
            String::from(name),
            Address::Account(MINTER),
        )))
    }

    #[concordium_test]
    fn test_init() {
        let host = default_host();
        let ctx = TestReceiveContext::empty();

        claim_eq!(name(&ctx, &host), Ok(String::from("BasePortrait")));
        claim_eq!(symbol(&ctx, &host), Ok(String::from("BaseP")));
        claim_eq!(minter(&ctx, &host), Ok(Address::Account(MINTER)));

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&Accessory::Body);
        ctx.set_parameter(&bytes);
        claim_eq!(accessory_layer(&ctx, &host), Ok(Address::Contract(BODY)));

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&Accessory::Head);
        ctx.set_parameter(&bytes);
        claim_eq!(accessory_layer(&ctx, &host), Ok(Address::Account(HEAD)));
    }

    #[concordium_test]
    fn test_accessory_layer_unknown_slot() {
        let host = default_host();

        let mut ctx = TestReceiveContext::empty();
        let bytes = [4u8];
        ctx.set_parameter(&bytes);

        claim_eq!(
            accessory_layer(&ctx, &host),
            Err(ContractError::Custom(CustomContractError::ParseParams))
        );
    }

    #[concordium_test]
    fn test_metadata_of_fresh_portrait() {
        let host = default_host();

        let metadata = metadata_of(&host, 1).expect_report("Metadata should exist");
        claim_eq!(metadata, PortraitMetadata::default());
        claim_eq!(metadata.slots(), [EMPTY_SLOT; 4]);

        claim_eq!(metadata_of(&host, 2), Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_combine_invalid_length() {
        let mut host = default_host();

        let (result, _) = call_combine(&mut host, ALICE, &combine_params(vec![], vec![]));
        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvalidLength)));

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Eye], vec![]));
        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvalidLength)));

        claim!(!host.state().is_combined(&TokenIdU32(1)));
    }

    #[concordium_test]
    fn test_combine_not_owner() {
        let mut host = default_host();

        let (result, logger) =
            call_combine(&mut host, BOB, &combine_params(vec![Accessory::Eye], vec![1]));

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::NotOwner)));
        claim!(logger.logs.is_empty());
    }

    #[concordium_test]
    fn test_combine_repeated_slot() {
        let mut host = default_host();

        let (result, _) = call_combine(
            &mut host,
            ALICE,
            &combine_params(vec![Accessory::Eye, Accessory::Eye], vec![1, 2]),
        );

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::AlreadyCombined)));
    }

    #[concordium_test]
    fn test_combine_twice() {
        let mut host = default_host();
        host.setup_mock_entrypoint(
            EYE,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            accept_mock::<TransferParameter, _>(),
        );
        let params = combine_params(vec![Accessory::Eye], vec![1]);

        let (result, _) = call_combine(&mut host, ALICE, &params);
        claim_eq!(result, Ok(()));

        let (result, _) = call_combine(&mut host, ALICE, &params);
        claim_eq!(result, Err(ContractError::Custom(CustomContractError::AlreadyCombined)));
    }

    #[concordium_test]
    fn test_combine_empty_accessory_id() {
        let mut host = default_host();

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Body], vec![0]));

        claim_eq!(result, Err(ContractError::InvalidTokenId));
    }

    #[concordium_test]
    fn test_combine_slot_wired_to_account() {
        let mut host = default_host();

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Mouth], vec![1]));

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvalidAccessory)));
        claim!(!host.state().is_combined(&TokenIdU32(1)));
    }

    #[concordium_test]
    fn test_combine_pulls_from_sender() {
        let mut host = default_host();
        host.setup_mock_entrypoint(
            BODY,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            check_mock::<TransferParameter, _>(|TransferParams(transfers)| {
                transfers.len() == 1
                    && transfers[0].token_id == TokenIdU32(5)
                    && transfers[0].from == Address::Account(ALICE)
                    && transfers[0].to.address() == Address::Contract(PORTRAIT)
            }),
        );

        let (result, logger) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Body], vec![5]));

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Combined(CombinedEvent {
                token_id: TokenIdU32(1),
                types: vec![Accessory::Body],
                accessory_ids: vec![TokenIdU32(5)],
            }))]
        );
    }

    #[concordium_test]
    fn test_combine_rejected_transfer() {
        let mut host = default_host();
        host.setup_mock_entrypoint(
            EYE,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            check_mock::<TransferParameter, _>(|_| false),
        );

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Eye], vec![1]));

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvokeContractError)));
    }

    #[concordium_test]
    fn test_combine_end_to_end() {
        let mut host = default_host();
        let eye = accessory_ledger("BaseEye");
        let body = accessory_ledger("BaseBody");

        for ledger in [&eye, &body] {
            let mut ledger = ledger.borrow_mut();
            let token_id = ledger
                .mint(Address::Account(ALICE))
                .expect_report("Accessory mint failed");
            ledger
                .approve(&Address::Account(ALICE), Address::Contract(PORTRAIT), token_id)
                .expect_report("Accessory approve failed");
        }

        for (layer, ledger) in [(EYE, &eye), (BODY, &body)] {
            host.setup_mock_entrypoint(
                layer,
                OwnedEntrypointName::new_unchecked("transfer".into()),
                hooked_transfer_mock(
                    ledger.clone(),
                    Address::Contract(PORTRAIT),
                    move |state: &State<TestStateApi>, params| {
                        params.from == Address::Account(ALICE)
                            && params.token_id == TokenIdU32(1)
                            && state.receive_accessory(&Address::Contract(layer)).is_ok()
                    },
                ),
            );
        }

        let (result, logger) = call_combine(
            &mut host,
            ALICE,
            &combine_params(vec![Accessory::Eye, Accessory::Body], vec![1, 1]),
        );

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&CustomEvent::Combined(CombinedEvent {
                token_id: TokenIdU32(1),
                types: vec![Accessory::Eye, Accessory::Body],
                accessory_ids: vec![TokenIdU32(1), TokenIdU32(1)],
            }))]
        );

        let metadata = metadata_of(&host, 1).expect_report("Metadata should exist");
        claim_eq!(metadata.tier, 0);
        claim_eq!(
            metadata.slots(),
            [TokenIdU32(1), TokenIdU32(1), EMPTY_SLOT, EMPTY_SLOT]
        );
        claim_eq!(*metadata.slot(Accessory::Body), TokenIdU32(1));
        claim_eq!(*metadata.slot(Accessory::Head), EMPTY_SLOT);

        claim_eq!(
            eye.borrow().owner_of(&TokenIdU32(1)),
            Some(Address::Contract(PORTRAIT))
        );
        claim_eq!(
            body.borrow().owner_of(&TokenIdU32(1)),
            Some(Address::Contract(PORTRAIT))
        );
    }

    #[concordium_test]
    fn test_combine_from_unwired_layer() {
        let mut host = default_host();
        let eye = accessory_ledger("BaseEye");
        {
            let mut eye = eye.borrow_mut();
            let token_id = eye
                .mint(Address::Account(ALICE))
                .expect_report("Accessory mint failed");
            eye.approve(&Address::Account(ALICE), Address::Contract(PORTRAIT), token_id)
                .expect_report("Accessory approve failed");
        }

        // The token arrives from a contract the portrait layer does not know.
        let stranger = ContractAddress {
            index: 9,
            subindex: 0,
        };
        host.setup_mock_entrypoint(
            EYE,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            hooked_transfer_mock(
                eye.clone(),
                Address::Contract(PORTRAIT),
                move |state: &State<TestStateApi>, _| {
                    state.receive_accessory(&Address::Contract(stranger)).is_ok()
                },
            ),
        );

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Eye], vec![1]));

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvokeContractError)));
    }

    #[concordium_test]
    fn test_combine_without_approval() {
        let mut host = default_host();
        let eye = accessory_ledger("BaseEye");
        eye.borrow_mut()
            .mint(Address::Account(ALICE))
            .expect_report("Accessory mint failed");

        host.setup_mock_entrypoint(
            EYE,
            OwnedEntrypointName::new_unchecked("transfer".into()),
            ledger_transfer_mock(eye.clone(), Address::Contract(PORTRAIT)),
        );

        let (result, _) =
            call_combine(&mut host, ALICE, &combine_params(vec![Accessory::Eye], vec![1]));

        claim_eq!(result, Err(ContractError::Custom(CustomContractError::InvokeContractError)));
        claim_eq!(
            eye.borrow().owner_of(&TokenIdU32(1)),
            Some(Address::Account(ALICE))
        );
    }

    #[concordium_test]
    fn test_on_receiving_cis2() {
        let host = default_host();
        let bytes = to_bytes(&ContractOnReceivingParams {
            token_id: TokenIdU32(1),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(ALICE),
            data: AdditionalData::empty(),
        });

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(EYE)).set_parameter(&bytes);
        claim_eq!(on_receiving_cis2(&ctx, &host), Ok(()));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Contract(ContractAddress {
            index: 9,
            subindex: 0,
        }))
        .set_parameter(&bytes);
        claim_eq!(on_receiving_cis2(&ctx, &host), Err(ContractError::Unauthorized));

        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(MOUTH)).set_parameter(&bytes);
        claim_eq!(on_receiving_cis2(&ctx, &host), Err(ContractError::Unauthorized));
    }
}
