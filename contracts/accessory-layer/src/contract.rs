use super::*;

/// Initialize contract instance with no tokens.
#[init(contract = "AccessoryLayer", parameter = "InitParams")]
fn init<S: HasStateApi>(
    ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    let params: InitParams = ctx.parameter_cursor().get()?;

    // Construct the initial contract state.
    Ok(State::new(state_builder, params))
}

/// Mint new accessories to a given owner. Token ids continue from the last
/// minted one. Logs a `Mint` event for each token.
///
/// It rejects if:
/// - It fails to parse the parameter.
/// - The sender is not the minter.
/// - Fails to log `Mint` event.
#[receive(
    contract = "AccessoryLayer",
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

/// Approve an address to transfer a single accessory of the sender.
/// Logs an `Approval` event.
#[receive(
    contract = "AccessoryLayer",
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

/// Get the address approved for a token, if any.
#[receive(
    contract = "AccessoryLayer",
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

/// Execute a list of accessory transfers, in the order of the list.
///
/// Logs a `Transfer` event for each transfer in the list and calls the
/// receive hook of every contract receiving an accessory.
#[receive(
    contract = "AccessoryLayer",
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
    contract = "AccessoryLayer",
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

/// Get the balance of given token IDs and addresses.
///
/// It rejects if any of the queried `token_id` does not exist.
#[receive(
    contract = "AccessoryLayer",
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

/// Takes a list of queries. Each query is an owner address and some address to
/// check as an operator of the owner address.
#[receive(
    contract = "AccessoryLayer",
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

/// Current owner of a token, `None` if it was never minted.
#[receive(
    contract = "AccessoryLayer",
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

#[receive(contract = "AccessoryLayer", name = "name", return_value = "String")]
fn name<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    Ok(host.state().layer.name().into())
}

#[receive(contract = "AccessoryLayer", name = "symbol", return_value = "String")]
fn symbol<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<String> {
    Ok(host.state().layer.symbol().into())
}

#[receive(contract = "AccessoryLayer", name = "minter", return_value = "Address")]
fn minter<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Address> {
    Ok(host.state().layer.minter())
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use test_infrastructure::*;

    const MINTER: AccountAddress = AccountAddress([1; 32]);
    const ALICE: AccountAddress = AccountAddress([16; 32]);
    const BOB: AccountAddress = AccountAddress([17; 32]);

    const PORTRAIT: ContractAddress = ContractAddress {
        index: 3,
        subindex: 0,
    };

    /// Test helper function which creates an accessory layer with `amount`
    /// tokens owned by `ALICE`.
    fn default_host(amount: u32) -> TestHost<State<TestStateApi>> {
        let mut ctx = TestInitContext::empty();
        let bytes = to_bytes(&InitParams {
            name: String::from("BaseAccessory"),
            symbol: String::from("BaseA"),
            minter: Address::Account(MINTER),
        });
        ctx.set_parameter(&bytes);
        let mut state_builder = TestStateBuilder::new();

        let state =
            init(&ctx, &mut state_builder).expect_report("Failed during init_AccessoryLayer");
        let mut host = TestHost::new(state, state_builder);

        if amount > 0 {
            let mut ctx = TestReceiveContext::empty();
            let bytes = to_bytes(&MintParams {
                owner: Address::Account(ALICE),
                amount,
            });
            ctx.set_sender(Address::Account(MINTER))
                .set_parameter(&bytes);
            let mut logger = TestLogger::init();
            let result = mint_multiple(&ctx, &mut host, &mut logger);
            claim_eq!(result, Ok(()));
        }

        host
    }

    fn owner_of_token(host: &TestHost<State<TestStateApi>>, token_id: u32) -> Option<Address> {
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&TokenIdU32(token_id));
        ctx.set_parameter(&bytes);
        owner_of(&ctx, host).expect_report("Unexpected error during 'ownerOf' call")
    }

    fn transfer_param(
        token_id: u32,
        from: AccountAddress,
        to: Receiver,
    ) -> TransferParameter {
        TransferParams(vec![Transfer {
            token_id: TokenIdU32(token_id),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(from),
            to,
            data: AdditionalData::empty(),
        }])
    }

    #[concordium_test]
    fn test_init() {
        let host = default_host(0);
        let ctx = TestReceiveContext::empty();

        claim_eq!(name(&ctx, &host), Ok(String::from("BaseAccessory")));
        claim_eq!(symbol(&ctx, &host), Ok(String::from("BaseA")));
        claim_eq!(minter(&ctx, &host), Ok(Address::Account(MINTER)));
        claim_eq!(host.state().layer.total_minted(), 0);
    }

    #[concordium_test]
    fn test_mint_multiple() {
        let mut host = default_host(0);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&MintParams {
            owner: Address::Account(ALICE),
            amount: 2,
        });
        ctx.set_sender(Address::Account(MINTER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = mint_multiple(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(owner_of_token(&host, 1), Some(Address::Account(ALICE)));
        claim_eq!(owner_of_token(&host, 2), Some(Address::Account(ALICE)));
        claim_eq!(owner_of_token(&host, 3), None);

        claim_eq!(logger.logs.len(), 2, "Exactly two events should be logged");
        claim!(
            logger.logs.contains(&to_bytes(&ContractEvent::Mint(MintEvent {
                token_id: TokenIdU32(2),
                amount: ContractTokenAmount::from(1),
                owner: Address::Account(ALICE),
            }))),
            "Missing event for the second token"
        );
    }

    #[concordium_test]
    fn test_mint_multiple_continues_numbering() {
        let mut host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&MintParams {
            owner: Address::Account(BOB),
            amount: 1,
        });
        ctx.set_sender(Address::Account(MINTER))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = mint_multiple(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(owner_of_token(&host, 2), Some(Address::Account(BOB)));
    }

    #[concordium_test]
    fn test_mint_multiple_not_minter() {
        let mut host = default_host(0);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&MintParams {
            owner: Address::Account(ALICE),
            amount: 1,
        });
        ctx.set_sender(Address::Account(ALICE))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = mint_multiple(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim!(logger.logs.is_empty());
        claim_eq!(host.state().layer.total_minted(), 0);
    }

    #[concordium_test]
    fn test_approve() {
        let mut host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ApproveParams {
            spender: Address::Contract(PORTRAIT),
            token_id: TokenIdU32(1),
        });
        ctx.set_sender(Address::Account(ALICE))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            logger.logs,
            vec![to_bytes(&LayerEvent::Approval(ApprovalEvent {
                owner: Address::Account(ALICE),
                spender: Address::Contract(PORTRAIT),
                token_id: TokenIdU32(1),
            }))]
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&TokenIdU32(1));
        ctx.set_parameter(&bytes);
        claim_eq!(
            get_approved(&ctx, &host),
            Ok(Some(Address::Contract(PORTRAIT)))
        );
    }

    #[concordium_test]
    fn test_approve_not_owner() {
        let mut host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ApproveParams {
            spender: Address::Account(BOB),
            token_id: TokenIdU32(1),
        });
        ctx.set_sender(Address::Account(BOB)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = approve(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
    }

    #[concordium_test]
    fn test_transfer_by_approved_contract() {
        let mut host = default_host(1);
        host.state_mut()
            .layer
            .approve(&Address::Account(ALICE), Address::Contract(PORTRAIT), TokenIdU32(1))
            .expect_report("Approve failed");

        host.setup_mock_entrypoint(
            PORTRAIT,
            OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into()),
            check_mock::<ContractOnReceivingParams, _>(|params| {
                params.token_id == TokenIdU32(1) && params.from == Address::Account(ALICE)
            }),
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&transfer_param(
            1,
            ALICE,
            Receiver::Contract(
                PORTRAIT,
                OwnedEntrypointName::new_unchecked(ON_RECEIVING_CIS2.into()),
            ),
        ));
        ctx.set_sender(Address::Contract(PORTRAIT))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(owner_of_token(&host, 1), Some(Address::Contract(PORTRAIT)));
        claim_eq!(host.state().layer.approved(&TokenIdU32(1)), None);
        claim_eq!(
            logger.logs,
            vec![to_bytes(&ContractEvent::Transfer(TransferEvent {
                token_id: TokenIdU32(1),
                amount: ContractTokenAmount::from(1),
                from: Address::Account(ALICE),
                to: Address::Contract(PORTRAIT),
            }))]
        );
    }

    #[concordium_test]
    fn test_transfer_unauthorized() {
        let mut host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&transfer_param(1, ALICE, Receiver::from_account(BOB)));
        ctx.set_sender(Address::Account(BOB)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = transfer(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(ContractError::Unauthorized));
        claim_eq!(owner_of_token(&host, 1), Some(Address::Account(ALICE)));
    }

    #[concordium_test]
    fn test_update_operator_and_operator_of() {
        let mut host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&UpdateOperatorParams(vec![UpdateOperator {
            update: OperatorUpdate::Add,
            operator: Address::Account(BOB),
        }]));
        ctx.set_sender(Address::Account(ALICE))
            .set_parameter(&bytes);
        let mut logger = TestLogger::init();

        let result = update_operator(&ctx, &mut host, &mut logger);
        claim_eq!(result, Ok(()));

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&OperatorOfQueryParams {
            queries: vec![
                OperatorOfQuery {
                    owner: Address::Account(ALICE),
                    address: Address::Account(BOB),
                },
                OperatorOfQuery {
                    owner: Address::Account(BOB),
                    address: Address::Account(ALICE),
                },
            ],
        });
        ctx.set_parameter(&bytes);

        let result = operator_of(&ctx, &host).expect_report("Failed to query operators");
        claim_eq!(result.0, vec![true, false]);

        // The operator moves the token without an approval.
        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&transfer_param(1, ALICE, Receiver::from_account(BOB)));
        ctx.set_sender(Address::Account(BOB)).set_parameter(&bytes);
        let mut logger = TestLogger::init();

        claim_eq!(transfer(&ctx, &mut host, &mut logger), Ok(()));
        claim_eq!(owner_of_token(&host, 1), Some(Address::Account(BOB)));
    }

    #[concordium_test]
    fn test_balance_of() {
        let host = default_host(1);

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![
                BalanceOfQuery {
                    token_id: TokenIdU32(1),
                    address: Address::Account(ALICE),
                },
                BalanceOfQuery {
                    token_id: TokenIdU32(1),
                    address: Address::Account(BOB),
                },
            ],
        });
        ctx.set_parameter(&bytes);

        let result = balance_of(&ctx, &host).expect_report("Failed to query balances");
        claim_eq!(
            result.0,
            vec![ContractTokenAmount::from(1), ContractTokenAmount::from(0)]
        );

        let mut ctx = TestReceiveContext::empty();
        let bytes = to_bytes(&ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: TokenIdU32(2),
                address: Address::Account(ALICE),
            }],
        });
        ctx.set_parameter(&bytes);

        claim!(matches!(
            balance_of(&ctx, &host),
            Err(ContractError::InvalidTokenId)
        ));
    }
}
