//! Mock entrypoints standing in for other layer contracts in unit tests.
//! Contract crates enable them through the `mocks` feature.
#[cfg(feature = "mocks")]
pub use inner::*;

#[cfg(feature = "mocks")]
mod inner {
    use crate::{ContractOnReceivingParams, LayerState, TransferParameter};
    use alloc::rc::Rc;
    use concordium_cis2::{AdditionalData, Receiver, TransferParams};
    use concordium_std::test_infrastructure::{MockFn, TestStateApi};
    use concordium_std::*;
    use core::cell::RefCell;

    /// A ledger that lives outside the host under test, shared with a mock.
    pub type SharedLedger = Rc<RefCell<LayerState<TestStateApi>>>;

    /// Accept any call whose parameter parses as `D`.
    pub fn accept_mock<D: Deserial, S>() -> MockFn<S> {
        check_mock::<D, S>(|_| true)
    }

    /// Accept a call only if its parsed parameter passes `check`.
    pub fn check_mock<D: Deserial, S>(check: impl Fn(&D) -> bool + 'static) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, _state| {
            let value =
                D::deserial(&mut Cursor::new(parameter)).map_err(|_| CallContractError::Trap)?;
            ensure!(check(&value), CallContractError::Trap);
            Ok((false, Some(())))
        })
    }

    /// A `transfer` entrypoint backed by a real ledger. Every transfer in the
    /// parameter is applied on behalf of `sender`; the first failing one makes
    /// the call trap.
    pub fn ledger_transfer_mock<S>(ledger: SharedLedger, sender: Address) -> MockFn<S> {
        hooked_transfer_mock(ledger, sender, |_: &S, _| true)
    }

    /// Like `ledger_transfer_mock`, but every transfer to a contract also runs
    /// `on_receiving` against the calling host's state. A rejected hook traps
    /// the call.
    pub fn hooked_transfer_mock<S>(
        ledger: SharedLedger,
        sender: Address,
        on_receiving: impl Fn(&S, &ContractOnReceivingParams) -> bool + 'static,
    ) -> MockFn<S> {
        MockFn::new(move |parameter, _amount, _balance, state| {
            let TransferParams(transfers) = TransferParameter::deserial(&mut Cursor::new(parameter))
                .map_err(|_| CallContractError::Trap)?;
            let mut ledger = ledger.borrow_mut();
            for transfer in transfers.iter() {
                ledger
                    .transfer(&sender, transfer)
                    .map_err(|_| CallContractError::Trap)?;

                if let Receiver::Contract(..) = transfer.to {
                    let params = ContractOnReceivingParams {
                        token_id: transfer.token_id,
                        amount: transfer.amount,
                        from: transfer.from,
                        data: AdditionalData::from(transfer.data.as_ref().to_vec()),
                    };
                    ensure!(on_receiving(&*state, &params), CallContractError::Trap);
                }
            }
            Ok((false, Some(())))
        })
    }
}
