/// Tag for the Approval event.
pub const APPROVAL_TAG: u8 = u8::MAX - 5;

/// Tag for the Combined event.
pub const COMBINED_TAG: u8 = u8::MAX - 6;

/// Price unit of the box tables: one hundredth of an ether, in wei.
pub const CENTIETHER: u128 = 10_000_000_000_000_000;

/// Entrypoint every layer contract exposes to accept incoming CIS-2 tokens.
pub const ON_RECEIVING_CIS2: &str = "onReceivingCIS2";

/// Size of the fixed-width accessory minting blob.
pub const BYTES32_LEN: usize = 32;
