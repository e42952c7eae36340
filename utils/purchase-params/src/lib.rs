//! Off-chain helpers for the portrait and accessory layer contracts.
//!
//! The centre piece is the purchase parameter generator: it draws random
//! portrait and accessory mint requests across every box type and computes
//! the ether price a purchasing contract has to charge for them, using the
//! price tables shared with the contracts through `commons`.
//!
//! ```
//! use purchase_params::PurchaseGenerator;
//!
//! let mut generator = PurchaseGenerator::seeded(7);
//! let params = generator.generate().unwrap();
//! assert_eq!(params.ether_price, params.expected_price().unwrap());
//! ```

pub mod address;
pub mod blob;
pub mod error;
pub mod generator;
pub mod random;

pub use address::{generate_random_address, random_address};
pub use blob::{make_accessory_minting_blob, make_portrait_minting_blob};
pub use error::{Error, Result};
pub use generator::{
    generate_purchase_params, AccessoryFullRandomMintParams, AccessorySemiRandomMintParams,
    PortraitMintParams, PurchaseBounds, PurchaseGenerator, PurchaseParams,
};
pub use random::{random_element, random_element_with_index, random_int};
