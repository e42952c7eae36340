//! It exposes all common structs, types and the token ledger shared by the
//! portrait and accessory layer contracts.
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::{
    blob::*,
    constants::*,
    errors::*,
    layer::{ApprovalEvent, HasLayer, LayerEvent, LayerState},
    pricing::*,
    structs::*,
    types::*,
};
use concordium_cis2::*;
use concordium_std::*;

pub mod test;

mod blob;
mod constants;
mod errors;
pub mod layer;
mod pricing;
mod structs;
mod types;
