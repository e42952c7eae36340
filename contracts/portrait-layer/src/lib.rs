//! Portrait layer: a CIS-2 collection of portraits that can be dressed with
//! accessory tokens.
//!
//! # Description
//! The contract is initialized with a name, a symbol, a minter and one
//! accessory layer address for each of the eye, body, mouth and head slots.
//! Portraits are minted, approved and transferred exactly like accessories.
//!
//! The holder of a portrait can `combine` it once with a set of accessories.
//! The chosen accessory ids are written to the portrait metadata and the
//! accessory tokens are moved from the holder into this contract, which is
//! why the holder has to approve this contract on each accessory layer first.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, structs::*};
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod events;
mod impls;
mod structs;
