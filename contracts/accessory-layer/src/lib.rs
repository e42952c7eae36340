//! Accessory layer: a CIS-2 collection of unique accessory tokens.
//!
//! # Description
//! The contract is initialized with a name, a symbol and a minter and no
//! tokens. Only the minter can create tokens, through `mintMultiple`, which
//! numbers them sequentially from 1.
//!
//! Besides the CIS-2 operators a holder can `approve` a single address for a
//! single token. A portrait layer relies on this to pull the accessory in when
//! the holder combines it into a portrait.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::structs::*;
use commons::*;
use concordium_cis2::*;
use concordium_std::*;

mod contract;
mod impls;
mod structs;
