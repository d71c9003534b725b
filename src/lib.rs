// Written in 2014 by Andrew Poelstra <apoelstra@wpsoftware.net>
// SPDX-License-Identifier: CC0-1.0

//! # UFO consensus core
//!
//! This crate is the consensus-critical heart of a UFO full node: the
//! per-network [`ChainParameters`](consensus::params::ChainParameters) record
//! and the [`pow`] module that decides what the next block's difficulty
//! target must be and whether a claimed proof of work actually clears it.
//!
//! Everything else a full node needs — networking, mempool, wallet, RPC,
//! disk persistence — lives outside this crate and talks to it only through
//! the small, read-only contracts described in the `pow` module.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
pub(crate) mod prelude {
    pub use std::borrow::ToOwned;
    pub use std::string::{String, ToString};
    pub use std::vec::Vec;
    pub use std::collections::BTreeMap;
    pub use std::boxed::Box;
}

#[cfg(not(feature = "std"))]
pub(crate) mod prelude {
    pub use alloc::borrow::ToOwned;
    pub use alloc::string::{String, ToString};
    pub use alloc::vec::Vec;
    pub use alloc::collections::BTreeMap;
    pub use alloc::boxed::Box;
}

pub extern crate bitcoin_hashes as hashes;

#[macro_use]
mod internal_macros;

pub mod blockdata;
pub mod consensus;
pub mod hash_types;
pub mod network;
pub mod pow;

pub use crate::consensus::params::{ChainParameters, ParamsError};
#[cfg(feature = "std")]
pub use crate::consensus::params::{params, select_params};
pub use crate::network::constants::Network;
pub use crate::pow::{
    block_proof, check_proof_of_work, next_required_bits, ChainIndexNode, CompactTarget, Target,
    Work,
};
