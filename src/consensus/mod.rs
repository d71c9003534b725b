// SPDX-License-Identifier: CC0-1.0

//! Consensus-critical encoding and chain parameters.
//!
//! `encode` holds the serialization primitives the genesis block and header
//! hashing need; `params` holds [`ChainParameters`](params::ChainParameters)
//! itself.

pub mod encode;
pub mod params;

pub use self::encode::{Encodable, VarInt};
