// SPDX-License-Identifier: CC0-1.0

//! Network-identity types.
//!
//! Everything networking-proper (magic-byte framing, peer handshakes, DNS
//! seed resolution) lives outside this crate; all we keep here is the
//! [`constants::Network`] enum used to select which [`ChainParameters`] to
//! build.
//!
//! [`ChainParameters`]: crate::consensus::params::ChainParameters

pub mod constants;
