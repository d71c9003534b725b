// SPDX-License-Identifier: CC0-1.0

//! Height-gated header-hash algorithm selection.
//!
//! Every block before a network's `neo_scrypt_fork` timestamp has its
//! proof-of-work checked with classic scrypt; every block at or after it
//! uses NeoScrypt. NeoScrypt itself is a distinct memory-hard transform this
//! crate treats as an external collaborator — callers who need to check
//! post-fork proof-of-work supply their own [`HeaderHasher`]. This is
//! unrelated to a block's identifying hash (`Header::block_hash`, always
//! `sha256d`); all three shipped genesis blocks predate every network's
//! fork, so the concrete [`Scrypt`] hasher below is enough to check their
//! proof-of-work.

use crate::pow::Uint256;
use scrypt::Params;

/// Which proof-of-work hash function a header at a given time is evaluated
/// under.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Algorithm {
    /// Classic `scrypt(N=1024, r=1, p=1, dklen=32)`.
    Scrypt,
    /// The post-fork memory-hard successor function. This crate does not
    /// implement its internal transform; see [`HeaderHasher`].
    NeoScrypt,
}

/// Picks the algorithm a header with timestamp `time` is evaluated under,
/// given a network's two fork timestamps.
///
/// The transitional window `[neo_scrypt_switch, neo_scrypt_fork)` still
/// resolves to `Scrypt`: the selector is total, every timestamp maps to
/// exactly one algorithm, and no live chain has blocks in that instant gap.
pub fn algorithm_for_time(time: u32, neo_scrypt_fork: u32) -> Algorithm {
    if time >= neo_scrypt_fork {
        Algorithm::NeoScrypt
    } else {
        Algorithm::Scrypt
    }
}

/// Computes a block header's proof-of-work hash from its 80-byte legacy
/// serialization.
pub trait HeaderHasher {
    /// Hashes the 80-byte serialized header, returning it as a big-endian
    /// 256-bit integer ready to compare against a [`Target`](crate::pow::Target).
    fn hash_header(&self, header_bytes: &[u8; 80]) -> Uint256;
}

/// The concrete, fully-implemented scrypt leg of [`HeaderHasher`]:
/// `scrypt(N=1024, r=1, p=1, dklen=32)`, the parameters every Litecoin-family
/// coin used before switching to a memory-hard successor function.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scrypt;

impl HeaderHasher for Scrypt {
    fn hash_header(&self, header_bytes: &[u8; 80]) -> Uint256 {
        // log2(N) = 10, r = 1, p = 1, 32-byte output: the classic Litecoin
        // scrypt parameters.
        let params = Params::new(10, 1, 1, 32).expect("fixed scrypt parameters are always valid");
        let mut out = [0u8; 32];
        scrypt::scrypt(header_bytes, header_bytes, &params, &mut out)
            .expect("fixed-size scrypt output buffer never errors");
        // The hash is produced little-endian (as every Scrypt-coin's header
        // hash is byte-for-byte reversed relative to big-endian target
        // comparison); reverse it before treating it as a big-endian integer.
        out.reverse();
        Uint256::from_be_bytes(out)
    }
}
