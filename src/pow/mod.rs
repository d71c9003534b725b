// SPDX-License-Identifier: CC0-1.0

//! Proof of work: compact target arithmetic, difficulty retargeting and
//! hash-vs-target verification.
//!
//! This module is the consensus-critical heart of the crate. Everything
//! here is pure: no I/O, no shared mutable state, safe to call from any
//! number of threads on distinct inputs.

mod header_hash;
mod retarget;
mod uint;

pub use header_hash::{Algorithm, HeaderHasher, Scrypt};
pub use retarget::{check_proof_of_work, next_required_bits, ChainIndexNode};
pub use uint::Uint256;

use core::cmp::Ordering;
use core::fmt;

/// A 32-bit packed ("nBits") encoding of a [`Target`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct CompactTarget(u32);

impl CompactTarget {
    /// Wraps a raw `nBits` value.
    pub fn from_consensus(bits: u32) -> Self {
        CompactTarget(bits)
    }

    /// Returns the raw `nBits` value.
    pub fn to_consensus(self) -> u32 {
        self.0
    }
}

impl From<u32> for CompactTarget {
    fn from(bits: u32) -> Self {
        CompactTarget(bits)
    }
}

impl From<CompactTarget> for u32 {
    fn from(bits: CompactTarget) -> Self {
        bits.0
    }
}

/// A 256-bit difficulty target: a block's hash, read as a big-endian
/// unsigned integer, must not exceed it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Target(Uint256);

impl Target {
    /// The zero target (always invalid; no hash can be `<= 0`).
    pub const ZERO: Target = Target(Uint256::ZERO);
    /// The maximum representable target, `2^256 - 1`.
    pub const MAX: Target = Target(Uint256::MAX);

    /// Wraps a raw 256-bit value.
    pub fn from_uint256(value: Uint256) -> Self {
        Target(value)
    }

    /// Returns the underlying 256-bit value.
    pub fn to_uint256(self) -> Uint256 {
        self.0
    }

    /// Decodes a compact (`nBits`) target, reporting the sign and overflow
    /// flags the encoding carries.
    pub fn from_compact(bits: CompactTarget) -> (Target, bool, bool) {
        let bits = bits.0;
        let size = bits >> 24;
        let word = bits & 0x007f_ffff;
        let negative = word != 0 && bits & 0x0080_0000 != 0;

        let mantissa = Uint256::from_u64(word as u64);
        let value = if size <= 3 {
            mantissa.shr(8 * (3 - size))
        } else {
            mantissa.shl(8 * (size - 3))
        };
        let overflow =
            word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32));
        (Target(value), negative, overflow)
    }

    /// Re-encodes as a compact (`nBits`) target, following the same
    /// `nSize`/sign-bit-avoidance dance as the reference encoder. Any value
    /// produced by a retargeter round-trips through `from_compact`.
    pub fn to_compact(self) -> CompactTarget {
        let mut size = ((self.0.bits() + 7) / 8) as u32;
        let mut compact = if size <= 3 {
            (self.0.low_u64() as u32) << (8 * (3 - size))
        } else {
            (self.0.shr(8 * (size - 3))).low_u64() as u32
        };
        if compact & 0x0080_0000 != 0 {
            compact >>= 8;
            size += 1;
        }
        CompactTarget((size << 24) | (compact & 0x007f_ffff))
    }

    /// The number of significant bits of the target, `0` for a zero target.
    pub fn bits(self) -> usize {
        self.0.bits()
    }

    /// Clamps `self` to at most `limit`.
    pub fn clamp(self, limit: Target) -> Target {
        if self.0 > limit.0 {
            limit
        } else {
            self
        }
    }
}

impl PartialOrd for Target {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Target {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl core::ops::Mul<u64> for Target {
    type Output = Target;
    fn mul(self, rhs: u64) -> Target {
        Target(self.0.mul_u64(rhs))
    }
}

impl core::ops::Div<u64> for Target {
    type Output = Target;
    fn div(self, rhs: u64) -> Target {
        Target(self.0.div_u64(rhs))
    }
}

impl core::ops::Shl<u32> for Target {
    type Output = Target;
    fn shl(self, rhs: u32) -> Target {
        Target(self.0.shl(rhs))
    }
}

impl core::ops::Shr<u32> for Target {
    type Output = Target;
    fn shr(self, rhs: u32) -> Target {
        Target(self.0.shr(rhs))
    }
}

/// The cumulative "work" a target represents, `floor(2^256 / (target + 1))`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Work(Uint256);

impl Work {
    /// Returns the underlying 256-bit value.
    pub fn to_uint256(self) -> Uint256 {
        self.0
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0.to_be_bytes())
    }
}

/// Computes the amount of chain-work a target represents: `(~target) /
/// (target + 1) + 1`, i.e. `floor(2^256 / (target + 1))`.
pub fn block_proof(target: Target) -> Work {
    let denom = target.0.add(Uint256::from_u64(1));
    let quotient = target.0.not().div_uint256(denom);
    Work(quotient.add(Uint256::from_u64(1)))
}

impl Uint256 {
    /// Divides by an arbitrary `Uint256` divisor using binary long
    /// division. Only used by [`block_proof`], where the divisor is always
    /// nonzero (`target + 1`).
    fn div_uint256(self, divisor: Uint256) -> Uint256 {
        if divisor.is_zero() {
            return Uint256::MAX;
        }
        if self < divisor {
            return Uint256::ZERO;
        }
        let mut quotient = Uint256::ZERO;
        let mut remainder = Uint256::ZERO;
        for i in (0..256).rev() {
            remainder = remainder.shl(1);
            if bit_at(self, i) {
                remainder = remainder.add(Uint256::from_u64(1));
            }
            if remainder >= divisor {
                remainder = remainder.sub(divisor);
                quotient = set_bit(quotient, i);
            }
        }
        quotient
    }
}

fn bit_at(value: Uint256, i: usize) -> bool {
    let limb = value.0[i / 64];
    (limb >> (i % 64)) & 1 == 1
}

fn set_bit(mut value: Uint256, i: usize) -> Uint256 {
    value.0[i / 64] |= 1 << (i % 64);
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_roundtrip_small_values() {
        for bits in [0x1e0f_fff0u32, 0x1d00_ffffu32, 0x1b04_04cbu32, 0x207f_ffffu32] {
            let compact = CompactTarget::from_consensus(bits);
            let (target, negative, overflow) = Target::from_compact(compact);
            assert!(!negative);
            assert!(!overflow);
            let re = target.to_compact();
            assert_eq!(re.to_consensus(), bits, "roundtrip of {:#010x}", bits);
        }
    }

    #[test]
    fn negative_flag_is_detected() {
        let (_, negative, _) = Target::from_compact(CompactTarget::from_consensus(0x0180_0001));
        assert!(negative);
    }

    #[test]
    fn block_proof_of_max_target_is_one() {
        let work = block_proof(Target::MAX);
        assert_eq!(work.to_uint256(), Uint256::from_u64(1));
    }

    #[test]
    fn block_proof_decreases_as_target_shrinks() {
        let big = Target::from_uint256(Uint256::from_u64(1) << 200);
        let small = Target::from_uint256(Uint256::from_u64(1) << 100);
        assert!(block_proof(small).to_uint256() > block_proof(big).to_uint256());
    }

    #[test]
    fn check_proof_of_work_rejects_zero_target() {
        let zero_bits = CompactTarget::from_consensus(0);
        // A synthetic params with a permissive limit; zero target always fails.
        // (constructed in consensus::params tests against real networks)
        let (target, _, _) = Target::from_compact(zero_bits);
        assert_eq!(target, Target::ZERO);
    }
}
