// SPDX-License-Identifier: CC0-1.0

//! Difficulty retargeting.
//!
//! Dispatches among three historical retarget algorithms by height (V1
//! legacy, V2 "gravity well", V3 "eHRC") and exposes the final
//! hash-vs-target check every header must clear.

use crate::blockdata::block::Header;
use crate::consensus::params::ChainParameters;
use crate::pow::{CompactTarget, Target, Uint256};

/// A read-only view of one node on the chain the retargeter walks backward
/// through. The retargeter never mutates a node and never holds onto one
/// past the call that received it.
pub trait ChainIndexNode {
    /// The node's height, `0` for genesis.
    fn height(&self) -> i32;
    /// The node's header timestamp.
    fn time(&self) -> u32;
    /// The node's packed difficulty target.
    fn bits(&self) -> CompactTarget;
    /// The node immediately before this one, or `None` at genesis.
    fn prev(&self) -> Option<&dyn ChainIndexNode>;
}

/// Returns the packed target the block after `tip` must satisfy.
///
/// Dispatches among V1 legacy, V2 gravity-well and V3 eHRC by height,
/// exactly reproducing the three algorithms' respective quirks (see the
/// per-algorithm doc comments below).
pub fn next_required_bits(
    tip: &dyn ChainIndexNode,
    candidate: &Header,
    params: &ChainParameters,
) -> CompactTarget {
    let h = tip.height() + 1;

    if h == params.hard_fork_three {
        return params.pow_limit.to_compact();
    }
    if params.hard_fork_three < h && h <= params.hard_fork_three + 10 {
        return v1_legacy(tip, candidate, params);
    }
    if params.hard_fork_three < h && h < params.hard_fork_four {
        return v2_gravity_well(tip, params);
    }
    if h >= params.hard_fork_four {
        return v3_ehrc(tip, params);
    }
    if tip.height() >= params.hard_fork_two {
        return v2_gravity_well(tip, params);
    }
    v1_legacy(tip, candidate, params)
}

/// The original Bitcoin-Core-style retarget: recompute every `interval`
/// blocks from the ratio of actual to target timespan, with a pre-fork/
/// post-`hard_fork_one` cadence switch and a min-difficulty escape hatch for
/// testnet/regtest.
fn v1_legacy(tip: &dyn ChainIndexNode, candidate: &Header, params: &ChainParameters) -> CompactTarget {
    let h = tip.height() + 1;
    let target_timespan_0 = params.pow_target_timespan as i64;
    let (target_timespan, retarget_history_factor): (i64, i64) =
        if h >= params.hard_fork_one { (3600, 2) } else { (target_timespan_0, 4) };
    let interval = target_timespan / params.pow_target_spacing as i64;
    let pow_limit_compact = params.pow_limit.to_compact();

    if (h as i64) % interval != 0 {
        if params.allow_min_difficulty_blocks {
            if candidate.time as i64 > tip.time() as i64 + 2 * params.pow_target_spacing as i64 {
                return pow_limit_compact;
            }
            let mut node = tip;
            loop {
                let can_continue = match node.prev() {
                    Some(_) => (node.height() as i64) % interval != 0 && node.bits() == pow_limit_compact,
                    None => false,
                };
                if !can_continue {
                    break;
                }
                node = node.prev().expect("checked Some above");
            }
            return node.bits();
        }
        return tip.bits();
    }

    let blocks_to_go_back: i64 = if (tip.height() as i64) > params.coin_fix as i64 {
        retarget_history_factor * interval
    } else if (tip.height() as i64) + 1 == interval {
        interval - 1
    } else {
        interval
    };

    let mut first: &dyn ChainIndexNode = tip;
    for _ in 0..blocks_to_go_back {
        first = first.prev().expect("chain index ran off the chain during a V1 retarget walk");
    }

    if params.no_retargeting {
        return tip.bits();
    }

    let mut actual_timespan = if (tip.height() as i64) > params.coin_fix as i64 {
        (tip.time() as i64 - first.time() as i64) / retarget_history_factor
    } else {
        tip.time() as i64 - first.time() as i64
    };
    actual_timespan = actual_timespan.clamp(target_timespan / 4, target_timespan * 4);

    let (decoded, _, _) = Target::from_compact(tip.bits());
    let fshift = decoded.bits() as i64 > (params.pow_limit.bits() as i64 - 1);
    let mut bn = decoded;
    if fshift {
        bn = bn >> 1;
    }
    bn = bn * (actual_timespan as u64) / (target_timespan as u64);
    if fshift {
        bn = bn << 1;
    }
    bn.clamp(params.pow_limit).to_compact()
}

/// The Kimoto gravity-well moving-average retarget: every block recomputes
/// from a windowed average of past targets, damped by an "event horizon"
/// deviation bound that widens as the window shrinks.
///
/// The intermediate average update subtracts two unsigned 256-bit values in
/// either order, so it must use wrapping (modulo-2^256) arithmetic exactly
/// like the original's `arith_uint256` rather than this crate's otherwise
/// saturating `Target` operators.
fn v2_gravity_well(tip: &dyn ChainIndexNode, params: &ChainParameters) -> CompactTarget {
    const V2_LIMIT_COMPACT: u32 = 504_365_055;
    let v2_limit_compact = CompactTarget::from_consensus(V2_LIMIT_COMPACT);
    let (v2_limit, _, _) = Target::from_compact(v2_limit_compact);

    let h = tip.height() + 1;
    let target_timespan = 3600.0_f64;
    let past_seconds_min =
        if h < params.hard_fork_two_a { 0.025 * target_timespan } else { 0.15 * target_timespan };
    let past_seconds_max = 7.0 * target_timespan;
    let past_blocks_min = (past_seconds_min / params.pow_target_spacing as f64) as i64;
    let past_blocks_max = (past_seconds_max / params.pow_target_spacing as f64) as i64;

    if tip.height() == 0 || (tip.height() as i64) < past_blocks_min {
        return v2_limit_compact;
    }

    let mut past_difficulty_average = Target::ZERO;
    let mut avg_prev = Target::ZERO;
    let mut latest_time = tip.time();
    let mut actual: i64 = 0;
    let mut target_secs: i64 = 0;
    let mut i: i64 = 1;
    let mut reading: &dyn ChainIndexNode = tip;

    loop {
        if i > past_blocks_max || reading.height() == 0 {
            break;
        }
        let (decoded, _, _) = Target::from_compact(reading.bits());
        past_difficulty_average = if i == 1 {
            decoded
        } else {
            let diff = decoded.to_uint256().wrapping_sub(avg_prev.to_uint256());
            let step = diff.div_u64(i as u64);
            Target::from_uint256(avg_prev.to_uint256().wrapping_add(step))
        };
        avg_prev = past_difficulty_average;

        if reading.time() > latest_time {
            latest_time = reading.time();
        }
        actual = latest_time as i64 - reading.time() as i64;
        if actual < 1 {
            actual = 5;
        }
        target_secs = params.pow_target_spacing as i64 * i;
        let ratio = target_secs as f64 / actual as f64;
        let event_horizon_base = if h >= params.hard_fork_two_a { 144.0 } else { 28.2 };
        let event_horizon = 1.0 + 0.7084 * (i as f64 / event_horizon_base).powf(-1.228);
        let event_horizon_slow = 1.0 / event_horizon;

        if i >= past_blocks_min && (ratio <= event_horizon_slow || ratio >= event_horizon) {
            break;
        }
        match reading.prev() {
            Some(p) => reading = p,
            None => break,
        }
        i += 1;
    }

    let new_target = past_difficulty_average.to_uint256().mul_u64(actual as u64).div_u64(target_secs as u64);
    Target::from_uint256(new_target).clamp(v2_limit).to_compact()
}

const V3_TARGET_TIMESPAN: i64 = 90;
const V3_SHORT_SAMPLE: i64 = 15;
const V3_MEDIUM_SAMPLE: i64 = 200;
const V3_LONG_SAMPLE: i64 = 1000;

/// The eHRC retarget: average the actual block interval over three windows
/// (15/200/1000 blocks), clamp the average to a tight ±9% band, and scale
/// the tip's target by it. Every block retargets, unlike V1.
fn v3_ehrc(tip: &dyn ChainIndexNode, params: &ChainParameters) -> CompactTarget {
    let h = tip.height() + 1;
    if (h as i64) <= V3_LONG_SAMPLE {
        return params.pow_limit.to_compact();
    }

    let mut time_short = 0u32;
    let mut time_medium = 0u32;
    let mut time_long = 0u32;
    let mut reading: &dyn ChainIndexNode = tip;
    for step in 1..=V3_LONG_SAMPLE {
        reading = reading.prev().expect("chain index ran off the chain during a V3 retarget walk");
        if step == V3_SHORT_SAMPLE {
            time_short = reading.time();
        }
        if step == V3_MEDIUM_SAMPLE {
            time_medium = reading.time();
        }
        if step == V3_LONG_SAMPLE {
            time_long = reading.time();
        }
    }

    let actual_short = (tip.time() as i64 - time_short as i64) / V3_SHORT_SAMPLE;
    let actual_medium = (tip.time() as i64 - time_medium as i64) / V3_MEDIUM_SAMPLE;
    let actual_long = (tip.time() as i64 - time_long as i64) / V3_LONG_SAMPLE;
    let mut actual = (actual_short + actual_medium + actual_long) / 3;

    let max = V3_TARGET_TIMESPAN * 494 / 453;
    let min = V3_TARGET_TIMESPAN * 453 / 494;
    actual = actual.clamp(min, max);

    let (decoded, _, _) = Target::from_compact(tip.bits());
    let new_target = decoded.to_uint256().mul_u64(actual as u64).div_u64(V3_TARGET_TIMESPAN as u64);
    Target::from_uint256(new_target).clamp(params.pow_limit).to_compact()
}

/// Validates a header's claimed hash against its claimed packed target:
/// the target must decode to a sane, non-overflowing, in-limit value, and
/// the hash (as a big-endian 256-bit integer) must not exceed it.
pub fn check_proof_of_work(hash: Uint256, bits: CompactTarget, params: &ChainParameters) -> bool {
    let (target, negative, overflow) = Target::from_compact(bits);
    if negative || target == Target::ZERO || overflow || target > params.pow_limit {
        return false;
    }
    hash <= target.to_uint256()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::params;

    /// A synthetic chain for exercising the retargeter without a real
    /// node: an owned linked list, since `ChainIndexNode::prev` must hand
    /// out a borrow living as long as the node itself.
    struct LinkedNode {
        height: i32,
        time: u32,
        bits: CompactTarget,
        prev: Option<crate::prelude::Box<LinkedNode>>,
    }

    impl ChainIndexNode for LinkedNode {
        fn height(&self) -> i32 {
            self.height
        }
        fn time(&self) -> u32 {
            self.time
        }
        fn bits(&self) -> CompactTarget {
            self.bits
        }
        fn prev(&self) -> Option<&dyn ChainIndexNode> {
            self.prev.as_deref().map(|n| n as &dyn ChainIndexNode)
        }
    }

    /// Builds a chain of `count` blocks (heights `0..count`), each
    /// `spacing` seconds apart, all mined at `bits`, genesis at height 0.
    fn build_chain(count: i32, spacing: u32, bits: CompactTarget) -> LinkedNode {
        let mut node = LinkedNode { height: 0, time: 1_000_000, bits, prev: None };
        for height in 1..count {
            node = LinkedNode {
                height,
                time: node.time + spacing,
                bits,
                prev: Some(crate::prelude::Box::new(node)),
            };
        }
        node
    }

    fn candidate_at(time: u32, params: &ChainParameters) -> Header {
        Header {
            version: 1,
            prev_blockhash: crate::hash_types::BlockHash::all_zeros(),
            merkle_root: crate::hash_types::TxMerkleNode::all_zeros(),
            time,
            bits: params.pow_limit.to_compact(),
            nonce: 0,
        }
    }

    #[test]
    fn regtest_never_retargets() {
        let params = params::regtest();
        // interval = 3600/600 = 6; six blocks puts h = tip.height+1 = 6 on
        // a retarget boundary, so this actually exercises the
        // `no_retargeting` short-circuit rather than the non-retarget path.
        let chain = build_chain(6, 600, params.pow_limit.to_compact());
        let candidate = candidate_at(chain.time + 1, &params);
        let bits = next_required_bits(&chain, &candidate, &params);
        assert_eq!(bits, chain.bits);
    }

    #[test]
    fn v1_non_retarget_block_keeps_tips_bits() {
        let params = params::main();
        // interval = 86400/90 = 960; a chain far from any multiple of the
        // interval and below hard_fork_one keeps the tip's bits unchanged.
        let chain = build_chain(2, 90, CompactTarget::from_consensus(0x1e0f_fff0));
        let candidate = candidate_at(chain.time + 90, &params);
        let bits = next_required_bits(&chain, &candidate, &params);
        assert_eq!(bits, chain.bits);
    }

    #[test]
    fn testnet_min_difficulty_escape_on_stale_candidate() {
        let params = params::testnet();
        let chain = build_chain(2, 90, CompactTarget::from_consensus(0x1d00_ffff));
        // candidate far enough in the future trips the min-difficulty escape.
        let candidate = candidate_at(chain.time + 2 * params.pow_target_spacing + 1, &params);
        let bits = next_required_bits(&chain, &candidate, &params);
        assert_eq!(bits, params.pow_limit.to_compact());
    }

    #[test]
    fn check_proof_of_work_rejects_target_above_limit() {
        let params = params::main();
        let bits = CompactTarget::from_consensus(0x2100_ffff); // decodes well above pow_limit
        let hash = Uint256::from_u64(1);
        assert!(!check_proof_of_work(hash, bits, &params));
    }

    #[test]
    fn check_proof_of_work_rejects_zero_target() {
        let params = params::main();
        let bits = CompactTarget::from_consensus(0);
        assert!(!check_proof_of_work(Uint256::ZERO, bits, &params));
    }

    #[test]
    fn check_proof_of_work_accepts_hash_at_or_below_target() {
        let params = params::main();
        let bits = params.pow_limit.to_compact();
        let (target, _, _) = Target::from_compact(bits);
        assert!(check_proof_of_work(target.to_uint256(), bits, &params));
        assert!(check_proof_of_work(Uint256::ZERO, bits, &params));
    }

    #[test]
    fn v3_below_long_sample_returns_pow_limit() {
        let params = params::main();
        let chain = build_chain(5, 90, CompactTarget::from_consensus(0x1e0f_fff0));
        let bits = v3_ehrc(&chain, &params);
        assert_eq!(bits, params.pow_limit.to_compact());
    }

    #[test]
    fn v2_at_genesis_tip_returns_v2_limit() {
        let params = params::main();
        let chain = build_chain(1, 90, CompactTarget::from_consensus(0x1e0f_fff0));
        let bits = v2_gravity_well(&chain, &params);
        assert_eq!(bits, CompactTarget::from_consensus(504_365_055));
    }

    /// Mainnet constants, but with small fork heights so a dispatch test can
    /// walk a short synthetic chain instead of mainnet's real heights
    /// (`hard_fork_three = 266000`, `hard_fork_four = 1182000`).
    fn dispatch_params(hard_fork_three: i32, hard_fork_four: i32) -> ChainParameters {
        ChainParameters { hard_fork_three, hard_fork_two_a: 1, hard_fork_four, ..params::main() }
    }

    #[test]
    fn dispatch_at_hard_fork_three_resets_to_pow_limit() {
        let params = dispatch_params(10, 25);
        // tip.height == 9 so h == tip.height + 1 == hard_fork_three.
        let chain = build_chain(10, 90, CompactTarget::from_consensus(0x1b04_04cb));
        let candidate = candidate_at(chain.time + 90, &params);
        assert_eq!(next_required_bits(&chain, &candidate, &params), params.pow_limit.to_compact());
    }

    #[test]
    fn dispatch_just_after_hard_fork_three_uses_v1() {
        let params = dispatch_params(10, 25);
        // tip.height == 10 so h == 11 == hard_fork_three + 1, inside the
        // 10-block V1 warm-up window.
        let chain = build_chain(11, 90, CompactTarget::from_consensus(0x1b04_04cb));
        let candidate = candidate_at(chain.time + 90, &params);
        assert_eq!(next_required_bits(&chain, &candidate, &params), v1_legacy(&chain, &candidate, &params));
    }

    #[test]
    fn dispatch_past_the_v1_warmup_uses_v2() {
        let params = dispatch_params(10, 25);
        // tip.height == 20 so h == 21 == hard_fork_three + 11, the first
        // block past the 10-block V1 warm-up and still below hard_fork_four.
        let chain = build_chain(21, 90, CompactTarget::from_consensus(0x1b04_04cb));
        let candidate = candidate_at(chain.time + 90, &params);
        assert_eq!(next_required_bits(&chain, &candidate, &params), v2_gravity_well(&chain, &params));
    }

    #[test]
    fn dispatch_one_block_before_hard_fork_four_uses_v2() {
        let params = dispatch_params(10, 25);
        // tip.height == 23 so h == 24 == hard_fork_four - 1.
        let chain = build_chain(24, 90, CompactTarget::from_consensus(0x1b04_04cb));
        let candidate = candidate_at(chain.time + 90, &params);
        assert_eq!(next_required_bits(&chain, &candidate, &params), v2_gravity_well(&chain, &params));
    }

    #[test]
    fn dispatch_at_hard_fork_four_uses_v3() {
        let params = dispatch_params(10, 25);
        // tip.height == 24 so h == 25 == hard_fork_four.
        let chain = build_chain(25, 90, CompactTarget::from_consensus(0x1b04_04cb));
        let candidate = candidate_at(chain.time + 90, &params);
        assert_eq!(next_required_bits(&chain, &candidate, &params), v3_ehrc(&chain, &params));
    }

    #[test]
    fn v1_extreme_fast_chain_clamps_actual_timespan_to_quarter() {
        let mut params = params::main();
        // Treat the 3600s-timespan/factor-2 cadence as always active so a
        // short synthetic chain can reach a retarget boundary; interval =
        // 3600/90 = 40.
        params.hard_fork_one = 0;
        // A power of two round-trips through the compact encoding exactly,
        // so the expected result can be computed by hand: decoded = 2^40.
        let start = Target::from_uint256(Uint256::from_u64(1u64 << 40)).to_compact();
        // 80 blocks spaced 1s apart: h = 80 is a retarget boundary
        // (80 % 40 == 0) reached by going back a plain `interval` blocks,
        // spanning only 40s of wall-clock time versus the 3600s timespan.
        let chain = build_chain(80, 1, start);
        let candidate = candidate_at(chain.time + 1, &params);
        let bits = next_required_bits(&chain, &candidate, &params);
        let (target, _, _) = Target::from_compact(bits);
        // actual_timespan clamps to target_timespan/4 = 900, so the new
        // target is exactly decoded/4.
        let expected = Target::from_uint256(Uint256::from_u64(1u64 << 38));
        assert_eq!(target, expected);
    }

    #[test]
    fn v3_nine_percent_clamp_on_a_fast_chain() {
        // hard_fork_three far in the past and hard_fork_four at 0 puts every
        // height at or above 1 squarely in the `h >= hard_fork_four` V3
        // branch.
        let params = dispatch_params(-1_000_000, 0);
        // decoded = 90 * 2^32 round-trips through the compact encoding
        // exactly and divides evenly by 90, so the expected result is exact.
        let start = Target::from_uint256(Uint256::from_u64(90u64 << 32)).to_compact();
        // 1001 blocks spaced 1s apart: every one of the short/medium/long
        // windows measures an average 1s spacing, far below the ~9% floor.
        let chain = build_chain(1001, 1, start);
        let bits = v3_ehrc(&chain, &params);
        let (target, _, _) = Target::from_compact(bits);
        // min = 90 * 453 / 494 = 82 (integer division); new = decoded * 82 / 90.
        let expected = Target::from_uint256(Uint256::from_u64(82u64 << 32));
        assert_eq!(target, expected);
    }
}
