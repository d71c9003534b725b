// SPDX-License-Identifier: CC0-1.0

//! Per-network chain parameters.
//!
//! [`ChainParameters`] is the immutable record the rest of the crate reads:
//! magic bytes, the genesis block, the proof-of-work limit and retarget
//! cadence, hard-fork activation heights, checkpoints and address prefixes.
//! Three factory functions ([`main`], [`testnet`], [`regtest`]) build the
//! three networks. The original C++ shares constants between networks
//! through class inheritance (`CTestNetParams` extends `CMainParams`, and so
//! on); there is no polymorphism here, just three pure constructors
//! producing the same record type.

use crate::blockdata::block::Block;
use crate::blockdata::constants::genesis_block;
use crate::hash_types::BlockHash;
use crate::network::constants::{Network, ParseNetworkError};
use crate::pow::{CompactTarget, Target, Uint256};
use crate::prelude::{BTreeMap, ToString, Vec};
use core::fmt;
use hex_lit::hex;

#[cfg(feature = "std")]
use std::sync::OnceLock;

/// The base58 address-version-byte table: one entry per address kind this
/// network mints, plus the two BIP32 extended-key version words.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Base58Prefixes {
    /// Version byte for a P2PKH address.
    pub pubkey_address: Vec<u8>,
    /// Version byte for a P2SH address.
    pub script_address: Vec<u8>,
    /// Version byte for a WIF-encoded private key.
    pub secret_key: Vec<u8>,
    /// Four-byte version prefix for an extended public key.
    pub ext_public_key: Vec<u8>,
    /// Four-byte version prefix for an extended private key.
    pub ext_secret_key: Vec<u8>,
}

/// A hardcoded fallback peer address, used when DNS seed resolution (outside
/// this crate's scope) turns up nothing. Carried here as inert data; nothing
/// in this crate dials it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FixedSeed {
    /// The peer's IPv6 (or IPv4-mapped) address.
    pub ip: [u8; 16],
    /// The peer's port.
    pub port: u16,
}

/// Summary statistics shipped alongside the checkpoint table
/// (`chainTxData` in the original), used by a wallet/RPC layer to estimate
/// initial-sync progress. Not consensus data: nothing in this crate reads it.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct ChainTxData {
    /// The timestamp of the transaction count snapshot below.
    pub time: u32,
    /// The total number of transactions up to that timestamp.
    pub tx_count: u64,
    /// The estimated transaction rate (transactions per second) since then.
    pub tx_rate: f64,
}

/// The immutable per-network consensus parameter record.
///
/// Built once per process by [`main`], [`testnet`] or [`regtest`] (or
/// indirectly through [`select_params`]) and thereafter read-only; every
/// field here is either `Copy` or cheap to clone, so cloning a whole
/// `ChainParameters` is fine if a caller needs an owned copy.
#[derive(Clone, Debug)]
pub struct ChainParameters {
    /// Which of the three networks this record describes.
    pub network: Network,
    /// The four-byte P2P message magic.
    pub message_start: [u8; 4],
    /// The network's default P2P listening port.
    pub default_port: u16,
    /// The network's genesis block, already hash-verified at construction.
    pub genesis_block: Block,
    /// The maximum target any retarget result is clamped to.
    pub pow_limit: Target,
    /// Seconds of wall-clock time a single block is expected to take.
    pub pow_target_spacing: u32,
    /// Seconds spanned by one V1 retarget window.
    pub pow_target_timespan: u32,
    /// Blocks between halvings of the block subsidy.
    pub subsidy_halving_interval: i32,
    /// Height above which V1 uses the post-fix history window and timespan
    /// divisor (see `pow::retarget`). A strict `>` comparison against this
    /// height, not `>=`; preserved exactly from the original.
    pub coin_fix: i32,
    /// Height at which V1's timespan/history-factor cadence changes.
    pub hard_fork_one: i32,
    /// Height at or above which V2 gravity-well retargeting begins.
    pub hard_fork_two: i32,
    /// Height at which V2's event-horizon constant narrows.
    pub hard_fork_two_a: i32,
    /// Height of the one-block difficulty reset and V1 warm-up.
    pub hard_fork_three: i32,
    /// Height at or above which V3 eHRC retargeting begins.
    pub hard_fork_four: i32,
    /// Unused by the retargeter directly; carried for parity with the
    /// original's deployment-gating constants.
    pub hard_fork_four_a: i32,
    /// Timestamp gating the start of the scrypt/neoscrypt transition window.
    pub neo_scrypt_switch: u32,
    /// Timestamp at or after which headers hash with neoscrypt instead of
    /// scrypt (see [`crate::pow::header_hash`]).
    pub neo_scrypt_fork: u32,
    /// Whether a stale candidate block may claim the minimum difficulty
    /// (testnet/regtest only).
    pub allow_min_difficulty_blocks: bool,
    /// Whether retargeting is frozen entirely (regtest only).
    pub no_retargeting: bool,
    /// Hardcoded `(height, block hash)` pairs validation short-circuits on.
    /// Ordered by height, ascending.
    pub checkpoints: BTreeMap<i32, BlockHash>,
    /// Non-consensus sync-progress estimation data.
    pub chain_tx_data: ChainTxData,
    /// Base58 address version bytes.
    pub base58_prefixes: Base58Prefixes,
    /// The bech32 human-readable part for native segwit addresses.
    pub bech32_hrp: &'static str,
    /// DNS seed hostnames.
    pub dns_seeds: Vec<&'static str>,
    /// Hardcoded fallback peer addresses.
    pub fixed_seeds: Vec<FixedSeed>,
}

impl ChainParameters {
    /// Looks up the checkpoint hash expected at `height`, if any.
    pub fn checkpoint(&self, height: i32) -> Option<&BlockHash> {
        self.checkpoints.get(&height)
    }
}

/// Builds a checkpoint table from `(height, hash)` literals, asserting
/// strictly increasing heights (invariant 3 of `ChainParameters`).
fn checkpoints(entries: &[(i32, &str)]) -> BTreeMap<i32, BlockHash> {
    let mut map = BTreeMap::new();
    let mut previous: Option<i32> = None;
    for &(height, hash) in entries {
        if let Some(prev) = previous {
            assert!(height > prev, "checkpoint heights must be strictly increasing");
        }
        previous = Some(height);
        let hash: BlockHash = hash.parse().expect("checkpoint hash literal is valid hex");
        map.insert(height, hash);
    }
    map
}

/// Verifies a freshly-built genesis block's hash and merkle root against
/// their hardcoded expected values, aborting on mismatch.
///
/// This is the construction tripwire (§7): a build that cannot reproduce a
/// network's genesis hash is fundamentally broken and must not run against
/// a live network, so this panics rather than returning a `Result`.
fn verify_genesis(block: &Block, expected_hash: &str, expected_merkle_root: &str) {
    let hash = block.block_hash();
    assert_eq!(
        hash.to_string(),
        expected_hash,
        "genesis block hash does not match the hardcoded expected value; this build cannot be trusted"
    );
    assert_eq!(
        block.header.merkle_root.to_string(),
        expected_merkle_root,
        "genesis merkle root does not match the hardcoded expected value"
    );
}

/// Checks the construction invariants that aren't already enforced by a
/// field's type (checkpoint ordering is enforced by [`checkpoints`] itself;
/// the genesis hash/merkle root by [`verify_genesis`]).
fn verify_invariants(params: &ChainParameters) {
    assert_eq!(
        params.pow_target_timespan % params.pow_target_spacing,
        0,
        "pow_target_timespan must be an exact multiple of pow_target_spacing"
    );
    if params.no_retargeting {
        assert_eq!(params.network, Network::Regtest, "only regtest may freeze retargeting");
    }
}

/// Builds the mainnet [`ChainParameters`].
pub fn main() -> ChainParameters {
    let pow_limit = Target::from_uint256(Uint256::from_be_bytes(hex!(
        "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )));
    let genesis = genesis_block(1_388_681_920, CompactTarget::from_consensus(0x1e0f_fff0), 1_671_824);
    verify_genesis(
        &genesis,
        "ba1d39b4928ab03d813d952daf65fb7797fcf538a9c1b8274f4edc8557722d13",
        "8207df3a28a5bfdcaba0c810e540123aaea8d067b745092849787169f5e77065",
    );

    let params = ChainParameters {
        network: Network::Main,
        message_start: [0xfc, 0xd9, 0xb7, 0xdd],
        default_port: 9887,
        genesis_block: genesis,
        pow_limit,
        pow_target_spacing: 90,
        pow_target_timespan: 86_400,
        subsidy_halving_interval: 400_000,
        coin_fix: 15_000,
        hard_fork_one: 33_479,
        hard_fork_two: 160_997,
        hard_fork_two_a: 171_900,
        hard_fork_three: 266_000,
        hard_fork_four: 1_182_000,
        hard_fork_four_a: 1_220_000,
        neo_scrypt_switch: 1_414_195_200,
        neo_scrypt_fork: 1_414_446_393,
        allow_min_difficulty_blocks: false,
        no_retargeting: false,
        checkpoints: checkpoints(&[
            (4_500, "5755857a8055c732d5236b0526afcb9b92f1291c87ed3c655c6d79df6b9d3dd4"),
            (9_999, "808bf9bdf3c7e777ad8008455f6849001bc264910de86e01a0bf1d83ed362aba"),
            (20_000, "e14a9e1d1cd79fa0385d3af7eac36ed96f29d7c0205b62eb82c4e7c5b043c6d1"),
            (33_349, "cf9ea4ab6589b0ac0cc34fca94ea3c24842ac80f43724d0c8d89ece0aa0a5081"),
            (1_079_136, "e171e30fa1ab3428f079a165a22f5cfd3529fb0e76bd0e7213a3ac9a09bd5571"),
            (1_213_947, "a4c7b570fbf1d755c327ff9c3d98e9d5433e453f9ecade20a8e4852bd124eb8f"),
            (1_246_467, "a0e2460c7e644cbb6c4bc01088094524fdf90892aa42d22f9dd9b6e3c981ca6f"),
            (1_314_322, "e4d06a126e75abe493b1d07e3c2112a9121ba9e9d66ec82da53acd48196b05fc"),
        ]),
        chain_tx_data: ChainTxData { time: 1_526_634_445, tx_count: 1_627_450, tx_rate: 0.001 },
        base58_prefixes: Base58Prefixes {
            pubkey_address: Vec::from([27]),
            script_address: Vec::from([5]),
            secret_key: Vec::from([155]),
            ext_public_key: Vec::from([0x04, 0x88, 0xB2, 0x1E]),
            ext_secret_key: Vec::from([0x04, 0x88, 0xAD, 0xE4]),
        },
        bech32_hrp: "uf",
        dns_seeds: Vec::from([
            "dns.seed1.ufocoin.net",
            "dns.seed2.ufocoin.net",
            "dns.dnsseed.lowecraft.it",
            "dns.dnsseed.ufocoinnode.com",
        ]),
        fixed_seeds: Vec::new(),
    };
    verify_invariants(&params);
    params
}

/// Builds the testnet [`ChainParameters`].
pub fn testnet() -> ChainParameters {
    let pow_limit = Target::from_uint256(Uint256::from_be_bytes(hex!(
        "00000fffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
    )));
    let genesis = genesis_block(1_388_678_813, CompactTarget::from_consensus(0x1e0f_fff0), 616_291);
    verify_genesis(
        &genesis,
        "45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37",
        "8207df3a28a5bfdcaba0c810e540123aaea8d067b745092849787169f5e77065",
    );

    let params = ChainParameters {
        network: Network::Testnet,
        message_start: [0xfb, 0xc0, 0xb8, 0xdb],
        default_port: 19887,
        genesis_block: genesis,
        pow_limit,
        pow_target_spacing: 90,
        pow_target_timespan: 86_400,
        subsidy_halving_interval: 400_000,
        // Sentinel: testnet has no meaningful "before the coin fix" era of
        // its own, so the fork is always active.
        coin_fix: 1,
        hard_fork_one: 1,
        hard_fork_two: 1,
        hard_fork_two_a: 1,
        hard_fork_three: 1,
        hard_fork_four: 1_100,
        hard_fork_four_a: 1_500,
        neo_scrypt_switch: 0,
        neo_scrypt_fork: 1_506_816_000,
        allow_min_difficulty_blocks: true,
        no_retargeting: false,
        checkpoints: checkpoints(&[(0, "45b4e55bddf20dfeb69ef2a35dd36f58dd45d5f4582c1a4ca1c1b78eef8f8c37")]),
        chain_tx_data: ChainTxData { time: 1_388_678_813, tx_count: 1, tx_rate: 0.001 },
        base58_prefixes: Base58Prefixes {
            pubkey_address: Vec::from([111]),
            script_address: Vec::from([196]),
            secret_key: Vec::from([239]),
            ext_public_key: Vec::from([0x04, 0x35, 0x87, 0xCF]),
            ext_secret_key: Vec::from([0x04, 0x35, 0x83, 0x94]),
        },
        bech32_hrp: "ut",
        dns_seeds: Vec::from(["testnet-seed.ufocoin.net"]),
        fixed_seeds: Vec::new(),
    };
    verify_invariants(&params);
    params
}

/// Builds the regtest [`ChainParameters`]: frozen difficulty, on-demand
/// mining, no peer discovery.
pub fn regtest() -> ChainParameters {
    let pow_limit =
        Target::from_uint256(Uint256::from_be_bytes(hex!(
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        )));
    let genesis = genesis_block(1_296_688_602, CompactTarget::from_consensus(0x207f_ffff), 3);
    verify_genesis(
        &genesis,
        "a482cf37ea99d8c74f62e28903208bfbc12901b35738feff20fdf7e3b671afb7",
        "8207df3a28a5bfdcaba0c810e540123aaea8d067b745092849787169f5e77065",
    );

    let params = ChainParameters {
        network: Network::Regtest,
        message_start: [0x1b, 0x21, 0x55, 0x1c],
        default_port: 18444,
        genesis_block: genesis,
        pow_limit,
        pow_target_spacing: 600,
        pow_target_timespan: 1_209_600,
        subsidy_halving_interval: 150,
        coin_fix: 1,
        hard_fork_one: 1,
        hard_fork_two: 1,
        hard_fork_two_a: 1,
        hard_fork_three: 1,
        hard_fork_four: 1,
        hard_fork_four_a: 1,
        neo_scrypt_switch: 0,
        neo_scrypt_fork: 1_524_473_955,
        allow_min_difficulty_blocks: true,
        no_retargeting: true,
        checkpoints: checkpoints(&[(0, "a482cf37ea99d8c74f62e28903208bfbc12901b35738feff20fdf7e3b671afb7")]),
        chain_tx_data: ChainTxData { time: 0, tx_count: 0, tx_rate: 0.0 },
        // Equal to testnet's per original_source: CRegTestParams never
        // overrides base58Prefixes, so it inherits CTestNetParams's.
        base58_prefixes: Base58Prefixes {
            pubkey_address: Vec::from([111]),
            script_address: Vec::from([196]),
            secret_key: Vec::from([239]),
            ext_public_key: Vec::from([0x04, 0x35, 0x87, 0xCF]),
            ext_secret_key: Vec::from([0x04, 0x35, 0x83, 0x94]),
        },
        bech32_hrp: "ufrt",
        dns_seeds: Vec::new(),
        fixed_seeds: Vec::new(),
    };
    verify_invariants(&params);
    params
}

/// Builds the [`ChainParameters`] for `network` directly, without touching
/// the process-wide handle `select_params`/`params` manage.
pub fn for_network(network: Network) -> ChainParameters {
    match network {
        Network::Main => main(),
        Network::Testnet => testnet(),
        Network::Regtest => regtest(),
    }
}

/// An error from network selection, the crate's only non-arithmetic
/// recoverable error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamsError {
    /// [`select_params`] was given a name that isn't `"main"`, `"test"` or
    /// `"regtest"`.
    UnknownNetwork(ParseNetworkError),
    /// [`select_params`] was called a second time in this process; the
    /// process-wide handle is set once and read-only thereafter.
    AlreadySelected,
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParamsError::UnknownNetwork(e) => write!(f, "{}", e),
            ParamsError::AlreadySelected => {
                write!(f, "chain parameters were already selected for this process")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParamsError {}

impl From<ParseNetworkError> for ParamsError {
    fn from(e: ParseNetworkError) -> Self {
        ParamsError::UnknownNetwork(e)
    }
}

/// The process-wide selected network, set at most once. See §5/§9: the
/// original keeps a raw global pointer (`pCurrentParams`); this is its
/// one-time-initialized-static replacement, with the rest of the crate
/// preferring an explicitly threaded `&ChainParameters` wherever possible.
#[cfg(feature = "std")]
static GLOBAL_PARAMS: OnceLock<ChainParameters> = OnceLock::new();

/// Builds and installs the process-wide [`ChainParameters`] for
/// `network_name` (`"main"`, `"test"` or `"regtest"`).
///
/// May be called exactly once per process. A second call, even with the
/// same network name, returns [`ParamsError::AlreadySelected`] and leaves
/// the already-installed parameters untouched.
#[cfg(feature = "std")]
pub fn select_params(network_name: &str) -> Result<(), ParamsError> {
    let network: Network = network_name.parse()?;
    GLOBAL_PARAMS.set(for_network(network)).map_err(|_| ParamsError::AlreadySelected)
}

/// Returns the process-wide [`ChainParameters`] installed by
/// [`select_params`].
///
/// # Panics
///
/// Panics if no network has been selected yet. Every process entry point on
/// the consensus path must call `select_params` before any header reaches
/// this crate; reading `params()` first is a programmer error, not a
/// runtime condition (§7).
#[cfg(feature = "std")]
pub fn params() -> &'static ChainParameters {
    GLOBAL_PARAMS.get().expect("select_params must be called before params()")
}
