// SPDX-License-Identifier: CC0-1.0

//! The genesis block.
//!
//! All three networks share the same genesis coinbase transaction (same
//! timestamp message, same zero-value output) and differ only in their
//! header's `time`/`bits`/`nonce`. This mirrors `rust-bitcoin`'s own
//! `blockdata::constants::genesis_block`, minus the four-network branch and
//! the 50-coin block reward this network's genesis doesn't pay out.

use crate::blockdata::block::{Block, Header};
use crate::blockdata::locktime::{LockTime, Sequence};
use crate::blockdata::opcodes::OP_CHECKSIG;
use crate::blockdata::script::Builder;
use crate::blockdata::transaction::{OutPoint, Transaction, TxIn, TxOut};
use crate::blockdata::witness::Witness;
use crate::hash_types::BlockHash;
use crate::pow::CompactTarget;
use crate::prelude::Vec;

/// The message embedded in every network's genesis coinbase, in lieu of a
/// scriptSig extra-nonce payload.
const GENESIS_MESSAGE: &[u8] = b"2 january 2014";

fn genesis_coinbase_tx() -> Transaction {
    let script_sig =
        Builder::new().push_int(486_604_799).push_int_non_minimal(4).push_slice(GENESIS_MESSAGE).into_script();
    let script_pubkey = Builder::new().push_int(0).push_opcode(OP_CHECKSIG).into_script();
    Transaction {
        version: 1,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: vec![TxOut { value: 0, script_pubkey }],
        lock_time: LockTime::ZERO,
    }
}

/// Builds a network's genesis block from its header fields. The coinbase
/// transaction, and therefore the merkle root, is identical across all
/// three networks; only `time`, `bits` and `nonce` vary.
pub fn genesis_block(time: u32, bits: CompactTarget, nonce: u32) -> Block {
    let txdata: Vec<Transaction> = vec![genesis_coinbase_tx()];
    let merkle_root = Block::compute_merkle_root(&txdata);
    Block {
        header: Header {
            version: 1,
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root,
            time,
            bits,
            nonce,
        },
        txdata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_lit::hex;

    #[test]
    fn genesis_coinbase_script_sig_matches_expected_bytes() {
        let tx = genesis_coinbase_tx();
        assert_eq!(
            tx.input[0].script_sig.as_bytes(),
            &hex!("04ffff001d01040e32206a616e756172792032303134")[..]
        );
    }

    #[test]
    fn genesis_coinbase_script_pubkey_is_zero_push_checksig() {
        let tx = genesis_coinbase_tx();
        assert_eq!(tx.input[0].previous_output, OutPoint::null());
        assert_eq!(tx.output[0].value, 0);
        assert_eq!(tx.output[0].script_pubkey.as_bytes(), &[0x00, 0xac]);
    }

    #[test]
    fn main_genesis_hash_and_merkle_root() {
        let block = genesis_block(1_388_681_920, CompactTarget::from_consensus(0x1e0f_fff0), 1_671_824);
        assert_eq!(
            block.header.merkle_root.to_string(),
            "8207df3a28a5bfdcaba0c810e540123aaea8d067b745092849787169f5e77065"
        );
        let hash = block.block_hash();
        assert_eq!(hash.to_string(), "ba1d39b4928ab03d813d952daf65fb7797fcf538a9c1b8274f4edc8557722d13");
    }

    #[test]
    fn testnet_and_regtest_share_main_merkle_root() {
        let main = genesis_block(1_388_681_920, CompactTarget::from_consensus(0x1e0f_fff0), 1_671_824);
        let testnet = genesis_block(1_388_678_813, CompactTarget::from_consensus(0x1e0f_fff0), 616_291);
        let regtest = genesis_block(1_296_688_602, CompactTarget::from_consensus(0x207f_ffff), 3);
        assert_eq!(main.header.merkle_root, testnet.header.merkle_root);
        assert_eq!(main.header.merkle_root, regtest.header.merkle_root);
    }
}
