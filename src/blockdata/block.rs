// SPDX-License-Identifier: CC0-1.0

//! Block headers and blocks.
//!
//! Just enough to build, serialize and hash the genesis block of each
//! network: an 80-byte legacy header plus a flat transaction list and the
//! merkle root over it. No block validation lives here — that belongs to a
//! full node, not to this crate.

use crate::blockdata::transaction::Transaction;
use crate::consensus::encode::Encodable;
use crate::hash_types::{BlockHash, TxMerkleNode};
use crate::hashes::{sha256d, Hash};
use crate::pow::{CompactTarget, HeaderHasher, Uint256};
use crate::prelude::Vec;

/// A block header: everything that is hashed for proof-of-work, nothing
/// that isn't.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Header {
    /// The block version, interpreted as a bit field by soft-fork signaling
    /// outside this crate's scope.
    pub version: i32,
    /// The previous block's hash, all-zero for a genesis block.
    pub prev_blockhash: BlockHash,
    /// The merkle root of `txdata`.
    pub merkle_root: TxMerkleNode,
    /// The block's timestamp, seconds since the Unix epoch.
    pub time: u32,
    /// The packed difficulty target this block was mined under.
    pub bits: CompactTarget,
    /// The value a miner incremented to find a hash clearing `bits`.
    pub nonce: u32,
}

impl Header {
    /// The header's 80-byte legacy serialization, the exact bytes that get
    /// hashed for proof-of-work.
    pub fn consensus_encode(&self) -> [u8; 80] {
        let mut buf = Vec::with_capacity(80);
        self.version.consensus_encode(&mut buf);
        self.prev_blockhash.to_bytes().consensus_encode(&mut buf);
        self.merkle_root.to_bytes().consensus_encode(&mut buf);
        self.time.consensus_encode(&mut buf);
        self.bits.to_consensus().consensus_encode(&mut buf);
        self.nonce.consensus_encode(&mut buf);
        let mut out = [0u8; 80];
        out.copy_from_slice(&buf);
        out
    }

    /// The header's proof-of-work hash, as a big-endian integer ready to
    /// compare against a [`Target`](crate::pow::Target). This is a distinct
    /// quantity from [`block_hash`](Header::block_hash): the PoW hash varies
    /// by algorithm (scrypt pre-fork, neoscrypt post-fork) and is only ever
    /// compared against a target, never used to identify the block.
    pub fn pow_hash(&self, hasher: &dyn HeaderHasher) -> Uint256 {
        hasher.hash_header(&self.consensus_encode())
    }

    /// The header's block hash: `sha256d` of the 80-byte legacy
    /// serialization, the same algorithm `txid`/merkle-root hashing uses.
    /// This is the block's stable identifier (`GetHash()`), independent of
    /// whichever proof-of-work algorithm `pow_hash` used to mine it.
    pub fn block_hash(&self) -> BlockHash {
        BlockHash::from(sha256d::Hash::hash(&self.consensus_encode()))
    }
}

/// A block: a header plus its transactions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Block {
    /// The block's header.
    pub header: Header,
    /// The block's transactions, coinbase first.
    pub txdata: Vec<Transaction>,
}

impl Block {
    /// The block's hash, delegating to its header.
    pub fn block_hash(&self) -> BlockHash {
        self.header.block_hash()
    }

    /// Computes the merkle root over `txdata`: pairwise `sha256d` of
    /// adjacent txids, duplicating the last one at each level if the level
    /// has an odd count, same algorithm every block (not just genesis) uses.
    pub fn compute_merkle_root(txdata: &[Transaction]) -> TxMerkleNode {
        let mut layer: Vec<[u8; 32]> =
            txdata.iter().map(|tx| sha256d::Hash::from(tx.txid()).into_inner()).collect();
        if layer.is_empty() {
            return TxMerkleNode::all_zeros();
        }
        while layer.len() > 1 {
            if layer.len() % 2 == 1 {
                let last = *layer.last().expect("checked non-empty above");
                layer.push(last);
            }
            let mut next = Vec::with_capacity(layer.len() / 2);
            for pair in layer.chunks_exact(2) {
                let mut buf = [0u8; 64];
                buf[..32].copy_from_slice(&pair[0]);
                buf[32..].copy_from_slice(&pair[1]);
                next.push(sha256d::Hash::hash(&buf).into_inner());
            }
            layer = next;
        }
        TxMerkleNode::from(layer[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockdata::locktime::{LockTime, Sequence};
    use crate::blockdata::opcodes::OP_CHECKSIG;
    use crate::blockdata::script::Builder;
    use crate::blockdata::transaction::{OutPoint, TxIn, TxOut};
    use crate::blockdata::witness::Witness;

    fn single_tx_block() -> Block {
        let script_sig = Builder::new().push_int(486_604_799).push_int_non_minimal(4).into_script();
        let script_pubkey = Builder::new().push_int(0).push_opcode(OP_CHECKSIG).into_script();
        let tx = Transaction {
            version: 1,
            input: vec![TxIn {
                previous_output: OutPoint::null(),
                script_sig,
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: vec![TxOut { value: 0, script_pubkey }],
            lock_time: LockTime::ZERO,
        };
        let merkle_root = Block::compute_merkle_root(&[tx.clone()]);
        Block {
            header: Header {
                version: 1,
                prev_blockhash: BlockHash::all_zeros(),
                merkle_root,
                time: 1_296_688_602,
                bits: CompactTarget::from_consensus(0x207f_ffff),
                nonce: 3,
            },
            txdata: vec![tx],
        }
    }

    #[test]
    fn single_tx_merkle_root_is_its_txid() {
        let block = single_tx_block();
        let expected = sha256d::Hash::from(block.txdata[0].txid()).into_inner();
        assert_eq!(block.header.merkle_root.to_bytes(), expected);
    }

    #[test]
    fn header_encodes_to_eighty_bytes() {
        let block = single_tx_block();
        assert_eq!(block.header.consensus_encode().len(), 80);
    }

    #[test]
    fn block_hash_is_deterministic() {
        let block = single_tx_block();
        let a = block.block_hash();
        let b = block.block_hash();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_txdata_merkle_root_is_zero() {
        assert_eq!(Block::compute_merkle_root(&[]), TxMerkleNode::all_zeros());
    }
}
