// SPDX-License-Identifier: CC0-1.0

//! Transactions.
//!
//! Just enough to build and hash a coinbase transaction: one input
//! pointing at the null outpoint, one or more outputs, a locktime, and an
//! (always-empty, for genesis) witness per input.

use crate::blockdata::locktime::{LockTime, Sequence};
use crate::blockdata::script::Script;
use crate::blockdata::witness::Witness;
use crate::consensus::encode::{Encodable, VarInt};
use crate::hash_types::Txid;
use crate::hashes::{sha256d, Hash};
use crate::prelude::Vec;

/// A reference to a previous transaction's output, by txid and index.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OutPoint {
    /// The referenced transaction's id.
    pub txid: Txid,
    /// The index of the referenced output within that transaction.
    pub vout: u32,
}

impl OutPoint {
    /// The all-zero, max-index outpoint every coinbase input uses, since it
    /// spends nothing.
    pub fn null() -> Self {
        OutPoint { txid: Txid::all_zeros(), vout: 0xFFFF_FFFF }
    }
}

impl Encodable for OutPoint {
    fn consensus_encode(&self, buf: &mut Vec<u8>) -> usize {
        let txid_bytes: sha256d::Hash = self.txid.into();
        let mut len = txid_bytes.as_ref().consensus_encode(buf);
        len += self.vout.consensus_encode(buf);
        len
    }
}

/// One input of a transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TxIn {
    /// The previous output this input spends (the null outpoint, for a
    /// coinbase).
    pub previous_output: OutPoint,
    /// The coinbase's arbitrary data / a spending input's unlocking script.
    pub script_sig: Script,
    /// Relative-locktime/replace-by-fee signaling field.
    pub sequence: Sequence,
    /// The input's witness stack (always empty for genesis).
    pub witness: Witness,
}

impl Encodable for TxIn {
    fn consensus_encode(&self, buf: &mut Vec<u8>) -> usize {
        let mut len = self.previous_output.consensus_encode(buf);
        len += VarInt(self.script_sig.len() as u64).consensus_encode(buf);
        len += self.script_sig.as_bytes().consensus_encode(buf);
        len += self.sequence.0.consensus_encode(buf);
        len
    }
}

/// One output of a transaction.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct TxOut {
    /// The output's value, in the smallest on-chain unit.
    pub value: u64,
    /// The script that must be satisfied to spend this output.
    pub script_pubkey: Script,
}

impl Encodable for TxOut {
    fn consensus_encode(&self, buf: &mut Vec<u8>) -> usize {
        let mut len = self.value.consensus_encode(buf);
        len += VarInt(self.script_pubkey.len() as u64).consensus_encode(buf);
        len += self.script_pubkey.as_bytes().consensus_encode(buf);
        len
    }
}

/// A transaction: a version, a list of inputs, a list of outputs, and a
/// locktime. Legacy (pre-segwit) serialization only, which is all the
/// genesis coinbase ever needs.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Transaction {
    /// The transaction format version.
    pub version: i32,
    /// The transaction's inputs.
    pub input: Vec<TxIn>,
    /// The transaction's outputs.
    pub output: Vec<TxOut>,
    /// The transaction's locktime.
    pub lock_time: LockTime,
}

impl Transaction {
    /// The transaction's id: `sha256d` of the legacy (witness-stripped)
    /// serialization, matching every on-chain txid.
    pub fn txid(&self) -> Txid {
        let mut buf = Vec::new();
        self.version.consensus_encode(&mut buf);
        VarInt(self.input.len() as u64).consensus_encode(&mut buf);
        for input in &self.input {
            input.consensus_encode(&mut buf);
        }
        VarInt(self.output.len() as u64).consensus_encode(&mut buf);
        for output in &self.output {
            output.consensus_encode(&mut buf);
        }
        self.lock_time.to_consensus_u32().consensus_encode(&mut buf);
        Txid::from(sha256d::Hash::hash(&buf))
    }
}
