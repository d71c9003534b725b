// SPDX-License-Identifier: CC0-1.0

//! Scripts.
//!
//! A `Script` here is an opaque byte string plus a `Builder` for
//! constructing one. There is no interpreter: nothing in this crate ever
//! executes a script, it only needs to serialize the genesis coinbase's
//! `scriptSig` and `scriptPubKey` byte-for-byte.

use crate::blockdata::opcodes::Opcode;
use crate::prelude::Vec;
use core::fmt;

/// An opaque sequence of script bytes.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Script(Vec<u8>);

impl Script {
    /// Returns the script's raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the number of bytes in the script.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Script({} bytes)", self.0.len())
    }
}

/// Pushdata opcode thresholds, same layout as upstream Bitcoin Script.
const OP_PUSHDATA1: u8 = 0x4c;
const OP_PUSHDATA2: u8 = 0x4d;
const OP_PUSHDATA4: u8 = 0x4e;

/// Builds up a [`Script`] one push/opcode at a time.
#[derive(Clone, Default)]
pub struct Builder(Vec<u8>);

impl Builder {
    /// Creates a new empty script builder.
    pub fn new() -> Self {
        Builder(Vec::new())
    }

    /// Pushes an opcode.
    pub fn push_opcode(mut self, opcode: Opcode) -> Self {
        self.0.push(opcode.to_u8());
        self
    }

    /// Pushes an arbitrary byte slice, choosing the shortest correct
    /// pushdata prefix for its length.
    pub fn push_slice<T: AsRef<[u8]>>(mut self, data: T) -> Self {
        let data = data.as_ref();
        let len = data.len();
        if len < 0x4c {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    /// Pushes a minimally-encoded script integer (`OP_0`/`OP_1`..`OP_16` for
    /// the small cases, a minimal little-endian pushdata otherwise).
    pub fn push_int(self, value: i64) -> Self {
        if value == 0 {
            return self.push_opcode(Opcode(0x00));
        }
        if (1..=16).contains(&value) {
            return self.push_opcode(Opcode(0x50 + value as u8));
        }
        self.push_slice(scriptint_encode(value))
    }

    /// Pushes a script integer using the non-minimal encoding Bitcoin's
    /// genesis coinbase uses for its extra-nonce field: always a pushdata,
    /// never a small-int opcode, even for values like `4`.
    pub fn push_int_non_minimal(self, value: i64) -> Self {
        self.push_slice(scriptint_encode(value))
    }

    /// Finalizes the builder into a [`Script`].
    pub fn into_script(self) -> Script {
        Script(self.0)
    }
}

/// Encodes an integer the way `CScriptNum` does: little-endian, minimal
/// byte count, with a sign bit in the high bit of the last byte.
fn scriptint_encode(value: i64) -> Vec<u8> {
    let mut bytes = Vec::new();
    if value == 0 {
        return bytes;
    }
    let negative = value < 0;
    let mut abs = value.unsigned_abs();
    while abs > 0 {
        bytes.push((abs & 0xff) as u8);
        abs >>= 8;
    }
    if bytes.last().map_or(false, |&b| b & 0x80 != 0) {
        bytes.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        let last = bytes.last_mut().expect("non-empty for nonzero value");
        *last |= 0x80;
    }
    bytes
}
