// SPDX-License-Identifier: CC0-1.0

//! Script opcodes.
//!
//! Only the handful of opcodes the genesis scriptPubKey needs. A real
//! script interpreter is out of scope for this crate.

/// A single byte of script.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Opcode(pub u8);

impl Opcode {
    /// Returns the opcode's byte.
    pub fn to_u8(self) -> u8 {
        self.0
    }
}

/// `OP_CHECKSIG`: pop a pubkey and a signature, push `true`/`false`.
pub const OP_CHECKSIG: Opcode = Opcode(0xac);
