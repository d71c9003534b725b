// SPDX-License-Identifier: CC0-1.0

//! Minimal blockdata.
//!
//! Just enough of a transaction/script/block model to build and hash the
//! genesis block of each network. This is deliberately **not** a general
//! transaction-processing engine: script execution, signature checking,
//! weight/sigop accounting and witness semantics beyond the empty genesis
//! witness are all out of scope.

pub mod block;
pub mod constants;
pub mod locktime;
pub mod opcodes;
pub mod script;
pub mod transaction;
pub mod witness;
