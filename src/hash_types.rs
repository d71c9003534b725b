// SPDX-License-Identifier: CC0-1.0

//! Newtypes for the hash-like identifiers used by the minimal blockdata
//! model: block hashes, transaction ids and merkle roots. All three are
//! double-SHA256 (`sha256d`) outputs; the newtypes exist only so the type
//! system keeps them apart.

use crate::hashes::{sha256d, Hash};

macro_rules! impl_hash_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name([u8; 32]);

        impl_array_newtype!($name, u8, 32);
        impl_bytes_newtype!($name, 32);

        impl $name {
            /// The all-zero hash, used as `prev_blockhash` of a genesis block.
            pub fn all_zeros() -> Self {
                $name([0u8; 32])
            }
        }

        impl From<sha256d::Hash> for $name {
            fn from(hash: sha256d::Hash) -> Self {
                $name(hash.into_inner())
            }
        }

        impl From<$name> for sha256d::Hash {
            fn from(value: $name) -> Self {
                sha256d::Hash::from_inner(value.0)
            }
        }
    };
}

impl_hash_newtype!(BlockHash, "A UFO block hash.");
impl_hash_newtype!(Txid, "A UFO transaction id (`sha256d` of the legacy serialization).");
impl_hash_newtype!(TxMerkleNode, "A node of a transaction merkle tree, or the merkle root itself.");
