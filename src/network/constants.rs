// SPDX-License-Identifier: CC0-1.0

//! Network constants.
//!
//! This module defines [`Network`], the enum that selects which
//! [`ChainParameters`](crate::consensus::params::ChainParameters) a process
//! runs under. There is no polymorphism between networks: all three share a
//! single record type built by three independent factory functions (see
//! `consensus::params`).

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use actual_serde as serde;

/// The cryptocurrency network the library is operating on.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Network {
    /// Mainnet, the "real" production network.
    Main,
    /// Testnet, a public network with relaxed proof-of-work rules.
    Testnet,
    /// Regtest, a private network with frozen difficulty and on-demand mining.
    Regtest,
}

impl Network {
    /// The short network identifier used throughout `ChainParameters`
    /// (`"main"`, `"test"`, `"regtest"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "test",
            Network::Regtest => "regtest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned when parsing an unrecognized network name.
///
/// Mirrors `consensus::params::select_params`'s recoverable "unknown network
/// name" error: callers get a normal `Result`, not a panic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseNetworkError(pub(crate) crate::prelude::String);

impl fmt::Display for ParseNetworkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown network: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseNetworkError {}

impl FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use crate::prelude::ToOwned;
        match s {
            "main" => Ok(Network::Main),
            "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            other => Err(ParseNetworkError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_str() {
        for net in [Network::Main, Network::Testnet, Network::Regtest] {
            assert_eq!(net.as_str().parse::<Network>().unwrap(), net);
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert!("mainnet".parse::<Network>().is_err());
        assert_eq!(
            "mainnet".parse::<Network>().unwrap_err().to_string(),
            "unknown network: mainnet"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        for net in [Network::Main, Network::Testnet, Network::Regtest] {
            let json = serde_json::to_string(&net).unwrap();
            assert_eq!(serde_json::from_str::<Network>(&json).unwrap(), net);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn bincode_roundtrip() {
        for net in [Network::Main, Network::Testnet, Network::Regtest] {
            let bytes = bincode::serialize(&net).unwrap();
            assert_eq!(bincode::deserialize::<Network>(&bytes).unwrap(), net);
        }
    }
}
