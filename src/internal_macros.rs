// SPDX-License-Identifier: CC0-1.0

//! Internal macros.
//!
//! Macros for a fixed-size byte array newtype: the boilerplate trait impls
//! (`Index`, `AsRef`, `From<[u8; N]>`, hex `Display`/`Debug`) that every
//! hash-like type in this crate needs.

macro_rules! impl_array_newtype {
    ($thing:ident, $ty:ty, $len:expr) => {
        impl $thing {
            #[inline]
            #[allow(dead_code)]
            pub fn as_bytes(&self) -> &[$ty; $len] {
                &self.0
            }

            #[inline]
            #[allow(dead_code)]
            pub fn to_bytes(&self) -> [$ty; $len] {
                self.0
            }
        }

        impl<I> core::ops::Index<I> for $thing
        where
            [$ty]: core::ops::Index<I>,
        {
            type Output = <[$ty] as core::ops::Index<I>>::Output;

            #[inline]
            fn index(&self, index: I) -> &Self::Output {
                &self.0[index]
            }
        }

        impl core::ops::Deref for $thing {
            type Target = [$ty];
            #[inline]
            fn deref(&self) -> &[$ty] {
                &self.0[..]
            }
        }

        impl AsRef<[$ty; $len]> for $thing {
            #[inline]
            fn as_ref(&self) -> &[$ty; $len] {
                &self.0
            }
        }

        impl From<[$ty; $len]> for $thing {
            #[inline]
            fn from(bytes: [$ty; $len]) -> $thing {
                $thing(bytes)
            }
        }

        impl core::fmt::Debug for $thing {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                core::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Implements hex `Display` for a newtype wrapping a `[u8; N]`, most
/// significant byte first (the "reversed" convention `rust-bitcoin` uses for
/// block and transaction hashes, which print little-endian byte order in
/// big-endian hex).
macro_rules! impl_bytes_newtype {
    ($thing:ident, $len:expr) => {
        impl core::fmt::Display for $thing {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                for byte in self.0.iter().rev() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }

        impl core::str::FromStr for $thing {
            type Err = $crate::consensus::encode::HexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                fn digit(c: u8) -> Result<u8, $crate::consensus::encode::HexError> {
                    match c {
                        b'0'..=b'9' => Ok(c - b'0'),
                        b'a'..=b'f' => Ok(c - b'a' + 10),
                        b'A'..=b'F' => Ok(c - b'A' + 10),
                        _ => Err($crate::consensus::encode::HexError::InvalidChar(c as char)),
                    }
                }

                if s.len() != $len * 2 {
                    return Err($crate::consensus::encode::HexError::InvalidLength(s.len()));
                }
                let mut bytes = [0u8; $len];
                for i in 0..$len {
                    let hi = s.as_bytes()[i * 2];
                    let lo = s.as_bytes()[i * 2 + 1];
                    let byte = (digit(hi)? << 4) | digit(lo)?;
                    bytes[$len - 1 - i] = byte;
                }
                Ok($thing(bytes))
            }
        }
    };
}
