//! For representing jetton amounts.
//!
//! On chain a jetton amount is a `VarUInteger 16`: a 4-bit length followed by
//! up to 16 big-endian bytes.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("Unable to parse amount {0} as a decimal integer")]
    NotDecimal(String),
    #[error("Amount must be at most 16 bytes, got {0}")]
    TooManyBytes(usize),
}

/// Unsigned integer of up to 16 bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarUInteger16(pub u128);

impl VarUInteger16 {
    /// Minimal big-endian encoding (no leading zero bytes, empty for zero).
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let bytes = self.0.to_be_bytes();
        let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
        bytes[first..].to_vec()
    }

    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, AmountError> {
        if bytes.len() > 16 {
            return Err(AmountError::TooManyBytes(bytes.len()));
        }
        let mut padded = [0u8; 16];
        padded[16 - bytes.len()..].copy_from_slice(bytes);
        Ok(Self(u128::from_be_bytes(padded)))
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl From<u128> for VarUInteger16 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl FromStr for VarUInteger16 {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| AmountError::NotDecimal(s.to_string()))
    }
}

impl Display for VarUInteger16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for VarUInteger16 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for VarUInteger16 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        VarUInteger16::from_str(&s).map_err(serde::de::Error::custom)
    }
}
