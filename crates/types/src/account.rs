//! For identifying accounts on the TON blockchain.
//!
//! An account is a 4-byte workchain id plus a 32-byte hash. The text form is
//! the raw `workchain:hex` representation (e.g., `0:83df...`).

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AccountIdError {
    #[error("Account id {0} is missing the workchain separator")]
    MissingSeparator(String),
    #[error("Unable to parse workchain {0}")]
    BadWorkchain(String),
    #[error("Account hash must be 32 bytes, got {0}")]
    BadHashLength(usize),
    #[error("Hex error {0}")]
    Hex(#[from] hex::FromHexError),
}

/// Address of an account: workchain and account hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId {
    pub workchain: i32,
    pub address: [u8; 32],
}

impl AccountId {
    pub const fn new(workchain: i32, address: [u8; 32]) -> Self {
        Self { workchain, address }
    }

    /// Raw form, `workchain:hex`.
    pub fn to_raw(&self) -> String {
        format!("{}:{}", self.workchain, hex::encode(self.address))
    }

    /// Abbreviated form used in human readable summaries.
    pub fn to_short(&self) -> String {
        let hash = hex::encode(self.address);
        format!("{}:{}…{}", self.workchain, &hash[..4], &hash[60..])
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (workchain, hash) = s
            .split_once(':')
            .ok_or_else(|| AccountIdError::MissingSeparator(s.to_string()))?;
        let workchain = workchain
            .parse::<i32>()
            .map_err(|_| AccountIdError::BadWorkchain(workchain.to_string()))?;
        let bytes = hex::decode(hash)?;
        let address: [u8; 32] = bytes
            .try_into()
            .map_err(|b: Vec<u8>| AccountIdError::BadHashLength(b.len()))?;
        Ok(Self { workchain, address })
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        AccountId::from_str(&s).map_err(serde::de::Error::custom)
    }
}
