//! For names and classifications of accounts that are not part of a trace.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tonflow_types::AccountId;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("IO error {0}")]
    Io(#[from] std::io::Error),
    #[error("serde_json error {0}")]
    SerdeJson(#[from] serde_json::Error),
}

/// What is known about an account.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub is_scam: bool,
    #[serde(default)]
    pub is_wallet: bool,
}

/// Kind of domain sold by an auction contract.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AuctionKind {
    /// `.ton` DNS domain.
    Ton,
    /// Telegram username or number (`.t.me`).
    Tg,
    #[default]
    Unknown,
}

/// Resolves accounts to human readable information.
pub trait AddressBook {
    fn resolve(&self, account: &AccountId) -> Option<AddressInfo>;

    fn auction_kind(&self, _account: &AccountId) -> AuctionKind {
        AuctionKind::Unknown
    }
}

/// Knows nothing about any account.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyBook;

impl AddressBook for EmptyBook {
    fn resolve(&self, _account: &AccountId) -> Option<AddressInfo> {
        None
    }
}

/// In-memory book, e.g., loaded from a JSON file.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticBook {
    #[serde(default)]
    pub accounts: BTreeMap<AccountId, AddressInfo>,
    #[serde(default)]
    pub auctions: BTreeMap<AccountId, AuctionKind>,
}

impl StaticBook {
    pub fn from_json(json: &str) -> Result<Self, BookError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BookError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn with_name<T: Into<String>>(mut self, account: AccountId, name: T) -> Self {
        self.accounts.entry(account).or_default().name = Some(name.into());
        self
    }

    pub fn with_auction(mut self, account: AccountId, kind: AuctionKind) -> Self {
        self.auctions.insert(account, kind);
        self
    }
}

impl AddressBook for StaticBook {
    fn resolve(&self, account: &AccountId) -> Option<AddressInfo> {
        self.accounts.get(account).cloned()
    }

    fn auction_kind(&self, account: &AccountId) -> AuctionKind {
        self.auctions.get(account).copied().unwrap_or_default()
    }
}

/// Name of an account if the book has one, otherwise its short address.
pub fn display_name(book: &dyn AddressBook, account: &AccountId) -> String {
    book.resolve(account)
        .and_then(|info| info.name)
        .unwrap_or_else(|| account.to_short())
}
