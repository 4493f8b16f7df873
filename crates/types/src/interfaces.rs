//! Contract interfaces detected for an account's code.

use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// An interface implemented by the code of an account.
///
/// Tags that are not modelled are kept verbatim in `Other`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum ContractInterface {
    WalletV3R1,
    WalletV3R2,
    WalletV4R1,
    WalletV4R2,
    WalletV5R1,
    JettonMaster,
    JettonWallet,
    NftCollection,
    NftItem,
    NftSaleGetgems,
    NftAuctionGetgems,
    /// `.ton` domain item (auctioned by the item itself).
    DnsItem,
    /// Telegram username or number item.
    TelemintItem,
    TelemintCollection,
    SubscriptionV1,
    Other(String),
}

impl ContractInterface {
    pub fn is_wallet(&self) -> bool {
        matches!(
            self,
            ContractInterface::WalletV3R1
                | ContractInterface::WalletV3R2
                | ContractInterface::WalletV4R1
                | ContractInterface::WalletV4R2
                | ContractInterface::WalletV5R1
        )
    }

    fn tag(&self) -> &str {
        match self {
            ContractInterface::WalletV3R1 => "wallet_v3r1",
            ContractInterface::WalletV3R2 => "wallet_v3r2",
            ContractInterface::WalletV4R1 => "wallet_v4r1",
            ContractInterface::WalletV4R2 => "wallet_v4r2",
            ContractInterface::WalletV5R1 => "wallet_v5r1",
            ContractInterface::JettonMaster => "jetton_master",
            ContractInterface::JettonWallet => "jetton_wallet",
            ContractInterface::NftCollection => "nft_collection",
            ContractInterface::NftItem => "nft_item",
            ContractInterface::NftSaleGetgems => "nft_sale_getgems",
            ContractInterface::NftAuctionGetgems => "nft_auction_getgems",
            ContractInterface::DnsItem => "dns_item",
            ContractInterface::TelemintItem => "teleitem",
            ContractInterface::TelemintCollection => "telemint",
            ContractInterface::SubscriptionV1 => "subscription_v1",
            ContractInterface::Other(tag) => tag,
        }
    }
}

impl FromStr for ContractInterface {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "wallet_v3r1" => ContractInterface::WalletV3R1,
            "wallet_v3r2" => ContractInterface::WalletV3R2,
            "wallet_v4r1" => ContractInterface::WalletV4R1,
            "wallet_v4r2" => ContractInterface::WalletV4R2,
            "wallet_v5r1" => ContractInterface::WalletV5R1,
            "jetton_master" => ContractInterface::JettonMaster,
            "jetton_wallet" => ContractInterface::JettonWallet,
            "nft_collection" => ContractInterface::NftCollection,
            "nft_item" => ContractInterface::NftItem,
            "nft_sale_getgems" => ContractInterface::NftSaleGetgems,
            "nft_auction_getgems" => ContractInterface::NftAuctionGetgems,
            "dns_item" => ContractInterface::DnsItem,
            "teleitem" => ContractInterface::TelemintItem,
            "telemint" => ContractInterface::TelemintCollection,
            "subscription_v1" => ContractInterface::SubscriptionV1,
            other => ContractInterface::Other(other.to_string()),
        })
    }
}

impl From<String> for ContractInterface {
    fn from(value: String) -> Self {
        match ContractInterface::from_str(&value) {
            Ok(interface) => interface,
            Err(never) => match never {},
        }
    }
}

impl From<ContractInterface> for String {
    fn from(value: ContractInterface) -> Self {
        value.tag().to_string()
    }
}

impl Display for ContractInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// True if any of the interfaces is `interface`.
pub fn implements(interfaces: &[ContractInterface], interface: &ContractInterface) -> bool {
    interfaces.iter().any(|i| i == interface)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tags() {
        let parsed: Vec<ContractInterface> =
            serde_json::from_str(r#"["wallet_v4r2", "teleitem", "stonfi_pool"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ContractInterface::WalletV4R2,
                ContractInterface::TelemintItem,
                ContractInterface::Other("stonfi_pool".to_string())
            ]
        );
        assert!(parsed[0].is_wallet());
        assert!(!parsed[1].is_wallet());
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"["wallet_v4r2","teleitem","stonfi_pool"]"#
        );
    }
}
