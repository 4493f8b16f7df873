//! For short, translatable descriptions of actions.
//!
//! The message id names a template in an external translation catalogue, the
//! template data fills it. Names are resolved through the address book.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tonflow_types::{AccountId, VarUInteger16};

use crate::{
    book::{display_name, AddressBook},
    coins::{to_coins_pretty, to_jettons_pretty},
};

pub const TON_TRANSFER_ID: &str = "tonTransferAction";
pub const NFT_TRANSFER_ID: &str = "nftTransferAction";
pub const JETTON_TRANSFER_ID: &str = "jettonTransferAction";
pub const SMART_CONTRACT_EXEC_ID: &str = "smartContractExecAction";
pub const CONTRACT_DEPLOY_ID: &str = "contractDeployAction";
pub const SUBSCRIPTION_ID: &str = "subscriptionAction";
pub const UNSUBSCRIPTION_ID: &str = "unsubscriptionAction";
pub const AUCTION_BID_ID: &str = "auctionBidMessageID";
pub const TG_INIT_BID_ID: &str = "auctionTgInitBidMessageID";
pub const GETGEMS_PURCHASE_ID: &str = "getGemsNftPurchaseAction";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplePreview {
    pub name: String,
    pub value: String,
    pub accounts: Vec<AccountId>,
    /// Id of the translation template.
    pub message_id: String,
    pub template_data: BTreeMap<String, Value>,
}

impl SimplePreview {
    fn new(name: &str, message_id: &str) -> Self {
        Self {
            name: name.to_string(),
            message_id: message_id.to_string(),
            ..Default::default()
        }
    }

    fn value(mut self, value: String) -> Self {
        self.value = value;
        self
    }

    fn account(mut self, account: Option<&AccountId>) -> Self {
        if let Some(account) = account {
            if !self.accounts.contains(account) {
                self.accounts.push(*account);
            }
        }
        self
    }

    fn data<T: Into<Value>>(mut self, key: &str, value: T) -> Self {
        self.template_data.insert(key.to_string(), value.into());
        self
    }

    /// Template entry with the book name of an account, when it is known.
    fn named(self, key: &str, account: Option<&AccountId>, book: &dyn AddressBook) -> Self {
        match account {
            Some(account) => self.data(key, display_name(book, account)),
            None => self,
        }
    }
}

pub fn ton_transfer(
    sender: &AccountId,
    recipient: &AccountId,
    amount: i64,
    book: &dyn AddressBook,
) -> SimplePreview {
    let value = to_coins_pretty(amount);
    SimplePreview::new("Ton Transfer", TON_TRANSFER_ID)
        .value(value.clone())
        .account(Some(sender))
        .account(Some(recipient))
        .named("sender", Some(sender), book)
        .named("recipient", Some(recipient), book)
        .data("amount", value)
}

pub fn nft_transfer(
    sender: Option<&AccountId>,
    recipient: Option<&AccountId>,
    nft: &AccountId,
    book: &dyn AddressBook,
) -> SimplePreview {
    SimplePreview::new("NFT Transfer", NFT_TRANSFER_ID)
        .value("1 NFT".to_string())
        .account(sender)
        .account(recipient)
        .account(Some(nft))
        .named("sender", sender, book)
        .named("recipient", recipient, book)
        .named("nft", Some(nft), book)
}

pub fn jetton_transfer(
    sender: Option<&AccountId>,
    recipient: Option<&AccountId>,
    jetton: &AccountId,
    amount: VarUInteger16,
    book: &dyn AddressBook,
) -> SimplePreview {
    let symbol = book.resolve(jetton).and_then(|info| info.name);
    let value = to_jettons_pretty(amount.0, symbol.as_deref());
    SimplePreview::new("Jetton Transfer", JETTON_TRANSFER_ID)
        .value(value.clone())
        .account(sender)
        .account(recipient)
        .account(Some(jetton))
        .named("sender", sender, book)
        .named("recipient", recipient, book)
        .named("jetton", Some(jetton), book)
        .data("amount", value)
}

pub fn smart_contract_exec(
    executor: &AccountId,
    contract: &AccountId,
    operation: &str,
    ton_attached: i64,
    book: &dyn AddressBook,
) -> SimplePreview {
    SimplePreview::new("Smart Contract Execution", SMART_CONTRACT_EXEC_ID)
        .value(to_coins_pretty(ton_attached))
        .account(Some(executor))
        .account(Some(contract))
        .named("executor", Some(executor), book)
        .named("contract", Some(contract), book)
        .data("operation", operation)
}

pub fn contract_deploy(
    address: &AccountId,
    interfaces: &[String],
    book: &dyn AddressBook,
) -> SimplePreview {
    SimplePreview::new("Contract Deploy", CONTRACT_DEPLOY_ID)
        .account(Some(address))
        .named("address", Some(address), book)
        .data("interfaces", interfaces.to_vec())
}

pub fn subscription(
    subscriber: &AccountId,
    beneficiary: &AccountId,
    amount: i64,
    first: bool,
    book: &dyn AddressBook,
) -> SimplePreview {
    let value = to_coins_pretty(amount);
    SimplePreview::new("Subscription", SUBSCRIPTION_ID)
        .value(value.clone())
        .account(Some(subscriber))
        .account(Some(beneficiary))
        .named("subscriber", Some(subscriber), book)
        .named("beneficiary", Some(beneficiary), book)
        .data("amount", value)
        .data("first", first)
}

pub fn unsubscription(
    subscriber: &AccountId,
    beneficiary: Option<&AccountId>,
    book: &dyn AddressBook,
) -> SimplePreview {
    SimplePreview::new("Unsubscription", UNSUBSCRIPTION_ID)
        .account(Some(subscriber))
        .account(beneficiary)
        .named("subscriber", Some(subscriber), book)
        .named("beneficiary", beneficiary, book)
}

pub fn auction_bid(
    bidder: &AccountId,
    auction: &AccountId,
    bid: i64,
    item_name: Option<&str>,
    tg_init: bool,
    book: &dyn AddressBook,
) -> SimplePreview {
    let (name, id) = match tg_init {
        true => ("Auction Init Bid", TG_INIT_BID_ID),
        false => ("Auction Bid", AUCTION_BID_ID),
    };
    let value = to_coins_pretty(bid);
    let preview = SimplePreview::new(name, id)
        .value(value.clone())
        .account(Some(bidder))
        .account(Some(auction))
        .named("bidder", Some(bidder), book)
        .named("auction", Some(auction), book)
        .data("amount", value);
    match item_name {
        Some(item) => preview.data("item", item),
        None => preview,
    }
}

pub fn getgems_purchase(
    buyer: &AccountId,
    nft: &AccountId,
    price: i64,
    book: &dyn AddressBook,
) -> SimplePreview {
    let value = to_coins_pretty(price);
    SimplePreview::new("NFT Purchase", GETGEMS_PURCHASE_ID)
        .value(value.clone())
        .account(Some(buyer))
        .account(Some(nft))
        .named("buyer", Some(buyer), book)
        .named("nft", Some(nft), book)
        .data("price", value)
}
