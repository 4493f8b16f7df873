//! User facing actions produced from a merged bubble tree.

use std::fmt::Display;

use serde::Serialize;
use tonflow_types::{interfaces::implements, AccountId, ContractInterface, NftItem, VarUInteger16};

use crate::preview::SimplePreview;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ActionType {
    TonTransfer,
    SmartContractExec,
    NftItemTransfer,
    GetGemsNftPurchase,
    JettonTransfer,
    ContractDeploy,
    Subscription,
    #[serde(rename = "UnSubscribe")]
    UnSubscription,
    AuctionBid,
    AuctionTgInitBid,
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionType::TonTransfer => "TonTransfer",
            ActionType::SmartContractExec => "SmartContractExec",
            ActionType::NftItemTransfer => "NftItemTransfer",
            ActionType::GetGemsNftPurchase => "GetGemsNftPurchase",
            ActionType::JettonTransfer => "JettonTransfer",
            ActionType::ContractDeploy => "ContractDeploy",
            ActionType::Subscription => "Subscription",
            ActionType::UnSubscription => "UnSubscribe",
            ActionType::AuctionBid => "AuctionBid",
            ActionType::AuctionTgInitBid => "AuctionTgInitBid",
        };
        write!(f, "{name}")
    }
}

/// Who sent money back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum RefundType {
    #[serde(rename = "DNS.tg")]
    DnsTg,
    #[serde(rename = "DNS.ton")]
    DnsTon,
    GetGems,
    #[serde(rename = "unknown")]
    Unknown,
}

impl RefundType {
    /// Classifies the contract that returned the funds.
    pub fn from_interfaces(interfaces: &[ContractInterface]) -> Self {
        if implements(interfaces, &ContractInterface::TelemintItem)
            || implements(interfaces, &ContractInterface::TelemintCollection)
        {
            RefundType::DnsTg
        } else if implements(interfaces, &ContractInterface::DnsItem) {
            RefundType::DnsTon
        } else if implements(interfaces, &ContractInterface::NftSaleGetgems)
            || implements(interfaces, &ContractInterface::NftAuctionGetgems)
        {
            RefundType::GetGems
        } else {
            RefundType::Unknown
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    #[serde(rename = "type")]
    pub refund_type: RefundType,
    /// Raw address of the contract that returned the funds.
    pub origin: String,
}

impl Refund {
    pub fn from_contract(contract: &AccountId, interfaces: &[ContractInterface]) -> Self {
        Self {
            refund_type: RefundType::from_interfaces(interfaces),
            origin: contract.to_raw(),
        }
    }
}

/// Nanocoin that moved along an action without being shown by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenTonValue {
    pub account: AccountId,
    pub amount: i64,
}

/// Kind of auction a bid was placed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AuctionType {
    #[serde(rename = "DNS.ton")]
    DnsTon,
    #[serde(rename = "DNS.tg")]
    DnsTg,
    #[serde(rename = "getgems")]
    GetGems,
    #[serde(rename = "unknown")]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TonTransferAction {
    pub amount: i64,
    pub comment: Option<String>,
    pub recipient: AccountId,
    pub sender: AccountId,
    pub refund: Option<Refund>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmartContractAction {
    pub ton_attached: i64,
    pub executor: AccountId,
    pub contract: AccountId,
    pub operation: String,
    /// Decoded body as JSON, empty when the body was not decoded.
    pub payload: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftTransferAction {
    pub comment: Option<String>,
    pub recipient: Option<AccountId>,
    pub sender: Option<AccountId>,
    pub nft: AccountId,
    pub refund: Option<Refund>,
    pub ton_attached: Vec<HiddenTonValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetGemsNftPurchaseAction {
    pub nft: AccountId,
    pub new_owner: AccountId,
    pub ton_attached: Vec<HiddenTonValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JettonTransferAction {
    pub comment: Option<String>,
    pub jetton: AccountId,
    pub recipient: Option<AccountId>,
    pub sender: Option<AccountId>,
    pub recipients_wallet: AccountId,
    pub senders_wallet: AccountId,
    pub amount: VarUInteger16,
    pub refund: Option<Refund>,
    pub ton_attached: Vec<HiddenTonValue>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDeployAction {
    pub address: AccountId,
    pub interfaces: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionAction {
    pub subscription: AccountId,
    pub subscriber: AccountId,
    pub beneficiary: AccountId,
    pub amount: i64,
    pub first: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnSubscriptionAction {
    pub subscription: AccountId,
    pub subscriber: AccountId,
    pub beneficiary: Option<AccountId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionBidAction {
    pub bidder: AccountId,
    pub previous_bidder: Option<AccountId>,
    pub bid: i64,
    pub item: Option<NftItem>,
    pub auction_type: AuctionType,
}

/// The populated variant of an action. Serialized under the variant's name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ActionPayload {
    TonTransfer(TonTransferAction),
    SmartContractExec(SmartContractAction),
    NftItemTransfer(NftTransferAction),
    GetGemsNftPurchase(GetGemsNftPurchaseAction),
    JettonTransfer(JettonTransferAction),
    ContractDeploy(ContractDeployAction),
    Subscription(SubscriptionAction),
    UnSubscription(UnSubscriptionAction),
    AuctionBid(AuctionBidAction),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub success: bool,
    #[serde(flatten)]
    pub payload: ActionPayload,
    pub simple_preview: SimplePreview,
}

impl Action {
    /// Adds the nanocoin this action moved for `account` without showing it.
    ///
    /// Used to estimate the real cost of a message before it is sent.
    pub fn contribute_to_extra(&self, account: &AccountId, extra: i64) -> i64 {
        self.payload.contribute_to_extra(account, extra)
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let payload = match &self.payload {
            ActionPayload::TonTransfer(a) => serde_json::to_string(a),
            ActionPayload::SmartContractExec(a) => serde_json::to_string(a),
            ActionPayload::NftItemTransfer(a) => serde_json::to_string(a),
            ActionPayload::GetGemsNftPurchase(a) => serde_json::to_string(a),
            ActionPayload::JettonTransfer(a) => serde_json::to_string(a),
            ActionPayload::ContractDeploy(a) => serde_json::to_string(a),
            ActionPayload::Subscription(a) => serde_json::to_string(a),
            ActionPayload::UnSubscription(a) => serde_json::to_string(a),
            ActionPayload::AuctionBid(a) => serde_json::to_string(a),
        }
        .map_err(|_| std::fmt::Error)?;
        write!(f, "{}: {payload}", self.action_type)
    }
}

/// Measures nanocoin an action hides, before a message is sent.
pub trait ExtraContributor {
    fn contribute_to_extra(&self, account: &AccountId, extra: i64) -> i64;
}

impl ExtraContributor for ActionPayload {
    fn contribute_to_extra(&self, account: &AccountId, extra: i64) -> i64 {
        match self {
            ActionPayload::NftItemTransfer(a) => a.contribute_to_extra(account, extra),
            ActionPayload::JettonTransfer(a) => a.contribute_to_extra(account, extra),
            ActionPayload::TonTransfer(_)
            | ActionPayload::SmartContractExec(_)
            | ActionPayload::GetGemsNftPurchase(_)
            | ActionPayload::ContractDeploy(_)
            | ActionPayload::Subscription(_)
            | ActionPayload::UnSubscription(_)
            | ActionPayload::AuctionBid(_) => extra,
        }
    }
}

impl ExtraContributor for NftTransferAction {
    fn contribute_to_extra(&self, account: &AccountId, extra: i64) -> i64 {
        extra + total_hidden_amount(account, &self.ton_attached)
    }
}

impl ExtraContributor for JettonTransferAction {
    fn contribute_to_extra(&self, account: &AccountId, extra: i64) -> i64 {
        extra + total_hidden_amount(account, &self.ton_attached)
    }
}

fn total_hidden_amount(account: &AccountId, values: &[HiddenTonValue]) -> i64 {
    values
        .iter()
        .filter(|v| v.account == *account)
        .map(|v| v.amount)
        .sum()
}
