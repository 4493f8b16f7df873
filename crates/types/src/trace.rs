//! An executed trace: the tree of transactions caused by a single external
//! message. The summarizer reads it and never modifies it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{account::AccountId, body::DecodedBody, interfaces::ContractInterface};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("serde_json error {0}")]
    SerdeJson(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionType {
    #[default]
    Ordinary,
    TickTock,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    #[default]
    Nonexist,
    Uninit,
    Active,
    Frozen,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ComputeSkipReason {
    NoState,
    BadState,
    NoGas,
    Suspended,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputePhase {
    /// Present when the compute phase was skipped.
    #[serde(default)]
    pub skip_reason: Option<ComputeSkipReason>,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub exit_code: i32,
}

/// Inbound message of a transaction.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Absent for external messages.
    #[serde(default)]
    pub source: Option<AccountId>,
    pub destination: AccountId,
    /// Nanocoin.
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub bounce: bool,
    #[serde(default)]
    pub bounced: bool,
    #[serde(default)]
    pub op_code: Option<u32>,
    #[serde(default)]
    pub decoded_body: Option<DecodedBody>,
    /// State init attached to the message.
    #[serde(default, with = "hex_bytes")]
    pub init: Option<Vec<u8>>,
    /// Interfaces implemented by the code in `init`.
    #[serde(default)]
    pub init_interfaces: Vec<ContractInterface>,
    #[serde(default)]
    pub fwd_fee: i64,
}

impl Message {
    pub fn is_external(&self) -> bool {
        self.source.is_none()
    }
}

/// Outbound message that did not produce a transaction within the trace.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutMessage {
    #[serde(default)]
    pub destination: Option<AccountId>,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub fwd_fee: i64,
    #[serde(default)]
    pub op_code: Option<u32>,
}

/// NFT item data fetched alongside the trace.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftItem {
    pub address: AccountId,
    #[serde(default)]
    pub collection: Option<AccountId>,
    #[serde(default)]
    pub owner: Option<AccountId>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Side channel with facts about a transaction's account that are not part
/// of the transaction itself.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalInfo {
    /// Master of a jetton wallet.
    #[serde(default)]
    pub jetton_master: Option<AccountId>,
    /// Item traded or auctioned by this account.
    #[serde(default)]
    pub nft_item: Option<NftItem>,
    /// Beneficiary of a subscription plugin.
    #[serde(default)]
    pub subscription_beneficiary: Option<AccountId>,
}

/// A single transaction and the transactions it caused.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub account: AccountId,
    #[serde(default)]
    pub account_interfaces: Vec<ContractInterface>,
    pub success: bool,
    #[serde(default)]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub compute_phase: Option<ComputePhase>,
    #[serde(default)]
    pub orig_status: AccountStatus,
    #[serde(default)]
    pub end_status: AccountStatus,
    #[serde(default)]
    pub in_msg: Option<Message>,
    /// Outbound messages not repeated as the inbound message of a child.
    #[serde(default)]
    pub out_msgs: Vec<OutMessage>,
    #[serde(default)]
    pub total_fee: i64,
    #[serde(default)]
    pub additional_info: Option<AdditionalInfo>,
    #[serde(default)]
    pub children: Vec<Trace>,
}

impl Trace {
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self, TraceError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Number of transactions in the trace.
    pub fn transaction_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Trace::transaction_count)
            .sum::<usize>()
    }

    /// Value brought into the trace by an external inbound message at the root.
    pub fn external_input(&self) -> i64 {
        match &self.in_msg {
            Some(msg) if msg.is_external() => msg.value,
            _ => 0,
        }
    }
}

/// Optional bytes as a hex string.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, s: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(b) => s.serialize_some(&hex::encode(b)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Vec<u8>>, D::Error> {
        let s: Option<String> = Option::deserialize(d)?;
        s.map(|h| hex::decode(h.trim_start_matches("0x")).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const WALLET: &str = "0:0101010101010101010101010101010101010101010101010101010101010101";
    const OTHER: &str = "0:0202020202020202020202020202020202020202020202020202020202020202";

    #[test]
    fn test_from_json() {
        let json = format!(
            r#"{{
                "account": "{WALLET}",
                "accountInterfaces": ["wallet_v4r2"],
                "success": true,
                "origStatus": "active",
                "endStatus": "active",
                "inMsg": {{"destination": "{WALLET}"}},
                "totalFee": 1000,
                "children": [{{
                    "account": "{OTHER}",
                    "success": true,
                    "inMsg": {{
                        "source": "{WALLET}",
                        "destination": "{OTHER}",
                        "value": 1000000000,
                        "init": "0xb5ee9c72",
                        "fwdFee": 10
                    }}
                }}]
            }}"#
        );
        let trace = Trace::from_json(&json).unwrap();
        assert_eq!(trace.transaction_count(), 2);
        assert_eq!(trace.external_input(), 0);
        assert_eq!(trace.account_interfaces, vec![ContractInterface::WalletV4R2]);
        assert!(trace.in_msg.as_ref().unwrap().is_external());
        let child = &trace.children[0];
        let msg = child.in_msg.as_ref().unwrap();
        assert_eq!(msg.value, 1_000_000_000);
        assert_eq!(msg.init, Some(vec![0xb5, 0xee, 0x9c, 0x72]));
        assert_eq!(child.orig_status, AccountStatus::Nonexist);
        assert_eq!(child.transaction_type, TransactionType::Ordinary);
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            Trace::from_json("{\"account\": \"0:00\"}"),
            Err(TraceError::SerdeJson(_))
        ));
    }
}
