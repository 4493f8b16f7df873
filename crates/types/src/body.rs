//! For message bodies that were decoded before reaching the summarizer.
//!
//! Only the payloads that the summarizer inspects are typed, everything else is
//! carried as opaque JSON.

use serde::{Deserialize, Serialize};

use crate::{account::AccountId, amount::VarUInteger16};

/// A decoded message body: the name of the operation and its typed payload.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBody {
    pub operation: String,
    pub value: BodyValue,
}

impl DecodedBody {
    pub fn new(value: BodyValue) -> Self {
        Self {
            operation: value.operation().to_string(),
            value,
        }
    }

    pub fn text_comment<T: Into<String>>(text: T) -> Self {
        Self::new(BodyValue::TextComment(TextCommentBody { text: text.into() }))
    }

    /// Text of a plain comment body.
    pub fn comment(&self) -> Option<&str> {
        match &self.value {
            BodyValue::TextComment(body) => Some(&body.text),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BodyValue {
    TextComment(TextCommentBody),
    EncryptedTextComment,
    Excesses(ExcessesBody),
    NftTransfer(NftTransferBody),
    NftOwnershipAssigned(NftOwnershipAssignedBody),
    JettonTransfer(JettonTransferBody),
    JettonInternalTransfer(JettonInternalTransferBody),
    JettonNotify(JettonNotifyBody),
    TelemintDeploy(TelemintDeployBody),
    SubscriptionRequestFunds,
    SubscriptionPayment,
    SubscriptionDestruct,
    /// Decoded by an ABI the summarizer does not model.
    Unknown(UnknownBody),
}

impl BodyValue {
    pub fn operation(&self) -> &str {
        match self {
            BodyValue::TextComment(_) => "TextComment",
            BodyValue::EncryptedTextComment => "EncryptedTextComment",
            BodyValue::Excesses(_) => "Excesses",
            BodyValue::NftTransfer(_) => "NftTransfer",
            BodyValue::NftOwnershipAssigned(_) => "NftOwnershipAssigned",
            BodyValue::JettonTransfer(_) => "JettonTransfer",
            BodyValue::JettonInternalTransfer(_) => "JettonInternalTransfer",
            BodyValue::JettonNotify(_) => "JettonNotify",
            BodyValue::TelemintDeploy(_) => "TelemintDeploy",
            BodyValue::SubscriptionRequestFunds => "SubscriptionRequestFunds",
            BodyValue::SubscriptionPayment => "SubscriptionPayment",
            BodyValue::SubscriptionDestruct => "SubscriptionDestruct",
            BodyValue::Unknown(body) => &body.operation,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextCommentBody {
    pub text: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcessesBody {
    pub query_id: u64,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftTransferBody {
    #[serde(default)]
    pub query_id: u64,
    pub new_owner: AccountId,
    #[serde(default)]
    pub response_destination: Option<AccountId>,
    #[serde(default)]
    pub forward_amount: i64,
    #[serde(default)]
    pub forward_payload: Option<ForwardPayload>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftOwnershipAssignedBody {
    #[serde(default)]
    pub query_id: u64,
    #[serde(default)]
    pub prev_owner: Option<AccountId>,
    #[serde(default)]
    pub forward_payload: Option<ForwardPayload>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JettonTransferBody {
    #[serde(default)]
    pub query_id: u64,
    pub amount: VarUInteger16,
    pub destination: AccountId,
    #[serde(default)]
    pub response_destination: Option<AccountId>,
    #[serde(default)]
    pub forward_ton_amount: i64,
    #[serde(default)]
    pub forward_payload: Option<ForwardPayload>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JettonInternalTransferBody {
    #[serde(default)]
    pub query_id: u64,
    pub amount: VarUInteger16,
    #[serde(default)]
    pub from: Option<AccountId>,
    #[serde(default)]
    pub response_address: Option<AccountId>,
    #[serde(default)]
    pub forward_ton_amount: i64,
    #[serde(default)]
    pub forward_payload: Option<ForwardPayload>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JettonNotifyBody {
    #[serde(default)]
    pub query_id: u64,
    pub amount: VarUInteger16,
    #[serde(default)]
    pub sender: Option<AccountId>,
    #[serde(default)]
    pub forward_payload: Option<ForwardPayload>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemintDeployBody {
    pub token_name: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownBody {
    pub operation: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Payload carried along an NFT or jetton transfer.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ForwardPayload {
    TextComment(TextCommentBody),
    Other,
}

impl ForwardPayload {
    pub fn comment(&self) -> Option<&str> {
        match self {
            ForwardPayload::TextComment(body) => Some(&body.text),
            ForwardPayload::Other => None,
        }
    }
}

/// Comment of an optional forward payload.
pub fn forward_comment(payload: &Option<ForwardPayload>) -> Option<String> {
    payload
        .as_ref()
        .and_then(ForwardPayload::comment)
        .map(str::to_string)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_jetton_transfer() {
        let json = r#"{
            "operation": "JettonTransfer",
            "value": {
                "type": "jettonTransfer",
                "queryId": 7,
                "amount": "500",
                "destination": "0:0202020202020202020202020202020202020202020202020202020202020202",
                "forwardPayload": {"type": "textComment", "text": "gm"}
            }
        }"#;
        let body: DecodedBody = serde_json::from_str(json).unwrap();
        let BodyValue::JettonTransfer(transfer) = &body.value else {
            panic!("expected a jetton transfer, got {body:?}")
        };
        assert_eq!(transfer.amount, VarUInteger16(500));
        assert_eq!(transfer.query_id, 7);
        assert_eq!(transfer.response_destination, None);
        assert_eq!(forward_comment(&transfer.forward_payload).as_deref(), Some("gm"));
    }

    #[test]
    fn test_text_comment() {
        let body = DecodedBody::text_comment("hi");
        assert_eq!(body.operation, "TextComment");
        assert_eq!(body.comment(), Some("hi"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["value"]["type"], "textComment");
    }
}
