//! Leading 32-bit tags of internal message bodies.

/// Plain text comment (also used with an empty body).
pub const TEXT_COMMENT: u32 = 0x0000_0000;
pub const ENCRYPTED_TEXT_COMMENT: u32 = 0x2167_da4b;
/// Prefix of a bounced message body.
pub const BOUNCED: u32 = 0xffff_ffff;

pub const EXCESSES: u32 = 0xd532_76db;

pub const NFT_TRANSFER: u32 = 0x5fcc_3d14;
pub const NFT_OWNERSHIP_ASSIGNED: u32 = 0x0513_8d91;

pub const JETTON_TRANSFER: u32 = 0x0f8a_7ea5;
pub const JETTON_INTERNAL_TRANSFER: u32 = 0x178d_4519;
pub const JETTON_NOTIFY: u32 = 0x7362_d09c;

pub const TELEMINT_DEPLOY: u32 = 0x4637_289a;
pub const TELEITEM_DEPLOY: u32 = 0x299a_3e15;
pub const TELEITEM_OUTBID_NOTIFICATION: u32 = 0x557c_ea20;

/// Subscription plugin asks the wallet for a payment ("plug").
pub const SUBSCRIPTION_REQUEST_FUNDS: u32 = 0x706c_7567;
/// Wallet answers a funds request ("plug" | 0x80000000).
pub const SUBSCRIPTION_PAYMENT: u32 = 0xf06c_7567;
/// Plugin forwards the payment to the beneficiary ("subs").
pub const SUBSCRIPTION_BENEFICIARY: u32 = 0x7375_6273;
/// Wallet asks the plugin to self destruct ("dstr").
pub const SUBSCRIPTION_DESTRUCT: u32 = 0x6473_7472;
pub const SUBSCRIPTION_DESTRUCT_RESPONSE: u32 = 0xe473_7472;

/// Name of a known opcode, as used for SmartContractExec operations.
pub fn name(op: u32) -> Option<&'static str> {
    Some(match op {
        TEXT_COMMENT => "TextComment",
        ENCRYPTED_TEXT_COMMENT => "EncryptedTextComment",
        EXCESSES => "Excesses",
        NFT_TRANSFER => "NftTransfer",
        NFT_OWNERSHIP_ASSIGNED => "NftOwnershipAssigned",
        JETTON_TRANSFER => "JettonTransfer",
        JETTON_INTERNAL_TRANSFER => "JettonInternalTransfer",
        JETTON_NOTIFY => "JettonNotify",
        TELEMINT_DEPLOY => "TelemintDeploy",
        TELEITEM_DEPLOY => "TeleitemDeploy",
        TELEITEM_OUTBID_NOTIFICATION => "TeleitemOutbidNotification",
        SUBSCRIPTION_REQUEST_FUNDS => "SubscriptionRequestFunds",
        SUBSCRIPTION_PAYMENT => "SubscriptionPayment",
        SUBSCRIPTION_BENEFICIARY => "SubscriptionBeneficiary",
        SUBSCRIPTION_DESTRUCT => "SubscriptionDestruct",
        SUBSCRIPTION_DESTRUCT_RESPONSE => "SubscriptionDestructResponse",
        _ => return None,
    })
}

/// `0x`-prefixed, zero padded hex form of an opcode.
pub fn to_hex(op: u32) -> String {
    format!("0x{op:08x}")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_names() {
        assert_eq!(name(JETTON_TRANSFER), Some("JettonTransfer"));
        assert_eq!(name(0x1234_5678), None);
        assert_eq!(to_hex(JETTON_TRANSFER), "0x0f8a7ea5");
        assert_eq!(SUBSCRIPTION_PAYMENT, SUBSCRIPTION_REQUEST_FUNDS | 0x8000_0000);
        assert_eq!(
            SUBSCRIPTION_DESTRUCT_RESPONSE,
            SUBSCRIPTION_DESTRUCT | 0x8000_0000
        );
    }
}
