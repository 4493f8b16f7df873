//! Builders for hand written traces in tests.

use crate::{
    account::AccountId,
    body::{BodyValue, DecodedBody},
    interfaces::ContractInterface,
    opcode,
    trace::{
        AccountStatus, AdditionalInfo, ComputePhase, ComputeSkipReason, Message, NftItem,
        OutMessage, Trace, TransactionType,
    },
};

/// Deterministic account on the basechain with every hash byte set to `seed`.
pub fn account_id(seed: u8) -> AccountId {
    AccountId::new(0, [seed; 32])
}

/// Builds a [`Trace`] one transaction at a time.
#[derive(Clone, Debug)]
pub struct TraceBuilder(Trace);

impl TraceBuilder {
    fn new(account: AccountId, in_msg: Option<Message>) -> Self {
        Self(Trace {
            account,
            success: true,
            orig_status: AccountStatus::Active,
            end_status: AccountStatus::Active,
            in_msg,
            ..Default::default()
        })
    }

    /// Transaction caused by an external message (e.g., a signed wallet request).
    pub fn external(account: AccountId) -> Self {
        let msg = Message {
            destination: account,
            ..Default::default()
        };
        Self::new(account, Some(msg))
    }

    /// Transaction caused by an internal message carrying `value` nanocoin.
    pub fn internal(account: AccountId, source: AccountId, value: i64) -> Self {
        let msg = Message {
            source: Some(source),
            destination: account,
            value,
            bounce: true,
            ..Default::default()
        };
        Self::new(account, Some(msg))
    }

    /// Transaction without an inbound message.
    pub fn tick_tock(account: AccountId) -> Self {
        let mut builder = Self::new(account, None);
        builder.0.transaction_type = TransactionType::TickTock;
        builder
    }

    pub fn interfaces<I: IntoIterator<Item = ContractInterface>>(mut self, interfaces: I) -> Self {
        self.0.account_interfaces = interfaces.into_iter().collect();
        self
    }

    pub fn wallet(self) -> Self {
        self.interfaces([ContractInterface::WalletV4R2])
    }

    /// Sets an opcode without a decoded body.
    pub fn op(mut self, op: u32) -> Self {
        self.msg().op_code = Some(op);
        self
    }

    /// Sets an opcode and its decoded body.
    pub fn body(mut self, op: u32, value: BodyValue) -> Self {
        let msg = self.msg();
        msg.op_code = Some(op);
        msg.decoded_body = Some(DecodedBody::new(value));
        self
    }

    pub fn comment(mut self, text: &str) -> Self {
        let msg = self.msg();
        msg.op_code = Some(opcode::TEXT_COMMENT);
        msg.decoded_body = Some(DecodedBody::text_comment(text));
        self
    }

    pub fn failed(mut self) -> Self {
        self.0.success = false;
        self
    }

    /// The inbound message is a bounce of an earlier message.
    pub fn bounced(mut self) -> Self {
        let msg = self.msg();
        msg.bounced = true;
        msg.bounce = false;
        msg.op_code = Some(opcode::BOUNCED);
        msg.decoded_body = None;
        self
    }

    /// The account is deployed by this transaction using a state init.
    pub fn deploys<I: IntoIterator<Item = ContractInterface>>(mut self, interfaces: I) -> Self {
        let interfaces: Vec<ContractInterface> = interfaces.into_iter().collect();
        self.0.orig_status = AccountStatus::Nonexist;
        self.0.end_status = AccountStatus::Active;
        let msg = self.msg();
        msg.init = Some(vec![0xb5, 0xee, 0x9c, 0x72]);
        msg.init_interfaces = interfaces.clone();
        self.0.account_interfaces = interfaces;
        self
    }

    /// The account had no state when the message arrived.
    pub fn uninitialized(mut self) -> Self {
        self.0.orig_status = AccountStatus::Uninit;
        self.0.end_status = AccountStatus::Uninit;
        self.0.compute_phase = Some(ComputePhase {
            skip_reason: Some(ComputeSkipReason::NoState),
            ..Default::default()
        });
        self
    }

    pub fn fee(mut self, total_fee: i64) -> Self {
        self.0.total_fee = total_fee;
        self
    }

    /// Forwarding fee of the inbound message, charged to the sender.
    pub fn fwd_fee(mut self, fee: i64) -> Self {
        self.msg().fwd_fee = fee;
        self
    }

    pub fn out_msg(mut self, destination: Option<AccountId>, value: i64, fwd_fee: i64) -> Self {
        self.0.out_msgs.push(OutMessage {
            destination,
            value,
            fwd_fee,
            op_code: None,
        });
        self
    }

    pub fn jetton_master(mut self, master: AccountId) -> Self {
        self.info().jetton_master = Some(master);
        self
    }

    pub fn nft_item(mut self, item: NftItem) -> Self {
        self.info().nft_item = Some(item);
        self
    }

    pub fn subscription_beneficiary(mut self, beneficiary: AccountId) -> Self {
        self.info().subscription_beneficiary = Some(beneficiary);
        self
    }

    pub fn child(mut self, child: TraceBuilder) -> Self {
        self.0.children.push(child.0);
        self
    }

    pub fn build(self) -> Trace {
        self.0
    }

    fn msg(&mut self) -> &mut Message {
        let account = self.0.account;
        self.0.in_msg.get_or_insert_with(|| Message {
            destination: account,
            ..Default::default()
        })
    }

    fn info(&mut self) -> &mut AdditionalInfo {
        self.0.additional_info.get_or_insert_with(Default::default)
    }
}
