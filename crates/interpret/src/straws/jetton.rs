//! Jetton transfers between jetton wallets.

use log::debug;
use tonflow_types::{body::forward_comment, opcode, AccountId, BodyValue, VarUInteger16};

use crate::{
    actions::{Action, ActionPayload, ActionType, HiddenTonValue, JettonTransferAction, Refund},
    book::AddressBook,
    bubble::{Bubble, Info, TxBubble},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonTransferBubble {
    pub success: bool,
    /// Jetton master.
    pub jetton: AccountId,
    pub sender: Option<AccountId>,
    pub recipient: Option<AccountId>,
    pub senders_wallet: AccountId,
    pub recipients_wallet: AccountId,
    pub amount: VarUInteger16,
    pub comment: Option<String>,
    pub refund: Option<Refund>,
    pub ton_attached: Vec<HiddenTonValue>,
}

impl JettonTransferBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::JettonTransfer,
            success: self.success,
            payload: ActionPayload::JettonTransfer(JettonTransferAction {
                comment: self.comment.clone(),
                jetton: self.jetton,
                recipient: self.recipient,
                sender: self.sender,
                recipients_wallet: self.recipients_wallet,
                senders_wallet: self.senders_wallet,
                amount: self.amount,
                refund: self.refund.clone(),
                ton_attached: self.ton_attached.clone(),
            }),
            simple_preview: preview::jetton_transfer(
                self.sender.as_ref(),
                self.recipient.as_ref(),
                &self.jetton,
                self.amount,
                book,
            ),
        }
    }
}

fn jetton_master(tx: &TxBubble) -> Option<AccountId> {
    tx.additional_info().and_then(|info| info.jetton_master)
}

/// `JettonTransfer` to the sender's wallet followed by the internal transfer
/// to the recipient's wallet.
///
/// The notification to the recipient and the excesses returned by either
/// wallet are absorbed too.
pub fn jetton_transfer(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    let Some(BodyValue::JettonTransfer(body)) = tx.body() else {
        return false;
    };
    if !tx.operation(opcode::JETTON_TRANSFER) {
        return false;
    }
    let senders_wallet = tx.account.address;
    let Some(index) = bubble.position_of_tx(|child| {
        child.operation(opcode::JETTON_INTERNAL_TRANSFER) && child.is_from(&senders_wallet)
    }) else {
        return false;
    };
    let Some(internal) = bubble.children[index].tx() else {
        return false;
    };
    let Some(jetton) = jetton_master(tx).or_else(|| jetton_master(internal)) else {
        return false;
    };
    let sender = tx.sender();
    let recipients_wallet = internal.account.address;
    let transfer = JettonTransferBubble {
        success: tx.success && internal.success,
        jetton,
        sender,
        recipient: Some(body.destination),
        senders_wallet,
        recipients_wallet,
        amount: body.amount,
        comment: forward_comment(&body.forward_payload),
        refund: None,
        ton_attached: sender
            .map(|account| HiddenTonValue {
                account,
                amount: tx.input_amount,
            })
            .into_iter()
            .collect(),
    };

    bubble.absorb_child(index);
    bubble.absorb_children_where(|child| {
        child.tx().map_or(false, |tx| {
            (tx.is_from(&recipients_wallet) || tx.is_from(&senders_wallet))
                && (tx.operation(opcode::JETTON_NOTIFY) || tx.operation(opcode::EXCESSES))
        })
    });
    if transfer.success {
        bubble
            .value_flow
            .move_jettons(transfer.sender, transfer.recipient, jetton, transfer.amount);
    }
    bubble.accounts.extend(transfer.recipient);
    debug!(
        "Jetton transfer of {} {jetton} from {senders_wallet} to {recipients_wallet}",
        transfer.amount
    );
    bubble.info = Info::JettonTransfer(transfer);
    true
}

#[cfg(test)]
mod test {
    use num_bigint::BigInt;
    use tonflow_types::{
        body::{JettonInternalTransferBody, JettonNotifyBody, JettonTransferBody},
        test_utils::{account_id, TraceBuilder},
    };

    use crate::adapter::from_trace;

    use super::*;

    fn trace(master: Option<AccountId>) -> TraceBuilder {
        let (a, aw, bw, b, m) = (
            account_id(1),
            account_id(2),
            account_id(3),
            account_id(4),
            account_id(9),
        );
        let mut sender_wallet = TraceBuilder::internal(aw, a, 100_000_000).body(
            opcode::JETTON_TRANSFER,
            BodyValue::JettonTransfer(JettonTransferBody {
                query_id: 1,
                amount: VarUInteger16(500),
                destination: b,
                response_destination: Some(a),
                forward_ton_amount: 1,
                forward_payload: None,
            }),
        );
        if let Some(master) = master {
            sender_wallet = sender_wallet.jetton_master(master);
        }
        sender_wallet.child(
            TraceBuilder::internal(bw, aw, 90_000_000)
                .body(
                    opcode::JETTON_INTERNAL_TRANSFER,
                    BodyValue::JettonInternalTransfer(JettonInternalTransferBody {
                        query_id: 1,
                        amount: VarUInteger16(500),
                        from: Some(a),
                        response_address: Some(a),
                        forward_ton_amount: 1,
                        forward_payload: None,
                    }),
                )
                .jetton_master(m)
                .child(TraceBuilder::internal(b, bw, 1).body(
                    opcode::JETTON_NOTIFY,
                    BodyValue::JettonNotify(JettonNotifyBody {
                        query_id: 1,
                        amount: VarUInteger16(500),
                        sender: Some(a),
                        forward_payload: None,
                    }),
                ))
                .child(TraceBuilder::internal(a, bw, 80_000_000).op(opcode::EXCESSES)),
        )
    }

    #[test]
    fn test_jetton_transfer() {
        let mut bubble = from_trace(&trace(None).build());
        assert!(jetton_transfer(&mut bubble));
        assert!(bubble.children.is_empty());
        let Info::JettonTransfer(transfer) = &bubble.info else {
            panic!("expected jetton transfer");
        };
        assert_eq!(transfer.jetton, account_id(9));
        assert_eq!(transfer.sender, Some(account_id(1)));
        assert_eq!(transfer.recipient, Some(account_id(4)));
        assert_eq!(transfer.senders_wallet, account_id(2));
        assert_eq!(transfer.recipients_wallet, account_id(3));
        assert_eq!(transfer.amount, VarUInteger16(500));

        let flow = &bubble.value_flow;
        assert_eq!(flow.get(&account_id(4)).unwrap().jettons[&account_id(9)], BigInt::from(500));
        assert_eq!(flow.get(&account_id(1)).unwrap().jettons[&account_id(9)], BigInt::from(-500));
    }

    #[test]
    fn test_master_resolution() {
        let mut root = from_trace(&trace(Some(account_id(8))).build());
        assert!(jetton_transfer(&mut root));
        let Info::JettonTransfer(transfer) = &root.info else {
            panic!("expected jetton transfer");
        };
        // The sender wallet's own master wins.
        assert_eq!(transfer.jetton, account_id(8));

        let mut child_only = from_trace(&trace(None).build()).children.remove(0);
        assert!(!jetton_transfer(&mut child_only));
    }
}
