//! Catch-all straws for transactions no pattern claimed.

use log::debug;
use tonflow_types::{opcode, AccountId};

use crate::{
    actions::{
        Action, ActionPayload, ActionType, Refund, RefundType, SmartContractAction,
        TonTransferAction,
    },
    book::AddressBook,
    bubble::{Bubble, Info, TxBubble},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TonTransferBubble {
    pub success: bool,
    pub amount: i64,
    pub sender: AccountId,
    pub recipient: AccountId,
    pub comment: Option<String>,
    pub refund: Option<Refund>,
}

impl TonTransferBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::TonTransfer,
            success: self.success,
            payload: ActionPayload::TonTransfer(TonTransferAction {
                amount: self.amount,
                comment: self.comment.clone(),
                recipient: self.recipient,
                sender: self.sender,
                refund: self.refund.clone(),
            }),
            simple_preview: preview::ton_transfer(
                &self.sender,
                &self.recipient,
                self.amount,
                book,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SmartContractExecBubble {
    pub success: bool,
    pub ton_attached: i64,
    pub executor: AccountId,
    pub contract: AccountId,
    pub operation: String,
    pub payload: String,
}

impl SmartContractExecBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::SmartContractExec,
            success: self.success,
            payload: ActionPayload::SmartContractExec(SmartContractAction {
                ton_attached: self.ton_attached,
                executor: self.executor,
                contract: self.contract,
                operation: self.operation.clone(),
                payload: self.payload.clone(),
            }),
            simple_preview: preview::smart_contract_exec(
                &self.executor,
                &self.contract,
                &self.operation,
                self.ton_attached,
                book,
            ),
        }
    }
}

/// A value transfer between accounts, if the transaction looks like one.
///
/// Plain messages, comments, bounces and anything sent to a wallet or to an
/// account without code qualify.
pub fn as_ton_transfer(tx: &TxBubble) -> Option<TonTransferBubble> {
    if tx.external {
        return None;
    }
    let sender = tx.input_from.as_ref()?;
    let qualifies = tx.is_plain()
        || tx.operation(opcode::ENCRYPTED_TEXT_COMMENT)
        || tx.bounced
        || tx.account.is_wallet()
        || !tx.account_was_active_at_computing_time;
    if !qualifies {
        return None;
    }
    let refund_type = RefundType::from_interfaces(&sender.interfaces);
    let refund = match tx.bounced || refund_type != RefundType::Unknown {
        true => Some(Refund {
            refund_type,
            origin: sender.address.to_raw(),
        }),
        false => None,
    };
    Some(TonTransferBubble {
        success: tx.success,
        amount: tx.input_amount,
        sender: sender.address,
        recipient: tx.account.address,
        comment: tx.comment(),
        refund,
    })
}

/// A call of a contract method, if the message carries an opcode.
pub fn as_smart_contract_exec(tx: &TxBubble) -> Option<SmartContractExecBubble> {
    if tx.external {
        return None;
    }
    let op = tx.op_code?;
    let sender = tx.input_from.as_ref()?;
    let operation = match &tx.decoded_body {
        Some(body) if !body.operation.is_empty() => body.operation.clone(),
        _ => opcode::name(op)
            .map(str::to_string)
            .unwrap_or_else(|| opcode::to_hex(op)),
    };
    let payload = tx
        .body()
        .map(|body| serde_json::to_string(body).unwrap_or_default())
        .unwrap_or_default();
    Some(SmartContractExecBubble {
        success: tx.success,
        ton_attached: tx.input_amount,
        executor: sender.address,
        contract: tx.account.address,
        operation,
        payload,
    })
}

/// How an unclaimed transaction is shown, `None` if it is not worth showing.
pub fn classify(tx: &TxBubble) -> Option<Info> {
    as_ton_transfer(tx)
        .map(Info::TonTransfer)
        .or_else(|| as_smart_contract_exec(tx).map(Info::SmartContractExec))
}

pub fn ton_transfer(bubble: &mut Bubble) -> bool {
    let Some(transfer) = bubble.tx().and_then(as_ton_transfer) else {
        return false;
    };
    debug!(
        "Ton transfer of {} from {} to {}",
        transfer.amount, transfer.sender, transfer.recipient
    );
    bubble.info = Info::TonTransfer(transfer);
    true
}

pub fn smart_contract_exec(bubble: &mut Bubble) -> bool {
    let Some(exec) = bubble.tx().and_then(as_smart_contract_exec) else {
        return false;
    };
    debug!("Smart contract {} executed {}", exec.contract, exec.operation);
    bubble.info = Info::SmartContractExec(exec);
    true
}

/// Hides whatever transaction is left, e.g., external messages and tick-tocks.
pub fn empty(bubble: &mut Bubble) -> bool {
    if bubble.tx().is_none() {
        return false;
    }
    bubble.info = Info::Empty;
    true
}

#[cfg(test)]
mod test {
    use tonflow_types::{
        body::{BodyValue, UnknownBody},
        test_utils::{account_id, TraceBuilder},
        ContractInterface,
    };

    use crate::adapter::from_trace;

    use super::*;

    fn bubble(builder: TraceBuilder) -> Bubble {
        from_trace(&builder.build())
    }

    #[test]
    fn test_ton_transfer_with_comment() {
        let mut b = bubble(TraceBuilder::internal(account_id(2), account_id(1), 5).comment("hi"));
        assert!(ton_transfer(&mut b));
        let Info::TonTransfer(transfer) = &b.info else {
            panic!("expected ton transfer, got {}", b.info.name());
        };
        assert_eq!(transfer.comment.as_deref(), Some("hi"));
        assert_eq!(transfer.sender, account_id(1));
        assert!(transfer.refund.is_none());
        // Already classified.
        assert!(!ton_transfer(&mut b));
    }

    #[test]
    fn test_opcode_to_wallet_is_transfer() {
        let mut b = bubble(
            TraceBuilder::internal(account_id(2), account_id(1), 5)
                .wallet()
                .op(opcode::EXCESSES),
        );
        assert!(ton_transfer(&mut b));
    }

    #[test]
    fn test_bounce_is_refund() {
        let trace = TraceBuilder::external(account_id(1)).child(
            TraceBuilder::internal(account_id(2), account_id(1), 5)
                .interfaces([ContractInterface::TelemintItem])
                .child(TraceBuilder::internal(account_id(1), account_id(2), 4).bounced()),
        );
        let b = bubble(trace);
        let bounce = b.children[0].children[0].tx().unwrap();
        let transfer = as_ton_transfer(bounce).unwrap();
        let refund = transfer.refund.unwrap();
        assert_eq!(refund.refund_type, RefundType::DnsTg);
        assert_eq!(refund.origin, account_id(2).to_raw());
    }

    #[test]
    fn test_smart_contract_exec_operation_names() {
        let known = bubble(TraceBuilder::internal(account_id(2), account_id(1), 5).op(opcode::EXCESSES));
        let exec = as_smart_contract_exec(known.tx().unwrap()).unwrap();
        assert_eq!(exec.operation, "Excesses");
        assert_eq!(exec.payload, "");

        let unknown = bubble(TraceBuilder::internal(account_id(2), account_id(1), 5).op(0x12345678));
        let exec = as_smart_contract_exec(unknown.tx().unwrap()).unwrap();
        assert_eq!(exec.operation, "0x12345678");

        let decoded = bubble(TraceBuilder::internal(account_id(2), account_id(1), 5).body(
            0x12345678,
            BodyValue::Unknown(UnknownBody {
                operation: "Swap".to_string(),
                payload: serde_json::json!({"amount": 1}),
            }),
        ));
        let exec = as_smart_contract_exec(decoded.tx().unwrap()).unwrap();
        assert_eq!(exec.operation, "Swap");
        assert!(exec.payload.contains("\"amount\":1"));
    }

    #[test]
    fn test_external_is_empty() {
        let mut b = bubble(TraceBuilder::external(account_id(1)).wallet());
        assert!(!ton_transfer(&mut b));
        assert!(!smart_contract_exec(&mut b));
        assert!(classify(b.tx().unwrap()).is_none());
        assert!(empty(&mut b));
        assert_eq!(b.info, Info::Empty);
        assert!(!empty(&mut b));
    }
}
