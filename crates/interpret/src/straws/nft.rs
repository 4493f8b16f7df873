//! NFT item transfers.

use log::debug;
use tonflow_types::{body::forward_comment, opcode, AccountId, BodyValue};

use crate::{
    actions::{Action, ActionPayload, ActionType, HiddenTonValue, NftTransferAction, Refund},
    book::AddressBook,
    bubble::{Bubble, Info},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NftTransferBubble {
    pub success: bool,
    pub sender: Option<AccountId>,
    pub recipient: Option<AccountId>,
    pub nft: AccountId,
    pub comment: Option<String>,
    pub refund: Option<Refund>,
    pub ton_attached: Vec<HiddenTonValue>,
}

impl NftTransferBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::NftItemTransfer,
            success: self.success,
            payload: ActionPayload::NftItemTransfer(NftTransferAction {
                comment: self.comment.clone(),
                recipient: self.recipient,
                sender: self.sender,
                nft: self.nft,
                refund: self.refund.clone(),
                ton_attached: self.ton_attached.clone(),
            }),
            simple_preview: preview::nft_transfer(
                self.sender.as_ref(),
                self.recipient.as_ref(),
                &self.nft,
                book,
            ),
        }
    }
}

/// `NftTransfer` sent to an item, with the item's notifications.
///
/// The item answers the new owner with `OwnershipAssigned` and the response
/// destination with `Excesses`; both are absorbed.
pub fn nft_transfer(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    let Some(BodyValue::NftTransfer(body)) = tx.body() else {
        return false;
    };
    if !tx.operation(opcode::NFT_TRANSFER) {
        return false;
    }
    let nft = tx.account.address;
    let sender = tx.sender();
    let transfer = NftTransferBubble {
        success: tx.success,
        sender,
        recipient: Some(body.new_owner),
        nft,
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

    bubble.absorb_children_where(|child| {
        child.tx().map_or(false, |tx| {
            tx.is_from(&nft)
                && (tx.operation(opcode::NFT_OWNERSHIP_ASSIGNED) || tx.operation(opcode::EXCESSES))
        })
    });
    if transfer.success {
        if let Some(recipient) = transfer.recipient {
            bubble.value_flow.add_nfts(recipient, nft, 1);
            bubble.accounts.insert(recipient);
        }
        if let Some(sender) = transfer.sender {
            bubble.value_flow.add_nfts(sender, nft, -1);
        }
    }
    debug!(
        "Nft transfer of {nft} to {:?}, success {}",
        transfer.recipient.map(|r| r.to_string()),
        transfer.success
    );
    bubble.info = Info::NftTransfer(transfer);
    true
}

#[cfg(test)]
mod test {
    use tonflow_types::{
        body::{ExcessesBody, NftTransferBody},
        test_utils::{account_id, TraceBuilder},
    };

    use crate::adapter::from_trace;

    use super::*;

    fn transfer_body(new_owner: AccountId) -> BodyValue {
        BodyValue::NftTransfer(NftTransferBody {
            query_id: 0,
            new_owner,
            response_destination: None,
            forward_amount: 1,
            forward_payload: None,
        })
    }

    #[test]
    fn test_nft_transfer() {
        let (a, nft, b) = (account_id(1), account_id(7), account_id(2));
        let trace = TraceBuilder::internal(nft, a, 50_000_000)
            .body(opcode::NFT_TRANSFER, transfer_body(b))
            .child(
                TraceBuilder::internal(b, nft, 1)
                    .body(opcode::EXCESSES, BodyValue::Excesses(ExcessesBody::default())),
            )
            .child(TraceBuilder::internal(account_id(3), nft, 1).op(0x1234_5678));
        let mut bubble = from_trace(&trace.build());
        assert!(nft_transfer(&mut bubble));
        assert_eq!(bubble.children.len(), 1);
        let Info::NftTransfer(transfer) = &bubble.info else {
            panic!("expected nft transfer");
        };
        assert!(transfer.success);
        assert_eq!(transfer.sender, Some(a));
        assert_eq!(transfer.recipient, Some(b));
        assert_eq!(transfer.ton_attached[0].amount, 50_000_000);
        assert_eq!(bubble.value_flow.get(&b).unwrap().nfts[&nft], 1);
        assert_eq!(bubble.value_flow.get(&a).unwrap().nfts[&nft], -1);
        assert!(!nft_transfer(&mut bubble));
    }

    #[test]
    fn test_failed_transfer_moves_nothing() {
        let (a, nft, b) = (account_id(1), account_id(7), account_id(2));
        let trace = TraceBuilder::internal(nft, a, 1)
            .body(opcode::NFT_TRANSFER, transfer_body(b))
            .failed();
        let mut bubble = from_trace(&trace.build());
        assert!(nft_transfer(&mut bubble));
        assert!(bubble.value_flow.get(&b).is_none());
        assert!(bubble.value_flow.get(&a).map_or(true, |f| f.nfts.is_empty()));
    }
}
