//! Bounces that return funds of a recognised transfer.

use log::debug;

use crate::{
    actions::Refund,
    bubble::{Bubble, Info},
};

/// Absorbs bounced messages sent back by an account of an NFT or jetton
/// transfer and marks the transfer as refunded by the bouncing contract.
pub fn bounced_refund(bubble: &mut Bubble) -> bool {
    let has_refund = match &bubble.info {
        Info::NftTransfer(transfer) => transfer.refund.is_some(),
        Info::JettonTransfer(transfer) => transfer.refund.is_some(),
        _ => return false,
    };
    if has_refund {
        return false;
    }
    let Some(index) = bubble.position_of_tx(|tx| {
        tx.bounced
            && tx
                .input_from
                .as_ref()
                .map_or(false, |from| bubble.accounts.contains(&from.address))
    }) else {
        return false;
    };
    let Some(origin) = bubble.children[index]
        .tx()
        .and_then(|tx| tx.input_from.clone())
    else {
        return false;
    };
    let accounts = bubble.accounts.clone();
    bubble.absorb_children_where(|child| {
        child.tx().map_or(false, |tx| {
            tx.bounced
                && tx
                    .input_from
                    .as_ref()
                    .map_or(false, |from| accounts.contains(&from.address))
        })
    });
    let refund = Refund::from_contract(&origin.address, &origin.interfaces);
    debug!("Refund from {} of type {:?}", origin.address, refund.refund_type);
    match &mut bubble.info {
        Info::NftTransfer(transfer) => transfer.refund = Some(refund),
        Info::JettonTransfer(transfer) => transfer.refund = Some(refund),
        _ => {}
    }
    true
}

#[cfg(test)]
mod test {
    use tonflow_types::{
        body::NftTransferBody,
        opcode,
        test_utils::{account_id, TraceBuilder},
        BodyValue, ContractInterface,
    };

    use crate::{actions::RefundType, adapter::from_trace, straws::nft::nft_transfer};

    use super::*;

    #[test]
    fn test_failed_nft_transfer_refund() {
        let (a, nft, b) = (account_id(1), account_id(7), account_id(2));
        let trace = TraceBuilder::internal(nft, a, 1_000_000)
            .interfaces([ContractInterface::NftItem])
            .body(
                opcode::NFT_TRANSFER,
                BodyValue::NftTransfer(NftTransferBody {
                    query_id: 0,
                    new_owner: b,
                    response_destination: None,
                    forward_amount: 0,
                    forward_payload: None,
                }),
            )
            .failed()
            .child(TraceBuilder::internal(a, nft, 900_000).bounced());
        let mut bubble = from_trace(&trace.build());
        assert!(!bounced_refund(&mut bubble));
        assert!(nft_transfer(&mut bubble));
        assert_eq!(bubble.children.len(), 1);
        assert!(bounced_refund(&mut bubble));
        assert!(bubble.children.is_empty());
        let Info::NftTransfer(transfer) = &bubble.info else {
            panic!("expected nft transfer");
        };
        let refund = transfer.refund.as_ref().unwrap();
        assert_eq!(refund.refund_type, RefundType::Unknown);
        assert_eq!(refund.origin, nft.to_raw());
        assert!(!transfer.success);
        assert!(!bounced_refund(&mut bubble));
    }
}
