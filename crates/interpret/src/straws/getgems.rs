//! Purchases through a GetGems sale contract.

use log::debug;
use tonflow_types::{AccountId, ContractInterface};

use crate::{
    actions::{Action, ActionPayload, ActionType, GetGemsNftPurchaseAction, HiddenTonValue},
    book::AddressBook,
    bubble::{Bubble, Info},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GetGemsNftPurchaseBubble {
    pub success: bool,
    pub nft: AccountId,
    pub new_owner: AccountId,
    /// Paid to the sale contract.
    pub price: i64,
    pub ton_attached: Vec<HiddenTonValue>,
}

impl GetGemsNftPurchaseBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::GetGemsNftPurchase,
            success: self.success,
            payload: ActionPayload::GetGemsNftPurchase(GetGemsNftPurchaseAction {
                nft: self.nft,
                new_owner: self.new_owner,
                ton_attached: self.ton_attached.clone(),
            }),
            simple_preview: preview::getgems_purchase(&self.new_owner, &self.nft, self.price, book),
        }
    }
}

/// Payment to a sale contract that hands the item to the buyer.
///
/// The item transfer sent by the sale and the sale's payouts (seller,
/// royalties, marketplace fee) are absorbed.
pub fn getgems_nft_purchase(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    if !tx.success || !tx.account.is(&ContractInterface::NftSaleGetgems) {
        return false;
    }
    let sale = tx.account.address;
    let price = tx.input_amount;
    let Some((index, transfer)) = bubble
        .children
        .iter()
        .enumerate()
        .find_map(|(index, child)| match &child.info {
            Info::NftTransfer(transfer) if transfer.sender == Some(sale) => {
                Some((index, transfer.clone()))
            }
            _ => None,
        })
    else {
        return false;
    };
    let Some(new_owner) = transfer.recipient else {
        return false;
    };

    bubble.absorb_child(index);
    bubble.absorb_children_where(|child| {
        child
            .tx()
            .map_or(false, |tx| tx.is_from(&sale) && tx.is_plain())
    });
    debug!("GetGems purchase of {} by {new_owner}", transfer.nft);
    bubble.info = Info::GetGemsNftPurchase(GetGemsNftPurchaseBubble {
        success: transfer.success,
        nft: transfer.nft,
        new_owner,
        price,
        ton_attached: transfer.ton_attached,
    });
    true
}
