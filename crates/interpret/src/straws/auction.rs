//! Bids on NFT and domain auctions.

use log::debug;
use tonflow_types::{opcode, AccountId, BodyValue, ContractInterface, NftItem};

use crate::{
    actions::{Action, ActionPayload, ActionType, AuctionBidAction, AuctionType},
    book::{AddressBook, AuctionKind},
    bubble::{Account, Bubble, Info},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionBidBubble {
    pub success: bool,
    pub bidder: AccountId,
    pub previous_bidder: Option<AccountId>,
    pub bid: i64,
    pub item: Option<NftItem>,
    /// Contract running the auction.
    pub auction: AccountId,
    /// Unknown for a DNS item whose zone only the address book knows.
    pub auction_type: AuctionType,
    /// First bid on a Telegram item, which also deploys it.
    pub tg_init: bool,
}

impl AuctionBidBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        let auction_type = match (self.auction_type, book.auction_kind(&self.auction)) {
            (AuctionType::Unknown, AuctionKind::Tg) => AuctionType::DnsTg,
            (AuctionType::Unknown, _) => AuctionType::DnsTon,
            (known, _) => known,
        };
        let action_type = match self.tg_init {
            true => ActionType::AuctionTgInitBid,
            false => ActionType::AuctionBid,
        };
        let item_name = self.item.as_ref().and_then(|item| item.name.as_deref());
        Action {
            action_type,
            success: self.success,
            payload: ActionPayload::AuctionBid(AuctionBidAction {
                bidder: self.bidder,
                previous_bidder: self.previous_bidder,
                bid: self.bid,
                item: self.item.clone(),
                auction_type,
            }),
            simple_preview: preview::auction_bid(
                &self.bidder,
                &self.auction,
                self.bid,
                item_name,
                self.tg_init,
                book,
            ),
        }
    }
}

/// The kind of auction a contract runs, if any.
fn auction_type(account: &Account) -> Option<AuctionType> {
    if account.is(&ContractInterface::NftAuctionGetgems) {
        Some(AuctionType::GetGems)
    } else if account.is(&ContractInterface::TelemintItem) {
        Some(AuctionType::DnsTg)
    } else if account.is(&ContractInterface::DnsItem) {
        Some(AuctionType::Unknown)
    } else {
        None
    }
}

/// Plain payment to a contract auctioning an item.
///
/// The auction is recognised by its interfaces only. The refund of the
/// outbid bidder is absorbed.
pub fn auction_bid(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    let Some(auction_type) = auction_type(&tx.account) else {
        return false;
    };
    let item = tx.additional_info().and_then(|info| info.nft_item.clone());
    if !tx.success || tx.bounced || !tx.is_plain() || tx.input_amount <= 0 {
        return false;
    }
    let Some(bidder) = tx.sender() else {
        return false;
    };
    let auction = tx.account.address;
    let mut bid = AuctionBidBubble {
        success: tx.success,
        bidder,
        previous_bidder: None,
        bid: tx.input_amount,
        item,
        auction,
        auction_type,
        tg_init: false,
    };

    if let Some(index) = bubble.position_of_tx(|child| {
        child.is_from(&auction)
            && child.account.address != bidder
            && (child.is_plain() || child.operation(opcode::TELEITEM_OUTBID_NOTIFICATION))
    }) {
        if let Info::Tx(refund) = bubble.absorb_child(index) {
            bid.previous_bidder = Some(refund.account.address);
        }
    }
    debug!("Auction bid of {} by {bidder} on {auction}", bid.bid);
    bubble.info = Info::AuctionBid(bid);
    true
}

/// First bid on a Telegram username or number.
///
/// The collection deploys the item, which then runs the auction. The item's
/// deployment is left for the deploy straw.
pub fn tg_auction_init_bid(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    if !tx.account.is(&ContractInterface::TelemintCollection)
        || !tx.operation(opcode::TELEMINT_DEPLOY)
    {
        return false;
    }
    let Some(bidder) = tx.sender() else {
        return false;
    };
    let collection = tx.account.address;
    let token_name = match tx.body() {
        Some(BodyValue::TelemintDeploy(body)) => Some(body.token_name.clone()),
        _ => None,
    };
    let Some(index) = bubble.position_of_tx(|child| {
        child.operation(opcode::TELEITEM_DEPLOY) && child.is_from(&collection)
    }) else {
        return false;
    };
    let deployed = &bubble.children[index];
    let Some(item_tx) = deployed.tx() else {
        return false;
    };
    let item_address = item_tx.account.address;
    if !deployed.contract_deployments.contains_key(&item_address) {
        return false;
    }
    let item = item_tx
        .additional_info()
        .and_then(|info| info.nft_item.clone())
        .unwrap_or(NftItem {
            address: item_address,
            collection: Some(collection),
            owner: None,
            name: token_name,
        });
    let bid = AuctionBidBubble {
        success: tx.success && item_tx.success,
        bidder,
        previous_bidder: None,
        bid: tx.input_amount,
        item: Some(item),
        auction: item_address,
        auction_type: AuctionType::DnsTg,
        tg_init: true,
    };

    bubble.absorb_child(index);
    debug!("Telegram init bid of {} by {bidder} on {item_address}", bid.bid);
    bubble.info = Info::AuctionBid(bid);
    true
}

#[cfg(test)]
mod test {
    use tonflow_types::{
        body::TelemintDeployBody,
        test_utils::{account_id, TraceBuilder},
    };

    use crate::{adapter::from_trace, book::StaticBook};

    use super::*;

    #[test]
    fn test_bid_with_refund() {
        let (bidder, auction, previous) = (account_id(1), account_id(5), account_id(2));
        let trace = TraceBuilder::internal(auction, bidder, 20_000_000_000)
            .interfaces([ContractInterface::NftItem, ContractInterface::DnsItem])
            .child(TraceBuilder::internal(previous, auction, 15_000_000_000).comment("outbid"));
        let mut bubble = from_trace(&trace.build());
        assert!(auction_bid(&mut bubble));
        assert!(bubble.children.is_empty());
        let Info::AuctionBid(bid) = &bubble.info else {
            panic!("expected bid");
        };
        assert_eq!(bid.previous_bidder, Some(previous));
        let action = bubble.info.to_action(&StaticBook::default()).unwrap();
        assert_eq!(action.action_type, ActionType::AuctionBid);
        let ActionPayload::AuctionBid(payload) = action.payload else {
            panic!("expected bid payload");
        };
        assert_eq!(payload.auction_type, AuctionType::DnsTon);
    }

    #[test]
    fn test_dns_zone_from_book() {
        let (bidder, auction) = (account_id(1), account_id(5));
        let item = NftItem {
            address: auction,
            collection: None,
            owner: None,
            name: Some("durov".to_string()),
        };
        let trace = TraceBuilder::internal(auction, bidder, 1)
            .interfaces([ContractInterface::DnsItem])
            .nft_item(item);
        let mut bubble = from_trace(&trace.build());
        assert!(auction_bid(&mut bubble));
        let book = StaticBook::default().with_auction(auction, AuctionKind::Tg);
        let action = bubble.info.to_action(&book).unwrap();
        let ActionPayload::AuctionBid(payload) = action.payload else {
            panic!("expected bid payload");
        };
        assert_eq!(payload.auction_type, AuctionType::DnsTg);
        assert!(payload.previous_bidder.is_none());
    }

    #[test]
    fn test_item_metadata_is_not_an_auction() {
        let item = account_id(5);
        let trace = TraceBuilder::internal(item, account_id(1), 1_000_000_000)
            .interfaces([ContractInterface::NftItem])
            .nft_item(NftItem {
                address: item,
                collection: Some(account_id(6)),
                owner: None,
                name: Some("Punk #1".to_string()),
            });
        assert!(!auction_bid(&mut from_trace(&trace.build())));
    }

    #[test]
    fn test_not_a_bid() {
        let trace = TraceBuilder::internal(account_id(5), account_id(1), 1)
            .interfaces([ContractInterface::NftAuctionGetgems])
            .op(0x1234_5678);
        assert!(!auction_bid(&mut from_trace(&trace.build())));
        let plain = TraceBuilder::internal(account_id(5), account_id(1), 1);
        assert!(!auction_bid(&mut from_trace(&plain.build())));
    }

    #[test]
    fn test_tg_init_bid() {
        let (bidder, collection, item) = (account_id(1), account_id(6), account_id(7));
        let trace = TraceBuilder::internal(collection, bidder, 100_000_000_000)
            .interfaces([ContractInterface::TelemintCollection])
            .body(
                opcode::TELEMINT_DEPLOY,
                BodyValue::TelemintDeploy(TelemintDeployBody {
                    token_name: "durov".to_string(),
                }),
            )
            .child(
                TraceBuilder::internal(item, collection, 99_000_000_000)
                    .deploys([ContractInterface::TelemintItem])
                    .op(opcode::TELEITEM_DEPLOY),
            );
        let mut bubble = from_trace(&trace.build());
        assert!(tg_auction_init_bid(&mut bubble));
        assert!(bubble.contract_deployments.contains_key(&item));
        let action = bubble.info.to_action(&StaticBook::default()).unwrap();
        assert_eq!(action.action_type, ActionType::AuctionTgInitBid);
        let ActionPayload::AuctionBid(payload) = action.payload else {
            panic!("expected bid payload");
        };
        assert_eq!(payload.item.unwrap().name.as_deref(), Some("durov"));
    }
}
