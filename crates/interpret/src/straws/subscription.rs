//! Subscription plugin payments and cancellations.
//!
//! A plugin asks its wallet for funds, the wallet pays the plugin and the
//! plugin forwards the payment to the beneficiary. The first payment is
//! sent together with the plugin's state init.

use log::debug;
use tonflow_types::{opcode, AccountId};

use crate::{
    actions::{Action, ActionPayload, ActionType, SubscriptionAction, UnSubscriptionAction},
    book::AddressBook,
    bubble::{Bubble, Info},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubscriptionBubble {
    pub success: bool,
    /// The plugin contract.
    pub subscription: AccountId,
    /// The paying wallet.
    pub subscriber: AccountId,
    pub beneficiary: AccountId,
    pub amount: i64,
    /// The plugin was deployed by this payment.
    pub first: bool,
}

impl SubscriptionBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::Subscription,
            success: self.success,
            payload: ActionPayload::Subscription(SubscriptionAction {
                subscription: self.subscription,
                subscriber: self.subscriber,
                beneficiary: self.beneficiary,
                amount: self.amount,
                first: self.first,
            }),
            simple_preview: preview::subscription(
                &self.subscriber,
                &self.beneficiary,
                self.amount,
                self.first,
                book,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnSubscriptionBubble {
    pub success: bool,
    pub subscription: AccountId,
    pub subscriber: AccountId,
    pub beneficiary: Option<AccountId>,
}

impl UnSubscriptionBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        Action {
            action_type: ActionType::UnSubscription,
            success: self.success,
            payload: ActionPayload::UnSubscription(UnSubscriptionAction {
                subscription: self.subscription,
                subscriber: self.subscriber,
                beneficiary: self.beneficiary,
            }),
            simple_preview: preview::unsubscription(
                &self.subscriber,
                self.beneficiary.as_ref(),
                book,
            ),
        }
    }
}

/// A payment forwarded by the plugin, or the wallet transaction that
/// answered the plugin's request for it.
pub fn subscription(bubble: &mut Bubble) -> bool {
    payment(bubble) || funds_request(bubble)
}

fn payment(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    if !tx.operation(opcode::SUBSCRIPTION_PAYMENT) {
        return false;
    }
    let Some(subscriber) = tx.sender() else {
        return false;
    };
    let plugin = tx.account.address;
    let success = tx.success;
    let Some(index) = bubble.position_of_tx(|child| {
        child.is_from(&plugin)
            && (child.is_plain() || child.operation(opcode::SUBSCRIPTION_BENEFICIARY))
    }) else {
        return false;
    };
    let Some(forward) = bubble.children[index].tx() else {
        return false;
    };
    let mut payment = SubscriptionBubble {
        success: success && forward.success,
        subscription: plugin,
        subscriber,
        beneficiary: forward.account.address,
        amount: forward.input_amount,
        first: false,
    };
    bubble.absorb_child(index);
    payment.first = bubble
        .contract_deployments
        .remove(&plugin)
        .map_or(false, |deployment| deployment.success);
    let first = payment.first;
    debug!(
        "Subscription payment of {} from {subscriber} via {plugin}, first {first}",
        payment.amount
    );
    bubble.info = Info::Subscription(payment);
    true
}

fn funds_request(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    if !tx.operation(opcode::SUBSCRIPTION_REQUEST_FUNDS) {
        return false;
    }
    let Some(plugin) = tx.sender() else {
        return false;
    };
    let wallet = tx.account.address;
    let Some((index, payment)) =
        bubble
            .children
            .iter()
            .enumerate()
            .find_map(|(index, child)| match &child.info {
                Info::Subscription(payment)
                    if payment.subscription == plugin && payment.subscriber == wallet =>
                {
                    Some((index, payment.clone()))
                }
                _ => None,
            })
    else {
        return false;
    };
    bubble.absorb_child(index);
    debug!("Subscription funds request from {plugin} to {wallet}");
    bubble.info = Info::Subscription(payment);
    true
}

/// The wallet asks its plugin to self destruct.
pub fn unsubscription(bubble: &mut Bubble) -> bool {
    let Some(tx) = bubble.tx() else {
        return false;
    };
    if !tx.operation(opcode::SUBSCRIPTION_DESTRUCT) {
        return false;
    }
    let Some(subscriber) = tx.sender() else {
        return false;
    };
    let plugin = tx.account.address;
    let cancel = UnSubscriptionBubble {
        success: tx.success,
        subscription: plugin,
        subscriber,
        beneficiary: tx
            .additional_info()
            .and_then(|info| info.subscription_beneficiary),
    };
    if let Some(index) = bubble.position_of_tx(|child| {
        child.is_from(&plugin)
            && child.account.address == subscriber
            && (child.op_code.is_none() || child.operation(opcode::SUBSCRIPTION_DESTRUCT_RESPONSE))
    }) {
        bubble.absorb_child(index);
    }
    debug!("Unsubscription of {subscriber} from {plugin}");
    bubble.info = Info::UnSubscription(cancel);
    true
}
