//! For the tree that straws rewrite.
//!
//! A bubble starts as a single transaction. Straws merge neighbouring
//! bubbles into one when they recognise a known pattern (e.g., an NFT
//! transfer spread over three transactions), replacing the `Info` with the
//! recognised action.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
};

use tonflow_types::{
    body::BodyValue, interfaces::implements, opcode, AccountId, AdditionalInfo,
    ContractInterface, DecodedBody, TransactionType,
};

use crate::{
    actions::Action,
    book::AddressBook,
    straws::{
        auction::AuctionBidBubble,
        deploy::ContractDeployBubble,
        fallback::{self, SmartContractExecBubble, TonTransferBubble},
        getgems::GetGemsNftPurchaseBubble,
        jetton::JettonTransferBubble,
        nft::NftTransferBubble,
        subscription::{SubscriptionBubble, UnSubscriptionBubble},
    },
    value_flow::ValueFlow,
};

/// An account and the interfaces its code implements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    pub address: AccountId,
    pub interfaces: Vec<ContractInterface>,
}

impl Account {
    pub fn new(address: AccountId) -> Self {
        Self {
            address,
            interfaces: vec![],
        }
    }

    pub fn is(&self, interface: &ContractInterface) -> bool {
        implements(&self.interfaces, interface)
    }

    pub fn is_wallet(&self) -> bool {
        self.interfaces.iter().any(ContractInterface::is_wallet)
    }
}

/// A contract initialised by a bubble.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContractDeployment {
    /// Interfaces implemented by the code of the state init.
    pub init_interfaces: Vec<ContractInterface>,
    pub success: bool,
}

/// A single, not yet recognised, transaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TxBubble {
    pub success: bool,
    pub transaction_type: TransactionType,
    pub account: Account,
    /// No inbound message, or one without a source.
    pub external: bool,
    pub account_was_active_at_computing_time: bool,
    pub bounce: bool,
    pub bounced: bool,
    pub input_amount: i64,
    pub input_from: Option<Account>,
    pub op_code: Option<u32>,
    pub decoded_body: Option<DecodedBody>,
    pub init: Option<Vec<u8>>,
    pub additional_info: Option<AdditionalInfo>,
}

impl TxBubble {
    pub fn operation(&self, op: u32) -> bool {
        self.op_code == Some(op)
    }

    pub fn body(&self) -> Option<&BodyValue> {
        self.decoded_body.as_ref().map(|body| &body.value)
    }

    pub fn comment(&self) -> Option<String> {
        self.decoded_body
            .as_ref()
            .and_then(DecodedBody::comment)
            .map(str::to_string)
    }

    /// No opcode or a text comment: a message that only carries value.
    pub fn is_plain(&self) -> bool {
        matches!(self.op_code, None | Some(opcode::TEXT_COMMENT))
    }

    pub fn sender(&self) -> Option<AccountId> {
        self.input_from.as_ref().map(|from| from.address)
    }

    pub fn is_from(&self, account: &AccountId) -> bool {
        self.sender().as_ref() == Some(account)
    }

    pub fn additional_info(&self) -> Option<&AdditionalInfo> {
        self.additional_info.as_ref()
    }
}

/// What a bubble represents.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Info {
    Tx(TxBubble),
    TonTransfer(TonTransferBubble),
    SmartContractExec(SmartContractExecBubble),
    NftTransfer(NftTransferBubble),
    JettonTransfer(JettonTransferBubble),
    GetGemsNftPurchase(GetGemsNftPurchaseBubble),
    /// Regular bids and Telegram init bids.
    AuctionBid(AuctionBidBubble),
    Subscription(SubscriptionBubble),
    UnSubscription(UnSubscriptionBubble),
    ContractDeploy(ContractDeployBubble),
    /// Nothing worth showing.
    #[default]
    Empty,
}

impl Info {
    pub fn to_action(&self, book: &dyn AddressBook) -> Option<Action> {
        match self {
            Info::Tx(tx) => fallback::classify(tx).and_then(|info| info.to_action(book)),
            Info::TonTransfer(b) => Some(b.to_action(book)),
            Info::SmartContractExec(b) => Some(b.to_action(book)),
            Info::NftTransfer(b) => Some(b.to_action(book)),
            Info::JettonTransfer(b) => Some(b.to_action(book)),
            Info::GetGemsNftPurchase(b) => Some(b.to_action(book)),
            Info::AuctionBid(b) => Some(b.to_action(book)),
            Info::Subscription(b) => Some(b.to_action(book)),
            Info::UnSubscription(b) => Some(b.to_action(book)),
            Info::ContractDeploy(b) => Some(b.to_action(book)),
            Info::Empty => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Info::Tx(_) => "Tx",
            Info::TonTransfer(_) => "TonTransfer",
            Info::SmartContractExec(_) => "SmartContractExec",
            Info::NftTransfer(_) => "NftTransfer",
            Info::JettonTransfer(_) => "JettonTransfer",
            Info::GetGemsNftPurchase(_) => "GetGemsNftPurchase",
            Info::AuctionBid(_) => "AuctionBid",
            Info::Subscription(_) => "Subscription",
            Info::UnSubscription(_) => "UnSubscription",
            Info::ContractDeploy(_) => "ContractDeploy",
            Info::Empty => "Empty",
        }
    }
}

/// A node of the tree being rewritten. Children are kept in trace order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Bubble {
    pub info: Info,
    pub accounts: BTreeSet<AccountId>,
    pub children: Vec<Bubble>,
    pub value_flow: ValueFlow,
    /// Contracts initialised by this bubble.
    pub contract_deployments: BTreeMap<AccountId, ContractDeployment>,
}

impl Bubble {
    /// A childless bubble touching `accounts`.
    pub fn new<I: IntoIterator<Item = AccountId>>(info: Info, accounts: I) -> Self {
        Self {
            info,
            accounts: accounts.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn tx(&self) -> Option<&TxBubble> {
        match &self.info {
            Info::Tx(tx) => Some(tx),
            _ => None,
        }
    }

    /// Index of the first child that is an unrecognised transaction matching `pred`.
    pub fn position_of_tx<F: Fn(&TxBubble) -> bool>(&self, pred: F) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.tx().map_or(false, &pred))
    }

    /// Merges the child at `index` into this bubble.
    ///
    /// Accounts, value flow and deployments are taken over and the child's
    /// children take its place, so trace order is kept. Returns what the
    /// child represented.
    pub fn absorb_child(&mut self, index: usize) -> Info {
        let child = self.children.remove(index);
        self.accounts.extend(child.accounts);
        self.value_flow.merge(&child.value_flow);
        self.contract_deployments.extend(child.contract_deployments);
        self.children.splice(index..index, child.children);
        child.info
    }

    /// Absorbs every direct child matching `pred`. Children moved up from an
    /// absorbed child are not considered. Returns the number absorbed.
    pub fn absorb_children_where<F: Fn(&Bubble) -> bool>(&mut self, pred: F) -> usize {
        let mut absorbed = 0;
        let mut index = 0;
        while index < self.children.len() {
            if pred(&self.children[index]) {
                let moved_up = self.children[index].children.len();
                self.absorb_child(index);
                index += moved_up;
                absorbed += 1;
            } else {
                index += 1;
            }
        }
        absorbed
    }

    /// Number of bubbles in this tree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Bubble::count).sum::<usize>()
    }

    fn fmt_depth(&self, f: &mut std::fmt::Formatter<'_>, depth: usize) -> std::fmt::Result {
        for _ in 0..depth {
            write!(f, "\t")?;
        }
        writeln!(f, "{}", self.info)?;
        for child in &self.children {
            child.fmt_depth(f, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for Bubble {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.fmt_depth(f, 0)
    }
}

impl Display for Info {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Info::Tx(tx) => {
                write!(f, "Tx on {}", tx.account.address.to_short())?;
                if let Some(from) = tx.sender() {
                    write!(f, " from {}", from.to_short())?;
                }
                if let Some(op) = tx.op_code {
                    write!(f, " op {}", opcode::to_hex(op))?;
                }
                if !tx.success {
                    write!(f, " (failed)")?;
                }
                Ok(())
            }
            Info::Empty => write!(f, "Empty"),
            other => match other.to_action(&crate::book::EmptyBook) {
                Some(action) => write!(f, "{action}"),
                None => write!(f, "{}", other.name()),
            },
        }
    }
}

#[cfg(test)]
mod test {
    use tonflow_types::test_utils::account_id;

    use super::*;

    fn tx_bubble(account: u8, children: Vec<Bubble>) -> Bubble {
        let mut value_flow = ValueFlow::new();
        value_flow.add_tons(account_id(account), account as i64);
        Bubble {
            info: Info::Tx(TxBubble {
                account: Account::new(account_id(account)),
                ..Default::default()
            }),
            accounts: [account_id(account)].into_iter().collect(),
            children,
            value_flow,
            contract_deployments: BTreeMap::new(),
        }
    }

    #[test]
    fn test_absorb_child_keeps_order() {
        let grandchildren = vec![tx_bubble(3, vec![]), tx_bubble(4, vec![])];
        let mut parent = tx_bubble(
            1,
            vec![tx_bubble(2, grandchildren), tx_bubble(5, vec![])],
        );
        parent.children[0]
            .contract_deployments
            .insert(account_id(2), ContractDeployment::default());

        let info = parent.absorb_child(0);
        assert!(matches!(info, Info::Tx(ref tx) if tx.account.address == account_id(2)));
        let order: Vec<AccountId> = parent
            .children
            .iter()
            .map(|c| c.tx().unwrap().account.address)
            .collect();
        assert_eq!(order, vec![account_id(3), account_id(4), account_id(5)]);
        assert!(parent.accounts.contains(&account_id(2)));
        assert_eq!(parent.value_flow.get(&account_id(2)).unwrap().ton, 2);
        assert!(parent.contract_deployments.contains_key(&account_id(2)));
    }

    #[test]
    fn test_absorb_children_where_skips_moved_up() {
        // Grandchild 2 would match too, but is only moved up.
        let mut parent = tx_bubble(
            1,
            vec![
                tx_bubble(2, vec![tx_bubble(2, vec![])]),
                tx_bubble(3, vec![]),
                tx_bubble(2, vec![]),
            ],
        );
        let absorbed = parent.absorb_children_where(|child| {
            child.tx().map(|tx| tx.account.address) == Some(account_id(2))
        });
        assert_eq!(absorbed, 2);
        assert_eq!(parent.children.len(), 2);
        assert_eq!(parent.count(), 3);
        assert_eq!(parent.value_flow.get(&account_id(2)).unwrap().ton, 4);
    }

    #[test]
    fn test_display_indents_children() {
        let parent = tx_bubble(1, vec![tx_bubble(2, vec![])]);
        let text = parent.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Tx on 0:0101"));
        assert!(lines[1].starts_with("\tTx on 0:0202"));
    }
}
