//! Straws recognise patterns in the bubble tree and rewrite them in place.
//!
//! A straw is a plain value: a name, a stage and a matcher. The matcher looks
//! at one bubble and its direct children and returns true if it rewrote
//! anything. Straws are tried in the order of the set they belong to.

pub mod auction;
pub mod deploy;
pub mod fallback;
pub mod getgems;
pub mod jetton;
pub mod nft;
pub mod refund;
pub mod subscription;

use std::fmt::Display;

use crate::bubble::Bubble;

/// When a straw may run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Recognises multi transaction patterns. Runs until nothing changes.
    Pattern,
    /// Catch-all classification, runs once pattern straws are done.
    Fallback,
}

#[derive(Clone, Copy)]
pub struct Straw {
    pub name: &'static str,
    pub stage: Stage,
    pub matcher: fn(&mut Bubble) -> bool,
}

impl Straw {
    pub const fn new(name: &'static str, stage: Stage, matcher: fn(&mut Bubble) -> bool) -> Self {
        Self {
            name,
            stage,
            matcher,
        }
    }

    /// Rewrites `bubble` if it matches, returns whether it did.
    pub fn apply(&self, bubble: &mut Bubble) -> bool {
        (self.matcher)(bubble)
    }
}

impl std::fmt::Debug for Straw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Straw")
            .field("name", &self.name)
            .field("stage", &self.stage)
            .finish()
    }
}

impl Display for Straw {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Default straws, highest priority first.
pub const DEFAULT_STRAWS: [Straw; 12] = [
    Straw::new("jetton_transfer", Stage::Pattern, jetton::jetton_transfer),
    Straw::new("nft_transfer", Stage::Pattern, nft::nft_transfer),
    Straw::new("getgems_nft_purchase", Stage::Pattern, getgems::getgems_nft_purchase),
    Straw::new("auction_bid", Stage::Pattern, auction::auction_bid),
    Straw::new("tg_auction_init_bid", Stage::Pattern, auction::tg_auction_init_bid),
    Straw::new("subscription", Stage::Pattern, subscription::subscription),
    Straw::new("unsubscription", Stage::Pattern, subscription::unsubscription),
    Straw::new("bounced_refund", Stage::Pattern, refund::bounced_refund),
    Straw::new("contract_deploy", Stage::Fallback, deploy::contract_deploy),
    Straw::new("ton_transfer", Stage::Fallback, fallback::ton_transfer),
    Straw::new("smart_contract_exec", Stage::Fallback, fallback::smart_contract_exec),
    Straw::new("empty", Stage::Fallback, fallback::empty),
];

/// An ordered collection of straws.
#[derive(Clone, Debug)]
pub struct StrawSet {
    straws: Vec<Straw>,
}

impl Default for StrawSet {
    fn default() -> Self {
        Self::new(DEFAULT_STRAWS.to_vec())
    }
}

impl StrawSet {
    pub fn new(straws: Vec<Straw>) -> Self {
        Self { straws }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.straws.iter().map(|straw| straw.name).collect()
    }

    /// The same set with the named straws removed. Unknown names are ignored.
    pub fn without(&self, names: &[&str]) -> Self {
        let straws = self
            .straws
            .iter()
            .filter(|straw| !names.contains(&straw.name))
            .copied()
            .collect();
        Self { straws }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Straw> {
        self.straws.iter()
    }

    /// Straws of one stage, in priority order.
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &Straw> {
        self.straws.iter().filter(move |straw| straw.stage == stage)
    }

    pub fn len(&self) -> usize {
        self.straws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.straws.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_order() {
        let set = StrawSet::default();
        let names = set.names();
        assert_eq!(names.first(), Some(&"jetton_transfer"));
        assert_eq!(names.last(), Some(&"empty"));
        let fallback: Vec<&str> = set.stage(Stage::Fallback).map(|s| s.name).collect();
        assert_eq!(
            fallback,
            vec!["contract_deploy", "ton_transfer", "smart_contract_exec", "empty"]
        );
        // Pattern straws all come first.
        let first_fallback = names.iter().position(|n| *n == "contract_deploy").unwrap();
        assert!(set
            .iter()
            .skip(first_fallback)
            .all(|s| s.stage == Stage::Fallback));
    }

    #[test]
    fn test_without() {
        let set = StrawSet::default().without(&["nft_transfer", "no_such_straw"]);
        assert_eq!(set.len(), DEFAULT_STRAWS.len() - 1);
        assert!(!set.names().contains(&"nft_transfer"));
        assert!(StrawSet::new(vec![]).is_empty());
    }
}
