//! Per-account accounting of native coin, jettons and NFTs.
//!
//! Every bubble carries the value flow of the transactions it covers. The
//! flattener merges them bottom up, so each bubble must be merged exactly once:
//! merging is additive and therefore not idempotent.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_traits::Zero;
use serde::{Serialize, Serializer};
use tonflow_types::{AccountId, VarUInteger16};

/// Value changes of a single account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountValueFlow {
    /// Net nanocoin change, fees excluded.
    pub ton: i64,
    /// Fees charged to the account.
    pub fees: i64,
    /// Jetton master to signed amount.
    #[serde(serialize_with = "serialize_big_ints")]
    pub jettons: BTreeMap<AccountId, BigInt>,
    /// NFT item to +1 (received) or -1 (sent).
    pub nfts: BTreeMap<AccountId, i64>,
}

impl AccountValueFlow {
    fn merge(&mut self, other: &AccountValueFlow) {
        self.ton += other.ton;
        self.fees += other.fees;
        for (jetton, delta) in &other.jettons {
            *self.jettons.entry(*jetton).or_default() += delta;
        }
        for (nft, delta) in &other.nfts {
            *self.nfts.entry(*nft).or_default() += delta;
        }
        self.prune();
    }

    fn prune(&mut self) {
        self.jettons.retain(|_, delta| !delta.is_zero());
        self.nfts.retain(|_, delta| *delta != 0);
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueFlow {
    pub accounts: BTreeMap<AccountId, AccountValueFlow>,
}

impl ValueFlow {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, account: AccountId) -> &mut AccountValueFlow {
        self.accounts.entry(account).or_default()
    }

    pub fn get(&self, account: &AccountId) -> Option<&AccountValueFlow> {
        self.accounts.get(account)
    }

    pub fn add_tons(&mut self, account: AccountId, amount: i64) {
        self.entry(account).ton += amount;
    }

    pub fn add_fees(&mut self, account: AccountId, amount: i64) {
        self.entry(account).fees += amount;
    }

    pub fn add_jettons(&mut self, account: AccountId, jetton: AccountId, amount: BigInt) {
        let flow = self.entry(account);
        *flow.jettons.entry(jetton).or_default() += amount;
        flow.prune();
    }

    pub fn add_nfts(&mut self, account: AccountId, nft: AccountId, count: i64) {
        let flow = self.entry(account);
        *flow.nfts.entry(nft).or_default() += count;
        flow.prune();
    }

    /// Moves a jetton amount from one account to another.
    pub fn move_jettons(
        &mut self,
        from: Option<AccountId>,
        to: Option<AccountId>,
        jetton: AccountId,
        amount: VarUInteger16,
    ) {
        if amount.is_zero() {
            return;
        }
        let amount = BigInt::from(amount.0);
        if let Some(from) = from {
            self.add_jettons(from, jetton, -amount.clone());
        }
        if let Some(to) = to {
            self.add_jettons(to, jetton, amount);
        }
    }

    /// Adds `other` to this value flow.
    pub fn merge(&mut self, other: &ValueFlow) {
        for (account, flow) in &other.accounts {
            self.entry(*account).merge(flow);
        }
    }

    /// Sum of nanocoin changes over all accounts.
    pub fn total_ton(&self) -> i64 {
        self.accounts.values().map(|flow| flow.ton).sum()
    }

    pub fn total_fees(&self) -> i64 {
        self.accounts.values().map(|flow| flow.fees).sum()
    }
}

fn serialize_big_ints<S: Serializer>(
    map: &BTreeMap<AccountId, BigInt>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(map.iter().map(|(k, v)| (k, v.to_string())))
}

#[cfg(test)]
mod test {
    use tonflow_types::test_utils::account_id;

    use super::*;

    #[test]
    fn test_entries_created_on_demand() {
        let mut flow = ValueFlow::new();
        flow.add_tons(account_id(1), -5);
        flow.add_fees(account_id(1), 2);
        flow.add_fees(account_id(2), 7);
        assert_eq!(flow.get(&account_id(1)).unwrap().ton, -5);
        assert_eq!(flow.get(&account_id(1)).unwrap().fees, 2);
        assert_eq!(flow.get(&account_id(2)).unwrap().fees, 7);
        assert!(flow.get(&account_id(3)).is_none());
    }

    #[test]
    fn test_zero_jetton_move_leaves_no_entries() {
        let mut flow = ValueFlow::new();
        flow.move_jettons(
            Some(account_id(1)),
            Some(account_id(2)),
            account_id(9),
            VarUInteger16(0),
        );
        assert!(flow.accounts.is_empty());
        flow.move_jettons(None, Some(account_id(2)), account_id(9), VarUInteger16(5));
        assert_eq!(
            flow.get(&account_id(2)).unwrap().jettons[&account_id(9)],
            BigInt::from(5)
        );
        assert!(flow.get(&account_id(1)).is_none());
    }

    #[test]
    fn test_merge_is_additive_and_prunes() {
        let master = account_id(9);
        let nft = account_id(8);
        let mut a = ValueFlow::new();
        a.add_tons(account_id(1), 100);
        a.add_jettons(account_id(1), master, BigInt::from(-500));
        a.add_nfts(account_id(1), nft, -1);

        let mut b = ValueFlow::new();
        b.add_tons(account_id(1), -40);
        b.add_fees(account_id(1), 3);
        b.add_jettons(account_id(1), master, BigInt::from(500));
        b.add_nfts(account_id(1), nft, 1);
        b.add_tons(account_id(2), 40);

        a.merge(&b);
        let one = a.get(&account_id(1)).unwrap();
        assert_eq!(one.ton, 60);
        assert_eq!(one.fees, 3);
        assert!(one.jettons.is_empty());
        assert!(one.nfts.is_empty());
        assert_eq!(a.total_ton(), 100);

        // Merging twice double counts.
        a.merge(&b);
        assert_eq!(a.get(&account_id(2)).unwrap().ton, 80);
    }

    #[test]
    fn test_merge_commutes() {
        let mut a = ValueFlow::new();
        a.add_tons(account_id(1), 10);
        a.add_jettons(account_id(2), account_id(9), BigInt::from(3));
        let mut b = ValueFlow::new();
        b.add_tons(account_id(2), -10);
        b.add_nfts(account_id(1), account_id(8), 1);

        let mut ab = a.clone();
        ab.merge(&b);
        let mut ba = b.clone();
        ba.merge(&a);
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_big_jetton_amounts() {
        let master = account_id(9);
        let mut flow = ValueFlow::new();
        let amount = VarUInteger16(u128::MAX);
        flow.move_jettons(None, Some(account_id(1)), master, amount);
        flow.move_jettons(None, Some(account_id(1)), master, amount);
        let expected = BigInt::from(u128::MAX) * 2;
        assert_eq!(flow.get(&account_id(1)).unwrap().jettons[&master], expected);
        let json = serde_json::to_value(&flow).unwrap();
        assert_eq!(
            json["accounts"][account_id(1).to_raw()]["jettons"][master.to_raw()],
            expected.to_string()
        );
    }
}
