//! For applying straws to a bubble tree until nothing changes.
//!
//! Every pass visits children before their parent and tries each straw on
//! each bubble. Pattern straws are repeated until a pass changes nothing,
//! then the fallback straws classify what is left. Both stages repeat until
//! neither rewrites anything.

use log::{debug, trace};

use crate::{
    bubble::Bubble,
    straws::{Stage, StrawSet},
};

/// Merges the tree with the given straws. The result is a fixed point:
/// merging it again returns it unchanged.
pub fn merge_all(mut bubble: Bubble, straws: &StrawSet) -> Bubble {
    let mut rounds = 0;
    loop {
        rounds += 1;
        let mut changed = false;
        while pass(&mut bubble, straws, Stage::Pattern) {
            changed = true;
        }
        if pass(&mut bubble, straws, Stage::Fallback) {
            changed = true;
        }
        trace!("Merge round {rounds}, changed {changed}");
        if !changed {
            break;
        }
    }
    debug!("Merged into {} bubbles after {rounds} rounds", bubble.count());
    bubble
}

/// One post-order pass of the straws of `stage`. Returns true if any fired.
fn pass(bubble: &mut Bubble, straws: &StrawSet, stage: Stage) -> bool {
    let mut changed = false;
    for child in bubble.children.iter_mut() {
        changed |= pass(child, straws, stage);
    }
    for straw in straws.stage(stage) {
        if straw.apply(bubble) {
            trace!("Straw {straw} fired, now {}", bubble.info.name());
            changed = true;
        }
    }
    changed
}

#[cfg(test)]
mod test {
    use tonflow_types::test_utils::{account_id, TraceBuilder};

    use crate::{adapter::from_trace, bubble::Info};

    use super::*;

    #[test]
    fn test_merge_is_idempotent() {
        let trace = TraceBuilder::external(account_id(1))
            .wallet()
            .child(TraceBuilder::internal(account_id(2), account_id(1), 10).comment("hi"))
            .child(TraceBuilder::internal(account_id(3), account_id(1), 10).op(0xabcd_0001));
        let straws = StrawSet::default();
        let merged = merge_all(from_trace(&trace.build()), &straws);
        assert_eq!(merged.info, Info::Empty);
        assert_eq!(merged.children[0].info.name(), "TonTransfer");
        assert_eq!(merged.children[1].info.name(), "SmartContractExec");
        assert_eq!(merge_all(merged.clone(), &straws), merged);
    }

    #[test]
    fn test_disabled_straws_leave_transactions() {
        let trace = TraceBuilder::external(account_id(1))
            .child(TraceBuilder::internal(account_id(2), account_id(1), 10));
        let straws = StrawSet::default().without(&["ton_transfer", "empty"]);
        let merged = merge_all(from_trace(&trace.clone().build()), &straws);
        assert!(merged.tx().is_some());
        assert!(merged.children[0].tx().is_some());

        let nothing = merge_all(from_trace(&trace.clone().build()), &StrawSet::new(vec![]));
        assert_eq!(nothing, from_trace(&trace.build()));
    }
}
