//! Summarizes a TON trace into the actions a user performed and the value
//! each account gained or lost.
//!
//! ```ignore
//! let summary = Summarizer::default().summarize(&trace, None, &EmptyBook);
//! for action in &summary.actions {
//!     println!("{action}");
//! }
//! ```

use log::debug;
use serde::Serialize;
use tonflow_interpret::{collect_actions_and_value_flow, from_trace, merge_all};

pub use tonflow_interpret::{
    actions, book, bubble, coins, preview, straws, value_flow, Action, ActionType, AddressBook,
    Bubble, EmptyBook, ExtraContributor, StaticBook, StrawSet, ValueFlow,
};
pub use tonflow_types as types;
pub use tonflow_types::{AccountId, Trace};

/// What happened in a trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub actions: Vec<Action>,
    pub value_flow: ValueFlow,
}

impl Summary {
    /// Nanocoin hidden in the actions for `account`, e.g., attached to jetton
    /// transfers to pay for their forwarding.
    pub fn extra(&self, account: &AccountId) -> i64 {
        self.actions
            .iter()
            .fold(0, |extra, action| action.contribute_to_extra(account, extra))
    }
}

/// Adapts, merges and flattens traces with one set of straws.
#[derive(Clone, Debug, Default)]
pub struct Summarizer {
    straws: StrawSet,
}

impl Summarizer {
    pub fn new(straws: StrawSet) -> Self {
        Self { straws }
    }

    pub fn straws(&self) -> &StrawSet {
        &self.straws
    }

    /// The merged bubble tree of a trace.
    pub fn merge(&self, trace: &Trace) -> Bubble {
        merge_all(from_trace(trace), &self.straws)
    }

    /// Actions (optionally only those involving `for_account`) and the value
    /// flow of the whole trace.
    pub fn summarize(
        &self,
        trace: &Trace,
        for_account: Option<&AccountId>,
        book: &dyn AddressBook,
    ) -> Summary {
        let merged = self.merge(trace);
        let (actions, value_flow) = collect_actions_and_value_flow(&merged, for_account, book);
        debug!(
            "Summarized {} transactions into {} actions",
            trace.transaction_count(),
            actions.len()
        );
        Summary {
            actions,
            value_flow,
        }
    }
}
