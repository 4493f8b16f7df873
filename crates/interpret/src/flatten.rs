//! For reading actions and the total value flow out of a merged tree.

use tonflow_types::AccountId;

use crate::{actions::Action, book::AddressBook, bubble::Bubble, value_flow::ValueFlow};

/// Actions in trace order (a bubble before its children) and the merged
/// value flow of the whole tree.
///
/// With `for_account` set, only actions of bubbles touching that account are
/// returned. The value flow always covers the whole tree.
pub fn collect_actions_and_value_flow(
    bubble: &Bubble,
    for_account: Option<&AccountId>,
    book: &dyn AddressBook,
) -> (Vec<Action>, ValueFlow) {
    let mut actions = vec![];
    let mut value_flow = ValueFlow::new();
    collect(bubble, for_account, book, &mut actions, &mut value_flow);
    (actions, value_flow)
}

fn collect(
    bubble: &Bubble,
    for_account: Option<&AccountId>,
    book: &dyn AddressBook,
    actions: &mut Vec<Action>,
    value_flow: &mut ValueFlow,
) {
    let included = for_account.map_or(true, |account| bubble.accounts.contains(account));
    if included {
        actions.extend(bubble.info.to_action(book));
    }
    for child in &bubble.children {
        collect(child, for_account, book, actions, value_flow);
    }
    value_flow.merge(&bubble.value_flow);
}
