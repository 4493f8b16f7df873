//! For turning an executed trace into the initial bubble tree.
//!
//! Each transaction becomes one `Tx` bubble that already carries its own
//! share of the value flow.

use log::trace;
use tonflow_types::{AccountStatus, ComputeSkipReason, Trace, TransactionType};

use crate::{
    bubble::{Account, Bubble, ContractDeployment, Info, TxBubble},
    value_flow::ValueFlow,
};

/// One bubble per transaction, same shape as the trace.
pub fn from_trace(trace: &Trace) -> Bubble {
    adapt(trace, None)
}

fn adapt(trace: &Trace, parent: Option<&Trace>) -> Bubble {
    let source = trace
        .in_msg
        .as_ref()
        .and_then(|msg| msg.source)
        .map(|address| Account {
            address,
            interfaces: match parent {
                Some(parent) if parent.account == address => parent.account_interfaces.clone(),
                _ => vec![],
            },
        });

    let mut tx = TxBubble {
        success: trace.success,
        transaction_type: trace.transaction_type,
        account: Account {
            address: trace.account,
            interfaces: trace.account_interfaces.clone(),
        },
        external: trace.in_msg.as_ref().map_or(true, |msg| msg.is_external()),
        account_was_active_at_computing_time: was_active_at_computing_time(trace),
        input_from: source.clone(),
        additional_info: trace.additional_info.clone(),
        ..Default::default()
    };
    let mut init_interfaces = vec![];
    if let Some(msg) = &trace.in_msg {
        tx.bounce = msg.bounce;
        tx.bounced = msg.bounced;
        tx.input_amount = msg.value;
        tx.op_code = msg.op_code;
        tx.decoded_body = msg.decoded_body.clone();
        tx.init = msg.init.clone();
        init_interfaces = msg.init_interfaces.clone();
    }

    let mut value_flow = ValueFlow::new();
    value_flow.add_tons(trace.account, tx.input_amount);
    let mut fees = trace.total_fee;
    for out_msg in &trace.out_msgs {
        value_flow.add_tons(trace.account, -out_msg.value);
        fees += out_msg.fwd_fee;
    }
    // Outbound messages that started a child are only listed as the child's
    // inbound message.
    for child in &trace.children {
        if let Some(msg) = &child.in_msg {
            value_flow.add_tons(trace.account, -msg.value);
            fees += msg.fwd_fee;
        }
    }
    value_flow.add_fees(trace.account, fees);

    let mut bubble = Bubble::new(
        Info::Tx(tx),
        std::iter::once(trace.account).chain(source.map(|s| s.address)),
    );
    bubble.value_flow = value_flow;
    if trace.end_status == AccountStatus::Active && trace.orig_status != AccountStatus::Active {
        bubble.contract_deployments.insert(
            trace.account,
            ContractDeployment {
                init_interfaces,
                success: trace.success,
            },
        );
    }
    bubble.children = trace
        .children
        .iter()
        .map(|child| adapt(child, Some(trace)))
        .collect();
    trace!(
        "Adapted transaction on {} with {} children",
        trace.account,
        bubble.children.len()
    );
    bubble
}

/// False only when an ordinary transaction skipped computation for lack of state.
fn was_active_at_computing_time(trace: &Trace) -> bool {
    trace.transaction_type != TransactionType::Ordinary
        || trace.compute_phase.as_ref().map_or(true, |phase| {
            phase.skip_reason != Some(ComputeSkipReason::NoState)
        })
}
