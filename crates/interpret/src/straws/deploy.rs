//! Contracts initialised during the trace.

use log::debug;
use tonflow_types::{AccountId, ContractInterface};

use crate::{
    actions::{Action, ActionPayload, ActionType, ContractDeployAction},
    book::AddressBook,
    bubble::{Bubble, Info},
    preview,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractDeployBubble {
    pub success: bool,
    pub address: AccountId,
    pub interfaces: Vec<ContractInterface>,
}

impl ContractDeployBubble {
    pub fn to_action(&self, book: &dyn AddressBook) -> Action {
        let interfaces: Vec<String> = self.interfaces.iter().map(|i| i.to_string()).collect();
        Action {
            action_type: ActionType::ContractDeploy,
            success: self.success,
            simple_preview: preview::contract_deploy(&self.address, &interfaces, book),
            payload: ActionPayload::ContractDeploy(ContractDeployAction {
                address: self.address,
                interfaces,
            }),
        }
    }
}

/// Turns every deployment a bubble still holds into a leading child, so
/// the bubble itself can still become another action.
pub fn contract_deploy(bubble: &mut Bubble) -> bool {
    if bubble.contract_deployments.is_empty() {
        return false;
    }
    let deployments = std::mem::take(&mut bubble.contract_deployments);
    let deploys = deployments.into_iter().map(|(address, deployment)| {
        debug!("Contract deployed at {address}");
        Bubble::new(
            Info::ContractDeploy(ContractDeployBubble {
                success: deployment.success,
                address,
                interfaces: deployment.init_interfaces,
            }),
            [address],
        )
    });
    bubble.children.splice(0..0, deploys);
    true
}
