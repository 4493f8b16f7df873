//! Data model of an executed TON trace, as consumed by the summarizer.
//!
//! The trace arrives already parsed: message bodies are decoded and interfaces
//! of the participating contracts are detected upstream.

pub mod account;
pub mod amount;
pub mod body;
pub mod interfaces;
pub mod opcode;
pub mod trace;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use account::{AccountId, AccountIdError};
pub use amount::{AmountError, VarUInteger16};
pub use body::{BodyValue, DecodedBody, ForwardPayload};
pub use interfaces::ContractInterface;
pub use trace::{
    AccountStatus, AdditionalInfo, ComputePhase, ComputeSkipReason, Message, NftItem,
    OutMessage, Trace, TraceError, TransactionType,
};
