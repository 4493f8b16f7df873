//! Merges the transactions of a trace into actions a human can read.
//!
//! The trace is adapted into a tree of bubbles, straws merge bubbles that
//! form known patterns, and the flattener reads actions and the value flow
//! out of the merged tree.

pub mod actions;
pub mod adapter;
pub mod book;
pub mod bubble;
pub mod coins;
pub mod flatten;
pub mod merger;
pub mod preview;
pub mod straws;
pub mod value_flow;

pub use actions::{Action, ActionPayload, ActionType, ExtraContributor, Refund, RefundType};
pub use adapter::from_trace;
pub use book::{AddressBook, AddressInfo, AuctionKind, BookError, EmptyBook, StaticBook};
pub use bubble::{Bubble, Info};
pub use flatten::collect_actions_and_value_flow;
pub use merger::merge_all;
pub use straws::{Stage, Straw, StrawSet};
pub use value_flow::{AccountValueFlow, ValueFlow};
