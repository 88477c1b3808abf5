//! Ordered link management
//!
//! - `ordering`: pure order-value policy
//! - `gesture`: drag/keyboard gestures to reorder intents
//! - `controller`: one owner's in-memory list with optimistic persistence

pub mod controller;
pub mod gesture;
pub mod ordering;

pub use controller::{
    LinkEntry, LinkField, LinkListController, ReorderFailure, ReorderOutcome, SyncState,
};
pub use gesture::{KeyDirection, ReorderIntent};
pub use ordering::{InsertPlan, OrderAssignment, OrderingError, ReorderPlan};
