//! The user store: an in-memory, single-writer state container.
//!
//! State is only changed by dispatching a [`StoreAction`] through a pure
//! reduction function. Every dispatch produces a fresh snapshot behind an
//! `Arc`, so readers holding an older snapshot are never invalidated.
//! Consumers get access through a [`StoreHandle`], a weak reference handed
//! down explicitly; once the owning [`UserStore`] is dropped, every handle
//! operation fails with [`StoreError::NotInitialized`].

pub mod action;
pub mod handle;
pub mod reducer;
pub mod state;
pub mod user;

pub use action::StoreAction;
pub use handle::{StoreError, StoreHandle, Subscription, UserStore};
pub use state::StoreState;
pub use user::{Role, User, UserId, UserPatch};
