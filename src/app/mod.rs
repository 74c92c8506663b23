//! Application logic: UI state, event handling, and store dispatch.

pub mod event;
pub mod handler;
pub mod state;
