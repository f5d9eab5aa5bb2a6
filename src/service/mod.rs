//! Service layer: command broadcast orchestration.

pub mod broadcast_dispatcher;

pub use broadcast_dispatcher::{BroadcastDispatcher, BroadcastReport};
