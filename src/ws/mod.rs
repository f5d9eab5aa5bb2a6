//! WebSocket layer: upgrade handler and per-connection lifecycle.
//!
//! The endpoint at `/ws` is outbound-only in intent: clients receive
//! broadcast commands, and anything they send is read and discarded.

pub mod connection;
pub mod handler;
