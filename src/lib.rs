//! # command-relay
//!
//! Accepts commands over HTTP and fans them out to every connected
//! WebSocket client, best-effort and without acknowledgement.
//!
//! ## Architecture
//!
//! ```text
//! Submitters (POST /send-command)      Clients (GET /ws)
//!     │                                    │
//!     ├── REST Handlers (api/)             ├── WS Handler (ws/)
//!     │                                    │
//!     ├── BroadcastDispatcher (service/)   │
//!     │                                    │
//!     └──────── ConnectionRegistry (domain/) ┘
//! ```
//!
//! The registry is the only shared mutable state. The dispatcher writes to
//! a snapshot of it and prunes every connection whose write fails; the
//! WebSocket lifecycle task registers a connection on open and removes it
//! on close.

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod service;
pub mod ws;
