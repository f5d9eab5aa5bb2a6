//! Domain layer: connection identity, connection handles, the live
//! connection registry, and the broadcast wire message.

pub mod command_message;
pub mod connection;
pub mod connection_id;
pub mod connection_registry;

pub use command_message::CommandMessage;
pub use connection::{Connection, ConnectionError};
pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
