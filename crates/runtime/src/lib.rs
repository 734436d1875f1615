//! Peer replication for the Dejarik board.
//!
//! This crate wires `dejarik-core`'s engine to a message transport so two or
//! more peers keep identical boards. Consumers build a [`Session`] per peer,
//! call its local action methods, and [`Session::pump`] inbound traffic.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts the per-peer state owner and replay logic
//! - [`codec`] defines the wire payload
//! - [`transport`] abstracts delivery and ships an in-process implementation
//! - [`config`] loads runtime settings from the environment
pub mod codec;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

pub use codec::{WireMessage, decode, encode};
pub use config::RuntimeConfig;
pub use error::{CodecError, Result, RuntimeError, TransportError};
pub use session::{Session, player_of};
pub use transport::{Envelope, MemoryHub, MemoryTransport, PeerId, Transport};
