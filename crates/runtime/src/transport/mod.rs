//! Message transport between peers.
//!
//! The session layer only needs a channel that carries opaque [`Envelope`]s
//! to every other peer and hands inbound ones back. Connection lifecycle,
//! rooms and matchmaking stay outside this crate.
mod memory;

pub use memory::{MemoryHub, MemoryTransport};

use std::fmt;

use crate::error::TransportError;

/// Stable identity of a connected peer, assigned by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerId(pub u32);

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "peer-{}", self.0)
    }
}

/// A payload stamped with its sender and per-sender sequence number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    pub sender: PeerId,
    /// Monotonically increasing per sender, starting at 0.
    pub seq: u64,
    pub payload: Vec<u8>,
}

impl Envelope {
    pub fn new(sender: PeerId, seq: u64, payload: Vec<u8>) -> Self {
        Self {
            sender,
            seq,
            payload,
        }
    }
}

/// Carries envelopes between peers.
///
/// Implementations must:
/// - deliver envelopes from one sender in the order they were sent;
/// - never drop an envelope silently (report failure from `send_to_peers`).
///
/// Nothing is required across senders; two peers may observe each other's
/// envelopes interleaved differently.
pub trait Transport {
    /// Identity of this endpoint.
    fn local_peer(&self) -> PeerId;

    /// Sends `envelope` to every other peer.
    fn send_to_peers(&mut self, envelope: &Envelope) -> Result<(), TransportError>;

    /// Next inbound envelope, if one is ready. Never blocks.
    fn try_recv(&mut self) -> Option<Envelope>;
}
