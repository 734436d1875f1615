//! In-process transport backed by tokio channels.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, RwLock};

use tokio::sync::mpsc;

use super::{Envelope, PeerId, Transport};
use crate::error::TransportError;

type PeerTable = BTreeMap<PeerId, mpsc::UnboundedSender<Envelope>>;

/// Hands out connected [`MemoryTransport`] endpoints.
///
/// Every endpoint broadcasts to every other endpoint created by the same hub,
/// including ones connected after it. Endpoints that were dropped are removed
/// from the peer table by the next send that finds them closed.
#[derive(Clone, Default)]
pub struct MemoryHub {
    peers: Arc<RwLock<PeerTable>>,
    next_peer: Arc<AtomicU32>,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects a new endpoint under a peer id never handed out before.
    pub fn connect(&self) -> Result<MemoryTransport, TransportError> {
        let mut peers = self
            .peers
            .write()
            .map_err(|_| TransportError::LockPoisoned)?;
        let peer = PeerId(self.next_peer.fetch_add(1, Ordering::Relaxed));
        let (tx, rx) = mpsc::unbounded_channel();
        peers.insert(peer, tx);
        tracing::debug!(%peer, "memory transport connected");

        Ok(MemoryTransport {
            peer,
            peers: Arc::clone(&self.peers),
            inbox: rx,
        })
    }

    /// Number of endpoints not yet found closed.
    pub fn peer_count(&self) -> usize {
        self.peers.read().map(|peers| peers.len()).unwrap_or(0)
    }
}

/// One endpoint of a [`MemoryHub`].
pub struct MemoryTransport {
    peer: PeerId,
    peers: Arc<RwLock<PeerTable>>,
    inbox: mpsc::UnboundedReceiver<Envelope>,
}

impl Transport for MemoryTransport {
    fn local_peer(&self) -> PeerId {
        self.peer
    }

    fn send_to_peers(&mut self, envelope: &Envelope) -> Result<(), TransportError> {
        let mut peers = self
            .peers
            .write()
            .map_err(|_| TransportError::LockPoisoned)?;

        let mut targets = 0usize;
        let mut delivered = 0usize;
        peers.retain(|peer, tx| {
            if *peer == self.peer {
                return true;
            }
            targets += 1;
            match tx.send(envelope.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    tracing::trace!(%peer, "peer endpoint dropped, removing");
                    false
                }
            }
        });

        if targets > 0 && delivered == 0 {
            return Err(TransportError::Closed);
        }
        Ok(())
    }

    fn try_recv(&mut self) -> Option<Envelope> {
        self.inbox.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_broadcast_to_everyone_else_in_order() {
        let hub = MemoryHub::new();
        let mut a = hub.connect().unwrap();
        let mut b = hub.connect().unwrap();
        let mut c = hub.connect().unwrap();
        assert_eq!(hub.peer_count(), 3);
        assert_ne!(a.local_peer(), b.local_peer());

        for seq in 0..3 {
            a.send_to_peers(&Envelope::new(a.local_peer(), seq, vec![seq as u8]))
                .unwrap();
        }

        for endpoint in [&mut b, &mut c] {
            let seqs: Vec<u64> = std::iter::from_fn(|| endpoint.try_recv())
                .map(|envelope| envelope.seq)
                .collect();
            assert_eq!(seqs, vec![0, 1, 2]);
        }
        assert_eq!(a.try_recv(), None);
    }

    #[test]
    fn lone_endpoint_sends_into_the_void() {
        let hub = MemoryHub::new();
        let mut a = hub.connect().unwrap();
        assert_eq!(a.send_to_peers(&Envelope::new(a.local_peer(), 0, vec![])), Ok(()));
    }

    #[test]
    fn send_fails_once_every_peer_is_gone() {
        let hub = MemoryHub::new();
        let mut a = hub.connect().unwrap();
        let b = hub.connect().unwrap();
        drop(b);

        assert_eq!(
            a.send_to_peers(&Envelope::new(a.local_peer(), 0, vec![1])),
            Err(TransportError::Closed)
        );
    }

    #[test]
    fn dropped_endpoints_are_pruned_on_send() {
        let hub = MemoryHub::new();
        let mut a = hub.connect().unwrap();
        let mut b = hub.connect().unwrap();
        let c = hub.connect().unwrap();
        let dropped = c.local_peer();
        drop(c);
        assert_eq!(hub.peer_count(), 3);

        a.send_to_peers(&Envelope::new(a.local_peer(), 0, vec![7])).unwrap();
        assert_eq!(hub.peer_count(), 2);
        assert_eq!(b.try_recv().map(|envelope| envelope.payload), Some(vec![7]));

        let d = hub.connect().unwrap();
        assert_ne!(d.local_peer(), dropped);
    }
}
