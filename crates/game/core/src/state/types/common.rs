use std::fmt;

/// Identifier of a player in the session.
///
/// Replicated actions refer to players by this id, so both peers must agree
/// on it; it normally mirrors the transport's per-peer identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a piece, namespaced by the player that placed it.
///
/// Each peer only ever mints ids in its own players' namespaces, so two
/// registries that allocate independently can never hand out the same id.
/// Replayed placements carry the initiator's id verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceId {
    pub owner: PlayerId,
    pub seq: u32,
}

impl PieceId {
    pub const fn new(owner: PlayerId, seq: u32) -> Self {
        Self { owner, seq }
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}:{}", self.owner.0, self.seq)
    }
}
