//! Per-peer replication session.
//!
//! A [`Session`] owns one peer's [`GameState`], its movement rules and its
//! transport. Local actions run through the engine first; only those that
//! succeed are encoded and broadcast. Inbound envelopes are decoded and
//! replayed through the same engine path, so peers that see the same actions
//! in the same order hold the same state.

use std::collections::{BTreeMap, BTreeSet};

use dejarik_core::{
    Action, BoardError, BoardGraph, DeselectAction, EntityRegistry, ExecuteError,
    ExecutionOutcome, GameEngine, GameEnv, GameError, GameState, MovementOracle, Piece, PieceId,
    PieceType, PlaceAction, PlayerId, RegistryError, SelectAction, Tile, TilePos, WorldPoint,
};

use crate::codec;
use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::transport::{Envelope, PeerId, Transport};

/// Player id a peer acts under.
pub fn player_of(peer: PeerId) -> PlayerId {
    PlayerId(peer.0)
}

/// One peer's view of a replicated game.
pub struct Session<T: Transport> {
    transport: T,
    state: GameState,
    movement: Box<dyn MovementOracle>,
    local_player: PlayerId,
    /// Sequence number stamped on the next outbound envelope.
    next_seq: u64,
    /// Highest sequence number applied per remote sender.
    last_applied: BTreeMap<PeerId, u64>,
}

impl<T: Transport> Session<T> {
    /// Creates a session and registers the local player under the transport's
    /// peer id.
    pub fn new(
        transport: T,
        config: &RuntimeConfig,
        movement: Box<dyn MovementOracle>,
    ) -> Result<Self> {
        let local_player = player_of(transport.local_peer());
        let mut state = GameState::new(config.board.clone());
        state
            .entities
            .insert_player(local_player, config.player_name.clone())?;

        tracing::debug!(
            peer = %transport.local_peer(),
            player = %local_player,
            name = %config.player_name,
            "session created"
        );

        Ok(Self {
            transport,
            state,
            movement,
            local_player,
            next_seq: 0,
            last_applied: BTreeMap::new(),
        })
    }

    /// Session using [`RuntimeConfig::movement_oracle`].
    pub fn from_config(transport: T, config: &RuntimeConfig) -> Result<Self> {
        let movement = Box::new(config.movement_oracle());
        Self::new(transport, config, movement)
    }

    /// Registers a remote peer's player. Joining is reported by the transport
    /// layer and is not itself replicated.
    pub fn register_peer(&mut self, peer: PeerId, name: impl Into<String>) -> Result<PlayerId> {
        let player = player_of(peer);
        self.state.entities.insert_player(player, name)?;
        tracing::debug!(%peer, %player, "peer registered");
        Ok(player)
    }

    // ===== local actions =====

    /// Places a new piece for the local player and broadcasts it.
    ///
    /// Validation failures are returned without touching state or the network.
    /// A transport failure is returned after the placement has been applied
    /// locally.
    pub fn place_piece(&mut self, kind: PieceType, position: TilePos) -> Result<PieceId> {
        let action: Action = PlaceAction::new(self.local_player, kind, position).into();
        let outcome = self.execute_local(&action)?;
        let piece = outcome.result.piece();
        self.broadcast(&outcome.action)?;
        Ok(piece)
    }

    /// Selects a local piece, broadcasts the selection and returns the tiles
    /// it can move to.
    pub fn select_piece(&mut self, piece: PieceId) -> Result<BTreeSet<TilePos>> {
        let action: Action = SelectAction::new(self.local_player, piece).into();
        let outcome = self.execute_local(&action)?;
        self.broadcast(&outcome.action)?;
        Ok(outcome
            .result
            .reachable()
            .cloned()
            .unwrap_or_default())
    }

    /// Clears the selection of a local piece and broadcasts it.
    pub fn deselect_piece(&mut self, piece: PieceId) -> Result<()> {
        let action: Action = DeselectAction::new(self.local_player, piece).into();
        let outcome = self.execute_local(&action)?;
        self.broadcast(&outcome.action)?;
        Ok(())
    }

    fn execute_local(&mut self, action: &Action) -> std::result::Result<ExecutionOutcome, ExecuteError> {
        let env = GameEnv::new(&*self.movement);
        GameEngine::new(&mut self.state)
            .execute(env, action)
            .inspect_err(|err| {
                tracing::debug!(
                    action = action.as_str(),
                    code = err.error_code(),
                    "local action rejected: {err}"
                );
            })
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        let payload = codec::encode(action)?;
        let envelope = Envelope::new(self.transport.local_peer(), self.next_seq, payload);
        self.next_seq += 1;
        self.transport.send_to_peers(&envelope)?;
        tracing::debug!(
            seq = envelope.seq,
            action = action.as_str(),
            bytes = envelope.payload.len(),
            "action sent"
        );
        Ok(())
    }

    // ===== inbound =====

    /// Applies one inbound envelope. Returns whether it changed state.
    ///
    /// Duplicates and failed replays are logged and dropped; nothing is
    /// reported back to the sender.
    pub fn on_action_received(&mut self, envelope: Envelope) -> bool {
        let sender = envelope.sender;
        if sender == self.transport.local_peer() {
            tracing::trace!(seq = envelope.seq, "ignoring own envelope");
            return false;
        }

        match self.last_applied.get(&sender).copied() {
            Some(last) if envelope.seq <= last => {
                tracing::warn!(%sender, seq = envelope.seq, last, "duplicate envelope dropped");
                return false;
            }
            Some(last) if envelope.seq > last + 1 => {
                tracing::warn!(%sender, seq = envelope.seq, last, "sequence gap detected");
            }
            None if envelope.seq > 0 => {
                tracing::warn!(%sender, seq = envelope.seq, "first envelope from sender is not seq 0");
            }
            _ => {}
        }
        self.last_applied.insert(sender, envelope.seq);

        let action = match codec::decode(&envelope.payload) {
            Ok(action) => action,
            Err(err) => {
                tracing::error!(%sender, seq = envelope.seq, "undecodable payload dropped: {err}");
                return false;
            }
        };

        let env = GameEnv::new(&*self.movement);
        match GameEngine::new(&mut self.state).execute(env, &action) {
            Ok(outcome) => {
                tracing::debug!(
                    %sender,
                    seq = envelope.seq,
                    action = action.as_str(),
                    piece = %outcome.result.piece(),
                    "remote action applied"
                );
                true
            }
            Err(err) => {
                log_replay_failure(sender, envelope.seq, &action, &err);
                false
            }
        }
    }

    /// Drains the transport, applying every pending envelope in arrival order.
    /// Returns how many changed state.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(envelope) = self.transport.try_recv() {
            if self.on_action_received(envelope) {
                applied += 1;
            }
        }
        applied
    }

    // ===== queries =====

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &BoardGraph {
        &self.state.board
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.state.entities
    }

    pub fn local_player(&self) -> PlayerId {
        self.local_player
    }

    pub fn local_peer(&self) -> PeerId {
        self.transport.local_peer()
    }

    pub fn piece_at(&self, position: TilePos) -> Option<&Piece> {
        self.state.entities.piece_at(position)
    }

    pub fn movable_tiles(&self, start: TilePos, moves: i32) -> BTreeSet<TilePos> {
        self.state.board.movable_tiles(start, moves)
    }

    pub fn tile(&self, position: TilePos) -> std::result::Result<&Tile, BoardError> {
        self.state.board.tile(position)
    }

    pub fn world_position(&self, position: TilePos) -> std::result::Result<WorldPoint, BoardError> {
        self.state.board.world_position(position)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

fn log_replay_failure(sender: PeerId, seq: u64, action: &Action, err: &ExecuteError) {
    let code = err.error_code();
    let severity = err.severity().as_str();
    match err.source_error() {
        RegistryError::UnknownPlayer { player } => tracing::error!(
            %sender, seq, code, severity, %player,
            "unknown player id in {} action, dropped", action.as_str()
        ),
        RegistryError::UnknownPiece { piece } => tracing::error!(
            %sender, seq, code, severity, %piece,
            "unknown piece id in {} action, dropped", action.as_str()
        ),
        _ => tracing::error!(
            %sender, seq, code, severity, phase = err.phase().as_str(),
            "remote {} action failed, dropped: {err}", action.as_str()
        ),
    }
}
