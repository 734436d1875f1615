use std::collections::{BTreeMap, BTreeSet};

use crate::board::{BoardGraph, TilePos, find_reachable};
use crate::state::{Piece, PieceId, PieceType, Player, PlayerId, RegistryError};

/// Sole authority over players and pieces.
///
/// The registry never stores a board; every mutation borrows the board it
/// validates against, and placement is the only code path that marks a tile
/// occupied. Maps are ordered so two registries fed the same actions compare
/// equal field by field.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EntityRegistry {
    players: BTreeMap<PlayerId, Player>,
    pieces: BTreeMap<PieceId, Piece>,
    /// Next local player id to try in [`EntityRegistry::add_player`].
    next_player_id: u32,
    /// Next sequence number per piece-id namespace.
    next_piece_seq: BTreeMap<PlayerId, u64>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== players =====

    /// Adds a player under the next free id.
    ///
    /// Fails with [`RegistryError::PlayerIdOverflow`] once every id from the
    /// counter up to `u32::MAX` is taken.
    pub fn add_player(&mut self, name: impl Into<String>) -> Result<PlayerId, RegistryError> {
        let mut candidate = self.next_player_id;
        while self.players.contains_key(&PlayerId(candidate)) {
            candidate = candidate
                .checked_add(1)
                .ok_or(RegistryError::PlayerIdOverflow)?;
        }
        let id = PlayerId(candidate);
        self.players.insert(id, Player::new(id, name));
        self.next_player_id = candidate.saturating_add(1);
        Ok(id)
    }

    /// Registers a player under an id chosen elsewhere (usually the transport).
    pub fn insert_player(
        &mut self,
        id: PlayerId,
        name: impl Into<String>,
    ) -> Result<&Player, RegistryError> {
        if self.players.contains_key(&id) {
            return Err(RegistryError::DuplicatePlayer { player: id });
        }
        let player = self.players.entry(id).or_insert_with(|| Player::new(id, name));
        Ok(&*player)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    // ===== pieces =====

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Piece standing on `position`, if any.
    pub fn piece_at(&self, position: TilePos) -> Option<&Piece> {
        self.pieces.values().find(|piece| piece.position == position)
    }

    pub fn selected_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(|piece| piece.selected)
    }

    /// Checks every precondition of [`EntityRegistry::place_piece`] without mutating.
    pub fn check_placement(
        &self,
        board: &BoardGraph,
        player: PlayerId,
        position: TilePos,
        id: Option<PieceId>,
    ) -> Result<(), RegistryError> {
        if !self.players.contains_key(&player) {
            return Err(RegistryError::UnknownPlayer { player });
        }
        if board.is_occupied(position) {
            return Err(RegistryError::TileOccupied { position });
        }
        if let Some(piece) = id {
            if piece.owner != player {
                return Err(RegistryError::ForeignPieceId { player, piece });
            }
            if self.pieces.contains_key(&piece) {
                return Err(RegistryError::DuplicatePiece { piece });
            }
        }
        Ok(())
    }

    /// Places a new piece and marks its tile occupied.
    ///
    /// `id` is `None` for local placements, which draw the next id from the
    /// owner's namespace. Replayed placements pass the initiator's id, which is
    /// used verbatim; the namespace counter moves past it so later local
    /// placements never reuse it.
    pub fn place_piece(
        &mut self,
        board: &mut BoardGraph,
        player: PlayerId,
        kind: PieceType,
        position: TilePos,
        id: Option<PieceId>,
    ) -> Result<&Piece, RegistryError> {
        self.check_placement(board, player, position, id)?;

        let id = match id {
            Some(id) => {
                self.reserve_piece_id(id);
                id
            }
            None => self.allocate_piece_id(player)?,
        };

        board.set_occupied(position, true);
        let piece = self
            .pieces
            .entry(id)
            .or_insert_with(|| Piece::new(id, player, kind, position));
        Ok(&*piece)
    }

    /// Checks that `player` may select `piece`, returning the piece.
    pub fn check_selection(&self, player: PlayerId, piece: PieceId) -> Result<&Piece, RegistryError> {
        if !self.players.contains_key(&player) {
            return Err(RegistryError::UnknownPlayer { player });
        }
        let found = self
            .pieces
            .get(&piece)
            .ok_or(RegistryError::UnknownPiece { piece })?;
        if !found.is_owned_by(player) {
            return Err(RegistryError::NotOwner {
                player,
                piece,
                owner: found.owner,
            });
        }
        Ok(found)
    }

    /// Marks `piece` selected and returns the tiles it can move to with `moves`.
    pub fn select_piece(
        &mut self,
        board: &BoardGraph,
        player: PlayerId,
        piece: PieceId,
        moves: i32,
    ) -> Result<BTreeSet<TilePos>, RegistryError> {
        let position = self.check_selection(player, piece)?.position;
        if let Some(found) = self.pieces.get_mut(&piece) {
            found.selected = true;
        }
        Ok(find_reachable(board, position, moves))
    }

    /// Clears the selection flag.
    pub fn deselect_piece(&mut self, player: PlayerId, piece: PieceId) -> Result<(), RegistryError> {
        self.check_selection(player, piece)?;
        if let Some(found) = self.pieces.get_mut(&piece) {
            found.selected = false;
        }
        Ok(())
    }

    /// Confirms `piece` stands on a tile the board reports as occupied.
    pub fn verify_occupancy(&self, board: &BoardGraph, piece: PieceId) -> Result<(), RegistryError> {
        let found = self
            .pieces
            .get(&piece)
            .ok_or(RegistryError::UnknownPiece { piece })?;
        if board.is_occupied(found.position) {
            Ok(())
        } else {
            Err(RegistryError::OccupancyDesync {
                piece,
                position: found.position,
            })
        }
    }

    fn allocate_piece_id(&mut self, owner: PlayerId) -> Result<PieceId, RegistryError> {
        let next = self.next_piece_seq.entry(owner).or_insert(0);
        let seq = u32::try_from(*next).map_err(|_| RegistryError::PieceIdOverflow { player: owner })?;
        *next += 1;
        Ok(PieceId::new(owner, seq))
    }

    fn reserve_piece_id(&mut self, id: PieceId) {
        let next = self.next_piece_seq.entry(id.owner).or_insert(0);
        *next = (*next).max(u64::from(id.seq) + 1);
    }
}
