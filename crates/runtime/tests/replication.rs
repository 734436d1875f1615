//! Two-peer replication over the in-memory transport.

use std::collections::BTreeSet;

use dejarik_core::{PieceId, PieceType, RegistryError, TilePos};
use dejarik_runtime::{
    Envelope, MemoryHub, MemoryTransport, RuntimeConfig, RuntimeError, Session, Transport, encode,
};

fn pair() -> (Session<MemoryTransport>, Session<MemoryTransport>) {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let mut a = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    let mut b = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    a.register_peer(b.local_peer(), "bob").unwrap();
    b.register_peer(a.local_peer(), "alice").unwrap();
    (a, b)
}

fn assert_converged(a: &Session<MemoryTransport>, b: &Session<MemoryTransport>) {
    assert_eq!(a.board(), b.board());
    assert_eq!(
        a.registry().pieces().collect::<Vec<_>>(),
        b.registry().pieces().collect::<Vec<_>>()
    );
}

#[test]
fn placement_replicates_with_the_same_id() {
    let (mut a, mut b) = pair();

    let piece = a.place_piece(PieceType::Ghhhk, TilePos::new(1, 0)).unwrap();
    assert_eq!(b.pump(), 1);

    let remote = b.piece_at(TilePos::new(1, 0)).unwrap();
    assert_eq!(remote.id, piece);
    assert_eq!(remote.owner, a.local_player());
    assert_eq!(remote.kind, PieceType::Ghhhk);
    assert!(b.tile(TilePos::new(1, 0)).unwrap().is_occupied());
    assert_eq!(b.registry().piece_count(), 1);
    assert_converged(&a, &b);
}

#[test]
fn selection_replicates_and_yields_destinations() {
    let (mut a, mut b) = pair();
    let piece = a.place_piece(PieceType::Ghhhk, TilePos::new(1, 0)).unwrap();

    let reachable = a.select_piece(piece).unwrap();
    assert_eq!(
        reachable,
        BTreeSet::from([
            TilePos::CENTER,
            TilePos::inner(11),
            TilePos::inner(1),
            TilePos::outer(0)
        ])
    );

    assert_eq!(b.pump(), 2);
    assert!(b.registry().piece(piece).unwrap().selected);
    assert_eq!(b.movable_tiles(TilePos::new(1, 0), 1), reachable);
    assert_converged(&a, &b);
}

#[test]
fn deselection_replicates() {
    let (mut a, mut b) = pair();
    let piece = a.place_piece(PieceType::Ghhhk, TilePos::new(1, 0)).unwrap();
    a.select_piece(piece).unwrap();
    a.deselect_piece(piece).unwrap();
    assert!(!a.registry().piece(piece).unwrap().selected);

    assert_eq!(b.pump(), 3);
    assert!(!b.registry().piece(piece).unwrap().selected);
    assert_converged(&a, &b);
}

#[test]
fn deselecting_a_foreign_piece_fails_locally() {
    let (mut a, mut b) = pair();
    let piece = a.place_piece(PieceType::Ghhhk, TilePos::new(1, 0)).unwrap();
    a.select_piece(piece).unwrap();
    assert_eq!(b.pump(), 2);

    let err = b.deselect_piece(piece).unwrap_err();
    assert!(matches!(
        err.registry_error(),
        Some(RegistryError::NotOwner { .. })
    ));
    assert!(b.registry().piece(piece).unwrap().selected);
    assert_eq!(a.pump(), 0);
    assert_converged(&a, &b);
}

#[test]
fn local_failures_are_not_broadcast() {
    let (mut a, mut b) = pair();
    a.place_piece(PieceType::Houjix, TilePos::outer(3)).unwrap();
    b.pump();

    let err = b.place_piece(PieceType::Monnok, TilePos::outer(3)).unwrap_err();
    assert!(matches!(
        err.registry_error(),
        Some(RegistryError::TileOccupied { .. })
    ));

    assert_eq!(a.pump(), 0);
    assert_eq!(a.registry().piece_count(), 1);
    assert_converged(&a, &b);
}

#[test]
fn concurrent_placements_use_disjoint_id_namespaces() {
    let (mut a, mut b) = pair();

    let from_a = a.place_piece(PieceType::Ghhhk, TilePos::inner(0)).unwrap();
    let from_b = b.place_piece(PieceType::Ghhhk, TilePos::inner(6)).unwrap();
    assert_ne!(from_a, from_b);

    a.pump();
    b.pump();

    assert_eq!(a.registry().piece_count(), 2);
    assert_converged(&a, &b);

    // Later local placements still draw fresh ids on both sides.
    let next_a = a.place_piece(PieceType::NgOk, TilePos::outer(0)).unwrap();
    let next_b = b.place_piece(PieceType::NgOk, TilePos::outer(6)).unwrap();
    b.pump();
    a.pump();
    assert_eq!(next_a, PieceId::new(a.local_player(), 1));
    assert_eq!(next_b, PieceId::new(b.local_player(), 1));
    assert_converged(&a, &b);
}

#[test]
fn selecting_a_foreign_piece_fails_locally() {
    let (mut a, mut b) = pair();
    let piece = a.place_piece(PieceType::KLorSlug, TilePos::CENTER).unwrap();
    b.pump();

    let err = b.select_piece(piece).unwrap_err();
    assert!(matches!(
        err.registry_error(),
        Some(RegistryError::NotOwner { .. })
    ));
    assert!(!b.registry().piece(piece).unwrap().selected);
    assert_eq!(a.pump(), 0);
}

#[test]
fn replay_from_unknown_player_is_dropped() {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let mut a = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    // `b` never registers `a`, so every replayed action names an unknown player.
    let mut b = Session::from_config(hub.connect().unwrap(), &config).unwrap();

    a.place_piece(PieceType::Grimtaash, TilePos::inner(4)).unwrap();
    let before = b.state().clone();

    assert_eq!(b.pump(), 0);
    assert_eq!(b.state(), &before);
    assert!(!b.board().is_occupied(TilePos::inner(4)));
}

#[test]
fn replayed_select_of_unknown_piece_is_dropped() {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let sender = hub.connect().unwrap();
    let mut b = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    let peer = sender.local_peer();
    let player = b.register_peer(peer, "alice").unwrap();
    let before = b.state().clone();

    let action = dejarik_core::Action::Select(dejarik_core::SelectAction::new(
        player,
        PieceId::new(player, 7),
    ));
    assert!(!b.on_action_received(Envelope::new(peer, 0, encode(&action).unwrap())));
    assert_eq!(b.state(), &before);
}

#[test]
fn duplicated_envelopes_are_ignored() {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let mut sender = hub.connect().unwrap();
    let mut b = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    let peer = sender.local_peer();
    let player = b.register_peer(peer, "alice").unwrap();

    let action = dejarik_core::Action::Place(dejarik_core::PlaceAction::with_id(
        player,
        PieceId::new(player, 0),
        PieceType::Monnok,
        TilePos::outer(9),
    ));
    let envelope = Envelope::new(peer, 0, encode(&action).unwrap());
    sender.send_to_peers(&envelope).unwrap();
    sender.send_to_peers(&envelope).unwrap();

    assert_eq!(b.pump(), 1);
    assert_eq!(b.registry().piece_count(), 1);
}

#[test]
fn sequence_gaps_are_tolerated() {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let mut sender = hub.connect().unwrap();
    let mut b = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    let peer = sender.local_peer();
    let player = b.register_peer(peer, "alice").unwrap();

    for (seq, sector) in [(0u64, 0), (5, 1)] {
        let action = dejarik_core::Action::Place(dejarik_core::PlaceAction::with_id(
            player,
            PieceId::new(player, seq as u32),
            PieceType::Houjix,
            TilePos::inner(sector),
        ));
        sender
            .send_to_peers(&Envelope::new(peer, seq, encode(&action).unwrap()))
            .unwrap();
    }

    assert_eq!(b.pump(), 2);
    assert!(b.board().is_occupied(TilePos::inner(0)));
    assert!(b.board().is_occupied(TilePos::inner(1)));

    // An older envelope arriving after the gap is treated as a duplicate.
    let late = dejarik_core::Action::Place(dejarik_core::PlaceAction::with_id(
        player,
        PieceId::new(player, 2),
        PieceType::Houjix,
        TilePos::inner(2),
    ));
    assert!(!b.on_action_received(Envelope::new(peer, 3, encode(&late).unwrap())));
    assert!(!b.board().is_occupied(TilePos::inner(2)));
}

#[test]
fn garbage_payloads_are_dropped() {
    let (a, mut b) = pair();
    assert!(!b.on_action_received(Envelope::new(a.local_peer(), 0, vec![0xff; 3])));
    assert_eq!(b.registry().piece_count(), 0);
}

#[test]
fn send_failure_surfaces_after_peer_leaves() {
    let hub = MemoryHub::new();
    let config = RuntimeConfig::default();
    let mut a = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    let b = Session::from_config(hub.connect().unwrap(), &config).unwrap();
    drop(b);

    let err = a.place_piece(PieceType::Ghhhk, TilePos::CENTER).unwrap_err();
    assert!(matches!(err, RuntimeError::Transport(_)));
}

#[test]
fn world_positions_are_shared_across_peers() {
    let (a, b) = pair();
    for pos in TilePos::all() {
        assert_eq!(a.world_position(pos).unwrap(), b.world_position(pos).unwrap());
    }
}
