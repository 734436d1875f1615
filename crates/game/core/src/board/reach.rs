//! Exact-distance reachability over the board graph.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use crate::board::{BoardGraph, TilePos};
use crate::config::BoardConfig;

type Path = ArrayVec<TilePos, { BoardConfig::TILE_COUNT }>;

/// Returns every tile reachable from `start` by a simple path of exactly
/// `moves` edges.
///
/// Occupied tiles are never entered and never returned. A tile already on the
/// current path is not revisited, so `start` only appears in the result when
/// `moves == 0` (and then only if it is free). The occupancy of `start` itself
/// does not stop the search: a selected piece always stands on its own tile.
///
/// Negative budgets yield nothing, as do budgets longer than the longest
/// simple path on the board.
pub fn find_reachable(board: &BoardGraph, start: TilePos, moves: i32) -> BTreeSet<TilePos> {
    let mut reachable = BTreeSet::new();
    let Ok(moves) = usize::try_from(moves) else {
        return reachable;
    };
    if moves >= BoardConfig::TILE_COUNT || board.tile(start).is_err() {
        return reachable;
    }

    if moves == 0 {
        if !board.is_occupied(start) {
            reachable.insert(start);
        }
        return reachable;
    }

    let mut path = Path::new();
    path.push(start);
    search(board, start, moves, &mut path, &mut reachable);
    reachable
}

fn search(
    board: &BoardGraph,
    current: TilePos,
    remaining: usize,
    path: &mut Path,
    reachable: &mut BTreeSet<TilePos>,
) {
    if remaining == 0 {
        reachable.insert(current);
        return;
    }

    for &next in board.neighbours(current) {
        if board.is_occupied(next) || path.contains(&next) {
            continue;
        }
        // remaining < TILE_COUNT - path.len(), so the path never overflows.
        path.push(next);
        search(board, next, remaining - 1, path, reachable);
        path.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inner_ring() -> BTreeSet<TilePos> {
        (0..12).map(TilePos::inner).collect()
    }

    #[test]
    fn zero_moves_returns_start_when_free() {
        let mut board = BoardGraph::default();
        let start = TilePos::outer(4);
        assert_eq!(find_reachable(&board, start, 0), BTreeSet::from([start]));

        board.set_occupied(start, true);
        assert!(find_reachable(&board, start, 0).is_empty());
    }

    #[test]
    fn negative_budget_yields_nothing() {
        let board = BoardGraph::default();
        assert!(find_reachable(&board, TilePos::CENTER, -1).is_empty());
        assert!(find_reachable(&board, TilePos::CENTER, i32::MIN).is_empty());
    }

    #[test]
    fn one_move_from_center_is_the_inner_ring() {
        let board = BoardGraph::default();
        assert_eq!(find_reachable(&board, TilePos::CENTER, 1), inner_ring());
    }

    #[test]
    fn two_moves_from_center_cover_both_rings_but_not_center() {
        let board = BoardGraph::default();
        let reachable = find_reachable(&board, TilePos::CENTER, 2);
        assert_eq!(reachable.len(), 24);
        assert!(!reachable.contains(&TilePos::CENTER));
    }

    #[test]
    fn one_move_from_inner_tile() {
        let board = BoardGraph::default();
        let expected = BTreeSet::from([
            TilePos::CENTER,
            TilePos::inner(11),
            TilePos::inner(1),
            TilePos::outer(0),
        ]);
        assert_eq!(find_reachable(&board, TilePos::inner(0), 1), expected);
    }

    #[test]
    fn occupied_start_does_not_block_search() {
        let mut board = BoardGraph::default();
        board.set_occupied(TilePos::inner(0), true);
        assert_eq!(find_reachable(&board, TilePos::inner(0), 1).len(), 4);
    }

    #[test]
    fn surrounded_start_has_no_moves() {
        let mut board = BoardGraph::default();
        let start = TilePos::outer(6);
        for neighbour in board.neighbours(start).to_vec() {
            board.set_occupied(neighbour, true);
        }
        assert!(find_reachable(&board, start, 1).is_empty());
        assert!(find_reachable(&board, start, 3).is_empty());
    }

    #[test]
    fn occupied_tiles_block_paths_through_them() {
        let mut board = BoardGraph::default();
        // Outer 0 can only leave through outer 1, outer 11 or inner 0.
        board.set_occupied(TilePos::inner(0), true);
        board.set_occupied(TilePos::outer(11), true);
        let reachable = find_reachable(&board, TilePos::outer(0), 2);
        assert_eq!(
            reachable,
            BTreeSet::from([TilePos::outer(2), TilePos::inner(1)])
        );
    }

    #[test]
    fn exact_distance_keeps_longer_routes() {
        let board = BoardGraph::default();
        // Inner 1 is one step from inner 0, but also three steps away via
        // center -> inner 2 -> inner 1.
        let reachable = find_reachable(&board, TilePos::inner(0), 3);
        assert!(reachable.contains(&TilePos::inner(1)));
    }

    #[test]
    fn budgets_beyond_a_hamiltonian_path_are_empty() {
        let board = BoardGraph::default();
        assert!(find_reachable(&board, TilePos::CENTER, 25).is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn start_never_reached_with_positive_budget(index in 0usize..25, moves in 1i32..6) {
            let board = BoardGraph::default();
            let start = TilePos::from_index(index).unwrap();
            prop_assert!(!find_reachable(&board, start, moves).contains(&start));
        }

        #[test]
        fn results_are_never_occupied(
            mask in proptest::collection::vec(any::<bool>(), 25),
            index in 0usize..25,
            moves in 0i32..5,
        ) {
            let mut board = BoardGraph::default();
            for (i, occupied) in mask.iter().enumerate() {
                board.set_occupied(TilePos::from_index(i).unwrap(), *occupied);
            }
            let start = TilePos::from_index(index).unwrap();
            for pos in find_reachable(&board, start, moves) {
                prop_assert!(!board.is_occupied(pos));
            }
        }

        #[test]
        fn single_step_is_free_neighbours(
            mask in proptest::collection::vec(any::<bool>(), 25),
            index in 0usize..25,
        ) {
            let mut board = BoardGraph::default();
            for (i, occupied) in mask.iter().enumerate() {
                board.set_occupied(TilePos::from_index(i).unwrap(), *occupied);
            }
            let start = TilePos::from_index(index).unwrap();
            let expected: BTreeSet<TilePos> = board
                .neighbours(start)
                .iter()
                .copied()
                .filter(|pos| !board.is_occupied(*pos))
                .collect();
            prop_assert_eq!(find_reachable(&board, start, 1), expected);
        }
    }
}
