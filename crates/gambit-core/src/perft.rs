//! Perft (performance test) for move generation correctness verification.

use crate::game::Game;

/// Count the number of leaf nodes at the given depth.
///
/// Depth 0 returns 1 (the current position). Depth 1 returns the number
/// of legal moves for the side to move without playing them.
pub fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.all_valid_moves(game.team_turn());

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = game.clone();
        if child.play(mv).is_ok() {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns a vector of `(coordinate_move, node_count)` pairs sorted alphabetically.
pub fn divide(game: &Game, depth: usize) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = game
        .all_valid_moves(game.team_turn())
        .into_iter()
        .map(|mv| {
            let count = if depth <= 1 {
                1
            } else {
                let mut child = game.clone();
                match child.play(mv) {
                    Ok(()) => perft(&child, depth - 1),
                    Err(_) => 0,
                }
            };
            (mv.to_string(), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::color::Color;

    fn from_placement(placement: &str, turn: Color) -> Game {
        let board: Board = placement.parse().unwrap();
        Game::from_board(board, turn)
    }

    // --- Position 1: Starting position ---

    #[test]
    fn perft_startpos_depth_1() {
        assert_eq!(perft(&Game::new(), 1), 20);
    }

    #[test]
    fn perft_startpos_depth_2() {
        assert_eq!(perft(&Game::new(), 2), 400);
    }

    #[test]
    fn perft_startpos_depth_3() {
        assert_eq!(perft(&Game::new(), 3), 8_902);
    }

    #[test]
    #[ignore] // slow
    fn perft_startpos_depth_4() {
        assert_eq!(perft(&Game::new(), 4), 197_281);
    }

    // --- Position 2: Kiwipete ---
    // r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1

    fn kiwipete() -> Game {
        from_placement("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R", Color::White)
    }

    #[test]
    fn perft_kiwipete_depth_1() {
        assert_eq!(perft(&kiwipete(), 1), 48);
    }

    #[test]
    fn perft_kiwipete_depth_2() {
        assert_eq!(perft(&kiwipete(), 2), 2_039);
    }

    // --- Position 3 ---
    // 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1

    fn position3() -> Game {
        from_placement("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8", Color::White)
    }

    #[test]
    fn perft_pos3_depth_1() {
        assert_eq!(perft(&position3(), 1), 14);
    }

    #[test]
    fn perft_pos3_depth_2() {
        assert_eq!(perft(&position3(), 2), 191);
    }

    #[test]
    fn perft_pos3_depth_3() {
        assert_eq!(perft(&position3(), 3), 2_812);
    }

    // --- divide test ---

    #[test]
    fn divide_startpos_depth_1() {
        let results = divide(&Game::new(), 1);
        assert_eq!(results.len(), 20);
        // Each move at depth 1 should have count 1
        for (_, count) in &results {
            assert_eq!(*count, 1);
        }
        assert_eq!(results[0].0, "a2a3");
    }

    #[test]
    fn divide_sums_to_perft() {
        let game = Game::new();
        let total: u64 = divide(&game, 2).iter().map(|(_, n)| n).sum();
        assert_eq!(total, perft(&game, 2));
    }

    // --- depth 0 ---

    #[test]
    fn perft_depth_0() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }
}
