use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn board(cells: &str) -> Board {
    cells.parse().unwrap()
}

#[test]
fn test_initial_state() {
    let state = Board::new();
    assert_eq!(state, Board::default());
    assert_eq!(state.to_move(), Player::X);
    assert_eq!(state.winner(), None);
    assert_eq!(state.moves_played(), 0);
    assert!(!state.is_done());
}

#[test]
fn test_legal_moves() {
    let state = Board::new();
    let legal = state.legal_moves();
    assert_eq!(legal, (0..9).collect::<Vec<_>>());
    assert_eq!(state.legal_moves_mask(), 0x1FFu16);

    // After one move
    let state = state.place(4).unwrap(); // Center
    let legal = state.legal_moves();
    assert_eq!(legal.len(), 8);
    assert!(!legal.contains(&4));
    assert_eq!(state.legal_moves_mask(), 0x1FFu16 & !(1u16 << 4));
}

#[test]
fn test_place() {
    let state = Board::new();
    let new_state = state.place(4).unwrap(); // X places in center

    assert_eq!(new_state.cell(4), Some(Player::X));
    assert_eq!(new_state.to_move(), Player::O);
    assert!(!new_state.is_done());
    // Original board untouched
    assert_eq!(state.cell(4), None);
}

#[test]
fn test_invalid_place() {
    let state = Board::new().place(4).unwrap();

    // Same position
    assert!(matches!(state.place(4), Err(DomainError::InvalidState(_))));
    // Off the board
    assert!(matches!(state.place(9), Err(DomainError::InvalidState(_))));
}

#[test]
fn test_winning_game() {
    let mut state = Board::new();

    // X wins with top row
    for pos in [0, 3, 1, 4, 2] {
        state = state.place(pos).unwrap();
    }

    assert_eq!(state.winner(), Some(Player::X));
    assert!(state.is_done());
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_turn_inference() {
    assert_eq!(board("X........").to_move(), Player::O);
    assert_eq!(board("X...O....").to_move(), Player::X);
    // Counts decide, not positions
    assert_eq!(board("......O.X").to_move(), Player::X);
}

/// All 8 winning lines should be detected correctly
#[test]
fn test_all_winning_lines() {
    assert_eq!(LINES.len(), 8, "Should have 8 winning lines");

    for (line_idx, line) in LINES.iter().enumerate() {
        for player in [Player::X, Player::O] {
            let state = line
                .iter()
                .fold(Board::new(), |b, &pos| b.with_cell(pos as u8, Some(player)));
            assert_eq!(
                state.winner(),
                Some(player),
                "{} should win on line {}: {:?}",
                player,
                line_idx,
                line
            );
        }
    }
}

/// Legal move mask should match legal_moves vector
#[test]
fn test_legal_moves_mask_consistency() {
    let boards = [
        ".........", // Empty
        "X........", // One move
        "XOXO.....", // Four moves
        "XOXOXO...", // Six moves
        "XOXXOOOX.", // Eight moves
    ];

    for cells in boards {
        let state = board(cells);
        let legal_vec = state.legal_moves();
        let legal_mask = state.legal_moves_mask();

        for pos in 0..9u8 {
            let is_in_vec = legal_vec.contains(&pos);
            let is_in_mask = (legal_mask & (1u16 << pos)) != 0;
            assert_eq!(
                is_in_vec, is_in_mask,
                "Mismatch at pos {} for board {}",
                pos, cells
            );
        }

        assert_eq!(
            legal_vec.len(),
            legal_mask.count_ones() as usize,
            "Count mismatch for board {}",
            cells
        );
    }
}

/// Draw detection: full board with no winner
#[test]
fn test_draw_detection() {
    let draw_boards = [
        "XOXXOOOXX", // X O X / X O O / O X X
        "XOXOXXOXO", // X O X / O X X / O X O
        "OXOOXXXOO", // O X O / O X X / X O O
    ];

    for cells in draw_boards {
        let state = board(cells);
        assert_eq!(state.winner(), None, "Should detect draw for board {}", cells);
        assert!(state.is_full());
        assert!(state.is_done());
        assert!(state.legal_moves().is_empty());
        assert_eq!(state.legal_moves_mask(), 0);
    }
}

/// No moves allowed on finished game
#[test]
fn test_no_moves_after_game_over() {
    let state = board("XXXOO....");

    assert!(state.is_done());
    assert!(state.legal_moves().is_empty());
    assert_eq!(state.legal_moves_mask(), 0);
    assert!(state.place(5).is_err());
}

#[test]
fn test_display_and_parse() {
    let state = Board::new().place(0).unwrap().place(4).unwrap();
    assert_eq!(state.to_string(), "X..\n.O.\n...");
    assert_eq!(state.to_string().parse::<Board>().unwrap(), state);
    assert_eq!(board("X|.|. .|O|. .|.|."), state);
}

#[test]
fn test_parse_errors() {
    assert!("X.O".parse::<Board>().is_err());
    assert!("X.O.......".parse::<Board>().is_err());
    assert!("X.O.Z....".parse::<Board>().is_err());
}

#[test]
fn test_player_parse() {
    assert_eq!("x".parse::<Player>().unwrap(), Player::X);
    assert_eq!(" O ".parse::<Player>().unwrap(), Player::O);
    assert!("Y".parse::<Player>().is_err());
    assert_eq!(Player::X.opponent(), Player::O);
}

#[test]
fn test_move_to() {
    let start = Board::new();
    let next = start.place(7).unwrap();
    assert_eq!(start.move_to(&next), Some(7));
    assert_eq!(next.move_to(&start), None);
    assert_eq!(start.move_to(&start), None);
    assert_eq!(start.move_to(&next.place(0).unwrap()), None);
}

#[test]
fn test_board_serde_roundtrip() {
    let state = board("XO..X...O");
    let json = serde_json::to_string(&state).unwrap();
    let decoded: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, state);
}

// =========================================================================
// Domain implementation
// =========================================================================

#[test]
fn test_domain_successors() {
    let domain = TicTacToe;

    let children = domain.successors(&Board::new()).unwrap();
    assert_eq!(children.len(), 9);
    for (pos, child) in children.iter().enumerate() {
        assert_eq!(child.cell(pos as u8), Some(Player::X));
        assert_eq!(child.moves_played(), 1);
    }

    let children = domain.successors(&board("X........")).unwrap();
    assert_eq!(children.len(), 8);
    assert!(children.iter().all(|c| c.count(Player::O) == 1));
}

#[test]
fn test_domain_terminal_states() {
    let domain = TicTacToe;
    assert!(domain.successors(&board("XXXOO....")).unwrap().is_empty());
    assert!(domain.successors(&board("XOXXOOOXX")).unwrap().is_empty());
}

#[test]
fn test_domain_is_win() {
    let domain = TicTacToe;
    let x_won = board("XXXOO....");

    assert!(domain.is_win(&x_won, &Player::X).unwrap());
    assert!(!domain.is_win(&x_won, &Player::O).unwrap());

    // A draw is a win for nobody
    let draw = board("XOXXOOOXX");
    assert!(!domain.is_win(&draw, &Player::X).unwrap());
    assert!(!domain.is_win(&draw, &Player::O).unwrap());
}

// =========================================================================
// Fuzz-style tests with random seeds
// =========================================================================

/// Play many random games and verify invariants hold
#[test]
fn test_random_games_invariants() {
    for seed in 0..200u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut state = Board::new();

        while !state.is_done() {
            let legal = state.legal_moves();
            assert!(!legal.is_empty(), "Unfinished game must have moves");

            let mover = state.to_move();
            let pos = legal[rng.gen_range(0..legal.len())];
            let next = state.place(pos).unwrap();

            assert_eq!(next.cell(pos), Some(mover));
            assert_eq!(next.moves_played(), state.moves_played() + 1);
            assert_eq!(state.move_to(&next), Some(pos));
            // Piece counts never drift apart by more than one
            let diff = next.count(Player::X) as i32 - next.count(Player::O) as i32;
            assert!((0..=1).contains(&diff), "seed {}: bad counts", seed);

            state = next;
        }

        assert!(state.moves_played() >= 5, "No win before five moves");
        assert!(state.winner().is_some() || state.is_full());
        assert_eq!(state.legal_moves_mask(), 0);
    }
}
