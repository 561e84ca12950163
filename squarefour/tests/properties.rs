use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use squarefour::{
    choose_move, evaluate, Board, Cell, Coord, Outcome, Player, Searcher, DRAW_SCORE, HEIGHT,
    LOSS_SCORE, WIDTH, WIN_SCORE,
};

/// Plays up to `plies` random legal moves, human first, stopping at the end
/// of the game.
fn random_position(rng: &mut StdRng, plies: usize) -> Board {
    let mut board = Board::new();
    let mut player = Player::Human;
    for _ in 0..plies {
        if board.outcome() != Outcome::Ongoing {
            break;
        }
        let Some(&col) = board.legal_columns().choose(rng) else {
            break;
        };
        board.apply_move(col, player).unwrap();
        player = player.opponent();
    }
    board
}

/// Anchors of every block owned by `player`, in scan order.
fn brute_force_squares(board: &Board, player: Player) -> Vec<Coord> {
    let own = player.cell();
    let mut anchors = Vec::new();
    for row in 0..HEIGHT - 1 {
        for col in 0..WIDTH - 1 {
            let cells = [(0, 0), (0, 1), (1, 0), (1, 1)]
                .iter()
                .map(|&(dr, dc)| board.get(row + dr, col + dc));
            if cells.filter(|&c| c == own).count() == 4 {
                anchors.push(Coord::new(row, col));
            }
        }
    }
    anchors
}

/// Plain minimax without pruning, scored for the computer.
fn minimax(board: &Board, depth: u8, maximizing: bool) -> (Option<usize>, i32) {
    if depth == 0 || board.is_terminal() {
        let value = if board.has_square_win(Player::Computer) {
            WIN_SCORE
        } else if board.has_square_win(Player::Human) {
            LOSS_SCORE
        } else if board.is_full() {
            DRAW_SCORE
        } else {
            evaluate(board, Player::Computer)
        };
        return (None, value);
    }
    let mover = if maximizing {
        Player::Computer
    } else {
        Player::Human
    };
    let mut best = None;
    let mut value = if maximizing { i32::MIN } else { i32::MAX };
    for col in board.legal_columns() {
        let child = board.with_move(col, mover).unwrap();
        let (_, score) = minimax(&child, depth - 1, !maximizing);
        let better = if maximizing {
            score > value
        } else {
            score < value
        };
        if better {
            value = score;
            best = Some(col);
        }
    }
    (best, value)
}

#[test]
fn square_detection_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..300 {
        let plies = rng.gen_range(0..=WIDTH * HEIGHT);
        // Ignore the end of the game so boards with several blocks show up.
        let mut board = Board::new();
        let mut player = Player::Human;
        for _ in 0..plies {
            let Some(&col) = board.legal_columns().choose(&mut rng) else {
                break;
            };
            board.apply_move(col, player).unwrap();
            player = player.opponent();
        }
        for player in [Player::Human, Player::Computer] {
            let expected = brute_force_squares(&board, player);
            assert_eq!(board.square_win(player), expected.first().copied());
            assert_eq!(board.has_square_win(player), !expected.is_empty());
        }
        let any_win = board.has_square_win(Player::Human) || board.has_square_win(Player::Computer);
        assert_eq!(board.is_terminal(), any_win || board.is_full());
        assert_eq!(board.is_draw(), !any_win && board.is_full());
    }
}

#[test]
fn moves_respect_gravity() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let mut board = Board::new();
        let mut player = Player::Computer;
        loop {
            let legal = board.legal_columns();
            for col in 0..WIDTH {
                let top_empty = board.get(HEIGHT - 1, col) == Cell::Empty;
                assert_eq!(legal.contains(&col), top_empty);
                if !top_empty {
                    let before = board;
                    assert!(board.apply_move(col, player).is_err());
                    assert_eq!(board, before);
                }
            }
            let Some(&col) = legal.choose(&mut rng) else {
                break;
            };
            let expected_row = board.column_height(col);
            assert_eq!(board.drop_row(col), Some(expected_row));
            assert_eq!(board.apply_move(col, player), Ok(expected_row));
            assert_eq!(board.get(expected_row, col), player.cell());
            assert!(board.check_gravity().is_ok());
            player = player.opponent();
        }
        assert!(board.is_full());
    }
}

#[test]
fn pruning_never_changes_the_result() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..40 {
        let plies = rng.gen_range(0..24);
        let board = random_position(&mut rng, plies);
        for depth in 1..=4 {
            for maximizing in [true, false] {
                let mut searcher = Searcher::new(Player::Computer);
                let pruned = searcher.search(&board, depth, i32::MIN, i32::MAX, maximizing);
                assert_eq!(pruned, minimax(&board, depth, maximizing), "depth {depth}");
            }
        }
    }
}

#[test]
fn search_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(19);
    for _ in 0..20 {
        let plies = rng.gen_range(0..16);
        let board = random_position(&mut rng, plies);
        if board.outcome() != Outcome::Ongoing {
            continue;
        }
        let first = choose_move(&board, 3).unwrap();
        assert!(board.is_legal(first));
        for _ in 0..3 {
            assert_eq!(choose_move(&board, 3), Ok(first));
        }
    }
}
