//! Static evaluation of non-terminal positions.
//!
//! The score is taken from one player's side only. It is not zero-sum: the
//! score for the opponent is computed independently and is not the negation.
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{Board, Cell, Coord, Player, HEIGHT, WIDTH};

/// Column whose discs earn [`CENTER_BONUS`].
pub const CENTER_COLUMN: usize = WIDTH / 2;
/// Per own disc in the center column.
pub const CENTER_BONUS: i32 = 3;
/// Window holding four own discs.
pub const FOUR_BONUS: i32 = 100;
/// Window holding three own discs and one empty cell.
pub const THREE_BONUS: i32 = 5;
/// Window holding two own discs and two empty cells.
pub const TWO_BONUS: i32 = 2;
/// Window holding three opponent discs and one empty cell.
pub const OPPONENT_THREE_PENALTY: i32 = -4;

const WINDOW_LEN: usize = 4;

/// Every horizontal and vertical run of four cells. Diagonals do not count.
static WINDOWS: Lazy<Vec<[Coord; WINDOW_LEN]>> = Lazy::new(generate_windows);

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub center: i32,
    pub four: i32,
    pub three: i32,
    pub two: i32,
    pub opponent_three: i32,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            center: CENTER_BONUS,
            four: FOUR_BONUS,
            three: THREE_BONUS,
            two: TWO_BONUS,
            opponent_three: OPPONENT_THREE_PENALTY,
        }
    }
}

impl Weights {
    /// Center bonus plus the sum of all window scores, from `player`'s side.
    pub fn score(&self, board: &Board, player: Player) -> i32 {
        let own = player.cell();
        let center = (0..HEIGHT)
            .filter(|&row| board.get(row, CENTER_COLUMN) == own)
            .count() as i32;

        let mut score = center * self.center;
        for &window in WINDOWS.iter() {
            let cells = window.map(|Coord { row, col }| board.get(row, col));
            score += self.score_window(&cells, player);
        }
        score
    }

    pub fn score_window(&self, window: &[Cell; WINDOW_LEN], player: Player) -> i32 {
        let own = player.cell();
        let theirs = player.opponent().cell();
        let count = |target: Cell| window.iter().filter(|&&c| c == target).count();
        match (count(own), count(theirs), count(Cell::Empty)) {
            (4, _, _) => self.four,
            (3, _, 1) => self.three,
            (2, _, 2) => self.two,
            (_, 3, 1) => self.opponent_three,
            _ => 0,
        }
    }
}

/// Scores `board` for `player` with the default weights.
pub fn evaluate(board: &Board, player: Player) -> i32 {
    Weights::default().score(board, player)
}

fn generate_windows() -> Vec<[Coord; WINDOW_LEN]> {
    let mut windows = Vec::new();
    // Horizontal
    for row in 0..HEIGHT {
        for col in 0..=WIDTH - WINDOW_LEN {
            windows.push(std::array::from_fn(|offset| Coord::new(row, col + offset)));
        }
    }
    // Vertical
    for col in 0..WIDTH {
        for row in 0..=HEIGHT - WINDOW_LEN {
            windows.push(std::array::from_fn(|offset| Coord::new(row + offset, col)));
        }
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(moves: &[(usize, Player)]) -> Board {
        let mut board = Board::new();
        for &(col, player) in moves {
            board.apply_move(col, player).unwrap();
        }
        board
    }

    #[test]
    fn window_count() {
        // 6 rows x 4 horizontal starts + 7 columns x 3 vertical starts
        assert_eq!(WINDOWS.len(), 6 * 4 + 7 * 3);
    }

    #[test]
    fn window_patterns() {
        use Cell::{Computer as C, Empty as E, Human as H};
        let w = Weights::default();
        let me = Player::Computer;
        assert_eq!(w.score_window(&[C, C, C, C], me), FOUR_BONUS);
        assert_eq!(w.score_window(&[C, E, C, C], me), THREE_BONUS);
        assert_eq!(w.score_window(&[E, C, C, E], me), TWO_BONUS);
        assert_eq!(w.score_window(&[H, H, E, H], me), OPPONENT_THREE_PENALTY);
        assert_eq!(w.score_window(&[C, C, C, H], me), 0);
        assert_eq!(w.score_window(&[C, C, H, E], me), 0);
        assert_eq!(w.score_window(&[H, H, H, H], me), 0);
        assert_eq!(w.score_window(&[E, E, E, E], me), 0);
    }

    #[test]
    fn empty_board_scores_zero() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::Human), 0);
        assert_eq!(evaluate(&board, Player::Computer), 0);
    }

    #[test]
    fn center_disc_bonus() {
        let board = board_with(&[(CENTER_COLUMN, Player::Computer)]);
        assert_eq!(evaluate(&board, Player::Computer), CENTER_BONUS);
        assert_eq!(evaluate(&board, Player::Human), 0);
    }

    #[test]
    fn scoring_is_not_zero_sum() {
        // Computer: three in a row on the floor, columns 0-2.
        let board = board_with(&[
            (0, Player::Computer),
            (1, Player::Computer),
            (2, Player::Computer),
        ]);
        // Windows 0-3 (three + empty) and 1-4 (two + two empty).
        assert_eq!(evaluate(&board, Player::Computer), THREE_BONUS + TWO_BONUS);
        assert_eq!(evaluate(&board, Player::Human), OPPONENT_THREE_PENALTY);
    }

    #[test]
    fn full_window_counts_like_a_pattern() {
        let board = board_with(&[
            (0, Player::Computer),
            (1, Player::Computer),
            (2, Player::Computer),
            (3, Player::Computer),
        ]);
        let expected = FOUR_BONUS + THREE_BONUS + TWO_BONUS + CENTER_BONUS;
        assert_eq!(evaluate(&board, Player::Computer), expected);
    }

    #[test]
    fn vertical_windows_count() {
        let board = board_with(&[(6, Player::Human), (6, Player::Human)]);
        // Rows 0-3 hold two discs and two empties; rows 1-4 and 2-5 do not.
        assert_eq!(evaluate(&board, Player::Human), TWO_BONUS);
    }

    #[test]
    fn custom_weights() {
        let weights = Weights {
            center: 10,
            ..Weights::default()
        };
        let board = board_with(&[(CENTER_COLUMN, Player::Human)]);
        assert_eq!(weights.score(&board, Player::Human), 10);
    }

    #[test]
    fn weights_from_partial_json() {
        let weights: Weights = serde_json::from_str(r#"{"two": 7}"#).unwrap();
        assert_eq!(weights.two, 7);
        assert_eq!(weights.four, FOUR_BONUS);
    }
}
