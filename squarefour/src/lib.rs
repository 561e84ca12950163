//! Square Four engine: a gravity grid game won by the first player to own a
//! 2x2 block of cells, with a minimax opponent using alpha-beta pruning.
//!
//! The engine is a pure in-memory library over an explicit [`Board`] value.
//! Callers drive the game loop: they validate and apply the human's moves with
//! [`Board::apply_move`], ask [`choose_move`] for the computer's column, and
//! check [`Board::outcome`] after every move. A game can also be described by
//! a move record (e.g. `H3C3H2`) and analysed with [`best_move`].
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod board;
mod eval;
mod rules;
mod search;

pub use board::{Board, Cell, Coord};
pub use eval::{
    evaluate, Weights, CENTER_BONUS, CENTER_COLUMN, FOUR_BONUS, OPPONENT_THREE_PENALTY,
    THREE_BONUS, TWO_BONUS,
};
pub use rules::{Outcome, SquareWin};
pub use search::{SearchReport, Searcher, DRAW_SCORE, LOSS_SCORE, WIN_SCORE};

pub const WIDTH: usize = 7;
pub const HEIGHT: usize = 6;
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 8;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::Human => Cell::Human,
            Player::Computer => Cell::Computer,
        }
    }

    /// Letter used for this player in move records.
    pub fn symbol(self) -> char {
        match self {
            Player::Human => 'H',
            Player::Computer => 'C',
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ColumnFault {
    Full,
    OutOfBounds,
}

impl std::fmt::Display for ColumnFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnFault::Full => f.write_str("column is full"),
            ColumnFault::OutOfBounds => write!(f, "column must be 0-{}", WIDTH - 1),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid column {column}: {reason}")]
    InvalidColumn { column: usize, reason: ColumnFault },
    #[error("invalid move string at position {position}: {reason}")]
    ParseMove { position: usize, reason: String },
    #[error("column {column} has a disc above an empty cell")]
    MalformedBoard { column: usize },
    #[error("the game is already won")]
    GameOver,
    #[error("no legal moves remain")]
    NoLegalMoves,
    #[error("depth {0} is out of range (1-8)")]
    DepthOutOfRange(u8),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedMove {
    pub player: Player,
    pub column: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub position: String,
    pub depth: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResponse {
    pub column: usize,
    pub score: i32,
}

pub fn parse_history(history: &str) -> Result<Vec<TypedMove>, GameError> {
    let chars: Vec<char> = history.trim().chars().collect();
    let mut moves = Vec::new();
    let mut idx = 0;
    while idx < chars.len() {
        let symbol = chars[idx];
        let player = match symbol {
            'H' | 'h' => Player::Human,
            'C' | 'c' => Player::Computer,
            _ => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected H or C, found {symbol}"),
                })
            }
        };
        idx += 1;
        let Some(&column_char) = chars.get(idx) else {
            return Err(GameError::ParseMove {
                position: idx,
                reason: "missing column number".to_string(),
            });
        };
        let column = match column_char.to_digit(10) {
            Some(digit) if (digit as usize) < WIDTH => digit as usize,
            Some(_) => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("column must be 0-{}", WIDTH - 1),
                })
            }
            None => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected column digit, found {column_char}"),
                })
            }
        };
        moves.push(TypedMove { player, column });
        idx += 1;
    }
    Ok(moves)
}

/// Rebuilds the position described by `request.position` and searches it for
/// the computer.
pub fn best_move(request: MoveRequest) -> Result<MoveResponse, GameError> {
    validate_depth(request.depth)?;
    let moves = parse_history(&request.position)?;
    let board = Board::from_history(&moves)?;
    let report = Searcher::new(Player::Computer).best_column(&board, request.depth)?;
    Ok(MoveResponse {
        column: report.column,
        score: report.score,
    })
}

/// Column the computer should play on `board`, searching `depth` plies.
///
/// Ties between equally scored columns go to the lowest column index.
pub fn choose_move(board: &Board, depth: u8) -> Result<usize, GameError> {
    Searcher::new(Player::Computer)
        .best_column(board, depth)
        .map(|report| report.column)
}

/// Like [`choose_move`], but ties between equally scored columns are broken
/// by `rng`. A seeded generator makes the choice reproducible.
pub fn choose_move_with_rng<R: Rng + ?Sized>(
    board: &Board,
    depth: u8,
    rng: &mut R,
) -> Result<usize, GameError> {
    Searcher::new(Player::Computer)
        .best_column_with_rng(board, depth, rng)
        .map(|report| report.column)
}

pub(crate) fn validate_depth(depth: u8) -> Result<(), GameError> {
    if (MIN_DEPTH..=MAX_DEPTH).contains(&depth) {
        Ok(())
    } else {
        Err(GameError::DepthOutOfRange(depth))
    }
}
