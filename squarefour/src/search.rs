//! Depth-limited minimax with alpha-beta pruning.
//!
//! Scores are always taken from the maximizing player's side; the minimizing
//! level picks the lowest of those scores rather than negating them.
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::{validate_depth, Board, GameError, Player, Weights};

pub const WIN_SCORE: i32 = 100_000;
pub const LOSS_SCORE: i32 = -WIN_SCORE;
pub const DRAW_SCORE: i32 = 0;

/// Result of one top-level search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub column: usize,
    pub score: i32,
    pub depth: u8,
    /// Positions visited, root included.
    pub nodes: u64,
    /// Times the remaining siblings of a node were skipped.
    pub cutoffs: u64,
}

#[derive(Clone, Debug)]
pub struct Searcher {
    maximizer: Player,
    weights: Weights,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    pub fn new(maximizer: Player) -> Self {
        Self {
            maximizer,
            weights: Weights::default(),
            nodes: 0,
            cutoffs: 0,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn maximizer(&self) -> Player {
        self.maximizer
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Best column for the maximizer, trying candidates in ascending order.
    pub fn best_column(&mut self, board: &Board, depth: u8) -> Result<SearchReport, GameError> {
        let columns = board.legal_columns();
        self.run(board, depth, columns)
    }

    /// Best column for the maximizer, trying root candidates in an order
    /// shuffled by `rng`. Only the choice among equally scored columns
    /// changes; the score is the same as [`Searcher::best_column`].
    pub fn best_column_with_rng<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        depth: u8,
        rng: &mut R,
    ) -> Result<SearchReport, GameError> {
        let mut columns = board.legal_columns();
        columns.shuffle(rng);
        self.run(board, depth, columns)
    }

    fn run(
        &mut self,
        board: &Board,
        depth: u8,
        columns: Vec<usize>,
    ) -> Result<SearchReport, GameError> {
        validate_depth(depth)?;
        board.check_gravity()?;
        if board.has_square_win(Player::Human) || board.has_square_win(Player::Computer) {
            return Err(GameError::GameOver);
        }
        if columns.is_empty() {
            return Err(GameError::NoLegalMoves);
        }

        self.nodes = 1;
        self.cutoffs = 0;
        let (column, score) = self.expand(board, &columns, depth, i32::MIN, i32::MAX, true);
        let column = column.ok_or(GameError::NoLegalMoves)?;
        let report = SearchReport {
            column,
            score,
            depth,
            nodes: self.nodes,
            cutoffs: self.cutoffs,
        };
        debug!(
            maximizer = ?self.maximizer,
            column,
            score,
            depth,
            nodes = report.nodes,
            cutoffs = report.cutoffs,
            "search complete"
        );
        Ok(report)
    }

    /// One search node: returns the chosen column (none at a leaf) and the
    /// node's value.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        self.nodes += 1;
        if depth == 0 || board.is_terminal() {
            return (None, self.leaf_value(board));
        }
        let columns = board.legal_columns();
        self.expand(board, &columns, depth, alpha, beta, maximizing)
    }

    fn expand(
        &mut self,
        board: &Board,
        columns: &[usize],
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (Option<usize>, i32) {
        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let mut best_col = columns.first().copied();
        let mut value = if maximizing { i32::MIN } else { i32::MAX };

        for &col in columns {
            let Some(child) = board.with_move(col, mover) else {
                continue;
            };
            let (_, score) = self.search(&child, depth - 1, alpha, beta, !maximizing);
            trace!(col, depth, score, maximizing, "scored candidate");
            if maximizing {
                if score > value {
                    value = score;
                    best_col = Some(col);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_col = Some(col);
                }
                beta = beta.min(value);
            }
            if alpha >= beta {
                self.cutoffs += 1;
                break;
            }
        }
        (best_col, value)
    }

    fn leaf_value(&self, board: &Board) -> i32 {
        if board.has_square_win(self.maximizer) {
            WIN_SCORE
        } else if board.has_square_win(self.maximizer.opponent()) {
            LOSS_SCORE
        } else if board.is_full() {
            DRAW_SCORE
        } else {
            self.weights.score(board, self.maximizer)
        }
    }
}
