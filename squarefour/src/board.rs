use serde::{Deserialize, Serialize};

use crate::{ColumnFault, GameError, Player, TypedMove, HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Human,
    Computer,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Human => Some(Player::Human),
            Cell::Computer => Some(Player::Computer),
        }
    }
}

/// A cell position. Row 0 is the bottom of the grid.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Fixed 6x7 grid stored inline, so copying a board is a plain memcpy.
///
/// Discs stack from row 0 upwards: within a column, occupied cells always form
/// a contiguous run starting at the bottom.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Replays a move record, validating every move.
    pub fn from_history(moves: &[TypedMove]) -> Result<Self, GameError> {
        let mut board = Self::new();
        for mv in moves {
            board.apply_move(mv.column, mv.player)?;
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn is_legal(&self, col: usize) -> bool {
        col < WIDTH && self.cells[HEIGHT - 1][col] == Cell::Empty
    }

    /// Playable columns in ascending order.
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&col| self.is_legal(col)).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells[HEIGHT - 1].iter().all(|&cell| cell != Cell::Empty)
    }

    /// Number of discs stacked in `col`.
    pub fn column_height(&self, col: usize) -> usize {
        (0..HEIGHT)
            .take_while(|&row| self.cells[row][col] != Cell::Empty)
            .count()
    }

    /// Lowest empty row of `col`, or `None` when the column is full or out of
    /// range.
    pub fn drop_row(&self, col: usize) -> Option<usize> {
        if col >= WIDTH {
            return None;
        }
        (0..HEIGHT).find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Writes `player`'s disc without any checks. The caller must have taken
    /// `row` from [`Board::drop_row`].
    pub fn place(&mut self, row: usize, col: usize, player: Player) {
        self.cells[row][col] = player.cell();
    }

    /// Drops `player`'s disc into `col` and returns the row it landed in.
    pub fn apply_move(&mut self, col: usize, player: Player) -> Result<usize, GameError> {
        if col >= WIDTH {
            return Err(GameError::InvalidColumn {
                column: col,
                reason: ColumnFault::OutOfBounds,
            });
        }
        let row = self.drop_row(col).ok_or(GameError::InvalidColumn {
            column: col,
            reason: ColumnFault::Full,
        })?;
        self.place(row, col, player);
        Ok(row)
    }

    /// Copy of the board with `player`'s disc dropped into `col`, or `None`
    /// if the column cannot take another disc.
    pub fn with_move(&self, col: usize, player: Player) -> Option<Board> {
        let row = self.drop_row(col)?;
        let mut child = *self;
        child.place(row, col, player);
        Some(child)
    }

    pub fn disc_count(&self, player: Player) -> usize {
        let cell = player.cell();
        self.cells.iter().flatten().filter(|&&c| c == cell).count()
    }

    /// Checks that no column has a disc resting above an empty cell.
    pub fn check_gravity(&self) -> Result<(), GameError> {
        for col in 0..WIDTH {
            let height = self.column_height(col);
            if (height..HEIGHT).any(|row| self.cells[row][col] != Cell::Empty) {
                return Err(GameError::MalformedBoard { column: col });
            }
        }
        Ok(())
    }
}
