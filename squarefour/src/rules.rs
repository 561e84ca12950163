use serde::{Deserialize, Serialize};

use crate::{Board, Coord, Player, HEIGHT, WIDTH};

/// A completed 2x2 block. `anchor` is its lowest, leftmost cell.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SquareWin {
    pub player: Player,
    pub anchor: Coord,
}

impl SquareWin {
    pub fn cells(&self) -> [Coord; 4] {
        let Coord { row, col } = self.anchor;
        [
            Coord::new(row, col),
            Coord::new(row, col + 1),
            Coord::new(row + 1, col),
            Coord::new(row + 1, col + 1),
        ]
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells().contains(&coord)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Win(SquareWin),
    Draw,
    Ongoing,
}

impl Board {
    /// Anchor of the first block owned by `player`, scanning rows bottom-up
    /// and columns left to right.
    pub fn square_win(&self, player: Player) -> Option<Coord> {
        let cell = player.cell();
        for row in 0..HEIGHT - 1 {
            for col in 0..WIDTH - 1 {
                if self.get(row, col) == cell
                    && self.get(row, col + 1) == cell
                    && self.get(row + 1, col) == cell
                    && self.get(row + 1, col + 1) == cell
                {
                    return Some(Coord::new(row, col));
                }
            }
        }
        None
    }

    pub fn has_square_win(&self, player: Player) -> bool {
        self.square_win(player).is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.has_square_win(Player::Human)
            || self.has_square_win(Player::Computer)
            || self.is_full()
    }

    pub fn is_draw(&self) -> bool {
        self.is_full()
            && !self.has_square_win(Player::Human)
            && !self.has_square_win(Player::Computer)
    }

    /// Derives the game result from the grid. If both players own a block
    /// (only possible on a hand-built board) the computer's is reported.
    pub fn outcome(&self) -> Outcome {
        for player in [Player::Computer, Player::Human] {
            if let Some(anchor) = self.square_win(player) {
                return Outcome::Win(SquareWin { player, anchor });
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }
}
