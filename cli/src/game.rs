use std::fmt;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use squarefour::{Board, Outcome, Player, SquareWin, Searcher, WIDTH};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::render::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Winner {
    Human(String),
    Ai,
    Draw,
    Abandoned,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Human(name) => f.write_str(name),
            Winner::Ai => f.write_str("AI"),
            Winner::Draw => f.write_str("Draw"),
            Winner::Abandoned => f.write_str("None (game abandoned)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub winner: Winner,
    pub moves: usize,
    pub elapsed: Duration,
    /// Move record, replayable with `square-four analyze --position`.
    pub record: String,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Game Summary ---")?;
        writeln!(f, "Winner: {}", self.winner)?;
        writeln!(f, "Total Moves: {}", self.moves)?;
        writeln!(f, "Time Elapsed: {:.2} seconds", self.elapsed.as_secs_f64())?;
        write!(f, "Record: {}", self.record)
    }
}

/// One game between a human on `input`/`output` and the search engine.
pub struct Game<R, W> {
    config: GameConfig,
    input: R,
    output: W,
    board: Board,
    searcher: Searcher,
    rng: Option<StdRng>,
    record: String,
}

impl<R: BufRead, W: Write> Game<R, W> {
    pub fn new(config: GameConfig, input: R, output: W) -> Self {
        let searcher = Searcher::new(Player::Computer).with_weights(config.weights);
        let rng = config.seed.map(StdRng::seed_from_u64);
        Game {
            config,
            input,
            output,
            board: Board::new(),
            searcher,
            rng,
            record: String::new(),
        }
    }

    pub fn run(mut self) -> Result<Summary> {
        let start = Instant::now();
        let mut turn = Player::from(self.config.first);
        let mut moves = 0;
        info!(
            player = %self.config.player_name,
            depth = self.config.depth,
            first = ?turn,
            "game started"
        );
        self.draw(None)?;

        let winner = loop {
            let column = match turn {
                Player::Human => match self.read_human_move()? {
                    Some(column) => column,
                    None => break Winner::Abandoned,
                },
                Player::Computer => self.computer_move()?,
            };
            let row = self.board.apply_move(column, turn)?;
            moves += 1;
            self.record.push(turn.symbol());
            self.record.push_str(&column.to_string());
            debug!(?turn, column, row, "move applied");

            match self.board.outcome() {
                Outcome::Win(win) => {
                    self.draw(Some(&win))?;
                    break match win.player {
                        Player::Human => Winner::Human(self.config.player_name.clone()),
                        Player::Computer => Winner::Ai,
                    };
                }
                Outcome::Draw => {
                    self.draw(None)?;
                    break Winner::Draw;
                }
                Outcome::Ongoing => self.draw(None)?,
            }
            turn = turn.opponent();
        };

        match &winner {
            Winner::Human(name) => writeln!(self.output, "{name} wins!")?,
            Winner::Ai => writeln!(self.output, "AI wins!")?,
            Winner::Draw => writeln!(self.output, "It's a draw!")?,
            Winner::Abandoned => {}
        }
        let summary = Summary {
            winner,
            moves,
            elapsed: start.elapsed(),
            record: self.record,
        };
        writeln!(self.output, "{summary}")?;
        self.output.flush()?;
        info!(winner = %summary.winner, moves, "game finished");
        Ok(summary)
    }

    /// Prompts until the human names a playable column. `None` on quit or
    /// end of input.
    fn read_human_move(&mut self) -> Result<Option<usize>> {
        loop {
            write!(
                self.output,
                "{}, choose a column (1-{WIDTH}, q to quit): ",
                self.config.player_name
            )?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read move")?;
            if read == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }
            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match parse_column(answer) {
                Some(column) if self.board.is_legal(column) => return Ok(Some(column)),
                Some(column) => {
                    writeln!(self.output, "Column {} is full or does not exist.", column + 1)?
                }
                None => writeln!(self.output, "Please enter a column number.")?,
            }
        }
    }

    fn computer_move(&mut self) -> Result<usize> {
        writeln!(self.output, "AI is thinking...")?;
        self.output.flush()?;
        if self.config.think_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.think_delay_ms));
        }
        let depth = self.config.depth;
        let report = match self.rng.as_mut() {
            Some(rng) => self.searcher.best_column_with_rng(&self.board, depth, rng)?,
            None => self.searcher.best_column(&self.board, depth)?,
        };
        debug!(
            column = report.column,
            score = report.score,
            nodes = report.nodes,
            "computer move"
        );
        writeln!(self.output, "AI drops a disc in column {}", report.column + 1)?;
        Ok(report.column)
    }

    fn draw(&mut self, win: Option<&SquareWin>) -> Result<()> {
        writeln!(self.output, "\n{}", render(&self.board, win))?;
        Ok(())
    }
}

/// Parses a 1-based column number typed by the player.
fn parse_column(answer: &str) -> Option<usize> {
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 => Some(n - 1),
        _ => None,
    }
}
