use squarefour::{Board, Cell, Coord, SquareWin, HEIGHT, WIDTH};

/// Text picture of the board, top row first. Cells of `win` are bracketed.
pub fn render(board: &Board, win: Option<&SquareWin>) -> String {
    let mut out: String = (1..=WIDTH).map(|n| format!(" {n} ")).collect();
    out = out.trim_end().to_string();
    out.push('\n');
    for row in (0..HEIGHT).rev() {
        let line: String = (0..WIDTH)
            .map(|col| {
                let symbol = disc_symbol(board.get(row, col));
                if win.is_some_and(|w| w.contains(Coord::new(row, col))) {
                    format!("[{symbol}]")
                } else {
                    format!(" {symbol} ")
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn disc_symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Human => 'X',
        Cell::Computer => 'O',
    }
}
