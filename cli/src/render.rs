use std::fmt::Write as _;
use std::io::{self, Write};

use sweeper_core::{BoardEngine, CellView, ElapsedClock, GameSession, GameStatus};

fn symbol(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => 'F',
        CellView::Open(0) => ' ',
        CellView::Open(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
    }
}

/// Text grid with row and column indices along the edges.
pub fn board_text(engine: &BoardEngine) -> String {
    let (_, cols) = engine.size();
    let mut text = String::from("    ");
    for col in 0..cols {
        let _ = write!(text, "{col:>3}");
    }

    let mut current_row = None;
    for ((row, _), view) in engine.cells() {
        if current_row != Some(row) {
            current_row = Some(row);
            let _ = write!(text, "\n{row:>3} ");
        }
        let _ = write!(text, "{:>3}", symbol(view));
    }
    text.push('\n');
    text
}

pub fn status_line(session: &GameSession<ElapsedClock>) -> String {
    let engine = session.engine();
    let secs = session.observer().elapsed_secs();
    match engine.status() {
        GameStatus::InProgress => {
            format!("Mines left: {}  Time: {secs}s", engine.mines_left())
        }
        GameStatus::Won => format!("You cleared the board in {secs}s! (n: new game, q: quit)"),
        GameStatus::Lost => format!("Boom! Game over after {secs}s. (n: new game, q: quit)"),
    }
}

pub fn draw(out: &mut impl Write, session: &GameSession<ElapsedClock>) -> io::Result<()> {
    write!(out, "{}", board_text(session.engine()))?;
    writeln!(out, "{}", status_line(session))?;
    write!(out, "> ")?;
    out.flush()
}
