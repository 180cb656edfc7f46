use std::io::{self, Write};

use mineclear_core as game;

fn glyph(cell: game::CellView) -> char {
    use game::CellView::*;
    match cell {
        Hidden => '#',
        Flagged => 'F',
        Opened(0) => '.',
        Opened(count) => char::from(b'0' + count),
        Mine => '*',
        TriggeredMine => 'X',
        IncorrectFlag => '!',
    }
}

fn clock(elapsed: core::time::Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Draws the board with a status line, row labels on the left and the last
/// digit of each column index on top.
pub fn board(out: &mut impl Write, snapshot: &game::Snapshot) -> io::Result<()> {
    let (width, height) = snapshot.size;

    writeln!(
        out,
        "mines {:>4}  time {:>6}  {:?}",
        snapshot.mines_left,
        clock(snapshot.elapsed),
        snapshot.state
    )?;

    write!(out, "    ")?;
    for x in 0..width {
        write!(out, "{}", x % 10)?;
    }
    writeln!(out)?;

    for y in 0..height {
        write!(out, "{y:>3} ")?;
        for x in 0..width {
            write!(out, "{}", glyph(snapshot.cells[[x as usize, y as usize]]))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One-line description of what an open or chord did.
pub fn summary(result: &game::OpenResult) -> String {
    use game::Outcome::*;
    match result.outcome {
        NoChange => "nothing to open".to_owned(),
        Revealed => format!("opened {} cells", result.opened.len()),
        Won => format!("opened {} cells, board cleared", result.opened.len()),
        HitMine => {
            let hits: Vec<_> = result
                .mines_hit
                .iter()
                .map(|(x, y)| format!("({x}, {y})"))
                .collect();
            format!("hit a mine at {}", hits.join(", "))
        }
    }
}
