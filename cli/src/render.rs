use std::fmt;

use minesweep_core::*;

use crate::command::row_label;

/// Text view of a board: column header, one labelled line per row, and the
/// mine tally. With `peek` a second grid beside the first shows every mine.
pub struct BoardView<'a, G> {
    board: &'a Board<G>,
    peek: bool,
}

impl<'a, G: MinefieldGenerator> BoardView<'a, G> {
    pub fn new(board: &'a Board<G>, peek: bool) -> Self {
        Self { board, peek }
    }

    fn grids(&self) -> usize {
        if self.peek { 2 } else { 1 }
    }

    fn header(&self, f: &mut fmt::Formatter<'_>, width: Coord) -> fmt::Result {
        if width >= 10 {
            for _ in 0..self.grids() {
                write!(f, "\t")?;
                for col in 0..width {
                    if col >= 10 {
                        write!(f, "{} ", col / 10)?;
                    } else {
                        write!(f, "  ")?;
                    }
                }
            }
            writeln!(f)?;
        }
        for _ in 0..self.grids() {
            write!(f, "\t")?;
            for col in 0..width {
                write!(f, "{} ", col % 10)?;
            }
        }
        writeln!(f)?;
        writeln!(f)
    }
}

pub fn view_symbol(view: CellView) -> char {
    match view {
        CellView::Hidden => '-',
        CellView::Revealed(contents) => contents_symbol(contents),
    }
}

pub fn contents_symbol(contents: CellContents) -> char {
    match contents {
        CellContents::Mine => 'M',
        CellContents::Clear(count) => char::from(b'0' + count),
    }
}

impl<G: MinefieldGenerator> fmt::Display for BoardView<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (height, width) = self.board.dimensions();
        self.header(f, width)?;

        for row in 0..height {
            write!(f, "{}:\t", row_label(row))?;
            for col in 0..width {
                let view = self.board.cell_view((row, col)).map_err(|_| fmt::Error)?;
                write!(f, "{} ", view_symbol(view))?;
            }
            if self.peek {
                write!(f, "\t")?;
                for col in 0..width {
                    let cell = self.board.cell_at((row, col)).map_err(|_| fmt::Error)?;
                    let symbol = if cell.is_mine() {
                        contents_symbol(cell.contents())
                    } else {
                        view_symbol(cell.view())
                    };
                    write!(f, "{symbol} ")?;
                }
            }
            writeln!(f)?;
        }

        writeln!(
            f,
            "\nYou've found {} mines, out of a total of {}.",
            self.board.mines_flagged(),
            self.board.mine_count()
        )
    }
}
