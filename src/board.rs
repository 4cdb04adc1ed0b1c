//! Fixed-size Gomoku board.
//!
//! Cells are addressed as `(x, y)` where `x` is the row and `y` the column.
//! The board is a plain value: the search clones it whenever it needs to
//! place stones, so a caller's board is never touched.

use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

pub type Point = (usize, usize);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Create an empty square board.
    pub fn new(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    pub fn with_dimensions(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board must have at least one cell");
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a board from text rows: `X` is black, `O` is white, anything
    /// else is empty. Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Self {
        let parsed: Vec<Vec<Option<Color>>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| match c {
                        'X' | 'x' => Some(Color::Black),
                        'O' | 'o' => Some(Color::White),
                        _ => None,
                    })
                    .collect()
            })
            .collect();
        let cols = parsed.iter().map(Vec::len).max().unwrap_or(0);
        let mut board = Self::with_dimensions(parsed.len(), cols);
        for (x, row) in parsed.into_iter().enumerate() {
            for (y, cell) in row.into_iter().enumerate() {
                if let Some(color) = cell {
                    board.set(x, y, color);
                }
            }
        }
        board
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells, which is also the longest possible game.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        x * self.cols + y
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.rows && y < self.cols
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn is_empty_at(&self, x: usize, y: usize) -> bool {
        self.contains(x, y) && self.cells[self.idx(x, y)].is_none()
    }

    /// Place a stone, overwriting whatever was there.
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        assert!(self.contains(x, y), "({x}, {y}) is off the board");
        let i = self.idx(x, y);
        self.cells[i] = Some(color);
    }

    pub fn empty_cells(&self) -> Vec<Point> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|c| **c == Some(color)).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Side to move, assuming Black opened and the players alternated.
    pub fn side_to_move(&self) -> Color {
        if self.count(Color::Black) > self.count(Color::White) {
            Color::White
        } else {
            Color::Black
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.rows {
            for y in 0..self.cols {
                let ch = match self.get(x, y) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(15);
        assert_eq!(board.rows(), 15);
        assert_eq!(board.cols(), 15);
        assert_eq!(board.count_empty(), 225);
        assert!(!board.is_full());
    }

    #[test]
    fn test_from_rows() {
        let board = Board::from_rows(&["X . O", ". X .", "O . ."]);
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 3);
        assert_eq!(board.get(0, 0), Some(Color::Black));
        assert_eq!(board.get(0, 2), Some(Color::White));
        assert_eq!(board.get(1, 1), Some(Color::Black));
        assert_eq!(board.get(2, 2), None);
        assert_eq!(board.count_empty(), 5);
    }

    #[test]
    fn test_out_of_bounds_get() {
        let board = Board::new(5);
        assert_eq!(board.get(5, 0), None);
        assert!(!board.is_empty_at(0, 5));
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board = Board::from_rows(&["X.", ".O"]);
        assert_eq!(board.empty_cells(), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn test_side_to_move() {
        let mut board = Board::new(5);
        assert_eq!(board.side_to_move(), Color::Black);
        board.set(2, 2, Color::Black);
        assert_eq!(board.side_to_move(), Color::White);
        board.set(2, 3, Color::White);
        assert_eq!(board.side_to_move(), Color::Black);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["X.", ".O"]);
        assert_eq!(board.to_string(), "X . \n. O \n");
    }
}
