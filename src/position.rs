/// A `(row, col)` coordinate on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn is_within(&self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }

    /// In-bounds neighbours of this position on a `rows` x `cols` board.
    ///
    /// Orthogonal neighbours come first (up, down, left, right), then the
    /// diagonals (up-left, down-right, down-left, up-right).
    pub fn neighbors(&self, rows: usize, cols: usize) -> Vec<Position> {
        let Position { row, col } = *self;
        let up = row > 0;
        let down = row + 1 < rows;
        let left = col > 0;
        let right = col + 1 < cols;

        let mut neighbors = Vec::with_capacity(8);
        if up {
            neighbors.push(Position::new(row - 1, col));
        }
        if down {
            neighbors.push(Position::new(row + 1, col));
        }
        if left {
            neighbors.push(Position::new(row, col - 1));
        }
        if right {
            neighbors.push(Position::new(row, col + 1));
        }

        if up && left {
            neighbors.push(Position::new(row - 1, col - 1));
        }
        if down && right {
            neighbors.push(Position::new(row + 1, col + 1));
        }
        if down && left {
            neighbors.push(Position::new(row + 1, col - 1));
        }
        if up && right {
            neighbors.push(Position::new(row - 1, col + 1));
        }
        neighbors
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

pub fn neighbors(row: usize, col: usize, rows: usize, cols: usize) -> Vec<Position> {
    Position::new(row, col).neighbors(rows, cols)
}
