use crate::{GameError, MineField, Position, Result};
use ndarray::Array2;
use std::collections::{HashSet, VecDeque};
use std::ops::Index;
use tracing::debug;

/// Player-visible state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cover {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl Cover {
    /// Numeric encoding: `0` hidden, `1` revealed, `-2` flagged.
    pub fn value(self) -> i8 {
        match self {
            Cover::Hidden => 0,
            Cover::Revealed => 1,
            Cover::Flagged => -2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverState {
    cells: Array2<Cover>,
}

impl CoverState {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: Array2::default((rows, cols)),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn get(&self, pos: Position) -> Result<Cover> {
        self.cells
            .get((pos.row, pos.col))
            .copied()
            .ok_or(GameError::OutOfBounds(pos))
    }

    pub fn set(&mut self, pos: Position, cover: Cover) -> Result<()> {
        let cell = self
            .cells
            .get_mut((pos.row, pos.col))
            .ok_or(GameError::OutOfBounds(pos))?;
        *cell = cover;
        Ok(())
    }

    pub fn count(&self, cover: Cover) -> usize {
        self.cells.iter().filter(|&&c| c == cover).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Cover)> + '_ {
        self.cells
            .indexed_iter()
            .map(|(index, &cover)| (Position::from(index), cover))
    }

    fn reveal_unless_flagged(&mut self, pos: Position) {
        let cell = &mut self.cells[(pos.row, pos.col)];
        if *cell != Cover::Flagged {
            *cell = Cover::Revealed;
        }
    }
}

impl Index<Position> for CoverState {
    type Output = Cover;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[(pos.row, pos.col)]
    }
}

/// Breadth-first flood fill outward from `origin`.
///
/// Every unflagged neighbour reached is revealed; only unflagged zero-count
/// cells are expanded further. The origin itself is left to the caller.
/// Returns the number of cells whose cover changed.
pub fn reveal_from(origin: Position, cover: &mut CoverState, field: &MineField) -> Result<usize> {
    if !field.is_within_bounds(origin) {
        return Err(GameError::OutOfBounds(origin));
    }
    if cover.dimensions() != field.dimensions() {
        return Err(GameError::ShapeMismatch {
            field: field.dimensions(),
            cover: cover.dimensions(),
        });
    }

    let mut queue = VecDeque::from([origin]);
    let mut visited = HashSet::new();
    let mut changed = 0;

    while let Some(current) = queue.pop_front() {
        for neighbor in field.neighbors(current) {
            if !visited.insert(neighbor) {
                continue;
            }
            let flagged = cover[neighbor] == Cover::Flagged;
            if field[neighbor].is_zero() && !flagged {
                queue.push_back(neighbor);
            }
            if !flagged && cover[neighbor] != Cover::Revealed {
                changed += 1;
            }
            cover.reveal_unless_flagged(neighbor);
        }
    }

    debug!(?origin, visited = visited.len(), changed, "flood fill");
    Ok(changed)
}
