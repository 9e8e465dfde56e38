use crate::config::check_dimensions;
use crate::{GameError, Position, Result};
use itertools::iproduct;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::Index;
use tracing::debug;

/// Contents of one minefield cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Mine,
    /// Number of mines among the adjacent cells.
    Clear(u8),
}

impl Tile {
    /// Numeric encoding: `-1` for a mine, otherwise the adjacent count.
    pub fn value(self) -> i8 {
        match self {
            Tile::Mine => -1,
            Tile::Clear(n) => n as i8,
        }
    }

    pub fn is_mine(self) -> bool {
        matches!(self, Tile::Mine)
    }

    pub fn is_zero(self) -> bool {
        matches!(self, Tile::Clear(0))
    }
}

/// The hidden mine layout of one game. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MineField {
    tiles: Array2<Tile>,
    mines_count: usize,
}

impl MineField {
    /// Places `mines_count` mines uniformly at random.
    ///
    /// Uses a partial shuffle over every coordinate, so placement always
    /// terminates; a board with no safe cell is rejected up front.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        mines_count: usize,
        rng: &mut R,
    ) -> Result<Self> {
        check_dimensions(rows, cols, mines_count)?;

        let mut positions: Vec<Position> = iproduct!(0..rows, 0..cols)
            .map(Position::from)
            .collect();
        let (mines, _) = positions.partial_shuffle(rng, mines_count);

        let field = Self::with_mines(rows, cols, mines);
        debug!(rows, cols, mines = field.mines_count, "generated minefield");
        Ok(field)
    }

    /// Builds a field from an explicit list of mine positions.
    pub fn from_mines(rows: usize, cols: usize, mines: &[Position]) -> Result<Self> {
        check_dimensions(rows, cols, 0)?;
        if let Some(&pos) = mines.iter().find(|pos| !pos.is_within(rows, cols)) {
            return Err(GameError::OutOfBounds(pos));
        }
        let mines = dedup(mines);
        check_dimensions(rows, cols, mines.len())?;
        Ok(Self::with_mines(rows, cols, &mines))
    }

    /// `mines` must be in bounds and free of duplicates.
    fn with_mines(rows: usize, cols: usize, mines: &[Position]) -> Self {
        let mut tiles = Array2::from_elem((rows, cols), Tile::Clear(0));
        for pos in mines {
            tiles[(pos.row, pos.col)] = Tile::Mine;
        }
        for pos in mines {
            for neighbor in pos.neighbors(rows, cols) {
                if let Tile::Clear(n) = &mut tiles[(neighbor.row, neighbor.col)] {
                    *n += 1;
                }
            }
        }

        Self {
            tiles,
            mines_count: mines.len(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    pub fn mines_count(&self) -> usize {
        self.mines_count
    }

    pub fn total_cells(&self) -> usize {
        self.tiles.len()
    }

    pub fn safe_cell_count(&self) -> usize {
        self.total_cells() - self.mines_count
    }

    pub fn is_within_bounds(&self, pos: Position) -> bool {
        let (rows, cols) = self.dimensions();
        pos.is_within(rows, cols)
    }

    pub fn tile(&self, pos: Position) -> Result<Tile> {
        self.tiles
            .get((pos.row, pos.col))
            .copied()
            .ok_or(GameError::OutOfBounds(pos))
    }

    pub fn is_mine(&self, pos: Position) -> bool {
        matches!(self.tile(pos), Ok(Tile::Mine))
    }

    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        let (rows, cols) = self.dimensions();
        pos.neighbors(rows, cols)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|(index, &tile)| (Position::from(index), tile))
    }
}

impl Index<Position> for MineField {
    type Output = Tile;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.tiles[(pos.row, pos.col)]
    }
}

fn dedup(mines: &[Position]) -> Vec<Position> {
    let mut unique = mines.to_vec();
    unique.sort_unstable();
    unique.dedup();
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_places_exact_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = MineField::generate(15, 15, 30, &mut rng).unwrap();
        assert_eq!(field.dimensions(), (15, 15));
        assert_eq!(field.mines_count(), 30);
        assert_eq!(field.iter().filter(|(_, tile)| tile.is_mine()).count(), 30);
        assert_eq!(field.safe_cell_count(), 195);
    }

    #[test]
    fn test_generate_is_reproducible() {
        let a = MineField::generate(8, 8, 10, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = MineField::generate(8, 8, 10, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_rejects_full_board() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            MineField::generate(3, 3, 9, &mut rng),
            Err(GameError::InvalidConfiguration { mines: 9, .. })
        ));
        assert!(MineField::generate(3, 3, 8, &mut rng).is_ok());
    }

    #[test]
    fn test_no_mines() {
        let field = MineField::generate(3, 3, 0, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(field.iter().all(|(_, tile)| tile == Tile::Clear(0)));
    }

    #[test]
    fn test_counts_around_corner_mine() {
        let field = MineField::from_mines(3, 3, &[Position::new(0, 0)]).unwrap();
        assert_eq!(field[Position::new(0, 0)], Tile::Mine);
        assert_eq!(field[Position::new(0, 1)], Tile::Clear(1));
        assert_eq!(field[Position::new(1, 0)], Tile::Clear(1));
        assert_eq!(field[Position::new(1, 1)], Tile::Clear(1));
        assert_eq!(field[Position::new(2, 2)], Tile::Clear(0));
        assert_eq!(field[Position::new(0, 0)].value(), -1);
    }

    #[test]
    fn test_mines_do_not_count_each_other() {
        let mines = [Position::new(0, 0), Position::new(0, 1)];
        let field = MineField::from_mines(2, 2, &mines).unwrap();
        assert_eq!(field[Position::new(0, 0)], Tile::Mine);
        assert_eq!(field[Position::new(0, 1)], Tile::Mine);
        assert_eq!(field[Position::new(1, 0)], Tile::Clear(2));
        assert_eq!(field[Position::new(1, 1)], Tile::Clear(2));
    }

    #[test]
    fn test_from_mines_merges_duplicates() {
        let mines = [Position::new(1, 1), Position::new(1, 1)];
        let field = MineField::from_mines(3, 3, &mines).unwrap();
        assert_eq!(field.mines_count(), 1);
        assert_eq!(field[Position::new(0, 0)], Tile::Clear(1));
    }

    #[test]
    fn test_from_mines_rejects_full_board() {
        assert!(matches!(
            MineField::from_mines(1, 1, &[Position::new(0, 0)]),
            Err(GameError::InvalidConfiguration {
                rows: 1,
                cols: 1,
                mines: 1
            })
        ));

        let all: Vec<Position> = iproduct!(0..2, 0..2).map(Position::from).collect();
        assert!(MineField::from_mines(2, 2, &all).is_err());
        // Duplicates collapse before the check.
        let repeated = [Position::new(0, 0), Position::new(0, 0), Position::new(1, 1)];
        assert_eq!(MineField::from_mines(2, 2, &repeated).unwrap().mines_count(), 2);
    }

    #[test]
    fn test_from_mines_rejects_out_of_bounds() {
        assert!(matches!(
            MineField::from_mines(3, 3, &[Position::new(3, 0)]),
            Err(GameError::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_tile_out_of_bounds() {
        let field = MineField::from_mines(2, 2, &[]).unwrap();
        assert!(field.tile(Position::new(1, 1)).is_ok());
        assert!(matches!(
            field.tile(Position::new(2, 0)),
            Err(GameError::OutOfBounds(_))
        ));
    }
}
