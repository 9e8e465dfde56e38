use crate::{GameError, Result};
use std::time::Duration;

pub const ROWS: usize = 15;
pub const COLS: usize = 15;
pub const MINES: usize = 30;
pub const WIDTH_PX: u32 = 700;
pub const HEIGHT_PX: u32 = 800;
pub const LOSS_PAUSE: Duration = Duration::from_secs(5);

/// Board and window constants for one game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
    pub width_px: u32,
    pub height_px: u32,
    pub loss_pause: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            mines: MINES,
            width_px: WIDTH_PX,
            height_px: HEIGHT_PX,
            loss_pause: LOSS_PAUSE,
        }
    }
}

impl GameConfig {
    pub fn new(rows: usize, cols: usize, mines: usize) -> Self {
        Self {
            rows,
            cols,
            mines,
            ..Self::default()
        }
    }

    pub fn total_cells(&self) -> usize {
        self.rows * self.cols
    }

    /// Rejects empty boards and boards without at least one safe cell.
    pub fn validate(&self) -> Result<()> {
        check_dimensions(self.rows, self.cols, self.mines)
    }

    /// Side length of one square cell in pixels.
    pub fn cell_size(&self) -> f32 {
        self.width_px as f32 / self.cols.max(1) as f32
    }
}

pub(crate) fn check_dimensions(rows: usize, cols: usize, mines: usize) -> Result<()> {
    if rows == 0 || cols == 0 || mines >= rows.saturating_mul(cols) {
        return Err(GameError::InvalidConfiguration { rows, cols, mines });
    }
    Ok(())
}
