use crate::reveal::reveal_from;
use crate::{Cover, CoverState, GameConfig, GameError, MineField, Position, Result, Tile};
use rand::Rng;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub fn is_finished(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

/// One game: the hidden field, what the player sees, and the counters.
#[derive(Debug, Clone)]
pub struct GameSession {
    field: MineField,
    cover: CoverState,
    state: GameState,
    remaining_flags: isize,
    click_count: usize,
}

impl GameSession {
    pub fn new<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let field = MineField::generate(config.rows, config.cols, config.mines, rng)?;
        Ok(Self::with_field(field))
    }

    /// Starts a game on a prepared field.
    pub fn with_field(field: MineField) -> Self {
        let (rows, cols) = field.dimensions();
        info!(rows, cols, mines = field.mines_count(), "new game");
        Self {
            cover: CoverState::new(rows, cols),
            remaining_flags: field.mines_count() as isize,
            field,
            state: GameState::Playing,
            click_count: 0,
        }
    }

    /// Throws away the current game and deals a fresh field of the same shape.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        let (rows, cols) = self.field.dimensions();
        let field = MineField::generate(rows, cols, self.field.mines_count(), rng)?;
        *self = Self::with_field(field);
        Ok(())
    }

    pub fn reveal(&mut self, pos: Position) -> Result<RevealOutcome> {
        let tile = self.field.tile(pos)?;
        self.check_playing()?;

        match self.cover[pos] {
            Cover::Flagged | Cover::Revealed => return Ok(RevealOutcome::NoChange),
            Cover::Hidden => {}
        }

        self.cover.set(pos, Cover::Revealed)?;
        if tile.is_mine() {
            info!(?pos, clicks = self.click_count, "mine hit");
            self.state = GameState::Lost;
            return Ok(RevealOutcome::HitMine);
        }

        // The opening click always floods, whatever its own count.
        if self.click_count == 0 || tile == Tile::Clear(0) {
            reveal_from(pos, &mut self.cover, &self.field)?;
        }
        self.click_count += 1;

        if self.check_win_condition() {
            info!(clicks = self.click_count, "board cleared");
            return Ok(RevealOutcome::Won);
        }
        Ok(RevealOutcome::Revealed)
    }

    pub fn toggle_flag(&mut self, pos: Position) -> Result<FlagOutcome> {
        let current = self.cover.get(pos)?;
        self.check_playing()?;

        Ok(match current {
            Cover::Hidden => {
                self.cover.set(pos, Cover::Flagged)?;
                self.remaining_flags -= 1;
                FlagOutcome::Flagged
            }
            Cover::Flagged => {
                self.cover.set(pos, Cover::Hidden)?;
                self.remaining_flags += 1;
                FlagOutcome::Unflagged
            }
            Cover::Revealed => FlagOutcome::NoChange,
        })
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_finished() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }

    fn check_win_condition(&mut self) -> bool {
        let all_safe_revealed = self
            .field
            .iter()
            .filter(|(_, tile)| !tile.is_mine())
            .all(|(pos, _)| self.cover[pos] == Cover::Revealed);

        if all_safe_revealed {
            self.state = GameState::Won;
        }
        all_safe_revealed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn cover(&self) -> &CoverState {
        &self.cover
    }

    pub fn remaining_flags(&self) -> isize {
        self.remaining_flags
    }

    pub fn click_count(&self) -> usize {
        self.click_count
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.field.dimensions()
    }
}
