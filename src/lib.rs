pub mod board;
pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod position;
pub mod reveal;
pub mod terminal;

pub use board::{MineField, Tile};
pub use config::GameConfig;
pub use controller::{Banner, Controller, InputEvent, InputSource, Layout, PixelPos, Renderer};
pub use error::{GameError, Result};
pub use game::{FlagOutcome, GameSession, GameState, RevealOutcome};
pub use position::{neighbors, Position};
pub use reveal::{reveal_from, Cover, CoverState};
