use crate::{FlagOutcome, GameConfig, GameError, GameSession, Position, Result, RevealOutcome};
use rand::Rng;
use std::ops::ControlFlow;
use std::thread;
use tracing::{debug, info, warn};

/// A pointer position in window pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPos {
    pub x: u32,
    pub y: u32,
}

impl PixelPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Primary button press: reveal.
    Primary(PixelPos),
    /// Secondary button press: toggle a flag.
    Secondary(PixelPos),
    NewGame,
}

/// Terminal messages shown over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Lost,
    Won,
}

impl Banner {
    pub fn text(self) -> &'static str {
        match self {
            Banner::Lost => "You lost! Try again...",
            Banner::Won => "You won!",
        }
    }
}

pub trait Renderer {
    fn draw(&mut self, session: &GameSession) -> Result<()>;
    fn show_message(&mut self, banner: Banner) -> Result<()>;
}

pub trait InputSource {
    /// Blocks until at least one event is available. An empty batch means the
    /// source is exhausted.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}

/// Maps window pixels onto board cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cell_size: f32,
}

impl Layout {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            cell_size: config.cell_size(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell under `pixel`, or `None` when it falls outside the board.
    pub fn to_position(&self, pixel: PixelPos) -> Option<Position> {
        let row = (pixel.y as f32 / self.cell_size).floor() as usize;
        let col = (pixel.x as f32 / self.cell_size).floor() as usize;
        let pos = Position::new(row, col);
        pos.is_within(self.rows, self.cols).then_some(pos)
    }

    pub fn cell_center(&self, pos: Position) -> PixelPos {
        let half = self.cell_size / 2.0;
        PixelPos::new(
            (pos.col as f32 * self.cell_size + half) as u32,
            (pos.row as f32 * self.cell_size + half) as u32,
        )
    }
}

/// Drives one game session from an input source to a renderer.
pub struct Controller<R, I, G> {
    config: GameConfig,
    layout: Layout,
    session: GameSession,
    renderer: R,
    input: I,
    rng: G,
}

impl<R: Renderer, I: InputSource, G: Rng> Controller<R, I, G> {
    /// Validates `config` and deals the first game before anything is drawn.
    pub fn new(config: GameConfig, renderer: R, input: I, mut rng: G) -> Result<Self> {
        let session = GameSession::new(&config, &mut rng)?;
        Ok(Self::with_session(config, session, renderer, input, rng))
    }

    /// Wraps an existing session. The board shape always comes from the
    /// session; `config` contributes only the window and timing values.
    pub fn with_session(
        config: GameConfig,
        session: GameSession,
        renderer: R,
        input: I,
        rng: G,
    ) -> Self {
        let (rows, cols) = session.dimensions();
        let config = GameConfig {
            rows,
            cols,
            mines: session.field().mines_count(),
            ..config
        };
        Self {
            layout: Layout::new(&config),
            config,
            session,
            renderer,
            input,
            rng,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn run(&mut self) -> Result<()> {
        self.renderer.draw(&self.session)?;
        loop {
            let events = self.input.poll_events()?;
            if events.is_empty() {
                info!("input exhausted");
                return Ok(());
            }
            for event in events {
                if self.handle_event(event)?.is_break() {
                    info!("quit requested");
                    return Ok(());
                }
            }
            self.renderer.draw(&self.session)?;
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Result<ControlFlow<()>> {
        match event {
            InputEvent::Quit => return Ok(ControlFlow::Break(())),
            InputEvent::NewGame => self.session.reset(&mut self.rng)?,
            InputEvent::Primary(pixel) => {
                if let Some(pos) = self.locate(pixel) {
                    self.reveal(pos)?;
                }
            }
            InputEvent::Secondary(pixel) => {
                if let Some(pos) = self.locate(pixel) {
                    self.toggle_flag(pos);
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn locate(&self, pixel: PixelPos) -> Option<Position> {
        let pos = self.layout.to_position(pixel);
        if pos.is_none() {
            debug!(?pixel, "click outside the board");
        }
        pos
    }

    fn reveal(&mut self, pos: Position) -> Result<()> {
        match self.session.reveal(pos) {
            Ok(RevealOutcome::HitMine) => {
                self.renderer.draw(&self.session)?;
                self.renderer.show_message(Banner::Lost)?;
                thread::sleep(self.config.loss_pause);
            }
            Ok(RevealOutcome::Won) => {
                self.renderer.draw(&self.session)?;
                self.renderer.show_message(Banner::Won)?;
            }
            Ok(RevealOutcome::Revealed | RevealOutcome::NoChange) => {}
            Err(GameError::GameOver) => warn!(?pos, "reveal ignored, game is over"),
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn toggle_flag(&mut self, pos: Position) {
        match self.session.toggle_flag(pos) {
            Ok(FlagOutcome::NoChange) => debug!(?pos, "cannot flag a revealed cell"),
            Ok(_) => {}
            Err(e) => warn!(?pos, "flag ignored: {e}"),
        }
    }
}
