//! Text frontend: draws the board as characters and reads typed commands.

use crate::controller::{Banner, InputEvent, InputSource, Layout, PixelPos, Renderer};
use crate::{Cover, GameSession, Position, Result, Tile};
use std::io::{BufRead, Write};
use tracing::warn;

const RESET: &str = "\x1b[0m";

/// ANSI colour for an adjacency count.
pub fn count_color(count: u8) -> &'static str {
    match count {
        1 => "\x1b[30m",
        2 => "\x1b[32m",
        3 => "\x1b[31m",
        4 => "\x1b[38;5;208m",
        5 => "\x1b[33m",
        6 => "\x1b[35m",
        7 => "\x1b[34m",
        8 => "\x1b[95m",
        _ => RESET,
    }
}

pub struct TerminalRenderer<W> {
    out: W,
    color: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: true }
    }

    pub fn without_color(out: W) -> Self {
        Self { out, color: false }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn cell(&self, cover: Cover, tile: Tile) -> String {
        match (cover, tile) {
            (Cover::Flagged, _) => "⚑".to_string(),
            (Cover::Hidden, _) => "□".to_string(),
            (Cover::Revealed, Tile::Mine) => "*".to_string(),
            (Cover::Revealed, Tile::Clear(0)) => " ".to_string(),
            (Cover::Revealed, Tile::Clear(n)) if self.color => {
                format!("{}{}{}", count_color(n), n, RESET)
            }
            (Cover::Revealed, Tile::Clear(n)) => n.to_string(),
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, session: &GameSession) -> Result<()> {
        let (rows, cols) = session.dimensions();

        write!(self.out, "   ")?;
        for col in 0..cols {
            write!(self.out, "{:>2}", col)?;
        }
        writeln!(self.out)?;

        for row in 0..rows {
            write!(self.out, "{:>2} ", row)?;
            for col in 0..cols {
                let pos = Position::new(row, col);
                let cell = self.cell(session.cover()[pos], session.field()[pos]);
                write!(self.out, " {}", cell)?;
            }
            writeln!(self.out)?;
        }

        writeln!(
            self.out,
            "flags left: {}  clicks: {}",
            session.remaining_flags(),
            session.click_count()
        )?;
        if session.is_running() {
            writeln!(
                self.out,
                "commands: r <row> <col> | f <row> <col> | c <x> <y> | m <x> <y> | n | q"
            )?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_message(&mut self, banner: Banner) -> Result<()> {
        writeln!(self.out, "{}", banner.text())?;
        self.out.flush()?;
        Ok(())
    }
}

/// Reads one command per line.
///
/// `r`/`f` take board coordinates and are turned into presses at the cell
/// centre; `c`/`m` take raw pixel coordinates for the primary and secondary
/// buttons.
pub struct LineInput<B> {
    reader: B,
    layout: Layout,
}

impl<B: BufRead> LineInput<B> {
    pub fn new(reader: B, layout: Layout) -> Self {
        Self { reader, layout }
    }

    pub fn parse(&self, line: &str) -> Option<InputEvent> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        let mut next_number = || parts.next()?.parse::<u32>().ok();

        let event = match command {
            "q" | "quit" => InputEvent::Quit,
            "n" | "new" => InputEvent::NewGame,
            "r" | "f" => {
                let row = next_number()? as usize;
                let col = next_number()? as usize;
                let pixel = self.layout.cell_center(Position::new(row, col));
                if command == "r" {
                    InputEvent::Primary(pixel)
                } else {
                    InputEvent::Secondary(pixel)
                }
            }
            "c" => InputEvent::Primary(PixelPos::new(next_number()?, next_number()?)),
            "m" => InputEvent::Secondary(PixelPos::new(next_number()?, next_number()?)),
            _ => return None,
        };
        Some(event)
    }
}

impl<B: BufRead> InputSource for LineInput<B> {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(vec![InputEvent::Quit]);
            }
            if line.trim().is_empty() {
                continue;
            }
            match self.parse(&line) {
                Some(event) => return Ok(vec![event]),
                None => warn!(line = line.trim(), "unrecognised command"),
            }
        }
    }
}
