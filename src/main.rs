use minesweeper::terminal::{LineInput, TerminalRenderer};
use minesweeper::{Controller, GameConfig, GameError, Layout};
use std::io;
use std::process::ExitCode;
use tracing::info;

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    match run_game() {
        Ok(()) => {
            println!("Thanks for playing!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Game error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_game() -> Result<(), GameError> {
    let config = GameConfig::default();
    let layout = Layout::new(&config);
    let renderer = TerminalRenderer::new(io::stdout().lock());
    let input = LineInput::new(io::stdin().lock(), layout);

    let mut controller = Controller::new(config, renderer, input, rand::thread_rng())?;
    info!(
        rows = config.rows,
        cols = config.cols,
        mines = config.mines,
        "starting minesweeper"
    );
    controller.run()
}
