//! Bridge runner (default binary).
//!
//! Spawns the engine subprocess, wires its pipes into the protocol
//! controller, and runs the game loop against a terminal-backed service:
//! opponent moves are typed in service notation, engine moves are printed
//! back. The engine command runs through the shell with all the
//! privileges that implies - do not point it at anything you would not
//! run by hand.

use std::process::Stdio;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::process::Command;
use tokio::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use hecks_bridge::client::{GameLoop, GameService, ServiceError, DEFAULT_WAIT_TIMEOUT};
use hecks_bridge::htp::HtpController;
use hecks_bridge::types::{BoardIndex, Color, ServiceMove, GRID_SIZE};

#[derive(Debug, Parser)]
#[command(name = "hecks-bridge", about = "Bridge an HTP engine to a game service")]
struct Args {
    /// Shell command that starts the engine (quote the whole thing)
    engine: String,

    /// Color the engine plays: R or B
    #[arg(long, default_value = "R", value_parser = parse_color)]
    color: Color,

    /// Seconds to wait for the opponent before giving up
    #[arg(long)]
    wait_timeout: Option<u64>,
}

fn parse_color(s: &str) -> Result<Color, String> {
    Color::from_str(s).ok_or_else(|| format!("invalid color {s:?} (use R or B)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let wait_timeout = args
        .wait_timeout
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_WAIT_TIMEOUT);

    info!(command = args.engine.as_str(), "starting engine");
    let mut engine = Command::new("sh")
        .arg("-c")
        .arg(&args.engine)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .context("failed to start the engine command")?;

    let engine_in = engine.stdin.take().context("engine stdin unavailable")?;
    let engine_out = engine.stdout.take().context("engine stdout unavailable")?;
    let controller = HtpController::new(engine_out, engine_in);

    let service = ConsoleService::new(args.color);
    let result = GameLoop::new(controller, service, args.color, wait_timeout)
        .run()
        .await;

    // The controller (and with it the engine's stdin) is gone by now, so a
    // well-behaved engine exits on its own.
    match tokio::time::timeout(Duration::from_secs(5), engine.wait()).await {
        Ok(status) => {
            let status = status.context("waiting for the engine")?;
            debug!(?status, "engine exited");
        }
        Err(_) => {
            warn!("engine did not exit, killing it");
            engine.kill().await.context("killing the engine")?;
        }
    }

    result.context("bridged game failed")
}

/// Terminal-backed stand-in for the real game service.
///
/// Opponent moves are read from the terminal as `row,col` grid indices or
/// the sentinels `pass` / `resign`; a lone `-` means "no move yet, the
/// engine opens". Engine moves are printed in the same notation. Closing
/// stdin ends the game.
struct ConsoleService {
    lines: Lines<BufReader<Stdin>>,
    color: Color,
}

impl ConsoleService {
    fn new(color: Color) -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
            color,
        }
    }
}

fn parse_console_move(line: &str) -> Option<Option<ServiceMove>> {
    match line {
        "-" => return Some(None),
        "pass" => return Some(Some(ServiceMove::Pass)),
        "resign" => return Some(Some(ServiceMove::Resign)),
        _ => {}
    }

    let (row, col) = line.split_once(',')?;
    let row: u8 = row.trim().parse().ok()?;
    let col: u8 = col.trim().parse().ok()?;
    if row >= GRID_SIZE || col >= GRID_SIZE {
        return None;
    }
    Some(Some(ServiceMove::Cell(BoardIndex { row, col })))
}

#[async_trait]
impl GameService for ConsoleService {
    fn our_color(&self) -> Option<Color> {
        Some(self.color)
    }

    async fn wait_for_move(
        &mut self,
        color: Color,
        timeout: Duration,
    ) -> Result<Option<ServiceMove>, ServiceError> {
        loop {
            println!(
                "[{}] opponent move (row,col | pass | resign | - for none; close input to end):",
                color.as_str()
            );

            let line = match tokio::time::timeout(timeout, self.lines.next_line()).await {
                Err(_) => return Err(ServiceError::Timeout),
                Ok(Err(err)) => return Err(ServiceError::Transport(err.to_string())),
                Ok(Ok(None)) => return Err(ServiceError::GameOver),
                Ok(Ok(Some(line))) => line,
            };

            match parse_console_move(line.trim()) {
                Some(mv) => return Ok(mv),
                None => println!("unrecognized move {:?}", line.trim()),
            }
        }
    }

    async fn play_move(&mut self, mv: &ServiceMove, color: Color) -> Result<bool, ServiceError> {
        println!("[{}] engine plays {mv}", color.as_str());
        Ok(true)
    }
}
