//! Scripted stand-in engine for exercising the bridge without a real one.
//!
//! Answers `genmove` with successive lines from a moves file, `? out of
//! data` once the file is exhausted, and a bare `=` acknowledgement to
//! every other command. Exits on `quit` or end of input.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "test-engine", about = "Scripted HTP engine for testing")]
struct Args {
    /// File of engine-notation moves, one per line
    moves: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut moves = BufReader::new(
        File::open(&args.moves)
            .with_context(|| format!("opening moves file {}", args.moves.display()))?,
    )
    .lines();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let command = line?;
        let command = command.trim();

        if command == "quit" {
            writeln!(out, "=")?;
            out.flush()?;
            break;
        }

        if command.starts_with("genmove") {
            match moves.next() {
                Some(mv) => writeln!(out, "= {}", mv?.trim())?,
                None => writeln!(out, "? out of data")?,
            }
        } else {
            writeln!(out, "=")?;
        }
        out.flush()?;
    }

    Ok(())
}
