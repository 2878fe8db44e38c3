//! Headless board driver (default binary).
//!
//! Reads line commands on stdin and prints results on stdout; see
//! [`chuzzle_board::command`] for the command set. Logs go to stderr,
//! filtered by `CHUZZLE_LOG` (default `warn`). The board is dealt from
//! `CHUZZLE_SEED` (default 1) with [`BoardConfig::from_env`].

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use chuzzle_board::command::{execute, parse_command, Flow, HELP};
use chuzzle_board::engine::PuzzleEngine;
use chuzzle_board::types::BoardConfig;

const DEFAULT_SEED: u32 = 1;

fn main() -> Result<()> {
    init_logging();

    let config = BoardConfig::from_env();
    let seed = seed_from_env()?;
    let mut engine = PuzzleEngine::new(config, seed).context("invalid board configuration")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{}x{} board, seed {}", config.rows, config.columns, seed)?;
    write!(out, "{}", engine.grid())?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("read command")?;
        match parse_command(&line) {
            Ok(None) => continue,
            Ok(Some(command)) => {
                if execute(&mut engine, command, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(out, "error: {}", err)?;
                writeln!(out, "{}", HELP)?;
            }
        }
        out.flush()?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("CHUZZLE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn seed_from_env() -> Result<u32> {
    match std::env::var("CHUZZLE_SEED") {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("CHUZZLE_SEED must be a u32, got {:?}", value)),
        Err(_) => Ok(DEFAULT_SEED),
    }
}
