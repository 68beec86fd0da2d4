//! todo-or-not CLI entry point

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use todo_or_not::{Repl, StoreFile};

/// Tiny interactive todo-list tracker
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Task list file (default: ~/todo-list/todolist.txt)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let file = StoreFile::new(args.file.unwrap_or_else(StoreFile::default_path));

    let store = file.load()?;
    log::info!("Loaded {} tasks from {}", store.len(), file.path().display());

    let stdin = io::stdin();
    let mut repl = Repl::new(store, file, stdin.lock(), io::stdout());
    repl.run()
}
