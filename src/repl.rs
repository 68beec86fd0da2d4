//! Interactive command loop
//!
//! Single mode, one command per line: a verb token, optionally followed by
//! an argument after the first space. The list is re-rendered before every
//! prompt, and the file is rewritten after every successful mutation.

use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::persist::StoreFile;
use crate::store::{StoreError, TaskStore};
use crate::validate::is_numeric_id;

const HELP_TEXT: &str = "\t -- COMMANDS --
a <name>          add a task
m <id> <newName>  rename a task
r <id>            remove a task (remaining ids are renumbered)
c <id>            mark a task complete
e <id>            mark a task incomplete
h                 show this help
q                 quit";

/// A parsed user command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Add { name: String },
    Rename { id: u32, new_name: String },
    Delete { id: u32 },
    Complete { id: u32 },
    Uncomplete { id: u32 },
}

/// Errors from command parsing, before any store operation runs
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid command or missing argument, press \"h\" for the list of commands")]
    MissingArgument,
    #[error("unknown command {0:?}, press \"h\" for the list of commands")]
    UnknownCommand(String),
    #[error("the id must be a positive number")]
    InvalidId,
    #[error("you must provide an id and the new task name")]
    MissingRenameArgument,
}

/// Split a line into verb and argument and map it to a [`Command`].
///
/// A line without a space is a zero-argument command; only `h` and `q`
/// exist in that form.
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let Some((verb, arg)) = line.split_once(' ') else {
        return match line {
            "h" => Ok(Command::Help),
            "q" => Ok(Command::Quit),
            _ => Err(ParseError::MissingArgument),
        };
    };

    match verb {
        "a" => Ok(Command::Add {
            name: arg.to_string(),
        }),
        "m" => {
            let (id_token, new_name) = arg
                .split_once(' ')
                .ok_or(ParseError::MissingRenameArgument)?;
            Ok(Command::Rename {
                id: parse_id(id_token)?,
                new_name: new_name.to_string(),
            })
        }
        "r" => Ok(Command::Delete { id: parse_id(arg)? }),
        "c" => Ok(Command::Complete { id: parse_id(arg)? }),
        "e" => Ok(Command::Uncomplete { id: parse_id(arg)? }),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_id(token: &str) -> Result<u32, ParseError> {
    if !is_numeric_id(token) {
        return Err(ParseError::InvalidId);
    }
    token.parse().map_err(|_| ParseError::InvalidId)
}

/// The read-eval-print loop over a store and its backing file
pub struct Repl<R, W> {
    store: TaskStore,
    file: StoreFile,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(store: TaskStore, file: StoreFile, input: R, output: W) -> Self {
        Self {
            store,
            file,
            input,
            output,
        }
    }

    /// Run until `q` or end of input.
    ///
    /// Command errors are printed and the loop continues; only storage
    /// faults (directory creation, write failure) abort the run.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.render()?;
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // EOF: exit as cleanly as an explicit quit
                writeln!(self.output)?;
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }

            match parse_command(line) {
                Err(e) => writeln!(self.output, "error: {e}")?,
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(self.output, "{HELP_TEXT}")?,
                Ok(cmd) => match self.apply(cmd) {
                    Ok(message) => {
                        self.file.save(&self.store)?;
                        writeln!(self.output, "{message}")?;
                    }
                    Err(e) => writeln!(self.output, "error: {e}")?,
                },
            }
        }
        Ok(())
    }

    /// Dispatch one mutating command, returning its feedback line
    fn apply(&mut self, cmd: Command) -> Result<String, StoreError> {
        match cmd {
            Command::Add { name } => {
                let task = self.store.add(&name)?;
                Ok(format!("Added task: {}", task.name))
            }
            Command::Rename { id, new_name } => {
                self.store.rename(id, &new_name)?;
                Ok(format!("Renamed task {id} to: {new_name}"))
            }
            Command::Delete { id } => {
                let removed = self.store.delete(id)?;
                Ok(format!("Removed task {id}: {}", removed.name))
            }
            Command::Complete { id } => {
                self.store.complete(id)?;
                Ok(format!("Task {id} marked complete"))
            }
            Command::Uncomplete { id } => {
                self.store.uncomplete(id)?;
                Ok(format!("Task {id} marked incomplete"))
            }
            // Handled directly in run()
            Command::Help | Command::Quit => unreachable!("non-mutating command"),
        }
    }

    /// Print the current list, `id [x] name` per task
    fn render(&mut self) -> Result<()> {
        writeln!(self.output)?;
        if self.store.is_empty() {
            writeln!(self.output, "Nothing to do!")?;
        } else {
            for task in self.store.tasks() {
                writeln!(
                    self.output,
                    "{} [{}] {}",
                    task.id,
                    if task.status.is_complete() { 'x' } else { ' ' },
                    task.name
                )?;
            }
        }
        Ok(())
    }
}
