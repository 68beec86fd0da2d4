//! Flat-file persistence for the task store
//!
//! One task per line, UTF-8, `id;status;name`. The name is the remainder of
//! the line, so the split happens at most twice. The whole file is rewritten
//! after every successful mutation; it is read once at startup.

use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{Task, TaskStatus, TaskStore};
use crate::validate::DELIMITER;

const DATA_DIR: &str = "todo-list";
const DATA_FILE: &str = "todolist.txt";

/// Handle to the on-disk task list
#[derive(Debug, Clone)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    /// `~/todo-list/todolist.txt`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR)
            .join(DATA_FILE)
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file into a fresh store.
    ///
    /// An absent file yields an empty store. Lines with an empty id or
    /// status field are ignored; lines whose numeric fields fail to parse
    /// are skipped with a warning instead of aborting the run.
    pub fn load(&self) -> Result<TaskStore> {
        if !self.path.exists() {
            return Ok(TaskStore::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        let mut tasks = Vec::new();
        for (lineno, line) in content.lines().enumerate() {
            if line.is_empty() {
                continue;
            }
            match parse_line(line) {
                Ok(Some(task)) => tasks.push(task),
                Ok(None) => {}
                Err(e) => log::warn!(
                    "{}:{}: skipping malformed line: {e:#}",
                    self.path.display(),
                    lineno + 1
                ),
            }
        }

        Ok(TaskStore::from_tasks(tasks))
    }

    /// Truncate and rewrite the whole file from the in-memory sequence
    pub fn save(&self, store: &TaskStore) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }

        let mut out = String::new();
        for task in store.tasks() {
            let _ = writeln!(
                out,
                "{}{DELIMITER}{}{DELIMITER}{}",
                task.id,
                task.status.as_flag(),
                task.name
            );
        }

        fs::write(&self.path, out)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

/// Parse one `id;status;name` line.
///
/// `Ok(None)` means the line is missing its mandatory id or status field and
/// is ignored outright, matching the format's tolerance for stray lines.
fn parse_line(line: &str) -> Result<Option<Task>> {
    let mut fields = line.splitn(3, DELIMITER);
    let id_field = fields.next().unwrap_or("");
    let status_field = fields.next().unwrap_or("");
    let name = fields.next().unwrap_or("");

    if id_field.is_empty() || status_field.is_empty() {
        return Ok(None);
    }

    let id: u32 = id_field
        .parse()
        .with_context(|| format!("bad id field {id_field:?}"))?;
    let flag: u8 = status_field
        .parse()
        .with_context(|| format!("bad status field {status_field:?}"))?;
    let status = TaskStatus::from_flag(flag)
        .with_context(|| format!("status flag {flag} is not 0 or 1"))?;

    Ok(Some(Task {
        id,
        name: name.to_string(),
        status,
    }))
}
