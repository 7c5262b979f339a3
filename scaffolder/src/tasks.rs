//! File task lists and their sequential runner
//!
//! A generator produces a [`PathContentMap`]. The same map drives both
//! directions:
//!
//! - [`build_write_tasks`] writes every entry, refusing to replace existing
//!   files unless overwriting is allowed
//! - [`build_delete_tasks`] removes every entry (any script extension variant)
//!   and then removes the parent directories left empty
//!
//! Building a task list touches nothing. Only [`TaskRunner::run`] performs
//! I/O, one task at a time and in list order, stopping at the first failure.
//! Completed tasks are not rolled back.

use crate::error::{Result, ScaffoldError};
use crate::files::{base_file, delete_any_extension, exists_any_extension, relative_to, write_file, WriteOptions};
use crate::router::{patch_routes_file, RoutePatch};
use console::style;
use indexmap::{IndexMap, IndexSet};
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Target path to file content, in generation order
pub type PathContentMap = IndexMap<PathBuf, String>;

const SKIP_MISSING_FILE: &str = "File doesn't exist";
const SKIP_MISSING_DIR: &str = "Doesn't exist";
const SKIP_NOT_EMPTY: &str = "Not empty";

/// One file system operation of a generation or destroy run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileTask {
    /// Write `contents` to `target`
    Write {
        /// File to create or replace
        target: PathBuf,
        /// Full file content
        contents: String,
        /// Whether an existing file may be replaced
        options: WriteOptions,
    },
    /// Delete `target` and its script extension variants
    Delete {
        /// Logical file to remove
        target: PathBuf,
    },
    /// Remove each directory that is empty once earlier tasks have run
    Cleanup {
        /// Candidate directories, first-seen order
        dirs: Vec<PathBuf>,
    },
    /// Add or remove route declarations in the routes file
    PatchRoutes {
        /// Routes source file
        routes_file: PathBuf,
        /// Declarations to add or names to remove
        patch: RoutePatch,
    },
}

/// Build one write task per entry of `files`, in map order
#[must_use]
pub fn build_write_tasks(files: &PathContentMap, options: WriteOptions) -> Vec<FileTask> {
    files
        .iter()
        .map(|(target, contents)| FileTask::Write {
            target: target.clone(),
            contents: contents.clone(),
            options,
        })
        .collect()
}

/// Build one delete task per entry of `files` followed by a cleanup task
#[must_use]
pub fn build_delete_tasks(files: &PathContentMap) -> Vec<FileTask> {
    files
        .keys()
        .map(|target| FileTask::Delete {
            target: target.clone(),
        })
        .chain(std::iter::once(FileTask::Cleanup {
            dirs: unique_parent_dirs(files),
        }))
        .collect()
}

/// Parent directories of every key in `files`, deduplicated in first-seen order
#[must_use]
pub fn unique_parent_dirs(files: &PathContentMap) -> Vec<PathBuf> {
    files
        .keys()
        .filter_map(|path| path.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

fn display_path(base: &Path, path: &Path) -> String {
    relative_to(base, path).display().to_string()
}

impl FileTask {
    /// Title shown while the task is pending or running
    #[must_use]
    pub fn title(&self, base: &Path) -> String {
        match self {
            Self::Write { target, .. } => {
                format!("...waiting to write file `./{}`...", display_path(base, target))
            }
            Self::Delete { target } => {
                format!("Destroying `./{}.*`...", display_path(base, &base_file(target)))
            }
            Self::Cleanup { .. } => "Cleaning up empty directories...".to_string(),
            Self::PatchRoutes {
                routes_file,
                patch: RoutePatch::Add(_),
            } => format!("Adding routes to `./{}`...", display_path(base, routes_file)),
            Self::PatchRoutes {
                routes_file,
                patch: RoutePatch::Remove(_),
            } => format!("Removing routes from `./{}`...", display_path(base, routes_file)),
        }
    }

    /// Title shown once the task has completed
    #[must_use]
    pub fn completed_title(&self, base: &Path) -> String {
        match self {
            Self::Write { target, .. } => {
                format!("Successfully wrote file `./{}`", display_path(base, target))
            }
            _ => self.title(base),
        }
    }

    /// Reason to skip this task in the current file system state
    ///
    /// Evaluated immediately before the task would run.
    #[must_use]
    pub fn skip_reason(&self) -> Option<&'static str> {
        match self {
            Self::Delete { target } if !exists_any_extension(target) => Some(SKIP_MISSING_FILE),
            Self::PatchRoutes {
                routes_file,
                patch: RoutePatch::Remove(_),
            } if !routes_file.exists() => Some(SKIP_MISSING_FILE),
            _ => None,
        }
    }
}

/// How a single task ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    /// The action ran to completion
    Completed,
    /// The action did not run
    Skipped(String),
    /// The action failed; the run stopped here
    Failed(String),
}

/// Outcome of one task, with per-directory entries for cleanup tasks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    /// Final task title
    pub title: String,
    /// How the task ended
    pub outcome: TaskOutcome,
    /// Nested entries (cleanup directories)
    pub subtasks: Vec<Self>,
}

impl TaskRecord {
    const fn leaf(title: String, outcome: TaskOutcome) -> Self {
        Self {
            title,
            outcome,
            subtasks: Vec::new(),
        }
    }
}

/// Result of running a task list
#[derive(Debug, Default)]
pub struct RunReport {
    /// Records of every task that was reached, in order
    pub records: Vec<TaskRecord>,
    /// Error of the task that stopped the run
    pub error: Option<ScaffoldError>,
}

impl RunReport {
    /// Whether every reached task completed or was skipped
    #[must_use]
    pub const fn success(&self) -> bool {
        self.error.is_none()
    }

    /// Convert into a `Result`, surfacing the stopping error
    ///
    /// # Errors
    ///
    /// Returns the error of the task that failed.
    pub fn into_result(self) -> Result<Vec<TaskRecord>> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Output style of the task runner
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Spinner for the active task, one line per finished task
    #[default]
    Default,
    /// Plain start and result lines, suitable for logs
    Verbose,
    /// No output
    Silent,
}

/// Executes file tasks sequentially
#[derive(Clone)]
pub struct TaskRunner {
    base: PathBuf,
    mode: DisplayMode,
    output: Arc<Mutex<dyn Write + Send>>,
}

impl fmt::Debug for TaskRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskRunner")
            .field("base", &self.base)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

impl TaskRunner {
    /// Create a runner showing paths relative to `base`, printing to stdout
    pub fn new(base: impl Into<PathBuf>, mode: DisplayMode) -> Self {
        Self {
            base: base.into(),
            mode,
            output: Arc::new(Mutex::new(std::io::stdout())),
        }
    }

    /// Print task lines to `output` instead of stdout
    ///
    /// The spinner of [`DisplayMode::Default`] still draws on the terminal.
    #[must_use]
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Arc::new(Mutex::new(output));
        self
    }

    /// Run `tasks` in order, stopping at the first failure
    pub fn run(&self, tasks: &[FileTask]) -> RunReport {
        let mut report = RunReport::default();

        for task in tasks {
            let title = task.title(&self.base);

            if let Some(reason) = task.skip_reason() {
                tracing::debug!(task = %title, reason, "skipped task");
                self.show_skipped(&title, reason, 0);
                report
                    .records
                    .push(TaskRecord::leaf(title, TaskOutcome::Skipped(reason.to_string())));
                continue;
            }

            let spinner = self.start(&title);
            let result = if let FileTask::Cleanup { dirs } = task {
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }
                // Shown once every directory has been handled
                let (subtasks, result) = self.cleanup(dirs);
                self.finish(None, &title, result.as_ref().err(), 0);
                report.records.push(TaskRecord {
                    title: title.clone(),
                    outcome: outcome_of(&result),
                    subtasks,
                });
                result
            } else {
                let result = execute(task);
                let done = match &result {
                    Ok(()) => task.completed_title(&self.base),
                    Err(_) => title.clone(),
                };
                self.finish(spinner, &done, result.as_ref().err(), 0);
                report.records.push(TaskRecord::leaf(done, outcome_of(&result)));
                result
            };

            if let Err(e) = result {
                tracing::error!(task = %title, error = %e, "task failed");
                report.error = Some(e);
                break;
            }
        }

        tracing::info!(
            tasks = tasks.len(),
            reached = report.records.len(),
            success = report.success(),
            "task run finished"
        );
        report
    }

    /// Remove each directory in order if it exists and is empty
    fn cleanup(&self, dirs: &[PathBuf]) -> (Vec<TaskRecord>, Result<()>) {
        let mut records = Vec::new();

        for dir in dirs {
            let title = format!("Removing empty `{}`...", display_path(&self.base, dir));

            let reason = match dir_skip_reason(dir) {
                Ok(reason) => reason,
                Err(e) => {
                    self.finish(None, &title, Some(&e), 1);
                    records.push(TaskRecord::leaf(title, TaskOutcome::Failed(e.to_string())));
                    return (records, Err(e));
                }
            };

            if let Some(reason) = reason {
                self.show_skipped(&title, reason, 1);
                records.push(TaskRecord::leaf(title, TaskOutcome::Skipped(reason.to_string())));
                continue;
            }

            if let Err(e) = fs::remove_dir(dir).map_err(|e| ScaffoldError::io(dir, e)) {
                self.finish(None, &title, Some(&e), 1);
                records.push(TaskRecord::leaf(title, TaskOutcome::Failed(e.to_string())));
                return (records, Err(e));
            }

            tracing::debug!(dir = %dir.display(), "removed empty directory");
            self.finish(None, &title, None, 1);
            records.push(TaskRecord::leaf(title, TaskOutcome::Completed));
        }

        (records, Ok(()))
    }

    fn start(&self, title: &str) -> Option<ProgressBar> {
        match self.mode {
            DisplayMode::Default => {
                let spinner = ProgressBar::new_spinner();
                if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                    spinner.set_style(template);
                }
                spinner.set_message(title.to_string());
                spinner.enable_steady_tick(Duration::from_millis(80));
                Some(spinner)
            }
            DisplayMode::Verbose => {
                self.emit(format_args!("[STARTED] {title}"));
                None
            }
            DisplayMode::Silent => None,
        }
    }

    fn finish(
        &self,
        spinner: Option<ProgressBar>,
        title: &str,
        error: Option<&ScaffoldError>,
        depth: usize,
    ) {
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }
        let indent = "  ".repeat(depth + 1);

        match (self.mode, error) {
            (DisplayMode::Silent, _) => {}
            (DisplayMode::Default, None) => {
                self.emit(format_args!("{indent}{} {title}", style("✔").green()));
            }
            (DisplayMode::Default, Some(e)) => {
                self.emit(format_args!("{indent}{} {title}", style("✖").red()));
                self.emit(format_args!("{indent}  {}", style(e).red()));
            }
            (DisplayMode::Verbose, None) => self.emit(format_args!("[SUCCESS] {title}")),
            (DisplayMode::Verbose, Some(e)) => self.emit(format_args!("[FAILED] {title}: {e}")),
        }
    }

    fn show_skipped(&self, title: &str, reason: &str, depth: usize) {
        let indent = "  ".repeat(depth + 1);
        match self.mode {
            DisplayMode::Default => self.emit(format_args!(
                "{indent}{} {title} {}",
                style("↓").yellow(),
                style(format!("[skipped: {reason}]")).dim()
            )),
            DisplayMode::Verbose => self.emit(format_args!("[SKIPPED] {title}: {reason}")),
            DisplayMode::Silent => {}
        }
    }

    fn emit(&self, line: fmt::Arguments<'_>) {
        if let Ok(mut output) = self.output.lock() {
            if let Err(e) = writeln!(output, "{line}") {
                tracing::debug!(error = %e, "cannot write task output");
            }
        }
    }
}

fn outcome_of(result: &Result<()>) -> TaskOutcome {
    match result {
        Ok(()) => TaskOutcome::Completed,
        Err(e) => TaskOutcome::Failed(e.to_string()),
    }
}

/// Why `dir` must be left alone, or `None` if it can be removed
fn dir_skip_reason(dir: &Path) -> Result<Option<&'static str>> {
    if !dir.exists() {
        return Ok(Some(SKIP_MISSING_DIR));
    }
    let mut entries = fs::read_dir(dir).map_err(|e| ScaffoldError::io(dir, e))?;
    if entries.next().is_some() {
        return Ok(Some(SKIP_NOT_EMPTY));
    }
    Ok(None)
}

fn execute(task: &FileTask) -> Result<()> {
    match task {
        FileTask::Write {
            target,
            contents,
            options,
        } => write_file(target, contents, *options),
        FileTask::Delete { target } => delete_any_extension(target).map(|_| ()),
        FileTask::PatchRoutes { routes_file, patch } => patch_routes_file(routes_file, patch),
        FileTask::Cleanup { .. } => Ok(()),
    }
}
