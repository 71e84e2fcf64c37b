//! Workflow command output and job summary.
//!
//! Annotations are written to the step's stdout using the runner's
//! `::command::message` syntax. The summary is appended to the file named
//! by `GITHUB_STEP_SUMMARY`.

use crate::error::AppError;
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::path::PathBuf;

/// Writes user-facing status for the workflow run.
#[derive(Debug)]
pub struct ActionsReporter<W: Write = Stdout> {
    out: W,
    summary_path: Option<PathBuf>,
}

impl ActionsReporter<Stdout> {
    /// Reporter writing to the process stdout.
    pub fn stdout(summary_path: Option<PathBuf>) -> Self {
        Self::new(io::stdout(), summary_path)
    }
}

impl<W: Write> ActionsReporter<W> {
    pub fn new(out: W, summary_path: Option<PathBuf>) -> Self {
        Self { out, summary_path }
    }

    /// Plain log line in the step output.
    pub fn info(&mut self, message: &str) -> Result<(), AppError> {
        writeln!(self.out, "{}", message)?;
        Ok(())
    }

    /// `::notice::` annotation.
    pub fn notice(&mut self, message: &str) -> Result<(), AppError> {
        self.command("notice", message)
    }

    /// `::warning::` annotation.
    pub fn warning(&mut self, message: &str) -> Result<(), AppError> {
        self.command("warning", message)
    }

    /// `::error::` annotation.
    pub fn error(&mut self, message: &str) -> Result<(), AppError> {
        self.command("error", message)
    }

    fn command(&mut self, name: &str, message: &str) -> Result<(), AppError> {
        writeln!(self.out, "::{}::{}", name, escape_data(message))?;
        self.out.flush()?;
        Ok(())
    }

    /// Append a heading and a quote to the job summary.
    ///
    /// Does nothing, apart from a warning in the log, when no summary file
    /// is configured.
    pub fn append_summary(&mut self, heading: &str, quote: &str) -> Result<(), AppError> {
        let Some(path) = &self.summary_path else {
            log::warn!("No step summary file configured; skipping summary");
            return Ok(());
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                AppError::output(format!(
                    "Failed to open summary file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        write!(
            file,
            "<h1>{}</h1>\n<blockquote>{}</blockquote>\n",
            heading, quote
        )?;
        Ok(())
    }

    /// Consume the reporter and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Escape a message for use in a workflow command.
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
