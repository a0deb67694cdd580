//! Sinks that hand a page file to an external program.

use std::io::Write;
use std::process::Command;

use tempfile::Builder;
use tracing::{debug, info};

use crate::error::{OutputError, Result};
use crate::sink::OutputSink;

/// Viewer used when none is configured.
#[cfg(target_os = "windows")]
pub const DEFAULT_VIEWER: &[&str] = &["notepad"];
#[cfg(target_os = "macos")]
pub const DEFAULT_VIEWER: &[&str] = &["open", "-W", "-t"];
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_VIEWER: &[&str] = &["xdg-open"];

/// Whether page files outlive the command by default.
///
/// `xdg-open` hands the file to a desktop application and returns before
/// that application has read it, so the file must stay behind.
pub const DEFAULT_KEEP_FILE: bool = cfg!(not(any(target_os = "windows", target_os = "macos")));

/// Print command used when none is configured.
#[cfg(target_os = "windows")]
pub const DEFAULT_PRINTER: &[&str] = &["notepad", "/p"];
#[cfg(not(target_os = "windows"))]
pub const DEFAULT_PRINTER: &[&str] = &["lp"];

/// Writes the page to a temporary `.txt` file and runs a program on it.
///
/// The program receives the file path as its last argument and is waited
/// for. The file is removed afterwards unless `keep_file` is set.
#[derive(Debug, Clone)]
pub struct CommandSink {
    role: &'static str,
    program: String,
    args: Vec<String>,
    keep_file: bool,
}

impl CommandSink {
    /// Builds a sink from a command line (`program arg...`).
    pub fn new(role: &'static str, command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or(OutputError::EmptyCommand { role })?;
        if program.trim().is_empty() {
            return Err(OutputError::EmptyCommand { role });
        }
        Ok(Self {
            role,
            program: program.clone(),
            args: args.to_vec(),
            keep_file: false,
        })
    }

    /// Opens pages in a text viewer.
    pub fn viewer(command: &[String]) -> Result<Self> {
        Self::new("viewer", command)
    }

    /// Sends pages to the print spooler.
    pub fn printer(command: &[String]) -> Result<Self> {
        Self::new("print", command)
    }

    #[must_use]
    pub fn keep_file(mut self, keep: bool) -> Self {
        self.keep_file = keep;
        self
    }
}

impl OutputSink for CommandSink {
    fn deliver(&mut self, text: &str) -> Result<()> {
        let mut file = Builder::new()
            .prefix("ikprint-")
            .suffix(".txt")
            .tempfile()
            .map_err(OutputError::TempFile)?;
        file.write_all(text.as_bytes())
            .and_then(|()| file.flush())
            .map_err(OutputError::TempFile)?;
        // Close our handle so the program can open the file on every platform.
        let page = file.into_temp_path();

        debug!(role = self.role, program = %self.program, "running page command");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(&*page)
            .status()
            .map_err(|source| OutputError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if self.keep_file {
            let kept = page.keep().map_err(|err| OutputError::TempFile(err.error))?;
            info!(path = %kept.display(), "page file kept");
        }

        if !status.success() {
            return Err(OutputError::CommandFailed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

pub(crate) fn default_command(defaults: &[&str]) -> Vec<String> {
    defaults.iter().map(|part| (*part).to_string()).collect()
}
