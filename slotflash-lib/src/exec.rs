//! Command execution backends.
//!
//! Every external invocation goes through [`CommandExecutor`], so the whole
//! pipeline can run against [`RecordingExecutor`] without touching the
//! operating system.

use crate::command::{DEFAULT_PROGRAM, FastbootCommand};
use crate::{Error, Result};
use std::io::Write;
use std::process::Command;
use std::sync::{Arc, Mutex};

pub trait CommandExecutor {
    fn execute(&mut self, command: &FastbootCommand) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecMode {
    /// Print the command line, run nothing
    DryRun,
    #[default]
    Live,
}

pub fn create_executor(mode: ExecMode, program: &str) -> Box<dyn CommandExecutor> {
    match mode {
        ExecMode::DryRun => Box::new(DryRunExecutor::new(std::io::stdout(), program)),
        ExecMode::Live => Box::new(ProcessExecutor::new(program)),
    }
}

/// Writes each command line to `W` instead of running it.
pub struct DryRunExecutor<W> {
    out: W,
    program: String,
}

impl<W: Write> DryRunExecutor<W> {
    pub fn new(out: W, program: impl Into<String>) -> Self {
        Self {
            out,
            program: program.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CommandExecutor for DryRunExecutor<W> {
    fn execute(&mut self, command: &FastbootCommand) -> Result<()> {
        writeln!(self.out, "{}", command.render(&self.program))?;
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps every command in a shared log; clones see the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingExecutor {
    log: Arc<Mutex<Vec<FastbootCommand>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<FastbootCommand> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Rendered with the default program name.
    pub fn command_lines(&self) -> Vec<String> {
        self.commands().iter().map(|c| c.to_string()).collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&mut self, command: &FastbootCommand) -> Result<()> {
        if let Ok(mut log) = self.log.lock() {
            log.push(command.clone());
        }
        Ok(())
    }
}

/// Runs the flashing tool and waits for it.
///
/// The child inherits the standard streams so the tool reports progress and
/// errors itself. A non-zero exit status fails the command.
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    program: String,
}

impl ProcessExecutor {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&mut self, command: &FastbootCommand) -> Result<()> {
        let status = Command::new(&self.program)
            .args(command.args())
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if !status.success() {
            return Err(Error::CommandFailed {
                command: command.render(&self.program),
                status,
            });
        }
        Ok(())
    }
}
