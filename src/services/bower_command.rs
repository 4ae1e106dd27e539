// Single-shot wrapper around the bower executable

use std::path::{Path, PathBuf};
use std::process::Stdio;

use serde_json::Value;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::utils::error::{Result, SiteError};

/// Executable used when none is configured
pub const DEFAULT_BOWER_PROGRAM: &str = "bower";

/// Structured result on stdout, no prompts
const INSTALL_FLAGS: &[&str] = &["--json", "--config.interactive=false"];

/// Something a running command reported
#[derive(Debug, Clone, PartialEq)]
pub enum CommandEvent {
    /// Diagnostic output line
    Log(String),
    /// Successful completion with the command's result
    End(Value),
    /// Failure with its reason
    Error(String),
}

/// Events of one command invocation
#[derive(Debug)]
pub struct CommandHandle {
    events: mpsc::UnboundedReceiver<CommandEvent>,
}

impl CommandHandle {
    pub fn from_events(events: mpsc::UnboundedReceiver<CommandEvent>) -> Self {
        Self { events }
    }

    /// Resolve with the first terminal event; later events are ignored
    pub async fn settle(mut self) -> Result<Value> {
        while let Some(event) = self.events.recv().await {
            match event {
                CommandEvent::Log(line) => log::debug!("{}", line),
                CommandEvent::End(value) => return Ok(value),
                CommandEvent::Error(reason) => return Err(SiteError::Command(reason)),
            }
        }

        Err(SiteError::Command(
            "command finished without reporting a result".to_string(),
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOptions {
    /// Working directory; the current one when unset
    pub cwd: Option<PathBuf>,
}

/// Runs `<program> <command> <args...>` and reports the outcome once
#[derive(Debug, Clone)]
pub struct BowerCommand {
    program: String,
}

impl Default for BowerCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl BowerCommand {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_BOWER_PROGRAM.to_string())
    }

    pub fn with_program(program: String) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Start `command` in the background. Must be called inside a Tokio runtime.
    pub fn spawn(&self, command: &str, args: &[String], options: &CommandOptions) -> CommandHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        let label = format!("{} {}", self.program, command);

        let mut cmd = Command::new(&self.program);
        cmd.arg(command)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }

        log::debug!("Running {} {}", label, args.join(" "));

        match cmd.spawn() {
            Ok(child) => {
                tokio::spawn(async move {
                    let event = match child.wait_with_output().await {
                        Ok(output) => {
                            let stderr = String::from_utf8_lossy(&output.stderr);
                            for line in stderr.lines() {
                                let _ = tx.send(CommandEvent::Log(line.to_string()));
                            }

                            if output.status.success() {
                                CommandEvent::End(parse_output(&String::from_utf8_lossy(&output.stdout)))
                            } else {
                                let tail = stderr.lines().last().unwrap_or_default();
                                CommandEvent::Error(format!("{} exited with {}: {}", label, output.status, tail))
                            }
                        }
                        Err(e) => CommandEvent::Error(format!("Failed to wait for {}: {}", label, e)),
                    };
                    let _ = tx.send(event);
                });
            }
            Err(e) => {
                let _ = tx.send(CommandEvent::Error(format!("Failed to start {}: {}", label, e)));
            }
        }

        CommandHandle::from_events(rx)
    }

    /// Run `command` to completion
    pub async fn run(&self, command: &str, args: &[String], options: &CommandOptions) -> Result<Value> {
        self.spawn(command, args, options).settle().await
    }

    /// `install` the given endpoints, optionally from another directory
    pub async fn install(&self, packages: &[String], cwd: Option<&Path>) -> Result<Value> {
        let options = CommandOptions {
            cwd: cwd.map(Path::to_path_buf),
        };
        self.run("install", &install_args(packages), &options).await
    }
}

fn install_args(packages: &[String]) -> Vec<String> {
    packages
        .iter()
        .cloned()
        .chain(INSTALL_FLAGS.iter().map(|flag| flag.to_string()))
        .collect()
}

/// Stdout as JSON when it parses, otherwise as trimmed text
fn parse_output(stdout: &str) -> Value {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(trimmed).unwrap_or_else(|_| Value::String(trimmed.to_string()))
}
