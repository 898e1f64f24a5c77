//! External process execution.
//!
//! Every tool hubops drives (sops, helm, kubectl, tofu) is launched through
//! the [`Runner`] trait. Invocations block until the child exits; there is no
//! timeout and no retry.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, info};

use crate::error::{Result, ToolError};

/// One external process launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<OsString>,
    env: BTreeMap<String, OsString>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> Self {
        self.env.insert(key.into(), value.as_ref().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    pub fn env_var(&self, key: &str) -> Option<&OsStr> {
        self.env.get(key).map(OsString::as_os_str)
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Short tool name used in error messages (`helm`, not `/usr/bin/helm`).
    fn tool_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.clone())
    }

    fn command(&self) -> Result<Command> {
        let program = which::which(&self.program).map_err(|_| ToolError::NotFound {
            tool: self.program.clone(),
        })?;
        let mut cmd = Command::new(program);
        cmd.args(&self.args);
        cmd.envs(&self.env);
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        Ok(cmd)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}={} ", key, value.to_string_lossy())?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Launches external processes.
pub trait Runner {
    /// Run to completion with stdout and stderr inherited.
    ///
    /// # Errors
    ///
    /// Returns `ToolError` if the program is missing, cannot be spawned, or
    /// exits non-zero.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run to completion and return stdout. Stderr stays inherited.
    fn capture(&self, invocation: &Invocation) -> Result<Vec<u8>>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        info!(command = %invocation, "running");
        let mut cmd = invocation.command()?;
        let status = cmd.status().map_err(|source| ToolError::Spawn {
            tool: invocation.tool_name(),
            source,
        })?;
        debug!(tool = %invocation.tool_name(), code = ?status.code(), "exited");

        if !status.success() {
            return Err(ToolError::Failed {
                tool: invocation.tool_name(),
                code: status.code(),
            }
            .into());
        }
        Ok(())
    }

    fn capture(&self, invocation: &Invocation) -> Result<Vec<u8>> {
        info!(command = %invocation, "capturing");
        let mut cmd = invocation.command()?;
        let output = cmd
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| ToolError::Spawn {
                tool: invocation.tool_name(),
                source,
            })?;
        debug!(
            tool = %invocation.tool_name(),
            code = ?output.status.code(),
            stdout_len = output.stdout.len(),
            "exited"
        );

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: invocation.tool_name(),
                code: output.status.code(),
            }
            .into());
        }
        Ok(output.stdout)
    }
}

/// Prints invocations instead of running them.
#[derive(Debug, Default)]
pub struct DryRunRunner;

impl Runner for DryRunRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        println!("{}", invocation);
        Ok(())
    }

    fn capture(&self, invocation: &Invocation) -> Result<Vec<u8>> {
        println!("{}", invocation);
        Ok(Vec::new())
    }
}
