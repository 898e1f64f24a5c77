//! Error types for hubops.
//!
//! Every failure is fatal to the current operation: there is no retryable
//! category. Errors are grouped by the stage that raises them so `main` can
//! attach a hint to the common precondition failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Missing or malformed pieces of the repository layout.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("required directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("cluster credentials not found: {}", .0.display())]
    MissingCredentials(PathBuf),

    #[error("invalid {kind} name '{name}': {reason}")]
    InvalidIdentity {
        kind: &'static str,
        name: String,
        reason: String,
    },
}

/// Secret discovery and naming failures.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("decrypted path equals encrypted path: {}", .0.display())]
    DegenerateMarker(PathBuf),

    #[error("encrypted file name carries more than one '.enc.': {}", .0.display())]
    RepeatedMarker(PathBuf),

    #[error("encrypted file name is not valid UTF-8: {}", .0.display())]
    NonUtf8Name(PathBuf),

    #[error("failed to scan {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// External tool failures.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{tool} not found on PATH")]
    NotFound { tool: String },

    #[error("failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no {tool} command specified")]
    NoArguments { tool: String },

    #[error("{tool} exited with {}", describe_exit(.code))]
    Failed { tool: String, code: Option<i32> },
}

/// `.hubops.toml` failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl Error {
    /// Exit status to report for this error.
    ///
    /// A failed external tool passes its own status through; everything
    /// else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Tool(ToolError::Failed {
                code: Some(code), ..
            }) if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
