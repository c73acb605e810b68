use std::path::PathBuf;
use thiserror::Error;

/// Every way a bundle build can fail. All variants are fatal for the run.
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Launch error: cannot start minifier `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Read error: cannot read source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Write error: cannot feed minifier for {}: {source}", .target.display())]
    Write {
        target: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Process error: minifier exited with code {code} while writing {}", .target.display())]
    Process { target: PathBuf, code: i32 },

    #[error("Output error: cannot create {}: {source}", .path.display())]
    Target {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BundleError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(target: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            target: target.into(),
            source,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Short name of the stage that failed, used in the final report line.
    pub fn stage(&self) -> &'static str {
        match self {
            BundleError::Launch { .. } => "launch",
            BundleError::Read { .. } => "read",
            BundleError::Write { .. } => "write",
            BundleError::Process { .. } => "minify",
            BundleError::Target { .. } => "output",
            BundleError::Config(_) => "config",
            BundleError::Io(_) => "io",
        }
    }

    /// Exit status for the whole invocation.
    ///
    /// A failing minifier's own code is propagated when it is a usable
    /// process status; everything else exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::Process { code, .. } if (1..=255).contains(code) => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BundleError>;

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::config(format!("JSON error: {}", err))
    }
}
