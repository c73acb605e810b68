use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// Starts one minifier run per bundle.
#[async_trait]
pub trait MinifierLauncher: Send + Sync {
    /// Launch a fresh minifier whose output lands in `target` (created or truncated).
    async fn start(&self, target: &Path) -> Result<Box<dyn MinifierSession>>;

    /// Human-readable name of the tool, for logs.
    fn name(&self) -> &str;
}

/// A live minifier: input stays open across writes until `finish`.
#[async_trait]
pub trait MinifierSession: Send {
    async fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Close input and wait for exit. A non-zero exit is an error.
    async fn finish(self: Box<Self>) -> Result<()>;

    /// Tear the run down after a failure elsewhere.
    async fn abort(self: Box<Self>);
}

/// Source file access.
#[async_trait]
pub trait SourceReader: Send + Sync {
    /// Fail early when a source cannot be opened, before anything is written.
    async fn check_readable(&self, path: &Path) -> Result<()>;

    async fn read_source(&self, path: &Path) -> Result<Vec<u8>>;
}
