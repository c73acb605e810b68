use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` wins over `verbose`.
    pub fn init(verbose: bool) {
        let default_filter = if verbose { "glkpack=debug" } else { "glkpack=info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // A second init (tests, embedding) is harmless.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn build_start(root: &Path, bundles: usize) {
        info!("🔨 Building {} bundle(s) from {}", bundles, root.display());
    }

    pub fn writing_target(target: &Path) {
        info!("Writing {}", target.display());
    }

    pub fn feeding_source(source: &Path, bytes: usize, stripped: usize) {
        debug!("📄 {} ({} bytes, {} debug fragment(s) stripped)", source.display(), bytes, stripped);
    }

    pub fn minifier_started(program: &str, target: &Path) {
        debug!("⚙️  Started {} for {}", program, target.display());
    }

    pub fn minifier_exited(target: &Path, code: i32) {
        debug!("⚙️  Minifier for {} exited with code {}", target.display(), code);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
