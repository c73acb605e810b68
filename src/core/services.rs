use crate::core::{interfaces::*, models::*};
use crate::infrastructure::{count_debug_fragments, strip_debug_lines, MinificationStats};
use crate::utils::{Logger, Result, Timer};
use std::path::Path;
use std::sync::Arc;

/// Builds one bundle: sources in order, debug lines stripped, through the minifier.
pub struct BundleAssembler {
    reader: Arc<dyn SourceReader>,
    launcher: Arc<dyn MinifierLauncher>,
}

impl BundleAssembler {
    pub fn new(reader: Arc<dyn SourceReader>, launcher: Arc<dyn MinifierLauncher>) -> Self {
        Self { reader, launcher }
    }

    pub async fn assemble(&self, spec: &BundleSpec) -> Result<BundleReport> {
        let _timer = Timer::start(&format!("bundle {}", spec.target.display()));

        // A missing source must fail before the target is touched.
        for source in &spec.sources {
            self.reader.check_readable(&source.path).await?;
        }

        Logger::debug(&format!(
            "Minifying {} source(s) with {}",
            spec.sources.len(),
            self.launcher.name()
        ));
        let mut session = self.launcher.start(&spec.target).await?;

        let mut report = BundleReport {
            target: spec.target.clone(),
            sources: spec.sources.len(),
            ..Default::default()
        };

        for source in &spec.sources {
            if let Err(e) = self.feed_source(session.as_mut(), source, &mut report).await {
                session.abort().await;
                return Err(e);
            }
        }

        session.finish().await?;

        report.output_size = output_size(&spec.target).await;

        Ok(report)
    }

    async fn feed_source(
        &self,
        session: &mut dyn MinifierSession,
        source: &SourceFile,
        report: &mut BundleReport,
    ) -> Result<()> {
        let content = self.reader.read_source(&source.path).await?;
        let stripped = count_debug_fragments(&content);
        let filtered = strip_debug_lines(&content);

        Logger::feeding_source(&source.path, content.len(), stripped);
        session.write(&filtered).await?;

        report.bytes_read += content.len();
        report.bytes_sent += filtered.len();
        report.debug_fragments_stripped += stripped;
        Ok(())
    }
}

/// Size of a finished target, for the summary only. A failed stat is logged
/// and reported as 0; the bundle itself was already written.
async fn output_size(target: &Path) -> u64 {
    match tokio::fs::metadata(target).await {
        Ok(metadata) => metadata.len(),
        Err(e) => {
            Logger::warn(&format!("Could not stat {}: {}", target.display(), e));
            0
        }
    }
}

/// Drives the whole catalog, one bundle at a time, stopping at the first failure.
pub struct BuildOrchestrator {
    assembler: BundleAssembler,
}

impl BuildOrchestrator {
    pub fn new(reader: Arc<dyn SourceReader>, launcher: Arc<dyn MinifierLauncher>) -> Self {
        Self {
            assembler: BundleAssembler::new(reader, launcher),
        }
    }

    pub async fn run(&self, catalog: &BundleCatalog) -> Result<BuildReport> {
        let timer = Timer::start("catalog build");
        catalog.validate()?;

        let mut report = BuildReport::default();
        for spec in catalog.iter() {
            Logger::writing_target(&spec.target);

            let bundle = self.assembler.assemble(spec).await?;
            Logger::debug(&format!(
                "{}: {}",
                bundle.target.display(),
                MinificationStats {
                    original_size: bundle.bytes_sent,
                    minified_size: bundle.output_size,
                }
            ));
            report.bundles.push(bundle);
        }

        report.build_time = timer.elapsed();
        Ok(report)
    }
}
