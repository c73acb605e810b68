use crate::core::models::{BuildReport, BundleCatalog};
use colored::*;
use std::path::Path;

pub struct BuildUI;

impl BuildUI {
    pub fn show_banner() {
        println!("\n  {} {}", "GLKPACK".bright_cyan().bold(), env!("CARGO_PKG_VERSION").bright_white());
        println!();
    }

    pub fn show_completion(report: &BuildReport, root: &Path) {
        println!();
        for bundle in &report.bundles {
            let shown = bundle.target.strip_prefix(root).unwrap_or(&bundle.target);
            println!(
                "  {} {} {}",
                shown.display().to_string().bright_cyan(),
                format!("({})", format_size(bundle.output_size)).bright_black(),
                format!(
                    "{} source(s), {} debug fragment(s) stripped",
                    bundle.sources, bundle.debug_fragments_stripped
                )
                .bright_black()
            );
        }

        println!();
        println!(
            "  {} built in {}",
            "✓".bright_green(),
            format!("{:.0}ms", report.build_time.as_secs_f64() * 1000.0)
                .bright_white()
                .bold()
        );
    }

    pub fn show_catalog(catalog: &BundleCatalog) {
        for spec in catalog.iter() {
            println!("{}", spec.target.display().to_string().bright_cyan().bold());
            for source in &spec.sources {
                println!("  {}", source.path.display());
            }
        }
    }
}

fn format_size(size: u64) -> String {
    let size_kb = size as f64 / 1024.0;
    if size_kb < 1.0 {
        format!("{} B", size)
    } else {
        format!("{:.2} kB", size_kb)
    }
}
