use crate::core::models::{BundleCatalog, MinifierCommand};
use crate::utils::{BundleError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "glkpack.config.json";

/// Configuration file format (glkpack.config.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlkpackConfig {
    /// External minifier; reads stdin, writes stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minifier: Option<MinifierCommand>,

    /// Bundles to produce, in order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundles: Option<BundleCatalog>,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub minifier_program: Option<String>,
    pub minifier_args: Vec<String>,
}

/// Everything a build needs, with paths anchored at the project root.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub root: PathBuf,
    pub minifier: MinifierCommand,
    pub catalog: BundleCatalog,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `path`, or `glkpack.config.json` under `root` when no path is given.
    /// An explicit path must exist; the default one is optional.
    pub fn load(root: &Path, path: Option<&Path>) -> Result<Option<GlkpackConfig>> {
        let config_path = match path {
            Some(explicit) => {
                if !explicit.exists() {
                    return Err(BundleError::config(format!(
                        "config file {} does not exist",
                        explicit.display()
                    )));
                }
                explicit.to_path_buf()
            }
            None => {
                let default_path = root.join(CONFIG_FILE_NAME);
                if !default_path.exists() {
                    Logger::debug(&format!("No {} found, using built-in catalog", CONFIG_FILE_NAME));
                    return Ok(None);
                }
                default_path
            }
        };

        Logger::debug(&format!("Loading config from {}", config_path.display()));

        let content = std::fs::read_to_string(&config_path)?;
        let config: GlkpackConfig = serde_json::from_str(&content).map_err(|e| {
            BundleError::config(format!("Failed to parse {}: {}", config_path.display(), e))
        })?;

        Ok(Some(config))
    }

    /// Merge file config with CLI arguments (CLI takes precedence)
    pub fn resolve(
        file_config: Option<GlkpackConfig>,
        root: PathBuf,
        overrides: &CliOverrides,
    ) -> Result<ResolvedConfig> {
        let base = file_config.unwrap_or_default();

        let mut minifier = match &overrides.minifier_program {
            Some(program) => MinifierCommand::new(program.clone(), overrides.minifier_args.clone()),
            None => base.minifier.unwrap_or_default(),
        };
        // Relative script paths like tools/rjsmin.py are relative to the project.
        if minifier.working_dir.is_none() {
            minifier = minifier.with_working_dir(&root);
        }

        let catalog = base.bundles.unwrap_or_default();
        catalog.validate()?;
        let catalog = catalog.resolve_against(&root);

        Ok(ResolvedConfig {
            root,
            minifier,
            catalog,
        })
    }

    /// Default configuration, as written by `glkpack init`.
    pub fn generate_example() -> Result<String> {
        let example = GlkpackConfig {
            minifier: Some(MinifierCommand::default()),
            bundles: Some(BundleCatalog::default()),
        };
        Ok(serde_json::to_string_pretty(&example)?)
    }
}
