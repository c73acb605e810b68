use crate::core::services::BuildOrchestrator;
use crate::infrastructure::{convert_story_file, ProcessMinifier, StoryFormat, TokioFileSystemService};
use crate::utils::{BuildUI, BundleError, CliOverrides, ConfigLoader, Logger, ResolvedConfig, Result};
use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "glkpack")]
#[command(about = "Bundle and minify the interpreter sources into distributable scripts")]
#[command(version)]
pub struct Cli {
    /// Show per-source progress and timings
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root; catalog paths are relative to it
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
    /// Config file (default: <root>/glkpack.config.json if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every bundle in the catalog
    Build {
        #[command(flatten)]
        project: ProjectArgs,
        /// Minifier program (reads stdin, writes stdout)
        #[arg(long)]
        minifier: Option<String>,
        /// Argument passed to the minifier; repeat for several
        #[arg(long = "minifier-arg", allow_hyphen_values = true, requires = "minifier")]
        minifier_args: Vec<String>,
    },
    /// Encode a story file as a loadable script on stdout
    Convert {
        /// Story file (exactly one)
        files: Vec<PathBuf>,
        /// Emit a document-ready GiLoad.load_run() call instead of processBase64Zcode()
        #[arg(long)]
        giload: bool,
    },
    /// Print the default configuration file
    Init,
    /// List the bundles and their sources without building
    Catalog {
        #[command(flatten)]
        project: ProjectArgs,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> Result<()> {
        let cli = Cli::parse();
        self.dispatch(cli).await
    }

    pub async fn dispatch(&self, cli: Cli) -> Result<()> {
        Logger::init(cli.verbose);

        match cli.command {
            Commands::Build {
                project,
                minifier,
                minifier_args,
            } => {
                let overrides = CliOverrides {
                    minifier_program: minifier,
                    minifier_args,
                };
                self.handle_build_command(&project, &overrides).await
            }
            Commands::Convert { files, giload } => self.handle_convert_command(&files, giload).await,
            Commands::Init => self.handle_init_command(),
            Commands::Catalog { project } => self.handle_catalog_command(&project),
        }
    }

    fn resolve_project(&self, project: &ProjectArgs, overrides: &CliOverrides) -> Result<ResolvedConfig> {
        let file_config = ConfigLoader::load(&project.root, project.config.as_deref())?;
        ConfigLoader::resolve(file_config, project.root.clone(), overrides)
    }

    async fn handle_build_command(&self, project: &ProjectArgs, overrides: &CliOverrides) -> Result<()> {
        let resolved = self.resolve_project(project, overrides)?;

        BuildUI::show_banner();
        Logger::build_start(&resolved.root, resolved.catalog.len());

        let orchestrator = BuildOrchestrator::new(
            Arc::new(TokioFileSystemService),
            Arc::new(ProcessMinifier::new(resolved.minifier.clone())),
        );

        match orchestrator.run(&resolved.catalog).await {
            Ok(report) => {
                BuildUI::show_completion(&report, &resolved.root);
                Ok(())
            }
            Err(e) => {
                Logger::error(&format!("Build stopped at the {} stage", e.stage()));
                Err(e)
            }
        }
    }

    async fn handle_convert_command(&self, files: &[PathBuf], giload: bool) -> Result<()> {
        let [file] = files else {
            return Err(BundleError::config(
                "usage: glkpack convert [--giload] <story-file> (exactly one story file)",
            ));
        };

        let format = if giload {
            StoryFormat::GiLoad
        } else {
            StoryFormat::Base64Zcode
        };

        let script = convert_story_file(file, format).await?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(script.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn handle_init_command(&self) -> Result<()> {
        println!("{}", ConfigLoader::generate_example()?);
        Ok(())
    }

    fn handle_catalog_command(&self, project: &ProjectArgs) -> Result<()> {
        let resolved = self.resolve_project(project, &CliOverrides::default())?;
        BuildUI::show_catalog(&resolved.catalog);
        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
