use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "ammbuild",
    about = "Build helper for AMM - composes the bootstrap loader and bundles server templates",
    version = env!("GIT_DESCRIBE"),
    after_help = "Without a subcommand, runs `build` (bootstrap, then bundle).\n\nConfig is read from --config, $AMMBUILD_CONFIG or ./ammbuild.yaml."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to ammbuild.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every pipeline: bootstrap, then bundle
    Build {
        /// Show what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Inline the built package into the bootstrap loader template
    Bootstrap(BootstrapArgs),

    /// Bundle a template directory into one JSON file
    Bundle(BundleArgs),

    /// Validate all inputs without writing anything
    Check {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Default)]
pub struct BootstrapArgs {
    /// Built module package (overrides config)
    #[arg(long)]
    pub package: Option<PathBuf>,

    /// Loader template containing the placeholder (overrides config)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Output file (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also touch a .nojekyll marker next to the output
    #[arg(long)]
    pub nojekyll: bool,

    /// Show what would be written without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub struct BundleArgs {
    /// Template directory to bundle (overrides config)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output JSON file (overrides config)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write indented JSON
    #[arg(long)]
    pub pretty: bool,

    /// Show what would be written without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show effective configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}
