//! docsite - documentation checks for the site build
//!
//! The site's task runner invokes this binary as a test target. It validates
//! that every authored documentation page is linked from the sidebar
//! manifest and reports the result in a format CI can consume.
//!
//! Exit status: `0` when every check passes, `1` when at least one page is
//! missing from the sidebar, `2` when the run could not be set up (missing
//! documentation root, unreadable manifest, bad configuration).

use std::{
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{
    Context,
    Result,
};
use clap::{
    Parser,
    Subcommand,
};
use colored::Colorize;
use docsite_build_core::formatters::OutputFormat;
use tracing_subscriber::EnvFilter;

mod helpers;

use helpers::{
    ConfigOverrides,
    DocListing,
    GlobalArgs,
};

/// Exit status when a page is missing from the sidebar
const EXIT_CHECK_FAILED: u8 = 1;
/// Exit status for setup and infrastructure failures
const EXIT_SETUP_ERROR: u8 = 2;

/// Docsite build tool - documentation checks for the site build
#[derive(Parser, Debug)]
#[command(name = "docsite")]
#[command(
    version,
    about = "Documentation checks for the docsite build",
    long_about = "
Documentation checks for the docsite build

Examples:
  docsite check-sidebar
  docsite check-sidebar --docs-root website/docs --manifest website/sidebars.js
  docsite check-sidebar --output json
  docsite list-docs

Output Formats:
  --output human        Human-readable with colors (default)
  --output json         LSP-compatible JSON for tooling
  --output json-lines   Streaming JSON (one diagnostic per line)
  --output markdown     GitHub-flavored Markdown for PR comments

Exit Status:
  0  all documentation files are linked from the sidebar
  1  one or more files are missing from the sidebar
  2  setup error (missing docs root or manifest, invalid configuration)
"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Site root directory (defaults to the nearest directory with docsite.toml or sidebars.js)
    #[arg(long, global = true, env = "DOCSITE_ROOT")]
    site_root: Option<PathBuf>,

    /// Configuration file (defaults to docsite.toml under the site root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format for reports
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Logging level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
}

/// Available output formats
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    /// Human-readable format with colors (default)
    Human,
    /// JSON format for LSP/tooling integration
    Json,
    /// JSON Lines format for streaming output
    JsonLines,
    /// GitHub-flavored Markdown
    Markdown,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(format: OutputFormatArg) -> Self {
        match format {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::JsonLines => OutputFormat::JsonLines,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

/// Arguments selecting the documentation tree
#[derive(clap::Args, Debug, Clone, Default)]
struct ScanArgs {
    /// Documentation root (overrides docs_root in docsite.toml)
    #[arg(long)]
    docs_root: Option<PathBuf>,

    /// Directory name whose files are not checked; repeat to set several
    #[arg(long = "exclude-dir", value_name = "NAME")]
    exclude_dirs: Vec<String>,

    /// Markdown extension to scan; repeat to set several
    #[arg(long = "extension", value_name = "EXT")]
    extensions: Vec<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that every documentation file is linked from the sidebar manifest
    CheckSidebar {
        #[command(flatten)]
        scan: ScanArgs,

        /// Sidebar manifest (overrides sidebar_manifest in docsite.toml)
        #[arg(long)]
        manifest: Option<PathBuf>,
    },

    /// List the documentation files subject to the sidebar check
    ListDocs {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

impl Commands {
    fn overrides(&self) -> ConfigOverrides {
        let (scan, manifest) = match self {
            Commands::CheckSidebar { scan, manifest } => (scan, manifest.clone()),
            Commands::ListDocs { scan } => (scan, None),
        };
        ConfigOverrides {
            docs_root: scan.docs_root.clone(),
            manifest,
            exclude_dirs: scan.exclude_dirs.clone(),
            extensions: scan.extensions.clone(),
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "debug" } else { cli.log_level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .with_context(|| format!("Invalid log level: {}", default_level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global default tracing subscriber: {}", e))
}

/// Check command implementation; returns whether every check passed
fn cmd_check_sidebar(args: &GlobalArgs, overrides: &ConfigOverrides) -> Result<bool> {
    let build_system = args.build_system(overrides)?;
    if args.verbose {
        eprintln!(
            "{} Checking {} against {}",
            "🔍".bright_blue(),
            build_system.docs_root().display(),
            build_system.manifest().display()
        );
    }

    let report = build_system.check_sidebar().context("Sidebar check could not run")?;
    let rendered = args.output.render_report(&report.diagnostics)?;
    args.output.emit(&rendered)?;

    Ok(report.is_success())
}

/// List command implementation
fn cmd_list_docs(args: &GlobalArgs, overrides: &ConfigOverrides) -> Result<bool> {
    let build_system = args.build_system(overrides)?;
    let scan = build_system.list_docs().context("Documentation scan failed")?;
    let rendered = args.output.render_listing(&DocListing::from_scan(&scan))?;
    args.output.emit(&rendered)?;
    Ok(true)
}

fn run(cli: &Cli) -> Result<bool> {
    let args = GlobalArgs::from_cli(cli)?;
    tracing::debug!(site_root = %args.site_root.display(), output = %args.output_format, "resolved settings");

    let overrides = cli.command.overrides();
    match &cli.command {
        Commands::CheckSidebar { .. } => cmd_check_sidebar(&args, &overrides),
        Commands::ListDocs { .. } => cmd_list_docs(&args, &overrides),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("{} {:#}", "❌".bright_red(), e);
        return ExitCode::from(EXIT_SETUP_ERROR);
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_CHECK_FAILED),
        Err(e) => {
            eprintln!("{} {:#}", "❌".bright_red(), e);
            ExitCode::from(EXIT_SETUP_ERROR)
        },
    }
}
