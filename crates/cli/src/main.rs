mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use slatebook_core::config::CONFIG_FENCE_TAG;

#[derive(Debug, Parser)]
#[command(name = "slb", version, about = "Boot configuration tooling for slatebook pages")]
struct Cli {
    /// Diagnostic level on stderr (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Also write diagnostics to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the boot configuration from a page and print it as JSON
    Boot(BootArgs),

    /// Print the configuration script extracted from a page
    Extract(ExtractArgs),

    /// Print the value at a dot path in the loaded configuration
    Get(GetArgs),
}

#[derive(Debug, Args)]
pub struct BootArgs {
    /// Page file to read
    pub page: PathBuf,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Page file to read
    pub page: PathBuf,

    /// Fence tag to extract
    #[arg(long, default_value = CONFIG_FENCE_TAG)]
    pub tag: String,
}

#[derive(Debug, Args)]
pub struct GetArgs {
    /// Page file to read
    pub page: PathBuf,

    /// Dot-delimited config path (e.g. "editor.theme")
    pub path: String,

    /// JSON value printed when the path is absent
    #[arg(long, default_value = "null")]
    pub default: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_file.as_deref());

    match cli.command {
        Commands::Boot(args) => cmd::boot::run(&args.page),
        Commands::Extract(args) => cmd::extract::run(&args.page, &args.tag),
        Commands::Get(args) => cmd::get::run(&args.page, &args.path, &args.default),
    }
}
