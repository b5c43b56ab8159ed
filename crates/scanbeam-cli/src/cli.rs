use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "scanbeam - prepares EGSnrc input files for a scanning-beam x-ray source and translates the resulting per-beamlet phase space files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for DEBUG, -vv for TRACE; INFO by default)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate one simulation input file per beamlet from the template.
    Prepare(PrepareArgs),
    /// Translate previously simulated per-beamlet phase space files by their
    /// lateral offsets.
    Translate(TranslateArgs),
    /// Write the default options and template files to start a new project.
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// Path to the run options file in TOML format.
    #[arg(short, long, default_value = "options.toml", value_name = "PATH")]
    pub config: PathBuf,

    /// Path to the base egsinp template file.
    #[arg(short, long, default_value = "template.egsinp", value_name = "PATH")]
    pub template: PathBuf,
}

#[derive(Args, Debug)]
pub struct TranslateArgs {
    /// Path to the run options file in TOML format.
    #[arg(short, long, default_value = "options.toml", value_name = "PATH")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the default options file.
    #[arg(short, long, default_value = "options.toml", value_name = "PATH")]
    pub config: PathBuf,

    /// Where to write the default template file.
    #[arg(short, long, default_value = "template.egsinp", value_name = "PATH")]
    pub template: PathBuf,

    /// Overwrite files that already exist.
    #[arg(long)]
    pub force: bool,
}
