//! Command-line interface implementation for ordo.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::renderer::OutputFormat;

/// Command-line arguments structure for ordo.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "ordo: liturgical event scripts, validated and rendered",
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory to read ordo.json / ordo.yml / ordo.yaml settings from
    #[arg(short, long, global = true, value_name = "DIR", default_value = ".")]
    pub config_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check event type bundles for placeholder and reference problems
    Validate {
        /// Bundle files (JSON or YAML)
        #[arg(value_name = "BUNDLE", required = true)]
        bundles: Vec<PathBuf>,

        /// Print the reports as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a bundle to PDF, DOCX or HTML
    Render {
        /// Bundle file (JSON or YAML)
        #[arg(value_name = "BUNDLE")]
        bundle: PathBuf,

        /// Name of the event type script to render
        #[arg(short, long, conflicts_with = "template")]
        script: Option<String>,

        /// Template id; unknown ids fall back to the domain default
        #[arg(short, long)]
        template: Option<String>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: OutputFormat,

        /// Output file; defaults to the artifact name in the current directory
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List registered template ids per domain
    Templates,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Returns
/// * `Args` - Parsed command line arguments
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if matches!(
                e.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::MissingSubcommand
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
