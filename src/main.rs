//! ordo's main application entry point.
//! Parses arguments, loads settings and dispatches to the validate, render
//! and templates commands.

use std::path::{Path, PathBuf};

use ordo::{
    builders::catalog,
    cli::{get_args, Args, Command},
    config::{load_bundle, load_settings, Settings},
    constants::CONFIG_FILES,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{write_artifact, Processor, Target},
    renderer::OutputFormat,
    validator::{format_report, EventTypeReport, Summary},
};

/// Main application entry point.
#[tokio::main]
async fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args).await {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Arguments
/// * `args` - Parsed command line arguments
///
/// # Returns
/// * `Result<()>` - Success or error status of the command
async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args.config_dir, &CONFIG_FILES)?;

    match args.command {
        Command::Validate { bundles, json } => {
            let summary = validate(&bundles)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", format_report(&summary));
            }
            if !summary.all_valid {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Render {
            bundle,
            script,
            template,
            format,
            output,
        } => {
            let target = match script.as_deref() {
                Some(name) => Target::Script(name),
                None => Target::Template(template.as_deref()),
            };
            render(&settings, &bundle, target, format, output.as_deref()).await
        }
        Command::Templates => {
            for (domain, templates) in catalog() {
                println!("{domain}:");
                for (id, name) in templates {
                    println!("  {id}  ({name})");
                }
            }
            Ok(())
        }
    }
}

/// Validates each bundle against its own parish resources.
fn validate(paths: &[PathBuf]) -> Result<Summary> {
    let reports = paths
        .iter()
        .map(|path| {
            let bundle = load_bundle(path)?;
            Ok(EventTypeReport::new(&bundle.event_type, &bundle.context))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Summary::from_reports(reports))
}

async fn render(
    settings: &Settings,
    path: &Path,
    target: Target<'_>,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let bundle = load_bundle(path)?;
    let processor = Processor::new(settings);
    let artifact = processor
        .render_bundle(&bundle, &bundle.entities, target, format)
        .await?;
    let written = write_artifact(&artifact, output, Path::new("."))?;
    println!("Rendered '{}'.", written.display());
    Ok(())
}
