use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use ordo::cli::{Args, Command};
use ordo::renderer::OutputFormat;

fn make_args(args: &[&str]) -> Vec<String> {
    std::iter::once("ordo")
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_validate_many_bundles() {
    let args =
        Args::try_parse_from(make_args(&["validate", "a.json", "b.yaml", "--json"])).unwrap();
    assert!(!args.verbose);
    assert_eq!(args.config_dir, PathBuf::from("."));
    match args.command {
        Command::Validate { bundles, json } => {
            assert_eq!(bundles, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
            assert!(json);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_validate_requires_a_bundle() {
    let err = Args::try_parse_from(make_args(&["validate"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_render_with_script() {
    let args = Args::try_parse_from(make_args(&[
        "render",
        "wedding.json",
        "--script",
        "Ceremony",
        "-f",
        "docx",
        "-o",
        "out/wedding.docx",
        "-v",
        "-c",
        "settings",
    ]))
    .unwrap();

    assert!(args.verbose);
    assert_eq!(args.config_dir, PathBuf::from("settings"));
    match args.command {
        Command::Render { bundle, script, template, format, output } => {
            assert_eq!(bundle, PathBuf::from("wedding.json"));
            assert_eq!(script.as_deref(), Some("Ceremony"));
            assert_eq!(template, None);
            assert_eq!(format, OutputFormat::Docx);
            assert_eq!(output, Some(PathBuf::from("out/wedding.docx")));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_render_with_template() {
    let args = Args::try_parse_from(make_args(&[
        "render",
        "wedding.json",
        "-t",
        "wedding-full-script-spanish",
        "--format",
        "html",
    ]))
    .unwrap();
    match args.command {
        Command::Render { template, format, .. } => {
            assert_eq!(template.as_deref(), Some("wedding-full-script-spanish"));
            assert_eq!(format, OutputFormat::Html);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_script_conflicts_with_template() {
    let err = Args::try_parse_from(make_args(&[
        "render", "w.json", "-s", "Ceremony", "-t", "x", "-f", "pdf",
    ]))
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn test_render_requires_format() {
    let err = Args::try_parse_from(make_args(&["render", "w.json"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    let err = Args::try_parse_from(make_args(&["render", "w.json", "-f", "rtf"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn test_templates_command() {
    let args = Args::try_parse_from(make_args(&["templates"])).unwrap();
    assert!(matches!(args.command, Command::Templates));
}

#[test]
fn test_missing_subcommand() {
    let err = Args::try_parse_from(make_args(&[])).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ));
}
