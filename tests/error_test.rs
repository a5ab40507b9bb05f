use ordo::error::Error;

#[test]
fn test_io_error_conversion() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: Error = io.into();
    assert!(matches!(err, Error::IoError(_)));
    assert_eq!(err.to_string(), "IO error: missing.");
}

#[test]
fn test_display_messages() {
    assert_eq!(
        Error::ConfigError("x".to_string()).to_string(),
        "Configuration error: x."
    );
    assert_eq!(
        Error::NotFound { kind: "Script".to_string(), id: "Vigil".to_string() }.to_string(),
        "Script 'Vigil' not found."
    );
    assert_eq!(
        Error::LookupError("connection reset".to_string()).to_string(),
        "Lookup error: connection reset."
    );
}

#[test]
fn test_render_error_hides_reason() {
    let err = Error::render("PDF", "xref table overflow");
    assert_eq!(err.to_string(), "Failed to generate PDF document.");
    match err {
        Error::RenderError { format, reason } => {
            assert_eq!(format, "PDF");
            assert_eq!(reason, "xref table overflow");
        }
        other => panic!("unexpected error {other:?}"),
    }
}
