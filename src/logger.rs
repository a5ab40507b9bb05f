/// Initializes env_logger for the `ordo` binary.
///
/// `--verbose` enables debug output; otherwise only warnings and errors are
/// printed, which is where resolver fallbacks and export failures show up.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();
}
