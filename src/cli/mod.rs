//! Command-line parsing for the fringe pattern generator.
//!
//! The binary takes exactly one positional argument: the path to the XML
//! configuration file. Everything else — geometry, wave parameters,
//! calibration sources, output locations — lives in that file, so batch runs
//! are fully described by a single artifact.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fringe",
    version,
    about = "Sine-wave fringe pattern generator with brightness calibration"
)]
pub struct Cli {
    /// Absolute path to the XML configuration file.
    pub config: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requires_the_config_argument() {
        assert!(Cli::try_parse_from(["fringe"]).is_err());
    }

    #[test]
    fn accepts_exactly_one_path() {
        let cli = Cli::try_parse_from(["fringe", "/etc/scan/config.xml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("/etc/scan/config.xml"));
        assert!(Cli::try_parse_from(["fringe", "a.xml", "b.xml"]).is_err());
    }
}
