use std::path::PathBuf;
use clap::{ArgAction, Parser};
use ucdgen_logging::LogLevel;

use crate::source::{SourceSettings, DEFAULT_SOURCE_URL};

/// Generate the codepoint tables and name blob from UnicodeData.txt
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Print the record and value arrays as rust source to stdout
    #[arg(long)]
    pub rs: bool,

    /// Write the null separated name blob
    #[arg(long)]
    pub strings: bool,

    /// Local copy of UnicodeData.txt, used instead of fetching when it exists
    #[arg(long, env = "UCDGEN_SOURCE", default_value = "UnicodeData.txt")]
    pub source: PathBuf,

    /// Where to fetch UnicodeData.txt from when there is no local copy
    #[arg(long, env = "UCDGEN_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub url: String,

    /// Store a fetched table at the `--source` path
    #[arg(long, default_value_t = false)]
    pub save_source: bool,

    /// Output path of the name blob
    #[arg(long, default_value = "src/ucd_strings.txt")]
    pub strings_out: PathBuf,

    /// More logging, can be repeated
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less logging, can be repeated
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
    pub quiet: u8,

    /// Also write the log to a file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Don't color log levels
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn log_level(&self) -> LogLevel {
        let verbosity = self.verbose.min(8) as i8 - self.quiet.min(8) as i8;
        LogLevel::from_verbosity(verbosity)
    }

    pub fn source_settings(&self) -> SourceSettings {
        SourceSettings {
            path: self.source.clone(),
            url: self.url.clone(),
            save_fetched: self.save_source,
        }
    }

    /// Whether any artifact was requested
    pub fn emits_anything(&self) -> bool {
        self.rs || self.strings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn flags() {
        let args = CliArgs::try_parse_from(["ucdgen", "--rs", "--strings", "--strings-out", "out/names.bin", "-vv"]).unwrap();
        assert!(args.rs);
        assert!(args.strings);
        assert!(args.emits_anything());
        assert_eq!(args.strings_out, PathBuf::from("out/names.bin"));
        assert_eq!(args.log_level(), LogLevel::Debug);
    }

    #[test]
    pub fn artifacts_are_opt_in() {
        let args = CliArgs::try_parse_from(["ucdgen", "--source", "cache/UnicodeData.txt", "--save-source"]).unwrap();
        assert!(!args.emits_anything());
        assert_eq!(args.log_level(), LogLevel::Info);

        let settings = args.source_settings();
        assert_eq!(settings.path, PathBuf::from("cache/UnicodeData.txt"));
        assert!(settings.save_fetched);
    }

    #[test]
    pub fn quiet_lowers_level() {
        let args = CliArgs::try_parse_from(["ucdgen", "-qq"]).unwrap();
        assert_eq!(args.log_level(), LogLevel::Error);
        assert!(CliArgs::try_parse_from(["ucdgen", "-q", "-v"]).is_err());
    }
}
