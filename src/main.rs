use std::{
    fs::{self, File},
    io::{self, BufWriter, IsTerminal},
    path::Path,
    process::ExitCode,
};
use anyhow::{anyhow, Context};
use scopeguard::defer;

use ucdgen_logging::{get_logger, log_error, log_info, log_verbose, log_warning, set_logger, ConsoleOutput, LogCategory, Logger};
use ucdgen_unicode_data::{parse_unicode_data, write_name_blob, write_tables, TableNames, UnicodeTables};

mod cli;
use cli::CliArgs;

mod source;

pub const LOG_CAT : LogCategory = LogCategory::new("Main");

fn setup_logger(args: &CliArgs) -> anyhow::Result<()> {
    let logger = Logger::new();
    logger.set_max_level(args.log_level());

    // stdout carries the generated source, so the console output goes to stderr
    let console = if args.no_color || !io::stderr().is_terminal() {
        ConsoleOutput::Plain
    } else {
        ConsoleOutput::Colored
    };
    logger.set_console_output(console);

    if let Some(path) = &args.log_file {
        let file = File::create(path).with_context(|| format!("failed to create log file '{}'", path.display()))?;
        logger.add_writer(Box::new(file)).map_err(|_| anyhow!("no free log writer slot"))?;
    }

    set_logger(logger).map_err(|_| anyhow!("logger was already set"))?;
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse_args();

    if let Err(err) = setup_logger(&args) {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }
    defer! {
        if let Some(logger) = get_logger() {
            logger.flush();
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log_error!(LOG_CAT, "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> anyhow::Result<()> {
    let text = source::load(&args.source_settings())?;

    // Everything is parsed before anything is written, a malformed table produces no output
    let tables = parse_unicode_data(&text).context("failed to parse the unicode data table")?;
    log_info!(LOG_CAT, "{} codepoints, carrying {} distinct values", tables.len(), tables.values().len());

    if args.rs {
        let mut writer = BufWriter::new(io::stdout().lock());
        write_tables(&mut writer, &tables, &TableNames::default()).context("failed to write the tables to stdout")?;
    }

    if args.strings {
        write_names(&args.strings_out, &tables)?;
    }

    if !args.emits_anything() {
        log_warning!(LOG_CAT, "neither --rs nor --strings was passed, nothing was written");
    }
    Ok(())
}

fn write_names(path: &Path, tables: &UnicodeTables) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("failed to create '{}'", dir.display()))?;
    }

    let file = File::create(path).with_context(|| format!("failed to create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_name_blob(&mut writer, tables).with_context(|| format!("failed to write names to '{}'", path.display()))?;

    log_verbose!(LOG_CAT, "wrote {} names to '{}'", tables.names().len(), path.display());
    Ok(())
}
