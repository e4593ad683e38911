use core::{
    fmt::{self, Arguments, Display},
    sync::atomic::{self, AtomicU8},
    time::Duration,
};
use std::{
    fmt::Write as _,
    io::{self, Write},
    time::Instant,
};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;

static LOGGER : OnceCell<Logger> = OnceCell::new();

/// Install the global logger.
///
/// The logger can only be installed once, if one was already set, the provided logger is handed back as the error.
pub fn set_logger(logger: Logger) -> Result<&'static Logger, Logger> {
    LOGGER.try_insert(logger).map_err(|(_, logger)| logger)
}

/// Get the global logger, if one was installed
pub fn get_logger() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Logging level
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    /// Severe error: the run can't continue
    Severe,
    /// Error: the run will fail, but more context may follow
    Error,
    /// Warning: the output is still produced, but may not be what was intended
    Warning,
    /// General info
    Info,
    /// Verbose info
    Verbose,
    /// Debug info (includes verbose info)
    Debug,
}

impl LogLevel {
    /// Pick a level from a verbosity offset relative to `Info`, e.g. `-1` is `Warning`, `2` is `Debug`
    pub fn from_verbosity(verbosity: i8) -> Self {
        match verbosity {
            i8::MIN..=-3 => LogLevel::Severe,
            -2           => LogLevel::Error,
            -1           => LogLevel::Warning,
            0            => LogLevel::Info,
            1            => LogLevel::Verbose,
            _            => LogLevel::Debug,
        }
    }

    /// Tag including terminal color escape codes
    pub const fn colored_tag(self) -> &'static str {
        match self {
            LogLevel::Severe  => "\x1B[1m\x1B[41m\x1B[30m[SEVERE ]\x1B[0m",
            LogLevel::Error   =>                "\x1B[91m[ERROR  ]\x1B[0m",
            LogLevel::Warning =>                "\x1B[93m[WARNING]\x1B[0m",
            LogLevel::Info    =>                "\x1B[37m[INFO   ]\x1B[0m",
            LogLevel::Verbose =>                "\x1B[90m[VERBOSE]\x1B[0m",
            LogLevel::Debug   =>                "\x1B[94m[DEBUG  ]\x1B[0m",
        }
    }

    /// Tag without any escape codes
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Severe  => "[SEVERE ]",
            LogLevel::Error   => "[ERROR  ]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Info    => "[INFO   ]",
            LogLevel::Verbose => "[VERBOSE]",
            LogLevel::Debug   => "[DEBUG  ]",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Log category
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogCategory {
    category     : &'static str,
    sub_category : Option<&'static str>
}

impl LogCategory {
    pub const fn new(name: &'static str) -> Self {
        Self { category: name, sub_category: None }
    }

    pub const fn new_with_sub(name: &'static str, sub_name: &'static str) -> Self {
        Self { category: name, sub_category: Some(sub_name) }
    }
}

impl Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_category {
            Some(sub) => write!(f, "{}({sub})", self.category),
            None => f.write_str(self.category),
        }
    }
}

/// Additional info about where the log occured
#[derive(Clone, Copy, Debug)]
pub struct LogLocation {
    file    : &'static str,
    line    : u32,
    elapsed : Duration,
}

impl LogLocation {
    /// Creates a new log location
    pub const fn new(file: &'static str, line: u32, elapsed: Duration) -> Self {
        Self { file, line, elapsed }
    }

    /// Get the file name where the log occured
    pub const fn file(&self) -> &str {
        self.file
    }

    /// Get the line where the log occurred
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Time since the logger was created
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

struct LogLocationFormatter<'a> {
    loc   : &'a LogLocation,
    level : LogLevel
}

impl<'a> LogLocationFormatter<'a> {
    fn new(loc: &'a LogLocation, level: LogLevel) -> Self {
        Self { loc, level }
    }
}

impl<'a> Display for LogLocationFormatter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Severe |
            LogLevel::Error |
            LogLevel::Debug => write!(f, " ({}:{})", self.loc.file(), self.loc.line()),
            LogLevel::Warning |
            LogLevel::Info |
            LogLevel::Verbose => Ok(()),
        }
    }
}

#[macro_export]
macro_rules! log_location {
    ($logger:expr) => {
        $crate::LogLocation::new(file!(), line!(), $logger.elapsed())
    };
}

/// Where console output of the logger goes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ConsoleOutput {
    /// Don't log to the console
    None,
    /// Log to stderr without escape codes
    Plain,
    /// Log to stderr with colored level tags
    Colored,
}

pub type LogWriter = Box<dyn Write + Send>;

struct LoggerState {
    writers:      [Option<LogWriter>; Self::MAX_WRITERS],
    cache:        String,
    always_flush: bool,
    console:      ConsoleOutput,
}

impl LoggerState {
    const MAX_WRITERS: usize = 8;
    const CACHE_FLUSH_LIMIT: usize = 4 * 1024;

    fn new() -> Self {
        Self {
            writers: Default::default(),
            cache: String::new(),
            always_flush: false,
            console: ConsoleOutput::Plain,
        }
    }

    fn format_message(&mut self, fmt_args: Arguments) {
        if self.cache.capacity() == 0 {
            self.cache.reserve(Self::CACHE_FLUSH_LIMIT);
        }
        // Writing into a `String` can't fail
        _ = self.cache.write_fmt(fmt_args);
    }

    fn flush_when_needed(&mut self) {
        if self.always_flush || self.cache.len() > Self::CACHE_FLUSH_LIMIT {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.cache.is_empty() {
            return;
        }

        if self.console != ConsoleOutput::None {
            let mut stderr = io::stderr().lock();
            _ = stderr.write_all(self.cache.as_bytes());
            _ = stderr.flush();
        }

        for writer in self.writers.iter_mut().flatten() {
            _ = writer.write_all(self.cache.as_bytes());
            _ = writer.flush();
        }
        self.cache.clear();
    }
}

/// Logger
///
/// Supports up to 8 writers next to the console, e.g. a log file.
pub struct Logger {
    state:         Mutex<LoggerState>,
    max_log_level: AtomicU8,
    start:         Instant,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState::new()),
            max_log_level: AtomicU8::new(LogLevel::Info as u8),
            start: Instant::now(),
        }
    }

    /// Set the maximum log level (severe == lowest, debug == highest)
    pub fn set_max_level(&self, level: LogLevel) {
        self.max_log_level.store(level as u8, atomic::Ordering::Relaxed)
    }

    /// Check if a message at `level` would be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.max_log_level.load(atomic::Ordering::Relaxed)
    }

    /// Set whether the logger should flush after each write
    pub fn set_always_flush(&self, always_flush: bool) {
        self.state.lock().always_flush = always_flush;
    }

    /// Set how the logger writes to the console
    pub fn set_console_output(&self, console: ConsoleOutput) {
        let mut state = self.state.lock();

        // Flush first, messages logged before this call still go out the way they were configured
        state.flush();
        state.console = console;
    }

    /// Add a writer.
    ///
    /// Returns `Ok(index)` if space was available. This index can be used to remove the writer later on.
    ///
    /// Otherwise returns an `Err` with the provided writer
    pub fn add_writer(&self, writer: LogWriter) -> Result<usize, LogWriter> {
        let mut state = self.state.lock();

        let empty = state.writers.iter_mut().enumerate().find(|val| val.1.is_none());
        match empty {
            Some((id, slot)) => {
                *slot = Some(writer);
                Ok(id)
            },
            None => Err(writer),
        }
    }

    /// Remove a writer from the logger, pending messages are flushed to it first
    pub fn remove_writer(&self, index: usize) -> Option<LogWriter> {
        let mut state = self.state.lock();
        state.flush();
        state.writers.get_mut(index).and_then(Option::take)
    }

    /// Time since the logger was created
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log a plain message
    pub fn log(&self, category: LogCategory, level: LogLevel, loc: LogLocation, text: &str) {
        self.log_fmt(category, level, loc, format_args!("{text}"));
    }

    pub fn log_fmt(&self, category: LogCategory, level: LogLevel, loc: LogLocation, format: Arguments) {
        if !self.is_enabled(level) {
            return;
        }

        let loc_formatter = LogLocationFormatter::new(&loc, level);
        let elapsed = loc.elapsed().as_secs_f64();

        let mut state = self.state.lock();
        let tag = match state.console {
            ConsoleOutput::Colored => level.colored_tag(),
            _ => level.tag(),
        };
        state.format_message(format_args!("[{elapsed:>9.3}] {tag} [{category}]{loc_formatter}: "));
        state.format_message(format);
        state.cache.push('\n');
        state.flush_when_needed();
    }

    pub fn flush(&self) {
        self.state.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Log to the global logger, does nothing if no logger was installed
#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $($arg:tt)+) => {
        if let Some(logger) = $crate::get_logger() {
            logger.log_fmt($category, $level, $crate::log_location!(logger), format_args!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! log_severe {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Severe, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Debug, $($arg)+)
    };
}
