use colored::{ColoredString, Colorize};
use declarative::{Event, Level, Reporter};

/// Print a warning message
pub fn warn(msg: &str) {
    eprintln!("{}: {}", level_prefix(Level::Warning), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}: {}", level_prefix(Level::Error), msg);
}

/// Print a dim/muted message
pub fn dim(msg: &str) {
    println!("  {}", msg.dimmed());
}

/// Print a header/title
pub fn header(title: &str) {
    println!();
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count()).dimmed());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", key.dimmed(), value);
}

// ============================================================================
// Event Output
// ============================================================================

/// Colored level word; plain text when color is off
pub fn level_prefix(level: Level) -> ColoredString {
    match level {
        Level::Info => level.as_str().cyan(),
        Level::Notice => level.as_str().normal(),
        Level::Warning => level.as_str().yellow(),
        Level::Error => level.as_str().red().bold(),
    }
}

/// Where an event line goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Render an event as `<Level>: <message>` and pick its stream
pub fn event_line(event: &Event) -> (Stream, String) {
    let level = event.level();
    let stream = if level.is_diagnostic() {
        Stream::Stderr
    } else {
        Stream::Stdout
    };
    (stream, format!("{}: {}", level_prefix(level), event.message()))
}

/// Prints events as they arrive: notices and info on stdout, warnings and
/// errors on stderr
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// `quiet` drops info lines
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &Event) {
        if self.quiet && event.level() == Level::Info {
            return;
        }
        match event_line(event) {
            (Stream::Stdout, line) => println!("{line}"),
            (Stream::Stderr, line) => eprintln!("{line}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
