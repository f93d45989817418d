//! Terminal output formatting for the traitmix CLI.
//!
//! Provides Cargo-style status output with right-aligned coloured verbs.
//! All status output goes to stderr; stdout is reserved for machine-readable output.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicUsize, Ordering};

/// ANSI escape codes.
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Width for right-aligned verb column.
const VERB_WIDTH: usize = 12;

/// Terminal-aware status printer.
///
/// Prints Cargo-style status lines to stderr with optional ANSI colours.
/// Colour is enabled when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Print a status line with a green bold verb.
    /// e.g. "   Combining 997 images"
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print a success/completion line with a green bold verb.
    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    /// Print an informational line with a cyan bold verb.
    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Print a warning line with a yellow bold verb.
    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    /// Print an error line with a red bold verb.
    pub fn error(&self, verb: &str, message: &str) {
        self.print_line(RED, verb, message);
    }

    /// Format a string as dim/grey.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Whether stderr is an interactive terminal.
    pub fn is_terminal(&self) -> bool {
        self.color
    }

    /// Format a diagnostic severity label with colour.
    pub fn severity(&self, label: &str, is_error: bool) -> String {
        let color = if is_error { RED } else { YELLOW };
        if self.color {
            format!("{BOLD}{color}{label}{RESET}")
        } else {
            label.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let mut stderr = io::stderr().lock();
        if self.color {
            let _ = writeln!(
                stderr,
                "{BOLD}{color}{verb:>VERB_WIDTH$}{RESET} {message}"
            );
        } else {
            let _ = writeln!(stderr, "{verb:>VERB_WIDTH$} {message}");
        }
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-line progress bar redrawn in place on stderr.
///
/// On a terminal the bar is redrawn whenever the shown percentage
/// changes; otherwise only the finished bar is printed.
pub struct Progress<'a> {
    printer: &'a Printer,
    label: String,
    total: usize,
    width: usize,
    /// Last drawn value in tenths of a percent.
    drawn: AtomicUsize,
}

impl<'a> Progress<'a> {
    pub fn new(printer: &'a Printer, label: &str, total: usize, width: usize) -> Self {
        let progress = Self {
            printer,
            label: label.to_string(),
            total,
            width,
            drawn: AtomicUsize::new(usize::MAX),
        };
        if printer.is_terminal() {
            progress.draw(0);
        }
        progress
    }

    /// Report `done` finished items. Safe to call from worker threads.
    pub fn update(&self, done: usize) {
        if !self.printer.is_terminal() {
            return;
        }
        let permille = permille(done, self.total);
        if self.drawn.swap(permille, Ordering::Relaxed) != permille {
            self.draw(done);
        }
    }

    /// Draw the completed bar and end the line.
    pub fn finish(self) {
        let line = self.line(self.total);
        let mut stderr = io::stderr().lock();
        if self.printer.is_terminal() {
            let _ = writeln!(stderr, "\r{line}");
        } else {
            let _ = writeln!(stderr, "{line}");
        }
    }

    fn draw(&self, done: usize) {
        let line = self.line(done);
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "\r{line}");
        let _ = stderr.flush();
    }

    fn line(&self, done: usize) -> String {
        let label = if self.printer.color {
            format!("{BOLD}{CYAN}{:>VERB_WIDTH$}{RESET}", self.label)
        } else {
            format!("{:>VERB_WIDTH$}", self.label)
        };
        format!(
            "{} |{}| {} ({}/{})",
            label,
            bar(done, self.total, self.width),
            percent(done, self.total),
            done.min(self.total),
            self.total
        )
    }
}

fn permille(done: usize, total: usize) -> usize {
    if total == 0 {
        return 1000;
    }
    done.min(total) * 1000 / total
}

/// Render a `#`/`-` bar of `width` cells: `bar(1, 2, 8)` → "####----".
pub fn bar(done: usize, total: usize, width: usize) -> String {
    let filled = if total == 0 {
        width
    } else {
        width * done.min(total) / total
    };
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// Percentage with one decimal: `percent(1, 3)` → "33.3%".
pub fn percent(done: usize, total: usize) -> String {
    if total == 0 {
        return "100.0%".to_string();
    }
    format!("{:.1}%", 100.0 * done.min(total) as f64 / total as f64)
}

/// Pluralize a count: `plural(1, "image", "images")` → "1 image".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_singular() {
        assert_eq!(plural(1, "image", "images"), "1 image");
    }

    #[test]
    fn test_plural_zero() {
        assert_eq!(plural(0, "image", "images"), "0 images");
    }

    #[test]
    fn test_plural_many() {
        assert_eq!(plural(5, "trait", "traits"), "5 traits");
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(0, 4, 8), "--------");
        assert_eq!(bar(1, 2, 8), "####----");
        assert_eq!(bar(4, 4, 8), "########");
        assert_eq!(bar(9, 4, 4), "####");
        assert_eq!(bar(0, 0, 4), "####");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(1, 3), "33.3%");
        assert_eq!(percent(997, 997), "100.0%");
        assert_eq!(percent(0, 0), "100.0%");
    }

    #[test]
    fn test_permille() {
        assert_eq!(permille(1, 2), 500);
        assert_eq!(permille(5, 0), 1000);
    }

    #[test]
    fn test_display_path_absolute() {
        use std::path::Path;
        // An absolute path outside cwd should stay absolute
        let p = Path::new("/nonexistent/path/to/file");
        assert_eq!(display_path(p), "/nonexistent/path/to/file");
    }
}
