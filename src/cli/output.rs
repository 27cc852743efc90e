//! Colored status output on stderr.
//!
//! Stdout is reserved for command results (manifest XML, tables, JSON) so it
//! can be redirected; everything meant for the operator goes through here.

use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes progress, warnings and results to stderr.
#[derive(Debug, Clone, Copy)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    color: bool,
}

impl OutputManager {
    /// Colors are used only when stderr is a terminal.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            color: std::io::stderr().is_terminal(),
        }
    }

    fn stream(&self) -> StandardStream {
        let choice = if self.color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stderr(choice)
    }

    fn write_colored(&self, color: Option<Color>, bold: bool, prefix: &str, message: &str) -> std::io::Result<()> {
        let mut stream = self.stream();
        stream.set_color(ColorSpec::new().set_fg(color).set_bold(bold))?;
        write!(stream, "{}", prefix)?;
        stream.reset()?;
        writeln!(stream, "{}", message)
    }

    /// Only shown with `--verbose`.
    pub fn verbose(&self, message: &str) -> std::io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        self.write_colored(Some(Color::Cyan), false, "  ", message)
    }

    /// Step in progress, hidden by `--quiet`.
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(Some(Color::Blue), true, "→ ", message)
    }

    /// Completed step, hidden by `--quiet`.
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(Some(Color::Green), true, "✓ ", message)
    }

    /// Warnings are shown even with `--quiet`.
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.write_colored(Some(Color::Yellow), true, "warning: ", message)
    }

    /// Bold heading naming what the command is about to do.
    pub fn section(&self, title: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(Some(Color::White), true, "", title)
    }

    /// Detail line under a section heading.
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.write_colored(None, false, "    ", message)
    }
}
