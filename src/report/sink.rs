use crate::report::StyleToken;
use clap::ValueEnum;
use crossterm::tty::IsTty;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Where report lines go.
pub trait ReportSink {
    fn line(&mut self, style: StyleToken, text: &str) -> io::Result<()>;
}

/// When to paint report lines.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn enabled(&self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                io::stdout().is_tty() && std::env::var_os("NO_COLOR").is_none()
            }
        }
    }
}

/// A sink writing to any byte stream, painting lines with ANSI codes when
/// color is enabled.
pub struct Terminal<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> Terminal<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Terminal<io::Stdout> {
    pub fn stdout(mode: ColorMode) -> Self {
        Self::new(io::stdout(), mode.enabled())
    }
}

impl<W: Write> ReportSink for Terminal<W> {
    fn line(&mut self, style: StyleToken, text: &str) -> io::Result<()> {
        if self.color && style != StyleToken::Plain {
            writeln!(self.out, "{}", style.ansi().paint(text))
        } else {
            writeln!(self.out, "{text}")
        }
    }
}

/// A line captured by the recording sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub style: StyleToken,
    pub text: String,
}

impl ReportSink for Vec<StyledLine> {
    fn line(&mut self, style: StyleToken, text: &str) -> io::Result<()> {
        self.push(StyledLine {
            style,
            text: text.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_terminal() {
        let mut sink = Terminal::new(Vec::new(), false);
        sink.line(StyleToken::Alert, "near expiry").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "near expiry\n");
    }

    #[test]
    fn test_colored_terminal() {
        let mut sink = Terminal::new(Vec::new(), true);
        sink.line(StyleToken::Alert, "near expiry").unwrap();
        sink.line(StyleToken::Plain, "plain").unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "\u{1b}[31mnear expiry\u{1b}[0m\nplain\n");
    }

    #[test]
    fn test_recording_sink() {
        let mut lines: Vec<StyledLine> = Vec::new();
        lines.line(StyleToken::Good, "ok").unwrap();
        assert_eq!(
            lines,
            vec![StyledLine {
                style: StyleToken::Good,
                text: "ok".to_string()
            }]
        );
    }
}
