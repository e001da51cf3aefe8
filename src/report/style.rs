use crate::lifecycle::StatusTier;
use ansi_term::{Colour, Style};

/// A presentation hint attached to every line of a report.
///
/// Sinks decide how (and whether) a token is turned into terminal styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleToken {
    Plain,
    Header,
    Good,
    Caution,
    Alert,
    Muted,
    Anomaly,
}

impl StyleToken {
    pub fn ansi(&self) -> Style {
        match self {
            StyleToken::Plain => Style::new(),
            StyleToken::Header => Style::new().bold(),
            StyleToken::Good => Colour::Green.normal(),
            StyleToken::Caution => Colour::Yellow.normal(),
            StyleToken::Alert => Colour::Red.normal(),
            StyleToken::Muted => Colour::Fixed(8).normal(),
            StyleToken::Anomaly => Colour::Purple.normal(),
        }
    }
}

impl StatusTier {
    pub fn style(&self) -> StyleToken {
        match self {
            StatusTier::Fresh => StyleToken::Good,
            StatusTier::Warning => StyleToken::Caution,
            StatusTier::Critical => StyleToken::Alert,
            StatusTier::Expired => StyleToken::Muted,
            StatusTier::Invalid => StyleToken::Anomaly,
        }
    }
}
