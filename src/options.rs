use std::fmt::Display;

use clap::Parser;

/// Preprocessing applied by the tokenizer before training and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerMode {
    Identity,
    Complex,
    Custom,
}
impl Display for TokenizerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Identity => "identity",
            Self::Complex => "complex",
            Self::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

impl TokenizerMode {
    pub fn from_str(s: &str) -> TokenizerMode {
        match s {
            "identity" => TokenizerMode::Identity,
            "complex" => TokenizerMode::Complex,
            "custom" => TokenizerMode::Custom,
            _ => TokenizerMode::Complex,
        }
    }
}

/// Train the headline classifier and report its quality.
#[derive(Debug, Parser)]
#[command(name = "rs_headlines")]
pub struct Options {
    /// Tokenizer mode: identity, complex or custom
    #[arg(long, default_value = "complex")]
    pub mode: String,

    /// Sweep classification thresholds and print the ROC points per
    /// category (slow on large test sets)
    #[arg(long)]
    pub roc: bool,

    /// Assign categories to the unlabeled headlines after evaluation
    #[arg(long)]
    pub predict_unlabeled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_mode_falls_back_to_complex() {
        assert_eq!(TokenizerMode::from_str("identity"), TokenizerMode::Identity);
        assert_eq!(TokenizerMode::from_str("custom"), TokenizerMode::Custom);
        assert_eq!(TokenizerMode::from_str("whatever"), TokenizerMode::Complex);
    }
}
