//! Reply tone value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Tone of the forwarded summary email
///
/// Unknown or missing values degrade to [`Tone::Short`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Terse, bullet-first
    #[default]
    Short,
    /// Friendly and conversational
    Warm,
    /// Businesslike
    Formal,
}

impl Tone {
    /// Parse a candidate value, falling back to [`Tone::Short`]
    ///
    /// Matching is case-insensitive on the trimmed input.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "warm" => Self::Warm,
            "formal" => Self::Formal,
            _ => Self::Short,
        }
    }

    /// Wire label for this tone
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Warm => "warm",
            Self::Formal => "formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
