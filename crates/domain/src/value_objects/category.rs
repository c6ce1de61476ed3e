//! Email category value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category assigned to an inbound email
///
/// Drives how the forwarded summary is framed. Unknown or missing values
/// always degrade to [`Category::Fyi`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// An event with a concrete date (celebration, conference, ...)
    Event,
    /// Scheduling back-and-forth (finding a slot, rescheduling)
    Scheduling,
    /// Something the recipient must do
    ActionRequired,
    /// Informational, no action needed
    #[default]
    Fyi,
    /// Invoices, receipts, payment reminders
    Billing,
    /// Recruiter outreach and hiring pipelines
    Recruiting,
    /// Personal correspondence
    Personal,
}

impl Category {
    /// Parse a candidate value, falling back to [`Category::Fyi`]
    ///
    /// Matching is exact on the trimmed wire form; anything else (including
    /// the empty string) is treated as `fyi`.
    #[must_use]
    pub fn parse_lenient(input: &str) -> Self {
        match input.trim() {
            "event" => Self::Event,
            "scheduling" => Self::Scheduling,
            "action_required" => Self::ActionRequired,
            "billing" => Self::Billing,
            "recruiting" => Self::Recruiting,
            "personal" => Self::Personal,
            _ => Self::Fyi,
        }
    }

    /// Wire label for this category
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Scheduling => "scheduling",
            Self::ActionRequired => "action_required",
            Self::Fyi => "fyi",
            Self::Billing => "billing",
            Self::Recruiting => "recruiting",
            Self::Personal => "personal",
        }
    }

    /// All categories in wire order
    #[must_use]
    pub const fn all() -> [Self; 7] {
        [
            Self::Event,
            Self::Scheduling,
            Self::ActionRequired,
            Self::Fyi,
            Self::Billing,
            Self::Recruiting,
            Self::Personal,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
