//! Forward package entity
//!
//! The derived, user-facing summary bundle produced once per inbound email.
//! Immutable after construction; consumed by the mail relay and discarded.

use serde::{Deserialize, Serialize};

use crate::entities::CalendarDetails;
use crate::value_objects::{Category, Tone};

/// Maximum number of key points carried in a package
pub const MAX_KEY_POINTS: usize = 8;

/// Maximum number of links carried in a package
pub const MAX_LINKS: usize = 2;

/// A labeled hyperlink surfaced in the forwarded summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display label, defaults to "Link"
    pub label: String,
    /// Absolute HTTP(S) URL
    pub url: String,
}

impl Link {
    /// Create a link with the default label
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            label: "Link".to_string(),
            url: url.into(),
        }
    }

    /// Create a link with an explicit label; blank labels fall back to "Link"
    #[must_use]
    pub fn labeled(label: impl Into<String>, url: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            label: if label.trim().is_empty() {
                "Link".to_string()
            } else {
                label.trim().to_string()
            },
            url: url.into(),
        }
    }
}

/// The derived summary bundle for one inbound email
///
/// Invariants (enforced by the synthesizer, checked in tests):
/// - `key_points` holds between 1 and [`MAX_KEY_POINTS`] entries
/// - `links` holds at most [`MAX_LINKS`] entries, unique by url
/// - `has_calendar_event` is true only when `calendar_event` resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForwardPackage {
    /// Email category
    pub category: Category,
    /// Subject line for the forwarded summary
    pub forward_subject: String,
    /// Tone of the forwarded summary
    pub tone: Tone,
    /// Ordered key points, 1..=8
    pub key_points: Vec<String>,
    /// Ordered links, deduplicated by url, at most 2
    pub links: Vec<Link>,
    /// Whether a usable calendar event was found
    pub has_calendar_event: bool,
    /// The event wire form, or the all-empty placeholder
    pub calendar_event: CalendarDetails,
}

impl ForwardPackage {
    /// Synthesize a forward subject from the inbound subject
    ///
    /// `"{subject} – Key Info"`, or `"Fwd: Key Info"` when the inbound
    /// subject is blank.
    #[must_use]
    pub fn synthesize_subject(subject: &str) -> String {
        let subject = subject.trim();
        if subject.is_empty() {
            "Fwd: Key Info".to_string()
        } else {
            format!("{subject} – Key Info")
        }
    }

    /// Check the calendar invariant: the flag matches resolvability
    #[must_use]
    pub fn calendar_invariant_holds(&self) -> bool {
        self.has_calendar_event == self.calendar_event.resolve().is_some()
    }
}
