//! Calendar event entities
//!
//! Two shapes exist side by side: [`CalendarDetails`] is the string wire
//! form carried inside a forward package (what the language model emits),
//! and [`CalendarEvent`] is the resolved form with parsed timestamps used
//! by the invite encoder. All timestamps are naive; the pipeline performs
//! no timezone conversion.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Default duration applied when an end time is missing or unusable
const DEFAULT_END_MINUTES: i64 = 30;

/// A resolved calendar event with parsed timestamps
///
/// Invariant: `end >= start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title
    pub title: String,
    /// Start time (naive, no timezone conversion)
    pub start: NaiveDateTime,
    /// End time
    pub end: NaiveDateTime,
    /// Location, possibly empty
    pub location: String,
    /// Description, possibly empty
    pub description: String,
}

impl CalendarEvent {
    /// Create a new event with empty location and description
    #[must_use]
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            location: String::new(),
            description: String::new(),
        }
    }

    /// Set the location
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Get the duration in minutes
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Convert to the string wire form
    #[must_use]
    pub fn to_details(&self) -> CalendarDetails {
        CalendarDetails {
            title: self.title.clone(),
            start_datetime: self.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            end_datetime: self.end.format("%Y-%m-%dT%H:%M:%S").to_string(),
            timezone: String::new(),
            location: self.location.clone(),
            description: self.description.clone(),
        }
    }
}

/// String wire form of a calendar event as carried in a forward package
///
/// `Default` is the all-empty placeholder emitted when no event was found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDetails {
    /// Event title
    #[serde(default)]
    pub title: String,
    /// ISO-ish start timestamp; empty when no event exists
    #[serde(default)]
    pub start_datetime: String,
    /// ISO-ish end timestamp, possibly empty
    #[serde(default)]
    pub end_datetime: String,
    /// Advisory timezone name; carried through but never applied
    #[serde(default)]
    pub timezone: String,
    /// Location, possibly empty
    #[serde(default)]
    pub location: String,
    /// Description, possibly empty
    #[serde(default)]
    pub description: String,
}

impl CalendarDetails {
    /// Whether this is the all-empty placeholder (no start time)
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.start_datetime.trim().is_empty()
    }

    /// Resolve into a [`CalendarEvent`] with parsed timestamps
    ///
    /// Returns `None` when the start timestamp is empty or unparsable.
    /// A missing, unparsable, or inverted end time defaults to
    /// start + 30 minutes, preserving the `end >= start` invariant.
    #[must_use]
    pub fn resolve(&self) -> Option<CalendarEvent> {
        let start = Self::parse_datetime(&self.start_datetime)?;

        let end = Self::parse_datetime(&self.end_datetime)
            .filter(|end| *end >= start)
            .unwrap_or_else(|| start + Duration::minutes(DEFAULT_END_MINUTES));

        let title = if self.title.trim().is_empty() {
            "Event".to_string()
        } else {
            self.title.trim().to_string()
        };

        Some(
            CalendarEvent::new(title, start, end)
                .with_location(self.location.trim())
                .with_description(self.description.trim()),
        )
    }

    /// Parse an ISO-ish datetime string to a naive timestamp
    ///
    /// Accepts `2025-12-18T18:30[:00]`, space-separated variants, RFC 3339
    /// (the offset is discarded, keeping the local clock reading), and a
    /// bare date (midnight).
    #[must_use]
    pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }

        for format in [
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%dT%H:%M",
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%d %H:%M",
        ] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Some(dt);
            }
        }

        // RFC 3339 with an offset: keep the wall-clock reading, drop the offset
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Some(dt.naive_local());
        }

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0);
        }

        None
    }
}
