//! Heuristic event detection
//!
//! The non-model fallback: finds the first plausible date/time in an email
//! body, guesses a duration from meeting keywords, and pulls a location
//! phrase out of the text. Only one event per message is ever detected;
//! multiple candidate dates are not disambiguated.

use aho_corasick::AhoCorasick;
use chrono::{Duration, Local, NaiveDateTime};
use domain::CalendarEvent;
use tracing::debug;

use crate::date_search::{DateBias, search_first_datetime};

/// Keywords in the subject that mark a short meeting
const MEETING_SUBJECT_KEYWORDS: [&str; 4] = ["meet", "meeting", "sync", "call"];

/// Keywords in the body that mark a short meeting
const MEETING_BODY_KEYWORDS: [&str; 4] = ["zoom", "google meet", "meet", "call"];

/// Detect an event in an email, relative to the local wall clock
#[must_use]
pub fn detect_event(subject: &str, body: &str) -> Option<CalendarEvent> {
    detect_event_at(subject, body, Local::now().naive_local())
}

/// Detect an event in an email, relative to an explicit reference instant
///
/// The date search is biased toward the future first; when that finds
/// nothing, a second pass allows matches within the current day/week.
/// Returns `None` when the body is empty or holds nothing date-like.
#[must_use]
pub fn detect_event_at(subject: &str, body: &str, now: NaiveDateTime) -> Option<CalendarEvent> {
    let text = body.trim();
    if text.is_empty() {
        return None;
    }

    let start = search_first_datetime(text, now, DateBias::Future)
        .or_else(|| search_first_datetime(text, now, DateBias::CurrentPeriod))?;

    let duration = guess_duration(subject, body);
    let end = start + duration;
    let location = extract_location(text);

    debug!(start = %start, minutes = duration.num_minutes(), location = %location, "Heuristic event detected");

    let title = if subject.is_empty() { "Event" } else { subject };
    Some(CalendarEvent::new(title, start, end).with_location(location))
}

/// Guess a duration: 30 minutes for meetings, 2 hours for other events
fn guess_duration(subject: &str, body: &str) -> Duration {
    let is_meeting = contains_any(subject, &MEETING_SUBJECT_KEYWORDS)
        || contains_any(body, &MEETING_BODY_KEYWORDS);

    if is_meeting {
        Duration::minutes(30)
    } else {
        Duration::hours(2)
    }
}

/// Case-insensitive multi-keyword scan
fn contains_any(text: &str, keywords: &[&str]) -> bool {
    AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(keywords)
        .map_or(false, |ac| ac.is_match(text))
}

/// Whether a byte offset sits on a word boundary (start or non-alphanumeric)
fn at_word_boundary(text: &str, index: usize) -> bool {
    index == 0
        || text[..index]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_ascii_alphanumeric())
}

/// Extract the first "at <place>" / "in <place>" phrase
///
/// The capture is a run of alphanumerics, spaces and `,#-()` after the
/// keyword, trimmed of trailing punctuation. First match in document order;
/// empty when nothing matches.
fn extract_location(text: &str) -> String {
    let mut candidates: Vec<usize> = Vec::new();
    for keyword in ["at", "in"] {
        for (index, _) in text.match_indices(keyword) {
            let after = index + keyword.len();
            if at_word_boundary(text, index)
                && text[after..].chars().next().is_some_and(char::is_whitespace)
            {
                candidates.push(after);
            }
        }
    }
    candidates.sort_unstable();

    for after in candidates {
        let rest = text[after..].trim_start();
        let captured: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | ',' | '#' | '-' | '(' | ')'))
            .collect();
        let captured = captured.trim_end_matches([' ', '.', ';', ',']);
        if !captured.is_empty() {
            return captured.to_string();
        }
    }

    String::new()
}
