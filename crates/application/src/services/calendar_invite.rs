//! Calendar invite encoding
//!
//! Renders a resolved [`CalendarEvent`] as a single-VEVENT iCalendar
//! document. Timestamps are emitted from the naive event times with a
//! literal `Z` suffix and no timezone conversion; downstream clients
//! expect this historical behavior, so it must not change.

use chrono::{NaiveDateTime, Utc};
use domain::{CalendarDetails, CalendarEvent};
use uuid::Uuid;

use crate::event_detector::{detect_event, detect_event_at};

/// Product identifier stamped into every emitted document
const PRODID: &str = "-//Mailsift Assistant//EN";

/// Encode a resolved event as an iCalendar document
///
/// Every invocation gets a fresh UID. `LOCATION` and `DESCRIPTION` are
/// omitted entirely when empty.
#[must_use]
pub fn build_ics(event: &CalendarEvent) -> String {
    let uid = format!("{}@mailsift", Uuid::new_v4());
    render_ics(event, &uid, Utc::now().naive_utc())
}

/// Render the document with explicit UID and DTSTAMP
fn render_ics(event: &CalendarEvent, uid: &str, stamped_at: NaiveDateTime) -> String {
    let summary = {
        let s = sanitize(&event.title);
        if s.is_empty() { "Event".to_string() } else { s }
    };
    let location = sanitize(&event.location);
    let description = sanitize(&event.description);

    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("UID:{uid}"),
        format!("DTSTAMP:{}", format_timestamp(stamped_at)),
        format!("DTSTART:{}", format_timestamp(event.start)),
        format!("DTEND:{}", format_timestamp(event.end)),
        format!("SUMMARY:{summary}"),
    ];
    if !location.is_empty() {
        lines.push(format!("LOCATION:{location}"));
    }
    if !description.is_empty() {
        lines.push(format!("DESCRIPTION:{description}"));
    }
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Format a naive timestamp in the Zulu wire form, without conversion
fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Flatten newlines to spaces before embedding a field
fn sanitize(field: &str) -> String {
    field.replace('\n', " ").trim().to_string()
}

/// Encode the wire-form details carried in a forward package
///
/// Returns `None` when the start timestamp is blank or unparsable; a
/// missing end defaults to start + 30 minutes via the resolution rules.
#[must_use]
pub fn build_ics_from_details(details: &CalendarDetails) -> Option<String> {
    details.resolve().map(|event| build_ics(&event))
}

/// Detect an event heuristically and encode it in one step
#[must_use]
pub fn detect_event_and_build_ics(subject: &str, body: &str) -> Option<String> {
    detect_event(subject, body).map(|event| build_ics(&event))
}

/// As [`detect_event_and_build_ics`], with an explicit reference instant
#[must_use]
pub fn detect_event_and_build_ics_at(
    subject: &str,
    body: &str,
    now: NaiveDateTime,
) -> Option<String> {
    detect_event_at(subject, body, now).map(|event| build_ics(&event))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    fn sample_event() -> CalendarEvent {
        CalendarEvent::new(
            "Degree Celebration",
            ts(2025, 12, 18, 18, 30),
            ts(2025, 12, 18, 20, 30),
        )
        .with_location("EagleBank Arena")
    }

    /// Pull a property value out of an emitted document
    fn property<'a>(ics: &'a str, key: &str) -> Option<&'a str> {
        ics.lines()
            .find_map(|line| line.strip_prefix(&format!("{key}:")))
    }

    #[test]
    fn document_envelope() {
        let ics = build_ics(&sample_event());
        assert!(ics.starts_with("BEGIN:VCALENDAR\nVERSION:2.0\n"));
        assert!(ics.contains("PRODID:-//Mailsift Assistant//EN"));
        assert!(ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.contains("METHOD:PUBLISH"));
        assert!(ics.contains("BEGIN:VEVENT"));
        assert!(ics.ends_with("END:VEVENT\nEND:VCALENDAR\n"));
    }

    #[test]
    fn dtstart_round_trips_to_original_naive_start() {
        let event = sample_event();
        let ics = build_ics(&event);

        let dtstart = property(&ics, "DTSTART").expect("DTSTART present");
        let parsed = NaiveDateTime::parse_from_str(dtstart, "%Y%m%dT%H%M%SZ").expect("parses");
        assert_eq!(parsed, event.start);

        let dtend = property(&ics, "DTEND").expect("DTEND present");
        let parsed = NaiveDateTime::parse_from_str(dtend, "%Y%m%dT%H%M%SZ").expect("parses");
        assert_eq!(parsed, event.end);
    }

    #[test]
    fn timestamps_use_literal_z_without_conversion() {
        let ics = build_ics(&sample_event());
        assert_eq!(property(&ics, "DTSTART"), Some("20251218T183000Z"));
        assert_eq!(property(&ics, "DTEND"), Some("20251218T203000Z"));
    }

    #[test]
    fn uid_is_unique_per_invocation() {
        let event = sample_event();
        let a = property(&build_ics(&event), "UID").map(str::to_string);
        let b = property(&build_ics(&event), "UID").map(str::to_string);
        assert!(a.is_some());
        assert_ne!(a, b);
        assert!(a.is_some_and(|uid| uid.ends_with("@mailsift")));
    }

    #[test]
    fn newlines_are_flattened_out_of_fields() {
        let event = CalendarEvent::new(
            "Two\nline title",
            ts(2025, 12, 18, 18, 30),
            ts(2025, 12, 18, 19, 0),
        )
        .with_location("Hall\nB")
        .with_description("line1\nline2");

        let ics = build_ics(&event);
        assert_eq!(property(&ics, "SUMMARY"), Some("Two line title"));
        assert_eq!(property(&ics, "LOCATION"), Some("Hall B"));
        assert_eq!(property(&ics, "DESCRIPTION"), Some("line1 line2"));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let ics = build_ics(&CalendarEvent::new(
            "Bare",
            ts(2025, 12, 18, 18, 30),
            ts(2025, 12, 18, 19, 0),
        ));
        assert!(!ics.contains("LOCATION"));
        assert!(!ics.contains("DESCRIPTION"));
    }

    #[test]
    fn blank_title_becomes_event() {
        let ics = build_ics(&CalendarEvent::new(
            "",
            ts(2025, 12, 18, 18, 30),
            ts(2025, 12, 18, 19, 0),
        ));
        assert_eq!(property(&ics, "SUMMARY"), Some("Event"));
    }

    #[test]
    fn dtstamp_is_rendered() {
        let event = sample_event();
        let ics = render_ics(&event, "fixed@mailsift", ts(2026, 8, 6, 12, 0));
        assert_eq!(property(&ics, "DTSTAMP"), Some("20260806T120000Z"));
        assert_eq!(property(&ics, "UID"), Some("fixed@mailsift"));
    }

    #[test]
    fn details_with_start_encode() {
        let details = CalendarDetails {
            title: "Call".to_string(),
            start_datetime: "2025-12-18T18:30:00".to_string(),
            ..Default::default()
        };
        let ics = build_ics_from_details(&details).expect("encodes");
        assert_eq!(property(&ics, "DTSTART"), Some("20251218T183000Z"));
        // Missing end defaults to 30 minutes after start
        assert_eq!(property(&ics, "DTEND"), Some("20251218T190000Z"));
    }

    #[test]
    fn details_without_start_do_not_encode() {
        assert!(build_ics_from_details(&CalendarDetails::default()).is_none());
        assert!(
            build_ics_from_details(&CalendarDetails {
                start_datetime: "next week".to_string(),
                ..Default::default()
            })
            .is_none()
        );
    }

    #[test]
    fn detect_and_build_composes() {
        let now = ts(2025, 12, 10, 14, 0);
        let ics = detect_event_and_build_ics_at("Sync", "Meeting tomorrow at 3pm", now)
            .expect("event detected");
        assert_eq!(property(&ics, "DTSTART"), Some("20251211T150000Z"));
        assert_eq!(property(&ics, "SUMMARY"), Some("Sync"));
    }

    #[test]
    fn detect_and_build_none_without_dates() {
        assert!(detect_event_and_build_ics("Hi", "Thanks for your help!").is_none());
    }
}
