//! Forward-package synthesis
//!
//! Orchestrates the model-or-fallback pipeline: clean the body, attempt
//! one model extraction when an extractor is configured, normalize the
//! candidate into a valid [`ForwardPackage`], and fall back to the
//! heuristic path on any failure. This service never errors: every input
//! produces a complete package.

use std::{fmt, sync::Arc};

use chrono::{Local, NaiveDate, NaiveDateTime};
use domain::{
    CalendarDetails, Category, ForwardPackage, Link, MAX_KEY_POINTS, MAX_LINKS, Tone,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    email_text::{clean_body, extract_links, snippet},
    event_detector::detect_event_at,
    ports::ExtractorPort,
};

/// Maximum characters in a synthesized key-point snippet
const SNIPPET_LEN: usize = 240;

/// Maximum characters per bullet in the detailed fallback style
const DETAILED_SNIPPET_LEN: usize = 160;

/// Bullets emitted by the detailed fallback style
const DETAILED_MAX_POINTS: usize = 3;

/// Key point emitted when an email has no usable content at all
const EMPTY_CONTENT_POINT: &str = "(No email content found.)";

/// Verbosity of the heuristic fallback summary
///
/// An explicit configuration value handed to the service at construction,
/// never read from ambient process state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackStyle {
    /// One snippet bullet derived from the cleaned body
    #[default]
    Brief,
    /// Up to three bullets, one per leading paragraph
    Detailed,
}

/// Service deriving forward packages from inbound email
pub struct ForwardService {
    extractor: Option<Arc<dyn ExtractorPort>>,
    fallback_style: FallbackStyle,
}

impl fmt::Debug for ForwardService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardService")
            .field("extractor_configured", &self.extractor.is_some())
            .field("fallback_style", &self.fallback_style)
            .finish()
    }
}

impl ForwardService {
    /// Create a new forward service
    pub fn new(extractor: Option<Arc<dyn ExtractorPort>>, fallback_style: FallbackStyle) -> Self {
        Self {
            extractor,
            fallback_style,
        }
    }

    /// Create a service that always takes the heuristic path
    pub fn heuristic_only(fallback_style: FallbackStyle) -> Self {
        Self::new(None, fallback_style)
    }

    /// Whether a model extractor is configured
    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    /// Derive the forward package for one inbound email
    ///
    /// At most one model round-trip; every failure mode degrades to the
    /// deterministic fallback. The returned package always satisfies the
    /// key-point, link and calendar invariants.
    #[instrument(skip(self, subject, body), fields(subject_len = subject.len(), body_len = body.len()))]
    pub async fn build_forward_package(&self, subject: &str, body: &str) -> ForwardPackage {
        let now = Local::now().naive_local();
        let cleaned = clean_body(body);

        if cleaned.trim().is_empty() {
            debug!("Cleaned body is empty, skipping model");
            return self.fallback_package(subject, body, &cleaned, now);
        }

        let Some(extractor) = &self.extractor else {
            info!("No extractor configured, using heuristic fallback");
            return self.fallback_package(subject, body, &cleaned, now);
        };

        let system_prompt = build_system_prompt(now.date());
        let user_message = format!("Subject: {subject}\n\nEmail:\n{cleaned}");

        match extractor.extract(&system_prompt, &user_message).await {
            Ok(outcome) => match parse_candidate(&outcome.content) {
                Some(candidate) => {
                    debug!(
                        model = %outcome.model,
                        latency_ms = outcome.latency_ms,
                        "Normalizing model candidate"
                    );
                    self.normalize_candidate(&candidate, subject, body, &cleaned, now)
                }
                None => {
                    warn!(
                        response_len = outcome.content.len(),
                        "Model response is not a JSON object, using fallback"
                    );
                    self.fallback_package(subject, body, &cleaned, now)
                }
            },
            Err(e) => {
                warn!(error = %e, "Extraction failed, using fallback");
                self.fallback_package(subject, body, &cleaned, now)
            }
        }
    }

    /// Normalize a model candidate into a valid package
    ///
    /// Every field is clamped independently; a bad field never discards
    /// the rest of the candidate.
    fn normalize_candidate(
        &self,
        data: &serde_json::Map<String, serde_json::Value>,
        subject: &str,
        raw_body: &str,
        cleaned: &str,
        now: NaiveDateTime,
    ) -> ForwardPackage {
        let category = Category::parse_lenient(&string_field(data, "category"));
        let tone = Tone::parse_lenient(&string_field(data, "tone"));

        let forward_subject = {
            let candidate = string_field(data, "forward_subject");
            if candidate.is_empty() {
                ForwardPackage::synthesize_subject(subject)
            } else {
                candidate
            }
        };

        let mut key_points: Vec<String> = data
            .get("key_points")
            .and_then(serde_json::Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(coerce_text)
                    .filter(|s| !s.is_empty())
                    .take(MAX_KEY_POINTS)
                    .collect()
            })
            .unwrap_or_default();
        if key_points.is_empty() {
            key_points = self.fallback_key_points(cleaned);
        }

        let mut links = candidate_links(data);
        if links.is_empty() {
            links = extract_links(raw_body, MAX_LINKS);
        }

        let details = candidate_calendar(data);
        let (has_calendar_event, calendar_event) = if details.resolve().is_some() {
            (true, details)
        } else {
            // Blank or unparsable start time: give the heuristic a chance
            // before concluding there is no event.
            resolve_heuristic_event(subject, raw_body, now)
        };

        ForwardPackage {
            category,
            forward_subject,
            tone,
            key_points,
            links,
            has_calendar_event,
            calendar_event,
        }
    }

    /// Build the deterministic fallback package
    fn fallback_package(
        &self,
        subject: &str,
        raw_body: &str,
        cleaned: &str,
        now: NaiveDateTime,
    ) -> ForwardPackage {
        let (has_calendar_event, calendar_event) = resolve_heuristic_event(subject, raw_body, now);

        ForwardPackage {
            category: Category::Fyi,
            forward_subject: ForwardPackage::synthesize_subject(subject),
            tone: Tone::Short,
            key_points: self.fallback_key_points(cleaned),
            links: extract_links(raw_body, MAX_LINKS),
            has_calendar_event,
            calendar_event,
        }
    }

    /// Derive fallback key points from the cleaned body
    fn fallback_key_points(&self, cleaned: &str) -> Vec<String> {
        match self.fallback_style {
            FallbackStyle::Brief => {
                let s = snippet(cleaned, SNIPPET_LEN);
                if s.is_empty() {
                    vec![EMPTY_CONTENT_POINT.to_string()]
                } else {
                    vec![s]
                }
            }
            FallbackStyle::Detailed => {
                let points: Vec<String> = cleaned
                    .split("\n\n")
                    .map(|p| snippet(p, DETAILED_SNIPPET_LEN))
                    .filter(|s| !s.is_empty())
                    .take(DETAILED_MAX_POINTS)
                    .collect();
                if points.is_empty() {
                    vec![EMPTY_CONTENT_POINT.to_string()]
                } else {
                    points
                }
            }
        }
    }
}

/// Run the heuristic detector and shape the outcome for a package
fn resolve_heuristic_event(
    subject: &str,
    raw_body: &str,
    now: NaiveDateTime,
) -> (bool, CalendarDetails) {
    detect_event_at(subject, raw_body, now).map_or_else(
        || (false, CalendarDetails::default()),
        |event| (true, event.to_details()),
    )
}

/// Read a string field, trimmed; missing or non-text values become empty
fn string_field(data: &serde_json::Map<String, serde_json::Value>, key: &str) -> String {
    data.get(key).and_then(coerce_text).unwrap_or_default()
}

/// Coerce a scalar JSON value to trimmed text
fn coerce_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.trim().to_string()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Pull up to two well-formed links out of a candidate
fn candidate_links(data: &serde_json::Map<String, serde_json::Value>) -> Vec<Link> {
    let Some(items) = data.get("links").and_then(serde_json::Value::as_array) else {
        return Vec::new();
    };

    let mut out: Vec<Link> = Vec::new();
    for item in items {
        if out.len() >= MAX_LINKS {
            break;
        }
        let Some(obj) = item.as_object() else {
            continue;
        };
        let url = string_field(obj, "url");
        if url.is_empty() {
            continue;
        }
        out.push(Link::labeled(string_field(obj, "label"), url));
    }
    out
}

/// Pull the calendar details out of a candidate, all fields optional
fn candidate_calendar(data: &serde_json::Map<String, serde_json::Value>) -> CalendarDetails {
    let Some(cal) = data.get("calendar_event").and_then(serde_json::Value::as_object) else {
        return CalendarDetails::default();
    };

    CalendarDetails {
        title: string_field(cal, "title"),
        start_datetime: string_field(cal, "start_datetime"),
        end_datetime: string_field(cal, "end_datetime"),
        timezone: string_field(cal, "timezone"),
        location: string_field(cal, "location"),
        description: string_field(cal, "description"),
    }
}

/// Parse a model response into a JSON object, tolerating code fences
fn parse_candidate(response: &str) -> Option<serde_json::Map<String, serde_json::Value>> {
    let value: serde_json::Value = serde_json::from_str(extract_json(response)).ok()?;
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Extract JSON from a potentially markdown-wrapped response
fn extract_json(response: &str) -> &str {
    let response = response.trim();

    // Handle ```json ... ``` blocks
    if let Some(start) = response.find("```json") {
        if let Some(end) = response[start + 7..].find("```") {
            return response[start + 7..start + 7 + end].trim();
        }
    }

    // Handle ``` ... ``` blocks
    if let Some(start) = response.find("```") {
        if let Some(end) = response[start + 3..].find("```") {
            return response[start + 3..start + 3 + end].trim();
        }
    }

    // Handle { ... } directly
    // Ensure start < end to avoid panics with malformed input like "} {"
    if let Some(start) = response.find('{') {
        if let Some(end) = response.rfind('}') {
            if start <= end {
                return &response[start..=end];
            }
        }
    }

    response
}

/// Build the extraction system prompt for a given reference date
fn build_system_prompt(today: NaiveDate) -> String {
    format!(
        "You are an email forwarding assistant. Output ONLY valid JSON.\n\
         \n\
         Today's date is {}.\n\
         \n\
         JSON keys:\n\
         - category: one of [event, scheduling, action_required, fyi, billing, recruiting, personal]\n\
         - forward_subject: short subject for forwarding\n\
         - tone: one of [short, warm, formal]\n\
         - key_points: 4 to 8 bullets max\n\
         - links: up to 2 links, each {{label, url}}\n\
         - has_calendar_event: boolean (true only if date+time are clearly specified)\n\
         - calendar_event: {{title, start_datetime, end_datetime, timezone, location, description}}\n\
         \n\
         Rules:\n\
         - Ignore greetings/signatures/boilerplate.\n\
         - If time is vague (e.g. next week, TBD), has_calendar_event must be false.\n\
         - If end time missing: meeting=30min, event=2h",
        today.format("%A, %B %d, %Y")
    )
}
