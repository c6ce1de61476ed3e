//! Email text utilities
//!
//! Pure functions for stripping forwarding boilerplate from raw email
//! bodies and pulling links and snippets out of them. Everything here is
//! deterministic and free of I/O; cleaning is idempotent.

use domain::Link;

/// Maximum length of a cleaned body, in characters
pub const MAX_CLEAN_LEN: usize = 8000;

/// Marker appended when a cleaned body was truncated
const TRUNCATION_MARKER: &str = "\n\n[truncated]";

/// Header-line prefixes dropped from forwarded bodies
const HEADER_PREFIXES: [&str; 5] = ["From:", "To:", "Cc:", "Subject:", "Date:"];

/// Strip forwarding headers and boilerplate from a raw email body
///
/// Lines between a "Forwarded message" / "Original Message" marker and the
/// next blank line are discarded, as are `From:/To:/Cc:/Subject:/Date:`
/// header lines. Runs of three or more newlines collapse to two, and the
/// result is truncated to [`MAX_CLEAN_LEN`] characters with a
/// `[truncated]` marker. When cleaning strips everything, the trimmed raw
/// body is returned instead, so a non-empty input never cleans to nothing.
#[must_use]
pub fn clean_body(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut kept: Vec<&str> = Vec::new();
    let mut skipping_forward_header = false;

    for line in raw.lines() {
        let stripped = line.trim();

        if stripped.contains("Forwarded message") || stripped.contains("Original Message") {
            skipping_forward_header = true;
            continue;
        }

        if skipping_forward_header {
            if stripped.is_empty() {
                skipping_forward_header = false;
            }
            continue;
        }

        if HEADER_PREFIXES.iter().any(|p| stripped.starts_with(p)) {
            continue;
        }

        kept.push(line);
    }

    let text = collapse_blank_runs(kept.join("\n").trim());
    let text = truncate_with_marker(&text);

    if text.is_empty() {
        raw.trim().to_string()
    } else {
        text
    }
}

/// Collapse runs of 3+ newlines down to exactly 2
fn collapse_blank_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newline_run = 0usize;

    for c in text.chars() {
        if c == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(c);
            }
        } else {
            newline_run = 0;
            out.push(c);
        }
    }

    out
}

/// Truncate to [`MAX_CLEAN_LEN`] characters, appending the marker
fn truncate_with_marker(text: &str) -> String {
    if text.chars().count() <= MAX_CLEAN_LEN {
        return text.to_string();
    }

    let mut out: String = text.chars().take(MAX_CLEAN_LEN).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Characters that terminate a URL match
fn terminates_url(c: char) -> bool {
    c.is_whitespace() || matches!(c, ')' | '>' | '"' | '\'')
}

/// Extract up to `max_links` unique HTTP(S) links in first-seen order
///
/// Trailing `.`, `,` and `;` are trimmed from each match; every link gets
/// the default `"Link"` label.
#[must_use]
pub fn extract_links(text: &str, max_links: usize) -> Vec<Link> {
    let mut out: Vec<Link> = Vec::new();
    let mut pos = 0usize;

    while out.len() < max_links {
        let Some(found) = text[pos..].find("http") else {
            break;
        };
        let start = pos + found;
        let rest = &text[start..];

        if !rest.starts_with("http://") && !rest.starts_with("https://") {
            pos = start + "http".len();
            continue;
        }

        let end = rest.find(terminates_url).unwrap_or(rest.len());
        let url = rest[..end].trim_end_matches(['.', ',', ';']);
        pos = start + end.max(1);

        if url.is_empty() || out.iter().any(|l| l.url == url) {
            continue;
        }
        out.push(Link::new(url));
    }

    out
}

/// Flatten text to one line and cut it to `max_chars`, appending `…`
#[must_use]
pub fn snippet(text: &str, max_chars: usize) -> String {
    let one_line = text.replace('\n', " ");
    let one_line = one_line.trim();

    if one_line.chars().count() <= max_chars {
        return one_line.to_string();
    }

    let mut out: String = one_line.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_drops_forwarded_header_block() {
        let raw = "---------- Forwarded message ----------\n\
                   From: someone@example.com\n\
                   Date: Mon, 1 Dec 2025\n\
                   \n\
                   Actual content here.";
        assert_eq!(clean_body(raw), "Actual content here.");
    }

    #[test]
    fn clean_drops_original_message_block() {
        let raw = "-----Original Message-----\nTo: me@example.com\n\nHello again.";
        assert_eq!(clean_body(raw), "Hello again.");
    }

    #[test]
    fn clean_drops_header_lines_outside_blocks() {
        let raw = "Subject: Re: lunch\nLet's meet at noon.\nDate: whenever";
        assert_eq!(clean_body(raw), "Let's meet at noon.");
    }

    #[test]
    fn clean_keeps_interior_whitespace_and_order() {
        let raw = "first  line\nsecond line";
        assert_eq!(clean_body(raw), "first  line\nsecond line");
    }

    #[test]
    fn clean_collapses_blank_runs() {
        let raw = "one\n\n\n\ntwo";
        assert_eq!(clean_body(raw), "one\n\ntwo");
    }

    #[test]
    fn clean_truncates_long_bodies() {
        let raw = "x".repeat(MAX_CLEAN_LEN + 100);
        let cleaned = clean_body(&raw);
        assert!(cleaned.ends_with("[truncated]"));
        assert_eq!(
            cleaned.chars().count(),
            MAX_CLEAN_LEN + "\n\n[truncated]".chars().count()
        );
    }

    #[test]
    fn clean_never_returns_empty_for_nonempty_input() {
        // A body that is nothing but header lines cleans to nothing, so the
        // trimmed raw body comes back instead.
        let raw = "From: a@b.com\nTo: c@d.com";
        assert_eq!(clean_body(raw), "From: a@b.com\nTo: c@d.com");
    }

    #[test]
    fn clean_empty_input_is_empty() {
        assert_eq!(clean_body(""), "");
    }

    #[test]
    fn clean_is_idempotent() {
        let raw = "Forwarded message\nFrom: x@y.com\n\nSee you Thursday.\n\n\n\nBring tickets.";
        let once = clean_body(raw);
        assert_eq!(clean_body(&once), once);
    }

    #[test]
    fn clean_is_idempotent_after_truncation() {
        let raw = format!("{}\n\nmore text", "y".repeat(MAX_CLEAN_LEN + 50));
        let once = clean_body(&raw);
        assert_eq!(clean_body(&once), once);
    }

    #[test]
    fn extract_links_finds_two_in_order() {
        let body = "See https://example.com/a and also https://example.com/b today";
        let links = extract_links(body, 2);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com/a");
        assert_eq!(links[1].url, "https://example.com/b");
        assert!(links.iter().all(|l| l.label == "Link"));
    }

    #[test]
    fn extract_links_deduplicates() {
        let body = "https://example.com https://example.com https://other.com";
        let links = extract_links(body, 2);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://example.com");
        assert_eq!(links[1].url, "https://other.com");
    }

    #[test]
    fn extract_links_caps_at_max() {
        let body = "http://a.com http://b.com http://c.com";
        assert_eq!(extract_links(body, 2).len(), 2);
        assert_eq!(extract_links(body, 1).len(), 1);
    }

    #[test]
    fn extract_links_trims_trailing_punctuation() {
        let body = "Policies: https://www.eaglebankarena.com/plan-your-visit/arena-policies. Thanks";
        let links = extract_links(body, 2);
        assert_eq!(
            links[0].url,
            "https://www.eaglebankarena.com/plan-your-visit/arena-policies"
        );
    }

    #[test]
    fn extract_links_stops_at_closing_punctuation() {
        let body = "(see https://example.com/page) and <https://example.com/other>";
        let links = extract_links(body, 2);
        assert_eq!(links[0].url, "https://example.com/page");
        assert_eq!(links[1].url, "https://example.com/other");
    }

    #[test]
    fn extract_links_ignores_bare_http_words() {
        let body = "the httpd daemon is not a link";
        assert!(extract_links(body, 2).is_empty());
    }

    #[test]
    fn snippet_short_text_unchanged() {
        assert_eq!(snippet("short text", 240), "short text");
    }

    #[test]
    fn snippet_flattens_newlines() {
        assert_eq!(snippet("line one\nline two", 240), "line one line two");
    }

    #[test]
    fn snippet_truncates_with_ellipsis() {
        let text = "a".repeat(300);
        let s = snippet(&text, 240);
        assert_eq!(s.chars().count(), 241);
        assert!(s.ends_with('…'));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn clean_body_never_panics(input in ".*") {
            let _ = clean_body(&input);
        }

        #[test]
        fn clean_body_is_idempotent(input in "[ -~\\n]{0,400}") {
            let once = clean_body(&input);
            prop_assert_eq!(clean_body(&once), once.clone());
        }

        #[test]
        fn extract_links_never_exceeds_cap(input in ".*", cap in 0usize..4) {
            prop_assert!(extract_links(&input, cap).len() <= cap);
        }

        #[test]
        fn extracted_urls_are_unique(input in ".*") {
            let links = extract_links(&input, 2);
            if links.len() == 2 {
                prop_assert_ne!(&links[0].url, &links[1].url);
            }
        }

        #[test]
        fn snippet_respects_bound(input in ".*", max in 1usize..300) {
            prop_assert!(snippet(&input, max).chars().count() <= max + 1);
        }
    }
}
