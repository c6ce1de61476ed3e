//! Action-link detection
//!
//! Decides whether an email asks the reader to do something (RSVP,
//! register, pay, ...) and, if so, surfaces a single primary link to put
//! in front of them. The link is the first URL anywhere in the text, not
//! necessarily the one next to the keyword.

use aho_corasick::AhoCorasick;

use crate::email_text::extract_links;

/// Keywords that mark an email as action-worthy
const ACTION_KEYWORDS: [&str; 12] = [
    "rsvp",
    "register",
    "sign up",
    "signup",
    "sign-up",
    "complete the form",
    "fill out",
    "fill in",
    "submit",
    "payment",
    "pay by",
    "confirm your attendance",
];

/// Detect the primary link to surface for an action-worthy email
///
/// Returns `None` when no action keyword matches or the text holds no URL.
#[must_use]
pub fn detect_primary_link(text: &str) -> Option<String> {
    let matcher = AhoCorasick::builder()
        .ascii_case_insensitive(true)
        .build(ACTION_KEYWORDS)
        .ok()?;

    if !matcher.is_match(text) {
        return None;
    }

    extract_links(text, 1).into_iter().next().map(|link| link.url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rsvp_surfaces_first_link() {
        let body = "Please RSVP at https://example.com/rsvp";
        assert_eq!(
            detect_primary_link(body),
            Some("https://example.com/rsvp".to_string())
        );
    }

    #[test]
    fn keyword_match_is_case_insensitive() {
        let body = "REGISTER now: https://example.com/signup";
        assert_eq!(
            detect_primary_link(body),
            Some("https://example.com/signup".to_string())
        );
    }

    #[test]
    fn link_is_first_in_document_not_keyword_adjacent() {
        let body = "Info: https://example.com/info\nPlease sign up at https://example.com/form";
        assert_eq!(
            detect_primary_link(body),
            Some("https://example.com/info".to_string())
        );
    }

    #[test]
    fn no_keyword_means_no_link() {
        let body = "Read more at https://example.com/news";
        assert_eq!(detect_primary_link(body), None);
    }

    #[test]
    fn keyword_without_url_means_no_link() {
        assert_eq!(detect_primary_link("Please RSVP by Friday"), None);
    }

    #[test]
    fn hyphenated_and_joined_variants_match() {
        assert_eq!(
            detect_primary_link("sign-up here https://a.com"),
            Some("https://a.com".to_string())
        );
        assert_eq!(
            detect_primary_link("signup here https://a.com"),
            Some("https://a.com".to_string())
        );
        assert_eq!(
            detect_primary_link("pay by Dec 1 at https://a.com/pay"),
            Some("https://a.com/pay".to_string())
        );
    }
}
