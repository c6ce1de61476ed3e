//! Free-text date/time search
//!
//! Scans arbitrary prose for the first plausible date and/or clock time,
//! the way `"Meeting tomorrow at 3pm"` or `"Thursday, December 18th at
//! 6:30 pm"` appear in forwarded email. The search walks token windows
//! left to right, longest window first, so the earliest mention in
//! document order wins and a time stays attached to its date.
//!
//! Resolution is biased: [`DateBias::Future`] rolls year-less dates and
//! bare times forward past the reference instant, while
//! [`DateBias::CurrentPeriod`] resolves them within the current day/week
//! even when that lands in the past.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

/// How ambiguous (year-less, bare-time) matches are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBias {
    /// Prefer the next occurrence after the reference instant
    Future,
    /// Resolve within the current day/week, allowing past results
    CurrentPeriod,
}

/// Longest token window considered for a single match
const MAX_WINDOW: usize = 6;

/// Find the first date/time mention in `text`, relative to `now`
///
/// Returns `None` when nothing in the text parses as a date or time.
/// A date without an explicit clock time takes its time-of-day from
/// `now`; a clock time without a date resolves per the bias.
#[must_use]
pub fn search_first_datetime(text: &str, now: NaiveDateTime, bias: DateBias) -> Option<NaiveDateTime> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    for start in 0..tokens.len() {
        if !is_dateish(tokens[start]) {
            continue;
        }

        let max_len = MAX_WINDOW.min(tokens.len() - start);
        for len in (1..=max_len).rev() {
            if let Some(found) = parse_window(&tokens[start..start + len], now, bias) {
                debug!(window = %tokens[start..start + len].join(" "), result = %found, "Matched date/time window");
                return Some(found);
            }
        }
    }

    None
}

/// Cheap gate: can this token possibly start a date/time mention?
fn is_dateish(token: &str) -> bool {
    let token = normalize_token(token);
    token.chars().any(|c| c.is_ascii_digit())
        || matches!(token.as_str(), "today" | "tomorrow" | "next" | "day")
        || weekday_from_token(&token).is_some()
        || month_from_token(&token).is_some()
}

/// Try to interpret one token window as a date and/or clock time
fn parse_window(tokens: &[&str], now: NaiveDateTime, bias: DateBias) -> Option<NaiveDateTime> {
    let mut time: Option<NaiveTime> = None;
    let mut date_tokens: Vec<String> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = normalize_token(tokens[i]);

        // "6:30 pm" split over two tokens
        if time.is_none() && i + 1 < tokens.len() {
            let next = normalize_token(tokens[i + 1]);
            if matches!(next.as_str(), "am" | "pm") {
                if let Some(t) = parse_clock(&format!("{token}{next}")) {
                    time = Some(t);
                    i += 2;
                    continue;
                }
            }
        }

        if time.is_none() {
            if let Some(t) = parse_clock(&token) {
                time = Some(t);
                i += 1;
                continue;
            }
        }

        // Connectors between date and time
        if matches!(token.as_str(), "at" | "on" | "the" | "of") {
            i += 1;
            continue;
        }

        date_tokens.push(token);
        i += 1;
    }

    let date = if date_tokens.is_empty() {
        None
    } else {
        parse_date_tokens(&date_tokens, now, bias)
    };

    match (date, time) {
        (Some(date), Some(time)) => Some(date.and_time(time)),
        (Some(date), None) => Some(date.and_time(now.time())),
        (None, Some(time)) => Some(resolve_bare_time(time, now, bias)),
        (None, None) => None,
    }
}

/// Lowercase a token and strip surrounding punctuation and ordinal suffixes
fn normalize_token(token: &str) -> String {
    let token = token
        .trim_matches(|c: char| matches!(c, ',' | ';' | ':' | '!' | '?' | '(' | ')' | '"' | '\''))
        .trim_end_matches('.')
        .to_lowercase();

    // "18th" -> "18"
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(prefix) = token.strip_suffix(suffix) {
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_digit()) {
                return prefix.to_string();
            }
        }
    }

    token
}

/// Parse the date part of a window (normalized tokens, times removed)
///
/// A greedy window can span two separate mentions ("tomorrow, then brunch
/// on December 20"), so when both a relative word and a month name are
/// present, whichever appears first in the window wins. A weekday next to
/// a month-day ("Thursday, December 18") is decoration for the same date
/// and never overrides it.
fn parse_date_tokens(tokens: &[String], now: NaiveDateTime, bias: DateBias) -> Option<NaiveDate> {
    let today = now.date();
    let phrase = tokens.join(" ");

    // Numeric formats, token by token: 2025-12-18, 12/18/2025, 18.12.2025
    for token in tokens {
        for format in ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"] {
            if let Ok(date) = NaiveDate::parse_from_str(token, format) {
                return Some(date);
            }
        }
    }

    let month_idx = tokens.iter().position(|t| month_from_token(t).is_some());
    let relative_idx = tokens
        .iter()
        .position(|t| matches!(t.as_str(), "today" | "tonight" | "tomorrow" | "next" | "day"));
    let prefer_relative =
        relative_idx.is_some_and(|r| month_idx.is_none_or(|m| r < m));

    if prefer_relative {
        if let Some(date) = parse_relative(&phrase, today) {
            return Some(date);
        }
    }

    // Month-day forms: "december 18", "18 december", "dec 18 2025"
    if let Some(date) = parse_month_day(tokens, today, bias) {
        return Some(date);
    }

    if !prefer_relative {
        if let Some(date) = parse_relative(&phrase, today) {
            return Some(date);
        }
    }

    // Weekday mentions
    for token in tokens {
        if let Some(weekday) = weekday_from_token(token) {
            let force_next = phrase.contains("next");
            return Some(match bias {
                DateBias::Future => next_weekday(today, weekday, force_next),
                DateBias::CurrentPeriod => current_week_weekday(today, weekday),
            });
        }
    }

    // Last resort: the fuzzydate grammar ("5 days from now", ...)
    // Only worth trying on phrases that mix words and digits.
    if phrase.chars().any(|c| c.is_ascii_alphabetic()) && phrase.chars().any(|c| c.is_ascii_digit())
    {
        return fuzzydate::parse(&phrase).ok().map(|dt| dt.date());
    }

    None
}

/// Parse relative date words
fn parse_relative(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    if phrase.contains("day after tomorrow") {
        return Some(today + Duration::days(2));
    }
    if phrase.contains("tomorrow") {
        return Some(today + Duration::days(1));
    }
    if phrase.contains("today") || phrase.contains("tonight") {
        return Some(today);
    }
    if phrase.contains("next week") {
        return Some(today + Duration::weeks(1));
    }
    None
}

/// Parse "december 18 [2025]" / "18 december" style mentions
fn parse_month_day(tokens: &[String], today: NaiveDate, bias: DateBias) -> Option<NaiveDate> {
    let month = tokens.iter().find_map(|t| month_from_token(t))?;

    let mut day: Option<u32> = None;
    let mut year: Option<i32> = None;
    for token in tokens {
        if let Ok(n) = token.parse::<u32>() {
            if (1..=31).contains(&n) && day.is_none() {
                day = Some(n);
            } else if (1970..=2100).contains(&n) && year.is_none() {
                year = i32::try_from(n).ok();
            }
        }
    }
    let day = day?;

    if let Some(year) = year {
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    match bias {
        DateBias::Future if this_year < today => {
            NaiveDate::from_ymd_opt(today.year() + 1, month, day)
        }
        _ => Some(this_year),
    }
}

/// Resolve a clock time with no date attached
fn resolve_bare_time(time: NaiveTime, now: NaiveDateTime, bias: DateBias) -> NaiveDateTime {
    let candidate = now.date().and_time(time);
    match bias {
        DateBias::Future if candidate <= now => candidate + Duration::days(1),
        _ => candidate,
    }
}

/// Parse a clock token: "3pm", "6:30pm", "15:00", "15:00:00"
fn parse_clock(token: &str) -> Option<NaiveTime> {
    let (token, meridiem) = if let Some(rest) = token.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = token.strip_suffix("pm") {
        (rest, Some(true))
    } else {
        (token, None)
    };

    let parts: Vec<&str> = token.split(':').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty() || !p.chars().all(|c| c.is_ascii_digit())) {
        return None;
    }

    let mut hour: u32 = parts[0].parse().ok()?;
    let minute: u32 = if parts.len() > 1 { parts[1].parse().ok()? } else { 0 };
    let second: u32 = if parts.len() > 2 { parts[2].parse().ok()? } else { 0 };

    match meridiem {
        Some(is_pm) => {
            // "3pm" / "6:30 pm": hour must read as 12-hour clock
            if !(1..=12).contains(&hour) {
                return None;
            }
            if is_pm && hour != 12 {
                hour += 12;
            } else if !is_pm && hour == 12 {
                hour = 0;
            }
        }
        None => {
            // Bare digits like "18" are too ambiguous to be a time
            if parts.len() == 1 {
                return None;
            }
        }
    }

    NaiveTime::from_hms_opt(hour, minute, second)
}

/// Map a normalized token to a weekday
fn weekday_from_token(token: &str) -> Option<Weekday> {
    match token {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Map a normalized token to a month number
fn month_from_token(token: &str) -> Option<u32> {
    match token {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

/// Find the next occurrence of a weekday
fn next_weekday(from: NaiveDate, target: Weekday, force_next: bool) -> NaiveDate {
    let current_num = from.weekday().num_days_from_monday();
    let target_num = target.num_days_from_monday();

    let mut days_until = if target_num > current_num {
        target_num - current_num
    } else if target_num < current_num {
        7 - (current_num - target_num)
    } else if force_next {
        7 // Same day, but force next week
    } else {
        0 // Same day, return today
    };

    if force_next && days_until < 7 && target_num <= current_num {
        days_until += 7;
    }

    from + Duration::days(i64::from(days_until))
}

/// Resolve a weekday within the current Monday-based week
fn current_week_weekday(from: NaiveDate, target: Weekday) -> NaiveDate {
    let current_num = i64::from(from.weekday().num_days_from_monday());
    let target_num = i64::from(target.num_days_from_monday());
    from + Duration::days(target_num - current_num)
}
