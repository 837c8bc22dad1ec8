//! Free-form date/time parsing.
//!
//! Start and end fields arrive as text ("June 30, 2025 8:00pm", "2025-06-30",
//! "tomorrow noon"). Input is first normalized (case, commas, ordinal
//! suffixes, am/pm spacing, weekday and month abbreviations), then tried
//! against a chain of explicit chrono layouts, then handed to fuzzydate for
//! relative phrases.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::{LinkError, LinkResult};
use crate::event::EventTime;

/// Explicit datetime layouts tried before the fuzzy parser.
const DATETIME_FORMATS: &[&str] = &[
    "%B %d %Y %I:%M%p",  // june 30 2025 8:00pm
    "%B %d %Y %H:%M:%S", // june 30 2025 20:00:00
    "%B %d %Y %H:%M",    // june 30 2025 20:00
    "%d %B %Y %I:%M%p",  // 30 june 2025 8:00pm
    "%d %B %Y %H:%M",    // 30 june 2025 20:00
    "%Y-%m-%dt%H:%M:%S", // 2025-06-30t20:00:00 (input is lowercased)
    "%Y-%m-%dt%H:%M",    // 2025-06-30t20:00
    "%Y-%m-%d %H:%M:%S", // 2025-06-30 20:00:00
    "%Y-%m-%d %H:%M",    // 2025-06-30 20:00
    "%Y-%m-%d %I:%M%p",  // 2025-06-30 8:00pm
    // %y before %Y: %y reads at most two digits, %Y would take "25" as year 25.
    "%m/%d/%y %I:%M%p", // 6/30/25 8:00pm
    "%m/%d/%y %H:%M",   // 6/30/25 20:00
    "%m/%d/%Y %I:%M%p", // 6/30/2025 8:00pm
    "%m/%d/%Y %H:%M",   // 6/30/2025 20:00
];

/// Explicit date-only layouts tried before the fuzzy parser.
const DATE_FORMATS: &[&str] = &[
    "%B %d %Y", // june 30 2025
    "%d %B %Y", // 30 june 2025
    "%Y-%m-%d", // 2025-06-30
    "%m/%d/%y", // 6/30/25
    "%m/%d/%Y", // 6/30/2025
];

/// Parse free-form date/time text into an [`EventTime`].
///
/// `all_day` selects the variant: date-only (any time of day in the text is
/// discarded) or local datetime (midnight when the text carries no time).
pub fn parse_event_time(input: &str, all_day: bool) -> LinkResult<EventTime> {
    let dt = parse_naive(input).ok_or_else(|| LinkError::DateParse(input.to_string()))?;

    if all_day {
        Ok(EventTime::Date(dt.date()))
    } else {
        Ok(EventTime::DateTime(dt))
    }
}

/// Resolve explicit end text into the event's exclusive end boundary.
///
/// A duration ("2hours", "45m") is added to the start and already denotes
/// the exclusive end. Anything else is parsed like the start, optionally
/// after an "until "/"to " prefix; for all-day events one day is added,
/// since Google stores the day *after* the last inclusive day. An end that
/// lands outside the supported date range is a parse error.
pub fn parse_end_time(input: &str, start: &EventTime, all_day: bool) -> LinkResult<EventTime> {
    if let Some(duration) = parse_duration(input) {
        return start
            .checked_add(duration)
            .ok_or_else(|| LinkError::DateParse(input.to_string()));
    }

    let cleaned = input
        .strip_prefix("until ")
        .or_else(|| input.strip_prefix("to "))
        .unwrap_or(input);

    // Report failures against the caller's text, not the stripped form.
    let parsed = parse_event_time(cleaned, all_day)
        .map_err(|_| LinkError::DateParse(input.to_string()))?;
    if all_day {
        parsed
            .plus_days(1)
            .ok_or_else(|| LinkError::DateParse(input.to_string()))
    } else {
        Ok(parsed)
    }
}

/// Interpret the input as a duration ("2hours", "45m"), if it is one.
fn parse_duration(input: &str) -> Option<Duration> {
    // humantime wants "2hours"; be forgiving about "2 hours".
    let compact: String = input.split_whitespace().collect();
    let std_duration = humantime::parse_duration(&compact).ok()?;
    Duration::from_std(std_duration).ok()
}

/// Try the explicit layout chain, then fall back to fuzzydate.
fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return None;
    }

    // The fixed layouts need minutes spelled out; fuzzydate gets the
    // untouched normalized form.
    let explicit = with_explicit_minutes(&normalized);

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&explicit, format) {
            return Some(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&explicit, format) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    fuzzydate::parse(&normalized).ok()
}

/// Normalize free-form input for the parsers: lowercase, commas dropped,
/// trailing periods trimmed per word, ordinal day suffixes stripped
/// ("30th" -> "30"), standalone am/pm reattached to the clock before it
/// ("8:00 pm" -> "8:00pm"), and common weekday/month abbreviations expanded
/// ("sat" -> "saturday").
fn normalize(input: &str) -> String {
    let lowered = input.to_lowercase().replace(',', " ");

    let mut words: Vec<String> = Vec::new();
    for raw in lowered.split_whitespace() {
        let word = raw.trim_end_matches('.');
        if word.is_empty() {
            continue;
        }
        if word == "am" || word == "pm" {
            if let Some(prev) = words.last_mut() {
                if is_clock(prev) {
                    prev.push_str(word);
                    continue;
                }
            }
        }
        if let Some(day) = strip_ordinal(word) {
            words.push(day.to_string());
        } else {
            words.push(expand_abbreviation(word).to_string());
        }
    }

    words.join(" ")
}

/// Rewrite bare-hour clocks with explicit minutes ("8pm" -> "8:00pm") so the
/// fixed layouts can parse them.
fn with_explicit_minutes(normalized: &str) -> String {
    normalized
        .split(' ')
        .map(|word| add_minutes(word).unwrap_or_else(|| word.to_string()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// "8pm" -> "8:00pm", leaving anything that is not a bare hour alone.
fn add_minutes(word: &str) -> Option<String> {
    let hour = word
        .strip_suffix("am")
        .or_else(|| word.strip_suffix("pm"))?;
    if hour.is_empty() || hour.len() > 2 || !hour.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let meridiem = &word[word.len() - 2..];
    Some(format!("{hour}:00{meridiem}"))
}

/// A bare clock reading: digits with optional colons ("8", "8:00", "15:00").
fn is_clock(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit() || c == ':')
}

/// Strip an ordinal suffix from a day number: "1st" -> "1", "22nd" -> "22".
fn strip_ordinal(word: &str) -> Option<&str> {
    for suffix in ["st", "nd", "rd", "th"] {
        if let Some(digits) = word.strip_suffix(suffix) {
            if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
                return Some(digits);
            }
        }
    }
    None
}

/// Expand weekday and month abbreviations the parsers don't accept on their
/// own.
fn expand_abbreviation(word: &str) -> &str {
    match word {
        "mon" => "monday",
        "tue" | "tues" => "tuesday",
        "wed" => "wednesday",
        "thu" | "thur" | "thurs" => "thursday",
        "fri" => "friday",
        "sat" => "saturday",
        "sun" => "sunday",
        "jan" => "january",
        "feb" => "february",
        "mar" => "march",
        "apr" => "april",
        "jun" => "june",
        "jul" => "july",
        "aug" => "august",
        "sep" | "sept" => "september",
        "oct" => "october",
        "nov" => "november",
        "dec" => "december",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    // --- normalize ---

    #[test]
    fn normalize_strips_commas_and_case() {
        assert_eq!(normalize("June 30, 2025"), "june 30 2025");
    }

    #[test]
    fn normalize_reattaches_meridiem() {
        assert_eq!(normalize("8:00 pm"), "8:00pm");
        assert_eq!(normalize("9 AM"), "9am");
        assert_eq!(normalize("10:15pm"), "10:15pm");
    }

    #[test]
    fn normalize_leaves_plain_words_alone() {
        assert_eq!(normalize("spam"), "spam");
        assert_eq!(normalize("august 1"), "august 1");
        assert_eq!(normalize("noon pm"), "noon pm");
    }

    #[test]
    fn normalize_strips_ordinal_suffixes() {
        assert_eq!(normalize("June 1st 2025"), "june 1 2025");
        assert_eq!(normalize("the 22nd"), "the 22");
        assert_eq!(normalize("3rd"), "3");
        assert_eq!(normalize("30th"), "30");
    }

    #[test]
    fn normalize_expands_abbreviations() {
        assert_eq!(normalize("sat 3pm"), "saturday 3pm");
        assert_eq!(normalize("jun. 30"), "june 30");
        assert_eq!(normalize("sept 5"), "september 5");
    }

    #[test]
    fn explicit_minutes_added_to_bare_hours() {
        assert_eq!(with_explicit_minutes("june 30 2025 8pm"), "june 30 2025 8:00pm");
        assert_eq!(with_explicit_minutes("8:15pm"), "8:15pm");
        assert_eq!(with_explicit_minutes("june 30"), "june 30");
    }

    // --- parse_event_time ---

    #[test]
    fn parse_month_name_datetime() {
        let t = parse_event_time("June 30, 2025 8:00pm", false).unwrap();
        assert_eq!(t, EventTime::DateTime(datetime(2025, 6, 30, 20, 0)));
    }

    #[test]
    fn parse_bare_date_defaults_to_midnight() {
        let t = parse_event_time("June 30, 2025", false).unwrap();
        assert_eq!(t, EventTime::DateTime(datetime(2025, 6, 30, 0, 0)));
    }

    #[test]
    fn parse_all_day_discards_time_of_day() {
        let t = parse_event_time("June 30, 2025 8:00pm", true).unwrap();
        assert_eq!(t, EventTime::Date(date(2025, 6, 30)));
    }

    #[test]
    fn parse_day_first_layout() {
        let t = parse_event_time("30 June 2025", true).unwrap();
        assert_eq!(t, EventTime::Date(date(2025, 6, 30)));
    }

    #[test]
    fn parse_iso_layouts() {
        assert_eq!(
            parse_event_time("2025-06-30", true).unwrap(),
            EventTime::Date(date(2025, 6, 30))
        );
        assert_eq!(
            parse_event_time("2025-06-30 20:15", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 20, 15))
        );
        assert_eq!(
            parse_event_time("2025-06-30T20:15:00", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 20, 15))
        );
    }

    #[test]
    fn parse_slash_layouts() {
        assert_eq!(
            parse_event_time("6/30/2025", true).unwrap(),
            EventTime::Date(date(2025, 6, 30))
        );
        assert_eq!(
            parse_event_time("6/30/25", true).unwrap(),
            EventTime::Date(date(2025, 6, 30))
        );
        assert_eq!(
            parse_event_time("6/30/2025 8:00pm", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 20, 0))
        );
    }

    #[test]
    fn parse_twelve_hour_edges() {
        assert_eq!(
            parse_event_time("June 30, 2025 12:00am", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 0, 0))
        );
        assert_eq!(
            parse_event_time("June 30, 2025 12:00pm", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 12, 0))
        );
        assert_eq!(
            parse_event_time("June 30, 2025 8pm", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 20, 0))
        );
        assert_eq!(
            parse_event_time("June 30, 2025 8 pm", false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 20, 0))
        );
    }

    #[test]
    fn parse_ordinal_day() {
        let t = parse_event_time("July 1st, 2025", true).unwrap();
        assert_eq!(t, EventTime::Date(date(2025, 7, 1)));
    }

    #[test]
    fn parse_relative_phrases_fall_back_to_fuzzy() {
        assert!(matches!(
            parse_event_time("tomorrow", true),
            Ok(EventTime::Date(_))
        ));
        assert!(matches!(
            parse_event_time("tomorrow 3pm", false),
            Ok(EventTime::DateTime(_))
        ));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_event_time("not-a-date", false).unwrap_err();
        assert!(matches!(err, LinkError::DateParse(_)));
        assert!(parse_event_time("", false).is_err());
        assert!(parse_event_time("   ", true).is_err());
    }

    // --- parse_end_time ---

    #[test]
    fn end_duration_from_timed_start() {
        let start = EventTime::DateTime(datetime(2025, 6, 30, 15, 0));
        assert_eq!(
            parse_end_time("45m", &start, false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 15, 45))
        );
        assert_eq!(
            parse_end_time("2 hours", &start, false).unwrap(),
            EventTime::DateTime(datetime(2025, 6, 30, 17, 0))
        );
    }

    #[test]
    fn end_duration_from_all_day_start_is_not_bumped() {
        let start = EventTime::Date(date(2025, 6, 30));
        assert_eq!(
            parse_end_time("3days", &start, true).unwrap(),
            EventTime::Date(date(2025, 7, 3))
        );
    }

    #[test]
    fn end_datetime_parses_like_start() {
        let start = EventTime::DateTime(datetime(2025, 6, 30, 20, 0));
        assert_eq!(
            parse_end_time("July 2, 2025 10:00am", &start, false).unwrap(),
            EventTime::DateTime(datetime(2025, 7, 2, 10, 0))
        );
    }

    #[test]
    fn end_date_is_bumped_for_all_day() {
        let start = EventTime::Date(date(2025, 6, 30));
        assert_eq!(
            parse_end_time("July 2, 2025", &start, true).unwrap(),
            EventTime::Date(date(2025, 7, 3))
        );
    }

    #[test]
    fn end_until_prefix_is_stripped() {
        let start = EventTime::DateTime(datetime(2025, 6, 30, 20, 0));
        assert_eq!(
            parse_end_time("until July 2, 2025 10:00am", &start, false).unwrap(),
            EventTime::DateTime(datetime(2025, 7, 2, 10, 0))
        );
        assert_eq!(
            parse_end_time("to July 2, 2025 10:00am", &start, false).unwrap(),
            EventTime::DateTime(datetime(2025, 7, 2, 10, 0))
        );
    }

    #[test]
    fn end_garbage_is_rejected() {
        let start = EventTime::Date(date(2025, 6, 30));
        let err = parse_end_time("banana", &start, true).unwrap_err();
        assert!(matches!(err, LinkError::DateParse(_)));
    }

    #[test]
    fn end_duration_past_max_date_is_rejected() {
        let start = EventTime::Date(date(2025, 6, 30));
        let err = parse_end_time("96000000days", &start, true).unwrap_err();
        assert!(matches!(err, LinkError::DateParse(text) if text == "96000000days"));
    }

    #[test]
    fn end_errors_report_the_callers_text() {
        let start = EventTime::DateTime(datetime(2025, 6, 30, 20, 0));
        let err = parse_end_time("until banana", &start, false).unwrap_err();
        assert!(matches!(err, LinkError::DateParse(text) if text == "until banana"));
    }
}
