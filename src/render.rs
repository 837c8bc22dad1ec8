//! Template URL assembly and HTML anchor emission.
//!
//! The link encodes the whole event into Google Calendar's event-template
//! page URL instead of calling a write API; the anchor wraps that URL in a
//! styled link that opens in a new tab.

use url::Url;

use crate::error::{LinkError, LinkResult};
use crate::event::{EventLink, EventTime};
use crate::parse;

/// Base URL of Google Calendar's "add event" template page.
const GCAL_RENDER_URL: &str = "https://www.google.com/calendar/event?action=TEMPLATE";

/// Resolve the start and end boundaries of a link request.
///
/// End text of one or two characters is treated as absent and falls back to
/// the default duration.
fn resolve_times(link: &EventLink) -> LinkResult<(EventTime, EventTime)> {
    let start = parse::parse_event_time(&link.start, link.all_day)?;

    let end = match link.end.as_deref() {
        Some(text) if text.chars().count() > 2 => {
            parse::parse_end_time(text, &start, link.all_day)?
        }
        _ => start
            .default_end()
            .ok_or_else(|| LinkError::DateParse(link.start.clone()))?,
    };

    Ok((start, end))
}

/// Build the pre-filled Google Calendar template URL for a link request.
///
/// Query values are form-encoded (spaces as `+`) and appended in a fixed
/// order: `text`, `dates`, then `details` and `location` only when
/// non-empty.
pub fn render_url(link: &EventLink) -> LinkResult<Url> {
    let (start, end) = resolve_times(link)?;
    let dates = format!("{}/{}", start.gcal_format(), end.gcal_format());

    let mut url = Url::parse(GCAL_RENDER_URL)?;
    {
        let mut params = url.query_pairs_mut();
        params.append_pair("text", &link.name);
        params.append_pair("dates", &dates);
        if let Some(details) = non_empty(link.description.as_deref()) {
            params.append_pair("details", details);
        }
        if let Some(location) = non_empty(link.location.as_deref()) {
            params.append_pair("location", location);
        }
    }

    Ok(url)
}

/// Build the complete anchor tag for a link request.
pub fn render_anchor(link: &EventLink) -> LinkResult<String> {
    let url = render_url(link)?;

    Ok(format!(
        "<a href=\"{}\" class=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
        escape_html(url.as_str()),
        escape_html(&link.class_attribute()),
        escape_html(&link.link_text),
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Minimal HTML escaping for attribute values and visible text.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
