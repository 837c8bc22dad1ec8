//! Core event types.
//!
//! [`EventLink`] is the caller-facing request value: free-form text for the
//! event fields plus display options for the generated button. [`EventTime`]
//! is a parsed calendar point, either date-only (all-day) or a local
//! datetime.

use chrono::{Days, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::LinkResult;
use crate::render;

/// Default duration for timed events without an explicit end.
pub const DEFAULT_EVENT_HOURS: i64 = 2;

/// Default visible text for the generated anchor.
pub const DEFAULT_LINK_TEXT: &str = "Add to gCal";

/// Default CSS classes for the generated anchor.
pub const DEFAULT_CSS_CLASSES: [&str; 2] = ["gcal-button", "button"];

/// A point on the calendar, either date-only (all-day) or a local datetime.
///
/// Values are naive on purpose: the formatted output reproduces whatever was
/// parsed, with no timezone attached and no conversion applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    /// All-day boundary, formatted as `YYYYMMDD`.
    Date(NaiveDate),
    /// Local wall-clock boundary, formatted as `YYYYMMDDTHHMMSS`.
    DateTime(NaiveDateTime),
}

impl EventTime {
    /// Format for the `dates` parameter of a Google Calendar template URL.
    pub fn gcal_format(&self) -> String {
        match self {
            EventTime::Date(d) => d.format("%Y%m%d").to_string(),
            EventTime::DateTime(dt) => dt.format("%Y%m%dT%H%M%S").to_string(),
        }
    }

    /// Default end boundary: one day after an all-day start (Google's
    /// exclusive end convention), [`DEFAULT_EVENT_HOURS`] after a timed one.
    /// `None` when the shifted boundary falls outside the supported date
    /// range.
    pub fn default_end(&self) -> Option<EventTime> {
        match self {
            EventTime::Date(_) => self.plus_days(1),
            EventTime::DateTime(dt) => dt
                .checked_add_signed(Duration::hours(DEFAULT_EVENT_HOURS))
                .map(EventTime::DateTime),
        }
    }

    /// Shift the boundary forward by whole calendar days, `None` when the
    /// result falls outside the supported date range.
    pub fn plus_days(&self, days: u64) -> Option<EventTime> {
        match self {
            EventTime::Date(d) => d.checked_add_days(Days::new(days)).map(EventTime::Date),
            EventTime::DateTime(dt) => {
                dt.checked_add_days(Days::new(days)).map(EventTime::DateTime)
            }
        }
    }

    /// Shift the boundary by an arbitrary duration, `None` when the result
    /// falls outside the supported date range.
    pub fn checked_add(&self, duration: Duration) -> Option<EventTime> {
        match self {
            EventTime::Date(d) => d.checked_add_signed(duration).map(EventTime::Date),
            EventTime::DateTime(dt) => dt.checked_add_signed(duration).map(EventTime::DateTime),
        }
    }
}

/// An "Add to Google Calendar" button under construction.
///
/// Values are built with [`EventLink::new`] plus `with_*` overrides, then
/// rendered with [`EventLink::to_html`] (lenient, collapses failures to an
/// empty string) or [`EventLink::try_to_html`] (structured errors).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    /// Event title, shown in the calendar entry.
    pub name: String,
    /// Free-form start text, e.g. "June 30, 2025 8:00pm" or "tomorrow noon".
    pub start: String,
    /// Optional free-form end text: a date/time of its own or a duration
    /// such as "2hours".
    pub end: Option<String>,
    /// Optional event description.
    pub description: Option<String>,
    /// Optional event location, geocoded by the calendar on open.
    pub location: Option<String>,
    /// Date-only event. Boundaries format as `YYYYMMDD` and the end date is
    /// exclusive.
    pub all_day: bool,
    /// Visible text of the anchor.
    pub link_text: String,
    /// CSS classes of the anchor, joined with single spaces.
    pub css_classes: Vec<String>,
}

impl EventLink {
    /// Create a link request with default display options.
    ///
    /// The default class list is built fresh per call, so mutating it on one
    /// value never leaks into another.
    pub fn new(name: impl Into<String>, start: impl Into<String>) -> Self {
        EventLink {
            name: name.into(),
            start: start.into(),
            end: None,
            description: None,
            location: None,
            all_day: false,
            link_text: DEFAULT_LINK_TEXT.to_string(),
            css_classes: DEFAULT_CSS_CLASSES.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Set the end text: a date/time or a duration applied to the start.
    pub fn with_end(mut self, end: impl Into<String>) -> Self {
        self.end = Some(end.into());
        self
    }

    /// Set the event description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the event location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Mark the event as all-day (date-only).
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Override the anchor's visible text.
    pub fn with_link_text(mut self, link_text: impl Into<String>) -> Self {
        self.link_text = link_text.into();
        self
    }

    /// Replace the anchor's CSS class list.
    pub fn with_css_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.css_classes = classes.into_iter().map(Into::into).collect();
        self
    }

    /// The `class` attribute value: classes joined with single spaces.
    pub fn class_attribute(&self) -> String {
        self.css_classes.join(" ")
    }

    /// Build the pre-filled Google Calendar template URL.
    pub fn try_url(&self) -> LinkResult<Url> {
        render::render_url(self)
    }

    /// Build the complete anchor tag.
    pub fn try_to_html(&self) -> LinkResult<String> {
        render::render_anchor(self)
    }

    /// Build the complete anchor tag, collapsing any failure to `""`.
    ///
    /// Malformed input yields no link rather than a broken fragment; the
    /// reason is logged at warn level.
    pub fn to_html(&self) -> String {
        match render::render_anchor(self) {
            Ok(html) => html,
            Err(e) => {
                warn!("Could not build calendar link for \"{}\": {}", self.name, e);
                String::new()
            }
        }
    }
}
