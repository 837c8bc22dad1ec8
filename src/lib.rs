//! Build "Add to Google Calendar" links from free-form event details.
//!
//! The crate turns an event description (title, natural-language start and
//! end text, optional details and location) into a pre-filled Google
//! Calendar event-template URL, wrapped in an HTML anchor ready to drop
//! into a page. Everything is value types and string formatting: no
//! calendar API is called and nothing is stored.
//!
//! Dates are reproduced exactly as written, with no timezone attached and
//! no conversion applied; all-day events follow Google's exclusive
//! end-date convention.
//!
//! ```
//! use gcal_link::EventLink;
//!
//! let html = EventLink::new("Team lunch", "June 30, 2025 12:00pm")
//!     .with_location("Cafe Rio")
//!     .to_html();
//!
//! assert!(html.contains("dates=20250630T120000%2F20250630T140000"));
//! assert!(html.contains("location=Cafe+Rio"));
//! assert!(html.ends_with(">Add to gCal</a>"));
//! ```
//!
//! Input that cannot be parsed renders as an empty string, so a template
//! can interpolate the result unconditionally. Use [`EventLink::try_to_html`]
//! or [`EventLink::try_url`] when the failure itself is interesting.

pub mod error;
pub mod event;
pub mod parse;
pub mod render;

pub use error::{LinkError, LinkResult};
pub use event::*;
