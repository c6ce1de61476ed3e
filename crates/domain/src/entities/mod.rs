//! Entities

pub mod calendar_event;
pub mod forward_package;

pub use calendar_event::{CalendarDetails, CalendarEvent};
pub use forward_package::{ForwardPackage, Link, MAX_KEY_POINTS, MAX_LINKS};
