//! Application services

pub mod action_links;
pub mod calendar_invite;
pub mod forward_service;
pub mod reply_formatter;

pub use action_links::detect_primary_link;
pub use calendar_invite::{build_ics, build_ics_from_details, detect_event_and_build_ics};
pub use forward_service::{FallbackStyle, ForwardService};
pub use reply_formatter::format_forward_email;
