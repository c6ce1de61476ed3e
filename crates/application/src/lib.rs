//! Application layer - Use cases and orchestration
//!
//! Contains the forward-package pipeline: text normalization, free-text
//! date search, heuristic event detection, the model-or-fallback
//! synthesizer, the calendar-invite encoder, and the port definitions the
//! adapters implement.

pub mod date_search;
pub mod email_text;
pub mod error;
pub mod event_detector;
pub mod ports;
pub mod services;

pub use date_search::{DateBias, search_first_datetime};
pub use error::ApplicationError;
pub use event_detector::{detect_event, detect_event_at};
pub use ports::*;
pub use services::*;
