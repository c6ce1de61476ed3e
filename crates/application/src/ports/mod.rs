//! Port definitions for the application layer

pub mod extractor_port;
pub mod mailer_port;

pub use extractor_port::{ExtractionOutcome, ExtractorPort};
pub use mailer_port::{MailerPort, OutboundEmail};
