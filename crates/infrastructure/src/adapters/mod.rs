//! Port adapters

pub mod extractor;
pub mod mailer;

pub use extractor::OpenAiExtractorAdapter;
pub use mailer::MailgunMailerAdapter;
