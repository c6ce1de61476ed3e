//! OpenAI-compatible extraction engine

mod client;

pub use client::OpenAiExtractionEngine;
