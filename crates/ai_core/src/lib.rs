//! AI Core - Model-backed extraction
//!
//! Provides the extraction engine abstraction and its OpenAI-compatible
//! implementation. The engine runs single-shot chat completions that are
//! expected (but never trusted) to return a JSON object.

pub mod config;
pub mod error;
pub mod openai;
pub mod ports;

pub use config::ExtractionConfig;
pub use error::InferenceError;
pub use openai::OpenAiExtractionEngine;
pub use ports::{ExtractionEngine, ExtractionRequest, ExtractionResponse, TokenUsage};
