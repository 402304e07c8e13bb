pub mod client;
pub mod config;
pub mod error;

pub use client::{ChatMessage, CompletionProvider, FoundryClient};
pub use config::FoundryConfig;
pub use error::CompletionError;
