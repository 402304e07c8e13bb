use thiserror::Error;

/// Failure modes of a single completion request.
///
/// The `Display` strings are what the end user sees: the caller flattens any
/// of these into the tool's reply text, so each message has to stand on its
/// own inside a chat transcript.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error(
        "Error: OPENAI_API_KEY or OPENAI_BASE_URL environment variables are not set. \
         Please configure them in mcp.json."
    )]
    MissingConfig,

    #[error("HTTP error calling the Foundry endpoint: {status} - {reason}. Body: {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Error calling the Foundry endpoint: {0}")]
    Transport(String),

    #[error("Unexpected completions response: {0}")]
    Malformed(String),
}
