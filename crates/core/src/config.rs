use std::env;
use std::time::Duration;

/// Default timeout for a single completion request. The remote call is the
/// only blocking point in the whole process, so a hung endpoint would
/// otherwise wedge the server forever.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the completions endpoint, read once at startup.
///
/// Both values are optional on purpose: a server started without credentials
/// still runs and answers protocol requests, and the missing configuration is
/// reported inside the tool reply instead of failing the process.
#[derive(Debug, Clone)]
pub struct FoundryConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub timeout: Duration,
}

impl FoundryConfig {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            endpoint: Some(endpoint.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Reads `OPENAI_API_KEY` and `OPENAI_BASE_URL`. Empty values count as
    /// unset.
    pub fn from_env() -> Self {
        Self {
            api_key: non_empty_var("OPENAI_API_KEY"),
            endpoint: non_empty_var("OPENAI_BASE_URL"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for FoundryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}
