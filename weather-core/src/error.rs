use thiserror::Error;

/// Message shown to the user whenever an aggregation attempt fails.
pub const FETCH_FAILED_MESSAGE: &str = "Unable to fetch weather data. Please try again.";

/// Message returned when the provider credential is not configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key not found in environment!";

/// Failures of a single request against a weather source.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No provider API key configured. Fatal to the request; nothing was sent.
    #[error("API key not found in environment!")]
    MissingCredential,

    /// The provider (or proxy) answered with a non-2xx status.
    #[error("upstream request failed with status {status}: {}", truncate_body(.body))]
    Upstream { status: u16, body: String },

    /// Transport failure before a response was received.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl WeatherError {
    pub fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }

    /// Status of the upstream response, if one was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
