use thiserror::Error;

/// Failure of a single upstream GET.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("Request failed ({0})")]
    Status(u16),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status(code) => Some(*code),
            FetchError::Transport(err) => err.status().map(|s| s.as_u16()),
            FetchError::Decode(_) => None,
        }
    }
}

/// Errors that abort the primary geocode → country chain.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Location has no country code")]
    MissingCountryCode,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Geolocation is not supported on this platform")]
    Unsupported,

    #[error("Position unavailable: {0}")]
    Unavailable(String),
}
