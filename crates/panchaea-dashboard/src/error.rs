use thiserror::Error;

/// Why a status fetch produced no report.
///
/// The `Display` text is what lands in the dashboard's error log, so two
/// failures with the same cause render identically and are deduplicated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout, or a broken body stream.
    #[error("network error: {0}")]
    Transport(String),

    #[error("request failed with status code {0}")]
    Status(u16),

    /// The endpoint answered 2xx with something that is not a status document.
    #[error("invalid status document: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether the endpoint should be considered unreachable.
    pub fn is_connectivity(&self) -> bool {
        !matches!(self, FetchError::Decode(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FetchError::Status(503).to_string(),
            "request failed with status code 503"
        );
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "network error: connection refused"
        );
        assert!(FetchError::Status(404).is_connectivity());
        assert!(!FetchError::Decode("eof".into()).is_connectivity());
    }
}
