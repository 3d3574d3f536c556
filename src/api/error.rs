//! Error types for catalog API calls

/// Errors from a single API request
///
/// No variant is fatal to the application: the session degrades the
/// affected target to an empty or stale result set and stays interactive.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure or undecodable response body
    #[error("Request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::Status {
            status: 502,
            url: "http://shop.example/product".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502 for http://shop.example/product");
    }
}
