/// Failures talking to the backend API
///
/// `Status` with a 4xx code (other than 408 and 429) is the backend refusing
/// a request on business grounds. Every other variant means the backend could
/// not be used for this call.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request to {path} timed out")]
    Timeout { path: String },

    #[error("Network error calling {path}: {message}")]
    Network { path: String, message: String },

    #[error("Backend returned HTTP {status} for {path}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },

    #[error("Invalid backend client configuration: {0}")]
    Configuration(String),
}

impl TransportError {
    pub(crate) fn from_reqwest(path: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout {
                path: path.to_string(),
            }
        } else {
            TransportError::Network {
                path: path.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// Whether the backend understood the request and refused it
    pub fn is_business_rejection(&self) -> bool {
        match self {
            TransportError::Status { status, .. } => {
                (400..500).contains(status) && *status != 408 && *status != 429
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> TransportError {
        TransportError::Status {
            path: "/orders".to_string(),
            status: code,
            body: String::new(),
        }
    }

    #[test]
    fn test_client_errors_are_business_rejections() {
        assert!(status(400).is_business_rejection());
        assert!(status(422).is_business_rejection());
    }

    #[test]
    fn test_retryable_and_server_errors_are_not_rejections() {
        assert!(!status(408).is_business_rejection());
        assert!(!status(429).is_business_rejection());
        assert!(!status(500).is_business_rejection());
        assert!(!status(503).is_business_rejection());
    }

    #[test]
    fn test_transport_failures_are_not_rejections() {
        let timeout = TransportError::Timeout {
            path: "/orders".to_string(),
        };
        let invalid = TransportError::InvalidResponse {
            path: "/orders".to_string(),
            message: "expected value".to_string(),
        };
        assert!(!timeout.is_business_rejection());
        assert!(!invalid.is_business_rejection());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(status(503).to_string(), "Backend returned HTTP 503 for /orders");
        assert_eq!(
            TransportError::Timeout { path: "/menu".to_string() }.to_string(),
            "Request to /menu timed out"
        );
    }
}
