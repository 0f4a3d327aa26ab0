use crate::api::error::ApiError;
use crate::logging::LogLevel;

/// Picks the activity-log level for a failed backend call.
#[derive(Debug, Clone, Default)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, error: &ApiError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            ApiError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            ApiError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: the gateway refuses us or answers garbage
            ApiError::Http { status, .. } if *status == 401 => LogLevel::Error,
            ApiError::Http { status, .. } if *status == 403 => LogLevel::Error,
            ApiError::Decode(_) => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> ApiError {
        ApiError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_classify_http_statuses() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify(&http(502)), LogLevel::Warn);
        assert_eq!(classifier.classify(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn test_classify_decode_error() {
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(
            ErrorClassifier::new().classify(&ApiError::Decode(decode)),
            LogLevel::Error
        );
    }
}
