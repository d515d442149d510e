use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Diagnostic text without the category prefix, suitable for appending to a
    /// caller-supplied message.
    pub fn detail(&self) -> String {
        match self {
            AppError::Config(message)
            | AppError::Network(message)
            | AppError::Timeout(message)
            | AppError::Parse(message)
            | AppError::Serialization(message) => message.clone(),
            AppError::Http { status, message } => format!("{status} {message}"),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::AppError;

    #[test]
    fn display_prefixes_category() {
        let err = AppError::Http {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (502): Bad Gateway");
        assert_eq!(
            AppError::Network("connection refused".to_string()).to_string(),
            "Network error: connection refused"
        );
    }

    #[test]
    fn detail_drops_prefix() {
        let err = AppError::Timeout("Request timed out. Please try again.".to_string());
        assert_eq!(err.detail(), "Request timed out. Please try again.");

        let err = AppError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.detail(), "404 Not Found");
    }
}
