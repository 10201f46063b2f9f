use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExchangeError {
    #[error("Authentication error: {message}{}", skew_suffix(.clock_skew))]
    AuthenticationError {
        message: String,
        /// HTTP status of the rejection, `None` when no response was classified
        status: Option<u16>,
        clock_skew: Option<String>,
    },

    #[error("Invalid request parameter ({status}): {message}")]
    InvalidParameter { status: u16, message: String },

    #[error("Endpoint not found ({status}): {message}")]
    NotFound { status: u16, message: String },

    #[error("Request could not be processed ({status}): {message}")]
    UnprocessableRequest { status: u16, message: String },

    #[error("Request limit exceeded ({status}): {message}")]
    RateLimited { status: u16, message: String },

    #[error("Internal server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("Unknown response code {status}: {message}")]
    UnknownStatus { status: u16, message: String },

    #[error("Client is not authenticated; call authenticate() first")]
    NotAuthenticated,

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid numeric input: {0}")]
    InvalidNumericInput(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponseFormat(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),

    #[error("Other error: {0}")]
    Other(String),
}

impl ExchangeError {
    /// HTTP status carried by errors that came from a classified response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationError { status, .. } => *status,
            Self::InvalidParameter { status, .. }
            | Self::NotFound { status, .. }
            | Self::UnprocessableRequest { status, .. }
            | Self::RateLimited { status, .. }
            | Self::ServerError { status, .. }
            | Self::UnknownStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Errors raised locally, before anything was sent
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated
                | Self::UnknownSymbol(_)
                | Self::InvalidNumericInput(_)
                | Self::InvalidCredentials(_)
                | Self::InvalidOrder(_)
                | Self::SerializationError(_)
                | Self::ConfigurationError(_)
                | Self::ConfigError(_)
        )
    }
}

fn skew_suffix(clock_skew: &Option<String>) -> String {
    clock_skew
        .as_ref()
        .map(|report| format!(" ({})", report))
        .unwrap_or_default()
}
