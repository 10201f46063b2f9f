use crate::core::errors::ExchangeError;
use serde_json::Value;

/// Whether a call reads state or changes it
///
/// Writes report failure through a `success: false` flag even on 2xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Read,
    Write,
}

/// A 2xx response whose payload is ready for decoding
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedResponse {
    /// The `data` field of the body, `Null` when absent
    pub data: Value,
    /// The body's `success` flag, `true` when absent
    pub success: bool,
    /// The whole parsed body, for endpoints that are not wrapped in `data`
    pub body: Value,
}

/// Failure classes of a BtcTurk response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorOutcome {
    InvalidParameter { status: u16, message: String },
    Unauthorized { status: u16, message: String },
    NotFound { status: u16, message: String },
    UnprocessableRequest { status: u16, message: String },
    RateLimited { status: u16, message: String },
    ServerError { status: u16, message: String },
    UnknownStatus { status: u16, message: String },
    /// 2xx with a body that is not JSON
    Malformed { status: u16, message: String },
}

impl ErrorOutcome {
    pub const fn status(&self) -> u16 {
        match self {
            Self::InvalidParameter { status, .. }
            | Self::Unauthorized { status, .. }
            | Self::NotFound { status, .. }
            | Self::UnprocessableRequest { status, .. }
            | Self::RateLimited { status, .. }
            | Self::ServerError { status, .. }
            | Self::UnknownStatus { status, .. }
            | Self::Malformed { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParameter { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::NotFound { message, .. }
            | Self::UnprocessableRequest { message, .. }
            | Self::RateLimited { message, .. }
            | Self::ServerError { message, .. }
            | Self::UnknownStatus { message, .. }
            | Self::Malformed { message, .. } => message,
        }
    }
}

impl From<ErrorOutcome> for ExchangeError {
    fn from(outcome: ErrorOutcome) -> Self {
        match outcome {
            ErrorOutcome::InvalidParameter { status, message } => {
                Self::InvalidParameter { status, message }
            }
            ErrorOutcome::Unauthorized { status, message } => Self::AuthenticationError {
                message,
                status: Some(status),
                clock_skew: None,
            },
            ErrorOutcome::NotFound { status, message } => Self::NotFound { status, message },
            ErrorOutcome::UnprocessableRequest { status, message } => {
                Self::UnprocessableRequest { status, message }
            }
            ErrorOutcome::RateLimited { status, message } => Self::RateLimited { status, message },
            ErrorOutcome::ServerError { status, message } => Self::ServerError { status, message },
            ErrorOutcome::UnknownStatus { status, message } => {
                Self::UnknownStatus { status, message }
            }
            ErrorOutcome::Malformed { status, message } => Self::InvalidResponseFormat(format!(
                "status {} with unparseable body: {}",
                status, message
            )),
        }
    }
}

/// Human-readable message of a response body
///
/// The `message` field when the body is a JSON object carrying one,
/// otherwise the raw body.
pub fn server_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Map a status code and raw body onto a success payload or an error class
pub fn classify(
    status: u16,
    body: &str,
    kind: RequestKind,
) -> Result<ClassifiedResponse, ErrorOutcome> {
    let message = || server_message(body);

    match status {
        200..=299 => {}
        400 => return Err(ErrorOutcome::InvalidParameter { status, message: message() }),
        401 => return Err(ErrorOutcome::Unauthorized { status, message: message() }),
        404 => return Err(ErrorOutcome::NotFound { status, message: message() }),
        422 => return Err(ErrorOutcome::UnprocessableRequest { status, message: message() }),
        429 => return Err(ErrorOutcome::RateLimited { status, message: message() }),
        500..=599 => return Err(ErrorOutcome::ServerError { status, message: message() }),
        _ => return Err(ErrorOutcome::UnknownStatus { status, message: message() }),
    }

    let parsed: Value = if body.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(body).map_err(|e| ErrorOutcome::Malformed {
            status,
            message: e.to_string(),
        })?
    };

    let success = parsed
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    if kind == RequestKind::Write && !success {
        return Err(ErrorOutcome::InvalidParameter { status, message: message() });
    }

    let data = parsed.get("data").cloned().unwrap_or(Value::Null);

    Ok(ClassifiedResponse {
        data,
        success,
        body: parsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_extracts_data() {
        let body = r#"{"data":[{"pair":"BTCTRY"}],"success":true,"message":null,"code":0}"#;
        let response = classify(200, body, RequestKind::Read).unwrap();

        assert_eq!(response.data, json!([{"pair": "BTCTRY"}]));
        assert!(response.success);
    }

    #[test]
    fn test_missing_data_is_null() {
        let response = classify(200, r#"{"success":true}"#, RequestKind::Write).unwrap();
        assert_eq!(response.data, Value::Null);

        let empty = classify(204, "", RequestKind::Read).unwrap();
        assert_eq!(empty.data, Value::Null);
        assert!(empty.success);
    }

    #[test]
    fn test_write_with_success_false_is_invalid_parameter() {
        let body = r#"{"success":false,"message":"FAILED_INSUFFICIENT_BALANCE","code":1055}"#;
        let outcome = classify(200, body, RequestKind::Write).unwrap_err();

        assert_eq!(
            outcome,
            ErrorOutcome::InvalidParameter {
                status: 200,
                message: "FAILED_INSUFFICIENT_BALANCE".to_string(),
            }
        );
    }

    #[test]
    fn test_read_with_success_false_passes_through() {
        let response = classify(200, r#"{"success":false,"data":[]}"#, RequestKind::Read).unwrap();
        assert!(!response.success);
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (400, "InvalidParameter"),
            (401, "Unauthorized"),
            (404, "NotFound"),
            (422, "UnprocessableRequest"),
            (429, "RateLimited"),
            (500, "ServerError"),
            (503, "ServerError"),
            (403, "UnknownStatus"),
            (302, "UnknownStatus"),
        ];

        for (status, expected) in cases {
            let outcome = classify(status, "{}", RequestKind::Read).unwrap_err();
            let name = format!("{:?}", outcome);
            assert!(
                name.starts_with(expected),
                "status {} classified as {}",
                status,
                name
            );
            assert_eq!(outcome.status(), status);
        }
    }

    #[test]
    fn test_message_prefers_json_message_field() {
        let outcome =
            classify(401, r#"{"success":false,"message":"Invalid Nonce"}"#, RequestKind::Read)
                .unwrap_err();
        assert_eq!(outcome.message(), "Invalid Nonce");

        let raw = classify(502, "<html>Bad Gateway</html>", RequestKind::Read).unwrap_err();
        assert_eq!(raw.message(), "<html>Bad Gateway</html>");
    }

    #[test]
    fn test_malformed_success_body() {
        let outcome = classify(200, "not json", RequestKind::Read).unwrap_err();
        assert!(matches!(outcome, ErrorOutcome::Malformed { status: 200, .. }));
    }

    #[test]
    fn test_conversion_into_exchange_error() {
        let err: ExchangeError = ErrorOutcome::Unauthorized {
            status: 401,
            message: "denied".to_string(),
        }
        .into();
        assert!(matches!(
            err,
            ExchangeError::AuthenticationError { ref message, clock_skew: None, .. }
                if message == "denied"
        ));
        assert_eq!(err.status(), Some(401));

        let err: ExchangeError = ErrorOutcome::RateLimited {
            status: 429,
            message: "slow down".to_string(),
        }
        .into();
        assert_eq!(err.status(), Some(429));
    }
}
