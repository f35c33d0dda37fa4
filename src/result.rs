use reqwest::StatusCode;
use serde_json::Value;

pub const AUTH_ERROR_MESSAGE: &str = "Authentication failed. Please check your credentials.";

/// Outcome of one dispatched call. Exactly one variant per call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    Success {
        status: u16,
        body: Value,
    },
    /// HTTP 404. Expected empty outcome, not an error.
    NoResults,
    /// HTTP 401.
    AuthError,
    Failure {
        message: String,
        status: Option<u16>,
        raw_body: Option<String>,
    },
}

impl ApiResult {
    /// Sorts a completed HTTP exchange into one variant.
    ///
    /// ```rust
    /// use fdb_rs::ApiResult;
    /// use reqwest::StatusCode;
    ///
    /// let result = ApiResult::classify(StatusCode::NOT_FOUND, "{\"Message\":\"nope\"}", "https://x/y");
    /// assert_eq!(result, ApiResult::NoResults);
    /// ```
    pub fn classify(status: StatusCode, body: &str, url: &str) -> Self {
        match status {
            StatusCode::NOT_FOUND => ApiResult::NoResults,
            StatusCode::UNAUTHORIZED => ApiResult::AuthError,
            s if s.is_success() => Self::parse_success(s, body),
            s => ApiResult::Failure {
                message: http_error_message(s, url),
                status: Some(s.as_u16()),
                raw_body: non_empty(body),
            },
        }
    }

    fn parse_success(status: StatusCode, body: &str) -> Self {
        if body.trim().is_empty() {
            return ApiResult::Success {
                status: status.as_u16(),
                body: Value::Null,
            };
        }

        match serde_json::from_str(body) {
            Ok(body) => ApiResult::Success {
                status: status.as_u16(),
                body,
            },
            Err(err) => ApiResult::Failure {
                message: format!("Response body is not valid JSON: {}", err),
                status: Some(status.as_u16()),
                raw_body: Some(body.to_string()),
            },
        }
    }

    /// A transport-level failure: no status and no body.
    pub fn transport(err: impl std::fmt::Display) -> Self {
        ApiResult::Failure {
            message: err.to_string(),
            status: None,
            raw_body: None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiResult::Success { status, .. } => Some(*status),
            ApiResult::NoResults => Some(StatusCode::NOT_FOUND.as_u16()),
            ApiResult::AuthError => Some(StatusCode::UNAUTHORIZED.as_u16()),
            ApiResult::Failure { status, .. } => *status,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResult::AuthError | ApiResult::Failure { .. })
    }
}

fn http_error_message(status: StatusCode, url: &str) -> String {
    let class = if status.is_client_error() {
        "Client Error"
    } else if status.is_server_error() {
        "Server Error"
    } else {
        "Unexpected Status"
    };

    format!(
        "{} {}: {} for url: {}",
        status.as_u16(),
        class,
        status.canonical_reason().unwrap_or("Unknown"),
        url
    )
}

fn non_empty(body: &str) -> Option<String> {
    if body.is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const URL: &str = "https://api.example.com/PrescribableDrugs";

    #[test]
    fn not_found_ignores_the_body() {
        let result = ApiResult::classify(StatusCode::NOT_FOUND, "{\"Items\":[]}", URL);
        assert_eq!(result, ApiResult::NoResults);
        assert_eq!(result.status_code(), Some(404));
        assert!(!result.is_error());
    }

    #[test]
    fn unauthorized_is_an_auth_error() {
        let result = ApiResult::classify(StatusCode::UNAUTHORIZED, "denied", URL);
        assert_eq!(result, ApiResult::AuthError);
        assert_eq!(result.status_code(), Some(401));
        assert!(result.is_error());
    }

    #[test]
    fn success_parses_json() {
        let result = ApiResult::classify(StatusCode::OK, "{\"TotalResultCount\":1}", URL);
        assert_eq!(
            result,
            ApiResult::Success {
                status: 200,
                body: json!({"TotalResultCount": 1}),
            }
        );
    }

    #[test]
    fn empty_success_body_is_null() {
        let result = ApiResult::classify(StatusCode::NO_CONTENT, "", URL);
        assert_eq!(
            result,
            ApiResult::Success {
                status: 204,
                body: Value::Null,
            }
        );
    }

    #[test]
    fn success_with_garbage_is_a_failure_with_raw_body() {
        let result = ApiResult::classify(StatusCode::OK, "<html>oops</html>", URL);
        match result {
            ApiResult::Failure {
                status, raw_body, ..
            } => {
                assert_eq!(status, Some(200));
                assert_eq!(raw_body.as_deref(), Some("<html>oops</html>"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn server_error_message_names_status_and_url() {
        let result = ApiResult::classify(
            StatusCode::INTERNAL_SERVER_ERROR,
            "{\"Message\":\"boom\"}",
            URL,
        );
        assert_eq!(
            result,
            ApiResult::Failure {
                message: format!("500 Server Error: Internal Server Error for url: {}", URL),
                status: Some(500),
                raw_body: Some("{\"Message\":\"boom\"}".to_string()),
            }
        );
    }

    #[test]
    fn classification_is_total_and_exclusive() {
        for code in 100..=599u16 {
            let status = StatusCode::from_u16(code).unwrap();
            let result = ApiResult::classify(status, "{}", URL);
            let expected = match code {
                404 => "no_results",
                401 => "auth",
                200..=299 => "success",
                _ => "failure",
            };
            let actual = match result {
                ApiResult::NoResults => "no_results",
                ApiResult::AuthError => "auth",
                ApiResult::Success { .. } => "success",
                ApiResult::Failure { .. } => "failure",
            };
            assert_eq!(actual, expected, "status {}", code);
        }
    }

    #[test]
    fn transport_failures_carry_only_a_message() {
        let result = ApiResult::transport("connection refused");
        assert_eq!(result.status_code(), None);
        assert_eq!(
            result,
            ApiResult::Failure {
                message: "connection refused".to_string(),
                status: None,
                raw_body: None,
            }
        );
    }
}
