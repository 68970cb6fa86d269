//! Bus Time API error types.

/// Errors that can occur when talking to the Bus Time API.
///
/// `Http`, `Api` and `Unauthorized` are transport failures; `Xml` and
/// `Json` mean the upstream answered but the body did not match the
/// expected document shape.
#[derive(Debug, thiserror::Error)]
pub enum BustimeError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check BUSTIME_API_KEY")]
    Unauthorized,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse an XML response body
    #[error("XML parse error: {message}")]
    Xml { message: String },

    /// Failed to parse a JSON response body
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },
}

impl BustimeError {
    /// True for failures that never reached a parseable response body.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            BustimeError::Http(_) | BustimeError::Api { .. } | BustimeError::Unauthorized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = BustimeError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = BustimeError::Xml {
            message: "unexpected end of stream".into(),
        };
        assert!(err.to_string().contains("XML parse error"));
    }

    #[test]
    fn transport_classification() {
        assert!(
            BustimeError::Api {
                status: 503,
                message: String::new()
            }
            .is_transport()
        );
        assert!(BustimeError::Unauthorized.is_transport());
        assert!(
            !BustimeError::Xml {
                message: String::new()
            }
            .is_transport()
        );
        assert!(
            !BustimeError::Json {
                message: String::new(),
                body: None
            }
            .is_transport()
        );
    }
}
