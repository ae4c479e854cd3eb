//! Domain-level error payload.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! responses; the domain only records a stable code, a human-readable
//! message, and optional structured details (for example the rejected field
//! of a recipe payload).

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails a declared recipe/payload invariant.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// A uniqueness rule was violated (duplicate favorite, cart entry,
    /// subscription, or short code).
    Conflict,
    /// An unexpected error occurred inside the domain.
    InternalError,
    /// A backing service (database, blob store) is unavailable.
    ServiceUnavailable,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    #[schema(example = "invalid_request")]
    code: ErrorCode,
    #[schema(example = "Something went wrong")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

/// Validation errors emitted by the fallible constructor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// Message was empty or whitespace-only.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl Error {
    /// Fallible constructor that validates the message content.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self {
            code,
            message,
            details: None,
        })
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary error details for adapters.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Build an error from possibly runtime-provided content, substituting
    /// a generic description when the message fails validation. Adapters
    /// forward database-supplied text here, so a blank message must not
    /// panic.
    fn new_or(code: ErrorCode, message: String, fallback: &'static str) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: fallback.to_owned(),
            details: None,
        })
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::InvalidRequest, message.into(), "invalid request")
    }

    /// Reject a payload with per-field detail, as required for recipe
    /// validation failures.
    pub fn validation_failed(field: &'static str, message: impl Into<String>) -> Self {
        Self::invalid_request(message).with_details(json!({ "field": field }))
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::Unauthorized, message.into(), "unauthorized")
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::Forbidden, message.into(), "forbidden")
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::NotFound, message.into(), "not found")
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::Conflict, message.into(), "conflict")
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new_or(ErrorCode::InternalError, message.into(), "internal error")
    }

    /// Convenience constructor for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new_or(
            ErrorCode::ServiceUnavailable,
            message.into(),
            "service unavailable",
        )
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn try_new_rejects_blank_messages(#[case] message: &str) {
        let err = Error::try_new(ErrorCode::NotFound, message).expect_err("must reject");
        assert_eq!(err, ErrorValidationError::EmptyMessage);
    }

    #[rstest]
    #[case(Error::conflict(""), ErrorCode::Conflict, "conflict")]
    #[case(Error::internal("   "), ErrorCode::InternalError, "internal error")]
    #[case(
        Error::service_unavailable(""),
        ErrorCode::ServiceUnavailable,
        "service unavailable"
    )]
    fn blank_adapter_messages_fall_back_to_a_generic_description(
        #[case] err: Error,
        #[case] code: ErrorCode,
        #[case] message: &str,
    ) {
        assert_eq!(err.code(), code);
        assert_eq!(err.message(), message);
    }

    #[rstest]
    fn validation_failed_records_the_field() {
        let err = Error::validation_failed("cooking_time", "cooking time too small");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details attached");
        assert_eq!(details["field"], "cooking_time");
    }

    #[rstest]
    fn serialises_snake_case_codes() {
        let err = Error::conflict("already present");
        let value = serde_json::to_value(&err).expect("serialises");
        assert_eq!(value["code"], "conflict");
        assert_eq!(value["message"], "already present");
        assert!(value.get("details").is_none());
    }
}
