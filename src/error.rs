//! Error types for the PATS client library.

use rust_decimal::Decimal;
use thiserror::Error;
use time::Date;

use crate::types::common::{FieldValidation, MediaSubtype, MediaType};

/// The main error type for all PATS client operations.
#[derive(Error, Debug)]
pub enum PatsError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A request payload failed local validation before any network call
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The PATS service rejected the request
    #[error("PATS API error: {0}")]
    Remote(RemoteError),

    /// Invalid response from the API
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A locally detectable request defect.
///
/// These are raised by the request builders before a single byte goes over
/// the wire, so a bad payload never costs a remote round-trip. Field names in
/// the messages are the wire names the service itself uses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was left empty.
    #[error("required field `{field}` is missing")]
    MissingField {
        /// Wire name of the missing field
        field: &'static str,
    },

    /// A date string does not name a valid calendar date.
    #[error("field `{field}` is not a valid YYYY-MM-DD calendar date: `{value}`")]
    InvalidDate {
        /// Wire name of the offending field
        field: String,
        /// The rejected input
        value: String,
    },

    /// A date range runs backwards.
    #[error("`{field}` range is inverted: {start} is after {end}")]
    StartAfterEnd {
        /// Wire name of the range's start field
        field: &'static str,
        /// Range start
        start: Date,
        /// Range end
        end: Date,
    },

    /// Campaign budget must be positive when given.
    #[error("campaign budget must be greater than zero, got {budget}")]
    NonPositiveBudget {
        /// The rejected budget
        budget: Decimal,
    },

    /// A campaign needs at least one of the print/digital media flags.
    #[error("campaign must include at least one of print or digital media")]
    EmptyMediaMix,

    /// An order needs at least one line item.
    #[error("an order requires at least one line item")]
    EmptyLineItems,

    /// A line item's variant does not match the order's media type.
    #[error(
        "order media type {media_type} does not match {line_item} line item `{line_number}`"
    )]
    LineItemMediaType {
        /// The order's media type
        media_type: MediaType,
        /// The line item's variant
        line_item: MediaType,
        /// The offending line item's `lineNumber`
        line_number: String,
    },

    /// A flighting window falls outside its line item's flight dates.
    #[error(
        "flighting window {start}..{end} on line item `{line_number}` falls outside \
         flight dates {flight_start}..{flight_end}"
    )]
    FlightingOutsideFlight {
        /// The offending line item's `lineNumber`
        line_number: String,
        /// Flighting entry start
        start: Date,
        /// Flighting entry end
        end: Date,
        /// Line item flight start
        flight_start: Date,
        /// Line item flight end
        flight_end: Date,
    },

    /// A media subtype was paired with the wrong media type.
    #[error("media subtype {sub_media_type} is not valid for media type {media_type}")]
    SubtypeForMediaType {
        /// The product's media type
        media_type: MediaType,
        /// The mismatched subtype
        sub_media_type: MediaSubtype,
    },
}

impl ValidationError {
    /// Create a missing-field error for the given wire field name.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

/// An error reported by the PATS service itself.
///
/// The service's message and field-level validation records are carried
/// verbatim; nothing is summarized away in translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteError {
    /// HTTP status of the response
    pub status: u16,
    /// Service error code, when the error body carried one
    pub code: Option<String>,
    /// Human-readable error message
    pub message: String,
    /// Field-level validation records, exactly as returned
    pub field_validations: Vec<FieldValidation>,
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)?;
        if !self.field_validations.is_empty() {
            write!(f, " ({} field validations)", self.field_validations.len())?;
        }
        Ok(())
    }
}

impl RemoteError {
    /// Create a new remote error from a status and message.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            code: None,
            message: message.into(),
            field_validations: Vec::new(),
        }
    }

    /// Build a remote error from a non-success HTTP status and response body.
    ///
    /// Known PATS statuses get a stable reason; the raw body is appended so
    /// no remote message content is lost.
    pub fn from_status(status: u16, body: &str) -> Self {
        let reason = match status {
            400 => "Bad request, the parameters you provided did not validate",
            401 => "Not authorized, the API key and/or user id given is not valid",
            403 => "Forbidden, the server is refusing to respond to this request",
            404 => "Not found, an entity from the request does not exist",
            406 => "Not acceptable, your IP address has exceeded the API limit",
            409 => "Not approved, the user has yet to approve your retrieve request",
            422 => "Unprocessable entity, the request failed data validation",
            500 => "Internal server error",
            _ => "Unexpected HTTP status",
        };
        let body = body.trim();
        let message = if body.is_empty() {
            reason.to_string()
        } else {
            format!("{reason}: {body}")
        };
        Self::new(status, message)
    }

    /// Build a remote error from catalogue validation records returned with
    /// an otherwise successful response.
    ///
    /// The catalogue API reports per-product rejections inside a 200 body.
    pub(crate) fn catalogue_validation(field_validations: Vec<FieldValidation>) -> Self {
        let message = field_validations
            .first()
            .map(|v| v.message.clone())
            .unwrap_or_else(|| "product catalogue validation failed".to_string());
        Self {
            status: 200,
            code: None,
            message,
            field_validations,
        }
    }

    /// Check if this error means the API key was rejected.
    pub fn is_invalid_key(&self) -> bool {
        self.status == 401
    }

    /// Check if this error means the caller's IP exceeded the API limit.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 406
    }

    /// Check if this error carries remote data-validation failures.
    pub fn is_validation_failure(&self) -> bool {
        self.status == 422 || !self.field_validations.is_empty()
    }

    /// Check if the failure happened on the PATS side.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }
}

/// Error body shape the service attaches to 422 responses.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct RemoteErrorBody {
    #[serde(default)]
    pub code: Option<ErrorCode>,
    pub message: String,
    #[serde(default, rename = "fieldValidations")]
    pub field_validations: Vec<FieldValidation>,
}

/// The service reports error codes as numbers or strings depending on the
/// endpoint.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorCode {
    Number(i64),
    Text(String),
}

impl RemoteErrorBody {
    pub(crate) fn into_remote_error(self, status: u16) -> RemoteError {
        let code = self.code.map(|code| match code {
            ErrorCode::Number(n) => n.to_string(),
            ErrorCode::Text(s) => s,
        });
        RemoteError {
            status,
            code,
            message: self.message,
            field_validations: self.field_validations,
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn test_from_status_known_reason() {
        let error = RemoteError::from_status(401, "");
        assert!(error.is_invalid_key());
        assert!(error.message.contains("Not authorized"));
        assert!(error.field_validations.is_empty());
    }

    #[test]
    fn test_from_status_preserves_body() {
        let error = RemoteError::from_status(500, "upstream exploded");
        assert!(error.is_server_error());
        assert!(error.message.contains("Internal server error"));
        assert!(error.message.contains("upstream exploded"));
    }

    #[test]
    fn test_remote_error_display_counts_validations() {
        let error = RemoteError {
            status: 200,
            code: None,
            message: "order rejected".to_string(),
            field_validations: vec![
                FieldValidation::message_only("orderId is required"),
                FieldValidation::message_only("publisherId is unknown"),
            ],
        };
        assert_eq!(
            error.to_string(),
            "HTTP 200: order rejected (2 field validations)"
        );
        assert!(error.is_validation_failure());
    }

    #[test]
    fn test_validation_error_names_field() {
        let error = ValidationError::InvalidDate {
            field: "coverDate".to_string(),
            value: "2015-02-30".to_string(),
        };
        assert!(error.to_string().contains("coverDate"));
        assert!(error.to_string().contains("2015-02-30"));
    }

    #[test]
    fn test_start_after_end_display() {
        let error = ValidationError::StartAfterEnd {
            field: "StartDate",
            start: date!(2015 - 03 - 01),
            end: date!(2015 - 02 - 01),
        };
        let text = error.to_string();
        assert!(text.contains("StartDate"));
        assert!(text.contains("2015-03-01"));
    }
}
