//! Conversions from external infrastructure errors into domain errors.

use foresight_domain::ForesightError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ForesightError);

impl From<InfraError> for ForesightError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ForesightError> for InfraError {
    fn from(value: ForesightError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(http_error_to_domain(value))
    }
}

pub(crate) fn http_error_to_domain(err: HttpError) -> ForesightError {
    if err.is_timeout() {
        return ForesightError::Network("HTTP request timed out".into());
    }

    if err.is_connect() {
        return ForesightError::Network("HTTP connection failure".into());
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        let message =
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

        return match code {
            404 => ForesightError::NotFound(message),
            400..=499 => ForesightError::InvalidInput(message),
            _ => ForesightError::Network(message),
        };
    }

    ForesightError::Network(format!("HTTP error: {err}"))
}
