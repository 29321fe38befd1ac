use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::RecordId;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Exit time {exit} is earlier than entry time {entry}")]
    InvalidDuration {
        entry: NaiveDateTime,
        exit: NaiveDateTime,
    },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Parking record {0} has already exited")]
    AlreadyExited(RecordId),

    #[error("Remote service failure: {0}")]
    RemoteFailure(String),
}

impl DomainError {
    pub fn record_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "ParkingRecord",
            field: "id",
            value: id.to_string(),
        }
    }

    pub fn tier_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "RateTier",
            field: "id",
            value: id.to_string(),
        }
    }

    /// Errors raised before anything was sent to the remote API.
    pub fn is_client_side(&self) -> bool {
        !matches!(self, Self::RemoteFailure(_))
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected response ({status}): {message}")]
    UnexpectedResponse { status: u16, message: String },
}

impl From<InfraError> for DomainError {
    fn from(err: InfraError) -> Self {
        match err {
            InfraError::UnexpectedResponse { message, .. } => DomainError::RemoteFailure(message),
            other => DomainError::RemoteFailure(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_response_keeps_server_message() {
        let err: DomainError = InfraError::UnexpectedResponse {
            status: 422,
            message: "Plat nomor sudah parkir".into(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Remote service failure: Plat nomor sudah parkir"
        );
    }

    #[test]
    fn not_found_display() {
        let err = DomainError::record_not_found("42");
        assert_eq!(err.to_string(), "Not found: ParkingRecord with id=42");
        assert!(err.is_client_side());
    }

    #[test]
    fn remote_failure_is_not_client_side() {
        assert!(!DomainError::RemoteFailure("boom".into()).is_client_side());
    }
}
