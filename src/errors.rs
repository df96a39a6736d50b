use axum::http::StatusCode;
use chrono::NaiveDate;
use thiserror::Error;

/// Rejections raised by the tracker core. None of these are fatal; each
/// carries an advisory the page shows as a notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("habit name is empty")]
    EmptyName,

    #[error("habit '{0}' already exists")]
    DuplicateName(String),

    #[error("habit limit of {0} reached")]
    CapacityExceeded(usize),

    #[error("habit '{0}' not found")]
    NotFound(String),

    #[error("date is after today")]
    FutureDate,

    #[error("date is before {0}")]
    TooFarBack(NaiveDate),

    #[error("no habit at position {0}")]
    InvalidSelection(usize),

    #[error("stored payload is corrupt: {0}")]
    PersistenceCorrupt(String),
}

impl TrackerError {
    pub fn advisory(&self) -> &'static str {
        match self {
            TrackerError::EmptyName => "Please enter a habit!",
            TrackerError::DuplicateName(_) => "Cannot add repeated habit!",
            TrackerError::CapacityExceeded(_) => "Habit limit reached!",
            TrackerError::NotFound(_) => "That habit no longer exists!",
            TrackerError::FutureDate => "No time traveling into the future bud",
            TrackerError::TooFarBack(_) => "That date is too far back!",
            TrackerError::InvalidSelection(_) => "No habit to show there!",
            TrackerError::PersistenceCorrupt(_) => "Saved habits could not be read and were reset.",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            TrackerError::EmptyName
            | TrackerError::DuplicateName(_)
            | TrackerError::FutureDate
            | TrackerError::TooFarBack(_)
            | TrackerError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            TrackerError::CapacityExceeded(_) => StatusCode::CONFLICT,
            TrackerError::NotFound(_) => StatusCode::NOT_FOUND,
            TrackerError::PersistenceCorrupt(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        Self {
            status: err.status(),
            message: err.advisory().to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_errors_map_to_advisories() {
        let err = AppError::from(TrackerError::DuplicateName("run".into()));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Cannot add repeated habit!");

        let err = AppError::from(TrackerError::CapacityExceeded(8));
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = AppError::from(TrackerError::NotFound("swim".into()));
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
