use sea_orm::DbErr;
use thiserror::Error;

/// Input field that failed validation; each has its own wire code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidField {
    Id,
    Label,
    Status,
    Distance,
    Threshold,
    Debounce,
    State,
}

impl InvalidField {
    pub fn code(&self) -> &'static str {
        match self {
            InvalidField::Id => "INVALID_ID",
            InvalidField::Label => "INVALID_LABEL",
            InvalidField::Status => "INVALID_STATUS",
            InvalidField::Distance => "INVALID_DISTANCE",
            InvalidField::Threshold => "INVALID_THRESHOLD",
            InvalidField::Debounce => "INVALID_DEBOUNCE",
            InvalidField::State => "INVALID_STATE",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    InvalidArgument { field: InvalidField, message: String },
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl ServiceError {
    pub fn invalid(field: InvalidField, message: impl Into<String>) -> Self {
        Self::InvalidArgument { field, message: message.into() }
    }

    pub fn not_found(entity: &str) -> Self { Self::NotFound(entity.to_string()) }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            ServiceError::Unavailable(_) => ErrorKind::Unavailable,
        }
    }

    /// Stable string code for external mapping/logging
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::InvalidArgument { field, .. } => field.code(),
            ServiceError::NotFound(_) => "NOT_FOUND",
            ServiceError::AlreadyExists(_) => "ALREADY_EXISTS",
            ServiceError::Unavailable(_) => "DB_ERROR",
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { Self::Unavailable(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_field_and_kind() {
        let e = ServiceError::invalid(InvalidField::Distance, "distance must be a number");
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        assert_eq!(e.code(), "INVALID_DISTANCE");
        assert_eq!(e.to_string(), "distance must be a number");

        assert_eq!(ServiceError::not_found("Spot").to_string(), "Spot not found");
        assert_eq!(ServiceError::AlreadyExists("Spot A1".into()).code(), "ALREADY_EXISTS");
        let db: ServiceError = DbErr::Custom("disk full".into()).into();
        assert_eq!(db.kind(), ErrorKind::Unavailable);
        assert_eq!(db.code(), "DB_ERROR");
    }
}
