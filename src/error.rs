use axum::http::StatusCode;

use crate::db::dao::DaoLayerError;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Maps a bare HTTP error status (e.g. an extractor rejection) onto the
    /// closest application error.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::not_found(message),
            StatusCode::CONFLICT => Self::conflict(message),
            status if status.is_client_error() => Self::bad_request(message),
            _ => Self::internal(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message.as_str(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match err {
            DaoLayerError::NotFound { .. } | DaoLayerError::NotLinked { .. } => {
                AppError::not_found(err.to_string())
            }
            DaoLayerError::AlreadyLinked { .. } => AppError::conflict(err.to_string()),
            DaoLayerError::Db(_) | DaoLayerError::IdSpaceExhausted { .. } => {
                tracing::error!(error = %err, "storage failure");
                AppError::internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sea_orm::DbErr;

    use super::AppError;
    use crate::db::dao::DaoLayerError;

    #[test]
    fn dao_errors_map_to_statuses() {
        let cases = [
            (
                DaoLayerError::NotFound {
                    entity: "lists",
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DaoLayerError::NotLinked {
                    task_id: 1,
                    list_id: 2,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DaoLayerError::AlreadyLinked {
                    task_id: 1,
                    list_id: 2,
                },
                StatusCode::CONFLICT,
            ),
            (
                DaoLayerError::Db(DbErr::Custom("disk full".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(AppError::from(err).status(), expected);
        }
    }

    #[test]
    fn not_found_message_names_the_table() {
        let err = AppError::from(DaoLayerError::NotFound {
            entity: "tasks",
            id: 12,
        });
        assert_eq!(err.message(), "tasks not found (id=12)");
    }

    #[test]
    fn bare_statuses_fold_into_variants() {
        assert!(matches!(
            AppError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "bad json"),
            AppError::BadRequest(_)
        ));
        assert!(matches!(
            AppError::from_status(StatusCode::BAD_GATEWAY, "upstream"),
            AppError::Internal(_)
        ));
    }
}
