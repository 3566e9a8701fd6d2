use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;

use serde::Serialize;

pub async fn handler404(path: Uri) -> Error {
    Error::NotFound {
        message: format!("Invalid path: {}", path),
    }
}

#[derive(Debug, Clone)]
pub enum Error {
    Validation { message: String },
    Conflict { message: String },
    NotFound { message: String },
    Storage { message: String },
}

#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    error: String,
}

impl Error {
    pub fn validation<S: Into<String>>(msg: S) -> Error {
        Error::Validation {
            message: msg.into(),
        }
    }

    pub fn not_found<S: Into<String>>(msg: S) -> Error {
        Error::NotFound {
            message: msg.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Conflict { .. } => StatusCode::CONFLICT,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(self) -> String {
        match self {
            Error::Validation { message }
            | Error::Conflict { message }
            | Error::NotFound { message }
            | Error::Storage { message } => message,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<uuid::Error> for Error {
    fn from(id: uuid::Error) -> Self {
        Self::Validation {
            message: format!("Invalid id: {}", id),
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        // 23505 is the Postgres unique-violation code; the schema constraint
        // is the backstop behind the registration pre-check.
        let unique_violation = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|code| code == "23505")
            .unwrap_or(false);
        if unique_violation {
            Self::Conflict {
                message: "Phone or Email already registered".to_string(),
            }
        } else {
            Self::Storage {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_map_to_expected_statuses() {
        assert_eq!(
            Error::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Conflict {
                message: "dup".to_string()
            }
            .status(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::not_found("gone").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::Storage {
                message: "down".to_string()
            }
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
