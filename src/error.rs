use std::fmt;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

/// The kind of record a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Product,
    Customer,
    Purchase,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Product => "Product",
            Resource::Customer => "Customer",
            Resource::Purchase => "Purchase",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Conflict {0}")]
    Conflict(String),

    #[error("Purchase failed: {0}")]
    Transaction(String),

    #[error("Sales report unavailable: {0}")]
    Aggregation(String),

    #[error("ORM error")]
    OrmError(#[from] DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Keeps not-found and validation failures as they are and folds every
    /// other failure of a purchase transaction into [`AppError::Transaction`].
    pub fn into_transaction_error(self) -> Self {
        match self {
            AppError::NotFound(_) | AppError::BadRequest(_) | AppError::Transaction(_) => self,
            AppError::OrmError(err) => AppError::Transaction(err.to_string()),
            other => AppError::Transaction(other.to_string()),
        }
    }

    /// Maps a unique or foreign key violation to a 409 with `message`.
    pub fn from_constraint(err: DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_))
            | Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::OrmError(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Transaction(_) => StatusCode::BAD_REQUEST,
            AppError::Aggregation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::OrmError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            match &self {
                AppError::OrmError(err) => tracing::error!(error = %err, "database error"),
                AppError::Internal(err) => tracing::error!(error = %err, "internal error"),
                other => tracing::error!(error = %other, "request failed"),
            }
        }

        let message = self.to_string();
        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData { error: message }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_its_status_through_a_transaction() {
        let err = AppError::NotFound(Resource::Customer).into_transaction_error();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Customer not found");
    }

    #[test]
    fn store_failures_inside_a_purchase_become_bad_requests() {
        let err = AppError::OrmError(DbErr::Custom("connection reset".into()))
            .into_transaction_error();
        assert!(matches!(err, AppError::Transaction(_)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn aggregation_failures_are_server_errors() {
        let err = AppError::Aggregation("store unavailable".into());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
