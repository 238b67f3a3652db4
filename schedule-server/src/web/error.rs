//! Web error type.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::aggregate::AggregateError;
use crate::domain::InvalidDaySubset;

use super::dto::ErrorResponse;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message } | AppError::NotFound { message } => message,
        }
    }
}

impl From<AggregateError> for AppError {
    fn from(e: AggregateError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidDaySubset> for AppError {
    fn from(e: InvalidDaySubset) -> Self {
        AppError::BadRequest {
            message: format!("invalid days parameter: {e}"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::BadRequest {
            message: format!("invalid schedule: {}", e.body_text()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::BadRequest {
            message: format!("invalid days parameter: {}", e.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(%status, "{}", self.message());

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Day, TimeOfDay};

    #[test]
    fn aggregate_errors_are_bad_requests() {
        let source = TimeOfDay::new("7:00").parse().unwrap_err();
        let err = AppError::from(AggregateError::MalformedTime {
            day: Day::Monday,
            source,
        });

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message(),
            "monday: malformed time \"7:00\": expected HH:MM format"
        );
    }

    #[test]
    fn subset_errors_are_bad_requests() {
        let err = AppError::from("someday".parse::<crate::domain::DaySubset>().unwrap_err());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.message().starts_with("invalid days parameter"));
    }

    #[test]
    fn into_response_sets_status() {
        let response = AppError::NotFound {
            message: "no route for /nowhere".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
