//! API error types with HTTP problem-body mapping.

use application::ApplicationError;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const BAD_REQUEST_TYPE: &str = "https://datatracker.ietf.org/doc/html/rfc9110#section-15.5.1";
const NOT_FOUND_TYPE: &str = "https://datatracker.ietf.org/doc/html/rfc9110#section-15.5.5";
const INTERNAL_ERROR_TYPE: &str = "https://datatracker.ietf.org/doc/html/rfc9110#section-15.6.1";

pub const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";

/// Problem body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    pub title: &'static str,
    pub status: u16,
    #[serde(rename = "type")]
    pub problem_type: &'static str,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// A use case failed. `expose_detail` adds the internal cause to 500 bodies.
    Application {
        error: ApplicationError,
        expose_detail: bool,
    },
    /// The request body could not be decoded.
    BadRequest(String),
}

impl ApiError {
    pub fn application(error: ApplicationError, expose_detail: bool) -> Self {
        ApiError::Application {
            error,
            expose_detail,
        }
    }

    fn into_problem(self) -> ProblemDetails {
        match self {
            ApiError::BadRequest(message) => problem(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                BAD_REQUEST_TYPE,
                vec![message],
            ),
            ApiError::Application {
                error,
                expose_detail,
            } => {
                let errors = error.messages();
                match error {
                    ApplicationError::Validation(_) => problem(
                        StatusCode::BAD_REQUEST,
                        "Bad Request",
                        BAD_REQUEST_TYPE,
                        errors,
                    ),
                    ApplicationError::NotFound { .. } => {
                        problem(StatusCode::NOT_FOUND, "Not Found", NOT_FOUND_TYPE, errors)
                    }
                    ApplicationError::Internal { detail, .. } => {
                        tracing::error!(
                            error = ?errors,
                            detail = detail.as_deref().unwrap_or_default(),
                            "internal server error"
                        );
                        ProblemDetails {
                            detail: detail.filter(|_| expose_detail),
                            ..problem(
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "Internal Server Error",
                                INTERNAL_ERROR_TYPE,
                                errors,
                            )
                        }
                    }
                }
            }
        }
    }
}

fn problem(
    status: StatusCode,
    title: &'static str,
    problem_type: &'static str,
    errors: Vec<String>,
) -> ProblemDetails {
    ProblemDetails {
        title,
        status: status.as_u16(),
        problem_type,
        errors,
        detail: None,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let problem = self.into_problem();
        let status =
            StatusCode::from_u16(problem.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            axum::Json(problem),
        )
            .into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(error: ApplicationError) -> Self {
        ApiError::application(error, false)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let problem = ApiError::from(ApplicationError::Validation(vec![
            "Invalid email format".to_string(),
        ]))
        .into_problem();

        assert_eq!(problem.status, 400);
        assert_eq!(problem.title, "Bad Request");
        assert_eq!(problem.problem_type, BAD_REQUEST_TYPE);
        assert_eq!(problem.errors, vec!["Invalid email format"]);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let problem =
            ApiError::from(ApplicationError::not_found("20250801-ABCD1234")).into_problem();

        assert_eq!(problem.status, 404);
        assert_eq!(problem.problem_type, NOT_FOUND_TYPE);
        assert_eq!(
            problem.errors,
            vec!["Order with number 20250801-ABCD1234 not found"]
        );
    }

    #[test]
    fn test_internal_detail_is_hidden_in_production() {
        let error =
            ApplicationError::internal("Failed to create order. Please try again.", "db down");

        let problem = ApiError::application(error, false).into_problem();

        assert_eq!(problem.status, 500);
        assert_eq!(problem.problem_type, INTERNAL_ERROR_TYPE);
        assert_eq!(
            problem.errors,
            vec!["Failed to create order. Please try again."]
        );
        assert!(problem.detail.is_none());
    }

    #[test]
    fn test_internal_detail_is_exposed_in_development() {
        let error =
            ApplicationError::internal("Failed to create order. Please try again.", "db down");

        let problem = ApiError::application(error, true).into_problem();

        assert_eq!(problem.detail.as_deref(), Some("db down"));
    }

    #[test]
    fn test_problem_serializes_type_field() {
        let json = serde_json::to_value(
            ApiError::BadRequest("Failed to parse the request body as JSON".to_string())
                .into_problem(),
        )
        .unwrap();

        assert_eq!(json["type"], BAD_REQUEST_TYPE);
        assert_eq!(json["status"], 400);
        assert!(json.get("detail").is_none());
    }
}
