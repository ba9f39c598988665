use crate::config::AppConfig;
use axum::{
    Json,
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Post not found")]
    NotFound,

    #[error("Route not found")]
    RouteNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal Server Error")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Cause of an internal failure, carried on the response so the error-shaping
/// layer can decide whether the client gets to see it.
#[derive(Clone, Debug)]
pub struct ErrorDetail {
    pub message: String,
    pub stack: String,
}

const INTERNAL_MESSAGE: &str = "Internal server error";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                Some(format!("{e:?}"))
            }
            AppError::Anyhow(e) => {
                tracing::error!(error = ?e, "System error");
                Some(format!("{e:?}"))
            }
            other => {
                tracing::debug!(%status, "{other}");
                None
            }
        };

        let message = match detail {
            Some(_) => INTERNAL_MESSAGE.to_string(),
            None => self.to_string(),
        };

        let mut response = (status, Json(json!({ "error": message }))).into_response();
        if let Some(stack) = detail {
            response
                .extensions_mut()
                .insert(ErrorDetail { message, stack });
        }
        response
    }
}

/// Terminal error shaping: internal failures keep their status and gain a
/// `stack` field when the service runs in development.
pub async fn shape_errors(
    State(config): State<AppConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;

    let Some(detail) = response.extensions_mut().remove::<ErrorDetail>() else {
        return response;
    };
    if !config.is_development() {
        return response;
    }

    let status = match response.status() {
        StatusCode::OK => StatusCode::INTERNAL_SERVER_ERROR,
        status => status,
    };
    let body = Json(json!({
        "error": detail.message,
        "stack": detail.stack,
    }));
    (status, body).into_response()
}

/// Runs the rest of the stack on its own task so a panicking handler still
/// answers with a 500 instead of dropping the connection.
pub async fn catch_panic(request: Request, next: Next) -> Response {
    match tokio::spawn(next.run(request)).await {
        Ok(response) => response,
        Err(e) if e.is_panic() => {
            let payload = e.into_panic();
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            AppError::Anyhow(anyhow::anyhow!("Handler panicked: {message}")).into_response()
        }
        Err(e) => AppError::Anyhow(anyhow::anyhow!("Handler task failed: {e}")).into_response(),
    }
}

pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(
            AppError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::RouteNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Database(sqlx::Error::PoolClosed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_carry_detail() {
        let response = AppError::Database(sqlx::Error::PoolClosed).into_response();
        let detail = response.extensions().get::<ErrorDetail>().unwrap();
        assert_eq!(detail.message, INTERNAL_MESSAGE);
        assert!(detail.stack.contains("PoolClosed"));
    }

    #[test]
    fn client_errors_carry_no_detail() {
        let response = AppError::NotFound.into_response();
        assert!(response.extensions().get::<ErrorDetail>().is_none());
    }
}
