use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use skymeet_core::error::SearchError;
use skymeet_core::provider::ProviderError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    /// The upstream flight-search provider failed or rejected our call.
    UpstreamError(String),
    InternalServerError(String),
    Anyhow(anyhow::Error),
}

impl AppError {
    /// Map pipeline failures onto the HTTP taxonomy. Provider failures keep
    /// their origin in the message; empty result sets never come through
    /// here, they are ordinary 200 responses with zero rows.
    pub fn from_search(err: SearchError) -> Self {
        match err {
            SearchError::NoOrigins => AppError::ValidationError(err.to_string()),
            SearchError::Origin { ref source, .. } => match source {
                ProviderError::NoRoute { .. } => AppError::NotFoundError(err.to_string()),
                ProviderError::BadRequest(_) | ProviderError::Transient(_) => {
                    AppError::UpstreamError(err.to_string())
                }
            },
            SearchError::MalformedProviderData { .. } | SearchError::TaskFailed(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UpstreamError(msg) => {
                tracing::warn!("Upstream provider failure: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Anyhow(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_mapping() {
        let err = AppError::from_search(SearchError::NoOrigins);
        assert!(matches!(err, AppError::ValidationError(_)));

        let err = AppError::from_search(SearchError::Origin {
            origin: "BOD".to_string(),
            source: ProviderError::NoRoute {
                origin: "BOD".to_string(),
            },
        });
        assert!(matches!(err, AppError::NotFoundError(_)));

        let err = AppError::from_search(SearchError::Origin {
            origin: "BOD".to_string(),
            source: ProviderError::Transient("timeout".to_string()),
        });
        assert!(matches!(err, AppError::UpstreamError(_)));
    }
}
