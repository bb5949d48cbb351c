use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Errors surfaced by the preview HTTP layer.
///
/// Not-found/expired is the dominant, expected failure: the caller recovers
/// by re-issuing a preview, so it is never logged as an error.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    /// Creation requires a signed-in editor.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The preview id does not resolve to a live entry.
    #[error("Preview not found or expired")]
    NotFound,

    /// Caller error, carrying a machine-checkable reason code.
    #[error("Bad request: {0}")]
    BadRequest(&'static str),

    /// The authorization collaborator itself failed.
    #[error("Authorization check failed: {0}")]
    Gate(String),
}

impl IntoResponse for PreviewError {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthenticated" })),
            )
                .into_response(),
            Self::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "preview_not_found" })),
            )
                .into_response(),
            Self::BadRequest(code) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": code }))).into_response()
            }
            Self::Gate(_) => {
                tracing::error!(error = %self, "preview gate internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal_error" })),
                )
                    .into_response()
            }
        }
    }
}

impl From<crate::error::Error> for PreviewError {
    fn from(e: crate::error::Error) -> Self {
        match e {
            crate::error::Error::InvalidRedirectPath(_) => Self::BadRequest("invalid_path"),
            crate::error::Error::TooManyPickupSlots(_) => Self::BadRequest("invalid_payload"),
        }
    }
}
