use std::future::Future;

use axum::http::HeaderMap;

/// Consumer-provided authorization check for preview creation.
///
/// Answers exactly one question from the request headers (typically the
/// admin session cookie): is there a current signed-in editor? No role
/// distinction is made at this layer.
///
/// # Example
///
/// ```rust,ignore
/// impl PreviewGate for MyAppState {
///     async fn is_authenticated(
///         &self,
///         headers: &axum::http::HeaderMap,
///     ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
///         let Some(session_id) = session_cookie_value(headers) else {
///             return Ok(false);
///         };
///         Ok(self.sessions.find(&session_id).await?.is_some())
///     }
/// }
/// ```
pub trait PreviewGate: Send + Sync + 'static {
    /// Whether the request belongs to a signed-in editor.
    ///
    /// `Err` means the check itself failed (store outage etc.) and maps to
    /// a 500, not a 401.
    fn is_authenticated(
        &self,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<bool, Box<dyn std::error::Error + Send + Sync>>> + Send;
}
