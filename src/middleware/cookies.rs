use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::types::PreviewId;

/// Create the `preview_id` cookie.
///
/// Site-wide path and a `Max-Age` bounded to the store TTL, so the cookie
/// never outlives the entry it points at. Set identically by the create
/// route and re-set by the bridge redirect.
pub(super) fn preview_cookie(
    name: &str,
    id: &PreviewId,
    ttl: std::time::Duration,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), id.as_str().to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/".to_string())
        .max_age(Duration::try_from(ttl).unwrap_or(Duration::MAX))
        .build()
}

/// Create removal cookie for `preview_id`.
pub(super) fn clear_preview_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .build()
}

/// Get the preview id from cookies.
pub(super) fn get_preview_id(jar: &CookieJar, name: &str) -> Option<PreviewId> {
    jar.get(name).map(|c| PreviewId(c.value().to_string()))
}
