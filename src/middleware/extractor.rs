use std::convert::Infallible;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;

use super::cookies;
use crate::store::{PreviewEntry, PreviewStore};

/// What the render path needs in scope to resolve previews: the store plus
/// the cookie name. Embed it in your application state and derive
/// [`FromRef`] so [`ActivePreview`] works as an extractor.
#[derive(Debug, Clone)]
pub struct PreviewContext {
    pub store: PreviewStore,
    pub cookie_name: String,
}

/// The live preview referenced by the request's cookie, if any.
///
/// Use as an Axum extractor in render handlers. Never rejects: a missing
/// cookie, an unknown id or an expired entry all yield `ActivePreview(None)`,
/// because a preview problem must not break rendering of the persisted page.
///
/// # Example
///
/// ```rust,ignore
/// async fn home(preview: ActivePreview, State(state): State<AppState>) -> impl IntoResponse {
///     let banners = state.repo.home_banners().await?;
///     let banners = match preview.applying_to("/") {
///         Some(entry) => match &entry.payload {
///             PreviewPayload::BannerSingle(single) => merged_banners(&banners, single),
///             _ => banners,
///         },
///         None => banners,
///     };
///     // ...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActivePreview(pub Option<PreviewEntry>);

impl ActivePreview {
    /// The entry, provided it applies to the page being rendered (see
    /// [`PreviewEntry::applies_to`]).
    #[must_use]
    pub fn applying_to(&self, page_path: &str) -> Option<&PreviewEntry> {
        self.0.as_ref().filter(|entry| entry.applies_to(page_path))
    }

    #[must_use]
    pub fn into_inner(self) -> Option<PreviewEntry> {
        self.0
    }
}

impl<S> FromRequestParts<S> for ActivePreview
where
    S: Send + Sync,
    PreviewContext: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = PreviewContext::from_ref(state);
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };
        Ok(Self(resolve_preview(
            &context.store,
            &jar,
            &context.cookie_name,
        )))
    }
}

/// Cookie → store lookup: the read API the merge engine consumes.
///
/// Returns the live entry named by the `preview_id` cookie, or `None` when
/// the cookie is absent or the entry is gone. Side-effect-free, so multiple
/// fetches within one render all see the same preview.
#[must_use]
pub fn resolve_preview(
    store: &PreviewStore,
    jar: &CookieJar,
    cookie_name: &str,
) -> Option<PreviewEntry> {
    let id = cookies::get_preview_id(jar, cookie_name)?;
    store.get(&id)
}
