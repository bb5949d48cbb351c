use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use super::config::PreviewConfig;
use super::cookies;
use super::error::PreviewError;
use super::state::PreviewState;
use super::traits::PreviewGate;
use crate::payload::{PreviewPayload, validate_redirect_path};
use crate::store::PreviewStore;
use crate::types::PreviewId;

/// Create the preview router.
///
/// Mounts three routes under the configured prefix:
/// `POST {prefix}` (create), `GET {prefix}/bridge` (iframe cookie bridge)
/// and `{prefix}/clear` (drop the active preview early).
pub fn preview_routes<G: PreviewGate>(
    config: PreviewConfig,
    gate: G,
    store: PreviewStore,
) -> Router {
    let preview_path = config.settings.preview_path.clone();

    let state = PreviewState {
        store,
        gate: Arc::new(gate),
        settings: config.settings,
    };

    Router::new()
        .route(&preview_path, post(create::<G>))
        .route(&format!("{preview_path}/bridge"), get(bridge::<G>))
        .route(
            &format!("{preview_path}/clear"),
            get(clear::<G>).post(clear::<G>),
        )
        .with_state(state)
}

// ── Create ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatePreviewRequest {
    redirect_path: String,
    #[serde(flatten)]
    payload: PreviewPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePreviewResponse {
    redirect_url: String,
    preview_id: PreviewId,
    bridge_url: String,
}

async fn create<G: PreviewGate>(
    State(state): State<PreviewState<G>>,
    headers: HeaderMap,
    jar: CookieJar,
    body: Result<Json<CreatePreviewRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<CreatePreviewResponse>), PreviewError> {
    let authenticated = state
        .gate
        .is_authenticated(&headers)
        .await
        .map_err(|e| PreviewError::Gate(e.to_string()))?;
    if !authenticated {
        return Err(PreviewError::Unauthenticated);
    }

    let Json(request) = body.map_err(|rejection| {
        tracing::warn!(error = %rejection, "malformed preview request body");
        PreviewError::BadRequest("invalid_payload")
    })?;

    validate_redirect_path(&request.redirect_path)?;
    request.payload.validate()?;

    let id = PreviewId::generate();
    let entry = state
        .store
        .set(id.clone(), request.redirect_path, request.payload);

    let cookie = cookies::preview_cookie(
        &state.settings.cookie_name,
        &id,
        state.store.ttl(),
        state.settings.secure_cookies,
    );

    let bridge_url = format!(
        "{}/bridge?id={}&path={}",
        state.settings.preview_path,
        id,
        urlencoding::encode(&entry.redirect_path),
    );

    tracing::info!(
        preview_id = %id,
        kind = %entry.payload.kind(),
        redirect_path = %entry.redirect_path,
        "preview created"
    );

    Ok((
        jar.add(cookie),
        Json(CreatePreviewResponse {
            redirect_url: entry.redirect_path,
            preview_id: id,
            bridge_url,
        }),
    ))
}

// ── Bridge ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct BridgeParams {
    id: Option<String>,
    path: Option<String>,
}

/// Second hop of the cookie delivery protocol.
///
/// An iframe pointed here (instead of directly at the target path) receives
/// the `preview_id` cookie on a same-site 302, so the follow-up request to
/// the target shares the iframe's own navigation lineage and carries the
/// cookie even under strict third-party-cookie policies. The payload itself
/// never appears in the URL.
async fn bridge<G: PreviewGate>(
    State(state): State<PreviewState<G>>,
    Query(params): Query<BridgeParams>,
    jar: CookieJar,
) -> Result<Response, PreviewError> {
    let id = params
        .id
        .filter(|id| !id.is_empty())
        .ok_or(PreviewError::BadRequest("missing_id"))?;
    let path = params
        .path
        .filter(|path| !path.is_empty())
        .ok_or(PreviewError::BadRequest("missing_path"))?;
    validate_redirect_path(&path)?;

    let id = PreviewId(id);
    if state.store.get(&id).is_none() {
        // Expected failure: the admin UI surfaces "preview expired, try again".
        tracing::debug!(preview_id = %id, "bridge miss: preview absent or expired");
        return Err(PreviewError::NotFound);
    }

    let cookie = cookies::preview_cookie(
        &state.settings.cookie_name,
        &id,
        state.store.ttl(),
        state.settings.secure_cookies,
    );

    tracing::info!(preview_id = %id, path = %path, "preview cookie delivered via bridge");

    Ok((
        StatusCode::FOUND,
        jar.add(cookie),
        [(header::LOCATION, path)],
        (),
    )
        .into_response())
}

// ── Clear ──────────────────────────────────────────────────────────

/// Drops the active preview ahead of its TTL and expires the cookie.
async fn clear<G: PreviewGate>(
    State(state): State<PreviewState<G>>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    if let Some(id) = cookies::get_preview_id(&jar, &state.settings.cookie_name) {
        if state.store.consume(&id).is_some() {
            tracing::info!(preview_id = %id, "preview cleared");
        }
    }

    let jar = jar.remove(cookies::clear_preview_cookie(&state.settings.cookie_name));
    (jar, Redirect::to(&state.settings.clear_redirect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct AllowAll;

    impl PreviewGate for AllowAll {
        async fn is_authenticated(
            &self,
            _headers: &HeaderMap,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Ok(true)
        }
    }

    struct DenyAll;

    impl PreviewGate for DenyAll {
        async fn is_authenticated(
            &self,
            _headers: &HeaderMap,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Ok(false)
        }
    }

    struct GateDown;

    impl PreviewGate for GateDown {
        async fn is_authenticated(
            &self,
            _headers: &HeaderMap,
        ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
            Err("session store offline".into())
        }
    }

    fn test_app<G: PreviewGate>(gate: G, store: PreviewStore) -> Router {
        preview_routes(
            PreviewConfig::new().with_secure_cookies(false),
            gate,
            store,
        )
    }

    async fn post_json(app: &Router, uri: &str, body: &Value) -> axum::response::Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get_uri(app: &Router, uri: &str) -> axum::response::Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn set_cookie(response: &axum::response::Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .unwrap()
            .to_string()
    }

    fn display_body() -> Value {
        json!({
            "type": "banner_display",
            "redirectPath": "/",
            "payload": { "homeDisplayMode": "official_only" }
        })
    }

    #[tokio::test]
    async fn create_then_bridge_delivers_cookie_and_redirects() {
        let store = PreviewStore::new();
        let app = test_app(AllowAll, store.clone());

        let response = post_json(&app, "/api/preview", &display_body()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = set_cookie(&response);
        assert!(cookie.starts_with("__minkuru_preview="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=300"));

        let body = json_body(response).await;
        assert_eq!(body["redirectUrl"], "/");
        let preview_id = body["previewId"].as_str().unwrap().to_string();
        let bridge_url = body["bridgeUrl"].as_str().unwrap().to_string();
        assert_eq!(
            bridge_url,
            format!("/api/preview/bridge?id={preview_id}&path=%2F")
        );

        let response = get_uri(&app, &bridge_url).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/");
        let cookie = set_cookie(&response);
        assert!(cookie.starts_with(&format!("__minkuru_preview={preview_id}")));

        // Bridge validation is a plain read: the entry is still live.
        assert!(store.get(&PreviewId(preview_id)).is_some());
    }

    #[tokio::test]
    async fn unauthenticated_create_stores_nothing() {
        let store = PreviewStore::new();
        let app = test_app(DenyAll, store.clone());

        let response = post_json(&app, "/api/preview", &display_body()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(json_body(response).await["error"], "unauthenticated");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn gate_failure_maps_to_internal_error() {
        let app = test_app(GateDown, PreviewStore::new());

        let response = post_json(&app, "/api/preview", &display_body()).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await["error"], "internal_error");
    }

    #[tokio::test]
    async fn create_rejects_malformed_requests() {
        let app = test_app(AllowAll, PreviewStore::new());

        let mut bad_path = display_body();
        bad_path["redirectPath"] = json!("https://evil.example/");
        let response = post_json(&app, "/api/preview", &bad_path).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_path");

        let too_many = json!({
            "type": "home_pickup",
            "redirectPath": "/",
            "payload": { "clubIds": ["a", "b", "c", "d"] }
        });
        let response = post_json(&app, "/api/preview", &too_many).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_payload");

        let unknown_type = json!({
            "type": "magazine_cover",
            "redirectPath": "/",
            "payload": {}
        });
        let response = post_json(&app, "/api/preview", &unknown_type).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_payload");
    }

    #[tokio::test]
    async fn bridge_rejects_missing_or_foreign_params() {
        let app = test_app(AllowAll, PreviewStore::new());

        let response = get_uri(&app, "/api/preview/bridge?path=%2F").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "missing_id");

        let response = get_uri(&app, "/api/preview/bridge?id=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "missing_path");

        let response =
            get_uri(&app, "/api/preview/bridge?id=abc&path=https%3A%2F%2Fevil.example").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "invalid_path");
    }

    #[tokio::test]
    async fn bridge_unknown_id_is_not_found() {
        let app = test_app(AllowAll, PreviewStore::new());

        let response = get_uri(&app, "/api/preview/bridge?id=nope&path=%2F").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "preview_not_found");
    }

    #[tokio::test]
    async fn bridge_expired_id_is_not_found() {
        let store = PreviewStore::with_ttl(std::time::Duration::ZERO);
        let app = test_app(AllowAll, store.clone());
        let entry = store.set(
            PreviewId::generate(),
            "/".to_string(),
            crate::payload::PreviewPayload::HomePickup(crate::payload::HomePickupPreview::default()),
        );

        let uri = format!("/api/preview/bridge?id={}&path=%2F", entry.id);
        let response = get_uri(&app, &uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn clear_consumes_entry_and_expires_cookie() {
        let store = PreviewStore::new();
        let app = test_app(AllowAll, store.clone());

        let response = post_json(&app, "/api/preview", &display_body()).await;
        let body = json_body(response).await;
        let preview_id = body["previewId"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/preview/clear")
                    .header(
                        header::COOKIE,
                        format!("__minkuru_preview={preview_id}"),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
        assert!(set_cookie(&response).contains("Max-Age=0"));
        assert!(store.get(&PreviewId(preview_id)).is_none());
    }
}
