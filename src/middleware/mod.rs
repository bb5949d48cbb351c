//! Plug-and-play preview staging middleware for Axum.
//!
//! This module wires the [`PreviewStore`](crate::store::PreviewStore) into
//! an Axum application: a create endpoint for the admin UI, the iframe
//! session bridge, and the cookie → store read path for render handlers.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use minkuru_preview::PreviewStore;
//! use minkuru_preview::middleware::{PreviewConfig, preview_routes, resolve_preview};
//!
//! // 1. Implement the PreviewGate trait for your app state
//! // 2. Configure from environment
//! let config = PreviewConfig::from_env();
//! let store = PreviewStore::new();
//!
//! // 3. Mount preview routes
//! let app = axum::Router::new()
//!     .merge(preview_routes(config, gate, store.clone()));
//!
//! // 4. Use resolve_preview() (or the ActivePreview extractor) in render handlers
//! let preview = resolve_preview(&store, &jar, "__minkuru_preview");
//! ```

mod config;
mod cookies;
mod error;
mod extractor;
mod routes;
mod state;
mod traits;

pub use config::PreviewConfig;
pub use error::PreviewError;
pub use extractor::{ActivePreview, PreviewContext, resolve_preview};
pub use routes::preview_routes;
pub use traits::PreviewGate;
