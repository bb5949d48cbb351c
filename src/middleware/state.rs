use std::sync::Arc;

use axum::extract::FromRef;

use super::config::PreviewSettings;
use super::extractor::PreviewContext;
use crate::store::PreviewStore;

/// Shared state for preview route handlers.
pub(super) struct PreviewState<G> {
    pub(super) store: PreviewStore,
    pub(super) gate: Arc<G>,
    pub(super) settings: PreviewSettings,
}

// Manual Clone: avoid derive adding a `G: Clone` bound.
impl<G> Clone for PreviewState<G> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            gate: self.gate.clone(),
            settings: self.settings.clone(),
        }
    }
}

// ActivePreview requires PreviewContext to be extractable from state
impl<G> FromRef<PreviewState<G>> for PreviewContext {
    fn from_ref(state: &PreviewState<G>) -> Self {
        Self {
            store: state.store.clone(),
            cookie_name: state.settings.cookie_name.clone(),
        }
    }
}
