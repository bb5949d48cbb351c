//! Render-time merge engine.
//!
//! Overlays a pending preview payload onto persisted page data. Every merge
//! is pure: inputs are taken by reference, output is a fresh value, and
//! nothing is ever written back to the store or to persistence. A page
//! rendered with no active preview takes the exact same logic path as one
//! rendered before this module existed.
//!
//! Failures inside a merge (an unresolvable club, a directory error) degrade
//! to "that part of the preview is absent" — a preview problem must never
//! break rendering of the underlying page.

use std::future::Future;

use crate::banner::{Banner, BannerDisplaySettings};
use crate::payload::{BannerDisplayPreview, BannerSinglePreview, HomePickupPreview};
use crate::types::ClubId;

/// Consumer-provided club lookups for `home_pickup` previews.
///
/// Backed by the portal's persistence layer. Lookup failures are reported
/// as errors so the merge can log and drop the slot, not crash the page.
///
/// # Example
///
/// ```rust,ignore
/// impl ClubDirectory for MyAppState {
///     async fn find(&self, id: &ClubId) -> Result<Option<PickupClub>, _> {
///         Ok(self.repo.find_club(id).await?.map(PickupClub::from))
///     }
///
///     async fn recent(&self, limit: usize) -> Result<Vec<PickupClub>, _> {
///         Ok(self.repo.recent_clubs(limit).await?)
///     }
/// }
/// ```
pub trait ClubDirectory: Send + Sync {
    /// Look up one club by id. `Ok(None)` when the id resolves to nothing.
    fn find(
        &self,
        id: &ClubId,
    ) -> impl Future<Output = Result<Option<PickupClub>, Box<dyn std::error::Error + Send + Sync>>>
           + Send;

    /// Most recently registered clubs, newest first.
    fn recent(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<PickupClub>, Box<dyn std::error::Error + Send + Sync>>>
           + Send;
}

/// Club fields the homepage pickup section renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupClub {
    pub id: ClubId,
    pub name: String,
    pub image: Option<String>,
    pub link_url: Option<String>,
}

/// Merge rule for `banner_single`.
///
/// Evicts any persisted banner sharing the synthetic banner's id, prepends
/// the synthetic banner, then re-sorts ascending by `sort_order`. The sort
/// is stable, so with its default `sort_order` of 0 the synthetic banner
/// stays ahead of persisted rows that also use 0.
#[must_use]
pub fn merged_banners(persisted: &[Banner], preview: &BannerSinglePreview) -> Vec<Banner> {
    let synthetic = preview.to_banner();
    let mut merged = Vec::with_capacity(persisted.len() + 1);
    merged.push(synthetic);
    merged.extend(
        persisted
            .iter()
            .filter(|banner| banner.id != preview.id)
            .cloned(),
    );
    merged.sort_by_key(|banner| banner.sort_order);
    merged
}

/// Merge rule for `banner_display`.
///
/// Shallow override: only fields present in the partial payload replace the
/// persisted value.
#[must_use]
pub fn effective_display_settings(
    persisted: &BannerDisplaySettings,
    overrides: &BannerDisplayPreview,
) -> BannerDisplaySettings {
    BannerDisplaySettings {
        home_display_mode: overrides
            .home_display_mode
            .unwrap_or(persisted.home_display_mode),
        prefecture_top_display_mode: overrides
            .prefecture_top_display_mode
            .unwrap_or(persisted.prefecture_top_display_mode),
        prefecture_sidebar_display_mode: overrides
            .prefecture_sidebar_display_mode
            .unwrap_or(persisted.prefecture_sidebar_display_mode),
    }
}

/// Merge rule for `home_pickup`.
///
/// Resolves the slot ids in order through the directory. Null slots, ids
/// that resolve to nothing and failed lookups are dropped; the result may
/// be shorter than the slot count. Topping a short list up with "most
/// recent" clubs is the caller's persisted-layer behavior — see
/// [`fill_pickup`].
pub async fn resolve_pickup<D: ClubDirectory>(
    directory: &D,
    preview: &HomePickupPreview,
) -> Vec<PickupClub> {
    let mut picked = Vec::with_capacity(preview.club_ids.len());
    for slot in preview.club_ids.iter() {
        let Some(id) = slot else { continue };
        match directory.find(id).await {
            Ok(Some(club)) => picked.push(club),
            Ok(None) => {
                tracing::debug!(club_id = %id, "pickup slot dropped: club not found");
            }
            Err(error) => {
                tracing::debug!(club_id = %id, error = %error, "pickup slot dropped: lookup failed");
            }
        }
    }
    picked
}

/// Tops `picked` up to `want` clubs from [`ClubDirectory::recent`],
/// skipping clubs already picked. On a directory error the list is left
/// short rather than failing the render.
pub async fn fill_pickup<D: ClubDirectory>(
    directory: &D,
    mut picked: Vec<PickupClub>,
    want: usize,
) -> Vec<PickupClub> {
    if picked.len() >= want {
        picked.truncate(want);
        return picked;
    }
    match directory.recent(want).await {
        Ok(recent) => {
            for club in recent {
                if picked.len() >= want {
                    break;
                }
                if picked.iter().all(|existing| existing.id != club.id) {
                    picked.push(club);
                }
            }
        }
        Err(error) => {
            tracing::debug!(error = %error, "recent-clubs lookup failed, pickup list left short");
        }
    }
    picked
}
