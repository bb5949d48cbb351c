//! Banner selection engine.
//!
//! Turns a (possibly merged) set of banner records plus the surface's
//! display mode into the ordered, filtered, projected list a page slot
//! renders. Deterministic: the sort is stable, so repeated calls with the
//! same input produce the same output.

use crate::banner::{Banner, BannerDisplaySettings, BannerView};
use crate::types::{BannerCategory, DisplayMode, SponsorTier, Surface};

/// Filters, sorts and projects banner records for one display mode.
///
/// Club banners always pass. Sponsor banners pass per mode:
/// `official_only` keeps only the official tier, `local_only` keeps the
/// local tier and untiered sponsors, `all` keeps everything. An empty
/// result is a valid render (the slot shows nothing).
#[must_use]
pub fn select_banners(banners: &[Banner], mode: DisplayMode) -> Vec<BannerView> {
    let mut kept: Vec<&Banner> = banners
        .iter()
        .filter(|banner| passes_filter(banner, mode))
        .collect();
    kept.sort_by_key(|banner| banner.sort_order);
    kept.into_iter().map(BannerView::from_banner).collect()
}

/// [`select_banners`] with the mode resolved from the surface's settings.
#[must_use]
pub fn select_for_surface(
    banners: &[Banner],
    settings: &BannerDisplaySettings,
    surface: Surface,
) -> Vec<BannerView> {
    select_banners(banners, settings.mode_for(surface))
}

fn passes_filter(banner: &Banner, mode: DisplayMode) -> bool {
    match banner.category {
        BannerCategory::Club => true,
        BannerCategory::Sponsor => match mode {
            DisplayMode::All => true,
            DisplayMode::OfficialOnly => banner.sponsor_tier == Some(SponsorTier::Official),
            DisplayMode::LocalOnly => {
                matches!(banner.sponsor_tier, Some(SponsorTier::Local) | None)
            }
        },
    }
}
