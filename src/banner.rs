//! Banner records and per-surface display settings.
//!
//! These mirror the persisted rows owned by the portal's CRUD layer; this
//! crate only ever reads them and derives view models from them.

use serde::{Deserialize, Serialize};

use crate::types::{BannerCategory, BannerId, DisplayMode, SponsorTier, Surface};

/// A banner record as fetched from persistence (or produced by a merge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: BannerId,
    #[serde(default)]
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    #[serde(default)]
    pub category: BannerCategory,
    #[serde(default)]
    pub sponsor_tier: Option<SponsorTier>,
    #[serde(default)]
    pub sort_order: i32,
}

/// Persisted banner display configuration, one mode per surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDisplaySettings {
    #[serde(default)]
    pub home_display_mode: DisplayMode,
    #[serde(default)]
    pub prefecture_top_display_mode: DisplayMode,
    #[serde(default)]
    pub prefecture_sidebar_display_mode: DisplayMode,
}

impl BannerDisplaySettings {
    /// Display mode configured for the given surface.
    #[must_use]
    pub fn mode_for(&self, surface: Surface) -> DisplayMode {
        match surface {
            Surface::Home => self.home_display_mode,
            Surface::PrefectureTop => self.prefecture_top_display_mode,
            Surface::PrefectureSidebar => self.prefecture_sidebar_display_mode,
        }
    }
}

/// Projection of a [`Banner`] down to the fields a rendering surface needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub id: BannerId,
    pub image: String,
    /// Alt text, falling back to the banner name when absent or empty.
    pub alt: String,
    pub link_url: Option<String>,
    pub category: BannerCategory,
}

impl BannerView {
    #[must_use]
    pub fn from_banner(banner: &Banner) -> Self {
        let alt = banner
            .alt_text
            .as_deref()
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&banner.name)
            .to_string();
        Self {
            id: banner.id.clone(),
            image: banner.image.clone(),
            alt,
            link_url: banner.link_url.clone(),
            category: banner.category,
        }
    }
}
