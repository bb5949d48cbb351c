//! Preview payload shapes.
//!
//! A preview carries exactly one of three payload shapes, discriminated by
//! the `type` field on the wire. The closed set is modeled as an enum so the
//! merge engine matches exhaustively; adding a fourth shape is a
//! compile-checked change, not a stringly-typed branch.

use serde::{Deserialize, Serialize};

use crate::banner::Banner;
use crate::error::Error;
use crate::types::{BannerCategory, BannerId, ClubId, DisplayMode, SponsorTier};

/// Maximum number of homepage pickup slots.
pub const PICKUP_SLOTS: usize = 3;

/// Banner id assigned to a synthetic preview banner when the editor did not
/// provide one.
pub const PREVIEW_BANNER_ID: &str = "preview-banner";

/// Discriminant of a [`PreviewPayload`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    BannerSingle,
    BannerDisplay,
    HomePickup,
}

impl PreviewKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BannerSingle => "banner_single",
            Self::BannerDisplay => "banner_display",
            Self::HomePickup => "home_pickup",
        }
    }

    /// Whether a preview of this kind scoped to the generic root (`/`)
    /// applies to the homepage render path.
    ///
    /// A single-banner preview is pinned to the exact page it was created
    /// for and never follows the root rule.
    #[must_use]
    pub fn root_applicable(self) -> bool {
        match self {
            Self::BannerSingle => false,
            Self::BannerDisplay | Self::HomePickup => true,
        }
    }
}

impl std::fmt::Display for PreviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One pending payload, tagged by kind.
///
/// Wire shape: `{ "type": "banner_single", "payload": { ... } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PreviewPayload {
    BannerSingle(BannerSinglePreview),
    BannerDisplay(BannerDisplayPreview),
    HomePickup(HomePickupPreview),
}

impl PreviewPayload {
    #[must_use]
    pub fn kind(&self) -> PreviewKind {
        match self {
            Self::BannerSingle(_) => PreviewKind::BannerSingle,
            Self::BannerDisplay(_) => PreviewKind::BannerDisplay,
            Self::HomePickup(_) => PreviewKind::HomePickup,
        }
    }

    /// Structural validation applied at creation time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyPickupSlots`] if a pickup payload carries
    /// more than [`PICKUP_SLOTS`] slots.
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::HomePickup(pickup) if pickup.club_ids.len() > PICKUP_SLOTS => {
                Err(Error::TooManyPickupSlots(pickup.club_ids.len()))
            }
            _ => Ok(()),
        }
    }
}

/// A single synthetic banner to overlay onto a page's persisted banner list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerSinglePreview {
    /// Banner id; defaults to [`PREVIEW_BANNER_ID`] so the merge can evict a
    /// persisted banner the editor is replacing.
    #[serde(default = "default_banner_id")]
    pub id: BannerId,
    #[serde(default)]
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub link_url: Option<String>,
    /// Coerced to `club` unless explicitly `sponsor`.
    #[serde(default)]
    pub category: BannerCategory,
    #[serde(default)]
    pub sponsor_tier: Option<SponsorTier>,
    /// Defaults to 0 so the synthetic banner sorts ahead of persisted rows.
    #[serde(default)]
    pub sort_order: i32,
}

fn default_banner_id() -> BannerId {
    BannerId(PREVIEW_BANNER_ID.to_string())
}

impl BannerSinglePreview {
    /// Materializes the synthetic [`Banner`] record this payload stands for.
    #[must_use]
    pub fn to_banner(&self) -> Banner {
        Banner {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            alt_text: self.alt_text.clone(),
            link_url: self.link_url.clone(),
            category: self.category,
            sponsor_tier: self.sponsor_tier,
            sort_order: self.sort_order,
        }
    }
}

/// Partial override of the persisted banner display settings.
///
/// Only fields present in the payload override; everything else keeps its
/// persisted value. Unknown fields are ignored for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerDisplayPreview {
    #[serde(default)]
    pub home_display_mode: Option<DisplayMode>,
    #[serde(default)]
    pub prefecture_top_display_mode: Option<DisplayMode>,
    #[serde(default)]
    pub prefecture_sidebar_display_mode: Option<DisplayMode>,
}

/// Ordered homepage pickup selection, up to [`PICKUP_SLOTS`] nullable slots.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePickupPreview {
    #[serde(default)]
    pub club_ids: Vec<Option<ClubId>>,
}

/// Checks that a redirect path is site-relative.
///
/// Accepts paths with a single leading `/`; rejects empty paths, absolute
/// URLs and protocol-relative `//host` forms.
///
/// # Errors
///
/// Returns [`Error::InvalidRedirectPath`] on any other shape.
pub fn validate_redirect_path(path: &str) -> Result<(), Error> {
    if path.starts_with('/') && !path.starts_with("//") {
        Ok(())
    } else {
        Err(Error::InvalidRedirectPath(path.to_string()))
    }
}
