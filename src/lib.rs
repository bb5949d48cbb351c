#![doc = include_str!("../README.md")]

pub mod banner;
pub mod error;
pub mod merge;
pub mod middleware;
pub mod payload;
pub mod selection;
pub mod store;
pub mod types;

// Re-exports for convenient access
pub use banner::{Banner, BannerDisplaySettings, BannerView};
pub use error::Error;
pub use merge::{
    ClubDirectory, PickupClub, effective_display_settings, fill_pickup, merged_banners,
    resolve_pickup,
};
pub use payload::{
    BannerDisplayPreview, BannerSinglePreview, HomePickupPreview, PICKUP_SLOTS,
    PREVIEW_BANNER_ID, PreviewKind, PreviewPayload, validate_redirect_path,
};
pub use selection::{select_banners, select_for_surface};
pub use store::{PREVIEW_TTL, PreviewEntry, PreviewStore};
pub use types::{
    BannerCategory, BannerId, ClubId, DisplayMode, PreviewId, SponsorTier, Surface,
};
