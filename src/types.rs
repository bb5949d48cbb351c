use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use derive_more::{Display, From, Into};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Preview identifier (opaque URL-safe token).
///
/// Generated per preview request, carried in the `preview_id` cookie and the
/// bridge URL. Unguessable enough for the 5-minute entry lifetime; not a
/// security boundary on its own.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct PreviewId(pub String);

impl PreviewId {
    /// Generates a random preview id (16 random bytes → 22-character
    /// URL-safe base64 string).
    #[must_use]
    pub fn generate() -> Self {
        let random_bytes: [u8; 16] = rand::rng().random();
        Self(URL_SAFE_NO_PAD.encode(random_bytes))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Club identifier (opaque string, format owned by the persistence layer).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ClubId(pub String);

/// Banner identifier (opaque string, format owned by the persistence layer).
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct BannerId(pub String);

/// Banner category.
///
/// Anything that is not explicitly `sponsor` decodes as `club`, matching how
/// synthetic preview banners coerce their category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerCategory {
    Sponsor,
    #[default]
    #[serde(other)]
    Club,
}

/// Sponsor tier on a sponsor-category banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SponsorTier {
    Official,
    Local,
}

/// Per-surface banner display mode.
///
/// Unknown persisted values decode as `All` (most permissive) so a
/// misconfigured row renders every banner instead of none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    OfficialOnly,
    LocalOnly,
    #[default]
    #[serde(other)]
    All,
}

/// Site surface with its own banner display configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Home,
    PrefectureTop,
    PrefectureSidebar,
}
