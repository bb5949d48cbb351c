use crate::payload::PICKUP_SLOTS;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Redirect path is not site-relative (must start with `/`, not `//`).
    #[error("invalid redirect path: {0:?}")]
    InvalidRedirectPath(String),
    /// Pickup preview carries more than [`PICKUP_SLOTS`] club slots.
    #[error("pickup preview accepts at most {max} slots, got {0}", max = PICKUP_SLOTS)]
    TooManyPickupSlots(usize),
}
