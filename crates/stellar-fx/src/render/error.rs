use crate::effects::Lifecycle;

/// Why an effect could not be activated.
///
/// Every variant means "effect unavailable"; none is fatal to the host.
#[derive(Debug, thiserror::Error)]
pub enum ActivationError {
    /// The host container is absent or not mounted yet. The host may retry.
    #[error("host container is missing or not mounted")]
    MissingContainer,

    /// The container already carries a render surface.
    #[error("container already has a render surface attached")]
    AlreadyAttached,

    /// The display surface or GPU device could not be created.
    #[error("render surface unavailable: {0:#}")]
    Surface(anyhow::Error),

    /// `activate` was called on a controller that is not `Uninitialized`.
    #[error("effect cannot be activated from the {0:?} state")]
    InvalidState(Lifecycle),
}
