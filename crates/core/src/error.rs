use thiserror::Error;

/// Failures reported by the host surface a generator drives.
///
/// These cover targeting (a location could not be resolved or is not
/// interactable), readiness, and transport problems. Engine-side failures
/// (contact lifecycle, capacity, timeouts) live in `tactile-runtime`.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error(
        "the host surface is not ready for interaction; ensure the target \
         is presented and interaction is not disabled"
    )]
    NotReady,
    #[error("the surface must have key focus to receive keyboard events")]
    NotKeySurface,
    #[error("no target context is available for event routing")]
    ContextUnavailable,
    #[error("unable to find view: {identifier:?}")]
    ViewNotFound { identifier: String },
    #[error("invalid type for view {identifier:?}, expected {expected:?}")]
    InvalidViewType { identifier: String, expected: String },
    #[error("view is not in the hierarchy: {identifier:?}")]
    NotInHierarchy { identifier: String },
    #[error("view is not visible: {identifier:?}")]
    NotVisible { identifier: String },
    #[error("view is not hittable: {identifier:?}")]
    NotHittable { identifier: String },
    #[error("event injection failed: {message}")]
    Injection { message: String },
}
