//! Backend failure codes

/// Failure reported by a backend entry point.
///
/// These codes are backend-specific. The state layer folds them into its own
/// closed error set and never forwards them to API callers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Host or device memory exhausted
    #[error("out of memory")]
    OutOfMemory,

    /// The create-info or handle was rejected
    #[error("invalid argument")]
    InvalidArgument,

    /// The backend does not implement the requested feature
    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    /// Any other device failure, with the backend's own code
    #[error("device error {0}")]
    Device(i32),
}
