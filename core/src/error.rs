//! State layer error taxonomy

use glcompat_backend::BackendError;

use crate::gl::{self, GLenum};

/// Errors surfaced to API callers.
///
/// Backend failures are folded into this closed set; the backend's own codes
/// never leak through. Programming errors (releasing an unreferenced cache
/// entry, an unknown enumerator reaching a translator) are not represented
/// here: they panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Backend or host memory exhausted
    #[error("out of memory in {what}")]
    OutOfMemory { what: &'static str },

    #[error("invalid enum 0x{value:04X} for {what}")]
    InvalidEnum { what: &'static str, value: GLenum },

    #[error("invalid value for {what}")]
    InvalidValue { what: &'static str },

    #[error("invalid operation on {what}")]
    InvalidOperation { what: &'static str },
}

impl StateError {
    /// Map a backend failure while handling `what` onto the closed taxonomy
    pub fn from_backend(what: &'static str, err: &BackendError) -> Self {
        match err {
            BackendError::OutOfMemory => StateError::OutOfMemory { what },
            BackendError::InvalidArgument => StateError::InvalidValue { what },
            BackendError::Unsupported(_) | BackendError::Device(_) => {
                StateError::InvalidOperation { what }
            }
        }
    }

    /// The GL error code reported by `get_error`
    pub fn gl_code(&self) -> GLenum {
        match self {
            StateError::OutOfMemory { .. } => gl::OUT_OF_MEMORY,
            StateError::InvalidEnum { .. } => gl::INVALID_ENUM,
            StateError::InvalidValue { .. } => gl::INVALID_VALUE,
            StateError::InvalidOperation { .. } => gl::INVALID_OPERATION,
        }
    }
}

pub type Result<T> = std::result::Result<T, StateError>;
