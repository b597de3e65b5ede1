//! glcompat backend - resource provider contract
//!
//! The state layer never talks to a device directly. It hands fully resolved
//! create-infos to a [`Backend`], receives owned handles back and binds them.
//!
//! # Architecture
//!
//! - [`types`] - Backend enumerators and create-info descriptors
//! - [`handle`] - Owned, non-copyable object handles
//! - [`Backend`] - The provider trait (create / destroy / bind per family)
//! - [`SoftBackend`] - In-memory provider with failure injection

pub mod error;
pub mod handle;
pub mod provider;
pub mod soft;
pub mod types;

pub use error::BackendError;
pub use handle::{
    BlendStateHandle, DepthStencilStateHandle, InputLayoutHandle, RasterizerStateHandle,
    SamplerHandle,
};
pub use provider::Backend;
pub use soft::{ObjectKind, SoftBackend, SoftBindings, SoftObject, SoftStats};
pub use types::*;
