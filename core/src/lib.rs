//! glcompat core - GL state objects over an immutable-state backend
//!
//! GL lets applications poke individual pieces of pipeline state at any
//! time. Modern backends want immutable state objects built up front. This
//! crate bridges the two.
//!
//! # Architecture
//!
//! - [`state`] - Per-family descriptors (blend, depth-stencil, rasterizer,
//!   sampler, input layout) with canonical forms and backend translation
//! - [`StateCache`] - Deduplicates descriptors into shared, reference
//!   counted backend objects with a bounded pool of spare objects
//! - [`Context`] - GL-style setters, dirty tracking, and the commit step
//!   that binds state before a draw or clear
//! - [`ContextConfig`] - Cache tuning loaded from `glcompat.toml`

pub mod cache;
pub mod commit;
pub mod config;
pub mod context;
pub mod error;
pub mod gl;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use cache::{CacheStats, CachedState, EntryId, EntryRef, StateCache};
pub use commit::DirtyFlags;
pub use config::{CacheConfig, ConfigError, ContextConfig, SpareLimits};
pub use context::{Context, StateCaches};
pub use error::{Result, StateError};
pub use state::{
    BlendAttachmentState, BlendState, DepthStencilState, InputLayoutState, RasterizerState,
    SamplerState, StateFamily, StateFloat, StencilFace, VertexAttrib, VertexConversion,
};

// Re-export the backend contract for convenience
pub use glcompat_backend::{Backend, BackendError};
