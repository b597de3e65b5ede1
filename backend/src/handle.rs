//! Owned backend object handles
//!
//! A handle is the only proof that a backend object exists. Handles are
//! neither `Copy` nor `Clone`: destroying one consumes it, so a double free
//! does not type-check.

use std::num::NonZeroU64;

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Hash)]
        pub struct $name(NonZeroU64);

        impl $name {
            /// Wrap a raw backend identifier. Only backends create handles.
            pub fn from_raw(raw: NonZeroU64) -> Self {
                Self(raw)
            }

            /// Raw backend identifier
            pub fn raw(&self) -> u64 {
                self.0.get()
            }
        }
    };
}

define_handle!(
    /// Immutable blend state object
    BlendStateHandle
);
define_handle!(
    /// Immutable depth-stencil state object
    DepthStencilStateHandle
);
define_handle!(
    /// Immutable rasterizer state object
    RasterizerStateHandle
);
define_handle!(
    /// Immutable sampler object
    SamplerHandle
);
define_handle!(
    /// Immutable vertex input layout object
    InputLayoutHandle
);
