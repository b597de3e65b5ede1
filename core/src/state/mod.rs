//! State descriptor families
//!
//! One value type per backend object family. Each type:
//! - holds the API-level enumerators the setters wrote,
//! - canonicalizes itself (don't-care fields overwritten with defaults),
//! - translates to the backend create-info,
//! - implements [`CachedState`](crate::cache::CachedState) so it can be
//!   interned by a [`StateCache`](crate::cache::StateCache).

pub mod blend;
pub mod convert;
pub mod depth_stencil;
pub mod input_layout;
pub mod rasterizer;
pub mod sampler;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use blend::{BlendAttachmentState, BlendState};
pub use depth_stencil::{DepthStencilState, StencilFace};
pub use input_layout::{InputLayoutState, VertexAttrib, VertexConversion};
pub use rasterizer::RasterizerState;
pub use sampler::SamplerState;

/// Backend object family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateFamily {
    Blend,
    DepthStencil,
    Rasterizer,
    Sampler,
    InputLayout,
}

impl StateFamily {
    pub const ALL: [StateFamily; 5] = [
        StateFamily::Blend,
        StateFamily::DepthStencil,
        StateFamily::Rasterizer,
        StateFamily::Sampler,
        StateFamily::InputLayout,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StateFamily::Blend => "blend state",
            StateFamily::DepthStencil => "depth-stencil state",
            StateFamily::Rasterizer => "rasterizer state",
            StateFamily::Sampler => "sampler",
            StateFamily::InputLayout => "input layout",
        }
    }
}

impl fmt::Display for StateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A float stored in a descriptor.
///
/// Compares and hashes by bit pattern so descriptors can be `Eq + Hash`.
/// [`canonical`](Self::canonical) folds `-0.0` into `0.0` and every NaN into
/// one pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateFloat(f32);

impl StateFloat {
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    pub fn get(self) -> f32 {
        self.0
    }

    pub fn canonical(self) -> Self {
        if self.0 == 0.0 {
            Self(0.0)
        } else if self.0.is_nan() {
            Self(f32::NAN)
        } else {
            self
        }
    }
}

impl From<f32> for StateFloat {
    fn from(value: f32) -> Self {
        Self(value)
    }
}

impl PartialEq for StateFloat {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StateFloat {}

impl Hash for StateFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}
