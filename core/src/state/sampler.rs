//! Sampler state descriptor
//!
//! Every field participates in identity. The GL min filter carries the mip
//! filter with it; the split happens during translation.

use glcompat_backend::{Backend, BackendError, SamplerCreateInfo, SamplerHandle};

use crate::cache::CachedState;
use crate::gl::{self, GLenum};
use crate::state::convert::{compare_mode, compare_op, mag_filter, min_filter, resolve, wrap_mode};
use crate::state::{StateFamily, StateFloat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerState {
    pub wrap_s: GLenum,
    pub wrap_t: GLenum,
    pub wrap_r: GLenum,
    pub min_filter: GLenum,
    pub mag_filter: GLenum,
    pub compare_mode: GLenum,
    pub compare_func: GLenum,
    pub lod_bias: StateFloat,
    pub min_lod: StateFloat,
    pub max_lod: StateFloat,
    pub max_anisotropy: StateFloat,
    pub border_color: [StateFloat; 4],
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            wrap_s: gl::REPEAT,
            wrap_t: gl::REPEAT,
            wrap_r: gl::REPEAT,
            min_filter: gl::NEAREST_MIPMAP_LINEAR,
            mag_filter: gl::LINEAR,
            compare_mode: gl::NONE,
            compare_func: gl::LEQUAL,
            lod_bias: StateFloat::new(0.0),
            min_lod: StateFloat::new(-1000.0),
            max_lod: StateFloat::new(1000.0),
            max_anisotropy: StateFloat::new(1.0),
            border_color: [StateFloat::new(0.0); 4],
        }
    }
}

impl SamplerState {
    pub fn to_create_info(&self) -> SamplerCreateInfo {
        let (min, mip) = resolve("min filter", self.min_filter, min_filter);
        SamplerCreateInfo {
            wrap: [self.wrap_s, self.wrap_t, self.wrap_r]
                .map(|wrap| resolve("wrap mode", wrap, wrap_mode)),
            min_filter: min,
            mag_filter: resolve("mag filter", self.mag_filter, mag_filter),
            mip_filter: mip,
            compare_enable: resolve("compare mode", self.compare_mode, compare_mode),
            compare_op: resolve("compare func", self.compare_func, compare_op),
            lod_bias: self.lod_bias.get(),
            min_lod: self.min_lod.get(),
            max_lod: self.max_lod.get(),
            max_anisotropy: self.max_anisotropy.get(),
            border_color: self.border_color.map(StateFloat::get),
        }
    }
}

impl CachedState for SamplerState {
    type Handle = SamplerHandle;
    const FAMILY: StateFamily = StateFamily::Sampler;

    fn canonicalize(&mut self) {
        self.lod_bias = self.lod_bias.canonical();
        self.min_lod = self.min_lod.canonical();
        self.max_lod = self.max_lod.canonical();
        self.max_anisotropy = self.max_anisotropy.canonical();
        self.border_color = self.border_color.map(StateFloat::canonical);
    }

    fn create<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<Self::Handle, BackendError> {
        backend.create_sampler(&self.to_create_info())
    }

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle) {
        backend.destroy_sampler(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glcompat_backend::{CompareOp, FilterMode, WrapMode};

    #[test]
    fn test_every_field_counts() {
        let base = SamplerState::default();
        let variants = [
            SamplerState {
                wrap_r: gl::CLAMP_TO_EDGE,
                ..base
            },
            SamplerState {
                compare_func: gl::GREATER,
                ..base
            },
            SamplerState {
                max_anisotropy: StateFloat::new(16.0),
                ..base
            },
            SamplerState {
                border_color: [StateFloat::new(1.0); 4],
                ..base
            },
        ];
        for variant in variants {
            assert_ne!(variant.canonical(), base.canonical());
        }
    }

    #[test]
    fn test_signed_zero_bias_is_one_sampler() {
        let a = SamplerState {
            lod_bias: StateFloat::new(-0.0),
            ..SamplerState::default()
        };
        assert_eq!(a.canonical(), SamplerState::default().canonical());
    }

    #[test]
    fn test_create_info_translation() {
        let state = SamplerState {
            wrap_s: gl::CLAMP_TO_BORDER,
            wrap_t: gl::MIRRORED_REPEAT,
            min_filter: gl::LINEAR_MIPMAP_NEAREST,
            mag_filter: gl::NEAREST,
            compare_mode: gl::COMPARE_REF_TO_TEXTURE,
            compare_func: gl::GEQUAL,
            ..SamplerState::default()
        };
        let info = state.to_create_info();
        assert_eq!(
            info.wrap,
            [
                WrapMode::ClampToBorder,
                WrapMode::MirroredRepeat,
                WrapMode::Repeat
            ]
        );
        assert_eq!(info.min_filter, FilterMode::Linear);
        assert_eq!(info.mip_filter, FilterMode::Nearest);
        assert_eq!(info.mag_filter, FilterMode::Nearest);
        assert!(info.compare_enable);
        assert_eq!(info.compare_op, CompareOp::GreaterOrEqual);
        assert_eq!(info.max_lod, 1000.0);
    }
}
