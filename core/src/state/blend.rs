//! Blend state descriptor

use glcompat_backend::{
    Backend, BackendError, BlendAttachment, BlendStateCreateInfo, BlendStateHandle, ColorMask,
    MAX_COLOR_ATTACHMENTS,
};

use crate::cache::CachedState;
use crate::gl::{self, GLenum};
use crate::state::StateFamily;
use crate::state::convert::{blend_equation, blend_factor, logic_op, resolve};

/// Blending of one draw buffer.
///
/// When `enable` is false the factors and equations do not matter; only the
/// color mask does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendAttachmentState {
    pub enable: bool,
    pub src_rgb: GLenum,
    pub dst_rgb: GLenum,
    pub src_alpha: GLenum,
    pub dst_alpha: GLenum,
    pub equation_rgb: GLenum,
    pub equation_alpha: GLenum,
    /// Red, green, blue, alpha
    pub color_mask: [bool; 4],
}

impl Default for BlendAttachmentState {
    fn default() -> Self {
        Self {
            enable: false,
            src_rgb: gl::ONE,
            dst_rgb: gl::ZERO,
            src_alpha: gl::ONE,
            dst_alpha: gl::ZERO,
            equation_rgb: gl::FUNC_ADD,
            equation_alpha: gl::FUNC_ADD,
            color_mask: [true; 4],
        }
    }
}

impl BlendAttachmentState {
    fn canonicalize(&mut self) {
        if !self.enable {
            *self = Self {
                color_mask: self.color_mask,
                ..Self::default()
            };
        }
    }

    fn to_backend(&self) -> BlendAttachment {
        let mut color_mask = ColorMask::empty();
        for (channel, bit) in [ColorMask::R, ColorMask::G, ColorMask::B, ColorMask::A]
            .into_iter()
            .enumerate()
        {
            color_mask.set(bit, self.color_mask[channel]);
        }
        BlendAttachment {
            enable: self.enable,
            rgb_src: resolve("blend factor", self.src_rgb, blend_factor),
            rgb_dst: resolve("blend factor", self.dst_rgb, blend_factor),
            rgb_equation: resolve("blend equation", self.equation_rgb, blend_equation),
            alpha_src: resolve("blend factor", self.src_alpha, blend_factor),
            alpha_dst: resolve("blend factor", self.dst_alpha, blend_factor),
            alpha_equation: resolve("blend equation", self.equation_alpha, blend_equation),
            color_mask,
        }
    }
}

/// Blending of every draw buffer plus the framebuffer logic op
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlendState {
    pub attachments: [BlendAttachmentState; MAX_COLOR_ATTACHMENTS],
    pub logic_enable: bool,
    /// Ignored unless `logic_enable` is set
    pub logic_op: GLenum,
}

impl Default for BlendState {
    fn default() -> Self {
        Self {
            attachments: [BlendAttachmentState::default(); MAX_COLOR_ATTACHMENTS],
            logic_enable: false,
            logic_op: gl::COPY,
        }
    }
}

impl BlendState {
    pub fn to_create_info(&self) -> BlendStateCreateInfo {
        BlendStateCreateInfo {
            logic_enable: self.logic_enable,
            logic_op: resolve("logic op", self.logic_op, logic_op),
            attachments: self.attachments.map(|attachment| attachment.to_backend()),
        }
    }
}

impl CachedState for BlendState {
    type Handle = BlendStateHandle;
    const FAMILY: StateFamily = StateFamily::Blend;

    fn canonicalize(&mut self) {
        for attachment in &mut self.attachments {
            attachment.canonicalize();
        }
        if !self.logic_enable {
            self.logic_op = gl::COPY;
        }
    }

    fn create<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<Self::Handle, BackendError> {
        backend.create_blend_state(&self.to_create_info())
    }

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle) {
        backend.destroy_blend_state(handle);
    }
}
