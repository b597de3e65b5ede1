//! Rasterizer state descriptor

use glcompat_backend::{
    Backend, BackendError, CullFaces, RasterizerStateCreateInfo, RasterizerStateHandle,
};

use crate::cache::CachedState;
use crate::gl::{self, GLenum};
use crate::state::convert::{cull_faces, fill_mode, front_ccw, resolve};
use crate::state::{StateFamily, StateFloat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RasterizerState {
    pub point_size: StateFloat,
    pub line_width: StateFloat,
    pub point_smooth_enable: bool,
    pub line_smooth_enable: bool,
    pub scissor_enable: bool,
    pub depth_clamp_enable: bool,
    pub rasterizer_discard_enable: bool,
    pub multisample_enable: bool,
    pub front_face: GLenum,
    pub cull_enable: bool,
    /// Ignored unless `cull_enable` is set
    pub cull_face: GLenum,
    pub fill_front: GLenum,
    pub fill_back: GLenum,
}

impl Default for RasterizerState {
    fn default() -> Self {
        Self {
            point_size: StateFloat::new(1.0),
            line_width: StateFloat::new(1.0),
            point_smooth_enable: false,
            line_smooth_enable: false,
            scissor_enable: false,
            depth_clamp_enable: false,
            rasterizer_discard_enable: false,
            multisample_enable: false,
            front_face: gl::CCW,
            cull_enable: false,
            cull_face: gl::BACK,
            fill_front: gl::FILL,
            fill_back: gl::FILL,
        }
    }
}

impl RasterizerState {
    pub fn to_create_info(&self) -> RasterizerStateCreateInfo {
        let cull_faces = if self.cull_enable {
            resolve("cull face", self.cull_face, cull_faces)
        } else {
            CullFaces::empty()
        };
        RasterizerStateCreateInfo {
            point_size: self.point_size.get(),
            line_width: self.line_width.get(),
            point_smooth_enable: self.point_smooth_enable,
            line_smooth_enable: self.line_smooth_enable,
            scissor_enable: self.scissor_enable,
            depth_clamp_enable: self.depth_clamp_enable,
            rasterizer_discard_enable: self.rasterizer_discard_enable,
            multisample_enable: self.multisample_enable,
            front_ccw: resolve("front face", self.front_face, front_ccw),
            cull_faces,
            fill_front: resolve("polygon mode", self.fill_front, fill_mode),
            fill_back: resolve("polygon mode", self.fill_back, fill_mode),
        }
    }
}

impl CachedState for RasterizerState {
    type Handle = RasterizerStateHandle;
    const FAMILY: StateFamily = StateFamily::Rasterizer;

    fn canonicalize(&mut self) {
        self.point_size = self.point_size.canonical();
        self.line_width = self.line_width.canonical();
        if !self.cull_enable {
            self.cull_face = gl::BACK;
        }
    }

    fn create<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<Self::Handle, BackendError> {
        backend.create_rasterizer_state(&self.to_create_info())
    }

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle) {
        backend.destroy_rasterizer_state(handle);
    }
}
