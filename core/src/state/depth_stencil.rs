//! Depth-stencil state descriptor

use glcompat_backend::{
    Backend, BackendError, DepthStencilStateCreateInfo, DepthStencilStateHandle, StencilFaceInfo,
};

use crate::cache::CachedState;
use crate::gl::{self, GLenum};
use crate::state::StateFamily;
use crate::state::convert::{compare_op, resolve, stencil_op};

/// Stencil configuration of one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFace {
    pub fail_op: GLenum,
    pub depth_fail_op: GLenum,
    pub pass_op: GLenum,
    pub compare_op: GLenum,
    pub compare_mask: u32,
    pub write_mask: u32,
}

impl Default for StencilFace {
    fn default() -> Self {
        Self {
            fail_op: gl::KEEP,
            depth_fail_op: gl::KEEP,
            pass_op: gl::KEEP,
            compare_op: gl::ALWAYS,
            compare_mask: u32::MAX,
            write_mask: u32::MAX,
        }
    }
}

impl StencilFace {
    fn to_backend(self) -> StencilFaceInfo {
        StencilFaceInfo {
            fail_op: resolve("stencil op", self.fail_op, stencil_op),
            pass_op: resolve("stencil op", self.pass_op, stencil_op),
            depth_fail_op: resolve("stencil op", self.depth_fail_op, stencil_op),
            compare_op: resolve("stencil func", self.compare_op, compare_op),
            compare_mask: self.compare_mask,
            write_mask: self.write_mask,
        }
    }
}

/// Depth test, depth writes and two-sided stencil.
///
/// `depth_compare` is meaningless without the depth test, and both stencil
/// faces are meaningless without the stencil test. The depth write mask
/// always counts: clears honor it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilState {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare: GLenum,
    pub stencil_enable: bool,
    pub front: StencilFace,
    pub back: StencilFace,
}

impl Default for DepthStencilState {
    fn default() -> Self {
        Self {
            depth_test_enable: false,
            depth_write_enable: true,
            depth_compare: gl::LESS,
            stencil_enable: false,
            front: StencilFace::default(),
            back: StencilFace::default(),
        }
    }
}

impl DepthStencilState {
    pub fn to_create_info(&self) -> DepthStencilStateCreateInfo {
        DepthStencilStateCreateInfo {
            depth_test_enable: self.depth_test_enable,
            depth_write_enable: self.depth_write_enable,
            depth_compare: resolve("depth func", self.depth_compare, compare_op),
            stencil_enable: self.stencil_enable,
            front: self.front.to_backend(),
            back: self.back.to_backend(),
        }
    }
}

impl CachedState for DepthStencilState {
    type Handle = DepthStencilStateHandle;
    const FAMILY: StateFamily = StateFamily::DepthStencil;

    fn canonicalize(&mut self) {
        if !self.depth_test_enable {
            self.depth_compare = gl::LESS;
        }
        if !self.stencil_enable {
            self.front = StencilFace::default();
            self.back = StencilFace::default();
        }
    }

    fn create<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<Self::Handle, BackendError> {
        backend.create_depth_stencil_state(&self.to_create_info())
    }

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle) {
        backend.destroy_depth_stencil_state(handle);
    }
}
