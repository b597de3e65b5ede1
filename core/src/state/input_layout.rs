//! Vertex input layout descriptor

use glcompat_backend::{
    Backend, BackendError, InputLayoutAttrib, InputLayoutCreateInfo, InputLayoutHandle,
    MAX_VERTEX_ATTRIBS,
};

use crate::cache::CachedState;
use crate::gl::{self, GLenum};
use crate::state::StateFamily;
use crate::state::convert::attrib_format;

/// How fetched components reach the shader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexConversion {
    /// Integer attribute, no conversion
    Int,
    /// Converted to float without normalization
    Scaled,
    /// Normalized to [0, 1] or [-1, 1]
    Norm,
}

/// One vertex attribute slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttrib {
    pub enable: bool,
    /// 1..=4 or `gl::BGRA`
    pub size: u32,
    pub ty: GLenum,
    pub conversion: VertexConversion,
    pub offset: u32,
    pub binding: u32,
    pub divisor: u32,
}

impl Default for VertexAttrib {
    fn default() -> Self {
        Self {
            enable: false,
            size: 4,
            ty: gl::FLOAT,
            conversion: VertexConversion::Scaled,
            offset: 0,
            binding: 0,
            divisor: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct InputLayoutState {
    pub attribs: [VertexAttrib; MAX_VERTEX_ATTRIBS],
}

impl InputLayoutState {
    pub fn to_create_info(&self) -> InputLayoutCreateInfo {
        InputLayoutCreateInfo {
            attribs: self.attribs.map(|attrib| {
                let format = attrib_format(attrib.size, attrib.ty, attrib.conversion)
                    .unwrap_or_else(|err| panic!("vertex attribute reached translation: {err}"));
                InputLayoutAttrib {
                    enable: attrib.enable,
                    format,
                    offset: attrib.offset,
                    binding: attrib.binding,
                    divisor: attrib.divisor,
                }
            }),
        }
    }
}

impl CachedState for InputLayoutState {
    type Handle = InputLayoutHandle;
    const FAMILY: StateFamily = StateFamily::InputLayout;

    fn canonicalize(&mut self) {
        for attrib in &mut self.attribs {
            if !attrib.enable {
                *attrib = VertexAttrib::default();
            }
        }
    }

    fn create<B: Backend + ?Sized>(&self, backend: &mut B) -> Result<Self::Handle, BackendError> {
        backend.create_input_layout(&self.to_create_info())
    }

    fn destroy<B: Backend + ?Sized>(backend: &mut B, handle: Self::Handle) {
        backend.destroy_input_layout(handle);
    }
}
