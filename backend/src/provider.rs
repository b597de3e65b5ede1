//! The backend resource provider contract

use crate::error::BackendError;
use crate::handle::{
    BlendStateHandle, DepthStencilStateHandle, InputLayoutHandle, RasterizerStateHandle,
    SamplerHandle,
};
use crate::types::{
    BlendStateCreateInfo, DepthStencilStateCreateInfo, InputLayoutCreateInfo, Rect,
    RasterizerStateCreateInfo, SamplerCreateInfo, Viewport,
};

/// Allocates, frees and binds immutable state objects.
///
/// Creation may fail and must then leave no object behind. Destruction never
/// fails and consumes the handle. Binding makes an object current for the
/// next draw.
pub trait Backend {
    fn create_blend_state(
        &mut self,
        info: &BlendStateCreateInfo,
    ) -> Result<BlendStateHandle, BackendError>;
    fn destroy_blend_state(&mut self, handle: BlendStateHandle);
    fn bind_blend_state(&mut self, handle: &BlendStateHandle) -> Result<(), BackendError>;

    fn create_depth_stencil_state(
        &mut self,
        info: &DepthStencilStateCreateInfo,
    ) -> Result<DepthStencilStateHandle, BackendError>;
    fn destroy_depth_stencil_state(&mut self, handle: DepthStencilStateHandle);
    fn bind_depth_stencil_state(
        &mut self,
        handle: &DepthStencilStateHandle,
    ) -> Result<(), BackendError>;

    fn create_rasterizer_state(
        &mut self,
        info: &RasterizerStateCreateInfo,
    ) -> Result<RasterizerStateHandle, BackendError>;
    fn destroy_rasterizer_state(&mut self, handle: RasterizerStateHandle);
    fn bind_rasterizer_state(&mut self, handle: &RasterizerStateHandle)
    -> Result<(), BackendError>;

    fn create_sampler(&mut self, info: &SamplerCreateInfo) -> Result<SamplerHandle, BackendError>;
    fn destroy_sampler(&mut self, handle: SamplerHandle);
    /// Bind a sampler to one texture unit
    fn bind_sampler(&mut self, unit: u32, handle: &SamplerHandle) -> Result<(), BackendError>;

    fn create_input_layout(
        &mut self,
        info: &InputLayoutCreateInfo,
    ) -> Result<InputLayoutHandle, BackendError>;
    fn destroy_input_layout(&mut self, handle: InputLayoutHandle);
    fn bind_input_layout(&mut self, handle: &InputLayoutHandle) -> Result<(), BackendError>;

    // Dynamic state, not backed by objects

    fn set_blend_color(&mut self, color: [f32; 4]) -> Result<(), BackendError>;
    fn set_stencil_ref(&mut self, front: u32, back: u32) -> Result<(), BackendError>;
    fn set_viewport(&mut self, viewport: &Viewport) -> Result<(), BackendError>;
    fn set_scissor(&mut self, rect: &Rect) -> Result<(), BackendError>;
}

impl<T: Backend + ?Sized> Backend for &mut T {
    fn create_blend_state(
        &mut self,
        info: &BlendStateCreateInfo,
    ) -> Result<BlendStateHandle, BackendError> {
        (**self).create_blend_state(info)
    }
    fn destroy_blend_state(&mut self, handle: BlendStateHandle) {
        (**self).destroy_blend_state(handle)
    }
    fn bind_blend_state(&mut self, handle: &BlendStateHandle) -> Result<(), BackendError> {
        (**self).bind_blend_state(handle)
    }

    fn create_depth_stencil_state(
        &mut self,
        info: &DepthStencilStateCreateInfo,
    ) -> Result<DepthStencilStateHandle, BackendError> {
        (**self).create_depth_stencil_state(info)
    }
    fn destroy_depth_stencil_state(&mut self, handle: DepthStencilStateHandle) {
        (**self).destroy_depth_stencil_state(handle)
    }
    fn bind_depth_stencil_state(
        &mut self,
        handle: &DepthStencilStateHandle,
    ) -> Result<(), BackendError> {
        (**self).bind_depth_stencil_state(handle)
    }

    fn create_rasterizer_state(
        &mut self,
        info: &RasterizerStateCreateInfo,
    ) -> Result<RasterizerStateHandle, BackendError> {
        (**self).create_rasterizer_state(info)
    }
    fn destroy_rasterizer_state(&mut self, handle: RasterizerStateHandle) {
        (**self).destroy_rasterizer_state(handle)
    }
    fn bind_rasterizer_state(
        &mut self,
        handle: &RasterizerStateHandle,
    ) -> Result<(), BackendError> {
        (**self).bind_rasterizer_state(handle)
    }

    fn create_sampler(&mut self, info: &SamplerCreateInfo) -> Result<SamplerHandle, BackendError> {
        (**self).create_sampler(info)
    }
    fn destroy_sampler(&mut self, handle: SamplerHandle) {
        (**self).destroy_sampler(handle)
    }
    fn bind_sampler(&mut self, unit: u32, handle: &SamplerHandle) -> Result<(), BackendError> {
        (**self).bind_sampler(unit, handle)
    }

    fn create_input_layout(
        &mut self,
        info: &InputLayoutCreateInfo,
    ) -> Result<InputLayoutHandle, BackendError> {
        (**self).create_input_layout(info)
    }
    fn destroy_input_layout(&mut self, handle: InputLayoutHandle) {
        (**self).destroy_input_layout(handle)
    }
    fn bind_input_layout(&mut self, handle: &InputLayoutHandle) -> Result<(), BackendError> {
        (**self).bind_input_layout(handle)
    }

    fn set_blend_color(&mut self, color: [f32; 4]) -> Result<(), BackendError> {
        (**self).set_blend_color(color)
    }
    fn set_stencil_ref(&mut self, front: u32, back: u32) -> Result<(), BackendError> {
        (**self).set_stencil_ref(front, back)
    }
    fn set_viewport(&mut self, viewport: &Viewport) -> Result<(), BackendError> {
        (**self).set_viewport(viewport)
    }
    fn set_scissor(&mut self, rect: &Rect) -> Result<(), BackendError> {
        (**self).set_scissor(rect)
    }
}
