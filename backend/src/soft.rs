//! In-memory reference backend
//!
//! `SoftBackend` keeps every live object together with the create-info it
//! was built from. It records what is bound and can be told to fail
//! allocations or binds, which makes it the backend of choice for exercising
//! the state layer without a device.

use std::num::NonZeroU64;

use hashbrown::HashMap;

use crate::error::BackendError;
use crate::handle::{
    BlendStateHandle, DepthStencilStateHandle, InputLayoutHandle, RasterizerStateHandle,
    SamplerHandle,
};
use crate::provider::Backend;
use crate::types::{
    BlendStateCreateInfo, DepthStencilStateCreateInfo, InputLayoutCreateInfo, MAX_TEXTURE_UNITS,
    RasterizerStateCreateInfo, Rect, SamplerCreateInfo, Viewport,
};

/// Kind of a backend object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    BlendState,
    DepthStencilState,
    RasterizerState,
    Sampler,
    InputLayout,
}

/// A live object and the create-info it was built from
#[derive(Debug, Clone, PartialEq)]
pub enum SoftObject {
    BlendState(BlendStateCreateInfo),
    DepthStencilState(DepthStencilStateCreateInfo),
    RasterizerState(RasterizerStateCreateInfo),
    Sampler(SamplerCreateInfo),
    InputLayout(InputLayoutCreateInfo),
}

impl SoftObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            SoftObject::BlendState(_) => ObjectKind::BlendState,
            SoftObject::DepthStencilState(_) => ObjectKind::DepthStencilState,
            SoftObject::RasterizerState(_) => ObjectKind::RasterizerState,
            SoftObject::Sampler(_) => ObjectKind::Sampler,
            SoftObject::InputLayout(_) => ObjectKind::InputLayout,
        }
    }
}

/// What the soft device currently has bound (raw handle ids)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftBindings {
    pub blend_state: Option<u64>,
    pub depth_stencil_state: Option<u64>,
    pub rasterizer_state: Option<u64>,
    pub input_layout: Option<u64>,
    pub samplers: [Option<u64>; MAX_TEXTURE_UNITS],
    pub blend_color: [f32; 4],
    pub stencil_ref: (u32, u32),
    pub viewport: Viewport,
    pub scissor: Rect,
}

/// Counters exposed for assertions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SoftStats {
    pub created: u64,
    pub destroyed: u64,
    pub binds: u64,
    pub failed_allocations: u64,
}

/// Reference backend that stores objects in a map
#[derive(Debug, Default)]
pub struct SoftBackend {
    issued: u64,
    objects: HashMap<u64, SoftObject>,
    bindings: SoftBindings,
    stats: SoftStats,
    fail_allocations: u32,
    fail_binds: u32,
    allocation_limit: Option<usize>,
}

impl SoftBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` create calls fail with `OutOfMemory`
    pub fn fail_next_allocations(&mut self, count: u32) {
        self.fail_allocations = count;
    }

    /// Make the next `count` object binds fail with `Device(-1)`
    pub fn fail_next_binds(&mut self, count: u32) {
        self.fail_binds = count;
    }

    /// Cap the number of live objects. `None` removes the cap.
    pub fn set_allocation_limit(&mut self, limit: Option<usize>) {
        self.allocation_limit = limit;
    }

    /// Number of live objects of every kind
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    /// Number of live objects of one kind
    pub fn live_objects_of(&self, kind: ObjectKind) -> usize {
        self.objects.values().filter(|o| o.kind() == kind).count()
    }

    pub fn is_live(&self, raw: u64) -> bool {
        self.objects.contains_key(&raw)
    }

    /// Look up a live object by its raw handle id
    pub fn object(&self, raw: u64) -> Option<&SoftObject> {
        self.objects.get(&raw)
    }

    pub fn bindings(&self) -> &SoftBindings {
        &self.bindings
    }

    pub fn stats(&self) -> SoftStats {
        self.stats
    }

    fn allocate(&mut self, object: SoftObject) -> Result<NonZeroU64, BackendError> {
        let kind = object.kind();
        if self.fail_allocations > 0 {
            self.fail_allocations -= 1;
            self.stats.failed_allocations += 1;
            tracing::trace!(?kind, "soft backend: injected allocation failure");
            return Err(BackendError::OutOfMemory);
        }
        if self
            .allocation_limit
            .is_some_and(|limit| self.objects.len() >= limit)
        {
            self.stats.failed_allocations += 1;
            tracing::trace!(?kind, "soft backend: allocation limit reached");
            return Err(BackendError::OutOfMemory);
        }

        let raw = NonZeroU64::MIN.saturating_add(self.issued);
        self.issued += 1;
        self.objects.insert(raw.get(), object);
        self.stats.created += 1;
        tracing::trace!(?kind, id = raw.get(), "soft backend: created object");
        Ok(raw)
    }

    fn free(&mut self, raw: u64, kind: ObjectKind) {
        match self.objects.remove(&raw) {
            Some(object) if object.kind() == kind => {
                self.stats.destroyed += 1;
                tracing::trace!(?kind, id = raw, "soft backend: destroyed object");
            }
            Some(object) => panic!(
                "soft backend: destroyed {:?} {} as {:?}",
                object.kind(),
                raw,
                kind
            ),
            None => panic!("soft backend: destroyed unknown {:?} {}", kind, raw),
        }
    }

    fn check_bind(&mut self, raw: u64, kind: ObjectKind) -> Result<(), BackendError> {
        if self.fail_binds > 0 {
            self.fail_binds -= 1;
            return Err(BackendError::Device(-1));
        }
        match self.objects.get(&raw) {
            Some(object) if object.kind() == kind => {
                self.stats.binds += 1;
                tracing::trace!(?kind, id = raw, "soft backend: bound object");
                Ok(())
            }
            _ => Err(BackendError::InvalidArgument),
        }
    }
}

impl Backend for SoftBackend {
    fn create_blend_state(
        &mut self,
        info: &BlendStateCreateInfo,
    ) -> Result<BlendStateHandle, BackendError> {
        self.allocate(SoftObject::BlendState(info.clone()))
            .map(BlendStateHandle::from_raw)
    }

    fn destroy_blend_state(&mut self, handle: BlendStateHandle) {
        self.free(handle.raw(), ObjectKind::BlendState);
    }

    fn bind_blend_state(&mut self, handle: &BlendStateHandle) -> Result<(), BackendError> {
        self.check_bind(handle.raw(), ObjectKind::BlendState)?;
        self.bindings.blend_state = Some(handle.raw());
        Ok(())
    }

    fn create_depth_stencil_state(
        &mut self,
        info: &DepthStencilStateCreateInfo,
    ) -> Result<DepthStencilStateHandle, BackendError> {
        self.allocate(SoftObject::DepthStencilState(*info))
            .map(DepthStencilStateHandle::from_raw)
    }

    fn destroy_depth_stencil_state(&mut self, handle: DepthStencilStateHandle) {
        self.free(handle.raw(), ObjectKind::DepthStencilState);
    }

    fn bind_depth_stencil_state(
        &mut self,
        handle: &DepthStencilStateHandle,
    ) -> Result<(), BackendError> {
        self.check_bind(handle.raw(), ObjectKind::DepthStencilState)?;
        self.bindings.depth_stencil_state = Some(handle.raw());
        Ok(())
    }

    fn create_rasterizer_state(
        &mut self,
        info: &RasterizerStateCreateInfo,
    ) -> Result<RasterizerStateHandle, BackendError> {
        self.allocate(SoftObject::RasterizerState(*info))
            .map(RasterizerStateHandle::from_raw)
    }

    fn destroy_rasterizer_state(&mut self, handle: RasterizerStateHandle) {
        self.free(handle.raw(), ObjectKind::RasterizerState);
    }

    fn bind_rasterizer_state(
        &mut self,
        handle: &RasterizerStateHandle,
    ) -> Result<(), BackendError> {
        self.check_bind(handle.raw(), ObjectKind::RasterizerState)?;
        self.bindings.rasterizer_state = Some(handle.raw());
        Ok(())
    }

    fn create_sampler(&mut self, info: &SamplerCreateInfo) -> Result<SamplerHandle, BackendError> {
        self.allocate(SoftObject::Sampler(*info))
            .map(SamplerHandle::from_raw)
    }

    fn destroy_sampler(&mut self, handle: SamplerHandle) {
        self.free(handle.raw(), ObjectKind::Sampler);
    }

    fn bind_sampler(&mut self, unit: u32, handle: &SamplerHandle) -> Result<(), BackendError> {
        if unit as usize >= MAX_TEXTURE_UNITS {
            return Err(BackendError::InvalidArgument);
        }
        self.check_bind(handle.raw(), ObjectKind::Sampler)?;
        self.bindings.samplers[unit as usize] = Some(handle.raw());
        Ok(())
    }

    fn create_input_layout(
        &mut self,
        info: &InputLayoutCreateInfo,
    ) -> Result<InputLayoutHandle, BackendError> {
        self.allocate(SoftObject::InputLayout(info.clone()))
            .map(InputLayoutHandle::from_raw)
    }

    fn destroy_input_layout(&mut self, handle: InputLayoutHandle) {
        self.free(handle.raw(), ObjectKind::InputLayout);
    }

    fn bind_input_layout(&mut self, handle: &InputLayoutHandle) -> Result<(), BackendError> {
        self.check_bind(handle.raw(), ObjectKind::InputLayout)?;
        self.bindings.input_layout = Some(handle.raw());
        Ok(())
    }

    fn set_blend_color(&mut self, color: [f32; 4]) -> Result<(), BackendError> {
        self.bindings.blend_color = color;
        Ok(())
    }

    fn set_stencil_ref(&mut self, front: u32, back: u32) -> Result<(), BackendError> {
        self.bindings.stencil_ref = (front, back);
        Ok(())
    }

    fn set_viewport(&mut self, viewport: &Viewport) -> Result<(), BackendError> {
        self.bindings.viewport = *viewport;
        Ok(())
    }

    fn set_scissor(&mut self, rect: &Rect) -> Result<(), BackendError> {
        self.bindings.scissor = *rect;
        Ok(())
    }
}
