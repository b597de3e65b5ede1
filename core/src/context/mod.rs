//! Rendering context: aggregate state, caches, bindings, commit
//!
//! A [`Context`] owns its backend and one cache per state family. Setters
//! (see `setters.rs`) only touch the aggregate state and dirty flags; the
//! backend sees nothing until [`Context::commit`] runs, typically through
//! [`Context::prepare_draw`] or [`Context::prepare_clear`].

mod setters;
#[cfg(test)]
mod tests;

use glcompat_backend::{Backend, MAX_TEXTURE_UNITS, Rect, Viewport};

use crate::cache::{CacheStats, StateCache};
use crate::commit::{Binding, DirtyFlags, Tracked};
use crate::config::{CacheConfig, ContextConfig};
use crate::error::{Result, StateError};
use crate::gl::{self, GLenum};
use crate::state::{
    BlendState, DepthStencilState, InputLayoutState, RasterizerState, SamplerState, StateFamily,
};

/// One cache per state family
#[derive(Debug)]
pub struct StateCaches {
    pub blend: StateCache<BlendState>,
    pub depth_stencil: StateCache<DepthStencilState>,
    pub rasterizer: StateCache<RasterizerState>,
    pub sampler: StateCache<SamplerState>,
    pub input_layout: StateCache<InputLayoutState>,
}

impl StateCaches {
    pub fn new(config: &CacheConfig) -> Self {
        let limits = &config.spare_limits;
        Self {
            blend: StateCache::new(config.bucket_count, limits.blend),
            depth_stencil: StateCache::new(config.bucket_count, limits.depth_stencil),
            rasterizer: StateCache::new(config.bucket_count, limits.rasterizer),
            sampler: StateCache::new(config.bucket_count, limits.sampler),
            input_layout: StateCache::new(config.bucket_count, limits.input_layout),
        }
    }

    /// Live entries of one family
    pub fn len_of(&self, family: StateFamily) -> usize {
        match family {
            StateFamily::Blend => self.blend.len(),
            StateFamily::DepthStencil => self.depth_stencil.len(),
            StateFamily::Rasterizer => self.rasterizer.len(),
            StateFamily::Sampler => self.sampler.len(),
            StateFamily::InputLayout => self.input_layout.len(),
        }
    }

    pub fn stats_of(&self, family: StateFamily) -> CacheStats {
        match family {
            StateFamily::Blend => self.blend.stats(),
            StateFamily::DepthStencil => self.depth_stencil.stats(),
            StateFamily::Rasterizer => self.rasterizer.stats(),
            StateFamily::Sampler => self.sampler.stats(),
            StateFamily::InputLayout => self.input_layout.stats(),
        }
    }

    fn purge<B: Backend + ?Sized>(&mut self, backend: &mut B) {
        self.blend.purge(backend);
        self.depth_stencil.purge(backend);
        self.rasterizer.purge(backend);
        self.sampler.purge(backend);
        self.input_layout.purge(backend);
    }
}

/// Everything the setters write
#[derive(Debug, Clone)]
struct AggregateState {
    blend: Tracked<BlendState>,
    depth_stencil: Tracked<DepthStencilState>,
    rasterizer: Tracked<RasterizerState>,
    input_layout: Tracked<InputLayoutState>,
    samplers: [Tracked<SamplerState>; MAX_TEXTURE_UNITS],
    /// Divisor per vertex buffer binding, mirrored into the attributes
    binding_divisors: [u32; glcompat_backend::MAX_VERTEX_ATTRIBS],
    blend_color: [f32; 4],
    stencil_ref: (u32, u32),
    viewport: Viewport,
    scissor: Rect,
}

impl Default for AggregateState {
    fn default() -> Self {
        Self {
            blend: Tracked::default(),
            depth_stencil: Tracked::default(),
            rasterizer: Tracked::default(),
            input_layout: Tracked::default(),
            samplers: std::array::from_fn(|_| Tracked::default()),
            binding_divisors: [0; glcompat_backend::MAX_VERTEX_ATTRIBS],
            blend_color: [0.0; 4],
            stencil_ref: (0, 0),
            viewport: Viewport {
                min_depth: 0.0,
                max_depth: 1.0,
                ..Viewport::default()
            },
            scissor: Rect::default(),
        }
    }
}

/// What is currently bound on the backend
#[derive(Debug, Default)]
struct Bindings {
    blend: Binding<BlendState>,
    depth_stencil: Binding<DepthStencilState>,
    rasterizer: Binding<RasterizerState>,
    input_layout: Binding<InputLayoutState>,
    samplers: [Binding<SamplerState>; MAX_TEXTURE_UNITS],
}

/// Mask with one bit per texture unit
const ALL_SAMPLER_UNITS: u32 = if MAX_TEXTURE_UNITS >= 32 {
    u32::MAX
} else {
    (1 << MAX_TEXTURE_UNITS) - 1
};

/// GL-style state machine over a [`Backend`]
pub struct Context<B: Backend> {
    backend: B,
    caches: StateCaches,
    state: AggregateState,
    bindings: Bindings,
    dirty: DirtyFlags,
    dirty_samplers: u32,
    error: Option<StateError>,
}

impl<B: Backend> std::fmt::Debug for Context<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("caches", &self.caches)
            .field("dirty", &self.dirty)
            .field("dirty_samplers", &format_args!("{:#06x}", self.dirty_samplers))
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> Context<B> {
    pub fn new(backend: B, config: &ContextConfig) -> Self {
        tracing::debug!(
            buckets = config.cache.bucket_count,
            "creating state context"
        );
        Self {
            backend,
            caches: StateCaches::new(&config.cache),
            state: AggregateState::default(),
            bindings: Bindings::default(),
            // Nothing is bound yet
            dirty: DirtyFlags::all(),
            dirty_samplers: ALL_SAMPLER_UNITS,
            error: None,
        }
    }

    pub fn with_defaults(backend: B) -> Self {
        Self::new(backend, &ContextConfig::default())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn caches(&self) -> &StateCaches {
        &self.caches
    }

    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Texture units whose sampler awaits commit, one bit per unit
    pub fn dirty_sampler_units(&self) -> u32 {
        self.dirty_samplers
    }

    pub fn blend_state(&self) -> &BlendState {
        self.state.blend.get()
    }

    pub fn depth_stencil_state(&self) -> &DepthStencilState {
        self.state.depth_stencil.get()
    }

    pub fn rasterizer_state(&self) -> &RasterizerState {
        self.state.rasterizer.get()
    }

    pub fn input_layout_state(&self) -> &InputLayoutState {
        self.state.input_layout.get()
    }

    /// Sampler state of `unit`, or `None` past the last unit
    pub fn sampler_state(&self, unit: u32) -> Option<&SamplerState> {
        self.state.samplers.get(unit as usize).map(Tracked::get)
    }

    pub fn current_blend_color(&self) -> [f32; 4] {
        self.state.blend_color
    }

    pub fn current_viewport(&self) -> Viewport {
        self.state.viewport
    }

    pub fn current_scissor(&self) -> Rect {
        self.state.scissor
    }

    /// Backend handle id bound for a family (the first texture unit for
    /// samplers)
    pub fn bound_raw(&self, family: StateFamily) -> Option<u64> {
        let caches = &self.caches;
        match family {
            StateFamily::Blend => self
                .bindings
                .blend
                .entry()
                .map(|entry| caches.blend.handle(entry).raw()),
            StateFamily::DepthStencil => self
                .bindings
                .depth_stencil
                .entry()
                .map(|entry| caches.depth_stencil.handle(entry).raw()),
            StateFamily::Rasterizer => self
                .bindings
                .rasterizer
                .entry()
                .map(|entry| caches.rasterizer.handle(entry).raw()),
            StateFamily::Sampler => self.bound_sampler_raw(0),
            StateFamily::InputLayout => self
                .bindings
                .input_layout
                .entry()
                .map(|entry| caches.input_layout.handle(entry).raw()),
        }
    }

    /// Backend handle id bound on a texture unit
    pub fn bound_sampler_raw(&self, unit: u32) -> Option<u64> {
        let binding = self.bindings.samplers.get(unit as usize)?;
        binding
            .entry()
            .map(|entry| self.caches.sampler.handle(entry).raw())
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Return and clear the first error recorded since the last call
    pub fn get_error(&mut self) -> GLenum {
        self.error
            .take()
            .map_or(gl::NO_ERROR, |err| err.gl_code())
    }

    /// The recorded error without clearing it
    pub fn pending_error(&self) -> Option<&StateError> {
        self.error.as_ref()
    }

    /// Keep the first error for `get_error`, pass the result through
    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if self.error.is_none() {
                self.error = Some(err.clone());
            }
        }
        result
    }

    // ========================================================================
    // Commit
    // ========================================================================

    /// Push the dirty state selected by `mask` to the backend.
    ///
    /// Families are committed in flag order. The first failure stops the
    /// commit: the failing family keeps its previous binding and its dirty
    /// bit, later families are left untouched.
    pub fn commit(&mut self, mask: DirtyFlags) -> Result<()> {
        let pending = self.dirty & mask;
        for flag in pending.iter() {
            let result = self.commit_flag(flag);
            self.record(result)?;
            self.dirty.remove(flag);
        }
        Ok(())
    }

    /// Commit everything a draw depends on
    pub fn prepare_draw(&mut self) -> Result<()> {
        self.commit(DirtyFlags::DRAW)
    }

    /// Commit what a clear honors
    pub fn prepare_clear(&mut self) -> Result<()> {
        self.commit(DirtyFlags::CLEAR)
    }

    fn commit_flag(&mut self, flag: DirtyFlags) -> Result<()> {
        if flag == DirtyFlags::SAMPLERS {
            return self.commit_samplers();
        }

        let backend = &mut self.backend;
        let caches = &mut self.caches;
        let bindings = &mut self.bindings;
        let state = &self.state;

        if flag == DirtyFlags::BLEND_STATE {
            bindings.blend.rebind(
                &mut caches.blend,
                backend,
                state.blend.get(),
                |backend, handle| backend.bind_blend_state(handle),
            )
        } else if flag == DirtyFlags::DEPTH_STENCIL_STATE {
            bindings.depth_stencil.rebind(
                &mut caches.depth_stencil,
                backend,
                state.depth_stencil.get(),
                |backend, handle| backend.bind_depth_stencil_state(handle),
            )
        } else if flag == DirtyFlags::RASTERIZER_STATE {
            bindings.rasterizer.rebind(
                &mut caches.rasterizer,
                backend,
                state.rasterizer.get(),
                |backend, handle| backend.bind_rasterizer_state(handle),
            )
        } else if flag == DirtyFlags::INPUT_LAYOUT {
            bindings.input_layout.rebind(
                &mut caches.input_layout,
                backend,
                state.input_layout.get(),
                |backend, handle| backend.bind_input_layout(handle),
            )
        } else if flag == DirtyFlags::BLEND_COLOR {
            backend
                .set_blend_color(state.blend_color)
                .map_err(|err| StateError::from_backend("blend color", &err))
        } else if flag == DirtyFlags::STENCIL_REF {
            let (front, back) = state.stencil_ref;
            backend
                .set_stencil_ref(front, back)
                .map_err(|err| StateError::from_backend("stencil reference", &err))
        } else if flag == DirtyFlags::VIEWPORT {
            backend
                .set_viewport(&state.viewport)
                .map_err(|err| StateError::from_backend("viewport", &err))
        } else if flag == DirtyFlags::SCISSOR {
            backend
                .set_scissor(&state.scissor)
                .map_err(|err| StateError::from_backend("scissor", &err))
        } else {
            unreachable!("commit of unknown dirty flag {:?}", flag)
        }
    }

    fn commit_samplers(&mut self) -> Result<()> {
        let mut units = self.dirty_samplers;
        while units != 0 {
            let unit = units.trailing_zeros();
            units &= units - 1;

            let index = unit as usize;
            self.bindings.samplers[index].rebind(
                &mut self.caches.sampler,
                &mut self.backend,
                self.state.samplers[index].get(),
                |backend, handle| backend.bind_sampler(unit, handle),
            )?;
            self.dirty_samplers &= !(1 << unit);
        }
        Ok(())
    }

    // ========================================================================
    // Cache management
    // ========================================================================

    /// Retune the spare bound of one family's cache
    pub fn set_spare_limit(&mut self, family: StateFamily, limit: usize) {
        let backend = &mut self.backend;
        match family {
            StateFamily::Blend => self.caches.blend.set_spare_limit(backend, limit),
            StateFamily::DepthStencil => self.caches.depth_stencil.set_spare_limit(backend, limit),
            StateFamily::Rasterizer => self.caches.rasterizer.set_spare_limit(backend, limit),
            StateFamily::Sampler => self.caches.sampler.set_spare_limit(backend, limit),
            StateFamily::InputLayout => self.caches.input_layout.set_spare_limit(backend, limit),
        }
    }

    /// Release every binding and destroy every cached backend object.
    ///
    /// All state is marked dirty, so the next commit rebuilds what it needs.
    pub fn unbind_all(&mut self) {
        let backend = &mut self.backend;
        let caches = &mut self.caches;
        let bindings = &mut self.bindings;

        bindings.blend.unbind(&mut caches.blend, backend);
        bindings.depth_stencil.unbind(&mut caches.depth_stencil, backend);
        bindings.rasterizer.unbind(&mut caches.rasterizer, backend);
        bindings.input_layout.unbind(&mut caches.input_layout, backend);
        for binding in &mut bindings.samplers {
            binding.unbind(&mut caches.sampler, backend);
        }
        caches.purge(backend);

        self.dirty = DirtyFlags::all();
        self.dirty_samplers = ALL_SAMPLER_UNITS;
    }
}

impl<B: Backend> Drop for Context<B> {
    fn drop(&mut self) {
        self.unbind_all();
    }
}
