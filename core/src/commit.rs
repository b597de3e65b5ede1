//! Dirty tracking and the bind step of a commit
//!
//! Setters write into [`Tracked`] descriptors, which report whether the
//! *effective* (canonical) value changed. Only a real change raises a
//! [`DirtyFlags`] bit. At draw or clear time each dirty family goes through
//! [`Binding::rebind`]: acquire from the cache, bind, then release whatever
//! was bound before.

use glcompat_backend::{Backend, BackendError};

use crate::cache::{CachedState, EntryRef, StateCache};
use crate::error::{Result, StateError};

bitflags::bitflags! {
    /// State that changed since it was last pushed to the backend
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u32 {
        const BLEND_STATE = 1 << 0;
        const DEPTH_STENCIL_STATE = 1 << 1;
        const RASTERIZER_STATE = 1 << 2;
        const INPUT_LAYOUT = 1 << 3;
        /// At least one texture unit has a dirty sampler
        const SAMPLERS = 1 << 4;
        const BLEND_COLOR = 1 << 5;
        const STENCIL_REF = 1 << 6;
        const VIEWPORT = 1 << 7;
        const SCISSOR = 1 << 8;
    }
}

impl DirtyFlags {
    /// Everything a draw depends on
    pub const DRAW: DirtyFlags = DirtyFlags::all();

    /// What a clear honors: color mask, depth/stencil write masks, scissor
    pub const CLEAR: DirtyFlags = DirtyFlags::BLEND_STATE
        .union(DirtyFlags::DEPTH_STENCIL_STATE)
        .union(DirtyFlags::RASTERIZER_STATE)
        .union(DirtyFlags::SCISSOR);
}

/// A descriptor whose changes are judged on its canonical form
#[derive(Debug, Clone, Default)]
pub struct Tracked<S: CachedState> {
    value: S,
}

impl<S: CachedState> Tracked<S> {
    pub fn new(value: S) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &S {
        &self.value
    }

    /// Apply `mutate`; returns whether the canonical value changed.
    ///
    /// Writes to don't-care fields are kept (they matter again once the
    /// guarding enable flips) but do not count as a change.
    pub fn update(&mut self, mutate: impl FnOnce(&mut S)) -> bool {
        let before = self.value.canonical();
        mutate(&mut self.value);
        self.value.canonical() != before
    }
}

/// The entry currently bound for one family (or one sampler unit)
#[derive(Debug)]
pub struct Binding<S: CachedState> {
    current: Option<EntryRef<S>>,
}

impl<S: CachedState> Default for Binding<S> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<S: CachedState> Binding<S> {
    pub fn entry(&self) -> Option<&EntryRef<S>> {
        self.current.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.current.is_some()
    }

    /// Acquire `state`, bind it, then drop the previous binding.
    ///
    /// On any failure the previous binding stays in place and no reference
    /// is leaked.
    pub fn rebind<B, F>(
        &mut self,
        cache: &mut StateCache<S>,
        backend: &mut B,
        state: &S,
        bind: F,
    ) -> Result<()>
    where
        B: Backend + ?Sized,
        F: FnOnce(&mut B, &S::Handle) -> std::result::Result<(), BackendError>,
    {
        let entry = cache.acquire(backend, state)?;
        if let Err(err) = bind(backend, cache.handle(&entry)) {
            tracing::warn!(family = %S::FAMILY, "backend bind failed: {}", err);
            cache.release(backend, entry);
            return Err(StateError::from_backend(S::FAMILY.name(), &err));
        }
        if let Some(previous) = self.current.replace(entry) {
            cache.release(backend, previous);
        }
        tracing::trace!(family = %S::FAMILY, "bound state object");
        Ok(())
    }

    /// Drop the current binding, if any
    pub fn unbind<B: Backend + ?Sized>(&mut self, cache: &mut StateCache<S>, backend: &mut B) {
        if let Some(previous) = self.current.take() {
            cache.release(backend, previous);
        }
    }
}
