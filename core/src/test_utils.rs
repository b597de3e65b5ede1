//! Shared test utilities for unit tests

use glcompat_backend::SoftBackend;

use crate::state::{SamplerState, StateFloat};

/// Route `tracing` output to the test harness (honors `RUST_LOG`)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Soft backend with tracing hooked up
pub fn soft_backend() -> SoftBackend {
    init_tracing();
    SoftBackend::new()
}

/// A sampler that differs from `sampler(m)` for every `m != n`
pub fn sampler(n: u32) -> SamplerState {
    SamplerState {
        lod_bias: StateFloat::new(n as f32),
        ..SamplerState::default()
    }
}
