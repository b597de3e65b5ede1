use glcompat_backend::{ObjectKind, Rect, SoftBackend};

use super::*;
use crate::test_utils::soft_backend;

fn committed(backend: &mut SoftBackend) -> Context<&mut SoftBackend> {
    let mut ctx = Context::with_defaults(backend);
    ctx.prepare_draw().unwrap();
    ctx
}

#[test]
fn test_first_draw_binds_every_family() {
    let mut backend = soft_backend();
    let ctx = committed(&mut backend);

    assert!(ctx.dirty().is_empty());
    assert_eq!(ctx.dirty_sampler_units(), 0);
    for family in StateFamily::ALL {
        assert!(ctx.bound_raw(family).is_some(), "{family} not bound");
    }

    // All units share the one default sampler
    let bindings = ctx.backend().bindings();
    assert!(bindings.samplers.iter().all(|s| *s == bindings.samplers[0]));
    assert_eq!(ctx.backend().live_objects(), 5);
    assert_eq!(ctx.caches().sampler.len(), 1);
}

#[test]
fn test_dont_care_write_is_not_dirty() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);
    let before = ctx.backend().stats();

    ctx.cull_face(gl::FRONT).unwrap();
    assert!(ctx.dirty().is_empty());
    ctx.prepare_draw().unwrap();
    assert_eq!(ctx.backend().stats(), before);

    // Takes effect once culling is enabled
    ctx.enable(gl::CULL_FACE).unwrap();
    assert_eq!(ctx.dirty(), DirtyFlags::RASTERIZER_STATE);
    ctx.prepare_draw().unwrap();
    assert_eq!(ctx.rasterizer_state().cull_face, gl::FRONT);
}

#[test]
fn test_allocation_failure_keeps_previous_binding() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);
    let previous = ctx.bound_raw(StateFamily::DepthStencil);

    ctx.enable(gl::DEPTH_TEST).unwrap();
    ctx.backend_mut().fail_next_allocations(1);
    let err = ctx.prepare_draw().unwrap_err();

    assert_eq!(
        err,
        StateError::OutOfMemory {
            what: "depth-stencil state"
        }
    );
    assert_eq!(ctx.bound_raw(StateFamily::DepthStencil), previous);
    assert!(ctx.dirty().contains(DirtyFlags::DEPTH_STENCIL_STATE));
    assert_eq!(ctx.get_error(), gl::OUT_OF_MEMORY);
    assert_eq!(ctx.get_error(), gl::NO_ERROR);

    ctx.prepare_draw().unwrap();
    assert!(ctx.dirty().is_empty());
    assert_ne!(ctx.bound_raw(StateFamily::DepthStencil), previous);
    assert_eq!(ctx.caches().depth_stencil.stats().allocation_failures, 1);
}

#[test]
fn test_failure_stops_later_families() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.enable(gl::BLEND).unwrap();
    ctx.scissor(1, 2, 3, 4).unwrap();
    ctx.backend_mut().fail_next_binds(1);
    let err = ctx.prepare_draw().unwrap_err();

    assert_eq!(err, StateError::InvalidOperation { what: "blend state" });
    assert_eq!(ctx.dirty(), DirtyFlags::BLEND_STATE | DirtyFlags::SCISSOR);
    assert_eq!(ctx.backend().bindings().scissor, Rect::default());
    // The rejected object is cached as spare, not leaked
    assert_eq!(ctx.caches().blend.spare_len(), 1);

    ctx.prepare_draw().unwrap();
    assert_eq!(ctx.caches().blend.spare_len(), 1);
    assert_eq!(ctx.caches().blend.stats().hits, 1);
    assert_eq!(
        ctx.backend().bindings().scissor,
        Rect {
            x: 1,
            y: 2,
            width: 3,
            height: 4
        }
    );
}

#[test]
fn test_sampler_units_commit_independently() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);
    let default_sampler = ctx.bound_sampler_raw(0);

    ctx.sampler_parameter_i(3, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32)
        .unwrap();
    assert_eq!(ctx.dirty(), DirtyFlags::SAMPLERS);
    assert_eq!(ctx.dirty_sampler_units(), 1 << 3);

    ctx.prepare_draw().unwrap();
    assert_eq!(ctx.dirty_sampler_units(), 0);
    assert_eq!(ctx.bound_sampler_raw(0), default_sampler);
    assert_ne!(ctx.bound_sampler_raw(3), default_sampler);
    assert_eq!(ctx.caches().sampler.len(), 2);
    assert_eq!(ctx.bound_sampler_raw(16), None);
}

#[test]
fn test_sampler_parameter_validation() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    let err = ctx
        .sampler_parameter_i(16, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32)
        .unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_VALUE);
    assert_eq!(ctx.get_error(), gl::INVALID_VALUE);

    let err = ctx.sampler_parameter_i(0, gl::TEXTURE_WRAP_S, 0x1234).unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_ENUM);

    let err = ctx
        .sampler_parameter_f(0, gl::TEXTURE_MAX_ANISOTROPY, 0.5)
        .unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_VALUE);

    let err = ctx.sampler_parameter_i(0, gl::FLOAT, 0).unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_ENUM);

    assert!(ctx.dirty().is_empty());

    ctx.sampler_parameter_f(1, gl::TEXTURE_MAX_ANISOTROPY, 8.0)
        .unwrap();
    ctx.sampler_parameter_i(1, gl::TEXTURE_MAX_LOD, 4).unwrap();
    let sampler = ctx.sampler_state(1).unwrap();
    assert_eq!(sampler.max_anisotropy.get(), 8.0);
    assert_eq!(sampler.max_lod.get(), 4.0);
    assert_eq!(ctx.dirty_sampler_units(), 1 << 1);
}

#[test]
fn test_invalid_enum_leaves_state_clean() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    let err = ctx.depth_func(0x1234).unwrap_err();
    assert_eq!(
        err,
        StateError::InvalidEnum {
            what: "depth func",
            value: 0x1234
        }
    );
    assert!(ctx.dirty().is_empty());
    assert_eq!(ctx.depth_stencil_state().depth_compare, gl::LESS);

    assert_eq!(ctx.enable(0xDEAD).unwrap_err().gl_code(), gl::INVALID_ENUM);
    assert_eq!(
        ctx.blend_func(gl::SRC_ALPHA, 0x1234).unwrap_err().gl_code(),
        gl::INVALID_ENUM
    );
    assert_eq!(ctx.blend_state().attachments[0].src_rgb, gl::ONE);
}

#[test]
fn test_first_error_is_sticky() {
    let mut backend = soft_backend();
    let mut ctx = Context::with_defaults(&mut backend);

    ctx.depth_func(0x1234).unwrap_err();
    ctx.line_width(0.0).unwrap_err();
    ctx.viewport(0, 0, -1, 10).unwrap_err();

    assert!(matches!(
        ctx.pending_error(),
        Some(StateError::InvalidEnum { .. })
    ));
    assert_eq!(ctx.get_error(), gl::INVALID_ENUM);
    assert_eq!(ctx.get_error(), gl::NO_ERROR);
}

#[test]
fn test_drop_destroys_every_object() {
    let mut backend = soft_backend();
    {
        let mut ctx = committed(&mut backend);
        ctx.enable(gl::BLEND).unwrap();
        ctx.prepare_draw().unwrap();
        ctx.disable(gl::BLEND).unwrap();
        ctx.prepare_draw().unwrap();
        assert!(ctx.caches().blend.spare_len() > 0);
    }
    let stats = backend.stats();
    assert_eq!(backend.live_objects(), 0);
    assert_eq!(stats.created, stats.destroyed);
}

#[test]
fn test_prepare_clear_commits_subset() {
    let mut backend = soft_backend();
    let mut ctx = Context::with_defaults(&mut backend);

    ctx.prepare_clear().unwrap();
    assert_eq!(ctx.dirty(), DirtyFlags::DRAW.difference(DirtyFlags::CLEAR));
    assert!(ctx.bound_raw(StateFamily::Blend).is_some());
    assert!(ctx.bound_raw(StateFamily::InputLayout).is_none());
    assert!(ctx.bound_sampler_raw(0).is_none());
}

#[test]
fn test_flip_flop_reuses_objects() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    for _ in 0..4 {
        ctx.enable(gl::BLEND).unwrap();
        ctx.blend_func(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA).unwrap();
        ctx.prepare_draw().unwrap();
        ctx.disable(gl::BLEND).unwrap();
        ctx.prepare_draw().unwrap();
    }

    assert_eq!(ctx.backend().live_objects_of(ObjectKind::BlendState), 2);
    let stats = ctx.caches().stats_of(StateFamily::Blend);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 7);
}

#[test]
fn test_set_spare_limit_trims_family() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    for bias in 1..=5 {
        ctx.sampler_parameter_f(0, gl::TEXTURE_LOD_BIAS, bias as f32)
            .unwrap();
        ctx.prepare_draw().unwrap();
    }
    // Default (units 1..16), bias 5 (unit 0), biases 1..=4 spare
    assert_eq!(ctx.caches().sampler.spare_len(), 4);
    assert_eq!(ctx.backend().live_objects_of(ObjectKind::Sampler), 6);

    ctx.set_spare_limit(StateFamily::Sampler, 0);
    assert_eq!(ctx.caches().sampler.spare_len(), 0);
    assert_eq!(ctx.backend().live_objects_of(ObjectKind::Sampler), 2);
    assert_eq!(ctx.caches().len_of(StateFamily::Sampler), 2);
}

#[test]
fn test_dynamic_state_reaches_backend() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.viewport(10, 20, 640, 480).unwrap();
    ctx.depth_range(0.25, 2.0);
    ctx.scissor(0, 0, 320, 240).unwrap();
    ctx.blend_color(0.5, 0.25, 0.0, 1.0);
    ctx.stencil_func_separate(gl::BACK, gl::ALWAYS, 7, 0xFF)
        .unwrap();

    // Stencil state is don't-care until the test is on
    assert_eq!(
        ctx.dirty(),
        DirtyFlags::VIEWPORT
            | DirtyFlags::SCISSOR
            | DirtyFlags::BLEND_COLOR
            | DirtyFlags::STENCIL_REF
    );
    ctx.prepare_draw().unwrap();

    let bindings = ctx.backend().bindings();
    assert_eq!(bindings.viewport.width, 640.0);
    assert_eq!(bindings.viewport.y, 20.0);
    assert_eq!(bindings.viewport.min_depth, 0.25);
    assert_eq!(bindings.viewport.max_depth, 1.0);
    assert_eq!(bindings.scissor.width, 320);
    assert_eq!(bindings.blend_color, [0.5, 0.25, 0.0, 1.0]);
    assert_eq!(bindings.stencil_ref, (0, 7));
    assert_eq!(ctx.stencil_reference(), (0, 7));
}

#[test]
fn test_stencil_setters_respect_faces() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.enable(gl::STENCIL_TEST).unwrap();
    ctx.stencil_op_separate(gl::FRONT, gl::KEEP, gl::KEEP, gl::REPLACE)
        .unwrap();
    ctx.stencil_mask_separate(gl::BACK, 0x0F).unwrap();

    let ds = ctx.depth_stencil_state();
    assert_eq!(ds.front.pass_op, gl::REPLACE);
    assert_eq!(ds.back.pass_op, gl::KEEP);
    assert_eq!(ds.back.write_mask, 0x0F);
    assert_eq!(ds.front.write_mask, u32::MAX);

    let err = ctx.stencil_mask_separate(gl::CW, 0).unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_ENUM);
}

#[test]
fn test_indexed_blend_targets_one_attachment() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.enable_i(gl::BLEND, 2).unwrap();
    ctx.blend_func_i(2, gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA)
        .unwrap();
    ctx.color_mask_i(1, true, false, true, false).unwrap();

    let blend = ctx.blend_state();
    assert!(blend.attachments[2].enable);
    assert!(!blend.attachments[0].enable);
    assert_eq!(blend.attachments[2].src_rgb, gl::SRC_ALPHA);
    assert_eq!(blend.attachments[1].color_mask, [true, false, true, false]);
    assert!(!ctx.is_enabled(gl::BLEND).unwrap());

    let err = ctx.blend_func_i(8, gl::ONE, gl::ONE).unwrap_err();
    assert_eq!(err, StateError::InvalidValue { what: "draw buffer" });
    let err = ctx.enable_i(gl::DEPTH_TEST, 0).unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_ENUM);
}

#[test]
fn test_vertex_binding_divisor_follows_attributes() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    // Disabled attributes are don't-care
    ctx.vertex_binding_divisor(2, 1).unwrap();
    ctx.vertex_attrib_binding(0, 2).unwrap();
    assert!(ctx.dirty().is_empty());
    assert_eq!(ctx.input_layout_state().attribs[0].divisor, 1);

    ctx.enable_vertex_attrib(0).unwrap();
    ctx.vertex_attrib_format(0, 4, gl::UNSIGNED_BYTE, true, 12)
        .unwrap();
    assert_eq!(ctx.dirty(), DirtyFlags::INPUT_LAYOUT);

    ctx.vertex_binding_divisor(2, 3).unwrap();
    assert_eq!(ctx.input_layout_state().attribs[0].divisor, 3);
    ctx.prepare_draw().unwrap();

    let err = ctx
        .vertex_attrib_i_format(0, 4, gl::FLOAT, 0)
        .unwrap_err();
    assert_eq!(err.gl_code(), gl::INVALID_ENUM);
    assert_eq!(
        ctx.enable_vertex_attrib(16).unwrap_err().gl_code(),
        gl::INVALID_VALUE
    );
    assert!(ctx.dirty().is_empty());
}

#[test]
fn test_unbind_all_rebuilds_on_next_draw() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.unbind_all();
    assert_eq!(ctx.backend().live_objects(), 0);
    assert_eq!(ctx.dirty(), DirtyFlags::all());
    assert!(ctx.bound_raw(StateFamily::Rasterizer).is_none());

    ctx.prepare_draw().unwrap();
    assert_eq!(ctx.backend().live_objects(), 5);
}

#[test]
fn test_repeated_dynamic_state_is_not_dirty() {
    let mut backend = soft_backend();
    let mut ctx = committed(&mut backend);

    ctx.blend_color(f32::NAN, 0.5, 0.0, 1.0);
    ctx.scissor(4, 4, 64, 64).unwrap();
    ctx.viewport(0, 0, 800, 600).unwrap();
    ctx.prepare_draw().unwrap();
    assert!(ctx.dirty().is_empty());

    ctx.blend_color(f32::NAN, 0.5, 0.0, 1.0);
    ctx.scissor(4, 4, 64, 64).unwrap();
    ctx.viewport(0, 0, 800, 600).unwrap();
    ctx.depth_range(0.0, 1.0);
    assert!(ctx.dirty().is_empty());

    assert_eq!(ctx.current_blend_color()[1], 0.5);
    assert!(ctx.current_blend_color()[0].is_nan());
    assert_eq!(ctx.current_viewport().width, 800.0);
    assert_eq!(ctx.current_scissor().height, 64);

    // Sign of zero is a change
    ctx.blend_color(f32::NAN, 0.5, -0.0, 1.0);
    assert_eq!(ctx.dirty(), DirtyFlags::BLEND_COLOR);
}
