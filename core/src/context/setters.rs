//! GL state setters
//!
//! Every setter validates first and records the first failure for
//! `get_error`. A rejected call leaves the state untouched. Accepted calls
//! mark their family dirty only when the effective state changed.

use glcompat_backend::{
    Backend, CullFaces, MAX_COLOR_ATTACHMENTS, MAX_TEXTURE_UNITS, MAX_VERTEX_ATTRIBS, Rect,
};

use super::Context;
use crate::commit::DirtyFlags;
use crate::error::{Result, StateError};
use crate::gl::{self, GLenum};
use crate::state::convert::{self, check};
use crate::state::{
    BlendAttachmentState, BlendState, DepthStencilState, InputLayoutState, RasterizerState,
    SamplerState, StateFloat, StencilFace, VertexConversion,
};

fn attachments_mut(blend: &mut BlendState, target: Option<usize>) -> &mut [BlendAttachmentState] {
    match target {
        Some(index) => std::slice::from_mut(&mut blend.attachments[index]),
        None => &mut blend.attachments[..],
    }
}

fn for_each_face(
    depth_stencil: &mut DepthStencilState,
    faces: CullFaces,
    mut apply: impl FnMut(&mut StencilFace),
) {
    if faces.contains(CullFaces::FRONT) {
        apply(&mut depth_stencil.front);
    }
    if faces.contains(CullFaces::BACK) {
        apply(&mut depth_stencil.back);
    }
}

/// Bitwise float comparison, so a repeated NaN is not a change
fn same_bits<const N: usize>(a: [f32; N], b: [f32; N]) -> bool {
    a.map(f32::to_bits) == b.map(f32::to_bits)
}

fn is_float_sampler_param(pname: GLenum) -> bool {
    matches!(
        pname,
        gl::TEXTURE_MIN_LOD
            | gl::TEXTURE_MAX_LOD
            | gl::TEXTURE_LOD_BIAS
            | gl::TEXTURE_MAX_ANISOTROPY
    )
}

impl<B: Backend> Context<B> {
    // ========================================================================
    // Plumbing
    // ========================================================================

    fn fail<T>(&mut self, err: StateError) -> Result<T> {
        self.record(Err(err))
    }

    fn mark(&mut self, flag: DirtyFlags, changed: bool) {
        if changed {
            self.dirty |= flag;
        }
    }

    fn update_blend(&mut self, mutate: impl FnOnce(&mut BlendState)) {
        let changed = self.state.blend.update(mutate);
        self.mark(DirtyFlags::BLEND_STATE, changed);
    }

    fn update_depth_stencil(&mut self, mutate: impl FnOnce(&mut DepthStencilState)) {
        let changed = self.state.depth_stencil.update(mutate);
        self.mark(DirtyFlags::DEPTH_STENCIL_STATE, changed);
    }

    fn update_rasterizer(&mut self, mutate: impl FnOnce(&mut RasterizerState)) {
        let changed = self.state.rasterizer.update(mutate);
        self.mark(DirtyFlags::RASTERIZER_STATE, changed);
    }

    fn update_input_layout(&mut self, mutate: impl FnOnce(&mut InputLayoutState)) {
        let changed = self.state.input_layout.update(mutate);
        self.mark(DirtyFlags::INPUT_LAYOUT, changed);
    }

    fn update_sampler(&mut self, unit: usize, mutate: impl FnOnce(&mut SamplerState)) {
        if self.state.samplers[unit].update(mutate) {
            self.dirty_samplers |= 1 << unit;
            self.dirty |= DirtyFlags::SAMPLERS;
        }
    }

    fn draw_buffer(&mut self, buf: Option<u32>) -> Result<Option<usize>> {
        match buf {
            None => Ok(None),
            Some(buf) if (buf as usize) < MAX_COLOR_ATTACHMENTS => Ok(Some(buf as usize)),
            Some(_) => self.fail(StateError::InvalidValue {
                what: "draw buffer",
            }),
        }
    }

    fn stencil_faces(&mut self, face: GLenum) -> Result<CullFaces> {
        match convert::cull_faces(face) {
            Some(faces) => Ok(faces),
            None => self.fail(StateError::InvalidEnum {
                what: "stencil face",
                value: face,
            }),
        }
    }

    fn texture_unit(&mut self, unit: u32) -> Result<usize> {
        if (unit as usize) < MAX_TEXTURE_UNITS {
            Ok(unit as usize)
        } else {
            self.fail(StateError::InvalidValue {
                what: "texture unit",
            })
        }
    }

    fn attrib_index(&mut self, index: u32) -> Result<usize> {
        if (index as usize) < MAX_VERTEX_ATTRIBS {
            Ok(index as usize)
        } else {
            self.fail(StateError::InvalidValue {
                what: "vertex attribute",
            })
        }
    }

    fn vertex_binding(&mut self, binding: u32) -> Result<usize> {
        if (binding as usize) < MAX_VERTEX_ATTRIBS {
            Ok(binding as usize)
        } else {
            self.fail(StateError::InvalidValue {
                what: "vertex binding",
            })
        }
    }

    // ========================================================================
    // Capabilities
    // ========================================================================

    pub fn enable(&mut self, cap: GLenum) -> Result<()> {
        self.set_capability(cap, true)
    }

    pub fn disable(&mut self, cap: GLenum) -> Result<()> {
        self.set_capability(cap, false)
    }

    /// Per draw buffer enable; only `BLEND` is indexed
    pub fn enable_i(&mut self, cap: GLenum, index: u32) -> Result<()> {
        self.set_capability_i(cap, index, true)
    }

    pub fn disable_i(&mut self, cap: GLenum, index: u32) -> Result<()> {
        self.set_capability_i(cap, index, false)
    }

    pub fn is_enabled(&mut self, cap: GLenum) -> Result<bool> {
        let blend = self.state.blend.get();
        let depth_stencil = self.state.depth_stencil.get();
        let rasterizer = self.state.rasterizer.get();
        let enabled = match cap {
            gl::BLEND => Some(blend.attachments[0].enable),
            gl::COLOR_LOGIC_OP => Some(blend.logic_enable),
            gl::DEPTH_TEST => Some(depth_stencil.depth_test_enable),
            gl::STENCIL_TEST => Some(depth_stencil.stencil_enable),
            gl::CULL_FACE => Some(rasterizer.cull_enable),
            gl::SCISSOR_TEST => Some(rasterizer.scissor_enable),
            gl::DEPTH_CLAMP => Some(rasterizer.depth_clamp_enable),
            gl::RASTERIZER_DISCARD => Some(rasterizer.rasterizer_discard_enable),
            gl::MULTISAMPLE => Some(rasterizer.multisample_enable),
            gl::POINT_SMOOTH => Some(rasterizer.point_smooth_enable),
            gl::LINE_SMOOTH => Some(rasterizer.line_smooth_enable),
            _ => None,
        };
        match enabled {
            Some(enabled) => Ok(enabled),
            None => self.fail(StateError::InvalidEnum {
                what: "capability",
                value: cap,
            }),
        }
    }

    fn set_capability(&mut self, cap: GLenum, on: bool) -> Result<()> {
        match cap {
            gl::BLEND => self.update_blend(|blend| {
                for attachment in &mut blend.attachments {
                    attachment.enable = on;
                }
            }),
            gl::COLOR_LOGIC_OP => self.update_blend(|blend| blend.logic_enable = on),
            gl::DEPTH_TEST => self.update_depth_stencil(|ds| ds.depth_test_enable = on),
            gl::STENCIL_TEST => self.update_depth_stencil(|ds| ds.stencil_enable = on),
            gl::CULL_FACE => self.update_rasterizer(|r| r.cull_enable = on),
            gl::SCISSOR_TEST => self.update_rasterizer(|r| r.scissor_enable = on),
            gl::DEPTH_CLAMP => self.update_rasterizer(|r| r.depth_clamp_enable = on),
            gl::RASTERIZER_DISCARD => self.update_rasterizer(|r| r.rasterizer_discard_enable = on),
            gl::MULTISAMPLE => self.update_rasterizer(|r| r.multisample_enable = on),
            gl::POINT_SMOOTH => self.update_rasterizer(|r| r.point_smooth_enable = on),
            gl::LINE_SMOOTH => self.update_rasterizer(|r| r.line_smooth_enable = on),
            _ => {
                return self.fail(StateError::InvalidEnum {
                    what: "capability",
                    value: cap,
                });
            }
        }
        Ok(())
    }

    fn set_capability_i(&mut self, cap: GLenum, index: u32, on: bool) -> Result<()> {
        if cap != gl::BLEND {
            return self.fail(StateError::InvalidEnum {
                what: "indexed capability",
                value: cap,
            });
        }
        let target = self.draw_buffer(Some(index))?;
        self.update_blend(|blend| {
            for attachment in attachments_mut(blend, target) {
                attachment.enable = on;
            }
        });
        Ok(())
    }

    // ========================================================================
    // Blending
    // ========================================================================

    pub fn blend_func(&mut self, src: GLenum, dst: GLenum) -> Result<()> {
        self.set_blend_func(None, [src, dst, src, dst])
    }

    pub fn blend_func_separate(
        &mut self,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) -> Result<()> {
        self.set_blend_func(None, [src_rgb, dst_rgb, src_alpha, dst_alpha])
    }

    pub fn blend_func_i(&mut self, buf: u32, src: GLenum, dst: GLenum) -> Result<()> {
        self.set_blend_func(Some(buf), [src, dst, src, dst])
    }

    pub fn blend_func_separate_i(
        &mut self,
        buf: u32,
        src_rgb: GLenum,
        dst_rgb: GLenum,
        src_alpha: GLenum,
        dst_alpha: GLenum,
    ) -> Result<()> {
        self.set_blend_func(Some(buf), [src_rgb, dst_rgb, src_alpha, dst_alpha])
    }

    fn set_blend_func(&mut self, buf: Option<u32>, factors: [GLenum; 4]) -> Result<()> {
        let target = self.draw_buffer(buf)?;
        for factor in factors {
            let checked = check("blend factor", factor, convert::blend_factor);
            self.record(checked)?;
        }
        let [src_rgb, dst_rgb, src_alpha, dst_alpha] = factors;
        self.update_blend(|blend| {
            for attachment in attachments_mut(blend, target) {
                attachment.src_rgb = src_rgb;
                attachment.dst_rgb = dst_rgb;
                attachment.src_alpha = src_alpha;
                attachment.dst_alpha = dst_alpha;
            }
        });
        Ok(())
    }

    pub fn blend_equation(&mut self, mode: GLenum) -> Result<()> {
        self.set_blend_equation(None, mode, mode)
    }

    pub fn blend_equation_separate(&mut self, mode_rgb: GLenum, mode_alpha: GLenum) -> Result<()> {
        self.set_blend_equation(None, mode_rgb, mode_alpha)
    }

    pub fn blend_equation_i(&mut self, buf: u32, mode: GLenum) -> Result<()> {
        self.set_blend_equation(Some(buf), mode, mode)
    }

    pub fn blend_equation_separate_i(
        &mut self,
        buf: u32,
        mode_rgb: GLenum,
        mode_alpha: GLenum,
    ) -> Result<()> {
        self.set_blend_equation(Some(buf), mode_rgb, mode_alpha)
    }

    fn set_blend_equation(
        &mut self,
        buf: Option<u32>,
        mode_rgb: GLenum,
        mode_alpha: GLenum,
    ) -> Result<()> {
        let target = self.draw_buffer(buf)?;
        for mode in [mode_rgb, mode_alpha] {
            let checked = check("blend equation", mode, convert::blend_equation);
            self.record(checked)?;
        }
        self.update_blend(|blend| {
            for attachment in attachments_mut(blend, target) {
                attachment.equation_rgb = mode_rgb;
                attachment.equation_alpha = mode_alpha;
            }
        });
        Ok(())
    }

    pub fn color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) -> Result<()> {
        self.set_color_mask(None, [red, green, blue, alpha])
    }

    pub fn color_mask_i(
        &mut self,
        buf: u32,
        red: bool,
        green: bool,
        blue: bool,
        alpha: bool,
    ) -> Result<()> {
        self.set_color_mask(Some(buf), [red, green, blue, alpha])
    }

    fn set_color_mask(&mut self, buf: Option<u32>, mask: [bool; 4]) -> Result<()> {
        let target = self.draw_buffer(buf)?;
        self.update_blend(|blend| {
            for attachment in attachments_mut(blend, target) {
                attachment.color_mask = mask;
            }
        });
        Ok(())
    }

    pub fn logic_op(&mut self, op: GLenum) -> Result<()> {
        let checked = check("logic op", op, convert::logic_op);
        self.record(checked)?;
        self.update_blend(|blend| blend.logic_op = op);
        Ok(())
    }

    pub fn blend_color(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        let color = [red, green, blue, alpha];
        if !same_bits(color, self.state.blend_color) {
            self.state.blend_color = color;
            self.dirty |= DirtyFlags::BLEND_COLOR;
        }
    }

    // ========================================================================
    // Depth and stencil
    // ========================================================================

    pub fn depth_func(&mut self, func: GLenum) -> Result<()> {
        let checked = check("depth func", func, convert::compare_op);
        self.record(checked)?;
        self.update_depth_stencil(|ds| ds.depth_compare = func);
        Ok(())
    }

    pub fn depth_mask(&mut self, write: bool) {
        self.update_depth_stencil(|ds| ds.depth_write_enable = write);
    }

    /// Depth range, clamped to [0, 1]
    pub fn depth_range(&mut self, near: f32, far: f32) {
        let near = near.clamp(0.0, 1.0);
        let far = far.clamp(0.0, 1.0);
        let viewport = &mut self.state.viewport;
        if !same_bits([viewport.min_depth, viewport.max_depth], [near, far]) {
            viewport.min_depth = near;
            viewport.max_depth = far;
            self.dirty |= DirtyFlags::VIEWPORT;
        }
    }

    pub fn stencil_func(&mut self, func: GLenum, reference: u32, mask: u32) -> Result<()> {
        self.stencil_func_separate(gl::FRONT_AND_BACK, func, reference, mask)
    }

    pub fn stencil_func_separate(
        &mut self,
        face: GLenum,
        func: GLenum,
        reference: u32,
        mask: u32,
    ) -> Result<()> {
        let faces = self.stencil_faces(face)?;
        let checked = check("stencil func", func, convert::compare_op);
        self.record(checked)?;

        self.update_depth_stencil(|ds| {
            for_each_face(ds, faces, |face| {
                face.compare_op = func;
                face.compare_mask = mask;
            })
        });

        let (mut front, mut back) = self.state.stencil_ref;
        if faces.contains(CullFaces::FRONT) {
            front = reference;
        }
        if faces.contains(CullFaces::BACK) {
            back = reference;
        }
        if (front, back) != self.state.stencil_ref {
            self.state.stencil_ref = (front, back);
            self.dirty |= DirtyFlags::STENCIL_REF;
        }
        Ok(())
    }

    pub fn stencil_op(&mut self, fail: GLenum, depth_fail: GLenum, pass: GLenum) -> Result<()> {
        self.stencil_op_separate(gl::FRONT_AND_BACK, fail, depth_fail, pass)
    }

    pub fn stencil_op_separate(
        &mut self,
        face: GLenum,
        fail: GLenum,
        depth_fail: GLenum,
        pass: GLenum,
    ) -> Result<()> {
        let faces = self.stencil_faces(face)?;
        for op in [fail, depth_fail, pass] {
            let checked = check("stencil op", op, convert::stencil_op);
            self.record(checked)?;
        }
        self.update_depth_stencil(|ds| {
            for_each_face(ds, faces, |face| {
                face.fail_op = fail;
                face.depth_fail_op = depth_fail;
                face.pass_op = pass;
            })
        });
        Ok(())
    }

    pub fn stencil_mask(&mut self, mask: u32) -> Result<()> {
        self.stencil_mask_separate(gl::FRONT_AND_BACK, mask)
    }

    pub fn stencil_mask_separate(&mut self, face: GLenum, mask: u32) -> Result<()> {
        let faces = self.stencil_faces(face)?;
        self.update_depth_stencil(|ds| for_each_face(ds, faces, |face| face.write_mask = mask));
        Ok(())
    }

    /// Stencil reference values (front, back)
    pub fn stencil_reference(&self) -> (u32, u32) {
        self.state.stencil_ref
    }

    // ========================================================================
    // Rasterizer
    // ========================================================================

    pub fn cull_face(&mut self, mode: GLenum) -> Result<()> {
        let checked = check("cull face", mode, convert::cull_faces);
        self.record(checked)?;
        self.update_rasterizer(|r| r.cull_face = mode);
        Ok(())
    }

    pub fn front_face(&mut self, mode: GLenum) -> Result<()> {
        let checked = check("front face", mode, convert::front_ccw);
        self.record(checked)?;
        self.update_rasterizer(|r| r.front_face = mode);
        Ok(())
    }

    pub fn polygon_mode(&mut self, face: GLenum, mode: GLenum) -> Result<()> {
        let Some(faces) = convert::cull_faces(face) else {
            return self.fail(StateError::InvalidEnum {
                what: "polygon face",
                value: face,
            });
        };
        let checked = check("polygon mode", mode, convert::fill_mode);
        self.record(checked)?;
        self.update_rasterizer(|r| {
            if faces.contains(CullFaces::FRONT) {
                r.fill_front = mode;
            }
            if faces.contains(CullFaces::BACK) {
                r.fill_back = mode;
            }
        });
        Ok(())
    }

    pub fn line_width(&mut self, width: f32) -> Result<()> {
        if width.is_nan() || width <= 0.0 {
            return self.fail(StateError::InvalidValue { what: "line width" });
        }
        self.update_rasterizer(|r| r.line_width = StateFloat::new(width));
        Ok(())
    }

    pub fn point_size(&mut self, size: f32) -> Result<()> {
        if size.is_nan() || size <= 0.0 {
            return self.fail(StateError::InvalidValue { what: "point size" });
        }
        self.update_rasterizer(|r| r.point_size = StateFloat::new(size));
        Ok(())
    }

    // ========================================================================
    // Viewport and scissor
    // ========================================================================

    pub fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        if width < 0 || height < 0 {
            return self.fail(StateError::InvalidValue {
                what: "viewport size",
            });
        }
        let (x, y, width, height) = (x as f32, y as f32, width as f32, height as f32);
        let viewport = &mut self.state.viewport;
        let current = [viewport.x, viewport.y, viewport.width, viewport.height];
        if !same_bits(current, [x, y, width, height]) {
            viewport.x = x;
            viewport.y = y;
            viewport.width = width;
            viewport.height = height;
            self.dirty |= DirtyFlags::VIEWPORT;
        }
        Ok(())
    }

    pub fn scissor(&mut self, x: i32, y: i32, width: i32, height: i32) -> Result<()> {
        if width < 0 || height < 0 {
            return self.fail(StateError::InvalidValue {
                what: "scissor size",
            });
        }
        let rect = Rect {
            x,
            y,
            width: width as u32,
            height: height as u32,
        };
        if rect != self.state.scissor {
            self.state.scissor = rect;
            self.dirty |= DirtyFlags::SCISSOR;
        }
        Ok(())
    }

    // ========================================================================
    // Samplers
    // ========================================================================

    pub fn sampler_parameter_i(&mut self, unit: u32, pname: GLenum, value: i32) -> Result<()> {
        if is_float_sampler_param(pname) {
            self.sampler_parameter_f(unit, pname, value as f32)
        } else {
            self.set_sampler_enum(unit, pname, value as GLenum)
        }
    }

    pub fn sampler_parameter_f(&mut self, unit: u32, pname: GLenum, value: f32) -> Result<()> {
        if !is_float_sampler_param(pname) {
            return self.set_sampler_enum(unit, pname, value as GLenum);
        }
        let unit = self.texture_unit(unit)?;
        if pname == gl::TEXTURE_MAX_ANISOTROPY && (value.is_nan() || value < 1.0) {
            return self.fail(StateError::InvalidValue {
                what: "max anisotropy",
            });
        }
        let value = StateFloat::new(value);
        self.update_sampler(unit, |sampler| match pname {
            gl::TEXTURE_MIN_LOD => sampler.min_lod = value,
            gl::TEXTURE_MAX_LOD => sampler.max_lod = value,
            gl::TEXTURE_LOD_BIAS => sampler.lod_bias = value,
            _ => sampler.max_anisotropy = value,
        });
        Ok(())
    }

    pub fn sampler_border_color(&mut self, unit: u32, color: [f32; 4]) -> Result<()> {
        let unit = self.texture_unit(unit)?;
        self.update_sampler(unit, |sampler| {
            sampler.border_color = color.map(StateFloat::new);
        });
        Ok(())
    }

    fn set_sampler_enum(&mut self, unit: u32, pname: GLenum, value: GLenum) -> Result<()> {
        let unit = self.texture_unit(unit)?;
        let checked = match pname {
            gl::TEXTURE_WRAP_S | gl::TEXTURE_WRAP_T | gl::TEXTURE_WRAP_R => {
                check("texture wrap", value, convert::wrap_mode)
            }
            gl::TEXTURE_MIN_FILTER => check("min filter", value, convert::min_filter),
            gl::TEXTURE_MAG_FILTER => check("mag filter", value, convert::mag_filter),
            gl::TEXTURE_COMPARE_MODE => check("compare mode", value, convert::compare_mode),
            gl::TEXTURE_COMPARE_FUNC => check("compare func", value, convert::compare_op),
            _ => Err(StateError::InvalidEnum {
                what: "sampler parameter",
                value: pname,
            }),
        };
        self.record(checked)?;
        self.update_sampler(unit, |sampler| {
            let field = match pname {
                gl::TEXTURE_WRAP_S => &mut sampler.wrap_s,
                gl::TEXTURE_WRAP_T => &mut sampler.wrap_t,
                gl::TEXTURE_WRAP_R => &mut sampler.wrap_r,
                gl::TEXTURE_MIN_FILTER => &mut sampler.min_filter,
                gl::TEXTURE_MAG_FILTER => &mut sampler.mag_filter,
                gl::TEXTURE_COMPARE_MODE => &mut sampler.compare_mode,
                _ => &mut sampler.compare_func,
            };
            *field = value;
        });
        Ok(())
    }

    // ========================================================================
    // Vertex input
    // ========================================================================

    pub fn enable_vertex_attrib(&mut self, index: u32) -> Result<()> {
        self.set_vertex_attrib_enabled(index, true)
    }

    pub fn disable_vertex_attrib(&mut self, index: u32) -> Result<()> {
        self.set_vertex_attrib_enabled(index, false)
    }

    fn set_vertex_attrib_enabled(&mut self, index: u32, enable: bool) -> Result<()> {
        let index = self.attrib_index(index)?;
        self.update_input_layout(|layout| layout.attribs[index].enable = enable);
        Ok(())
    }

    /// Float attribute format; `normalized` picks normalization over scaling
    pub fn vertex_attrib_format(
        &mut self,
        index: u32,
        size: u32,
        ty: GLenum,
        normalized: bool,
        relative_offset: u32,
    ) -> Result<()> {
        let conversion = if normalized {
            VertexConversion::Norm
        } else {
            VertexConversion::Scaled
        };
        self.set_vertex_attrib_format(index, size, ty, conversion, relative_offset)
    }

    /// Integer attribute format
    pub fn vertex_attrib_i_format(
        &mut self,
        index: u32,
        size: u32,
        ty: GLenum,
        relative_offset: u32,
    ) -> Result<()> {
        self.set_vertex_attrib_format(index, size, ty, VertexConversion::Int, relative_offset)
    }

    fn set_vertex_attrib_format(
        &mut self,
        index: u32,
        size: u32,
        ty: GLenum,
        conversion: VertexConversion,
        relative_offset: u32,
    ) -> Result<()> {
        let index = self.attrib_index(index)?;
        let checked = convert::attrib_format(size, ty, conversion).map(|_| ());
        self.record(checked)?;
        self.update_input_layout(|layout| {
            let attrib = &mut layout.attribs[index];
            attrib.size = size;
            attrib.ty = ty;
            attrib.conversion = conversion;
            attrib.offset = relative_offset;
        });
        Ok(())
    }

    pub fn vertex_attrib_binding(&mut self, index: u32, binding: u32) -> Result<()> {
        let index = self.attrib_index(index)?;
        let slot = self.vertex_binding(binding)?;
        let divisor = self.state.binding_divisors[slot];
        self.update_input_layout(|layout| {
            let attrib = &mut layout.attribs[index];
            attrib.binding = binding;
            attrib.divisor = divisor;
        });
        Ok(())
    }

    /// Instancing divisor of a vertex buffer binding
    pub fn vertex_binding_divisor(&mut self, binding: u32, divisor: u32) -> Result<()> {
        let slot = self.vertex_binding(binding)?;
        self.state.binding_divisors[slot] = divisor;
        self.update_input_layout(|layout| {
            for attrib in layout.attribs.iter_mut().filter(|a| a.binding == binding) {
                attrib.divisor = divisor;
            }
        });
        Ok(())
    }
}
