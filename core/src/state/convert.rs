//! GL enumerator to backend enumerator translation
//!
//! Every table returns `None` for values it does not know. Setters use that
//! to reject bad arguments with `INVALID_ENUM`; by the time a descriptor is
//! translated for the backend the value has been validated, so [`resolve`]
//! treats `None` as a bug.

use glcompat_backend::{
    BlendEquation, BlendFactor, CompareOp, CullFaces, FillMode, FilterMode, Format, LogicOp,
    StencilOp, WrapMode,
};

use crate::error::{Result, StateError};
use crate::gl::{self, GLenum};
use crate::state::VertexConversion;

/// Translate an already validated enumerator.
///
/// # Panics
///
/// Panics if `value` is not in the table: a setter let it through unchecked.
pub fn resolve<T>(what: &str, value: GLenum, table: fn(GLenum) -> Option<T>) -> T {
    table(value).unwrap_or_else(|| panic!("unrecognized {what} 0x{value:04X} reached translation"))
}

/// Validate an enumerator for a setter
pub fn check<T>(what: &'static str, value: GLenum, table: fn(GLenum) -> Option<T>) -> Result<()> {
    match table(value) {
        Some(_) => Ok(()),
        None => Err(StateError::InvalidEnum { what, value }),
    }
}

pub fn blend_factor(value: GLenum) -> Option<BlendFactor> {
    Some(match value {
        gl::ZERO => BlendFactor::Zero,
        gl::ONE => BlendFactor::One,
        gl::SRC_COLOR => BlendFactor::SrcColor,
        gl::ONE_MINUS_SRC_COLOR => BlendFactor::OneMinusSrcColor,
        gl::DST_COLOR => BlendFactor::DstColor,
        gl::ONE_MINUS_DST_COLOR => BlendFactor::OneMinusDstColor,
        gl::SRC_ALPHA => BlendFactor::SrcAlpha,
        gl::ONE_MINUS_SRC_ALPHA => BlendFactor::OneMinusSrcAlpha,
        gl::DST_ALPHA => BlendFactor::DstAlpha,
        gl::ONE_MINUS_DST_ALPHA => BlendFactor::OneMinusDstAlpha,
        gl::CONSTANT_COLOR => BlendFactor::ConstantColor,
        gl::ONE_MINUS_CONSTANT_COLOR => BlendFactor::OneMinusConstantColor,
        gl::CONSTANT_ALPHA => BlendFactor::ConstantAlpha,
        gl::ONE_MINUS_CONSTANT_ALPHA => BlendFactor::OneMinusConstantAlpha,
        gl::SRC_ALPHA_SATURATE => BlendFactor::SrcAlphaSaturate,
        gl::SRC1_COLOR => BlendFactor::Src1Color,
        gl::ONE_MINUS_SRC1_COLOR => BlendFactor::OneMinusSrc1Color,
        gl::SRC1_ALPHA => BlendFactor::Src1Alpha,
        gl::ONE_MINUS_SRC1_ALPHA => BlendFactor::OneMinusSrc1Alpha,
        _ => return None,
    })
}

pub fn blend_equation(value: GLenum) -> Option<BlendEquation> {
    Some(match value {
        gl::FUNC_ADD => BlendEquation::Add,
        gl::FUNC_SUBTRACT => BlendEquation::Subtract,
        gl::FUNC_REVERSE_SUBTRACT => BlendEquation::ReverseSubtract,
        gl::MIN => BlendEquation::Min,
        gl::MAX => BlendEquation::Max,
        _ => return None,
    })
}

pub fn logic_op(value: GLenum) -> Option<LogicOp> {
    Some(match value {
        gl::CLEAR => LogicOp::Clear,
        gl::AND => LogicOp::And,
        gl::AND_REVERSE => LogicOp::AndReverse,
        gl::COPY => LogicOp::Copy,
        gl::AND_INVERTED => LogicOp::AndInverted,
        gl::NOOP => LogicOp::Noop,
        gl::XOR => LogicOp::Xor,
        gl::OR => LogicOp::Or,
        gl::NOR => LogicOp::Nor,
        gl::EQUIV => LogicOp::Equiv,
        gl::INVERT => LogicOp::Invert,
        gl::OR_REVERSE => LogicOp::OrReverse,
        gl::COPY_INVERTED => LogicOp::CopyInverted,
        gl::OR_INVERTED => LogicOp::OrInverted,
        gl::NAND => LogicOp::Nand,
        gl::SET => LogicOp::Set,
        _ => return None,
    })
}

pub fn compare_op(value: GLenum) -> Option<CompareOp> {
    Some(match value {
        gl::NEVER => CompareOp::Never,
        gl::LESS => CompareOp::Less,
        gl::EQUAL => CompareOp::Equal,
        gl::LEQUAL => CompareOp::LessOrEqual,
        gl::GREATER => CompareOp::Greater,
        gl::NOTEQUAL => CompareOp::NotEqual,
        gl::GEQUAL => CompareOp::GreaterOrEqual,
        gl::ALWAYS => CompareOp::Always,
        _ => return None,
    })
}

pub fn stencil_op(value: GLenum) -> Option<StencilOp> {
    Some(match value {
        gl::KEEP => StencilOp::Keep,
        gl::ZERO => StencilOp::Zero,
        gl::REPLACE => StencilOp::Replace,
        gl::INCR => StencilOp::IncrementClamp,
        gl::INCR_WRAP => StencilOp::IncrementWrap,
        gl::DECR => StencilOp::DecrementClamp,
        gl::DECR_WRAP => StencilOp::DecrementWrap,
        gl::INVERT => StencilOp::Invert,
        _ => return None,
    })
}

/// Face selector accepted by `cull_face`
pub fn cull_faces(value: GLenum) -> Option<CullFaces> {
    Some(match value {
        gl::FRONT => CullFaces::FRONT,
        gl::BACK => CullFaces::BACK,
        gl::FRONT_AND_BACK => CullFaces::all(),
        _ => return None,
    })
}

/// Winding accepted by `front_face`; `Some(true)` for counter-clockwise
pub fn front_ccw(value: GLenum) -> Option<bool> {
    match value {
        gl::CCW => Some(true),
        gl::CW => Some(false),
        _ => None,
    }
}

pub fn fill_mode(value: GLenum) -> Option<FillMode> {
    Some(match value {
        gl::POINT => FillMode::Point,
        gl::LINE => FillMode::Line,
        gl::FILL => FillMode::Solid,
        _ => return None,
    })
}

pub fn wrap_mode(value: GLenum) -> Option<WrapMode> {
    Some(match value {
        gl::REPEAT => WrapMode::Repeat,
        gl::MIRRORED_REPEAT => WrapMode::MirroredRepeat,
        gl::CLAMP_TO_EDGE => WrapMode::ClampToEdge,
        gl::CLAMP_TO_BORDER => WrapMode::ClampToBorder,
        gl::MIRROR_CLAMP_TO_EDGE => WrapMode::MirrorClampToEdge,
        _ => return None,
    })
}

/// Minification filter, split into (texel filter, mip filter)
pub fn min_filter(value: GLenum) -> Option<(FilterMode, FilterMode)> {
    use FilterMode::{Cubic, Linear, Nearest, None as NoMip};

    Some(match value {
        gl::NEAREST => (Nearest, NoMip),
        gl::LINEAR => (Linear, NoMip),
        gl::NEAREST_MIPMAP_NEAREST => (Nearest, Nearest),
        gl::LINEAR_MIPMAP_NEAREST => (Linear, Nearest),
        gl::NEAREST_MIPMAP_LINEAR => (Nearest, Linear),
        gl::LINEAR_MIPMAP_LINEAR => (Linear, Linear),
        gl::CUBIC_IMG => (Cubic, NoMip),
        gl::CUBIC_MIPMAP_NEAREST_IMG => (Cubic, Nearest),
        gl::CUBIC_MIPMAP_LINEAR_IMG => (Cubic, Linear),
        _ => return None,
    })
}

pub fn mag_filter(value: GLenum) -> Option<FilterMode> {
    Some(match value {
        gl::NEAREST => FilterMode::Nearest,
        gl::LINEAR => FilterMode::Linear,
        gl::CUBIC_IMG => FilterMode::Cubic,
        _ => return None,
    })
}

/// Compare mode; `Some(true)` when depth comparison is enabled
pub fn compare_mode(value: GLenum) -> Option<bool> {
    match value {
        gl::NONE => Some(false),
        gl::COMPARE_REF_TO_TEXTURE => Some(true),
        _ => None,
    }
}

/// Resolve a vertex attribute `(size, type, conversion)` to a fetch format.
///
/// `size` is 1..=4 or [`gl::BGRA`]. BGRA ordering only exists for byte
/// components. Integer fetch requires 32-bit integer types to use
/// [`VertexConversion::Int`]; floating-point types reject it.
pub fn attrib_format(size: u32, ty: GLenum, conversion: VertexConversion) -> Result<Format> {
    use Format::*;
    use VertexConversion::{Int, Norm, Scaled};

    // Column 4 is BGRA
    let column = match size {
        1..=4 => (size - 1) as usize,
        gl::BGRA => 4,
        _ => return Err(StateError::InvalidValue { what: "attribute size" }),
    };
    let bad_size = Err(StateError::InvalidValue { what: "attribute size" });
    let bad_conversion = Err(StateError::InvalidEnum {
        what: "attribute type",
        value: ty,
    });

    let row: &[Format] = match (ty, conversion) {
        (gl::BYTE, Int) => &[R8Sint, Rg8Sint, Rgb8Sint, Rgba8Sint, Bgra8Sint],
        (gl::BYTE, Scaled) => &[R8Sscaled, Rg8Sscaled, Rgb8Sscaled, Rgba8Sscaled, Bgra8Sscaled],
        (gl::BYTE, Norm) => &[R8Snorm, Rg8Snorm, Rgb8Snorm, Rgba8Snorm, Bgra8Snorm],
        (gl::UNSIGNED_BYTE, Int) => &[R8Uint, Rg8Uint, Rgb8Uint, Rgba8Uint, Bgra8Uint],
        (gl::UNSIGNED_BYTE, Scaled) => {
            &[R8Uscaled, Rg8Uscaled, Rgb8Uscaled, Rgba8Uscaled, Bgra8Uscaled]
        }
        (gl::UNSIGNED_BYTE, Norm) => &[R8Unorm, Rg8Unorm, Rgb8Unorm, Rgba8Unorm, Bgra8Unorm],
        (gl::SHORT, Int) => &[R16Sint, Rg16Sint, Rgb16Sint, Rgba16Sint],
        (gl::SHORT, Scaled) => &[R16Sscaled, Rg16Sscaled, Rgb16Sscaled, Rgba16Sscaled],
        (gl::SHORT, Norm) => &[R16Snorm, Rg16Snorm, Rgb16Snorm, Rgba16Snorm],
        (gl::UNSIGNED_SHORT, Int) => &[R16Uint, Rg16Uint, Rgb16Uint, Rgba16Uint],
        (gl::UNSIGNED_SHORT, Scaled) => &[R16Uscaled, Rg16Uscaled, Rgb16Uscaled, Rgba16Uscaled],
        (gl::UNSIGNED_SHORT, Norm) => &[R16Unorm, Rg16Unorm, Rgb16Unorm, Rgba16Unorm],
        (gl::INT, Int) => &[R32Sint, Rg32Sint, Rgb32Sint, Rgba32Sint],
        (gl::UNSIGNED_INT, Int) => &[R32Uint, Rg32Uint, Rgb32Uint, Rgba32Uint],
        (gl::INT | gl::UNSIGNED_INT, _) => return bad_conversion,
        (gl::HALF_FLOAT, Scaled | Norm) => &[R16Sfloat, Rg16Sfloat, Rgb16Sfloat, Rgba16Sfloat],
        (gl::FLOAT, Scaled | Norm) => &[R32Sfloat, Rg32Sfloat, Rgb32Sfloat, Rgba32Sfloat],
        (gl::DOUBLE, Scaled | Norm) => &[R64Sfloat, Rg64Sfloat, Rgb64Sfloat, Rgba64Sfloat],
        (gl::HALF_FLOAT | gl::FLOAT | gl::DOUBLE, Int) => return bad_conversion,
        (gl::UNSIGNED_INT_24_8, _) => {
            if size != 1 {
                return bad_size;
            }
            return Ok(D24UnormS8Uint);
        }
        _ => {
            return Err(StateError::InvalidEnum {
                what: "attribute type",
                value: ty,
            });
        }
    };

    match row.get(column) {
        Some(format) => Ok(*format),
        None => bad_size,
    }
}
