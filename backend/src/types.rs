//! Backend enumerators and create-info descriptors
//!
//! Everything a backend needs to build one immutable state object. Values
//! here are already resolved: no API enumerators, no don't-care fields.

/// Maximum number of color attachments a blend state describes
pub const MAX_COLOR_ATTACHMENTS: usize = 8;

/// Maximum number of vertex attributes an input layout describes
pub const MAX_VERTEX_ATTRIBS: usize = 16;

/// Number of texture units that can each hold a sampler
pub const MAX_TEXTURE_UNITS: usize = 16;

// ============================================================================
// Blend
// ============================================================================

/// Source/destination blend factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
    Src1Color,
    OneMinusSrc1Color,
    Src1Alpha,
    OneMinusSrc1Alpha,
}

/// Blend equation combining the weighted source and destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendEquation {
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

bitflags::bitflags! {
    /// Color channels written by a color attachment
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ColorMask: u8 {
        const R = 0b0001;
        const G = 0b0010;
        const B = 0b0100;
        const A = 0b1000;
    }
}

/// Framebuffer logic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOp {
    Clear,
    And,
    AndReverse,
    Copy,
    AndInverted,
    Noop,
    Xor,
    Or,
    Nor,
    Equiv,
    Invert,
    OrReverse,
    CopyInverted,
    OrInverted,
    Nand,
    Set,
}

/// Blending setup of a single color attachment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendAttachment {
    pub enable: bool,
    pub rgb_src: BlendFactor,
    pub rgb_dst: BlendFactor,
    pub rgb_equation: BlendEquation,
    pub alpha_src: BlendFactor,
    pub alpha_dst: BlendFactor,
    pub alpha_equation: BlendEquation,
    pub color_mask: ColorMask,
}

impl Default for BlendAttachment {
    fn default() -> Self {
        Self {
            enable: false,
            rgb_src: BlendFactor::One,
            rgb_dst: BlendFactor::Zero,
            rgb_equation: BlendEquation::Add,
            alpha_src: BlendFactor::One,
            alpha_dst: BlendFactor::Zero,
            alpha_equation: BlendEquation::Add,
            color_mask: ColorMask::all(),
        }
    }
}

/// Create-info for a blend state object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlendStateCreateInfo {
    pub logic_enable: bool,
    pub logic_op: LogicOp,
    pub attachments: [BlendAttachment; MAX_COLOR_ATTACHMENTS],
}

// ============================================================================
// Depth / stencil
// ============================================================================

/// Comparison function for depth, stencil and shadow sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Never,
    Less,
    LessOrEqual,
    Equal,
    GreaterOrEqual,
    Greater,
    NotEqual,
    Always,
}

/// Action applied to a stencil value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementClamp,
    IncrementWrap,
    DecrementClamp,
    DecrementWrap,
    Invert,
}

/// Stencil configuration of one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFaceInfo {
    pub fail_op: StencilOp,
    pub pass_op: StencilOp,
    pub depth_fail_op: StencilOp,
    pub compare_op: CompareOp,
    pub compare_mask: u32,
    pub write_mask: u32,
}

/// Create-info for a depth-stencil state object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilStateCreateInfo {
    pub depth_test_enable: bool,
    pub depth_write_enable: bool,
    pub depth_compare: CompareOp,
    pub stencil_enable: bool,
    pub front: StencilFaceInfo,
    pub back: StencilFaceInfo,
}

// ============================================================================
// Rasterizer
// ============================================================================

bitflags::bitflags! {
    /// Faces discarded by culling; empty means culling is off
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CullFaces: u8 {
        const FRONT = 0b01;
        const BACK = 0b10;
    }
}

/// Polygon fill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    Point,
    Line,
    Solid,
}

/// Create-info for a rasterizer state object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterizerStateCreateInfo {
    pub point_size: f32,
    pub line_width: f32,
    pub point_smooth_enable: bool,
    pub line_smooth_enable: bool,
    pub scissor_enable: bool,
    pub depth_clamp_enable: bool,
    pub rasterizer_discard_enable: bool,
    pub multisample_enable: bool,
    pub front_ccw: bool,
    pub cull_faces: CullFaces,
    pub fill_front: FillMode,
    pub fill_back: FillMode,
}

// ============================================================================
// Sampler
// ============================================================================

/// Texture coordinate wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
    MirrorClampToEdge,
}

/// Texel filter. `None` is only meaningful for the mip filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    None,
    Nearest,
    Linear,
    Cubic,
}

/// Create-info for a sampler object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerCreateInfo {
    pub wrap: [WrapMode; 3],
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub mip_filter: FilterMode,
    pub compare_enable: bool,
    pub compare_op: CompareOp,
    pub lod_bias: f32,
    pub min_lod: f32,
    pub max_lod: f32,
    pub max_anisotropy: f32,
    pub border_color: [f32; 4],
}

// ============================================================================
// Input layout
// ============================================================================

/// Vertex attribute formats understood by the vertex fetch stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    R8Sint,
    R8Sscaled,
    R8Snorm,
    R8Uint,
    R8Uscaled,
    R8Unorm,
    Rg8Sint,
    Rg8Sscaled,
    Rg8Snorm,
    Rg8Uint,
    Rg8Uscaled,
    Rg8Unorm,
    Rgb8Sint,
    Rgb8Sscaled,
    Rgb8Snorm,
    Rgb8Uint,
    Rgb8Uscaled,
    Rgb8Unorm,
    Rgba8Sint,
    Rgba8Sscaled,
    Rgba8Snorm,
    Rgba8Uint,
    Rgba8Uscaled,
    Rgba8Unorm,
    Bgra8Sint,
    Bgra8Sscaled,
    Bgra8Snorm,
    Bgra8Uint,
    Bgra8Uscaled,
    Bgra8Unorm,
    R16Sint,
    R16Sscaled,
    R16Snorm,
    R16Uint,
    R16Uscaled,
    R16Unorm,
    R16Sfloat,
    Rg16Sint,
    Rg16Sscaled,
    Rg16Snorm,
    Rg16Uint,
    Rg16Uscaled,
    Rg16Unorm,
    Rg16Sfloat,
    Rgb16Sint,
    Rgb16Sscaled,
    Rgb16Snorm,
    Rgb16Uint,
    Rgb16Uscaled,
    Rgb16Unorm,
    Rgb16Sfloat,
    Rgba16Sint,
    Rgba16Sscaled,
    Rgba16Snorm,
    Rgba16Uint,
    Rgba16Uscaled,
    Rgba16Unorm,
    Rgba16Sfloat,
    R32Sint,
    R32Uint,
    R32Sfloat,
    Rg32Sint,
    Rg32Uint,
    Rg32Sfloat,
    Rgb32Sint,
    Rgb32Uint,
    Rgb32Sfloat,
    Rgba32Sint,
    Rgba32Uint,
    Rgba32Sfloat,
    R64Sfloat,
    Rg64Sfloat,
    Rgb64Sfloat,
    Rgba64Sfloat,
    D24UnormS8Uint,
}

/// One vertex attribute of an input layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputLayoutAttrib {
    pub enable: bool,
    pub format: Format,
    pub offset: u32,
    pub binding: u32,
    pub divisor: u32,
}

impl Default for InputLayoutAttrib {
    fn default() -> Self {
        Self {
            enable: false,
            format: Format::Rgba32Sfloat,
            offset: 0,
            binding: 0,
            divisor: 0,
        }
    }
}

/// Create-info for an input layout object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputLayoutCreateInfo {
    pub attribs: [InputLayoutAttrib; MAX_VERTEX_ATTRIBS],
}

// ============================================================================
// Dynamic state
// ============================================================================

/// Rectangle in framebuffer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Viewport transform with its depth range
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub min_depth: f32,
    pub max_depth: f32,
}
