//! Hybrid MSDF shader generation
//!
//! Builds the shader program description used to draw multichannel
//! signed-distance-field glyph atlases:
//! - Magnified glyphs: median-of-three signed distance with analytic
//!   `fwidth` antialiasing
//! - Minified glyphs: the atlas alpha channel, antialiased by its mip chain
//!
//! Two GLSL ES dialects are targeted (1.00 and 3.00). The host engine
//! supplies texture and vector constructors through [`GraphicsBinding`];
//! draw calls, geometry and texture upload stay on the engine side.

pub mod binding;
pub mod descriptor;
pub mod dialect;
pub mod mock;
pub mod options;
pub mod source;
pub mod uniforms;

pub use binding::GraphicsBinding;
pub use descriptor::{ShaderDescriptor, create};
pub use dialect::Dialect;
pub use mock::{BindingCall, MockBinding, MockTexture};
pub use options::{
    CONSUMED_KEYS, OptionValue, ParsePrecisionError, PassThrough, Precision, RawOptions,
    ResolvedOptions, ShaderOptions,
};
pub use source::ShaderSource;
pub use uniforms::{Uniform, UniformType, Uniforms};
