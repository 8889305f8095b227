//! Uniform containers seeded by the factory
//!
//! `opacity` and `map` are fixed once the descriptor is built. `corners` and
//! `textureWidth` are plain containers the render pipeline rewrites per frame
//! or per glyph run, so they expose mutable access.

use std::fmt;

/// Default clip rectangle as (left, top, right, bottom)
pub const DEFAULT_CORNERS: [f32; 4] = [0.0, 0.0, 100.0, 100.0];

/// Default atlas width in texels
pub const DEFAULT_TEXTURE_WIDTH: f64 = 512.0;

/// Uniform names in declaration order
pub const UNIFORM_NAMES: [&str; 4] = ["opacity", "map", "corners", "textureWidth"];

/// Type tag attached to engine-typed uniforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniformType {
    Float,
    Texture,
}

impl UniformType {
    pub fn as_str(self) -> &'static str {
        match self {
            UniformType::Float => "float",
            UniformType::Texture => "texture",
        }
    }

    /// Single-letter code used by older engine material formats
    pub fn short_code(self) -> char {
        match self {
            UniformType::Float => 'f',
            UniformType::Texture => 't',
        }
    }
}

impl fmt::Display for UniformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A uniform value with an optional type tag
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform<T> {
    pub kind: Option<UniformType>,
    pub value: T,
}

impl<T> Uniform<T> {
    /// Uniform with an explicit type tag
    pub fn typed(kind: UniformType, value: T) -> Self {
        Self {
            kind: Some(kind),
            value,
        }
    }

    /// Uniform whose type the engine infers from the value
    pub fn untyped(value: T) -> Self {
        Self { kind: None, value }
    }
}

/// The four uniforms every descriptor carries
///
/// `T` is the engine texture type, `V` the engine 4-component vector.
#[derive(Debug, Clone)]
pub struct Uniforms<T, V> {
    opacity: Uniform<f64>,
    map: Uniform<T>,
    corners: Uniform<V>,
    texture_width: Uniform<f64>,
}

impl<T, V> Uniforms<T, V> {
    pub(crate) fn new(opacity: f64, map: T, corners: V) -> Self {
        Self {
            opacity: Uniform::typed(UniformType::Float, opacity),
            map: Uniform::typed(UniformType::Texture, map),
            corners: Uniform::untyped(corners),
            texture_width: Uniform::untyped(DEFAULT_TEXTURE_WIDTH),
        }
    }

    pub fn opacity(&self) -> &Uniform<f64> {
        &self.opacity
    }

    pub fn map(&self) -> &Uniform<T> {
        &self.map
    }

    pub fn corners(&self) -> &Uniform<V> {
        &self.corners
    }

    /// Clip rectangle, updated by the pipeline per glyph run
    pub fn corners_mut(&mut self) -> &mut Uniform<V> {
        &mut self.corners
    }

    pub fn texture_width(&self) -> &Uniform<f64> {
        &self.texture_width
    }

    /// Atlas width in texels, updated when the atlas changes
    pub fn texture_width_mut(&mut self) -> &mut Uniform<f64> {
        &mut self.texture_width
    }

    /// Uniform names, always exactly [`UNIFORM_NAMES`]
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        UNIFORM_NAMES.into_iter()
    }

    /// Type tag of a uniform by its shader name
    pub fn kind_of(&self, name: &str) -> Option<UniformType> {
        match name {
            "opacity" => self.opacity.kind,
            "map" => self.map.kind,
            "corners" => self.corners.kind,
            "textureWidth" => self.texture_width.kind,
            _ => None,
        }
    }
}
