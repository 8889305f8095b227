//! Hybrid MSDF - glyph shader generator
//!
//! This is the root crate containing the `msdf-shader-gen` tool.
//! The actual implementation lives in:
//! - `msdf-shader` - Shader descriptor factory
//! - `msdf-config` - TOML material sets
//!
//! Generate shaders:
//! ```sh
//! cargo run -- --init materials.toml
//! cargo run -- materials.toml out/
//! ```

pub mod emit;

pub use emit::{EmittedMaterial, MaterialManifest, UniformEntry, emit_all, emit_material, file_stem};
