//! Graphics engine binding
//!
//! The factory never touches a GPU. The host engine only has to construct
//! the two default uniform values the factory cannot express on its own:
//! the clip rectangle vector and an empty texture for the atlas slot.

use std::fmt::Debug;

/// Constructors supplied by the host graphics engine
pub trait GraphicsBinding {
    /// Engine texture handle stored in the `map` uniform
    type Texture: Clone + Debug;
    /// Engine 4-component vector stored in the `corners` uniform
    type Vec4: Clone + Debug;

    /// Build a 4-component vector
    fn vector4(&self, x: f32, y: f32, z: f32, w: f32) -> Self::Vec4;

    /// Build an empty texture used when no atlas was supplied
    fn empty_texture(&self) -> Self::Texture;
}

impl<B: GraphicsBinding + ?Sized> GraphicsBinding for &B {
    type Texture = B::Texture;
    type Vec4 = B::Vec4;

    fn vector4(&self, x: f32, y: f32, z: f32, w: f32) -> Self::Vec4 {
        (**self).vector4(x, y, z, w)
    }

    fn empty_texture(&self) -> Self::Texture {
        (**self).empty_texture()
    }
}
