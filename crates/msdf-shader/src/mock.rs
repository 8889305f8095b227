//! Mock graphics binding for testing
//!
//! Provides a MockBinding that implements [`GraphicsBinding`] without any
//! engine behind it and records every constructor call for test assertions.
//! The CLI also uses it to emit sources headlessly.

use std::cell::{Cell, RefCell};

use crate::binding::GraphicsBinding;

/// Record of a constructor call for test inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCall {
    /// A 4-component vector was built
    Vector4,
    /// A default empty texture was built
    EmptyTexture,
}

/// Texture handle handed out by [`MockBinding`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MockTexture {
    pub id: u64,
}

impl MockTexture {
    pub fn with_id(id: u64) -> Self {
        Self { id }
    }
}

/// A binding that records all constructor calls
#[derive(Debug, Default)]
pub struct MockBinding {
    calls: RefCell<Vec<BindingCall>>,
    next_texture_id: Cell<u64>,
}

impl MockBinding {
    /// Create a new mock binding
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    ///
    /// The log grows until [`MockBinding::clear_calls`] is called; long-lived
    /// bindings should clear it between descriptors.
    pub fn calls(&self) -> Vec<BindingCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls of one kind
    pub fn count(&self, kind: BindingCall) -> usize {
        self.calls.borrow().iter().filter(|c| **c == kind).count()
    }

    /// Clear all recorded calls
    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl GraphicsBinding for MockBinding {
    type Texture = MockTexture;
    type Vec4 = [f32; 4];

    fn vector4(&self, x: f32, y: f32, z: f32, w: f32) -> Self::Vec4 {
        self.calls.borrow_mut().push(BindingCall::Vector4);
        [x, y, z, w]
    }

    fn empty_texture(&self) -> Self::Texture {
        self.calls.borrow_mut().push(BindingCall::EmptyTexture);
        let id = self.next_texture_id.get() + 1;
        self.next_texture_id.set(id);
        MockTexture { id }
    }
}
