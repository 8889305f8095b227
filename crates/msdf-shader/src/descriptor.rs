//! Shader descriptor factory
//!
//! [`create`] turns an options record into the immutable shader pair plus
//! seeded uniforms. It never fails; the binding is only used to build the
//! `map` and `corners` defaults, fresh on every call.

use crate::binding::GraphicsBinding;
use crate::options::{PassThrough, ResolvedOptions, ShaderOptions};
use crate::source::ShaderSource;
use crate::uniforms::{DEFAULT_CORNERS, UNIFORM_NAMES, Uniforms};

/// Shader program description handed to the engine's compile step
///
/// `T` is the engine texture type, `V` the engine 4-component vector.
#[derive(Debug, Clone)]
pub struct ShaderDescriptor<T, V> {
    vertex_shader: String,
    fragment_shader: String,
    uniforms: Uniforms<T, V>,
    options: ResolvedOptions,
    extra: PassThrough,
}

/// Build a descriptor.
///
/// Consumed option keys are excluded from [`ShaderDescriptor::extra`]; every
/// other caller key is forwarded unchanged.
pub fn create<B: GraphicsBinding>(
    options: ShaderOptions<B::Texture>,
    binding: &B,
) -> ShaderDescriptor<B::Texture, B::Vec4> {
    let (resolved, map, extra) = options.resolve();

    let map = map.unwrap_or_else(|| binding.empty_texture());
    let [left, top, right, bottom] = DEFAULT_CORNERS;
    let corners = binding.vector4(left, top, right, bottom);

    let source = ShaderSource::from_options(&resolved);

    log::debug!(
        "Built MSDF shader descriptor: {} precision={} negate={} alphaTest={} extra_keys={}",
        resolved.dialect,
        resolved.precision,
        resolved.negate,
        resolved.alpha_test,
        extra.len()
    );

    ShaderDescriptor {
        vertex_shader: source.vertex(),
        fragment_shader: source.fragment(),
        uniforms: Uniforms::new(resolved.opacity, map, corners),
        options: resolved,
        extra,
    }
}

impl<T, V> ShaderDescriptor<T, V> {
    pub fn vertex_shader(&self) -> &str {
        &self.vertex_shader
    }

    pub fn fragment_shader(&self) -> &str {
        &self.fragment_shader
    }

    pub fn uniforms(&self) -> &Uniforms<T, V> {
        &self.uniforms
    }

    /// Only `corners` and `textureWidth` can be changed through this
    pub fn uniforms_mut(&mut self) -> &mut Uniforms<T, V> {
        &mut self.uniforms
    }

    /// Options after defaulting, as baked into the sources
    pub fn options(&self) -> &ResolvedOptions {
        &self.options
    }

    /// Caller keys forwarded to the engine material
    pub fn extra(&self) -> &PassThrough {
        &self.extra
    }

    pub fn uniform_names() -> [&'static str; 4] {
        UNIFORM_NAMES
    }

    /// Split into (vertex, fragment, uniforms, pass-through)
    pub fn into_parts(self) -> (String, String, Uniforms<T, V>, PassThrough) {
        (
            self.vertex_shader,
            self.fragment_shader,
            self.uniforms,
            self.extra,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::mock::{BindingCall, MockBinding, MockTexture};
    use crate::options::{OptionValue, Precision, RawOptions};

    #[test]
    fn test_all_defaults() {
        let binding = MockBinding::new();
        let desc = create(ShaderOptions::new(), &binding);

        assert!(desc.vertex_shader().starts_with("#version 300 es"));
        assert!(desc.fragment_shader().starts_with("#version 300 es"));
        assert!(desc.fragment_shader().contains("1.0 - texture(map, vUv)"));
        assert!(desc.fragment_shader().contains("< 0.0001) discard;"));
        assert_eq!(desc.uniforms().opacity().value, 1.0);
        assert_eq!(desc.uniforms().corners().value, [0.0, 0.0, 100.0, 100.0]);
        assert_eq!(desc.uniforms().texture_width().value, 512.0);
        assert_eq!(desc.uniforms().names().count(), 4);
        assert!(desc.extra().is_empty());
        assert_eq!(desc.options().dialect, Dialect::Modern);
    }

    #[test]
    fn test_legacy_end_to_end() {
        let binding = MockBinding::new();
        let raw: RawOptions = [
            ("version".to_string(), OptionValue::from("100")),
            ("negate".to_string(), OptionValue::from(false)),
            ("alphaTest".to_string(), OptionValue::from(0.2f64)),
        ]
        .into_iter()
        .collect();
        let desc = create(ShaderOptions::from_raw(raw), &binding);

        let frag = desc.fragment_shader();
        assert!(!frag.contains("#version"));
        assert!(frag.contains("vec4 tex = texture2D(map, vUv);"));
        assert!(!frag.contains("1.0 - texture2D"));
        assert!(frag.contains("if (gl_FragColor.a < 0.2) discard;"));
        assert!(!desc.vertex_shader().contains("#version"));
    }

    #[test]
    fn test_supplied_map_skips_default_texture() {
        let binding = MockBinding::new();
        let atlas = MockTexture::with_id(77);
        let desc = create(ShaderOptions::new().map(atlas.clone()), &binding);

        assert_eq!(desc.uniforms().map().value, atlas);
        assert_eq!(binding.count(BindingCall::EmptyTexture), 0);
        assert_eq!(binding.count(BindingCall::Vector4), 1);
    }

    #[test]
    fn test_defaults_built_fresh_per_call() {
        let binding = MockBinding::new();
        let a = create(ShaderOptions::new(), &binding);
        let b = create(ShaderOptions::new(), &binding);

        assert_ne!(a.uniforms().map().value, b.uniforms().map().value);
        assert_eq!(binding.count(BindingCall::EmptyTexture), 2);
        assert_eq!(binding.count(BindingCall::Vector4), 2);
    }

    #[test]
    fn test_precision_and_opacity_baked() {
        let binding = MockBinding::new();
        let desc = create(
            ShaderOptions::new()
                .precision(Precision::Lowp)
                .opacity(0.25)
                .dialect(Dialect::Legacy),
            &binding,
        );
        assert!(desc.fragment_shader().contains("precision lowp float;"));
        assert_eq!(desc.uniforms().opacity().value, 0.25);
    }

    #[test]
    fn test_mutable_uniforms() {
        let binding = MockBinding::new();
        let mut desc = create(ShaderOptions::new(), &binding);
        desc.uniforms_mut().corners_mut().value = [5.0, 5.0, 50.0, 60.0];
        desc.uniforms_mut().texture_width_mut().value = 2048.0;
        assert_eq!(desc.uniforms().corners().value, [5.0, 5.0, 50.0, 60.0]);
        assert_eq!(desc.uniforms().texture_width().value, 2048.0);
    }

    #[test]
    fn test_pass_through_merge() {
        let binding = MockBinding::new();
        let desc = create(
            ShaderOptions::new()
                .extra("foo", 42i64)
                .extra("transparent", true)
                .extra("color", "#ff0000"),
            &binding,
        );
        assert_eq!(desc.extra().get("foo"), Some(&OptionValue::Number(42.0)));
        assert_eq!(desc.extra().get("transparent"), Some(&OptionValue::Bool(true)));
        assert!(!desc.extra().contains_key("color"));

        let (_, _, _, extra) = desc.into_parts();
        assert_eq!(extra.len(), 2);
    }
}
