//! Vertex and fragment source assembly
//!
//! Sources are assembled from fixed fragments plus a few typed values:
//! the dialect, the precision qualifier, whether sampled channels are
//! inverted, and the alpha-test threshold. Nothing caller-supplied is
//! spliced in as raw text.

use crate::dialect::Dialect;
use crate::options::{DEFAULT_ALPHA_TEST, DEFAULT_NEGATE, Precision, ResolvedOptions};

/// Median-of-three channel selection and the half-open clip test
const HELPERS: &str = "\
float median(float r, float g, float b) {
  return max(min(r, g), min(max(r, g), b));
}

bool inside(vec4 corners, vec2 origXY) {
  return corners.x <= origXY.x &&
         origXY.x < corners.z &&
         corners.y <= origXY.y &&
         origXY.y < corners.w;
}
";

/// Builder for the shader pair of one descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderSource {
    dialect: Dialect,
    precision: Precision,
    negate: bool,
    alpha_test: f64,
}

impl Default for ShaderSource {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl ShaderSource {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            precision: Precision::default(),
            negate: DEFAULT_NEGATE,
            alpha_test: DEFAULT_ALPHA_TEST,
        }
    }

    pub fn from_options(options: &ResolvedOptions) -> Self {
        Self::new(options.dialect)
            .precision(options.precision)
            .negate(options.negate)
            .alpha_test(options.alpha_test)
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn negate(mut self, negate: bool) -> Self {
        self.negate = negate;
        self
    }

    pub fn alpha_test(mut self, alpha_test: f64) -> Self {
        self.alpha_test = alpha_test;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Vertex stage: passes UV, color and object-space XY through and
    /// transforms the position into clip space.
    pub fn vertex(&self) -> String {
        let d = self.dialect;
        let attr = d.attribute();
        let out = d.vertex_out();

        let mut src = String::with_capacity(512);
        src.push_str(d.pragma());
        src.push_str(&format!("{attr} vec2 uv;\n"));
        src.push_str(&format!("{attr} vec4 position;\n"));
        src.push_str(&format!("{attr} vec3 color;\n"));
        src.push_str("uniform mat4 projectionMatrix;\n");
        src.push_str("uniform mat4 modelViewMatrix;\n");
        src.push('\n');
        src.push_str(&format!("{out} vec2 vUv;\n"));
        src.push_str(&format!("{out} vec3 outColor;\n"));
        src.push_str(&format!("{out} vec2 origXY;\n"));
        src.push('\n');
        src.push_str("void main() {\n");
        src.push_str("  vUv = uv;\n");
        src.push_str("  outColor = color;\n");
        src.push_str("  gl_Position = projectionMatrix * modelViewMatrix * position;\n");
        src.push_str("  origXY = position.xy;\n");
        src.push_str("}\n");
        src
    }

    /// Fragment stage: clip test, optional inversion, then analytic MSDF
    /// antialiasing when magnified or mipmapped alpha when minified.
    pub fn fragment(&self) -> String {
        let d = self.dialect;
        let input = d.fragment_in();
        let frag_color = d.frag_color();
        let invert = if self.negate { "1.0 - " } else { "" };

        let mut src = String::with_capacity(1536);
        src.push_str(d.pragma());
        src.push_str(d.fragment_preamble());
        src.push_str(&format!("precision {} float;\n", self.precision));
        src.push_str("uniform float opacity;\n");
        src.push_str("uniform vec4 corners; // [x: left, y: top, z: right, w: bottom]\n");
        src.push_str("uniform float textureWidth; // width of the map texture in texels\n");
        src.push_str("uniform sampler2D map;\n");
        src.push('\n');
        src.push_str(&format!("{input} vec3 outColor;\n"));
        src.push_str(&format!("{input} vec2 origXY;\n"));
        src.push_str(&format!("{input} vec2 vUv;\n"));
        src.push_str(d.frag_color_decl());
        src.push('\n');
        src.push_str(HELPERS);
        src.push('\n');
        src.push_str("void main() {\n");
        src.push_str("  float alpha;\n");
        src.push_str("  if (!inside(corners, origXY)) discard;\n");
        src.push_str(&format!("  vec4 tex = {invert}{}(map, vUv);\n", d.sample_fn()));
        src.push_str("  float delta = fwidth(vUv.x) * textureWidth;\n");
        src.push_str("  if (delta < 1.0) { // magnified: MSDF\n");
        src.push_str("    float sigDist = median(tex.r, tex.g, tex.b) - 0.5;\n");
        src.push_str("    alpha = clamp(sigDist / fwidth(sigDist) + 0.5, 0.0, 1.0);\n");
        src.push_str("  } else { // minified: mipmapped alpha\n");
        src.push_str("    alpha = tex.a;\n");
        src.push_str("  }\n");
        src.push_str(&format!("  {frag_color} = vec4(outColor.rgb, alpha * opacity);\n"));
        src.push_str(&format!(
            "  if ({frag_color}.a < {}) discard;\n",
            float_literal(self.alpha_test)
        ));
        src.push_str("}\n");
        src
    }
}

/// Format a float as a GLSL literal that always carries a decimal point
pub fn float_literal(value: f64) -> String {
    let mut s = value.to_string();
    if !s.contains(['.', 'e', 'E']) {
        s.push_str(".0");
    }
    s
}
