//! Target shading-language dialects
//!
//! Both dialects run the same algorithm. They differ only in the version
//! pragma, stage-variable keywords, the sampling function and whether the
//! fragment output is explicit.

use std::fmt;

/// Version string that selects the modern dialect
pub const MODERN_VERSION: &str = "300";

/// Version string reported for the legacy dialect
pub const LEGACY_VERSION: &str = "100";

/// Derivative extension guard emitted at the top of legacy fragment sources
const LEGACY_DERIVATIVES: &str = "\
#ifdef GL_OES_standard_derivatives
#  extension GL_OES_standard_derivatives : enable
#endif
";

/// Shading-language dialect, chosen once per descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// GLSL ES 1.00: `attribute`/`varying`, `texture2D`, `gl_FragColor`
    Legacy,
    /// GLSL ES 3.00: `in`/`out`, `texture`, explicit fragment output
    #[default]
    Modern,
}

impl Dialect {
    /// Select a dialect from a version string.
    ///
    /// `"300"` selects [`Dialect::Modern`], and so does an empty string,
    /// which counts as unset. Every other string is legacy.
    pub fn from_version(version: &str) -> Self {
        if version.is_empty() || version == MODERN_VERSION {
            Dialect::Modern
        } else {
            Dialect::Legacy
        }
    }

    /// Version string of this dialect
    pub fn version(self) -> &'static str {
        match self {
            Dialect::Legacy => LEGACY_VERSION,
            Dialect::Modern => MODERN_VERSION,
        }
    }

    /// Version pragma line, empty for legacy
    pub(crate) fn pragma(self) -> &'static str {
        match self {
            Dialect::Legacy => "",
            Dialect::Modern => "#version 300 es\n",
        }
    }

    /// Lines that must precede the precision statement of a fragment source
    pub(crate) fn fragment_preamble(self) -> &'static str {
        match self {
            Dialect::Legacy => LEGACY_DERIVATIVES,
            Dialect::Modern => "",
        }
    }

    /// Keyword for per-vertex attributes
    pub(crate) fn attribute(self) -> &'static str {
        match self {
            Dialect::Legacy => "attribute",
            Dialect::Modern => "in",
        }
    }

    /// Keyword for interpolated values written by the vertex stage
    pub(crate) fn vertex_out(self) -> &'static str {
        match self {
            Dialect::Legacy => "varying",
            Dialect::Modern => "out",
        }
    }

    /// Keyword for interpolated values read by the fragment stage
    pub(crate) fn fragment_in(self) -> &'static str {
        match self {
            Dialect::Legacy => "varying",
            Dialect::Modern => "in",
        }
    }

    /// 2D texture sampling function
    pub(crate) fn sample_fn(self) -> &'static str {
        match self {
            Dialect::Legacy => "texture2D",
            Dialect::Modern => "texture",
        }
    }

    /// Name of the fragment color output
    pub(crate) fn frag_color(self) -> &'static str {
        match self {
            Dialect::Legacy => "gl_FragColor",
            Dialect::Modern => "glFragColor",
        }
    }

    /// Explicit output declaration, empty when the output is built in
    pub(crate) fn frag_color_decl(self) -> &'static str {
        match self {
            Dialect::Legacy => "",
            Dialect::Modern => "out vec4 glFragColor;\n",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Legacy => write!(f, "GLSL ES 1.00"),
            Dialect::Modern => write!(f, "GLSL ES 3.00"),
        }
    }
}
