//! Shader options
//!
//! Options arrive either typed (builder setters on [`ShaderOptions`]) or as a
//! loose key/value record ([`RawOptions`]) coming from a config file or a
//! scripting layer. The loose form is resolved permissively: a recognized key
//! holding a value of the wrong type falls back to its default instead of
//! producing an error. Keys the factory does not consume are kept in a
//! [`PassThrough`] bag and handed back untouched on the descriptor.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::dialect::Dialect;

/// Key names understood by the factory
pub mod keys {
    pub const MAP: &str = "map";
    pub const COLOR: &str = "color";
    pub const PRECISION: &str = "precision";
    pub const OPACITY: &str = "opacity";
    pub const NEGATE: &str = "negate";
    pub const TEXTURE_SIZE: &str = "textureSize";
    pub const VERSION: &str = "version";
    pub const ALPHA_TEST: &str = "alphaTest";
}

/// Keys removed from the pass-through bag.
///
/// `alphaTest` is read but not consumed, so it still reaches the engine
/// material alongside the baked shader literal.
pub const CONSUMED_KEYS: [&str; 7] = [
    keys::MAP,
    keys::COLOR,
    keys::PRECISION,
    keys::OPACITY,
    keys::NEGATE,
    keys::TEXTURE_SIZE,
    keys::VERSION,
];

pub const DEFAULT_OPACITY: f64 = 1.0;
pub const DEFAULT_ALPHA_TEST: f64 = 0.0001;
pub const DEFAULT_NEGATE: bool = true;

/// Floating-point precision qualifier of the fragment stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    Lowp,
    Mediump,
    #[default]
    Highp,
}

impl Precision {
    /// Qualifier as written in shader source
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Lowp => "lowp",
            Precision::Mediump => "mediump",
            Precision::Highp => "highp",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown precision qualifier: {0}")]
pub struct ParsePrecisionError(pub String);

impl FromStr for Precision {
    type Err = ParsePrecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lowp" => Ok(Precision::Lowp),
            "mediump" => Ok(Precision::Mediump),
            "highp" => Ok(Precision::Highp),
            other => Err(ParsePrecisionError(other.to_string())),
        }
    }
}

/// Loosely typed option value
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<OptionValue>),
    Table(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    /// Values that count as "not set" for keys with a fallback default
    fn is_falsy(&self) -> bool {
        match self {
            OptionValue::Bool(b) => !b,
            OptionValue::Number(n) => *n == 0.0 || n.is_nan(),
            OptionValue::String(s) => s.is_empty(),
            OptionValue::List(_) | OptionValue::Table(_) => false,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            OptionValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(v: bool) -> Self {
        OptionValue::Bool(v)
    }
}

impl From<f64> for OptionValue {
    fn from(v: f64) -> Self {
        OptionValue::Number(v)
    }
}

impl From<f32> for OptionValue {
    fn from(v: f32) -> Self {
        OptionValue::Number(v as f64)
    }
}

impl From<i64> for OptionValue {
    fn from(v: i64) -> Self {
        OptionValue::Number(v as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(v: &str) -> Self {
        OptionValue::String(v.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(v: String) -> Self {
        OptionValue::String(v)
    }
}

/// Loose option record keyed by option name
pub type RawOptions = BTreeMap<String, OptionValue>;

/// Caller keys that the factory forwards verbatim onto the descriptor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassThrough(BTreeMap<String, OptionValue>);

impl PassThrough {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Consumed keys are silently dropped.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<OptionValue>) {
        let key = key.into();
        if CONSUMED_KEYS.contains(&key.as_str()) {
            log::debug!("Dropping consumed key '{}' from pass-through options", key);
            return;
        }
        self.0.insert(key, value.into());
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn into_inner(self) -> BTreeMap<String, OptionValue> {
        self.0
    }
}

/// Options for building a shader descriptor
///
/// Every field is optional; unset fields resolve to the documented defaults.
/// `T` is the host engine's texture type.
#[derive(Debug, Clone)]
pub struct ShaderOptions<T> {
    pub opacity: Option<f64>,
    pub alpha_test: Option<f64>,
    pub precision: Option<Precision>,
    pub map: Option<T>,
    pub negate: Option<bool>,
    pub dialect: Option<Dialect>,
    pub extra: PassThrough,
}

impl<T> Default for ShaderOptions<T> {
    fn default() -> Self {
        Self {
            opacity: None,
            alpha_test: None,
            precision: None,
            map: None,
            negate: None,
            dialect: None,
            extra: PassThrough::default(),
        }
    }
}

impl<T> ShaderOptions<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a loose option record.
    ///
    /// Never fails. Recognized keys with a mismatched type are treated as
    /// unset. Consumed keys are removed; everything else, `alphaTest`
    /// included, lands in [`ShaderOptions::extra`]. `map` cannot be carried
    /// by a loose value and must be set with [`ShaderOptions::map`].
    pub fn from_raw(mut raw: RawOptions) -> Self {
        let opacity = raw
            .get(keys::OPACITY)
            .and_then(OptionValue::as_number);
        let alpha_test = raw
            .get(keys::ALPHA_TEST)
            .and_then(OptionValue::as_number);
        let negate = match raw.get(keys::NEGATE) {
            Some(OptionValue::Bool(b)) => Some(*b),
            _ => None,
        };

        let precision = match raw.get(keys::PRECISION) {
            Some(OptionValue::String(s)) if !s.is_empty() => match s.parse::<Precision>() {
                Ok(p) => Some(p),
                Err(e) => {
                    log::warn!("{}, using {}", e, Precision::default());
                    None
                }
            },
            _ => None,
        };

        let dialect = match raw.get(keys::VERSION) {
            Some(v) if v.is_falsy() => None,
            Some(OptionValue::String(s)) => Some(Dialect::from_version(s)),
            Some(_) => Some(Dialect::Legacy),
            None => None,
        };

        for key in CONSUMED_KEYS {
            raw.remove(key);
        }

        Self {
            opacity,
            alpha_test,
            precision,
            map: None,
            negate,
            dialect,
            extra: PassThrough(raw),
        }
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn alpha_test(mut self, alpha_test: f64) -> Self {
        self.alpha_test = Some(alpha_test);
        self
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn map(mut self, map: T) -> Self {
        self.map = Some(map);
        self
    }

    pub fn negate(mut self, negate: bool) -> Self {
        self.negate = Some(negate);
        self
    }

    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Select the dialect from a version string (`"300"` or `""` is modern)
    pub fn version(self, version: &str) -> Self {
        self.dialect(Dialect::from_version(version))
    }

    /// Add a pass-through key
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.extra.insert(key, value);
        self
    }

    /// Apply defaults, splitting off the atlas texture and pass-through bag
    pub fn resolve(self) -> (ResolvedOptions, Option<T>, PassThrough) {
        let resolved = ResolvedOptions {
            opacity: finite_or(keys::OPACITY, self.opacity, DEFAULT_OPACITY),
            alpha_test: finite_or(keys::ALPHA_TEST, self.alpha_test, DEFAULT_ALPHA_TEST),
            precision: self.precision.unwrap_or_default(),
            negate: self.negate.unwrap_or(DEFAULT_NEGATE),
            dialect: self.dialect.unwrap_or_default(),
        };
        (resolved, self.map, self.extra)
    }
}

fn finite_or(key: &str, value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        Some(v) => {
            log::warn!("Ignoring non-finite {} ({}), using {}", key, v, default);
            default
        }
        None => default,
    }
}

/// Options after defaulting, echoed on the descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedOptions {
    pub opacity: f64,
    pub alpha_test: f64,
    pub precision: Precision,
    pub negate: bool,
    pub dialect: Dialect,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        let (resolved, _, _) = ShaderOptions::<()>::default().resolve();
        resolved
    }
}
