//! MSDF material configuration
//!
//! Loads named shader option sets ("materials") from a TOML file:
//!
//! ```toml
//! [[material]]
//! name = "ui-text"
//! version = "100"
//! negate = false
//! alphaTest = 0.2
//! transparent = true
//! ```
//!
//! Every key except `name` is converted into a loose option value and
//! resolved by the shader crate, so a mistyped option falls back to its
//! default rather than failing the load.

pub mod value;

pub use value::{from_toml_table, from_toml_value, to_toml_value};

use msdf_shader::{RawOptions, ShaderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default materials file name
pub const MATERIALS_FILE_NAME: &str = "materials.toml";

/// Key naming a material inside its table
const NAME_KEY: &str = "name";

/// On-disk layout: an array of `[[material]]` tables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MaterialFile {
    #[serde(default, rename = "material")]
    materials: Vec<toml::Table>,
}

/// One named option set
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub options: RawOptions,
}

impl Material {
    /// Resolve into typed shader options for a given engine texture type
    pub fn shader_options<T>(&self) -> ShaderOptions<T> {
        ShaderOptions::from_raw(self.options.clone())
    }
}

/// All materials declared in one file, in declaration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialSet {
    pub materials: Vec<Material>,
}

impl MaterialSet {
    /// Parse materials from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("<string>"))
    }

    /// Load materials from a specific path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e))?;

        let set = Self::parse(&content, path)?;
        log::info!("Loaded {} material(s) from {:?}", set.materials.len(), path);
        Ok(set)
    }

    fn parse(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let file: MaterialFile = toml::from_str(content)
            .map_err(|e| ConfigError::ParseError(origin.to_path_buf(), e))?;

        let mut materials: Vec<Material> = Vec::with_capacity(file.materials.len());
        for (index, mut table) in file.materials.into_iter().enumerate() {
            let name = match table.remove(NAME_KEY) {
                Some(toml::Value::String(name)) => name,
                Some(other) => {
                    log::warn!(
                        "Material #{} has a non-string name ({}), using default",
                        index,
                        other.type_str()
                    );
                    default_name(index)
                }
                None => default_name(index),
            };

            if materials.iter().any(|m| m.name == name) {
                log::warn!("Duplicate material name '{}' in {:?}", name, origin);
            }

            materials.push(Material {
                name,
                options: from_toml_table(table),
            });
        }

        Ok(Self { materials })
    }

    /// Find the first material with the given name
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Generate the default materials file content
    pub fn default_toml() -> Result<String, ConfigError> {
        let mut modern = toml::Table::new();
        modern.insert(NAME_KEY.into(), "text".into());
        modern.insert("version".into(), "300".into());
        modern.insert("precision".into(), "highp".into());
        modern.insert("negate".into(), true.into());
        modern.insert("opacity".into(), 1.0f64.into());
        modern.insert("alphaTest".into(), 0.0001f64.into());

        let mut legacy = toml::Table::new();
        legacy.insert(NAME_KEY.into(), "text-legacy".into());
        legacy.insert("version".into(), "100".into());
        legacy.insert("negate".into(), true.into());
        legacy.insert("transparent".into(), true.into());

        let file = MaterialFile {
            materials: vec![modern, legacy],
        };
        let toml_content = toml::to_string_pretty(&file).map_err(ConfigError::SerializeError)?;

        Ok(format!(
            "# MSDF shader materials\n\
             #\n\
             # Recognized keys: version (\"300\" or \"100\"), precision (lowp/mediump/highp),\n\
             # negate, opacity, alphaTest. Any other key is forwarded to the engine material.\n\
             \n\
             {toml_content}"
        ))
    }

    /// Write the default materials file, creating parent directories
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .map_err(|e| ConfigError::CreateDirError(dir.to_path_buf(), e))?;
        }

        let content = Self::default_toml()?;
        fs::write(path, content).map_err(|e| ConfigError::WriteError(path.to_path_buf(), e))?;

        log::info!("Created default materials at {:?}", path);
        Ok(())
    }
}

fn default_name(index: usize) -> String {
    format!("material-{}", index)
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read materials file
    ReadError(PathBuf, std::io::Error),
    /// Failed to parse materials file
    ParseError(PathBuf, toml::de::Error),
    /// Failed to serialize materials
    SerializeError(toml::ser::Error),
    /// Failed to write materials file
    WriteError(PathBuf, std::io::Error),
    /// Failed to create directory
    CreateDirError(PathBuf, std::io::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => write!(f, "Failed to read {:?}: {}", path, e),
            ConfigError::ParseError(path, e) => write!(f, "Failed to parse {:?}: {}", path, e),
            ConfigError::SerializeError(e) => write!(f, "Failed to serialize materials: {}", e),
            ConfigError::WriteError(path, e) => write!(f, "Failed to write {:?}: {}", path, e),
            ConfigError::CreateDirError(path, e) => write!(f, "Failed to create {:?}: {}", path, e),
        }
    }
}

impl std::error::Error for ConfigError {}
