//! Shader file emission
//!
//! Each material produces three files in the output directory:
//! `<name>.vert`, `<name>.frag` and `<name>.material.toml`, the last one
//! describing the seeded uniforms and the pass-through keys an engine
//! material should pick up.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use msdf_config::{Material, MaterialSet, to_toml_value};
use msdf_shader::{MockBinding, MockTexture, ShaderDescriptor, create};
use serde::Serialize;

/// Placeholder written for the `map` uniform; no atlas is bound headlessly
const UNBOUND_TEXTURE: &str = "unbound";

/// One uniform as written to the manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniformEntry {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub value: toml::Value,
}

/// Engine-facing description of a generated material
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialManifest {
    pub name: String,
    pub version: String,
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub uniforms: BTreeMap<String, UniformEntry>,
    pub extra: toml::Table,
}

/// Paths written for one material
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedMaterial {
    pub name: String,
    pub vertex_path: PathBuf,
    pub fragment_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// File stem for a material name. Characters outside `[A-Za-z0-9_-]`
/// become `_` so names cannot escape the output directory.
pub fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "material".to_string() } else { stem }
}

/// Describe a descriptor for the manifest file
pub fn manifest(
    name: &str,
    stem: &str,
    desc: &ShaderDescriptor<MockTexture, [f32; 4]>,
) -> MaterialManifest {
    let uniforms = desc.uniforms();
    let mut entries = BTreeMap::new();

    entries.insert(
        "opacity".to_string(),
        UniformEntry {
            kind: uniforms.opacity().kind.map(|k| k.to_string()),
            value: toml::Value::Float(uniforms.opacity().value),
        },
    );
    entries.insert(
        "map".to_string(),
        UniformEntry {
            kind: uniforms.map().kind.map(|k| k.to_string()),
            value: toml::Value::String(UNBOUND_TEXTURE.to_string()),
        },
    );
    entries.insert(
        "corners".to_string(),
        UniformEntry {
            kind: uniforms.corners().kind.map(|k| k.to_string()),
            value: toml::Value::Array(
                uniforms
                    .corners()
                    .value
                    .iter()
                    .map(|c| toml::Value::Float(*c as f64))
                    .collect(),
            ),
        },
    );
    entries.insert(
        "textureWidth".to_string(),
        UniformEntry {
            kind: uniforms.texture_width().kind.map(|k| k.to_string()),
            value: toml::Value::Float(uniforms.texture_width().value),
        },
    );

    let extra = desc
        .extra()
        .iter()
        .map(|(k, v)| (k.to_string(), to_toml_value(v)))
        .collect();

    MaterialManifest {
        name: name.to_string(),
        version: desc.options().dialect.version().to_string(),
        vertex_shader: format!("{stem}.vert"),
        fragment_shader: format!("{stem}.frag"),
        uniforms: entries,
        extra,
    }
}

/// Generate and write the files for one material
pub fn emit_material(
    material: &Material,
    binding: &MockBinding,
    out_dir: &Path,
) -> Result<EmittedMaterial> {
    let desc = create(material.shader_options(), binding);
    let stem = file_stem(&material.name);

    let vertex_path = out_dir.join(format!("{stem}.vert"));
    let fragment_path = out_dir.join(format!("{stem}.frag"));
    let manifest_path = out_dir.join(format!("{stem}.material.toml"));

    fs::write(&vertex_path, desc.vertex_shader())
        .with_context(|| format!("writing {}", vertex_path.display()))?;
    fs::write(&fragment_path, desc.fragment_shader())
        .with_context(|| format!("writing {}", fragment_path.display()))?;

    let manifest = manifest(&material.name, &stem, &desc);
    let content = toml::to_string_pretty(&manifest)
        .with_context(|| format!("serializing manifest for '{}'", material.name))?;
    fs::write(&manifest_path, content)
        .with_context(|| format!("writing {}", manifest_path.display()))?;

    log::info!(
        "Generated '{}' ({}) -> {}",
        material.name,
        desc.options().dialect,
        fragment_path.display()
    );

    Ok(EmittedMaterial {
        name: material.name.clone(),
        vertex_path,
        fragment_path,
        manifest_path,
    })
}

/// Fail if two materials would write to the same files
fn check_stems(set: &MaterialSet) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for material in &set.materials {
        let stem = file_stem(&material.name);
        if let Some(first) = seen.insert(stem.clone(), &material.name) {
            bail!(
                "materials '{}' and '{}' both map to output file stem '{}'",
                first,
                material.name,
                stem
            );
        }
    }
    Ok(())
}

/// Generate every material in a set.
///
/// Nothing is written when two materials share an output file stem.
pub fn emit_all(set: &MaterialSet, out_dir: &Path) -> Result<Vec<EmittedMaterial>> {
    check_stems(set)?;
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let binding = MockBinding::new();
    let mut emitted = Vec::with_capacity(set.materials.len());
    for material in &set.materials {
        emitted.push(emit_material(material, &binding, out_dir)?);
        binding.clear_calls();
    }
    Ok(emitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use msdf_shader::ShaderOptions;

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("ui-text"), "ui-text");
        assert_eq!(file_stem("../etc/passwd"), "___etc_passwd");
        assert_eq!(file_stem(""), "material");
    }

    #[test]
    fn test_check_stems() {
        let set = MaterialSet::from_toml_str(
            "[[material]]\nname = \"a.b\"\n[[material]]\nname = \"a_b\"\n",
        )
        .unwrap();
        let err = check_stems(&set).unwrap_err();
        assert!(err.to_string().contains("'a_b'"));

        let distinct = MaterialSet::from_toml_str("[[material]]\nname = \"a\"\n").unwrap();
        assert!(check_stems(&distinct).is_ok());
    }

    #[test]
    fn test_manifest_contents() {
        let binding = MockBinding::new();
        let desc = create(ShaderOptions::new().extra("transparent", true), &binding);
        let m = manifest("text", "text", &desc);

        assert_eq!(m.version, "300");
        assert_eq!(m.fragment_shader, "text.frag");
        assert_eq!(m.uniforms.len(), 4);
        assert_eq!(m.uniforms["opacity"].kind.as_deref(), Some("float"));
        assert_eq!(m.uniforms["map"].kind.as_deref(), Some("texture"));
        assert_eq!(m.uniforms["corners"].kind, None);
        assert_eq!(m.uniforms["textureWidth"].value, toml::Value::Float(512.0));
        assert_eq!(m.extra.get("transparent"), Some(&toml::Value::Boolean(true)));
    }
}
