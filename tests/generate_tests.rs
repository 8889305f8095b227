//! Shader generation functional tests
//!
//! Loads materials files from a temp directory and checks the files
//! written for each material.

mod common;

use common::{TestEnvironment, assert_has_line, read};
use hybrid_msdf::emit_all;
use msdf_config::MaterialSet;

#[test]
fn test_generate_two_materials() {
    let env = TestEnvironment::new();
    let path = env.write_materials(
        r#"
        [[material]]
        name = "hud"
        version = "100"
        negate = false
        alphaTest = 0.2
        transparent = true

        [[material]]
        name = "world"
        precision = "mediump"
        "#,
    );

    let set = MaterialSet::load_from(&path).unwrap();
    let emitted = emit_all(&set, &env.out_dir).unwrap();
    assert_eq!(emitted.len(), 2);

    let hud = env.read_output("hud.frag");
    assert!(!hud.contains("#version"));
    assert_has_line(&hud, "vec4 tex = texture2D(map, vUv);");
    assert_has_line(&hud, "if (gl_FragColor.a < 0.2) discard;");

    let world = env.read_output("world.frag");
    assert_has_line(&world, "#version 300 es");
    assert_has_line(&world, "precision mediump float;");
    assert_has_line(&env.read_output("world.vert"), "out vec2 origXY;");
}

#[test]
fn test_manifest_carries_pass_through() {
    let env = TestEnvironment::new();
    let path = env.write_materials(
        r#"
        [[material]]
        name = "hud"
        opacity = 0.5
        alphaTest = 0.2
        transparent = true
        "#,
    );

    let set = MaterialSet::load_from(&path).unwrap();
    emit_all(&set, &env.out_dir).unwrap();

    let manifest: toml::Table = toml::from_str(&env.read_output("hud.material.toml")).unwrap();
    assert_eq!(manifest["name"].as_str(), Some("hud"));
    assert_eq!(manifest["version"].as_str(), Some("300"));
    assert_eq!(manifest["fragment_shader"].as_str(), Some("hud.frag"));

    let uniforms = manifest["uniforms"].as_table().unwrap();
    assert_eq!(uniforms.len(), 4);
    assert_eq!(uniforms["opacity"]["type"].as_str(), Some("float"));
    assert_eq!(uniforms["opacity"]["value"].as_float(), Some(0.5));
    assert_eq!(uniforms["textureWidth"]["value"].as_float(), Some(512.0));
    assert!(uniforms["corners"].get("type").is_none());

    let extra = manifest["extra"].as_table().unwrap();
    assert_eq!(extra["transparent"].as_bool(), Some(true));
    assert_eq!(extra["alphaTest"].as_float(), Some(0.2));
    assert!(extra.get("opacity").is_none());
}

#[test]
fn test_default_materials_generate() {
    let env = TestEnvironment::new();
    let path = env.temp_dir.path().join("materials.toml");
    MaterialSet::write_default(&path).unwrap();

    let set = MaterialSet::load_from(&path).unwrap();
    let emitted = emit_all(&set, &env.out_dir).unwrap();

    assert_eq!(emitted.len(), 2);
    for material in &emitted {
        assert!(material.vertex_path.exists());
        assert!(material.manifest_path.exists());
        assert!(read(&material.fragment_path).contains("median(tex.r, tex.g, tex.b)"));
    }
}

#[test]
fn test_unsafe_names_stay_in_out_dir() {
    let env = TestEnvironment::new();
    let path = env.write_materials("[[material]]\nname = \"../escape\"\n");

    let set = MaterialSet::load_from(&path).unwrap();
    let emitted = emit_all(&set, &env.out_dir).unwrap();

    assert_eq!(emitted[0].fragment_path, env.output("___escape.frag"));
    assert!(!env.temp_dir.path().join("escape.frag").exists());
}

#[test]
fn test_colliding_stems_write_nothing() {
    let env = TestEnvironment::new();
    let path = env.write_materials(
        r#"
        [[material]]
        name = "a.b"
        version = "100"

        [[material]]
        name = "a_b"
        "#,
    );

    let set = MaterialSet::load_from(&path).unwrap();
    let err = emit_all(&set, &env.out_dir).unwrap_err();

    assert!(err.to_string().contains("a_b"));
    assert!(!env.output("a_b.frag").exists());
}

#[test]
fn test_duplicate_names_rejected() {
    let env = TestEnvironment::new();
    let path = env.write_materials("[[material]]\nname = \"hud\"\n[[material]]\nname = \"hud\"\n");

    let set = MaterialSet::load_from(&path).unwrap();
    assert!(emit_all(&set, &env.out_dir).is_err());
    assert!(!env.output("hud.vert").exists());
}

#[test]
fn test_numbers_written_verbatim() {
    let env = TestEnvironment::new();
    let path = env.write_materials(
        r#"
        [[material]]
        name = "hud"
        opacity = 0.4
        alphaTest = 0.123456789
        "#,
    );

    let set = MaterialSet::load_from(&path).unwrap();
    emit_all(&set, &env.out_dir).unwrap();

    assert_has_line(
        &env.read_output("hud.frag"),
        "if (glFragColor.a < 0.123456789) discard;",
    );

    let manifest: toml::Table = toml::from_str(&env.read_output("hud.material.toml")).unwrap();
    let uniforms = manifest["uniforms"].as_table().unwrap();
    assert_eq!(uniforms["opacity"]["value"].as_float(), Some(0.4));
    assert_eq!(manifest["extra"]["alphaTest"].as_float(), Some(0.123456789));
}
