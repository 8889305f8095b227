//! msdf-shader-gen - write hybrid MSDF shaders for a materials file
//!
//! Usage:
//!   msdf-shader-gen <materials.toml> [out-dir]
//!   msdf-shader-gen --init <materials.toml>

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use hybrid_msdf::emit_all;
use msdf_config::MaterialSet;

const USAGE: &str = "usage: msdf-shader-gen <materials.toml> [out-dir]\n       msdf-shader-gen --init <materials.toml>";

enum Command {
    Init(PathBuf),
    Generate { materials: PathBuf, out_dir: PathBuf },
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [flag, path] if flag == "--init" => Ok(Command::Init(PathBuf::from(path))),
        [materials] if !materials.starts_with("--") => Ok(Command::Generate {
            materials: PathBuf::from(materials),
            out_dir: PathBuf::from("."),
        }),
        [materials, out_dir] if !materials.starts_with("--") => Ok(Command::Generate {
            materials: PathBuf::from(materials),
            out_dir: PathBuf::from(out_dir),
        }),
        _ => bail!("{}", USAGE),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match parse_args(&args)? {
        Command::Init(path) => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            MaterialSet::write_default(&path)
                .with_context(|| format!("initializing {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        Command::Generate { materials, out_dir } => {
            let set = MaterialSet::load_from(&materials)
                .with_context(|| format!("loading {}", materials.display()))?;
            if set.is_empty() {
                log::warn!("No [[material]] tables in {:?}", materials);
            }

            for emitted in emit_all(&set, &out_dir)? {
                println!(
                    "{}: {} {}",
                    emitted.name,
                    emitted.vertex_path.display(),
                    emitted.fragment_path.display()
                );
            }
        }
    }

    Ok(())
}
