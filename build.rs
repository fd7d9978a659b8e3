use std::{env, error::Error, fs, path::Path};

#[path = "src/cfg_toml.rs"]
mod cfg_toml;

const CONFIG_FILE: &str = "cfg.toml";
const CONFIG_TEMPLATE: &str = "cfg.toml.example";

fn main() -> Result<(), Box<dyn Error>> {
    // Tell Cargo to rerun if toml changes
    println!("cargo:rerun-if-changed={CONFIG_FILE}");
    println!("cargo:rerun-if-changed={CONFIG_TEMPLATE}");
    println!("cargo:rerun-if-changed=src/cfg_toml.rs");

    let path = if Path::new(CONFIG_FILE).exists() {
        CONFIG_FILE
    } else {
        println!("cargo:warning={CONFIG_FILE} not found, building with {CONFIG_TEMPLATE}");
        CONFIG_TEMPLATE
    };

    // Read and parse
    let toml_str = fs::read_to_string(path)?;
    let raw = cfg_toml::parse(&toml_str).map_err(|e| format!("{path}: {e}"))?;

    let code = cfg_toml::render(raw)?;

    // Generate Rust code
    let out_dir = env::var("OUT_DIR")?;
    let dest_path = Path::new(&out_dir).join("config.rs");
    fs::write(dest_path, code)?;
    Ok(())
}
