use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

// Places the profile's config next to the binary, where it is loaded at start-up.
fn main() -> Result<(), Box<dyn Error>> {
    let profile = env::var("PROFILE")?;
    let config_file = format!("scoreboard.{profile}.toml");
    println!("cargo:rerun-if-changed={config_file}");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let bin_dir = out_dir
        .ancestors()
        .nth(3)
        .ok_or("OUT_DIR is not inside a cargo target directory")?;
    fs::create_dir_all(bin_dir)?;

    fs::copy(&config_file, bin_dir.join("scoreboard.toml"))
        .map_err(|e| format!("could not copy {config_file}: {e}"))?;
    Ok(())
}
