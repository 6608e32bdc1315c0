use std::{env, path::PathBuf};

use anyhow::Result;
use fs_extra::{copy_items, dir::CopyOptions};

fn main() -> Result<()> {
    // Rerun when the bundled assets (planet textures, avatar glb) change.
    println!("cargo:rerun-if-changed=assets/*");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    if manifest_dir.join("assets").exists() {
        let out_dir = env::var("OUT_DIR")?;
        let mut copy_options = CopyOptions::new();
        copy_options.overwrite = true;
        copy_items(&["assets/"], out_dir, &copy_options)?;
    }

    Ok(())
}
