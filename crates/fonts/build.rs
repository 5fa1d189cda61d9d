use std::{
    fs,
    path::{Path, PathBuf},
};

use base64::Engine;
use flate2::{Compression, write::GzEncoder};

/// Font placed first in the archive. Loading "the default font" picks it.
const DEFAULT_FONT: &str = "futural";

const FONT_DIR: &str = "data/fonts";

/// Collect the names of all `.jhf` files in the font directory, default font first.
fn font_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "jhf"))
        .map(|path| path.file_stem().unwrap().to_string_lossy().into_owned())
        .collect();

    names.sort();

    if let Some(idx) = names.iter().position(|name| name == DEFAULT_FONT) {
        let default = names.remove(idx);
        names.insert(0, default);
    }

    names
}

/// Pack the fonts into a gzip-compressed tar archive, encoded as base64 text.
fn pack_fonts(dir: &Path, names: &[String]) -> String {
    let encoder = GzEncoder::new(Vec::new(), Compression::best());
    let mut archive = tar::Builder::new(encoder);

    for name in names {
        let data = fs::read(dir.join(format!("{name}.jhf"))).unwrap();

        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        // fixed mtime keeps the archive reproducible
        header.set_mtime(0);
        header.set_cksum();

        archive.append_data(&mut header, name, data.as_slice()).unwrap();
    }

    let compressed = archive.into_inner().unwrap().finish().unwrap();

    base64::engine::general_purpose::STANDARD.encode(compressed)
}

/// Generate the name table that will be included in the crate.
fn generate_rust(names: &[String]) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "static BUILT_IN_FONT_NAMES: [&str; {}] = [\n",
        names.len()
    ));

    for name in names {
        out.push_str(&format!("    {:?},\n", name));
    }

    out.push_str("];\n");

    out
}

fn main() {
    let dir = Path::new(FONT_DIR);
    let names = font_names(dir);

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());

    fs::write(out_dir.join("builtin_fonts.b64"), pack_fonts(dir, &names)).unwrap();
    fs::write(out_dir.join("builtin_fonts.rs"), generate_rust(&names)).unwrap();

    println!("cargo:rerun-if-changed={FONT_DIR}");
}
