//! Fonts bundled with the crate.
//!
//! The `.jhf` sources are packed by the build script into a gzip-compressed
//! tar archive and stored as base64 text. Loading a built-in font reverses
//! both steps and hands the extracted lines to the decoder.

use std::{
    io::{self, Read},
    path::Path,
};

use base64::Engine;
use flate2::read::GzDecoder;
use hershey_text_core::{Error, Result};

include!(concat!(env!("OUT_DIR"), "/builtin_fonts.rs"));

static BUILT_IN_ARCHIVE: &str = include_str!(concat!(env!("OUT_DIR"), "/builtin_fonts.b64"));

/// Names of the fonts bundled with this release.
///
/// The order is not stable across releases.
pub fn available_built_in_names() -> Vec<String> {
    BUILT_IN_FONT_NAMES.iter().map(|name| name.to_string()).collect()
}

/// The font picked when no name is given: currently the first bundled name.
pub(crate) fn default_name() -> Option<&'static str> {
    BUILT_IN_FONT_NAMES.first().copied()
}

/// The JHF text of the built-in font `name`.
pub(crate) fn read_built_in(name: &str) -> Result<String> {
    if !BUILT_IN_FONT_NAMES.contains(&name) {
        return Err(Error::UnknownFontIdentifier {
            name: name.to_owned(),
        });
    }

    extract(BUILT_IN_ARCHIVE, name).map_err(|source| Error::BuiltInData {
        name: name.to_owned(),
        source,
    })
}

fn extract(encoded: &str, name: &str) -> io::Result<String> {
    let compressed = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

    let mut archive = tar::Archive::new(GzDecoder::new(compressed.as_slice()));

    for entry in archive.entries()? {
        let mut entry = entry?;

        if entry.path()?.as_ref() == Path::new(name) {
            log::debug!("Extracting built-in font '{}' ({} bytes)", name, entry.size());
            let mut text = String::new();
            entry.read_to_string(&mut text)?;
            return Ok(text);
        }
    }

    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("'{name}' is missing from the archive"),
    ))
}
