use std::{collections::BTreeMap, fs, path::Path};

use hershey_text_core::{Error, FontMetrics, Glyph, Result};

use crate::{
    builtin,
    decode::{DecodeOptions, LineIssue, decode_lines},
};

/// The decoded glyphs of one typeface, keyed by character code.
///
/// Tables are never merged: every load produces a fresh table, and a failed
/// load produces none.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FontTable {
    name: String,
    glyphs: BTreeMap<u32, Glyph>,
    metrics: FontMetrics,
    issues: Vec<LineIssue>,
}

impl FontTable {
    /// A table without any glyphs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table directly from glyphs, keyed by their [Glyph::code].
    pub fn new(name: impl Into<String>, glyphs: impl IntoIterator<Item = Glyph>) -> Self {
        Self {
            name: name.into(),
            glyphs: glyphs.into_iter().map(|glyph| (glyph.code, glyph)).collect(),
            metrics: FontMetrics::default(),
            issues: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        name: &str,
        glyphs: BTreeMap<u32, Glyph>,
        metrics: FontMetrics,
        issues: Vec<LineIssue>,
    ) -> Self {
        Self {
            name: name.to_owned(),
            glyphs,
            metrics,
            issues,
        }
    }

    /// Replace the font metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Decode one of the fonts bundled with the crate.
    ///
    /// Fails with [Error::UnknownFontIdentifier] if `name` is not one of
    /// [FontTable::available_built_in_names].
    pub fn built_in(name: &str) -> Result<Self> {
        let text = builtin::read_built_in(name)?;
        let table = decode_lines(name, text.lines(), &DecodeOptions::default())?;
        log::debug!("Loaded built-in font '{}'", name);
        Ok(table)
    }

    /// Decode the default built-in font and return it with its name.
    ///
    /// Which font is the default is not part of the API contract and may
    /// change between releases. Prefer [FontTable::built_in] with an
    /// explicit name when output must be reproducible.
    pub fn default_built_in() -> Result<Self> {
        let name = builtin::default_name().ok_or_else(|| Error::UnknownFontIdentifier {
            name: String::new(),
        })?;
        Self::built_in(name)
    }

    /// Names accepted by [FontTable::built_in]. The order is not stable across releases.
    pub fn available_built_in_names() -> Vec<String> {
        builtin::available_built_in_names()
    }

    /// Decode a JHF file. The table is named after the file stem.
    pub fn from_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Self> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| Error::FileAccessFailure {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::debug!("Loading font file {}", path.display());
        decode_lines(&name, text.lines(), options)
    }

    /// Decode JHF lines already in memory.
    pub fn from_lines<I, S>(name: &str, lines: I, options: &DecodeOptions) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        decode_lines(name, lines, options)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Lines skipped during a lenient decode.
    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }

    /// The glyph stored for `code`, if any.
    pub fn lookup(&self, code: u32) -> Option<&Glyph> {
        self.glyphs.get(&code)
    }

    pub fn lookup_char(&self, character: char) -> Option<&Glyph> {
        self.lookup(u32::from(character))
    }

    /// All glyphs in ascending code order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.glyphs.values()
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use hershey_text_core::PackedPoint;

    use super::*;

    #[test]
    fn test_new_keys_by_code() {
        let table = FontTable::new(
            "manual",
            [Glyph {
                code: 65,
                source_id: None,
                left: 0,
                right: 10,
                strokes: vec![vec![PackedPoint::new(0, 0), PackedPoint::new(0, 10)]],
            }],
        );

        assert_eq!(table.name(), "manual");
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup_char('A').map(|g| g.right), Some(10));
        assert!(table.lookup_char('B').is_none());
    }

    #[test]
    fn test_empty_table() {
        let table = FontTable::empty();
        assert!(table.is_empty());
        assert!(table.lookup(32).is_none());
        assert!(table.issues().is_empty());
    }
}
