//! Error taxonomy shared by the decoder and the renderer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading fonts or rendering text.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested built-in font name is not bundled with this release.
    /// Callers can list the valid names and retry.
    #[error("unknown built-in font '{name}'")]
    UnknownFontIdentifier { name: String },

    /// A glyph line violates the JHF column layout.
    #[error("malformed glyph on line {line}: {fault}")]
    MalformedGlyphLine {
        /// 1-based line number within the source
        line: usize,
        #[source]
        fault: LineFault,
    },

    /// A `#` header line did not hold a valid JSON object.
    #[error("malformed font header on line {line}: {source}")]
    MalformedHeader {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The font file could not be read.
    #[error("failed to read font file '{}': {source}", .path.display())]
    FileAccessFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The embedded font archive could not be decoded.
    #[error("built-in font data for '{name}' is corrupt: {source}")]
    BuiltInData {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Rendering is single-line only.
    #[error("text contains a line break at byte offset {offset}")]
    UnsupportedMultilineText { offset: usize },

    /// Normalization sample text rendered to nothing measurable.
    #[error("sample text has an empty or zero-sized bounding box")]
    DegenerateSample,
}

/// What exactly is wrong with a malformed glyph line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineFault {
    #[error("line is {len} characters long, at least 10 are required")]
    TooShort { len: usize },

    #[error("point count field '{field}' is not a positive integer")]
    InvalidPointCount { field: String },

    #[error("point count {declared} does not match the {available} pairs present")]
    PointCountMismatch { declared: usize, available: usize },

    #[error("character {character:?} in column {column} is out of the encodable range")]
    CharacterOutOfRange { column: usize, character: char },

    #[error("left extent {left} is greater than right extent {right}")]
    InvertedExtents { left: i8, right: i8 },
}

pub type Result<T> = std::result::Result<T, Error>;
