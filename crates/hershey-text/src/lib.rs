//! `hershey-text` is a library for drawing text to a vector output using
//! Hershey stroke fonts.
//!
//! This can be used for drawing text to plotters, engravers, laser displays,
//! XY oscilloscopes, or for other purposes! Text is rendered one line at a
//! time into glyphs, strokes, or line segments.
//!
//! Fonts are decoded from the JHF format by [hershey_text_fonts]; a set of
//! fonts is built in. A [TextRenderer] owns one font and one set of
//! [RenderOptions], e.g.:
//!
//! ```
//! use hershey_text::TextRenderer;
//!
//! let mut renderer = TextRenderer::default();
//! renderer.load_built_in("futural").unwrap();
//! renderer.normalize_upright(10.0);
//!
//! for (start, end) in renderer.lines_for_text("Hello World!").unwrap() {
//!     println!("{:?} -> {:?}", start, end);
//! }
//! ```
//!
//! The free functions in [render] and [normalize()] do the same work on a
//! borrowed [FontTable] and [RenderOptions], for callers that manage those
//! themselves.

use std::path::Path;

pub use hershey_text_core::{
    Error, FontMetrics, Glyph, LineFault, PackedPoint, Point, RenderOptions, Result, Stroke,
};
pub use hershey_text_fonts::{DecodeOptions, FontTable, LineIssue, available_built_in_names};

pub mod normalize;
pub mod render;

pub use normalize::{DEFAULT_SAMPLE_TEXT, normalize};
pub use render::{Glyphs, Lines, RenderedGlyph, Strokes};

/// Renders text with one loaded font and one set of options.
///
/// Instances share nothing; use one per typeface. Loading a font replaces
/// the current one only once the new font decoded successfully.
#[derive(Debug, Clone, Default)]
pub struct TextRenderer {
    font: FontTable,
    options: RenderOptions,
}

impl TextRenderer {
    pub fn new(font: FontTable) -> Self {
        Self::with_options(font, RenderOptions::default())
    }

    pub fn with_options(font: FontTable, options: RenderOptions) -> Self {
        Self { font, options }
    }

    /// Load a built-in font by name and return the name.
    pub fn load_built_in(&mut self, name: &str) -> Result<&str> {
        self.font = FontTable::built_in(name)?;
        Ok(self.font.name())
    }

    /// Load the default built-in font and return its name.
    ///
    /// Convenience only: which font is the default may change between
    /// releases. Use [TextRenderer::load_built_in] for reproducible output.
    pub fn load_default_built_in(&mut self) -> Result<&str> {
        self.font = FontTable::default_built_in()?;
        Ok(self.font.name())
    }

    /// Load a JHF font file, skipping malformed glyph lines.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.font = FontTable::from_file(path, &DecodeOptions::default())?;
        Ok(())
    }

    /// Load JHF lines from memory, skipping malformed glyph lines.
    pub fn load_lines<I, S>(&mut self, name: &str, lines: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.load_lines_with(name, lines, &DecodeOptions::default())
    }

    pub fn load_lines_with<I, S>(
        &mut self,
        name: &str,
        lines: I,
        options: &DecodeOptions,
    ) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.font = FontTable::from_lines(name, lines, options)?;
        Ok(())
    }

    pub fn font(&self) -> &FontTable {
        &self.font
    }

    pub fn set_font(&mut self, font: FontTable) {
        self.font = font;
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut RenderOptions {
        &mut self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    /// See [render::glyphs_for_text].
    pub fn glyphs_for_text<'a>(&'a self, text: &'a str) -> Result<Glyphs<'a>> {
        render::glyphs_for_text(&self.font, &self.options, text)
    }

    /// See [render::strokes_for_text].
    pub fn strokes_for_text<'a>(&'a self, text: &'a str) -> Result<Strokes<'a>> {
        render::strokes_for_text(&self.font, &self.options, text)
    }

    /// See [render::lines_for_text].
    pub fn lines_for_text<'a>(&'a self, text: &'a str) -> Result<Lines<'a>> {
        render::lines_for_text(&self.font, &self.options, text)
    }

    /// Fit `sample` (or [DEFAULT_SAMPLE_TEXT]) into `target_size` with its
    /// bounding box starting at the origin, and keep the resulting options.
    ///
    /// See [normalize()] for how repeated calls behave.
    pub fn normalize(&mut self, target_size: f64, sample: Option<&str>) -> Result<&RenderOptions> {
        self.normalize_with_anchor(target_size, sample, Point::default())
    }

    pub fn normalize_with_anchor(
        &mut self,
        target_size: f64,
        sample: Option<&str>,
        anchor: Point,
    ) -> Result<&RenderOptions> {
        self.options = normalize(&self.font, &self.options, target_size, sample, anchor)?;
        Ok(&self.options)
    }

    /// Switch to upright (y-up) output where the font's cap line to bottom
    /// line distance is `size`, and the bottom line sits at `y = 0`.
    /// Spacing and rotation are kept.
    pub fn normalize_upright(&mut self, size: f64) -> &RenderOptions {
        self.options = self.options.upright(self.font.metrics(), size);
        &self.options
    }
}
