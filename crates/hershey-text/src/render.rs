//! Turning text into positioned geometry.
//!
//! All three entry points walk the text the same way, one character at a
//! time, with a horizontal cursor starting at zero. For every point of a
//! glyph the pipeline is:
//!
//! 1. shift so the glyph's left extent is its origin
//! 2. scale (mirroring included)
//! 3. rotate about the glyph origin
//! 4. translate by the cursor, then by the offset
//!
//! after which the cursor advances by the scaled glyph width plus the
//! letter spacing. Characters missing from the font advance by the letter
//! spacing alone.
//!
//! The sequences are lazy and borrow the font and options for their whole
//! lifetime. Calling the same function again restarts from the beginning.

use std::{iter::FusedIterator, str::Chars};

use hershey_text_core::{Error, PackedPoint, Point, RenderOptions, Result};
use hershey_text_fonts::FontTable;

/// One input character after placement.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGlyph {
    pub character: char,
    /// Character code the glyph was looked up with.
    pub code: u32,
    /// Cursor position at which this character starts (before the offset).
    pub cursor: f64,
    /// Distance the cursor moves past this character.
    pub advance: f64,
    /// Positioned strokes. Empty for characters the font lacks.
    pub strokes: Vec<Vec<Point>>,
}

fn is_line_break(character: char) -> bool {
    matches!(
        character,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn check_single_line(text: &str) -> Result<()> {
    match text.char_indices().find(|&(_, c)| is_line_break(c)) {
        Some((offset, _)) => Err(Error::UnsupportedMultilineText { offset }),
        None => Ok(()),
    }
}

/// Lazy sequence of [RenderedGlyph]s, one per input character.
#[derive(Debug, Clone)]
pub struct Glyphs<'a> {
    font: &'a FontTable,
    options: &'a RenderOptions,
    chars: Chars<'a>,
    cursor: f64,
    scale: (f64, f64),
    rotation: (f64, f64),
}

impl<'a> Glyphs<'a> {
    fn new(font: &'a FontTable, options: &'a RenderOptions, text: &'a str) -> Self {
        Self {
            font,
            options,
            chars: text.chars(),
            cursor: 0.0,
            scale: (options.effective_scale_x(), options.effective_scale_y()),
            rotation: options.rotation_degrees.to_radians().sin_cos(),
        }
    }

    fn place(&self, point: PackedPoint, left: i8) -> Point {
        let (sx, sy) = self.scale;
        let (sin, cos) = self.rotation;

        let x = (f64::from(point.x) - f64::from(left)) * sx;
        let y = f64::from(point.y) * sy;

        Point::new(
            x * cos - y * sin + self.cursor + self.options.offset_x,
            x * sin + y * cos + self.options.offset_y,
        )
    }
}

impl Iterator for Glyphs<'_> {
    type Item = RenderedGlyph;

    fn next(&mut self) -> Option<RenderedGlyph> {
        let character = self.chars.next()?;
        let code = u32::from(character);

        let (strokes, width) = match self.font.lookup(code) {
            Some(glyph) => (
                glyph
                    .strokes
                    .iter()
                    .map(|stroke| stroke.iter().map(|&p| self.place(p, glyph.left)).collect())
                    .collect(),
                glyph.char_width(),
            ),
            None => (Vec::new(), 0),
        };

        let advance = f64::from(width) * self.scale.0 + self.options.letter_spacing;
        let rendered = RenderedGlyph {
            character,
            code,
            cursor: self.cursor,
            advance,
            strokes,
        };

        self.cursor += advance;

        Some(rendered)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl FusedIterator for Glyphs<'_> {}

/// Lazy sequence of positioned strokes, glyph boundaries flattened away.
#[derive(Debug, Clone)]
pub struct Strokes<'a> {
    glyphs: Glyphs<'a>,
    current: std::vec::IntoIter<Vec<Point>>,
}

impl Iterator for Strokes<'_> {
    type Item = Vec<Point>;

    fn next(&mut self) -> Option<Vec<Point>> {
        loop {
            if let Some(stroke) = self.current.next() {
                return Some(stroke);
            }
            self.current = self.glyphs.next()?.strokes.into_iter();
        }
    }
}

impl FusedIterator for Strokes<'_> {}

/// Lazy sequence of line segments. A stroke of `n` points gives `n - 1` segments.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    strokes: Strokes<'a>,
    current: Vec<Point>,
    index: usize,
}

impl Iterator for Lines<'_> {
    type Item = (Point, Point);

    fn next(&mut self) -> Option<(Point, Point)> {
        loop {
            if self.index + 1 < self.current.len() {
                let segment = (self.current[self.index], self.current[self.index + 1]);
                self.index += 1;
                return Some(segment);
            }
            self.current = self.strokes.next()?;
            self.index = 0;
        }
    }
}

impl FusedIterator for Lines<'_> {}

/// Render `text` glyph by glyph.
///
/// Fails with [Error::UnsupportedMultilineText] before producing anything if
/// the text contains a line break.
pub fn glyphs_for_text<'a>(
    font: &'a FontTable,
    options: &'a RenderOptions,
    text: &'a str,
) -> Result<Glyphs<'a>> {
    check_single_line(text)?;
    Ok(Glyphs::new(font, options, text))
}

/// Render `text` as a flat sequence of strokes.
pub fn strokes_for_text<'a>(
    font: &'a FontTable,
    options: &'a RenderOptions,
    text: &'a str,
) -> Result<Strokes<'a>> {
    Ok(Strokes {
        glyphs: glyphs_for_text(font, options, text)?,
        current: Vec::new().into_iter(),
    })
}

/// Render `text` as a flat sequence of line segments.
pub fn lines_for_text<'a>(
    font: &'a FontTable,
    options: &'a RenderOptions,
    text: &'a str,
) -> Result<Lines<'a>> {
    Ok(Lines {
        strokes: strokes_for_text(font, options, text)?,
        current: Vec::new(),
        index: 0,
    })
}

/// Bounding box `(min, max)` of every point `text` renders to,
/// or `None` if it renders no points.
pub fn bounding_box(
    font: &FontTable,
    options: &RenderOptions,
    text: &str,
) -> Result<Option<(Point, Point)>> {
    let mut points = strokes_for_text(font, options, text)?.flatten();

    let Some(first) = points.next() else {
        return Ok(None);
    };

    Ok(Some(points.fold((first, first), |(min, max), p| {
        (
            Point::new(min.x.min(p.x), min.y.min(p.y)),
            Point::new(max.x.max(p.x), max.y.max(p.y)),
        )
    })))
}
