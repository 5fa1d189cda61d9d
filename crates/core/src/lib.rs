//! `hershey-text-core` provides core primitives for the `hershey-text` crate:
//! glyph geometry, font metrics, rendering options and the shared error type.

mod error;
mod options;

pub use error::{Error, LineFault, Result};
pub use options::RenderOptions;

/// A point, in compact representation.
/// Used to store the points which make up an individual glyph, in font-native units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PackedPoint {
    /// X coordinate of this point, increasing to the right
    pub x: i8,
    /// Y coordinate of this point, increasing downwards
    pub y: i8,
}

impl PackedPoint {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// One continuous pen-down path through font-native points.
pub type Stroke = Vec<PackedPoint>;

/// Representation of a point with floating point range, used for the output
/// of text rendering after scaling, rotation and translation.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single glyph (character) contained within a font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Character code this glyph is stored under
    pub code: u32,
    /// Glyph number found in the source data, if it could be read.
    /// Informational only; glyphs are never keyed by it.
    pub source_id: Option<u32>,
    /// Left coordinate boundary of this glyph
    pub left: i8,
    /// Right coordinate boundary of this glyph
    pub right: i8,
    /// Strokes which make up this glyph, in drawing order
    pub strokes: Vec<Stroke>,
}

impl Glyph {
    /// Horizontal advance of this glyph. May differ from the width of [Glyph::draw_box].
    pub fn char_width(&self) -> i32 {
        i32::from(self.right) - i32::from(self.left)
    }

    /// Bounding box of the stroke geometry as `(min, max)` corners,
    /// or `None` when the glyph has no points at all (e.g. space).
    pub fn draw_box(&self) -> Option<(PackedPoint, PackedPoint)> {
        let mut points = self.strokes.iter().flatten();
        let first = *points.next()?;

        Some(points.fold((first, first), |(min, max), p| {
            (
                PackedPoint::new(min.x.min(p.x), min.y.min(p.y)),
                PackedPoint::new(max.x.max(p.x), max.y.max(p.y)),
            )
        }))
    }

    /// Typographic box as `(min, max)` corners: the left and right extents
    /// across from the cap line to the bottom line of `metrics`.
    ///
    /// Unlike [Glyph::draw_box] this does not depend on the strokes, so
    /// strokes may reach outside it.
    pub fn char_box(&self, metrics: &FontMetrics) -> (Point, Point) {
        (
            Point::new(f64::from(self.left), metrics.cap_line),
            Point::new(f64::from(self.right), metrics.bottom_line),
        )
    }

    /// Untransformed line segments of this glyph, stroke by stroke.
    pub fn segments(&self) -> impl Iterator<Item = (PackedPoint, PackedPoint)> + '_ {
        self.strokes
            .iter()
            .flat_map(|stroke| stroke.windows(2).map(|pair| (pair[0], pair[1])))
    }
}

/// Vertical reference lines of a font, in font-native units (y down).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    /// Top of a capital letter
    pub cap_line: f64,
    /// Bottom of a capital letter
    pub base_line: f64,
    /// Lowest point of a descender
    pub bottom_line: f64,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            cap_line: -12.0,
            base_line: 9.0,
            bottom_line: 16.0,
        }
    }
}

impl FontMetrics {
    /// The metrics as they land in output space under the given options.
    pub fn scaled(&self, options: &RenderOptions) -> Self {
        let sy = options.effective_scale_y();
        Self {
            cap_line: self.cap_line * sy,
            base_line: self.base_line * sy,
            bottom_line: self.bottom_line * sy,
        }
    }
}
