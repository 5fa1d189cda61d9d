use serde::{Deserialize, Serialize};

use crate::FontMetrics;

/// Controls how glyph geometry is placed in output space.
///
/// A render call borrows the options for as long as its lazy sequence lives,
/// so they cannot change while geometry is being produced. Change them between
/// calls instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Horizontal multiplier. Negative values mirror.
    pub scale_x: f64,
    /// Vertical multiplier. Negative values mirror.
    pub scale_y: f64,
    /// Horizontal translation, applied after scaling and rotation.
    pub offset_x: f64,
    /// Vertical translation, applied after scaling and rotation.
    pub offset_y: f64,
    /// Counter-clockwise (in a y-up frame) rotation of each glyph about its
    /// own origin. The baseline itself stays horizontal.
    pub rotation_degrees: f64,
    /// Extra space added after every character, in output units.
    pub letter_spacing: f64,
    /// Extra space between lines. Reserved; single-line rendering ignores it.
    pub line_spacing: f64,
    /// Same as negating `scale_x`.
    pub mirror_x: bool,
    /// Same as negating `scale_y`.
    pub mirror_y: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
            rotation_degrees: 0.0,
            letter_spacing: 0.0,
            line_spacing: 0.0,
            mirror_x: false,
            mirror_y: false,
        }
    }
}

impl RenderOptions {
    /// `scale_x` with `mirror_x` folded in.
    pub fn effective_scale_x(&self) -> f64 {
        if self.mirror_x { -self.scale_x } else { self.scale_x }
    }

    /// `scale_y` with `mirror_y` folded in.
    pub fn effective_scale_y(&self) -> f64 {
        if self.mirror_y { -self.scale_y } else { self.scale_y }
    }

    /// A copy of these options that draws text upright in a y-up frame, `size` units from the
    /// cap line to the bottom line, with the bottom line at `y = 0`.
    ///
    /// Only scale and offset change. The mirror flags are cleared since the
    /// new scale already fixes the orientation; rotation and spacing are kept.
    pub fn upright(&self, metrics: &FontMetrics, size: f64) -> Self {
        let scale = size / (metrics.bottom_line - metrics.cap_line);

        Self {
            scale_x: scale,
            scale_y: -scale,
            offset_x: 0.0,
            offset_y: metrics.bottom_line * scale,
            mirror_x: false,
            mirror_y: false,
            ..self.clone()
        }
    }
}
