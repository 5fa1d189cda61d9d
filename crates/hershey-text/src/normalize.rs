//! Fitting rendered text into a requested size.

use hershey_text_core::{Error, Point, RenderOptions, Result};
use hershey_text_fonts::FontTable;

use crate::render::bounding_box;

/// Sample used by normalization when the caller gives none.
pub const DEFAULT_SAMPLE_TEXT: &str = "Pack my box with five dozen liquor jugs.";

/// Relative error at which fitting stops.
const FIT_TOLERANCE: f64 = 1e-9;
const MAX_FIT_STEPS: usize = 32;

/// Compute options that fit `sample` into a `target_size` square with the
/// bounding box's minimum corner at `anchor`.
///
/// The sample is measured under `options`, so rotation, mirroring and
/// spacing are all accounted for. The returned options keep those, replace
/// the scale by a uniform one (mirroring folded into its sign, mirror flags
/// cleared) and set the matching offset.
///
/// Letter spacing is in output units and does not grow with the scale, so
/// with spacing set the scale is found iteratively rather than by a single
/// division.
///
/// Every call measures its own sample from scratch. Normalizing once per
/// string will give each string a different scale, so pick one
/// representative sample and normalize once if texts must share a size.
pub fn normalize(
    font: &FontTable,
    options: &RenderOptions,
    target_size: f64,
    sample: Option<&str>,
    anchor: Point,
) -> Result<RenderOptions> {
    let sample = sample.unwrap_or(DEFAULT_SAMPLE_TEXT);
    let sign_x = options.effective_scale_x().signum();
    let sign_y = options.effective_scale_y().signum();

    let at_scale = |scale: f64| RenderOptions {
        scale_x: scale * sign_x,
        scale_y: scale * sign_y,
        offset_x: 0.0,
        offset_y: 0.0,
        mirror_x: false,
        mirror_y: false,
        ..options.clone()
    };
    let measure = |scale: f64| -> Result<(Point, f64)> {
        let (min, max) =
            bounding_box(font, &at_scale(scale), sample)?.ok_or(Error::DegenerateSample)?;
        Ok((min, (max.x - min.x).max(max.y - min.y)))
    };

    let (_, natural) = measure(1.0)?;
    if natural <= 0.0 || !natural.is_finite() {
        return Err(Error::DegenerateSample);
    }

    // secant steps; the extent is piecewise linear in the scale
    let (mut prev_scale, mut prev_extent) = (1.0, natural);
    let mut scale = target_size / natural;
    let (mut min, mut extent) = measure(scale)?;
    for _ in 0..MAX_FIT_STEPS {
        if (extent - target_size).abs() <= FIT_TOLERANCE * target_size.abs().max(1.0) {
            break;
        }

        let slope = (extent - prev_extent) / (scale - prev_scale);
        let next = scale + (target_size - extent) / slope;
        if !next.is_finite() || next <= 0.0 {
            log::warn!(
                "Could not fit '{}' to {}, stopping at extent {}",
                sample,
                target_size,
                extent
            );
            break;
        }

        (prev_scale, prev_extent) = (scale, extent);
        scale = next;
        (min, extent) = measure(scale)?;
    }

    log::debug!(
        "Normalized '{}' from extent {} to {} (scale {})",
        sample,
        natural,
        extent,
        scale
    );

    Ok(RenderOptions {
        offset_x: anchor.x - min.x,
        offset_y: anchor.y - min.y,
        ..at_scale(scale)
    })
}
