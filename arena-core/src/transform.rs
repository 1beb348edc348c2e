//! Pure 2D helpers plus the incremental transform state each robot icon carries.
//!
//! Icon geometry is never kept in an untransformed form. Instead every adjustment is
//! applied as a delta on top of whatever is already baked into the coordinates, and
//! [`TransformState`] remembers how much has been baked in so far.

use crate::error::{ArenaError, Result};
use crate::geometry::{Point, Size};

/// Rotation the authored icon geometry already represents.
pub const NEUTRAL_ROTATION_DEG: f64 = 90.0;

/// Rotates `point` about the origin by `delta_deg` degrees.
pub fn rotate_point(point: Point, delta_deg: f64) -> Point {
    let (sin, cos) = delta_deg.to_radians().sin_cos();
    Point::new(
        point.x * cos - point.y * sin,
        point.x * sin + point.y * cos,
    )
}

/// Uniform scale that fits a `map_size` square inside `display`.
pub fn scale_ratio(display: Size, map_size: f64) -> f64 {
    display.width.min(display.height) / map_size
}

/// Display-space offset of the logical origin: the scaled map center, plus half the
/// surplus of whichever display axis is longer so the square stays centered.
pub fn center_offset(display: Size, map_center: Point, ratio: f64) -> Point {
    let mut offset = map_center * ratio;
    if display.height > display.width {
        offset.y += (display.height - display.width) / 2.0;
    } else {
        offset.x += (display.width - display.height) / 2.0;
    }
    offset
}

pub fn check_scale_ratio(ratio: f64) -> Result<()> {
    if ratio.is_finite() && ratio > 0.0 {
        Ok(())
    } else {
        Err(ArenaError::InvalidScaleRatio { ratio })
    }
}

pub fn check_heading(theta_deg: f64) -> Result<()> {
    if theta_deg.is_finite() {
        Ok(())
    } else {
        Err(ArenaError::InvalidHeading { theta_deg })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    scale_ratio: f64,
    rotation_deg: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            scale_ratio: 1.0,
            rotation_deg: NEUTRAL_ROTATION_DEG,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale_ratio(&self) -> f64 {
        self.scale_ratio
    }

    pub fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Commits `new_ratio` and returns the factor to multiply the current geometry by.
    /// Geometry is only ever stored transformed, so a bad ratio is refused up front.
    pub fn rescale_to(&mut self, new_ratio: f64) -> Result<f64> {
        check_scale_ratio(new_ratio)?;
        let adjustment = new_ratio / self.scale_ratio;
        self.scale_ratio = new_ratio;
        Ok(adjustment)
    }

    /// Commits `theta_deg` and returns the rotation to apply to the current geometry,
    /// or `None` when the heading is unchanged. Screen y grows downward, so the delta is
    /// negated to keep logical counter-clockwise turns counter-clockwise on screen.
    pub fn rotate_to(&mut self, theta_deg: f64) -> Result<Option<f64>> {
        check_heading(theta_deg)?;
        if theta_deg == self.rotation_deg {
            return Ok(None);
        }
        let delta = -(theta_deg - self.rotation_deg);
        self.rotation_deg = theta_deg;
        Ok(Some(delta))
    }
}
