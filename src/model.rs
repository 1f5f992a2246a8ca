//! The crop rectangle and its constraint settings.
//!
//! The model keeps two copies of the rectangle: the integer [`Rect`] that
//! callers observe, and a [`RectF`] shadow that viewport rescales multiply.
//! Rescaling the shadow instead of the rounded value keeps the box from
//! creeping across repeated window resizes.

use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, RectF};
use crate::solver;

pub const DEFAULT_MIN_SIZE: i32 = 20;

/// Active limits on the crop rectangle, in display pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: i32,
    pub min_height: i32,
    /// Width / height, or `None` for free-form.
    pub aspect_ratio: Option<f64>,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_SIZE,
            min_height: DEFAULT_MIN_SIZE,
            aspect_ratio: None,
        }
    }
}

impl Constraints {
    pub(crate) fn min_width_f(&self) -> f64 {
        self.min_width as f64
    }

    pub(crate) fn min_height_f(&self) -> f64 {
        self.min_height as f64
    }
}

#[derive(Clone, Debug)]
pub struct CropRectModel {
    rect: Rect,
    float_rect: RectF,
    constraints: Constraints,
}

impl CropRectModel {
    /// Create a model whose rectangle fills `bounds`.
    pub fn new(bounds: Rect, constraints: Constraints) -> Self {
        Self {
            rect: bounds,
            float_rect: bounds.to_f64(),
            constraints,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn float_rect(&self) -> RectF {
        self.float_rect
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// Takes effect on the next mutation; the current rectangle is left alone.
    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<()> {
        if let Some(r) = ratio {
            if !r.is_finite() || r <= 0.0 {
                return Err(Error::InvalidAspectRatio(r));
            }
        }
        self.constraints.aspect_ratio = ratio;
        Ok(())
    }

    pub fn set_minimum_size(&mut self, width: i32, height: i32) -> Result<()> {
        if width < 1 || height < 1 {
            return Err(Error::InvalidMinimumSize { width, height });
        }
        self.constraints.min_width = width;
        self.constraints.min_height = height;
        Ok(())
    }

    /// Commit a rectangle, optionally correcting it against `bounds` first.
    ///
    /// Returns whether the observed integer rectangle changed. Rejected input
    /// leaves the model untouched.
    pub fn set_rect(&mut self, candidate: RectF, apply_constraints: bool, bounds: Rect) -> Result<bool> {
        if !candidate.is_finite() {
            return Err(Error::NonFinite);
        }
        if candidate.width < 0.0 || candidate.height < 0.0 {
            return Err(Error::InvalidDimensions {
                width: candidate.width,
                height: candidate.height,
            });
        }

        let committed = if apply_constraints {
            solver::fit(candidate, bounds, &self.constraints)
        } else {
            candidate
        };

        Ok(self.replace(committed))
    }

    /// Fill `bounds`, as on the first layout of the preview.
    pub fn reset(&mut self, bounds: Rect) -> bool {
        self.replace(bounds.to_f64())
    }

    /// Shift the rectangle by whole display pixels, e.g. when the preview
    /// moves inside its container.
    pub fn translate(&mut self, dx: i32, dy: i32) -> bool {
        self.replace(self.float_rect.translated(dx as f64, dy as f64))
    }

    /// Scale the float shadow by per-axis factors about `origin` (the preview's
    /// top-left corner) and re-derive the integer rectangle from it.
    ///
    /// The result may fall below the minimum size; the next mutation restores it.
    pub fn rescale(&mut self, origin: Point, scale_x: f64, scale_y: f64) -> bool {
        let (ox, oy) = (origin.x as f64, origin.y as f64);
        let f = self.float_rect;
        self.replace(RectF::new(
            ox + (f.x - ox) * scale_x,
            oy + (f.y - oy) * scale_y,
            f.width * scale_x,
            f.height * scale_y,
        ))
    }

    fn replace(&mut self, float_rect: RectF) -> bool {
        let previous = self.rect;
        self.float_rect = float_rect;
        self.rect = float_rect.round();
        self.rect != previous
    }
}
