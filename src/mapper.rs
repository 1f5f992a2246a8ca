//! Display-space ⇄ media-space conversion.
//!
//! Display space is the letterboxed preview the user drags on; media space
//! is the full-resolution image or video frame. Scale factors are derived on
//! demand from the current bounds and the media's pixel size.

use crate::geometry::{Rect, RectF, Size};
use crate::model::CropRectModel;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    bounds: Rect,
    media: Size,
}

impl CoordinateMapper {
    pub fn new(bounds: Rect, media: Size) -> Self {
        Self { bounds, media }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn media_size(&self) -> Size {
        self.media
    }

    /// `(media / bounds)` per axis, or `None` before layout.
    pub fn scale_factors(&self) -> Option<(f64, f64)> {
        if self.bounds.is_empty() || !self.media.is_valid() {
            return None;
        }
        Some((
            self.media.width as f64 / self.bounds.width as f64,
            self.media.height as f64 / self.bounds.height as f64,
        ))
    }

    /// Map a display rectangle onto media pixels. Identity while the bounds
    /// are still empty.
    pub fn to_media_space(&self, rect: Rect) -> Rect {
        let Some((sx, sy)) = self.scale_factors() else {
            return rect;
        };
        self.scale_to_media(rect.to_f64(), sx, sy)
    }

    /// Like [`to_media_space`](Self::to_media_space) for a float rectangle,
    /// rounded only once in media pixels.
    pub fn to_media_space_f(&self, rect: RectF) -> Rect {
        match self.scale_factors() {
            Some((sx, sy)) => self.scale_to_media(rect, sx, sy),
            None => rect.round(),
        }
    }

    fn scale_to_media(&self, rect: RectF, sx: f64, sy: f64) -> Rect {
        Rect::new(
            ((rect.x - self.bounds.x as f64) * sx).round() as i32,
            ((rect.y - self.bounds.y as f64) * sy).round() as i32,
            (rect.width * sx).round() as i32,
            (rect.height * sy).round() as i32,
        )
    }

    /// Inverse of [`to_media_space`](Self::to_media_space).
    pub fn to_display_space(&self, rect: Rect) -> Rect {
        let Some((sx, sy)) = self.scale_factors() else {
            return rect;
        };
        Rect::new(
            self.bounds.x + (rect.x as f64 / sx).round() as i32,
            self.bounds.y + (rect.y as f64 / sy).round() as i32,
            (rect.width as f64 / sx).round() as i32,
            (rect.height as f64 / sy).round() as i32,
        )
    }

    /// Rescale the model proportionally after the preview changed size. The
    /// mapper must already hold the new bounds; scaling is about their origin.
    ///
    /// The first layout (`old` not valid) leaves the rectangle alone. Returns
    /// whether the observed rectangle changed.
    pub fn on_viewport_resized(&self, old: Size, new: Size, model: &mut CropRectModel) -> bool {
        if !old.is_valid() {
            tracing::debug!(?new, "first layout, no rescale");
            return false;
        }
        let scale_x = new.width as f64 / old.width as f64;
        let scale_y = new.height as f64 / old.height as f64;
        tracing::debug!(scale_x, scale_y, "rescaling crop rectangle");
        model.rescale(self.bounds.origin(), scale_x, scale_y)
    }
}

/// Fit `media` inside `container` keeping its aspect ratio, centred.
pub fn fit_bounds(container: Size, media: Size) -> Rect {
    if !container.is_valid() || !media.is_valid() {
        return Rect::default();
    }
    let (cw, ch) = (container.width as i64, container.height as i64);
    let (mw, mh) = (media.width as i64, media.height as i64);

    // Height fills when the media is relatively taller than the container.
    let (w, h) = if mw * ch <= cw * mh {
        (mw * ch / mh, ch)
    } else {
        (cw, mh * cw / mw)
    };
    let (w, h) = (w as i32, h as i32);
    Rect::new(
        (container.width - w) / 2,
        (container.height - h) / 2,
        w,
        h,
    )
}
