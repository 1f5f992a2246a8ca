//! Constraint correction for proposed crop rectangles.
//!
//! Every function here is pure: it takes a proposal plus the current bounds
//! and [`Constraints`] and returns the corrected rectangle. When bounds and
//! minimum size cannot both hold (bounds smaller than the minimum), the
//! minimum wins and the result sticks out of the bounds.

use crate::geometry::{Point, Rect, RectF};
use crate::model::Constraints;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HEdge {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VEdge {
    Top,
    Bottom,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    fn h_edge(self) -> HEdge {
        match self {
            Self::TopLeft | Self::BottomLeft => HEdge::Left,
            Self::TopRight | Self::BottomRight => HEdge::Right,
        }
    }

    fn v_edge(self) -> VEdge {
        match self {
            Self::TopLeft | Self::TopRight => VEdge::Top,
            Self::BottomLeft | Self::BottomRight => VEdge::Bottom,
        }
    }

    /// Position of this corner on `rect`.
    pub fn point_on(self, rect: &Rect) -> Point {
        let x = match self.h_edge() {
            HEdge::Left => rect.left(),
            HEdge::Right => rect.right(),
        };
        let y = match self.v_edge() {
            VEdge::Top => rect.top(),
            VEdge::Bottom => rect.bottom(),
        };
        Point::new(x, y)
    }
}

/// Slide a same-size rectangle back inside `bounds`.
pub fn solve_move(candidate: RectF, bounds: Rect) -> RectF {
    let x = clamp_span(
        candidate.x,
        candidate.width,
        bounds.left() as f64,
        bounds.right() as f64,
    );
    let y = clamp_span(
        candidate.y,
        candidate.height,
        bounds.top() as f64,
        bounds.bottom() as f64,
    );
    RectF::new(x, y, candidate.width, candidate.height)
}

// The far edge is applied first, so a span longer than the bounds stays
// anchored at `lo` and overflows past `hi`.
fn clamp_span(start: f64, len: f64, lo: f64, hi: f64) -> f64 {
    start.min(hi - len).max(lo)
}

/// Resize `start` by dragging `corner` by `delta`; the opposite corner stays put.
pub fn solve_resize(
    start: Rect,
    corner: Corner,
    delta: Point,
    bounds: Rect,
    constraints: &Constraints,
) -> RectF {
    match constraints.aspect_ratio {
        None => resize_free(start, corner, delta, bounds, constraints),
        Some(ratio) => resize_locked(start, corner, delta, bounds, ratio, constraints),
    }
}

fn resize_free(
    start: Rect,
    corner: Corner,
    delta: Point,
    bounds: Rect,
    constraints: &Constraints,
) -> RectF {
    let min_w = constraints.min_width_f();
    let min_h = constraints.min_height_f();

    let (left, right) = match corner.h_edge() {
        HEdge::Left => {
            let fixed = start.right() as f64;
            let edge = (start.left() + delta.x) as f64;
            (edge.max(bounds.left() as f64).min(fixed - min_w), fixed)
        }
        HEdge::Right => {
            let fixed = start.left() as f64;
            let edge = (start.right() + delta.x) as f64;
            (fixed, edge.min(bounds.right() as f64).max(fixed + min_w))
        }
    };
    let (top, bottom) = match corner.v_edge() {
        VEdge::Top => {
            let fixed = start.bottom() as f64;
            let edge = (start.top() + delta.y) as f64;
            (edge.max(bounds.top() as f64).min(fixed - min_h), fixed)
        }
        VEdge::Bottom => {
            let fixed = start.top() as f64;
            let edge = (start.bottom() + delta.y) as f64;
            (fixed, edge.min(bounds.bottom() as f64).max(fixed + min_h))
        }
    };

    RectF::new(left, top, right - left, bottom - top)
}

fn resize_locked(
    start: Rect,
    corner: Corner,
    delta: Point,
    bounds: Rect,
    ratio: f64,
    constraints: &Constraints,
) -> RectF {
    // The anchor is the corner diagonally opposite the dragged one.
    let dragged = corner.point_on(&start);
    let (anchor_x, pointer_w, budget_w) = match corner.h_edge() {
        HEdge::Left => {
            let anchor = start.right();
            (anchor, anchor - (dragged.x + delta.x), anchor - bounds.left())
        }
        HEdge::Right => {
            let anchor = start.left();
            (anchor, dragged.x + delta.x - anchor, bounds.right() - anchor)
        }
    };
    let (anchor_y, pointer_h, budget_h) = match corner.v_edge() {
        VEdge::Top => {
            let anchor = start.bottom();
            (anchor, anchor - (dragged.y + delta.y), anchor - bounds.top())
        }
        VEdge::Bottom => {
            let anchor = start.top();
            (anchor, dragged.y + delta.y - anchor, bounds.bottom() - anchor)
        }
    };

    let (width, height) = aspect_size(
        pointer_w.max(0) as f64,
        pointer_h.max(0) as f64,
        budget_w.max(0) as f64,
        budget_h.max(0) as f64,
        ratio,
        constraints,
    );

    let x = match corner.h_edge() {
        HEdge::Left => anchor_x as f64 - width,
        HEdge::Right => anchor_x as f64,
    };
    let y = match corner.v_edge() {
        VEdge::Top => anchor_y as f64 - height,
        VEdge::Bottom => anchor_y as f64,
    };
    RectF::new(x, y, width, height)
}

/// Pick a `ratio`-shaped size for a pointer-implied `proposed_w` x `proposed_h`
/// box, limited to `max_w` x `max_h` and floored at the minimum size.
///
/// Width drives when the height it implies covers the proposed height;
/// otherwise height drives. Ties go to width. The chosen size is then shrunk
/// uniformly until it fits the budget, and finally grown to the minimum.
/// Width and height are rounded to whole pixels.
pub fn aspect_size(
    proposed_w: f64,
    proposed_h: f64,
    max_w: f64,
    max_h: f64,
    ratio: f64,
    constraints: &Constraints,
) -> (f64, f64) {
    let height_from_width = proposed_w / ratio;
    let width_from_height = proposed_h * ratio;

    let mut width = if height_from_width >= proposed_h {
        proposed_w
    } else {
        width_from_height
    };
    width = width.min(max_w).min(max_h * ratio);
    width = width
        .max(constraints.min_width_f())
        .max(constraints.min_height_f() * ratio);

    let height = width / ratio;
    (width.round(), height.round())
}

/// Correct a programmatically requested rectangle: size first (aspect ratio,
/// bounds, minimum), then position.
pub fn fit(candidate: RectF, bounds: Rect, constraints: &Constraints) -> RectF {
    let max_w = bounds.width.max(0) as f64;
    let max_h = bounds.height.max(0) as f64;

    let (width, height) = match constraints.aspect_ratio {
        Some(ratio) => aspect_size(
            candidate.width,
            candidate.height,
            max_w,
            max_h,
            ratio,
            constraints,
        ),
        None => (
            candidate.width.min(max_w).max(constraints.min_width_f()),
            candidate.height.min(max_h).max(constraints.min_height_f()),
        ),
    };

    solve_move(RectF::new(candidate.x, candidate.y, width, height), bounds)
}

/// The largest `ratio`-shaped rectangle inside `bounds`, centred.
pub fn largest_centered(bounds: Rect, ratio: f64, constraints: &Constraints) -> RectF {
    let max_w = bounds.width.max(0) as f64;
    let max_h = bounds.height.max(0) as f64;
    let (width, height) = aspect_size(max_w, max_h, max_w, max_h, ratio, constraints);
    RectF::new(
        bounds.left() as f64 + ((max_w - width) / 2.0).floor(),
        bounds.top() as f64 + ((max_h - height) / 2.0).floor(),
        width,
        height,
    )
}
