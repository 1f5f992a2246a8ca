//! Pointer gesture interpretation.
//!
//! A gesture is `Idle -> Pressed(handle) -> Idle`. While pressed, every
//! candidate is computed from the snapshot taken at pointer-down and the
//! cumulative pointer delta, never from the previous frame.

use crate::geometry::{Point, Rect, RectF};
use crate::model::Constraints;
use crate::solver::{self, Corner};

pub const DEFAULT_HANDLE_SIZE: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    Move,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Handle {
    pub fn corner(self) -> Option<Corner> {
        match self {
            Handle::Move => None,
            Handle::TopLeft => Some(Corner::TopLeft),
            Handle::TopRight => Some(Corner::TopRight),
            Handle::BottomLeft => Some(Corner::BottomLeft),
            Handle::BottomRight => Some(Corner::BottomRight),
        }
    }
}

impl From<Corner> for Handle {
    fn from(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => Handle::TopLeft,
            Corner::TopRight => Handle::TopRight,
            Corner::BottomLeft => Handle::BottomLeft,
            Corner::BottomRight => Handle::BottomRight,
        }
    }
}

/// Lives for one gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragState {
    pub handle: Handle,
    pub start_pointer: Point,
    pub start_rect: Rect,
}

#[derive(Clone, Debug)]
pub struct DragController {
    state: Option<DragState>,
    handle_size: i32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_HANDLE_SIZE)
    }
}

impl DragController {
    pub fn new(handle_size: i32) -> Self {
        Self {
            state: None,
            handle_size: handle_size.max(1),
        }
    }

    pub fn state(&self) -> Option<&DragState> {
        self.state.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// Which handle a press at `pos` would grab, if any.
    ///
    /// Corner hit-boxes are `handle_size` squares centred on each corner; the
    /// pointer must also be inside `rect` itself.
    pub fn hit_test(&self, pos: Point, rect: Rect) -> Option<Handle> {
        if !rect.contains(pos) {
            return None;
        }
        let half = self.handle_size / 2;
        Corner::ALL
            .into_iter()
            .find(|corner| {
                let c = corner.point_on(&rect);
                Rect::new(c.x - half, c.y - half, self.handle_size, self.handle_size).contains(pos)
            })
            .map(Handle::from)
            .or(Some(Handle::Move))
    }

    /// Pointer-down. Starts a gesture unless `pos` is outside `rect`.
    pub fn press(&mut self, pos: Point, rect: Rect) -> Option<Handle> {
        let handle = self.hit_test(pos, rect);
        self.state = handle.map(|handle| DragState {
            handle,
            start_pointer: pos,
            start_rect: rect,
        });
        if let Some(handle) = handle {
            tracing::debug!(?handle, ?pos, "gesture started");
        }
        handle
    }

    /// Pointer-move. Returns the solved candidate, or `None` when idle.
    pub fn drag(&self, pos: Point, bounds: Rect, constraints: &Constraints) -> Option<RectF> {
        let state = self.state?;
        let delta = pos - state.start_pointer;
        let solved = match state.handle.corner() {
            None => solver::solve_move(
                state.start_rect.to_f64().translated(delta.x as f64, delta.y as f64),
                bounds,
            ),
            Some(corner) => solver::solve_resize(state.start_rect, corner, delta, bounds, constraints),
        };
        Some(solved)
    }

    /// Pointer-up. Ends the gesture and hands back its snapshot.
    pub fn release(&mut self) -> Option<DragState> {
        let state = self.state.take();
        if let Some(state) = &state {
            tracing::debug!(handle = ?state.handle, "gesture ended");
        }
        state
    }
}
