//! The crop editor: one owner for the rectangle, the mapping and the gesture.
//!
//! Hosts feed it [`EditorEvent`]s (or call the matching methods) from their
//! UI loop. Every committed change is reported as a [`CropChanged`] in media
//! pixels, both as the return value and to subscribed listeners. Listeners
//! run synchronously and must not call back into the editor.

use crate::drag::{DEFAULT_HANDLE_SIZE, DragController, Handle};
use crate::error::{Error, Result};
use crate::geometry::{Point, Rect, RectF, Size};
use crate::mapper::CoordinateMapper;
use crate::model::{Constraints, CropRectModel};
use crate::solver;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropPhase {
    /// Intermediate commit (drag in progress, field edit, rescale).
    Live,
    /// The gesture finished; downstream consumers may act on it.
    Settled,
}

/// A committed crop, in media pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropChanged {
    pub rect: Rect,
    pub phase: CropPhase,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp(Point),
    ViewportResized { old: Size, new: Size },
    BoundsChanged(Rect),
}

type Listener = Box<dyn FnMut(&CropChanged)>;

pub struct CropEditor {
    model: CropRectModel,
    mapper: CoordinateMapper,
    drag: DragController,
    listeners: Vec<Listener>,
}

impl std::fmt::Debug for CropEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CropEditor")
            .field("model", &self.model)
            .field("mapper", &self.mapper)
            .field("drag", &self.drag)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CropEditor {
    /// Create an editor for `media` once the preview `bounds` are known. The
    /// rectangle starts out covering the whole preview.
    pub fn new(media: Size, bounds: Rect) -> Self {
        Self {
            model: CropRectModel::new(bounds, Constraints::default()),
            mapper: CoordinateMapper::new(bounds, media),
            drag: DragController::new(DEFAULT_HANDLE_SIZE),
            listeners: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Result<Self> {
        self.model
            .set_minimum_size(constraints.min_width, constraints.min_height)?;
        self.model.set_aspect_ratio(constraints.aspect_ratio)?;
        Ok(self)
    }

    pub fn with_handle_size(mut self, handle_size: i32) -> Self {
        self.drag = DragController::new(handle_size);
        self
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&CropChanged) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Display-space crop rectangle.
    pub fn crop_rect(&self) -> Rect {
        self.model.rect()
    }

    /// Crop rectangle in media pixels.
    pub fn media_crop_rect(&self) -> Rect {
        self.mapper.to_media_space_f(self.model.float_rect())
    }

    pub fn bounds(&self) -> Rect {
        self.mapper.bounds()
    }

    pub fn media_size(&self) -> Size {
        self.mapper.media_size()
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn constraints(&self) -> &Constraints {
        self.model.constraints()
    }

    pub fn active_handle(&self) -> Option<Handle> {
        self.drag.state().map(|s| s.handle)
    }

    /// The handle a press at `pos` would grab; for hover cursors.
    pub fn hover_handle(&self, pos: Point) -> Option<Handle> {
        self.drag.hit_test(pos, self.model.rect())
    }

    pub fn handle(&mut self, event: EditorEvent) -> Option<CropChanged> {
        match event {
            EditorEvent::PointerDown(pos) => {
                self.pointer_down(pos);
                None
            }
            EditorEvent::PointerMove(pos) => self.pointer_move(pos),
            EditorEvent::PointerUp(pos) => self.pointer_up(pos),
            EditorEvent::ViewportResized { old, new } => self.viewport_resized(old, new),
            EditorEvent::BoundsChanged(bounds) => self.set_bounds(bounds),
        }
    }

    /// Returns the grabbed handle, or `None` if the press missed the box.
    pub fn pointer_down(&mut self, pos: Point) -> Option<Handle> {
        self.drag.press(pos, self.model.rect())
    }

    pub fn pointer_move(&mut self, pos: Point) -> Option<CropChanged> {
        let candidate = self
            .drag
            .drag(pos, self.mapper.bounds(), self.model.constraints())?;
        self.commit(candidate)
    }

    /// Ends the gesture and reports the settled crop. Ignored when idle.
    pub fn pointer_up(&mut self, _pos: Point) -> Option<CropChanged> {
        self.drag.release()?;
        let change = self.emit(CropPhase::Settled);
        tracing::info!(rect = ?change.rect, "crop settled");
        Some(change)
    }

    /// The preview changed size. The bounds keep their origin.
    pub fn viewport_resized(&mut self, old: Size, new: Size) -> Option<CropChanged> {
        let current = self.mapper.bounds();
        let bounds = Rect::new(current.x, current.y, new.width, new.height);
        self.relayout(current, bounds, old)
    }

    /// Record the host's new preview rectangle. A moved preview carries the
    /// crop along; a resized one rescales it.
    pub fn set_bounds(&mut self, bounds: Rect) -> Option<CropChanged> {
        let current = self.mapper.bounds();
        if current == bounds {
            return None;
        }
        self.relayout(current, bounds, current.size())
    }

    fn relayout(&mut self, current: Rect, bounds: Rect, old: Size) -> Option<CropChanged> {
        if bounds.is_empty() && !current.is_empty() {
            // Collapsed or minimised window; keep the last real layout.
            tracing::debug!(?bounds, "ignoring empty preview bounds");
            return None;
        }
        self.mapper.set_bounds(bounds);
        if bounds.is_empty() {
            return None;
        }
        if current.is_empty() {
            tracing::debug!(?bounds, "first layout, crop fills the preview");
            let changed = self.model.reset(bounds);
            return changed.then(|| self.emit(CropPhase::Live));
        }

        let moved = self
            .model
            .translate(bounds.x - current.x, bounds.y - current.y);
        let rescaled = self
            .mapper
            .on_viewport_resized(old, bounds.size(), &mut self.model);
        (moved || rescaled).then(|| self.emit(CropPhase::Live))
    }

    pub fn set_aspect_ratio(&mut self, ratio: Option<f64>) -> Result<()> {
        self.model.set_aspect_ratio(ratio)
    }

    pub fn set_minimum_size(&mut self, width: i32, height: i32) -> Result<()> {
        self.model.set_minimum_size(width, height)
    }

    /// Programmatic override in display pixels.
    pub fn set_crop_rect(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        apply_constraints: bool,
    ) -> Result<Option<CropChanged>> {
        let candidate = RectF::new(x, y, width, height);
        let bounds = self.mapper.bounds();
        match self.model.set_rect(candidate, apply_constraints, bounds) {
            Ok(true) => Ok(Some(self.emit(CropPhase::Live))),
            Ok(false) => Ok(None),
            Err(err) => {
                tracing::warn!(%err, "rejected crop rectangle");
                Err(err)
            }
        }
    }

    /// Programmatic override in media pixels, e.g. from numeric fields.
    pub fn set_media_crop_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        apply_constraints: bool,
    ) -> Result<Option<CropChanged>> {
        if width < 0 || height < 0 {
            tracing::warn!(width, height, "rejected media crop rectangle");
            return Err(Error::InvalidDimensions {
                width: width as f64,
                height: height as f64,
            });
        }
        let display = self
            .mapper
            .to_display_space(Rect::new(x, y, width, height));
        self.set_crop_rect(
            display.x as f64,
            display.y as f64,
            display.width as f64,
            display.height as f64,
            apply_constraints,
        )
    }

    /// Replace the rectangle by the largest centred box of the current aspect
    /// ratio. No-op in free-form mode.
    pub fn maximize_to_aspect(&mut self) -> Option<CropChanged> {
        let ratio = self.model.constraints().aspect_ratio?;
        let target = solver::largest_centered(self.mapper.bounds(), ratio, self.model.constraints());
        self.commit(target)
    }

    pub fn center_horizontally(&mut self) -> Option<CropChanged> {
        let bounds = self.mapper.bounds();
        let current = self.model.float_rect();
        let x = bounds.x as f64 + ((bounds.width as f64 - current.width) / 2.0).floor();
        self.commit(RectF::new(x, current.y, current.width, current.height))
    }

    pub fn center_vertically(&mut self) -> Option<CropChanged> {
        let bounds = self.mapper.bounds();
        let current = self.model.float_rect();
        let y = bounds.y as f64 + ((bounds.height as f64 - current.height) / 2.0).floor();
        self.commit(RectF::new(current.x, y, current.width, current.height))
    }

    // Commits an already-solved rectangle and reports it if it changed.
    fn commit(&mut self, solved: RectF) -> Option<CropChanged> {
        match self.model.set_rect(solved, false, self.mapper.bounds())
        {
            Ok(true) => {
                tracing::trace!(rect = ?self.model.rect(), "crop committed");
                Some(self.emit(CropPhase::Live))
            }
            Ok(false) => None,
            Err(err) => {
                tracing::warn!(%err, "solver produced an unusable rectangle");
                None
            }
        }
    }

    fn emit(&mut self, phase: CropPhase) -> CropChanged {
        let change = CropChanged {
            rect: self.media_crop_rect(),
            phase,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
        change
    }
}
