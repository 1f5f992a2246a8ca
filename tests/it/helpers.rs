//! Test helpers for building editors and driving gestures.

use cropbox::{Constraints, CropChanged, CropEditor, Point, Rect, Size};

/// Builder for editors with a given preview, media size and constraints.
pub struct EditorBuilder {
    media: Size,
    bounds: Rect,
    constraints: Constraints,
}

impl Default for EditorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorBuilder {
    /// 800x600 preview of a 1600x1200 image, default constraints.
    pub fn new() -> Self {
        Self {
            media: Size::new(1600, 1200),
            bounds: Rect::new(0, 0, 800, 600),
            constraints: Constraints::default(),
        }
    }

    pub fn with_media(mut self, width: i32, height: i32) -> Self {
        self.media = Size::new(width, height);
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_aspect(mut self, ratio: f64) -> Self {
        self.constraints.aspect_ratio = Some(ratio);
        self
    }

    pub fn with_min_size(mut self, width: i32, height: i32) -> Self {
        self.constraints.min_width = width;
        self.constraints.min_height = height;
        self
    }

    pub fn build(self) -> CropEditor {
        CropEditor::new(self.media, self.bounds)
            .with_constraints(self.constraints)
            .expect("valid constraints")
    }
}

/// Press at `from`, move through `path`, release at the last point.
pub fn drag(editor: &mut CropEditor, from: (i32, i32), path: &[(i32, i32)]) -> Option<CropChanged> {
    editor.pointer_down(Point::new(from.0, from.1));
    for &(x, y) in path {
        editor.pointer_move(Point::new(x, y));
    }
    let end = path.last().copied().unwrap_or(from);
    editor.pointer_up(Point::new(end.0, end.1))
}

/// Bottom-right pixel inside `rect`, which grabs the bottom-right handle.
pub fn bottom_right(rect: Rect) -> (i32, i32) {
    (rect.right() - 1, rect.bottom() - 1)
}

pub fn top_left(rect: Rect) -> (i32, i32) {
    (rect.left(), rect.top())
}

pub fn center(rect: Rect) -> (i32, i32) {
    (rect.x + rect.width / 2, rect.y + rect.height / 2)
}

/// xorshift; deterministic so failures reproduce.
pub struct Rng(pub u64);

impl Rng {
    pub fn next(&mut self) -> u64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        self.0
    }

    pub fn range(&mut self, lo: i32, hi: i32) -> i32 {
        lo + (self.next() % (hi - lo) as u64) as i32
    }
}
