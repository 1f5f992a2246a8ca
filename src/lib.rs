//! Interactive crop-rectangle editing over a scaled media preview.
//!
//! The user drags a box (or its corner handles) on a letterboxed preview;
//! the editor keeps it inside the preview, above a minimum size and,
//! optionally, at a fixed aspect ratio, and reports it in the original
//! media's pixel coordinates.
//!
//! # Modules
//!
//! - [`editor`]: `CropEditor`, the event-driven facade hosts talk to
//! - [`model`]: the rectangle, its float shadow, and `Constraints`
//! - [`solver`]: move / resize / fit correction
//! - [`drag`]: pointer gesture state machine and handle hit-testing
//! - [`mapper`]: display ⇄ media coordinates and viewport rescaling
//! - [`aspect`], [`media`], [`config`]: presets, crop execution, settings

#![forbid(unsafe_code)]

pub mod aspect;
pub mod config;
pub mod drag;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod mapper;
pub mod media;
pub mod model;
pub mod solver;

pub use aspect::AspectRatioMode;
pub use config::Settings;
pub use drag::{DragController, DragState, Handle};
pub use editor::{CropChanged, CropEditor, CropPhase, EditorEvent};
pub use error::{Error, Result};
pub use geometry::{Point, Rect, RectF, Size};
pub use mapper::{CoordinateMapper, fit_bounds};
pub use media::MediaKind;
pub use model::{Constraints, CropRectModel};
pub use solver::Corner;
