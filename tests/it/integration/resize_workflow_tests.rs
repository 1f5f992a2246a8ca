//! Aspect-locked resizing and viewport rescaling workflows.

use crate::helpers::{EditorBuilder, Rng, bottom_right, drag};
use cropbox::{EditorEvent, Rect, Size, fit_bounds};

fn close(a: Rect, b: Rect) -> bool {
    (a.x - b.x).abs() <= 1
        && (a.y - b.y).abs() <= 1
        && (a.width - b.width).abs() <= 1
        && (a.height - b.height).abs() <= 1
}

#[test]
fn test_square_lock_width_drives_with_room() {
    let mut editor = EditorBuilder::new().with_aspect(1.0).build();
    editor.set_crop_rect(100.0, 100.0, 200.0, 100.0, false).unwrap();

    let (x, y) = bottom_right(editor.crop_rect());
    drag(&mut editor, (x, y), &[(x + 50, y)]);

    assert_eq!(editor.crop_rect(), Rect::new(100, 100, 250, 250));
}

#[test]
fn test_square_lock_limited_by_height_budget() {
    let mut editor = EditorBuilder::new()
        .with_bounds(Rect::new(0, 0, 400, 300))
        .with_media(800, 600)
        .with_aspect(1.0)
        .build();
    editor.set_crop_rect(100.0, 100.0, 200.0, 100.0, false).unwrap();

    let (x, y) = bottom_right(editor.crop_rect());
    drag(&mut editor, (x, y), &[(x + 50, y)]);

    assert_eq!(editor.crop_rect(), Rect::new(100, 100, 200, 200));
}

#[test]
fn test_programmatic_set_applies_aspect() {
    let mut editor = EditorBuilder::new().with_aspect(16.0 / 9.0).build();
    editor.set_crop_rect(0.0, 0.0, 320.0, 100.0, true).unwrap();

    assert_eq!(editor.crop_rect(), Rect::new(0, 0, 320, 180));
}

#[test]
fn test_bounds_smaller_than_minimum_protrude() {
    // The minimum size wins; the rectangle sticks out of the 10x10 preview.
    let mut editor = EditorBuilder::new()
        .with_bounds(Rect::new(0, 0, 10, 10))
        .with_media(100, 100)
        .build();
    editor.set_crop_rect(0.0, 0.0, 5.0, 5.0, true).unwrap();

    assert_eq!(editor.crop_rect(), Rect::new(0, 0, 20, 20));
}

#[test]
fn test_unit_resize_is_a_no_op() {
    let mut editor = EditorBuilder::new().build();
    editor.set_crop_rect(13.0, 17.0, 333.0, 222.0, false).unwrap();

    let change = editor.handle(EditorEvent::ViewportResized {
        old: Size::new(800, 600),
        new: Size::new(800, 600),
    });

    assert_eq!(change, None);
    assert_eq!(editor.crop_rect(), Rect::new(13, 17, 333, 222));
}

#[test]
fn test_first_layout_does_not_rescale() {
    let mut editor = EditorBuilder::new().build();
    editor.set_crop_rect(13.0, 17.0, 333.0, 222.0, false).unwrap();

    let change = editor.viewport_resized(Size::new(0, 0), Size::new(400, 300));

    assert_eq!(change, None);
    assert_eq!(editor.crop_rect(), Rect::new(13, 17, 333, 222));
}

#[test]
fn test_round_trip_resize_does_not_drift() {
    let mut editor = EditorBuilder::new()
        .with_bounds(Rect::new(0, 0, 100, 100))
        .with_media(1000, 1000)
        .build();
    editor.set_crop_rect(10.0, 20.0, 33.0, 41.0, false).unwrap();
    let original = editor.crop_rect();

    editor.viewport_resized(Size::new(100, 100), Size::new(133, 133));
    editor.viewport_resized(Size::new(133, 133), Size::new(100, 100));

    assert!(close(editor.crop_rect(), original), "{:?}", editor.crop_rect());
}

#[test]
fn test_many_window_resizes_do_not_drift() {
    let mut editor = EditorBuilder::new().with_media(1920, 1440).build();
    editor.set_crop_rect(101.0, 77.0, 333.0, 211.0, false).unwrap();
    let original = editor.crop_rect();
    let media = editor.media_crop_rect();

    let sizes = [(640, 480), (1023, 767), (333, 250), (917, 688), (800, 600)];
    for _ in 0..10 {
        for (w, h) in sizes {
            editor.set_bounds(Rect::new(0, 0, w, h));
        }
    }

    assert_eq!(editor.bounds(), Rect::new(0, 0, 800, 600));
    assert!(close(editor.crop_rect(), original), "{:?}", editor.crop_rect());
    assert_eq!(editor.media_crop_rect(), media);
}

#[test]
fn test_resize_then_drag_uses_new_scale() {
    let mut editor = EditorBuilder::new().build();
    editor.set_bounds(Rect::new(0, 0, 400, 300));
    assert_eq!(editor.crop_rect(), Rect::new(0, 0, 400, 300));

    let start = bottom_right(editor.crop_rect());
    let settled = drag(&mut editor, start, &[(199, 149)]).unwrap();

    assert_eq!(editor.crop_rect(), Rect::new(0, 0, 200, 150));
    // 1600x1200 media behind a 400x300 preview
    assert_eq!(settled.rect, Rect::new(0, 0, 800, 600));
}

#[test]
fn test_maximize_then_drag_keeps_ratio() {
    let mut editor = EditorBuilder::new().build();
    editor.set_aspect_ratio(Some(9.0 / 16.0)).unwrap();
    editor.maximize_to_aspect().unwrap();
    let r = editor.crop_rect();
    assert_eq!((r.width, r.height), (338, 600));

    let (x, y) = bottom_right(r);
    drag(&mut editor, (x, y), &[(x - 100, y - 100)]);

    let r = editor.crop_rect();
    assert!((r.width as f64 - r.height as f64 * 9.0 / 16.0).abs() <= 1.0, "{r:?}");
    assert!(editor.bounds().contains_rect(&r));
}

#[test]
fn test_letterboxed_resize_rescales_about_preview_origin() {
    // 600x600 media centred in a wider panel, then the panel shrinks.
    let mut editor = EditorBuilder::new()
        .with_media(600, 600)
        .with_bounds(Rect::new(100, 0, 600, 600))
        .build();
    editor.set_crop_rect(250.0, 150.0, 300.0, 300.0, false).unwrap();
    let media = editor.media_crop_rect();
    assert_eq!(media, Rect::new(150, 150, 300, 300));

    editor.set_bounds(Rect::new(50, 0, 300, 300));

    assert_eq!(editor.crop_rect(), Rect::new(125, 75, 150, 150));
    assert_eq!(editor.media_crop_rect(), media);
}

#[test]
fn test_random_letterboxed_resizes_stay_contained() {
    let media_size = Size::new(1920, 1080);
    let first = fit_bounds(Size::new(900, 700), media_size);
    assert_eq!(first, Rect::new(0, 97, 900, 506));

    let mut editor = EditorBuilder::new()
        .with_media(1920, 1080)
        .with_bounds(first)
        .build();
    editor
        .set_crop_rect(120.0, 157.0, 300.0, 200.0, false)
        .unwrap();
    let media = editor.media_crop_rect();

    let mut rng = Rng(0x5eed_1e77_e2b0_0c5d);
    for step in 0..200 {
        let container = Size::new(rng.range(200, 1600), rng.range(200, 1200));
        let bounds = fit_bounds(container, media_size);
        editor.set_bounds(bounds);

        let crop = editor.crop_rect();
        assert!(
            editor.bounds().contains_rect(&crop),
            "step {step}: {crop:?} outside {bounds:?}"
        );
        let m = editor.media_crop_rect();
        assert!(
            (m.x - media.x).abs() <= 1
                && (m.y - media.y).abs() <= 1
                && (m.width - media.width).abs() <= 1
                && (m.height - media.height).abs() <= 1,
            "step {step}: {m:?} drifted from {media:?}"
        );
    }
}
