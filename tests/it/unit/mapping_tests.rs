//! Unit tests for display/media coordinate mapping.

use cropbox::{CoordinateMapper, Rect, Size, fit_bounds};

#[test]
fn test_round_trip_within_one_pixel() {
    let media = Size::new(1920, 1080);
    let bounds = fit_bounds(Size::new(1000, 700), media);
    let mapper = CoordinateMapper::new(bounds, media);

    for x in (bounds.left()..bounds.right() - 40).step_by(37) {
        for y in (bounds.top()..bounds.bottom() - 40).step_by(29) {
            let w = (bounds.right() - x).min(123);
            let h = (bounds.bottom() - y).min(77);
            let r = Rect::new(x, y, w, h);
            let back = mapper.to_display_space(mapper.to_media_space(r));
            assert!((back.x - r.x).abs() <= 1, "{r:?} -> {back:?}");
            assert!((back.y - r.y).abs() <= 1, "{r:?} -> {back:?}");
            assert!((back.width - r.width).abs() <= 1, "{r:?} -> {back:?}");
            assert!((back.height - r.height).abs() <= 1, "{r:?} -> {back:?}");
        }
    }
}

#[test]
fn test_full_bounds_maps_to_full_media() {
    let media = Size::new(4032, 3024);
    let bounds = fit_bounds(Size::new(800, 600), media);
    let mapper = CoordinateMapper::new(bounds, media);

    assert_eq!(bounds, Rect::new(0, 0, 800, 600));
    assert_eq!(mapper.to_media_space(bounds), Rect::new(0, 0, 4032, 3024));
}

#[test]
fn test_scale_factors_follow_bounds() {
    let mut mapper = CoordinateMapper::new(Rect::new(0, 0, 800, 600), Size::new(1600, 1200));
    assert_eq!(mapper.scale_factors(), Some((2.0, 2.0)));

    mapper.set_bounds(Rect::new(0, 0, 400, 300));
    assert_eq!(mapper.scale_factors(), Some((4.0, 4.0)));

    mapper.set_bounds(Rect::new(0, 0, 0, 300));
    assert_eq!(mapper.scale_factors(), None);
}

#[test]
fn test_letterbox_centres_preview() {
    let bounds = fit_bounds(Size::new(1000, 1000), Size::new(1920, 1080));
    assert_eq!(bounds, Rect::new(0, 219, 1000, 562));
}
