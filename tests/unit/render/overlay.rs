use super::*;
use image::Rgba;

#[test]
fn overlay_lands_at_anchor_with_quarter_size() {
    let mut canvas = RgbaImage::from_pixel(100, 80, Rgba([0, 0, 0, 255]));
    let overlay = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
    paste_overlay(&mut canvas, &overlay).unwrap();

    // 25x20 box at (65, 52).
    for (x, y) in [(65, 52), (89, 71), (77, 60)] {
        let px = canvas.get_pixel(x, y).0;
        assert!(px[0] >= 250 && px[1] <= 5 && px[3] == 255, "({x},{y}) {px:?}");
    }
    assert_eq!(canvas.get_pixel(90, 71).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(64, 52).0, [0, 0, 0, 255]);
    assert_eq!(canvas.get_pixel(65, 72).0, [0, 0, 0, 255]);
}

#[test]
fn transparent_overlay_changes_nothing() {
    let mut canvas = RgbaImage::from_pixel(40, 40, Rgba([1, 2, 3, 255]));
    let before = canvas.clone();
    let overlay = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 0]));
    paste_overlay(&mut canvas, &overlay).unwrap();
    assert_eq!(canvas, before);
}

#[test]
fn tiny_canvas_is_rejected() {
    let mut canvas = RgbaImage::new(3, 3);
    let overlay = RgbaImage::new(2, 2);
    assert!(paste_overlay(&mut canvas, &overlay).is_err());
}

#[test]
fn missing_overlay_file_is_overlay_error() {
    let mut canvas = RgbaImage::new(40, 40);
    let err = apply_overlay(&mut canvas, Path::new("/no/such/overlay.png")).unwrap_err();
    assert!(matches!(err, ComposeError::OverlayApply { .. }));
}
