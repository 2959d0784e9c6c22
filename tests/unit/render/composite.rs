use super::*;

#[test]
fn transparent_source_keeps_destination() {
    let dst = [10, 20, 30, 255];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [1, 2, 3, 255]), [1, 2, 3, 255]);
}

#[test]
fn half_alpha_panel_darkens_white() {
    let panel = premultiply([24, 24, 22, 128]);
    let out = unpremultiply(over([255, 255, 255, 255], panel));
    assert_eq!(out[3], 255);
    for c in &out[..3] {
        assert!((130..=142).contains(c), "{out:?}");
    }
}

#[test]
fn premultiply_round_trips_opaque_pixels() {
    let px = [200, 100, 7, 255];
    assert_eq!(unpremultiply(premultiply(px)), px);
    assert_eq!(unpremultiply([9, 9, 9, 0]), [0, 0, 0, 0]);
}

#[test]
fn straight_blend_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_straight_in_place(&mut dst, &[0u8; 4]).is_err());
    assert!(over_straight_in_place(&mut dst[..7], &[0u8; 7]).is_err());
}

#[test]
fn straight_blend_stays_opaque_over_opaque_background() {
    let mut dst = vec![255u8, 255, 255, 255, 0, 0, 0, 255];
    let src = [0u8, 0, 0, 0, 128, 128, 128, 128];
    over_straight_in_place(&mut dst, &src).unwrap();
    assert_eq!(&dst[..4], &[255, 255, 255, 255]);
    assert_eq!(dst[7], 255);
    assert_eq!(dst[4], 128);
}
