use super::*;

#[test]
fn rejects_wrong_buffer_length() {
    let err = PixelGrid::new(4, 4, vec![0; 10]).unwrap_err();
    assert!(err.to_string().contains("expects 64 bytes"));
}

#[test]
fn rejects_grids_without_interior() {
    assert!(PixelGrid::filled(2, 10, [0, 0, 0, 255]).is_err());
    assert!(PixelGrid::filled(10, 2, [0, 0, 0, 255]).is_err());
    assert!(PixelGrid::filled(3, 3, [0, 0, 0, 255]).is_ok());
}

#[test]
fn pixel_lookup_is_row_major_and_bounds_checked() {
    let mut data = vec![0u8; 3 * 4 * 4];
    // (x=2, y=1)
    let idx = (3 + 2) * 4;
    data[idx..idx + 4].copy_from_slice(&[9, 8, 7, 255]);
    let grid = PixelGrid::new(3, 4, data).unwrap();

    assert_eq!(grid.pixel(2, 1), Some([9, 8, 7, 255]));
    assert_eq!(grid.pixel(1, 2), Some([0, 0, 0, 0]));
    assert_eq!(grid.pixel(-1, 0), None);
    assert_eq!(grid.pixel(3, 0), None);
    assert_eq!(grid.pixel(0, 4), None);
}

#[test]
fn from_rgba_image_keeps_dimensions() {
    let img = image::RgbaImage::from_pixel(5, 7, image::Rgba([1, 2, 3, 4]));
    let grid = PixelGrid::from_rgba_image(img).unwrap();
    assert_eq!(grid.canvas(), Canvas::new(5, 7));
    assert_eq!(grid.pixel(4, 6), Some([1, 2, 3, 4]));
}
