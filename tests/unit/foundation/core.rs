use super::*;

#[test]
fn open_bounds_exclude_edges() {
    let c = Canvas::new(10, 5);
    assert!(!c.contains_open(0, 2));
    assert!(!c.contains_open(3, 0));
    assert!(!c.contains_open(10, 2));
    assert!(!c.contains_open(3, 5));
    assert!(c.contains_open(1, 1));
    assert!(c.contains_open(9, 4));
}

#[test]
fn seeking_channel_prefers_red_then_green() {
    assert_eq!(Rgb8::RED.seeking_channel(), Channel::Red);
    assert_eq!(Rgb8::GREEN.seeking_channel(), Channel::Green);
    assert_eq!(Rgb8::BLUE.seeking_channel(), Channel::Blue);
    assert_eq!(Rgb8::new(0, 0, 0).seeking_channel(), Channel::Blue);
    assert_eq!(Rgb8::new(3, 200, 0).seeking_channel(), Channel::Red);
}

#[test]
fn rgba_lerp_endpoints_and_midpoint() {
    let a = Rgba8::opaque(0, 0, 0);
    let b = Rgba8::opaque(200, 100, 50);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 0.5), Rgba8::opaque(100, 50, 25));
}

#[test]
fn grid_point_distance_is_rounded() {
    let a = GridPoint::new(0, 0, 10);
    let b = GridPoint::new(1, 1, 99);
    assert_eq!(a.rounded_distance(b), 1.0);
    assert!(a.same_cell(GridPoint::new(0, 0, 200)));
}
