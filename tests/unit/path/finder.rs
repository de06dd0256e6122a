use super::*;
use crate::foundation::core::Canvas;

fn motion(speed: f64, key: Key) -> Motion {
    Motion {
        speed,
        turning_angle: std::f64::consts::PI,
        key,
    }
}

fn grid_with(width: u32, height: u32, f: impl Fn(i32, i32) -> [u8; 4]) -> PixelGrid {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            data.extend_from_slice(&f(x, y));
        }
    }
    PixelGrid::new(width, height, data).unwrap()
}

#[test]
fn first_step_from_bottom_edge_stays_inside_and_claims_cell() {
    let pixels = PixelGrid::filled(100, 100, [128, 128, 128, 255]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut pf = Pathfinder::new(50, 99, Vec2::new(0.0, -3.0), Rgb8::RED, motion(3.0, Key::Low));

    let step = pf.step(&pixels, &mut occ).expect("a point");
    let p = step.point;
    assert!(0 < p.x && p.x < 100);
    assert!(0 < p.y && p.y < 100);
    assert!(step.pristine);
    assert!(occ.is_visited(p.x, p.y, Channel::Red));
    assert_eq!(pf.position(), (p.x, p.y));
    assert_eq!(pf.history().get(-1), Some(p));
}

#[test]
fn low_and_high_keys_pick_opposite_candidates() {
    let pixels = grid_with(100, 100, |x, y| match (x, y) {
        (50, 47) => [200, 0, 0, 255],
        (53, 50) => [100, 0, 0, 255],
        (52, 52) => [250, 0, 0, 255],
        _ => [0, 0, 0, 255],
    });

    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut low = Pathfinder::new(50, 50, Vec2::new(3.0, 0.0), Rgb8::RED, motion(3.0, Key::Low));
    let step = low.step(&pixels, &mut occ).unwrap();
    assert_eq!(step.point, GridPoint::new(52, 52, 250));

    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut high =
        Pathfinder::new(50, 50, Vec2::new(3.0, 0.0), Rgb8::RED, motion(3.0, Key::High));
    let step = high.step(&pixels, &mut occ).unwrap();
    assert_eq!(step.point, GridPoint::new(53, 50, 100));
}

#[test]
fn visited_cells_fall_back_to_heading_candidate() {
    let pixels = PixelGrid::filled(100, 100, [40, 40, 40, 255]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    for y in 0..100 {
        for x in 0..100 {
            occ.mark(x, y, Channel::Red);
        }
    }
    let mut pf = Pathfinder::new(50, 50, Vec2::new(3.0, 0.0), Rgb8::RED, motion(3.0, Key::Low));
    let step = pf.step(&pixels, &mut occ).unwrap();
    assert_eq!(
        step,
        Step {
            point: GridPoint::new(53, 50, 40),
            pristine: false
        }
    );
    assert_eq!(pf.velocity(), Vec2::new(3.0, 0.0));
}

#[test]
fn other_channels_do_not_block() {
    let pixels = PixelGrid::filled(20, 20, [0, 90, 0, 255]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    for y in 0..20 {
        for x in 0..20 {
            occ.mark(x, y, Channel::Red);
        }
    }
    let mut pf = Pathfinder::new(10, 10, Vec2::new(3.0, 0.0), Rgb8::GREEN, motion(3.0, Key::Low));
    assert!(pf.step(&pixels, &mut occ).unwrap().pristine);
}

#[test]
fn transparent_heading_falls_back_to_second_newest_history_point() {
    let pixels = grid_with(40, 40, |x, y| match (x, y) {
        (20, 17) | (20, 14) => [200, 0, 0, 255],
        _ => [200, 0, 0, 0],
    });
    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut pf = Pathfinder::new(20, 20, Vec2::new(0.0, -3.0), Rgb8::RED, motion(3.0, Key::Low));

    let a = pf.step(&pixels, &mut occ).unwrap();
    assert_eq!(a.point, GridPoint::new(20, 17, 200));
    let b = pf.step(&pixels, &mut occ).unwrap();
    assert_eq!(b.point, GridPoint::new(20, 14, 200));

    let c = pf.step(&pixels, &mut occ).unwrap();
    assert!(!c.pristine);
    assert_eq!(c.point, a.point);
    assert_eq!(pf.velocity(), Vec2::new(0.0, 3.0));
}

#[test]
fn no_candidate_and_empty_history_yields_nothing_and_mutates_nothing() {
    let pixels = PixelGrid::filled(30, 30, [255, 255, 255, 0]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut pf = Pathfinder::new(15, 15, Vec2::new(3.0, 0.0), Rgb8::BLUE, motion(3.0, Key::Low));

    assert_eq!(pf.step(&pixels, &mut occ), None);
    assert_eq!(pf.next_point(&pixels, &mut occ), None);
    assert_eq!(pf.position(), (15, 15));
    assert_eq!(pf.velocity(), Vec2::new(3.0, 0.0));
    assert!(pf.history().is_empty());
    assert_eq!(occ.visited_count(Channel::Blue), 0);
}

#[test]
fn next_point_gives_up_after_bounded_retries() {
    let pixels = PixelGrid::filled(100, 100, [40, 40, 40, 255]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    for y in 0..100 {
        for x in 0..100 {
            occ.mark(x, y, Channel::Red);
        }
    }
    let mut pf = Pathfinder::new(50, 50, Vec2::new(3.0, 0.0), Rgb8::RED, motion(3.0, Key::Low));
    let p = pf.next_point(&pixels, &mut occ).unwrap();
    assert_eq!((p.x, p.y), (50 + 3 * (MAX_RETRIES as i32 + 1), 50));
    assert_eq!(pf.history().len(), MAX_RETRIES + 1);
}

#[test]
fn heading_turns_inward_near_edges() {
    let pixels = PixelGrid::filled(50, 50, [10, 10, 10, 255]).unwrap();
    let mut pf = Pathfinder::new(2, 25, Vec2::new(-3.0, 0.0), Rgb8::RED, motion(3.0, Key::Low));
    assert_eq!(pf.steered_velocity(Canvas::new(50, 50)), Vec2::new(3.0, 0.0));
    assert_eq!(pf.velocity(), Vec2::new(-3.0, 0.0));

    let mut occ = OccupancyGrid::new(pixels.canvas());
    let p = pf.step(&pixels, &mut occ).unwrap().point;
    assert!(p.x >= 2);
    assert!(pixels.canvas().contains_open(p.x, p.y));
}

#[test]
fn failed_step_near_edge_leaves_velocity_untouched() {
    let pixels = PixelGrid::filled(30, 30, [0, 0, 0, 0]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut pf = Pathfinder::new(2, 15, Vec2::new(-3.0, 0.0), Rgb8::RED, motion(3.0, Key::Low));

    assert_eq!(pf.step(&pixels, &mut occ), None);
    assert_eq!(pf.velocity(), Vec2::new(-3.0, 0.0));
    assert_eq!(pf.position(), (2, 15));
}

#[test]
fn long_walk_never_leaves_open_bounds() {
    let pixels = grid_with(64, 48, |x, y| {
        [
            ((x * 7 + y * 13) % 256) as u8,
            ((x * 3 + y * 5) % 256) as u8,
            ((x * 11 + y) % 256) as u8,
            255,
        ]
    });
    let mut occ = OccupancyGrid::new(pixels.canvas());
    for (target, key) in [
        (Rgb8::RED, Key::Low),
        (Rgb8::GREEN, Key::High),
        (Rgb8::BLUE, Key::Low),
    ] {
        let mut pf = Pathfinder::new(32, 45, Vec2::new(0.0, -3.0), target, motion(3.0, key));
        for _ in 0..500 {
            if let Some(p) = pf.next_point(&pixels, &mut occ) {
                assert!(pixels.canvas().contains_open(p.x, p.y), "escaped at {p:?}");
            }
        }
    }
}

#[test]
fn cursor_forwards_to_next_point() {
    let pixels = PixelGrid::filled(20, 20, [0, 0, 77, 255]).unwrap();
    let mut occ = OccupancyGrid::new(pixels.canvas());
    let mut pf = Pathfinder::new(10, 10, Vec2::new(0.0, 3.0), Rgb8::BLUE, motion(3.0, Key::Low));
    let mut cursor = PathCursor {
        finder: &mut pf,
        pixels: &pixels,
        occupancy: &mut occ,
    };
    let p = cursor.next_point().unwrap();
    assert_eq!(p.brightness, 77);
    assert!(occ.is_visited(p.x, p.y, Channel::Blue));
}
