use super::*;
use crate::render::surface::LineCap;

#[test]
fn records_calls_in_order() {
    let mut s = RecordingSurface::new(Canvas::new(8, 8));
    s.set_composite(CompositeOp::Lighten);
    let mut path = BezPath::new();
    path.move_to((1.0, 1.0));
    path.line_to((4.0, 4.0));
    s.stroke_path(
        &path,
        Pen {
            width: 2.0,
            cap: LineCap::Round,
        },
        &Paint::Solid(Rgba8::opaque(255, 0, 0)),
    );
    s.fill_circle(Point::new(2.0, 2.0), 3.0, Rgba8::opaque(0, 0, 9));
    s.clear();

    assert_eq!(s.ops().len(), 4);
    assert_eq!(
        s.ops()[0],
        SurfaceOp::SetComposite {
            composite: CompositeOp::Lighten
        }
    );
    assert_eq!(s.stroke_count(), 1);
    assert_eq!(s.circle_count(), 1);
    assert_eq!(s.ops()[3], SurfaceOp::Clear);
}

#[test]
fn json_dump_names_ops() {
    let mut s = RecordingSurface::new(Canvas::new(8, 8));
    s.clear();
    s.fill_circle(Point::new(1.0, 1.0), 1.0, Rgba8::opaque(1, 2, 3));
    let json = s.to_json().unwrap();
    assert!(json.contains("\"op\": \"clear\""));
    assert!(json.contains("\"op\": \"fill_circle\""));
}

#[test]
fn take_ops_drains() {
    let mut s = RecordingSurface::new(Canvas::new(8, 8));
    s.clear();
    assert_eq!(s.take_ops().len(), 1);
    assert!(s.ops().is_empty());
}
