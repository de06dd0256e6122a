use super::*;

#[test]
fn defaults_apply_when_everything_is_omitted() {
    let c = Config::default();
    assert_eq!(c.path_finder_count, 30);
    assert_eq!(c.origin, vec![OriginToken::Bottom]);
    assert_eq!(c.speed, 7.0);
    assert_eq!(c.turning_angle, std::f64::consts::PI);
    assert_eq!(c.color_mode, ColorMode::Color);
    assert_eq!(c.line_width, 2.0);
    assert_eq!(c.line_mode, LineMode::Smooth);
    assert_eq!(c.composite_operation, CompositeOp::Lighten);
    assert_eq!(c.output_size, OutputSize::Original);
    assert_eq!(c.iteration_limit, 0);
    assert_eq!(c.key, Key::Low);
}

#[test]
fn numeric_fields_clamp_into_range() {
    let c = Config::from_json(r#"{"pathFinderCount":50000,"speed":0,"turningAngle":20}"#).unwrap();
    assert_eq!(c.path_finder_count, 10_000);
    assert_eq!(c.speed, 1.0);
    assert_eq!(c.turning_angle, 10.0);

    let c = Config::from_json(r#"{"pathFinderCount":0,"lineWidth":500,"turningAngle":0}"#).unwrap();
    assert_eq!(c.path_finder_count, 1);
    assert_eq!(c.line_width, 100.0);
    assert_eq!(c.turning_angle, 0.1);
}

#[test]
fn non_finite_numbers_count_as_omitted() {
    let o = Options {
        speed: Some(f64::NAN),
        line_width: Some(f64::INFINITY),
        ..Options::default()
    };
    let c = Config::from_options(&o);
    assert_eq!(c.speed, DEFAULT_SPEED);
    assert_eq!(c.line_width, DEFAULT_LINE_WIDTH);
}

#[test]
fn unrecognized_names_fall_back() {
    let c = Config::from_json(
        r#"{"lineMode":"zigzag","colorMode":"sepia","key":"mid","compositeOperation":"default"}"#,
    )
    .unwrap();
    assert_eq!(c.line_mode, LineMode::Smooth);
    assert_eq!(c.color_mode, ColorMode::Color);
    assert_eq!(c.key, Key::Low);
    assert_eq!(c.composite_operation, CompositeOp::SourceOver);
}

#[test]
fn origin_list_drops_unknown_tokens() {
    let c = Config::from_json(r#"{"origin":["top","sideways","50% 30%","120% 5%","right"]}"#)
        .unwrap();
    assert_eq!(
        c.origin,
        vec![
            OriginToken::Top,
            OriginToken::Point {
                x_pct: 50,
                y_pct: 30
            },
            OriginToken::Right,
        ]
    );
}

#[test]
fn origin_string_is_split_on_whitespace() {
    let c = Config::from_json(r#"{"origin":"bottom 25% 75% left"}"#).unwrap();
    assert_eq!(
        c.origin,
        vec![
            OriginToken::Bottom,
            OriginToken::Point {
                x_pct: 25,
                y_pct: 75
            },
            OriginToken::Left,
        ]
    );
}

#[test]
fn all_unknown_origin_falls_back_to_bottom() {
    let c = Config::from_json(r#"{"origin":["nowhere"]}"#).unwrap();
    assert_eq!(c.origin, vec![OriginToken::Bottom]);
}

#[test]
fn container_output_needs_a_box() {
    let c = Config::from_json(r#"{"outputSize":"container"}"#).unwrap();
    assert_eq!(c.output_size, OutputSize::Original);

    let json = r#"{"outputSize":"container","container":{"width":640,"height":480}}"#;
    let c = Config::from_json(json).unwrap();
    assert_eq!(c.output_size, OutputSize::Container(Canvas::new(640, 480)));
}

#[test]
fn overlay_prefers_given_fields() {
    let base = Options::from_json(r#"{"speed":3,"lineMode":"point"}"#).unwrap();
    let flags = Options {
        speed: Some(9.0),
        ..Options::default()
    };
    let merged = base.overlay(flags);
    assert_eq!(merged.speed, Some(9.0));
    assert_eq!(merged.line_mode.as_deref(), Some("point"));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Options::from_json("{").unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}

#[test]
fn motion_and_style_follow_config() {
    let c = Config::from_json(r#"{"speed":4,"key":"high","lineWidth":3,"lineMode":"square"}"#)
        .unwrap();
    assert_eq!(c.motion().speed, 4.0);
    assert_eq!(c.motion().key, Key::High);
    assert_eq!(c.stroke_style().line_width, 3.0);
    assert_eq!(c.stroke_style().line_mode, LineMode::Square);
}

#[test]
fn output_scale_widens_lines_only_when_clearly_enlarged() {
    let mut c = Config::default();
    c.apply_output_scale(1.4);
    assert_eq!(c.line_width, 2.0);
    c.apply_output_scale(3.0);
    assert_eq!(c.line_width, 6.0);
}
