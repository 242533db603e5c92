use super::*;
use crate::animation::bezier::CurveError;
use crate::directive::parser::parse_directives;
use std::collections::HashMap;

fn compile_text(text: &str, height_vh: f64) -> (CompiledRecord, Vec<DirectiveError>) {
    let parsed = parse_directives(text);
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    let index = HashMap::new();
    let records: Vec<Option<CompiledRecord>> = Vec::new();
    let resolver = Resolver {
        index: &index,
        records: &records,
    };
    let input = EntryInput {
        id: "el",
        handle: ElementHandle(7),
        height_vh,
        parsed: &parsed,
    };
    compile_entry(&input, &resolver)
}

#[test]
fn fade_offset_tracks_height() {
    assert_eq!(fade_offset(true, 50.0), 0.0);
    assert_eq!(fade_offset(false, 0.0), 0.0);
    assert_eq!(fade_offset(false, 25.0), 0.2);
    assert_eq!(fade_offset(false, 100.0), 0.5);
    assert_eq!(fade_offset(false, 300.0), 0.5);
}

#[test]
fn defaults() {
    let (rec, errors) = compile_text("", 0.0);
    assert!(errors.is_empty());
    assert_eq!(rec.id, "el");
    assert_eq!(rec.handle, ElementHandle(7));
    assert_eq!(rec.enter_at, 0.0);
    assert_eq!(rec.duration, 100.0);
    assert_eq!(rec.leave_at, 100.0);
    assert!(!rec.absolute);
    assert_eq!(rec.position_curve, EasingCurve::linear());
    assert_eq!(rec.opacity, OpacityFn::Constant);
    assert_eq!(rec.x, AxisTrack::Unpositioned);
    assert_eq!(rec.y, AxisTrack::Unpositioned);
}

#[test]
fn leave_overrides_duration_regardless_of_position() {
    let (rec, errors) = compile_text("leave 150; enter 50; duration 20", 0.0);
    assert!(errors.is_empty());
    assert_eq!(rec.enter_at, 50.0);
    assert_eq!(rec.duration, 100.0);
    assert_eq!(rec.leave_at, 150.0);
}

#[test]
fn leave_before_enter_is_dropped() {
    let (rec, errors) = compile_text("enter 80; leave 30", 0.0);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], DirectiveError::MalformedDirective { .. }));
    assert_eq!(rec.duration, 100.0);
    assert_eq!(rec.leave_at, 180.0);
}

#[test]
fn zero_duration_is_dropped() {
    let (rec, errors) = compile_text("duration 0", 0.0);
    assert_eq!(errors.len(), 1);
    assert_eq!(rec.duration, 100.0);
}

#[test]
fn ease_sets_position_curve() {
    let (rec, errors) = compile_text("ease 0.42 0 0.58 1", 0.0);
    assert!(errors.is_empty());
    assert_eq!(rec.position_curve.points(), [0.42, 0.0, 0.58, 1.0]);
}

#[test]
fn ease_with_bad_controls_keeps_default() {
    let (rec, errors) = compile_text("ease 1.5 0 0.5 1", 0.0);
    assert!(matches!(
        errors.as_slice(),
        [DirectiveError::InvalidCurve(CurveError::XOutOfRange { .. })]
    ));
    assert_eq!(rec.position_curve, EasingCurve::linear());
}

#[test]
fn ease_in_absolute_mode_is_rejected() {
    let (rec, errors) = compile_text("!absolute; ease 0.42 0 0.58 1; x 10", 0.0);
    assert_eq!(
        errors,
        vec![DirectiveError::InvalidModeUsage {
            keyword: "ease".to_owned(),
            absolute: true,
        }]
    );
    assert!(rec.absolute);
    assert_eq!(rec.x, AxisTrack::Fixed { value: 10.0 });
}

#[test]
fn axis_without_absolute_is_rejected_but_rest_compiles() {
    let (rec, errors) = compile_text("x 10; enter 40", 0.0);
    assert_eq!(
        errors,
        vec![DirectiveError::InvalidModeUsage {
            keyword: "x".to_owned(),
            absolute: false,
        }]
    );
    assert_eq!(rec.enter_at, 40.0);
    assert_eq!(rec.x, AxisTrack::Unpositioned);
}

#[test]
fn opacity_offsets_follow_mode() {
    let (rec, _) = compile_text("opacity-ease 0 0 1 1 0 0 1 1", 25.0);
    assert_eq!(
        rec.opacity,
        OpacityFn::Split {
            fade_in: EasingCurve::linear(),
            fade_out: EasingCurve::linear(),
            offset: 0.2,
        }
    );

    let (abs, _) = compile_text("!absolute; opacity-ease 0 0 1 1", 25.0);
    assert_eq!(
        abs.opacity,
        OpacityFn::Symmetric {
            curve: EasingCurve::linear(),
            offset: 0.0,
        }
    );
}

#[test]
fn unknown_reference_is_reported() {
    let (rec, errors) = compile_text("enter like ghost; duration 30", 0.0);
    assert!(matches!(
        errors.as_slice(),
        [DirectiveError::UnresolvableReference { target, .. }] if target == "ghost"
    ));
    assert_eq!(rec.enter_at, 0.0);
    assert_eq!(rec.duration, 30.0);
}
