use super::*;
use crate::directive::ast::Directive;
use crate::directive::parser::parse_directives;
use crate::eval::record::{CompiledRecord, OpacityFn};
use crate::foundation::core::ElementHandle;
use std::collections::HashMap;

fn axis_arg(text: &str) -> (Axis, AxisArg) {
    let mut parsed = parse_directives(&format!("!absolute; {text}"));
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    match parsed.directives.remove(0) {
        Directive::Position(axis, arg) => (axis, arg),
        other => panic!("not an axis directive: {other:?}"),
    }
}

fn record(id: &str, enter_at: f64, duration: f64, x: AxisTrack) -> CompiledRecord {
    CompiledRecord {
        id: id.to_owned(),
        handle: ElementHandle(0),
        enter_at,
        duration,
        leave_at: enter_at + duration,
        absolute: true,
        height_vh: 0.0,
        position_curve: EasingCurve::linear(),
        opacity: OpacityFn::Constant,
        x,
        y: AxisTrack::Unpositioned,
    }
}

struct Fixture {
    index: HashMap<String, usize>,
    records: Vec<Option<CompiledRecord>>,
}

impl Fixture {
    fn new() -> Self {
        let records = vec![
            record("pin", 0.0, 100.0, AxisTrack::Fixed { value: 30.0 }),
            record(
                "path",
                20.0,
                130.0,
                AxisTrack::Waypoints {
                    values: vec![0.0, 50.0],
                    curve: EasingCurve::new(0.42, 0.0, 0.58, 1.0).unwrap(),
                },
            ),
        ];
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
        Self {
            index,
            records: records.into_iter().map(Some).collect(),
        }
    }

    fn compile(&self, text: &str, enter_at: f64) -> Result<AxisTrack, DirectiveError> {
        let resolver = Resolver {
            index: &self.index,
            records: &self.records,
        };
        let (axis, arg) = axis_arg(text);
        compile_axis(axis, &arg, enter_at, &resolver)
    }
}

#[test]
fn single_value_is_fixed() {
    let f = Fixture::new();
    assert_eq!(f.compile("x 12", 0.0).unwrap(), AxisTrack::Fixed { value: 12.0 });
    assert_eq!(
        f.compile("x like pin", 0.0).unwrap(),
        AxisTrack::Fixed { value: 30.0 }
    );
}

#[test]
fn waypoints_substitute_fixed_references() {
    let f = Fixture::new();
    assert_eq!(
        f.compile("x 0 like pin 100", 0.0).unwrap(),
        AxisTrack::Waypoints {
            values: vec![0.0, 30.0, 100.0],
            curve: EasingCurve::linear(),
        }
    );
}

#[test]
fn like_onto_multi_value_axis_is_unresolvable() {
    let f = Fixture::new();
    let err = f.compile("x 0 like path", 0.0).unwrap_err();
    assert!(matches!(
        err,
        DirectiveError::UnresolvableReference { ref target, .. } if target == "path"
    ));
}

#[test]
fn like_onto_unknown_id_is_unresolvable() {
    let f = Fixture::new();
    assert!(matches!(
        f.compile("x like nobody", 0.0),
        Err(DirectiveError::UnresolvableReference { .. })
    ));
}

#[test]
fn waypoint_curves() {
    let f = Fixture::new();
    assert_eq!(
        f.compile("x 0 10 | 0.25 0.1 0.25 1 |", 0.0).unwrap(),
        AxisTrack::Waypoints {
            values: vec![0.0, 10.0],
            curve: EasingCurve::new(0.25, 0.1, 0.25, 1.0).unwrap(),
        }
    );
    assert_eq!(
        f.compile("x 0 10 | like path |", 0.0).unwrap(),
        AxisTrack::Waypoints {
            values: vec![0.0, 10.0],
            curve: EasingCurve::new(0.42, 0.0, 0.58, 1.0).unwrap(),
        }
    );
    assert!(matches!(
        f.compile("x 0 10 | like pin |", 0.0),
        Err(DirectiveError::UnresolvableReference { .. })
    ));
    assert!(matches!(
        f.compile("x 0 10 | 0 0 3 1 |", 0.0),
        Err(DirectiveError::InvalidCurve(_))
    ));
}

#[test]
fn custom_segments_sorted_latest_first() {
    let f = Fixture::new();
    let track = f
        .compile("y 10 . 50: - 100 | 0 0 1 1 | +50: - 0", 0.0)
        .unwrap();
    assert_eq!(
        track,
        AxisTrack::Custom {
            initial: 10.0,
            segments: vec![
                AbsoluteSegment {
                    clause: 1,
                    end_time: 100.0,
                    start_pos: 100.0,
                    end_pos: 0.0,
                    easing: EasingCurve::linear(),
                },
                AbsoluteSegment {
                    clause: 0,
                    end_time: 50.0,
                    start_pos: 10.0,
                    end_pos: 100.0,
                    easing: EasingCurve::linear(),
                },
            ],
        }
    );
}

#[test]
fn custom_reference_times_rebase_onto_own_enter() {
    let f = Fixture::new();
    let track = f
        .compile("x 0 . with-exit path: - like pin with-entry path: - 5", 10.0)
        .unwrap();
    let AxisTrack::Custom { initial, segments } = track else {
        panic!("expected custom track");
    };
    assert_eq!(initial, 0.0);
    // path: enter 20, leave 150; own enter 10.
    assert_eq!(segments[0].end_time, 140.0);
    assert_eq!(segments[0].end_pos, 30.0);
    assert_eq!(segments[1].end_time, 10.0);
    assert_eq!(segments[1].start_pos, 30.0);
    assert_eq!(segments[1].end_pos, 5.0);
}

#[test]
fn custom_like_needs_fixed_destination() {
    let f = Fixture::new();
    assert!(matches!(
        f.compile("x 0 . 50: like path - 10", 0.0),
        Err(DirectiveError::UnresolvableReference { .. })
    ));
}
