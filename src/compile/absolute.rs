use crate::animation::bezier::EasingCurve;
use crate::compile::resolve::Resolver;
use crate::directive::ast::{Axis, AxisArg, ClauseTime, CurveArg, RefKind, Scalar, SegmentClause};
use crate::directive::error::DirectiveError;
use crate::eval::record::{AbsoluteSegment, AxisTrack};

/// Compile the parameters of an `x`/`y` directive.
///
/// `enter_at` is the owning element's enter time at the moment the directive
/// runs; clause references are rebased onto it.
pub(crate) fn compile_axis(
    axis: Axis,
    arg: &AxisArg,
    enter_at: f64,
    resolver: &Resolver<'_>,
) -> Result<AxisTrack, DirectiveError> {
    match arg {
        AxisArg::Waypoints { values, curve } => {
            compile_waypoints(axis, values, curve.as_ref(), resolver)
        }
        AxisArg::Custom { initial, clauses } => {
            compile_custom(axis, initial, clauses, enter_at, resolver)
        }
    }
}

fn position(axis: Axis, s: &Scalar, resolver: &Resolver<'_>) -> Result<f64, DirectiveError> {
    match s {
        Scalar::Number(v) => Ok(*v),
        Scalar::Like(id) => resolver.fixed(axis, id),
    }
}

fn curve(axis: Axis, c: &CurveArg, resolver: &Resolver<'_>) -> Result<EasingCurve, DirectiveError> {
    match c {
        CurveArg::Points([x1, y1, x2, y2]) => Ok(EasingCurve::new(*x1, *y1, *x2, *y2)?),
        CurveArg::Like(id) => resolver.axis_curve(axis, id),
    }
}

fn compile_waypoints(
    axis: Axis,
    values: &[Scalar],
    curve_arg: Option<&CurveArg>,
    resolver: &Resolver<'_>,
) -> Result<AxisTrack, DirectiveError> {
    let values = values
        .iter()
        .map(|v| position(axis, v, resolver))
        .collect::<Result<Vec<_>, _>>()?;

    if let [value] = values[..] {
        return Ok(AxisTrack::Fixed { value });
    }
    let curve = match curve_arg {
        Some(c) => curve(axis, c, resolver)?,
        None => EasingCurve::linear(),
    };
    Ok(AxisTrack::Waypoints { values, curve })
}

fn clause_time(
    time: &ClauseTime,
    previous: f64,
    enter_at: f64,
    resolver: &Resolver<'_>,
) -> Result<f64, DirectiveError> {
    match time {
        ClauseTime::At(t) => Ok(*t),
        ClauseTime::After(dt) => Ok(previous + dt),
        ClauseTime::Reference { kind, id } => {
            let rec = resolver.record(id)?;
            let at = match kind {
                RefKind::WithExit => rec.leave_at,
                _ => rec.enter_at,
            };
            Ok(at - enter_at)
        }
    }
}

fn compile_custom(
    axis: Axis,
    initial: &Scalar,
    clauses: &[SegmentClause],
    enter_at: f64,
    resolver: &Resolver<'_>,
) -> Result<AxisTrack, DirectiveError> {
    let initial = position(axis, initial, resolver)?;

    let mut segments = Vec::with_capacity(clauses.len());
    let mut previous_time = 0.0;
    let mut previous_end = initial;
    for (i, clause) in clauses.iter().enumerate() {
        let end_time = clause_time(&clause.time, previous_time, enter_at, resolver)?;
        let start_pos = match &clause.start {
            Some(s) => position(axis, s, resolver)?,
            None => previous_end,
        };
        let end_pos = position(axis, &clause.end, resolver)?;
        let easing = match &clause.curve {
            Some(c) => curve(axis, c, resolver)?,
            None => EasingCurve::linear(),
        };
        segments.push(AbsoluteSegment {
            clause: i,
            end_time,
            start_pos,
            end_pos,
            easing,
        });
        previous_time = end_time;
        previous_end = end_pos;
    }

    // Latest first; among equal times the later clause wins.
    segments.sort_by(|a, b| {
        b.end_time
            .total_cmp(&a.end_time)
            .then(b.clause.cmp(&a.clause))
    });
    Ok(AxisTrack::Custom { initial, segments })
}

#[cfg(test)]
#[path = "../../tests/unit/compile/absolute.rs"]
mod tests;
