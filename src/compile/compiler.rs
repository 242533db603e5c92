use crate::animation::bezier::EasingCurve;
use crate::compile::absolute::compile_axis;
use crate::compile::resolve::{Edge, Resolver};
use crate::directive::ast::{Axis, CurveArg, Directive, OpacityArg, ParsedDirectives, Scalar};
use crate::directive::error::DirectiveError;
use crate::eval::record::{AxisTrack, CompiledRecord, OpacityFn, VIEWPORT_SPAN};
use crate::foundation::core::ElementHandle;

const DEFAULT_DURATION: f64 = 100.0;

/// Everything the timeline compiler needs to know about one entry.
pub(crate) struct EntryInput<'a> {
    pub(crate) id: &'a str,
    pub(crate) handle: ElementHandle,
    pub(crate) height_vh: f64,
    pub(crate) parsed: &'a ParsedDirectives,
}

/// Working state while directives are applied, finalized into a record.
struct Timeline {
    enter_at: f64,
    duration: f64,
    position_curve: EasingCurve,
    opacity: OpacityFn,
    x: AxisTrack,
    y: AxisTrack,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            enter_at: 0.0,
            duration: DEFAULT_DURATION,
            position_curve: EasingCurve::linear(),
            opacity: OpacityFn::Constant,
            x: AxisTrack::Unpositioned,
            y: AxisTrack::Unpositioned,
        }
    }
}

/// Fraction of the lifetime an element spends clearing its own height.
///
/// Fades start that far in so they track what is actually on screen.
pub(crate) fn fade_offset(absolute: bool, height_vh: f64) -> f64 {
    if absolute || height_vh <= 0.0 {
        return 0.0;
    }
    (height_vh / (VIEWPORT_SPAN + height_vh)).min(0.5)
}

/// Apply an entry's directives in order and produce its record.
///
/// Every failing directive is dropped and reported; it never aborts the entry.
pub(crate) fn compile_entry(
    input: &EntryInput<'_>,
    resolver: &Resolver<'_>,
) -> (CompiledRecord, Vec<DirectiveError>) {
    let absolute = input.parsed.absolute;
    let offset = fade_offset(absolute, input.height_vh);

    let mut tl = Timeline::default();
    let mut errors = Vec::new();
    for directive in &input.parsed.directives {
        if let Err(e) = apply(&mut tl, directive, absolute, offset, resolver) {
            errors.push(e);
        }
    }

    let record = CompiledRecord {
        id: input.id.to_owned(),
        handle: input.handle,
        enter_at: tl.enter_at,
        duration: tl.duration,
        leave_at: tl.enter_at + tl.duration,
        absolute,
        height_vh: input.height_vh,
        position_curve: tl.position_curve,
        opacity: tl.opacity,
        x: tl.x,
        y: tl.y,
    };
    (record, errors)
}

fn positive_duration(keyword: &str, d: f64) -> Result<f64, DirectiveError> {
    if d.is_finite() && d > 0.0 {
        Ok(d)
    } else {
        Err(DirectiveError::malformed(
            keyword,
            format!("duration must be positive, got {d}"),
        ))
    }
}

fn points(p: [f64; 4]) -> Result<EasingCurve, DirectiveError> {
    let [x1, y1, x2, y2] = p;
    Ok(EasingCurve::new(x1, y1, x2, y2)?)
}

fn apply(
    tl: &mut Timeline,
    directive: &Directive,
    absolute: bool,
    offset: f64,
    resolver: &Resolver<'_>,
) -> Result<(), DirectiveError> {
    if !directive.allowed(absolute) {
        return Err(DirectiveError::InvalidModeUsage {
            keyword: directive.keyword().to_owned(),
            absolute,
        });
    }

    match directive {
        Directive::Enter(v) => {
            tl.enter_at = resolver.time(v, Edge::Enter)?;
        }
        Directive::Leave(v) => {
            let leave_at = resolver.time(v, Edge::Leave)?;
            tl.duration = positive_duration("leave", leave_at - tl.enter_at)?;
        }
        Directive::Duration(Scalar::Number(d)) => {
            tl.duration = positive_duration("duration", *d)?;
        }
        Directive::Duration(Scalar::Like(id)) => {
            tl.duration = resolver.record(id)?.duration;
        }
        Directive::Ease(CurveArg::Points(p)) => {
            tl.position_curve = points(*p)?;
        }
        Directive::Ease(CurveArg::Like(id)) => {
            tl.position_curve = resolver.record(id)?.position_curve.clone();
        }
        Directive::OpacityEase(OpacityArg::Symmetric(p)) => {
            tl.opacity = OpacityFn::Symmetric {
                curve: points(*p)?,
                offset,
            };
        }
        Directive::OpacityEase(OpacityArg::Split { fade_in, fade_out }) => {
            tl.opacity = OpacityFn::Split {
                fade_in: points(*fade_in)?,
                fade_out: points(*fade_out)?,
                offset,
            };
        }
        Directive::OpacityEase(OpacityArg::Like(id)) => {
            tl.opacity = resolver.record(id)?.opacity.clone();
        }
        Directive::Position(axis, arg) => {
            let track = compile_axis(*axis, arg, tl.enter_at, resolver)?;
            match axis {
                Axis::X => tl.x = track,
                Axis::Y => tl.y = track,
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/compile/compiler.rs"]
mod tests;
