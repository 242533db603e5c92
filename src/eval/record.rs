use crate::animation::bezier::EasingCurve;
use crate::foundation::core::{ElementHandle, Output, clamp01, lerp};

/// Scroll distance (vh) an element travels through the viewport by default.
pub(crate) const VIEWPORT_SPAN: f64 = 100.0;

/// One step of a custom absolute timeline.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AbsoluteSegment {
    /// Position of the authoring clause, for "first clause" lookups.
    pub clause: usize,
    /// Time (vh of scroll, relative to the element's enter) at which `end_pos` is reached.
    pub end_time: f64,
    /// Position when the segment starts.
    pub start_pos: f64,
    /// Position when the segment completes.
    pub end_pos: f64,
    /// Timing curve between the two.
    pub easing: EasingCurve,
}

/// Compiled positioning of one axis.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AxisTrack {
    /// The axis is not driven.
    Unpositioned,
    /// Pinned at a single destination.
    Fixed {
        /// Destination.
        value: f64,
    },
    /// Evenly spaced waypoints over the element's lifetime.
    Waypoints {
        /// At least two positions.
        values: Vec<f64>,
        /// Curve shared by every leg.
        curve: EasingCurve,
    },
    /// Explicitly timed segments.
    Custom {
        /// Position before the first segment.
        initial: f64,
        /// Sorted by descending `end_time`.
        segments: Vec<AbsoluteSegment>,
    },
}

impl AxisTrack {
    /// Position at `progress` for an element living `duration` vh of scroll.
    pub fn evaluate(&self, progress: f64, duration: f64) -> Option<f64> {
        match self {
            Self::Unpositioned => None,
            Self::Fixed { value } => Some(*value),
            Self::Waypoints { values, curve } => Some(eval_waypoints(values, curve, progress)),
            Self::Custom { initial, segments } => {
                Some(eval_segments(*initial, segments, progress * duration))
            }
        }
    }

    /// Single destination, when the axis has one.
    pub fn fixed(&self) -> Option<f64> {
        match self {
            Self::Fixed { value } => Some(*value),
            _ => None,
        }
    }

    /// Shared waypoint curve, when the axis has one.
    pub fn curve(&self) -> Option<&EasingCurve> {
        match self {
            Self::Waypoints { curve, .. } => Some(curve),
            _ => None,
        }
    }
}

fn eval_waypoints(values: &[f64], curve: &EasingCurve, progress: f64) -> f64 {
    let (Some(&first), Some(&last)) = (values.first(), values.last()) else {
        return 0.0;
    };
    if progress <= 0.0 {
        return first;
    }
    if progress >= 1.0 {
        return last;
    }
    let legs = values.len() - 1;
    if legs == 0 {
        return first;
    }
    let scaled = progress * legs as f64;
    let leg = (scaled.floor() as usize).min(legs - 1);
    let local = scaled - leg as f64;
    lerp(values[leg], values[leg + 1], curve.evaluate(local))
}

fn phase(elapsed: f64, from: f64, to: f64) -> f64 {
    if to <= from {
        return if elapsed >= to { 1.0 } else { 0.0 };
    }
    clamp01((elapsed - from) / (to - from))
}

fn ease_between(seg: &AbsoluteSegment, from_pos: f64, t: f64) -> f64 {
    lerp(from_pos, seg.end_pos, seg.easing.evaluate(t))
}

fn eval_segments(initial: f64, segments: &[AbsoluteSegment], elapsed: f64) -> f64 {
    match segments.iter().position(|s| s.end_time <= elapsed) {
        // Everything has completed.
        Some(0) => segments[0].end_pos,
        Some(done) => {
            let prev = &segments[done];
            let active = &segments[done - 1];
            let t = phase(elapsed, prev.end_time, active.end_time);
            ease_between(active, active.start_pos, t)
        }
        None => {
            let Some(first) = segments.iter().min_by_key(|s| s.clause) else {
                return initial;
            };
            let t = phase(elapsed, 0.0, first.end_time);
            ease_between(first, initial, t)
        }
    }
}

/// Opacity as a function of progress.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OpacityFn {
    /// Fully opaque throughout.
    Constant,
    /// One curve fading in over the first half and mirrored for the second.
    Symmetric {
        /// Fade curve.
        curve: EasingCurve,
        /// Progress fraction skipped at both ends.
        offset: f64,
    },
    /// Independent fade-in and fade-out curves.
    Split {
        /// First half.
        fade_in: EasingCurve,
        /// Second half, evaluated on the mirrored progress.
        fade_out: EasingCurve,
        /// Progress fraction skipped at both ends.
        offset: f64,
    },
}

impl OpacityFn {
    /// Opacity at `progress`, always in `[0, 1]` for curves with y in range.
    pub fn evaluate(&self, progress: f64) -> f64 {
        match self {
            Self::Constant => 1.0,
            Self::Symmetric { curve, offset } => {
                let mirrored = progress.min(1.0 - progress);
                curve.evaluate(fade_phase(mirrored, *offset))
            }
            Self::Split {
                fade_in,
                fade_out,
                offset,
            } => {
                if progress <= 0.5 {
                    fade_in.evaluate(fade_phase(progress, *offset))
                } else {
                    fade_out.evaluate(fade_phase(1.0 - progress, *offset))
                }
            }
        }
    }
}

// Maps the distance from the nearest lifetime edge onto [0, 1] across half the lifetime.
fn fade_phase(edge_distance: f64, offset: f64) -> f64 {
    let span = 0.5 - offset;
    if span <= f64::EPSILON {
        return if edge_distance >= offset { 1.0 } else { 0.0 };
    }
    clamp01((edge_distance - offset) / span)
}

/// Fully resolved, reference-free scroll behaviour of one element.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompiledRecord {
    /// Element id.
    pub id: String,
    /// Handle handed back to the renderer.
    pub handle: ElementHandle,
    /// Global scroll position (vh) where the element's lifetime starts.
    pub enter_at: f64,
    /// Lifetime length (vh of scroll).
    pub duration: f64,
    /// Always `enter_at + duration`.
    pub leave_at: f64,
    /// Absolute positioning instead of the default vertical motion.
    pub absolute: bool,
    /// Element height in vh, captured from the geometry provider.
    pub height_vh: f64,
    /// Curve of the default vertical motion.
    pub position_curve: EasingCurve,
    /// Opacity channel.
    pub opacity: OpacityFn,
    /// Absolute horizontal track (vw).
    pub x: AxisTrack,
    /// Absolute vertical track (vh).
    pub y: AxisTrack,
}

impl CompiledRecord {
    /// Progress within the element's own window. Not clamped.
    pub fn local_progress(&self, scroll: f64) -> f64 {
        (scroll - self.enter_at) / self.duration
    }

    /// Absolute elements are only shown inside `[enter_at, leave_at]`.
    pub fn visible(&self, scroll: f64) -> bool {
        if !self.absolute {
            return true;
        }
        !(scroll < self.enter_at || scroll > self.leave_at)
    }

    /// Horizontal position.
    pub fn eval_x(&self, progress: f64) -> Output {
        if !self.absolute {
            return Output::Auto;
        }
        self.x
            .evaluate(progress, self.duration)
            .map_or(Output::Auto, Output::Vw)
    }

    /// Vertical position: the absolute track, or the default rise through the viewport.
    pub fn eval_y(&self, progress: f64) -> Output {
        if self.absolute {
            return self
                .y
                .evaluate(progress, self.duration)
                .map_or(Output::Auto, Output::Vh);
        }
        let travelled = self.position_curve.evaluate(progress);
        Output::Vh(VIEWPORT_SPAN - travelled * (VIEWPORT_SPAN + self.height_vh))
    }

    /// Opacity.
    pub fn eval_opacity(&self, progress: f64) -> Output {
        Output::Opacity(self.opacity.evaluate(progress))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/record.rs"]
mod tests;
