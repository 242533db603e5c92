use std::collections::HashMap;

use crate::animation::bezier::EasingCurve;
use crate::directive::ast::{Axis, RefKind, Value};
use crate::directive::error::DirectiveError;
use crate::eval::record::{AxisTrack, CompiledRecord};

/// Which of an element's window edges a time value feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Enter,
    Leave,
}

/// Read-only view of the records finalized so far in a compile pass.
///
/// The driver compiles in dependency order, so a record referenced by a
/// valid directive is always present; a miss means the id does not exist.
pub(crate) struct Resolver<'a> {
    pub(crate) index: &'a HashMap<String, usize>,
    pub(crate) records: &'a [Option<CompiledRecord>],
}

impl<'a> Resolver<'a> {
    pub(crate) fn record(&self, id: &str) -> Result<&'a CompiledRecord, DirectiveError> {
        let Some(&i) = self.index.get(id) else {
            return Err(DirectiveError::unresolvable(id, "no element with this id"));
        };
        self.records
            .get(i)
            .and_then(Option::as_ref)
            .ok_or_else(|| DirectiveError::unresolvable(id, "element is not compiled yet"))
    }

    /// Resolve an `enter`/`leave` value.
    pub(crate) fn time(&self, value: &Value, edge: Edge) -> Result<f64, DirectiveError> {
        let (kind, id, offset) = match value {
            Value::Number(n) => return Ok(*n),
            Value::Reference { kind, id, offset } => (*kind, id.as_str(), *offset),
        };
        let rec = self.record(id)?;
        Ok(match kind {
            RefKind::Like => match edge {
                Edge::Enter => rec.enter_at,
                Edge::Leave => rec.leave_at,
            },
            RefKind::WithEntry => rec.enter_at,
            RefKind::WithExit => rec.leave_at,
            RefKind::AfterEntry => rec.enter_at + offset,
            RefKind::AfterExit => rec.leave_at + offset,
        })
    }

    pub(crate) fn axis(&self, axis: Axis, id: &str) -> Result<&'a AxisTrack, DirectiveError> {
        let rec = self.record(id)?;
        Ok(match axis {
            Axis::X => &rec.x,
            Axis::Y => &rec.y,
        })
    }

    /// Single destination of another element's axis.
    pub(crate) fn fixed(&self, axis: Axis, id: &str) -> Result<f64, DirectiveError> {
        self.axis(axis, id)?.fixed().ok_or_else(|| {
            DirectiveError::unresolvable(id, "axis does not resolve to a single fixed position")
        })
    }

    /// Waypoint curve of another element's axis.
    pub(crate) fn axis_curve(&self, axis: Axis, id: &str) -> Result<EasingCurve, DirectiveError> {
        self.axis(axis, id)?
            .curve()
            .cloned()
            .ok_or_else(|| DirectiveError::unresolvable(id, "axis has no waypoint curve"))
    }
}
