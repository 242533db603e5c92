/// How a time value points at another element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RefKind {
    /// Same field as the directive being resolved (`enter like B` reads B's enter).
    Like,
    /// Referenced element's enter time.
    WithEntry,
    /// Referenced element's leave time.
    WithExit,
    /// Referenced enter time plus an offset.
    AfterEntry,
    /// Referenced leave time plus an offset.
    AfterExit,
}

impl RefKind {
    pub(crate) fn from_word(word: &str) -> Option<Self> {
        Some(match word {
            "like" => Self::Like,
            "with-entry" => Self::WithEntry,
            "with-exit" => Self::WithExit,
            "after-entry" => Self::AfterEntry,
            "after-exit" => Self::AfterExit,
            _ => return None,
        })
    }

    pub(crate) fn takes_offset(self) -> bool {
        matches!(self, Self::AfterEntry | Self::AfterExit)
    }
}

/// A number or a pointer into another element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Number(f64),
    Reference {
        kind: RefKind,
        id: String,
        offset: f64,
    },
}

/// A bare number or `like ID`, used where only the "same field" form makes sense.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Scalar {
    Number(f64),
    Like(String),
}

/// `x1 y1 x2 y2` or `like ID`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CurveArg {
    Points([f64; 4]),
    Like(String),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum OpacityArg {
    Symmetric([f64; 4]),
    Split { fade_in: [f64; 4], fade_out: [f64; 4] },
    Like(String),
}

/// Time spec of one custom-segment clause.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ClauseTime {
    /// Relative to the element's own enter time.
    At(f64),
    /// Relative to the previous clause's time.
    After(f64),
    /// Another element's enter/leave time, rebased onto this element's enter.
    Reference { kind: RefKind, id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SegmentClause {
    pub(crate) time: ClauseTime,
    pub(crate) start: Option<Scalar>,
    pub(crate) end: Scalar,
    pub(crate) curve: Option<CurveArg>,
}

/// Parameters of an `x`/`y` directive.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AxisArg {
    /// One value (fixed position) or several evenly spaced waypoints.
    Waypoints {
        values: Vec<Scalar>,
        curve: Option<CurveArg>,
    },
    /// `initial . T: [start]- end | curve | ...`
    Custom {
        initial: Scalar,
        clauses: Vec<SegmentClause>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Directive {
    Enter(Value),
    Leave(Value),
    Duration(Scalar),
    Ease(CurveArg),
    OpacityEase(OpacityArg),
    Position(Axis, AxisArg),
}

impl Directive {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Self::Enter(_) => "enter",
            Self::Leave(_) => "leave",
            Self::Duration(_) => "duration",
            Self::Ease(_) => "ease",
            Self::OpacityEase(_) => "opacity-ease",
            Self::Position(Axis::X, _) => "x",
            Self::Position(Axis::Y, _) => "y",
        }
    }

    /// Processing rank: `leave` and `y` run after everything else.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Self::Leave(_) => 1,
            Self::Position(Axis::Y, _) => 2,
            _ => 0,
        }
    }

    /// Whether the directive is accepted in the given mode.
    pub(crate) fn allowed(&self, absolute: bool) -> bool {
        match self {
            Self::Ease(_) => !absolute,
            Self::Position(..) => absolute,
            _ => true,
        }
    }

    /// Ids of every element this directive reads from.
    pub(crate) fn references(&self) -> Vec<&str> {
        let mut out = Vec::new();
        match self {
            Self::Enter(v) | Self::Leave(v) => {
                if let Value::Reference { id, .. } = v {
                    out.push(id.as_str());
                }
            }
            Self::Duration(s) => push_scalar(&mut out, s),
            Self::Ease(c) => push_curve(&mut out, c),
            Self::OpacityEase(OpacityArg::Like(id)) => out.push(id.as_str()),
            Self::OpacityEase(_) => {}
            Self::Position(_, AxisArg::Waypoints { values, curve }) => {
                for v in values {
                    push_scalar(&mut out, v);
                }
                if let Some(c) = curve {
                    push_curve(&mut out, c);
                }
            }
            Self::Position(_, AxisArg::Custom { initial, clauses }) => {
                push_scalar(&mut out, initial);
                for clause in clauses {
                    if let ClauseTime::Reference { id, .. } = &clause.time {
                        out.push(id.as_str());
                    }
                    if let Some(s) = &clause.start {
                        push_scalar(&mut out, s);
                    }
                    push_scalar(&mut out, &clause.end);
                    if let Some(c) = &clause.curve {
                        push_curve(&mut out, c);
                    }
                }
            }
        }
        out
    }
}

fn push_scalar<'a>(out: &mut Vec<&'a str>, s: &'a Scalar) {
    if let Scalar::Like(id) = s {
        out.push(id.as_str());
    }
}

fn push_curve<'a>(out: &mut Vec<&'a str>, c: &'a CurveArg) {
    if let CurveArg::Like(id) = c {
        out.push(id.as_str());
    }
}

/// Output of [`crate::directive::parser::parse_directives`].
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ParsedDirectives {
    pub(crate) absolute: bool,
    /// Already in processing order.
    pub(crate) directives: Vec<Directive>,
    /// Directives dropped while parsing.
    pub(crate) errors: Vec<crate::directive::error::DirectiveError>,
}
