use std::sync::OnceLock;

const SAMPLE_COUNT: usize = 11;
const SAMPLE_STEP: f64 = 1.0 / (SAMPLE_COUNT as f64 - 1.0);
const NEWTON_ITERATIONS: usize = 4;
const NEWTON_MIN_SLOPE: f64 = 0.001;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 10;

/// Control points rejected by [`EasingCurve::new`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// A control coordinate is NaN or infinite.
    #[error("bezier control point is not finite: ({x1}, {y1}, {x2}, {y2})")]
    NonFinite {
        /// First control x.
        x1: f64,
        /// First control y.
        y1: f64,
        /// Second control x.
        x2: f64,
        /// Second control y.
        y2: f64,
    },
    /// An x control lies outside `[0, 1]`, so x would not be monotonic.
    #[error("bezier x values must be in [0, 1], got x1={x1} x2={x2}")]
    XOutOfRange {
        /// First control x.
        x1: f64,
        /// Second control x.
        x2: f64,
    },
}

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve.
///
/// Evaluation inverts the x polynomial (sample table + Newton-Raphson, falling
/// back to bisection on flat slopes) and returns the y polynomial at the
/// solved parameter. The sample table is built on first use and cached.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "[f64; 4]", into = "[f64; 4]")]
pub struct EasingCurve {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    samples: OnceLock<[f64; SAMPLE_COUNT]>,
}

impl EasingCurve {
    /// `(0, 0, 1, 1)`: output equals input.
    pub const LINEAR: [f64; 4] = [0.0, 0.0, 1.0, 1.0];

    /// Validate and build a curve.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, CurveError> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(CurveError::NonFinite { x1, y1, x2, y2 });
        }
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(CurveError::XOutOfRange { x1, x2 });
        }
        Ok(Self {
            x1,
            y1,
            x2,
            y2,
            samples: OnceLock::new(),
        })
    }

    /// The identity curve.
    pub fn linear() -> Self {
        Self::unchecked(Self::LINEAR)
    }

    pub(crate) fn unchecked([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            samples: OnceLock::new(),
        }
    }

    /// Control points as `[x1, y1, x2, y2]`.
    pub fn points(&self) -> [f64; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    /// True when the curve maps every input onto itself.
    pub fn is_identity(&self) -> bool {
        self.x1 == self.y1 && self.x2 == self.y2
    }

    /// Eased value at `progress`.
    ///
    /// Identity curves return `progress` untouched, even outside `[0, 1]`.
    /// Everything else pins `<= 0` to exactly 0 and `>= 1` to exactly 1.
    pub fn evaluate(&self, progress: f64) -> f64 {
        if self.is_identity() {
            return progress;
        }
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.t_for_x(progress);
        calc_bezier(t, self.y1, self.y2)
    }

    fn sample_table(&self) -> &[f64; SAMPLE_COUNT] {
        self.samples.get_or_init(|| {
            let mut table = [0.0; SAMPLE_COUNT];
            for (i, slot) in table.iter_mut().enumerate() {
                *slot = calc_bezier(i as f64 * SAMPLE_STEP, self.x1, self.x2);
            }
            table
        })
    }

    fn t_for_x(&self, x: f64) -> f64 {
        let table = self.sample_table();
        let last = SAMPLE_COUNT - 1;

        let mut interval_start = 0.0;
        let mut current = 1usize;
        while current != last && table[current] <= x {
            interval_start += SAMPLE_STEP;
            current += 1;
        }
        current -= 1;

        let span = table[current + 1] - table[current];
        let dist = if span > 0.0 {
            (x - table[current]) / span
        } else {
            0.0
        };
        let guess = interval_start + dist * SAMPLE_STEP;

        let slope = slope_at(guess, self.x1, self.x2);
        if slope >= NEWTON_MIN_SLOPE {
            newton_raphson(x, guess, self.x1, self.x2)
        } else if slope == 0.0 {
            guess
        } else {
            binary_subdivide(x, interval_start, interval_start + SAMPLE_STEP, self.x1, self.x2)
        }
    }
}

impl PartialEq for EasingCurve {
    fn eq(&self, other: &Self) -> bool {
        self.points() == other.points()
    }
}

impl Default for EasingCurve {
    fn default() -> Self {
        Self::linear()
    }
}

impl TryFrom<[f64; 4]> for EasingCurve {
    type Error = CurveError;

    fn try_from([x1, y1, x2, y2]: [f64; 4]) -> Result<Self, Self::Error> {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<EasingCurve> for [f64; 4] {
    fn from(c: EasingCurve) -> Self {
        c.points()
    }
}

// Polynomial coefficients for a 1D cubic bezier anchored at 0 and 1.
fn coeff_a(a1: f64, a2: f64) -> f64 {
    1.0 - 3.0 * a2 + 3.0 * a1
}

fn coeff_b(a1: f64, a2: f64) -> f64 {
    3.0 * a2 - 6.0 * a1
}

fn coeff_c(a1: f64) -> f64 {
    3.0 * a1
}

fn calc_bezier(t: f64, a1: f64, a2: f64) -> f64 {
    ((coeff_a(a1, a2) * t + coeff_b(a1, a2)) * t + coeff_c(a1)) * t
}

fn slope_at(t: f64, a1: f64, a2: f64) -> f64 {
    3.0 * coeff_a(a1, a2) * t * t + 2.0 * coeff_b(a1, a2) * t + coeff_c(a1)
}

fn newton_raphson(x: f64, mut guess: f64, x1: f64, x2: f64) -> f64 {
    for _ in 0..NEWTON_ITERATIONS {
        let slope = slope_at(guess, x1, x2);
        if slope == 0.0 {
            return guess;
        }
        let err = calc_bezier(guess, x1, x2) - x;
        guess -= err / slope;
    }
    guess
}

fn binary_subdivide(x: f64, mut lo: f64, mut hi: f64, x1: f64, x2: f64) -> f64 {
    let mut t = lo;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        t = lo + (hi - lo) / 2.0;
        let err = calc_bezier(t, x1, x2) - x;
        if err.abs() <= SUBDIVISION_PRECISION {
            break;
        }
        if err > 0.0 {
            hi = t;
        } else {
            lo = t;
        }
    }
    t
}

#[cfg(test)]
#[path = "../../tests/unit/animation/bezier.rs"]
mod tests;
