//! scrollcue compiles per-element scroll directives into pure timeline functions.
//!
//! Each element carries a short directive string such as `enter 100; duration 50;
//! opacity-ease 0 0 1 1` describing how its position, visibility window and opacity
//! follow a single global scroll position (measured in vh).
//!
//! # Pipeline overview
//!
//! 1. **Parse**: directive strings become typed directives (`enter`, `leave`, `duration`,
//!    `ease`, `opacity-ease`, `x`, `y`).
//! 2. **Order**: cross-element references (`like`, `with-entry`, `with-exit`, `after-entry`,
//!    `after-exit`) form a graph that is ordered dependencies-first; cycles are rejected.
//! 3. **Compile**: every element becomes a [`CompiledRecord`]; the pass yields a
//!    [`CompilationReport`] with the total scrollable extent.
//! 4. **Evaluate**: records map a scroll position to [`Output`] values that a [`Renderer`]
//!    applies to the visual layer.
//!
//! Malformed directives never abort compilation: they are reported as [`Diagnostic`]s and the
//! offending directive is skipped.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod compile;
mod directive;
mod eval;
mod foundation;
mod render;
mod scene;

pub use animation::bezier::{CurveError, EasingCurve};
pub use compile::driver::{CompilationReport, CompileOpts, RawEntry, compile};
pub use directive::error::{Diagnostic, DirectiveError};
pub use eval::record::{AbsoluteSegment, AxisTrack, CompiledRecord, OpacityFn};
pub use eval::sample::ElementSample;
pub use foundation::core::{ElementHandle, Output};
pub use foundation::error::{ScrollcueError, ScrollcueResult};
pub use render::{InMemoryRenderer, Renderer, TextRenderer};
pub use scene::geometry::{GeometryProvider, StaticGeometry};
pub use scene::model::{ElementDef, Scene, SceneDef};
