#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Tube construction engine (I/O- and CLI-agnostic).
//!
//! Builds a tolerance "tube" around a reference curve and validates a test
//! curve against it, in four stages:
//!
//! - **Resolver** (`tolerance`): tolerances -> the half-width/half-height
//!   rectangle swept along the reference.
//! - **Envelope builder** (`envelope`): sweeps the rectangle along the
//!   reference, emitting a raw (possibly self-intersecting) lower/upper
//!   boundary.
//! - **Loop remover** (`loop_remove`): resolves the raw envelope's
//!   backward-moving segments into a strictly x-monotone curve.
//! - **Interpolator and validator** (`interpolate`, `validate`): resample
//!   the cleaned envelopes onto the test curve's x column and flag
//!   out-of-tolerance samples.
//!
//! [`compare`] is the single entry point that runs all four stages.
//! `Side::Lower`/`Side::Upper` parameterize the builder and loop remover
//! instead of duplicating each into its own function.

pub mod compare;
pub mod curve;
pub mod envelope;
pub mod error;
pub mod interpolate;
pub mod loop_remove;
pub mod side;
pub mod tolerance;
pub mod validate;

pub use compare::{compare, CompareOutcome};
pub use curve::Curve;
pub use error::{EngineError, Result};
pub use side::Side;
pub use tolerance::{Rectangle, Tolerances};
pub use validate::ErrorReport;
