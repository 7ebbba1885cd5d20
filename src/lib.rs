//! Library to calculate difficulty and performance attributes for
//! fully-resolved rhythm charts.
//!
//! ## Description
//!
//! `chart-pp` turns an ordered list of timed, positioned playable objects
//! into a context-free **star rating**, and a completed play's aggregate
//! judgement counts into a play-specific **performance value**. Difficulty
//! comes from causal strain accumulation over time-decayed 400 ms sections,
//! scored by geometry-aware evaluators for movement, reading, and pattern
//! density. Performance infers the player's timing precision from judgement
//! counts alone via maximum-likelihood estimation and maps it through a
//! tuned curve.
//!
//! Both outputs are deterministic: identical inputs produce bit-identical
//! attributes across runs and platforms, so they can be persisted and
//! compared. Chart decoding, hold-path resolution, audio, rendering, and
//! replay handling are deliberately out of scope.
//!
//! ## Usage
//!
//! ```
//! use chart_pp::{Chart, Difficulty, HitObject, HitObjectKind, Judgements, Pos2};
//!
//! let chart = Chart {
//!     hit_objects: vec![
//!         HitObject {
//!             pos: Pos2::new(100.0, 100.0),
//!             start_time: 500.0,
//!             column: 0,
//!             kind: HitObjectKind::Tap,
//!         },
//!         HitObject {
//!             pos: Pos2::new(200.0, 150.0),
//!             start_time: 700.0,
//!             column: 1,
//!             kind: HitObjectKind::Tap,
//!         },
//!     ],
//!     difficulty: 5.0,
//!     velocity: 1.0,
//!     tick_rate: 1.0,
//! };
//!
//! // Calculate difficulty attributes
//! let diff_attrs = Difficulty::new()
//!     .mods(8 + 16) // HDHR
//!     .calculate(&chart);
//!
//! let stars = diff_attrs.stars;
//!
//! // Calculate performance attributes, re-using the difficulty attributes
//! let perf_attrs = diff_attrs
//!     .performance()
//!     .mods(8 + 16) // same as before
//!     .judgements(Judgements {
//!         n_great: 2,
//!         n_good: 0,
//!         n_meh: 0,
//!         n_miss: 0,
//!     })
//!     .calculate();
//!
//! let pp = perf_attrs.pp;
//!
//! println!("Stars: {stars} | PP: {pp}");
//! ```
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Calculation anomalies (non-converged optimizer, unknown attribute ids) are logged through `tracing::warn`/`debug`. If the feature is not enabled, such cases are handled silently. | [`tracing`]
//!
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names
)]

#[doc(inline)]
pub use self::{
    difficulty::{
        attributes::{AttributesError, DifficultyAttributes},
        Difficulty, StarWeights,
    },
    model::{
        chart::{Chart, HitObject, HitObjectKind},
        pos2::Pos2,
    },
    performance::{
        attributes::PerformanceAttributes, judgements::Judgements, Performance, PerformanceCurve,
    },
    util::{cancel::Cancellation, mods::Mods},
};

/// Types for difficulty calculation.
pub mod difficulty;

/// Types describing the input chart.
pub mod model;

/// Types for performance calculation.
pub mod performance;

mod util;
