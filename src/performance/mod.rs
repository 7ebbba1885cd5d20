use std::f64::consts::SQRT_2;

use crate::{
    difficulty::attributes::DifficultyAttributes,
    util::{mods::Mods, special_functions::erf},
};

use self::{attributes::PerformanceAttributes, judgements::Judgements};

pub mod attributes;
pub(crate) mod deviation;
pub mod judgements;

/// Tuning constants mapping the estimated deviation onto the performance
/// value.
///
/// Like [`StarWeights`](crate::StarWeights) these are recalibrated policy
/// values rather than structural invariants, so they are replaceable through
/// [`Performance::curve`].
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceCurve {
    /// Multiplier on the combined performance value.
    pub base_multiplier: f64,
    /// Deviation (in ms) at which the accuracy factor starts collapsing.
    pub acc_shift: f64,
    /// Exponent on the accuracy factor; higher punishes sloppy aim harder.
    pub acc_exponent: f64,
    /// Exponent of the norm combining the difficulty and accuracy portions.
    pub norm: f64,
}

impl Default for PerformanceCurve {
    fn default() -> Self {
        Self {
            base_multiplier: 1.12,
            acc_shift: 45.0,
            acc_exponent: 2.0,
            norm: 1.1,
        }
    }
}

/// Performance calculator on previously calculated difficulty attributes.
///
/// ```
/// use chart_pp::{Chart, Difficulty, Judgements};
///
/// let chart = Chart::default();
/// let diff_attrs = Difficulty::new().calculate(&chart);
///
/// let perf_attrs = diff_attrs
///     .performance()
///     .judgements(Judgements {
///         n_great: 500,
///         n_good: 12,
///         n_meh: 1,
///         n_miss: 2,
///     })
///     .calculate();
///
/// let pp = perf_attrs.pp;
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct Performance {
    attrs: DifficultyAttributes,
    mods: u32,
    judgements: Option<Judgements>,
    acc: Option<f64>,
    misses: u32,
    curve: PerformanceCurve,
}

impl From<DifficultyAttributes> for Performance {
    fn from(attrs: DifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl Performance {
    pub fn new(attrs: DifficultyAttributes) -> Self {
        Self {
            attrs,
            mods: 0,
            judgements: None,
            acc: None,
            misses: 0,
            curve: PerformanceCurve::default(),
        }
    }

    /// Specify modifiers through their bit values.
    ///
    /// They should match the modifiers the difficulty attributes were
    /// calculated with.
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;
        self
    }

    /// Specify the play's judgement counts.
    pub const fn judgements(mut self, judgements: Judgements) -> Self {
        self.judgements = Some(judgements);
        self
    }

    /// Specify the accuracy of a play as percentage between `0.0` and
    /// `100.0`.
    ///
    /// Only used when no explicit [`judgements`](Self::judgements) are given;
    /// counts matching the accuracy are approximated from the chart's object
    /// count.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some((acc / 100.0).clamp(0.0, 1.0));
        self
    }

    /// Specify the amount of misses of a play.
    ///
    /// Only used when no explicit [`judgements`](Self::judgements) are given.
    pub const fn misses(mut self, n_misses: u32) -> Self {
        self.misses = n_misses;
        self
    }

    /// Replace the deviation-to-performance tuning constants.
    pub fn curve(mut self, curve: PerformanceCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Perform the performance calculation.
    pub fn calculate(self) -> PerformanceAttributes {
        let judgements = self
            .judgements
            .unwrap_or_else(|| self.judgements_from_accuracy());

        let deviation = deviation::estimate(
            &judgements,
            self.attrs.great_hit_window,
            self.attrs.good_hit_window,
            self.attrs.meh_hit_window,
        );

        // Scale up misses on short charts; one miss out of fifty objects
        // says more about the play than one out of two thousand.
        let successful_hits = judgements.successful_hits();

        let effective_miss_count = if successful_hits > 0 {
            (1000.0 / f64::from(successful_hits)).max(1.0) * f64::from(judgements.n_miss)
        } else {
            f64::from(judgements.n_miss)
        };

        let mut multiplier = self.curve.base_multiplier;

        if self.mods.nf() {
            multiplier *= (1.0 - 0.02 * effective_miss_count).max(0.9);
        }

        if self.mods.hd() {
            multiplier *= 1.075;
        }

        if self.mods.ez() {
            multiplier *= 0.95;
        }

        if self.mods.rx() {
            multiplier *= 0.8;
        }

        let pp_difficulty = self.compute_difficulty_value(deviation, effective_miss_count);
        let pp_acc = self.compute_accuracy_value(deviation, &judgements);

        let norm = self.curve.norm;
        let pp = (pp_difficulty.powf(norm) + pp_acc.powf(norm)).powf(norm.recip()) * multiplier;

        PerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_difficulty,
            pp_acc,
            deviation,
            effective_miss_count,
        }
    }

    fn compute_difficulty_value(&self, deviation: f64, effective_miss_count: f64) -> f64 {
        if deviation.is_infinite() {
            return 0.0;
        }

        let attrs = &self.attrs;
        let base_difficulty = 5.0 * (attrs.stars / 0.11).max(1.0) - 4.0;

        let mut difficulty_value =
            (base_difficulty.powf(3.0) / 69052.51).min(base_difficulty.powf(2.25) / 1250.0);

        difficulty_value *= 1.0 + 0.1 * (attrs.stars - 10.0).max(0.0);

        let length_bonus = 1.0 + 0.1 * (f64::from(attrs.max_combo) / 1500.0).min(1.0);
        difficulty_value *= length_bonus;

        difficulty_value *= 0.986_f64.powf(effective_miss_count);

        let acc_factor = erf(self.curve.acc_shift / (SQRT_2 * deviation));

        difficulty_value * acc_factor.powf(self.curve.acc_exponent)
    }

    fn compute_accuracy_value(&self, deviation: f64, judgements: &Judgements) -> f64 {
        if deviation.is_infinite() || self.attrs.great_hit_window <= 0.0 {
            return 0.0;
        }

        let mut acc_value =
            (7.0 / deviation).powf(1.1) * self.attrs.stars.powf(0.4) * 100.0;

        let length_bonus = (f64::from(judgements.total_hits()) / 1500.0)
            .powf(0.3)
            .min(1.15);
        acc_value *= length_bonus;

        acc_value
    }

    /// Approximate judgement counts for the requested accuracy, assuming no
    /// lowest-tier hits.
    fn judgements_from_accuracy(&self) -> Judgements {
        let n_objects = self.attrs.n_objects();
        let n_miss = self.misses.min(n_objects);
        let remaining = n_objects - n_miss;

        let target = self.acc.unwrap_or(1.0);

        // With tier weights 6/2/1 and no mehs assumed:
        // 6 * acc * total = 6 * greats + 2 * (remaining - greats)
        let n_great = (6.0 * target * f64::from(n_objects) - 2.0 * f64::from(remaining)) / 4.0;
        let n_great = (n_great.round().max(0.0) as u32).min(remaining);

        Judgements {
            n_great,
            n_good: remaining - n_great,
            n_meh: 0,
            n_miss,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> DifficultyAttributes {
        DifficultyAttributes {
            stars: 5.0,
            great_hit_window: 50.0,
            good_hit_window: 100.0,
            meh_hit_window: 150.0,
            n_taps: 900,
            n_holds: 50,
            max_combo: 1000,
            clock_rate: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn accuracy_backfill_matches_target() {
        let calc = Performance::new(attrs()).accuracy(97.0).misses(3);
        let judgements = calc.judgements_from_accuracy();

        assert_eq!(judgements.n_miss, 3);
        assert_eq!(judgements.total_hits(), 950);
        assert!((judgements.accuracy() - 0.97).abs() < 0.01);
    }

    #[test]
    fn explicit_judgements_take_precedence() {
        let judgements = Judgements {
            n_great: 950,
            ..Default::default()
        };

        let with_acc = Performance::new(attrs())
            .judgements(judgements)
            .accuracy(12.0)
            .calculate();

        let without_acc = Performance::new(attrs()).judgements(judgements).calculate();

        assert_eq!(with_acc, without_acc);
    }

    #[test]
    fn misses_reduce_performance() {
        let clean = Performance::new(attrs())
            .judgements(Judgements {
                n_great: 950,
                ..Default::default()
            })
            .calculate();

        let missy = Performance::new(attrs())
            .judgements(Judgements {
                n_great: 940,
                n_miss: 10,
                ..Default::default()
            })
            .calculate();

        assert!(missy.pp < clean.pp);
        assert!(missy.effective_miss_count >= 10.0);
    }
}
