use std::f64::consts::SQRT_2;

use crate::util::{minimize::golden_section_min, special_functions::erf};

use super::judgements::Judgements;

/// Search bounds for the deviation in milliseconds. Below the lower bound the
/// tier probabilities are numerically indistinguishable from a perfect play;
/// above the upper bound they are indistinguishable from noise.
const MIN_DEVIATION: f64 = 0.5;
const MAX_DEVIATION: f64 = 500.0;

/// Bracket tolerance of the likelihood maximization in milliseconds.
const TOLERANCE: f64 = 1e-3;

/// Probabilities are floored before taking logarithms so a tier observed
/// despite a vanishing model probability cannot produce infinities.
const MIN_PROBABILITY: f64 = 1e-10;

/// Estimates the standard deviation of the player's hit-timing error from
/// aggregate judgement counts alone.
///
/// Each hit's error is modeled as one zero-mean Gaussian; a judgement tier
/// then occurs with the probability mass the Gaussian puts between that
/// tier's window edges. The deviation maximizing the likelihood of the
/// observed counts has no closed form, so it is found numerically. The
/// likelihood is unimodal in the deviation, which the golden-section search
/// relies on.
///
/// A play with zero successful hits carries no timing information and yields
/// `f64::INFINITY` without invoking the minimizer.
pub(crate) fn estimate(
    judgements: &Judgements,
    great_window: f64,
    good_window: f64,
    meh_window: f64,
) -> f64 {
    if judgements.successful_hits() == 0 || great_window <= 0.0 {
        return f64::INFINITY;
    }

    let n_great = f64::from(judgements.n_great);
    let n_good = f64::from(judgements.n_good);
    let n_meh = f64::from(judgements.n_meh);
    let n_miss = f64::from(judgements.n_miss);

    let neg_log_likelihood = |deviation: f64| {
        let scale = SQRT_2 * deviation;

        let p_within_great = erf(great_window / scale);
        let p_within_good = erf(good_window / scale);
        let p_within_meh = erf(meh_window / scale);

        let p_great = p_within_great;
        let p_good = p_within_good - p_within_great;
        let p_meh = p_within_meh - p_within_good;
        let p_miss = 1.0 - p_within_meh;

        -(n_great * p_great.max(MIN_PROBABILITY).ln()
            + n_good * p_good.max(MIN_PROBABILITY).ln()
            + n_meh * p_meh.max(MIN_PROBABILITY).ln()
            + n_miss * p_miss.max(MIN_PROBABILITY).ln())
    };

    golden_section_min(neg_log_likelihood, MIN_DEVIATION, MAX_DEVIATION, TOLERANCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GREAT: f64 = 50.0;
    const GOOD: f64 = 100.0;
    const MEH: f64 = 150.0;

    #[test]
    fn zero_successful_hits_is_infinite() {
        let judgements = Judgements {
            n_miss: 100,
            ..Default::default()
        };

        assert!(estimate(&judgements, GREAT, GOOD, MEH).is_infinite());
    }

    #[test]
    fn all_greats_approach_zero() {
        let judgements = Judgements {
            n_great: 1000,
            ..Default::default()
        };

        let deviation = estimate(&judgements, GREAT, GOOD, MEH);

        assert!(deviation < 20.0);
    }

    #[test]
    fn more_goods_mean_more_deviation() {
        let mut prev = 0.0;

        for n_good in [0, 50, 150, 400] {
            let judgements = Judgements {
                n_great: 1000 - n_good,
                n_good,
                ..Default::default()
            };

            let deviation = estimate(&judgements, GREAT, GOOD, MEH);

            assert!(deviation >= prev);
            prev = deviation;
        }
    }

    #[test]
    fn recovers_a_known_sigma() {
        // Counts synthesized from an exact sigma of 40 ms: the probability
        // mass per tier times a round play size.
        let sigma = 40.0;
        let scale = std::f64::consts::SQRT_2 * sigma;
        let n = 100_000.0;

        let p_great = erf(GREAT / scale);
        let p_good = erf(GOOD / scale) - p_great;
        let p_meh = erf(MEH / scale) - erf(GOOD / scale);
        let p_miss = 1.0 - erf(MEH / scale);

        let judgements = Judgements {
            n_great: (n * p_great).round() as u32,
            n_good: (n * p_good).round() as u32,
            n_meh: (n * p_meh).round() as u32,
            n_miss: (n * p_miss).round() as u32,
        };

        let deviation = estimate(&judgements, GREAT, GOOD, MEH);

        assert!((deviation - sigma).abs() < 1.0);
    }
}
