/// Aggregate judgement counts of a completed play.
///
/// The performance calculation consumes only these counts, never per-frame
/// replay data.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Judgements {
    /// Hits inside the highest-tier window.
    pub n_great: u32,
    /// Hits inside the middle-tier window.
    pub n_good: u32,
    /// Hits inside the lowest-tier window.
    pub n_meh: u32,
    /// Objects missed entirely.
    pub n_miss: u32,
}

impl Judgements {
    pub const fn total_hits(&self) -> u32 {
        self.n_great + self.n_good + self.n_meh + self.n_miss
    }

    pub const fn successful_hits(&self) -> u32 {
        self.n_great + self.n_good + self.n_meh
    }

    /// Accuracy in `0.0..=1.0`, weighting the tiers 1, 1/3, and 1/6.
    pub fn accuracy(&self) -> f64 {
        if self.total_hits() == 0 {
            return 0.0;
        }

        let numerator = 6.0 * f64::from(self.n_great)
            + 2.0 * f64::from(self.n_good)
            + f64::from(self.n_meh);

        numerator / (6.0 * f64::from(self.total_hits()))
    }
}
