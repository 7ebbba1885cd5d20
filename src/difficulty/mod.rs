use crate::{
    model::chart::Chart,
    util::{cancel::Cancellation, mods::Mods},
};

use self::{
    attributes::DifficultyAttributes,
    preprocess::{enrich, ScalingFactor, VisibilityWindows},
    skills::Skills,
};

pub mod attributes;
pub mod object;
pub(crate) mod preprocess;
pub(crate) mod skills;

const STAR_SCALING_FACTOR: f64 = 0.0675;

/// Tuning constants combining the per-skill ratings into the star rating.
///
/// These are periodically recalibrated policy values, not structural
/// invariants, which is why they are part of the public API instead of being
/// buried as magic numbers. The defaults are what the crate was balanced
/// against.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StarWeights {
    pub movement: f64,
    pub reading: f64,
    pub density: f64,
    /// Exponent of the power-mean; values slightly above 1 reward charts
    /// that are difficult in several dimensions at once.
    pub norm: f64,
}

impl Default for StarWeights {
    fn default() -> Self {
        Self {
            movement: 1.0,
            reading: 0.6,
            density: 0.9,
            norm: 1.1,
        }
    }
}

/// Difficulty calculator on charts.
///
/// ```
/// use chart_pp::{Chart, Difficulty};
///
/// let chart = Chart::default();
///
/// let attrs = Difficulty::new()
///     .mods(8 + 16) // HDHR
///     .calculate(&chart);
///
/// let stars = attrs.stars;
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct Difficulty {
    mods: u32,
    clock_rate: Option<f64>,
    weights: StarWeights,
}

impl Difficulty {
    pub fn new() -> Self {
        Self::default()
    }

    /// Specify modifiers through their bit values.
    pub const fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;
        self
    }

    /// Override the clock rate used in the calculation.
    ///
    /// If none is specified, it is taken from the modifiers, i.e. 1.5 for
    /// double time and 0.75 for half time.
    pub const fn clock_rate(mut self, clock_rate: f64) -> Self {
        self.clock_rate = Some(clock_rate);
        self
    }

    /// Replace the star rating combination constants.
    pub fn star_weights(mut self, weights: StarWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Perform the difficulty calculation.
    ///
    /// An empty chart yields all-zero attributes.
    pub fn calculate(&self, chart: &Chart) -> DifficultyAttributes {
        // Without a cancellation flag the calculation always completes.
        self.run(chart, None).unwrap_or_default()
    }

    /// Perform the difficulty calculation with cooperative cancellation.
    ///
    /// The flag is checked once per object during preprocessing; `None` is
    /// returned if it was raised. Useful for pathologically large charts.
    pub fn calculate_cancellable(
        &self,
        chart: &Chart,
        cancel: &Cancellation,
    ) -> Option<DifficultyAttributes> {
        self.run(chart, Some(cancel))
    }

    fn run(&self, chart: &Chart, cancel: Option<&Cancellation>) -> Option<DifficultyAttributes> {
        if chart.hit_objects.is_empty() {
            return Some(DifficultyAttributes::default());
        }

        let mods = self.mods;
        let clock_rate = self.clock_rate.unwrap_or_else(|| mods.clock_rate());

        let scaled_difficulty = (chart.difficulty * mods.difficulty_multiplier()).min(10.0);
        let windows = VisibilityWindows::new(chart.difficulty, mods, clock_rate);

        let mut attrs = DifficultyAttributes {
            great_hit_window: (80.0 - 6.0 * scaled_difficulty) / clock_rate,
            good_hit_window: (140.0 - 8.0 * scaled_difficulty) / clock_rate,
            meh_hit_window: (200.0 - 10.0 * scaled_difficulty) / clock_rate,
            preempt: windows.preempt,
            clock_rate,
            ..Default::default()
        };

        for h in chart.hit_objects.iter() {
            if h.is_hold() {
                attrs.n_holds += 1;
                attrs.n_ticks += chart.ticks_in(h.end_time() - h.start_time);
            } else {
                attrs.n_taps += 1;
            }
        }

        // Hold head and tail are both combo, as is every tick.
        attrs.max_combo = attrs.n_taps + 2 * attrs.n_holds + attrs.n_ticks;

        let scaling_factor = ScalingFactor::new(chart.difficulty);
        let objects = enrich(chart, mods, clock_rate, &scaling_factor, cancel)?;

        let total_columns = chart
            .hit_objects
            .iter()
            .map(|h| h.column)
            .max()
            .map_or(1, |max| max + 1);

        let mut skills = Skills::new(mods, &scaling_factor, &windows, total_columns);

        for h in objects.iter() {
            skills.process(h, &objects);
        }

        let mut movement = skills.movement.difficulty_value().sqrt() * STAR_SCALING_FACTOR;
        let mut reading = skills.reading.difficulty_value().sqrt() * STAR_SCALING_FACTOR;
        let density = skills.density.difficulty_value().sqrt() * STAR_SCALING_FACTOR;

        // Assistance automates most of the movement and trivializes reads.
        if mods.rx() {
            movement *= 0.9;
            reading *= 0.7;
        }

        attrs.movement = movement;
        attrs.reading = reading;
        attrs.density = density;
        attrs.stars = self.combine_stars(&attrs);

        Some(attrs)
    }

    fn combine_stars(&self, attrs: &DifficultyAttributes) -> f64 {
        let StarWeights {
            movement,
            reading,
            density,
            norm,
        } = self.weights;

        let sum = (movement * attrs.movement).powf(norm)
            + (reading * attrs.reading).powf(norm)
            + (density * attrs.density).powf(norm);

        sum.powf(norm.recip())
    }
}
