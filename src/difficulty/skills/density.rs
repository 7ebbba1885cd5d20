use crate::difficulty::object::DifficultyObject;

const INDIVIDUAL_DECAY_BASE: f64 = 0.125;
const OVERALL_DECAY_BASE: f64 = 0.3;

/// Release differences beyond this many milliseconds no longer make
/// overlapping holds awkward.
const RELEASE_THRESHOLD: f64 = 30.0;

/// Per-lane pattern-density state.
///
/// Tracks an individually decaying strain per lane plus one overall strain.
/// For chords the per-lane component is the running maximum across the
/// simultaneous group while the overall component keeps accumulating, so the
/// group's effective strain is `max(per-lane) + max(overall)` regardless of
/// the order the members are processed in.
pub(crate) struct DensityState {
    start_times: Box<[f64]>,
    end_times: Box<[f64]>,
    individual_strains: Box<[f64]>,

    individual_strain: f64,
    overall_strain: f64,
}

impl DensityState {
    pub fn new(total_columns: usize) -> Self {
        let total_columns = total_columns.max(1);

        Self {
            start_times: vec![0.0; total_columns].into_boxed_slice(),
            end_times: vec![0.0; total_columns].into_boxed_slice(),
            individual_strains: vec![0.0; total_columns].into_boxed_slice(),
            individual_strain: 0.0,
            overall_strain: 1.0,
        }
    }

    /// The evaluator's contribution for `curr`.
    ///
    /// Returns the difference to the aggregator's running strain so that the
    /// running value ends up at exactly `individual + overall`; combined with
    /// a decay base of 1 this makes the aggregator track the maximum strain
    /// of any one object per section.
    pub fn strain_value_of(&mut self, curr: &DifficultyObject, curr_strain: f64) -> f64 {
        let start_time = curr.start_time;
        let end_time = curr.end_time;
        let column = curr.column.min(self.individual_strains.len() - 1);

        let mut is_overlapping = false;

        // Lowest release difference assumable with the current information.
        let mut closest_end_time = (end_time - start_time).abs();
        // Factor on everything while another hold is going on.
        let mut hold_factor = 1.0;
        // Addition for a hold that has to be released awkwardly.
        let mut hold_addition = 0.0;

        for i in 0..self.end_times.len() {
            // Overlapped if another lane's note body covers this note.
            is_overlapping |= self.end_times[i] > start_time + 1.0
                && end_time > self.end_times[i] + 1.0
                && start_time > self.start_times[i] + 1.0;

            if self.end_times[i] > end_time + 1.0 && start_time > self.start_times[i] + 1.0 {
                hold_factor = 1.25;
            }

            closest_end_time = (end_time - self.end_times[i]).abs().min(closest_end_time);
        }

        // Releasing several notes together is as easy as releasing one, so
        // the addition fades out over a sigmoid as releases line up.
        if is_overlapping {
            hold_addition = (1.0 + (0.27 * (RELEASE_THRESHOLD - closest_end_time)).exp()).recip();
        }

        self.individual_strains[column] = apply_decay(
            self.individual_strains[column],
            start_time - self.start_times[column],
            INDIVIDUAL_DECAY_BASE,
        );
        self.individual_strains[column] += 2.0 * hold_factor;

        // Within a chord the per-lane component is the hardest lane so far.
        self.individual_strain = if curr.delta_time <= 1.0 {
            self.individual_strain.max(self.individual_strains[column])
        } else {
            self.individual_strains[column]
        };

        self.overall_strain = apply_decay(self.overall_strain, curr.delta_time, OVERALL_DECAY_BASE);
        self.overall_strain += (1.0 + hold_addition) * hold_factor;

        self.start_times[column] = start_time;
        self.end_times[column] = end_time;

        self.individual_strain + self.overall_strain - curr_strain
    }

    pub fn initial_strain(&self, elapsed: f64) -> f64 {
        let individual = apply_decay(self.individual_strain, elapsed, INDIVIDUAL_DECAY_BASE);
        let overall = apply_decay(self.overall_strain, elapsed, OVERALL_DECAY_BASE);

        individual + overall
    }
}

fn apply_decay(value: f64, delta_time: f64, decay_base: f64) -> f64 {
    value * decay_base.powf(delta_time / 1000.0)
}
