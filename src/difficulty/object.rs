use crate::model::pos2::Pos2;

/// An enriched hit object: the raw object plus every derived geometric and
/// temporal feature the evaluators read.
///
/// One difficulty object exists per hit object *except the first*; a chart of
/// `n` objects yields `n - 1` entries. That realizes the convention that the
/// first object of a chart contributes zero strain to every skill. All times
/// are divided by the clock rate, all distances are radius-normalized.
///
/// Objects are stored contiguously; backwards lookup goes through
/// [`previous`](Self::previous), which is checked index arithmetic rather
/// than pointer chasing.
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyObject {
    /// Index into the difficulty object sequence, *not* the raw object list.
    pub idx: usize,
    pub column: usize,

    pub start_time: f64,
    pub end_time: f64,
    pub delta_time: f64,
    /// `delta_time` floored to [`MIN_DELTA_TIME`](Self::MIN_DELTA_TIME) so
    /// that chords cannot divide strain terms by (near) zero.
    pub strain_time: f64,

    /// Radius-normalized cursor travel from the previous object's resting
    /// position to this object.
    pub jump_dist: f64,
    /// Leniency-adjusted jump distance when the previous object is a hold.
    pub min_jump_dist: f64,
    /// Leniency-adjusted jump time when the previous object is a hold.
    pub min_jump_time: f64,
    /// Radius-normalized lazy travel distance along this object's hold path.
    pub travel_dist: f64,
    /// Clocked time spent traveling this object's hold path.
    pub travel_time: f64,

    /// Angle formed with the two preceding objects, absolute, in radians.
    pub angle: Option<f64>,
    /// How far the hold path deviates from its straight-line chord, in
    /// `0..=1`. Zero for taps and straight holds.
    pub curvature: f64,

    pub is_hold: bool,
    /// Playfield position, mirrored if the mirror modifier is active.
    pub pos: Pos2,
    /// Resting cursor position once the object is completed (lazy hold end).
    pub end_pos: Pos2,
}

impl DifficultyObject {
    pub const NORMALIZED_RADIUS: f64 = 50.0;
    pub const NORMALIZED_DIAMETER: f64 = Self::NORMALIZED_RADIUS * 2.0;

    pub const MIN_DELTA_TIME: f64 = 25.0;

    /// The `backwards_idx`-th preceding difficulty object, or `None` at the
    /// start of the sequence. `previous(0, ..)` is the direct predecessor.
    pub fn previous<'a>(&self, backwards_idx: usize, objects: &'a [Self]) -> Option<&'a Self> {
        self.idx
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| objects.get(idx))
    }

    /// The object's opacity at the given clocked timestamp.
    ///
    /// Objects fade in over `time_fade_in` starting `time_preempt` before
    /// their start time. Once the start time has passed the object counts as
    /// invisible. With the hidden modifier the object additionally fades back
    /// out before it is hit.
    pub fn opacity_at(&self, time: f64, hidden: bool, time_preempt: f64, time_fade_in: f64) -> f64 {
        if time > self.start_time {
            return 0.0;
        }

        let fade_in_start_time = self.start_time - time_preempt;

        let fade_in = ((time - fade_in_start_time) / time_fade_in).clamp(0.0, 1.0);

        if hidden {
            let fade_out_start_time = fade_in_start_time + time_fade_in;
            let fade_out_duration = time_preempt * super::preprocess::HD_FADE_OUT_MULTIPLIER;

            fade_in.min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            fade_in
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(idx: usize, start_time: f64) -> DifficultyObject {
        DifficultyObject {
            idx,
            column: 0,
            start_time,
            end_time: start_time,
            delta_time: 100.0,
            strain_time: 100.0,
            jump_dist: 0.0,
            min_jump_dist: 0.0,
            min_jump_time: 100.0,
            travel_dist: 0.0,
            travel_time: 100.0,
            angle: None,
            curvature: 0.0,
            is_hold: false,
            pos: Pos2::zero(),
            end_pos: Pos2::zero(),
        }
    }

    #[test]
    fn previous_is_bounds_checked() {
        let objects: Vec<_> = (0..3).map(|i| object(i, i as f64 * 100.0)).collect();

        assert_eq!(objects[2].previous(0, &objects).map(|h| h.idx), Some(1));
        assert_eq!(objects[2].previous(1, &objects).map(|h| h.idx), Some(0));
        assert!(objects[2].previous(2, &objects).is_none());
        assert!(objects[0].previous(0, &objects).is_none());
    }

    #[test]
    fn opacity_window() {
        let h = object(0, 1000.0);

        // Fully faded in right before its hit time, gone right after.
        assert!((h.opacity_at(999.0, false, 450.0, 400.0) - 1.0).abs() < f64::EPSILON);
        assert!(h.opacity_at(1001.0, false, 450.0, 400.0).abs() < f64::EPSILON);

        // Invisible before the preempt window opens.
        assert!(h.opacity_at(400.0, false, 450.0, 400.0).abs() < f64::EPSILON);

        // Hidden fades the object back out before its hit time; the fade-in
        // window is the already-shortened one the preprocessor hands out.
        assert!(h.opacity_at(999.0, true, 450.0, 160.0) < 0.1);
    }
}
