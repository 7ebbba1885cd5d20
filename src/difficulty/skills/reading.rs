use crate::difficulty::object::DifficultyObject;

/// Objects further back than this never contribute, regardless of opacity.
const MAX_HISTORY: usize = 10;

const MAX_OPACITY_BONUS: f64 = 0.4;
const HIDDEN_BONUS: f64 = 0.2;
const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

/// Raw reading difficulty of `curr`: how cluttered the playfield is at the
/// moment the object spawns.
///
/// Sums an influence term over every predecessor still visible (per its
/// opacity curve) when `curr` fades in. Very close objects are nerfed since
/// they can be read as one, temporally distant ones decay through the
/// growing strain-time denominator, and the sum is squared so dense walls of
/// objects grow superlinearly. Monotonous same-angle patterns are nerfed.
pub(crate) fn evaluate(
    curr: &DifficultyObject,
    objects: &[DifficultyObject],
    scaling_factor: f64,
    time_preempt: f64,
    time_fade_in: f64,
    hidden: bool,
) -> f64 {
    let spawn_time = curr.start_time - time_preempt;

    let mut small_dist_nerf = 1.0;
    let mut cumulative_strain_time = 0.0;
    let mut angle_repeat_count = 0.0;
    let mut result = 0.0;

    let mut last_obj = curr;

    // Backwards in time from the current object.
    for i in 0..curr.idx.min(MAX_HISTORY) {
        let Some(prev) = curr.previous(i, objects) else {
            break;
        };

        // Objects hit before the current one spawned are off the playfield;
        // everything further back is too.
        if prev.start_time < spawn_time {
            break;
        }

        let jump_dist = f64::from(curr.pos.distance(prev.end_pos));
        cumulative_strain_time += last_obj.strain_time;

        // An object right on top of the current one gives its position away.
        if i == 0 {
            small_dist_nerf = (jump_dist / 75.0).min(1.0);
        }

        // Stacked predecessors read as one; only the stack head counts fully.
        let stack_nerf = ((prev.jump_dist / scaling_factor) / 25.0).min(1.0);

        // The less faded in the current object was while the predecessor had
        // to be hit, the more it relies on reading ahead.
        let opacity_bonus = 1.0
            + MAX_OPACITY_BONUS
                * (1.0 - curr.opacity_at(prev.start_time, hidden, time_preempt, time_fade_in));

        result += stack_nerf * opacity_bonus * scaling_factor * jump_dist / cumulative_strain_time;

        if let Some((prev_angle, curr_angle)) = prev.angle.zip(curr.angle) {
            // Matching angles further back count less towards the nerf.
            if (prev_angle - curr_angle).abs() < 0.02 {
                angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
            }
        }

        last_obj = prev;
    }

    result = (small_dist_nerf * result).powf(2.0);

    // Shortened visibility windows make every read harder.
    if hidden {
        result *= 1.0 + HIDDEN_BONUS;
    }

    // Nerf constant-angle patterns; they read themselves.
    result *= MIN_ANGLE_MULTIPLIER + (1.0 - MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

    result
}
