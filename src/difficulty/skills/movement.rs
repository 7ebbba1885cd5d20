use crate::{
    difficulty::object::DifficultyObject,
    util::{
        difficulty::{milliseconds_to_bpm, smootherstep, smoothstep},
        float_ext::FloatExt,
    },
};

const WIDE_ANGLE_MULTIPLIER: f64 = 1.5;
const ACUTE_ANGLE_MULTIPLIER: f64 = 2.4;
const HOLD_MULTIPLIER: f64 = 1.35;
const VELOCITY_CHANGE_MULTIPLIER: f64 = 0.75;

/// Weight of the path-curvature term in the hold tracking bonus.
const CURVE_MULTIPLIER: f64 = 0.65;

/// Raw movement difficulty of reaching `curr`.
///
/// The base term is plain cursor velocity. With enough history it is extended
/// through hold paths, rewarded for wide/acute direction changes (penalized
/// when the same angle class repeats), and for abrupt velocity changes
/// between near-simultaneous objects.
pub(crate) fn evaluate(curr: &DifficultyObject, objects: &[DifficultyObject]) -> f64 {
    let last = curr.previous(0, objects);
    let last_last = curr.previous(1, objects);

    // Velocity needed to reach the current object, assuming the previous
    // object was a tap.
    let mut curr_vel = curr.jump_dist / curr.strain_time;

    // If the previous object was a hold, the cursor is still traveling when
    // the jump starts; combine travel velocity with the post-path movement.
    if let Some(last) = last.filter(|h| h.is_hold) {
        let travel_vel = last.travel_dist / last.travel_time;
        let movement_vel = curr.min_jump_dist / curr.min_jump_time;

        curr_vel = curr_vel.max(travel_vel + movement_vel);
    }

    let mut strain = curr_vel;

    let Some((last, last_last)) = last.zip(last_last) else {
        // Fewer than three objects: the base velocity is all there is.
        return strain;
    };

    let mut prev_vel = last.jump_dist / last.strain_time;

    if last_last.is_hold {
        let travel_vel = last_last.travel_dist / last_last.travel_time;
        let movement_vel = last.min_jump_dist / last.min_jump_time;

        prev_vel = prev_vel.max(travel_vel + movement_vel);
    }

    let mut wide_angle_bonus = 0.0;
    let mut acute_angle_bonus = 0.0;
    let mut vel_change_bonus = 0.0;

    // Angle bonuses only apply while the rhythm stays steady; a tempo change
    // dominates the difficulty on its own.
    if curr.strain_time.max(last.strain_time) < 1.25 * curr.strain_time.min(last.strain_time) {
        if let Some((curr_angle, last_angle)) = curr.angle.zip(last.angle) {
            // Take the smaller velocity as base so a single fast jump cannot
            // carry the bonus alone.
            let angle_bonus = curr_vel.min(prev_vel);

            wide_angle_bonus = calc_wide_angle_bonus(curr_angle);
            acute_angle_bonus = calc_acute_angle_bonus(curr_angle);

            // Repeating the same angle class is easy to anticipate.
            wide_angle_bonus *= 1.0
                - wide_angle_bonus.min(calc_wide_angle_bonus(last_angle).powf(3.0));
            acute_angle_bonus *= 0.08
                + 0.92
                    * (1.0 - acute_angle_bonus.min(calc_acute_angle_bonus(last_angle).powf(3.0)));

            // Full wide-angle bonus needs at least a diameter of spacing.
            wide_angle_bonus *= angle_bonus
                * smootherstep(curr.jump_dist, 0.0, DifficultyObject::NORMALIZED_DIAMETER);

            // Acute angles only get difficult at high tempo and spacing.
            acute_angle_bonus *= angle_bonus
                * smootherstep(milliseconds_to_bpm(curr.strain_time, Some(2)), 300.0, 400.0)
                * smootherstep(
                    curr.jump_dist,
                    DifficultyObject::NORMALIZED_DIAMETER,
                    DifficultyObject::NORMALIZED_DIAMETER * 2.0,
                );
        }
    }

    if prev_vel.max(curr_vel).not_eq(0.0) {
        // Award velocity differences on the whole-object average velocity
        // rather than the individual jump and travel velocities.
        let prev_vel = (last.jump_dist + last_last.travel_dist) / last.strain_time;
        let curr_vel = (curr.jump_dist + last.travel_dist) / curr.strain_time;

        let dist_ratio =
            ((std::f64::consts::FRAC_PI_2 * (prev_vel - curr_vel).abs() / prev_vel.max(curr_vel))
                .sin())
            .powf(2.0);

        let overlap_vel_buff = (DifficultyObject::NORMALIZED_DIAMETER * 1.25
            / curr.strain_time.min(last.strain_time))
        .min((prev_vel - curr_vel).abs());

        vel_change_bonus = overlap_vel_buff * dist_ratio;

        // Penalize rhythm changes so the bonus targets spacing changes.
        let rhythm_ratio =
            curr.strain_time.min(last.strain_time) / curr.strain_time.max(last.strain_time);
        vel_change_bonus *= rhythm_ratio.powf(2.0);
    }

    // Either the acute bonus or the wide-angle/velocity-change combination,
    // whichever is larger; they describe mutually exclusive patterns.
    strain += (acute_angle_bonus * ACUTE_ANGLE_MULTIPLIER).max(
        wide_angle_bonus * WIDE_ANGLE_MULTIPLIER + vel_change_bonus * VELOCITY_CHANGE_MULTIPLIER,
    );

    // Holds reward travel velocity, scaled up the further the path strays
    // from a straight line since tracking it is less predictable.
    if last.is_hold {
        let travel_vel = last.travel_dist / last.travel_time;
        strain += travel_vel * (1.0 + CURVE_MULTIPLIER * last.curvature) * HOLD_MULTIPLIER;
    }

    strain
}

fn calc_wide_angle_bonus(angle: f64) -> f64 {
    smoothstep(angle, f64::to_radians(40.0), f64::to_radians(140.0))
}

fn calc_acute_angle_bonus(angle: f64) -> f64 {
    smoothstep(angle, f64::to_radians(140.0), f64::to_radians(40.0))
}
