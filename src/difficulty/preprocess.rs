use crate::{
    model::{
        chart::{Chart, HitObject, HitObjectKind},
        pos2::Pos2,
    },
    util::{cancel::Cancellation, difficulty::difficulty_range, mods::Mods},
};

use super::object::DifficultyObject;

/// Base radius of a hit object before the difficulty slider scales it.
const OBJECT_RADIUS: f64 = 64.0;

/// Playfield width; the mirror modifier reflects x positions across it.
const PLAYFIELD_WIDTH: f32 = 512.0;

const MAX_HOLD_RADIUS: f64 = DifficultyObject::NORMALIZED_RADIUS * 2.4;
const ASSUMED_HOLD_RADIUS: f64 = DifficultyObject::NORMALIZED_RADIUS * 1.8;

pub(crate) const HD_FADE_IN_MULTIPLIER: f64 = 0.4;
pub(crate) const HD_FADE_OUT_MULTIPLIER: f64 = 0.3;

/// Factor translating playfield distances into radius-normalized distances.
///
/// All objects share the same radius, so this is computed once per
/// calculation instead of being stored per object.
pub(crate) struct ScalingFactor {
    pub factor: f64,
    pub radius: f64,
}

impl ScalingFactor {
    pub fn new(difficulty: f64) -> Self {
        let scale = (1.0 - 0.7 * (difficulty - 5.0) / 5.0) / 2.0;
        let radius = OBJECT_RADIUS * scale;

        let factor = DifficultyObject::NORMALIZED_RADIUS / radius;

        // Small radii are harder to hit than the normalization captures.
        let factor = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius).min(5.0) / 50.0)
        } else {
            factor
        };

        Self { factor, radius }
    }
}

/// Timing windows derived from the chart's difficulty slider and modifiers.
pub(crate) struct VisibilityWindows {
    pub preempt: f64,
    pub fade_in: f64,
}

impl VisibilityWindows {
    pub fn new(difficulty: f64, mods: u32, clock_rate: f64) -> Self {
        let scaled = (difficulty * mods.difficulty_multiplier()).min(10.0);
        let preempt = difficulty_range(scaled, 1800.0, 1200.0, 450.0) / clock_rate;

        let mut fade_in = 400.0 * (preempt / 450.0).min(1.0);

        if mods.hd() {
            fade_in *= HD_FADE_IN_MULTIPLIER;
        }

        Self { preempt, fade_in }
    }
}

/// Per-object data shared between the two enrichment passes.
struct ResolvedObject {
    pos: Pos2,
    /// Lazy cursor resting position after the object, radius leniency applied.
    end_cursor: Pos2,
    start_time: f64,
    end_time: f64,
    column: usize,
    is_hold: bool,
    travel_dist: f64,
    travel_time: f64,
    curvature: f64,
}

/// Turns the raw object list into the enriched difficulty object sequence.
///
/// Returns `None` if the cancellation flag is raised; the flag is checked once
/// per object, which is the crate's only cancellation point.
pub(crate) fn enrich(
    chart: &Chart,
    mods: u32,
    clock_rate: f64,
    scaling_factor: &ScalingFactor,
    cancel: Option<&Cancellation>,
) -> Option<Vec<DifficultyObject>> {
    let mut resolved = Vec::with_capacity(chart.hit_objects.len());

    for h in chart.hit_objects.iter() {
        if cancel.is_some_and(Cancellation::is_cancelled) {
            return None;
        }

        resolved.push(resolve(h, chart, mods, clock_rate, scaling_factor));
    }

    let mut objects = Vec::with_capacity(resolved.len().saturating_sub(1));

    for i in 1..resolved.len() {
        let curr = &resolved[i];
        let last = &resolved[i - 1];
        let last_last = i.checked_sub(2).map(|i| &resolved[i]);

        objects.push(difficulty_object(i - 1, curr, last, last_last, scaling_factor));
    }

    Some(objects)
}

fn resolve(
    h: &HitObject,
    chart: &Chart,
    mods: u32,
    clock_rate: f64,
    scaling_factor: &ScalingFactor,
) -> ResolvedObject {
    let mirror = |pos: Pos2| {
        if mods.mr() {
            Pos2::new(PLAYFIELD_WIDTH - pos.x, pos.y)
        } else {
            pos
        }
    };

    let pos = mirror(h.pos);
    let start_time = h.start_time / clock_rate;
    let end_time = h.end_time() / clock_rate;

    match &h.kind {
        HitObjectKind::Tap => ResolvedObject {
            pos,
            end_cursor: pos,
            start_time,
            end_time,
            column: h.column,
            is_hold: false,
            travel_dist: 0.0,
            travel_time: 0.0,
            curvature: 0.0,
        },
        HitObjectKind::Hold { path, .. } => {
            let velocity = if chart.velocity > 0.0 {
                chart.velocity
            } else {
                1.0
            };

            let (travel_dist, end_cursor) = lazy_travel(pos, path, scaling_factor.factor, &mirror);
            let travel_time = (end_time - start_time).max(DifficultyObject::MIN_DELTA_TIME);

            ResolvedObject {
                pos,
                end_cursor,
                start_time,
                end_time,
                column: h.column,
                is_hold: true,
                travel_dist: travel_dist * velocity,
                travel_time,
                curvature: path_curvature(pos, path, &mirror),
            }
        }
    }
}

/// Walks a hold path the way a lenient cursor would: movement only counts
/// once a waypoint leaves the assumed follow radius, and the cursor stops
/// short of each waypoint by that radius.
fn lazy_travel(
    head: Pos2,
    path: &[Pos2],
    factor: f64,
    mirror: &impl Fn(Pos2) -> Pos2,
) -> (f64, Pos2) {
    let mut cursor = head;
    let mut travel_dist = 0.0;

    for waypoint in path.iter().copied().map(mirror) {
        let movement = waypoint - cursor;
        let movement_len = factor * f64::from(movement.length());

        if movement_len > ASSUMED_HOLD_RADIUS {
            let progress = ((movement_len - ASSUMED_HOLD_RADIUS) / movement_len) as f32;
            cursor += movement * progress;
            travel_dist += movement_len - ASSUMED_HOLD_RADIUS;
        }
    }

    (travel_dist, cursor)
}

/// Normalized deviation of the hold path from its straight-line chord.
///
/// Feeds the movement evaluator's visual-tracking bonus: the further the path
/// strays from a straight line, the less predictable following it is.
fn path_curvature(head: Pos2, path: &[Pos2], mirror: &impl Fn(Pos2) -> Pos2) -> f64 {
    let Some(tail) = path.last().copied().map(mirror) else {
        return 0.0;
    };

    let chord = tail - head;
    let chord_len = f64::from(chord.length());

    if chord_len < f64::EPSILON {
        return 0.0;
    }

    let mut max_offset = 0.0_f64;

    for waypoint in path.iter().copied().map(mirror) {
        let v = waypoint - head;
        let cross = f64::from(chord.x * v.y - chord.y * v.x).abs();
        max_offset = max_offset.max(cross / chord_len);
    }

    (max_offset / chord_len).min(1.0)
}

fn difficulty_object(
    idx: usize,
    curr: &ResolvedObject,
    last: &ResolvedObject,
    last_last: Option<&ResolvedObject>,
    scaling_factor: &ScalingFactor,
) -> DifficultyObject {
    let delta_time = curr.start_time - last.start_time;
    let strain_time = delta_time.max(DifficultyObject::MIN_DELTA_TIME);

    let factor = scaling_factor.factor;

    let jump_dist = f64::from(curr.pos.distance(last.end_cursor)) * factor;

    let mut min_jump_dist = jump_dist;
    let mut min_jump_time = strain_time;

    if last.is_hold {
        let last_travel_time = last.travel_time;
        min_jump_time = (strain_time - last_travel_time).max(DifficultyObject::MIN_DELTA_TIME);

        // The cursor only has to leave the lenient follow radius around the
        // hold tail, not reach its exact position.
        let tail_jump_dist = f64::from(last.end_cursor.distance(curr.pos)) * factor;
        let leniency = MAX_HOLD_RADIUS - ASSUMED_HOLD_RADIUS;

        min_jump_dist = (jump_dist - leniency)
            .min(tail_jump_dist - MAX_HOLD_RADIUS)
            .max(0.0);
    }

    let angle = last_last.map(|last_last| {
        let v1 = last_last.end_cursor - last.pos;
        let v2 = curr.pos - last.end_cursor;

        let dot = f64::from(v1.dot(v2));
        let det = f64::from(v1.x * v2.y - v1.y * v2.x);

        det.atan2(dot).abs()
    });

    DifficultyObject {
        idx,
        column: curr.column,
        start_time: curr.start_time,
        end_time: curr.end_time,
        delta_time,
        strain_time,
        jump_dist,
        min_jump_dist,
        min_jump_time,
        travel_dist: curr.travel_dist,
        travel_time: curr.travel_time,
        angle,
        curvature: curr.curvature,
        is_hold: curr.is_hold,
        pos: curr.pos,
        end_pos: curr.end_cursor,
    }
}
