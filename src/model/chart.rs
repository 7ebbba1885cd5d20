use crate::model::pos2::Pos2;

/// A fully-resolved chart: the ordered object list plus the chart-level base
/// parameters that difficulty calculation depends on.
///
/// Decoding, timing-point resolution, and hold-path curve flattening are the
/// caller's concern; objects arrive with their final positions, times, and
/// hold waypoints. The list must be sorted by start time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Chart {
    pub hit_objects: Vec<HitObject>,
    /// Base difficulty slider in `0..=10`. Drives hit windows, the preempt
    /// and fade windows, and the object radius.
    pub difficulty: f64,
    /// Multiplier applied to hold-path travel distances.
    pub velocity: f64,
    /// Hold ticks per second of hold duration.
    pub tick_rate: f64,
}

impl Chart {
    /// Ticks spawned by a hold of the given clocked duration.
    pub(crate) fn ticks_in(&self, duration: f64) -> u32 {
        if duration <= 0.0 || self.tick_rate <= 0.0 {
            return 0;
        }

        (duration * self.tick_rate / 1000.0).floor() as u32
    }
}

/// A single playable object of a [`Chart`].
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos2,
    /// Start time in milliseconds, unadjusted for clock rate.
    pub start_time: f64,
    /// Lane index; `0` for charts without lanes.
    pub column: usize,
    pub kind: HitObjectKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Tap,
    Hold {
        /// End time in milliseconds, unadjusted for clock rate.
        end_time: f64,
        /// Resolved cursor path as playfield waypoints, head excluded.
        path: Vec<Pos2>,
    },
}

impl HitObject {
    pub const fn is_hold(&self) -> bool {
        matches!(self.kind, HitObjectKind::Hold { .. })
    }

    pub fn end_time(&self) -> f64 {
        match self.kind {
            HitObjectKind::Tap => self.start_time,
            HitObjectKind::Hold { end_time, .. } => end_time,
        }
    }

    /// The position the cursor rests on once the object is completed,
    /// ignoring travel leniency.
    pub fn end_pos(&self) -> Pos2 {
        match &self.kind {
            HitObjectKind::Tap => self.pos,
            HitObjectKind::Hold { path, .. } => path.last().copied().unwrap_or(self.pos),
        }
    }
}
