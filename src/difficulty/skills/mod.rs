use crate::util::mods::Mods;

use super::{
    object::DifficultyObject,
    preprocess::{ScalingFactor, VisibilityWindows},
};

pub mod density;
pub mod movement;
pub mod reading;

use self::density::DensityState;

/// Length of one strain section in milliseconds.
const SECTION_LEN: f64 = 400.0;

/// Geometric weight applied per rank when reducing section peaks.
const DECAY_WEIGHT: f64 = 0.9;

const MOVEMENT_SKILL_MULTIPLIER: f64 = 25.6;
const MOVEMENT_STRAIN_DECAY_BASE: f64 = 0.15;

const READING_SKILL_MULTIPLIER: f64 = 0.052;
const READING_STRAIN_DECAY_BASE: f64 = 0.15;

const DENSITY_SKILL_MULTIPLIER: f64 = 1.0;

pub(crate) fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    strain_decay_base.powf(ms / 1000.0)
}

/// The closed set of rated difficulty dimensions.
///
/// Each variant pairs one evaluator with whatever decay state that evaluator
/// needs; adding a dimension means adding a variant, not a trait impl.
pub(crate) enum SkillKind {
    Movement,
    Reading {
        scaling_factor: f64,
        time_preempt: f64,
        time_fade_in: f64,
        hidden: bool,
    },
    Density(DensityState),
}

impl SkillKind {
    fn skill_multiplier(&self) -> f64 {
        match self {
            Self::Movement => MOVEMENT_SKILL_MULTIPLIER,
            Self::Reading { .. } => READING_SKILL_MULTIPLIER,
            Self::Density(_) => DENSITY_SKILL_MULTIPLIER,
        }
    }

    fn strain_decay(&self, ms: f64) -> f64 {
        match self {
            Self::Movement => strain_decay(ms, MOVEMENT_STRAIN_DECAY_BASE),
            Self::Reading { .. } => strain_decay(ms, READING_STRAIN_DECAY_BASE),
            // The density evaluator folds its own two-part decay into the
            // returned value, so the running strain itself must not decay.
            Self::Density(_) => 1.0,
        }
    }

    fn strain_value_of(
        &mut self,
        curr: &DifficultyObject,
        objects: &[DifficultyObject],
        curr_strain: f64,
    ) -> f64 {
        match self {
            Self::Movement => movement::evaluate(curr, objects),
            Self::Reading {
                scaling_factor,
                time_preempt,
                time_fade_in,
                hidden,
            } => reading::evaluate(
                curr,
                objects,
                *scaling_factor,
                *time_preempt,
                *time_fade_in,
                *hidden,
            ),
            Self::Density(state) => state.strain_value_of(curr, curr_strain),
        }
    }

    /// Carry-over strain at a section boundary: the running value decayed
    /// from the previous object's timestamp to the boundary.
    fn initial_strain(&self, time: f64, prev_time: f64, curr_strain: f64) -> f64 {
        match self {
            Self::Movement | Self::Reading { .. } => {
                curr_strain * self.strain_decay(time - prev_time)
            }
            Self::Density(state) => state.initial_strain(time - prev_time),
        }
    }
}

/// One difficulty dimension's strain aggregator: exponential decay, 400 ms
/// section bucketing, and the geometric peak reduction.
pub(crate) struct Skill {
    curr_strain: f64,
    curr_section_peak: f64,
    curr_section_end: f64,
    strain_peaks: Vec<f64>,
    prev_time: Option<f64>,

    kind: SkillKind,
}

impl Skill {
    fn new(kind: SkillKind) -> Self {
        Self {
            curr_strain: 0.0,
            curr_section_peak: 0.0,
            curr_section_end: 0.0,
            strain_peaks: Vec::with_capacity(128),
            prev_time: None,
            kind,
        }
    }

    pub fn process(&mut self, curr: &DifficultyObject, objects: &[DifficultyObject]) {
        if curr.idx == 0 {
            self.curr_section_end = (curr.start_time / SECTION_LEN).ceil() * SECTION_LEN;
        }

        // Flush a peak for every section boundary crossed since the previous
        // object; skipped (empty) sections record the decayed carry-over.
        while curr.start_time > self.curr_section_end {
            self.strain_peaks.push(self.curr_section_peak);

            self.curr_section_peak = self.kind.initial_strain(
                self.curr_section_end,
                self.prev_time.unwrap_or(0.0),
                self.curr_strain,
            );

            self.curr_section_end += SECTION_LEN;
        }

        let decayed = self.curr_strain * self.kind.strain_decay(curr.delta_time);
        let value = self.kind.strain_value_of(curr, objects, decayed);

        self.curr_strain = decayed + value * self.kind.skill_multiplier();
        self.curr_section_peak = self.curr_strain.max(self.curr_section_peak);
        self.prev_time = Some(curr.start_time);
    }

    /// Reduces the section peaks into the skill's scalar difficulty value:
    /// highest peaks first, each weighted by `0.9^rank`. Rewards sustained
    /// difficulty over isolated spikes. An empty chart yields zero.
    pub fn difficulty_value(mut self) -> f64 {
        self.strain_peaks.push(self.curr_section_peak);

        let mut peaks = self.strain_peaks;
        peaks.retain(|&peak| peak > 0.0);
        peaks.sort_unstable_by(|a, b| b.total_cmp(a));

        let mut difficulty = 0.0;
        let mut weight = 1.0;

        for strain in peaks {
            difficulty += strain * weight;
            weight *= DECAY_WEIGHT;
        }

        difficulty
    }
}

/// All skills of one calculation, fed in a single pass.
pub(crate) struct Skills {
    pub movement: Skill,
    pub reading: Skill,
    pub density: Skill,
}

impl Skills {
    pub fn new(
        mods: u32,
        scaling_factor: &ScalingFactor,
        windows: &VisibilityWindows,
        total_columns: usize,
    ) -> Self {
        Self {
            movement: Skill::new(SkillKind::Movement),
            reading: Skill::new(SkillKind::Reading {
                scaling_factor: 52.0 / scaling_factor.radius,
                time_preempt: windows.preempt,
                time_fade_in: windows.fade_in,
                hidden: mods.hd(),
            }),
            density: Skill::new(SkillKind::Density(DensityState::new(total_columns))),
        }
    }

    pub fn process(&mut self, curr: &DifficultyObject, objects: &[DifficultyObject]) {
        self.movement.process(curr, objects);
        self.reading.process(curr, objects);
        self.density.process(curr, objects);
    }
}
