use thiserror::Error;

use crate::performance::Performance;

/// Version tag written into every exported attribute list (id 0).
///
/// Bump whenever the meaning of an existing id changes; adding new ids is
/// backwards compatible and needs no bump.
pub const ATTRIBUTES_VERSION: u32 = 1;

mod id {
    pub const VERSION: u32 = 0;
    pub const STARS: u32 = 1;
    pub const MOVEMENT: u32 = 2;
    pub const READING: u32 = 3;
    pub const DENSITY: u32 = 4;
    pub const GREAT_HIT_WINDOW: u32 = 5;
    pub const GOOD_HIT_WINDOW: u32 = 6;
    pub const MEH_HIT_WINDOW: u32 = 7;
    pub const PREEMPT: u32 = 8;
    pub const N_TAPS: u32 = 9;
    pub const N_HOLDS: u32 = 10;
    pub const N_TICKS: u32 = 11;
    pub const MAX_COMBO: u32 = 12;
    pub const CLOCK_RATE: u32 = 13;
}

/// The result of a difficulty calculation.
///
/// Persisted externally through [`to_pairs`](Self::to_pairs) /
/// [`from_pairs`](Self::from_pairs); the pair representation is keyed by
/// stable integer ids, never by field name, so stored values survive field
/// renames and reordering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyAttributes {
    /// The difficulty of the movement skill.
    pub movement: f64,
    /// The difficulty of the reading skill.
    pub reading: f64,
    /// The difficulty of the pattern-density skill.
    pub density: f64,
    /// The final star rating.
    pub stars: f64,
    /// Hit window of the highest judgement tier in milliseconds.
    pub great_hit_window: f64,
    /// Hit window of the middle judgement tier in milliseconds.
    pub good_hit_window: f64,
    /// Hit window of the lowest judgement tier in milliseconds.
    pub meh_hit_window: f64,
    /// Time an object is on the playfield before its hit time, in
    /// milliseconds.
    pub preempt: f64,
    /// The amount of tap objects.
    pub n_taps: u32,
    /// The amount of hold objects.
    pub n_holds: u32,
    /// The amount of hold ticks.
    pub n_ticks: u32,
    /// The maximum attainable combo.
    pub max_combo: u32,
    /// The clock rate the attributes were calculated at.
    pub clock_rate: f64,
}

impl DifficultyAttributes {
    /// Return the amount of hit objects.
    pub const fn n_objects(&self) -> u32 {
        self.n_taps + self.n_holds
    }

    /// Return the maximum attainable combo.
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Returns a builder for performance calculation.
    pub fn performance(self) -> Performance {
        self.into()
    }

    /// Export as stable `(id, value)` pairs, version pair first.
    pub fn to_pairs(&self) -> Vec<(u32, f64)> {
        vec![
            (id::VERSION, f64::from(ATTRIBUTES_VERSION)),
            (id::STARS, self.stars),
            (id::MOVEMENT, self.movement),
            (id::READING, self.reading),
            (id::DENSITY, self.density),
            (id::GREAT_HIT_WINDOW, self.great_hit_window),
            (id::GOOD_HIT_WINDOW, self.good_hit_window),
            (id::MEH_HIT_WINDOW, self.meh_hit_window),
            (id::PREEMPT, self.preempt),
            (id::N_TAPS, f64::from(self.n_taps)),
            (id::N_HOLDS, f64::from(self.n_holds)),
            (id::N_TICKS, f64::from(self.n_ticks)),
            (id::MAX_COMBO, f64::from(self.max_combo)),
            (id::CLOCK_RATE, self.clock_rate),
        ]
    }

    /// Import from `(id, value)` pairs.
    ///
    /// Ids this version doesn't know are skipped so that lists written by a
    /// newer minor schema still import; absent ids leave their field at the
    /// default. Only a version mismatch is an error.
    pub fn from_pairs(pairs: &[(u32, f64)]) -> Result<Self, AttributesError> {
        let version = pairs
            .iter()
            .find(|(key, _)| *key == id::VERSION)
            .map_or(0, |(_, value)| *value as u32);

        if version != ATTRIBUTES_VERSION {
            return Err(AttributesError::UnsupportedVersion { found: version });
        }

        let mut attrs = Self::default();

        for &(key, value) in pairs {
            match key {
                id::VERSION => {}
                id::STARS => attrs.stars = value,
                id::MOVEMENT => attrs.movement = value,
                id::READING => attrs.reading = value,
                id::DENSITY => attrs.density = value,
                id::GREAT_HIT_WINDOW => attrs.great_hit_window = value,
                id::GOOD_HIT_WINDOW => attrs.good_hit_window = value,
                id::MEH_HIT_WINDOW => attrs.meh_hit_window = value,
                id::PREEMPT => attrs.preempt = value,
                id::N_TAPS => attrs.n_taps = value as u32,
                id::N_HOLDS => attrs.n_holds = value as u32,
                id::N_TICKS => attrs.n_ticks = value as u32,
                id::MAX_COMBO => attrs.max_combo = value as u32,
                id::CLOCK_RATE => attrs.clock_rate = value,
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(id = key, "skipping unknown difficulty attribute id");
                }
            }
        }

        Ok(attrs)
    }
}

/// Error while importing attributes from their pair representation.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum AttributesError {
    #[error("unsupported attributes version: {found}")]
    UnsupportedVersion { found: u32 },
}
