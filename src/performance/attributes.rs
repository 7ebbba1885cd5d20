use crate::difficulty::attributes::{AttributesError, DifficultyAttributes, ATTRIBUTES_VERSION};

use super::Performance;

mod id {
    pub const VERSION: u32 = 0;
    pub const PP: u32 = 1;
    pub const PP_DIFFICULTY: u32 = 2;
    pub const PP_ACC: u32 = 3;
    pub const DEVIATION: u32 = 4;
    pub const EFFECTIVE_MISS_COUNT: u32 = 5;
}

/// The result of a performance calculation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerformanceAttributes {
    /// The difficulty attributes that were used for the performance
    /// calculation.
    pub difficulty: DifficultyAttributes,
    /// The final performance value.
    pub pp: f64,
    /// The difficulty portion of the final performance value.
    pub pp_difficulty: f64,
    /// The accuracy portion of the final performance value.
    pub pp_acc: f64,
    /// The estimated standard deviation of the play's hit-timing error in
    /// milliseconds. `f64::INFINITY` for plays without successful hits.
    pub deviation: f64,
    /// Misses scaled up on short charts where each miss weighs more.
    pub effective_miss_count: f64,
}

impl PerformanceAttributes {
    /// Return the star rating.
    pub const fn stars(&self) -> f64 {
        self.difficulty.stars
    }

    /// Return the performance value.
    pub const fn pp(&self) -> f64 {
        self.pp
    }

    /// Return the maximum attainable combo of the chart.
    pub const fn max_combo(&self) -> u32 {
        self.difficulty.max_combo
    }

    /// Returns a builder for another performance calculation on the same
    /// difficulty attributes.
    pub fn performance(self) -> Performance {
        self.difficulty.into()
    }

    /// Export the performance fields as stable `(id, value)` pairs.
    ///
    /// The embedded difficulty attributes have their own pair representation
    /// and are persisted separately.
    pub fn to_pairs(&self) -> Vec<(u32, f64)> {
        vec![
            (id::VERSION, f64::from(ATTRIBUTES_VERSION)),
            (id::PP, self.pp),
            (id::PP_DIFFICULTY, self.pp_difficulty),
            (id::PP_ACC, self.pp_acc),
            (id::DEVIATION, self.deviation),
            (id::EFFECTIVE_MISS_COUNT, self.effective_miss_count),
        ]
    }

    /// Import from `(id, value)` pairs plus the separately persisted
    /// difficulty attributes.
    pub fn from_pairs(
        difficulty: DifficultyAttributes,
        pairs: &[(u32, f64)],
    ) -> Result<Self, AttributesError> {
        let version = pairs
            .iter()
            .find(|(key, _)| *key == id::VERSION)
            .map_or(0, |(_, value)| *value as u32);

        if version != ATTRIBUTES_VERSION {
            return Err(AttributesError::UnsupportedVersion { found: version });
        }

        let mut attrs = Self {
            difficulty,
            ..Default::default()
        };

        for &(key, value) in pairs {
            match key {
                id::VERSION => {}
                id::PP => attrs.pp = value,
                id::PP_DIFFICULTY => attrs.pp_difficulty = value,
                id::PP_ACC => attrs.pp_acc = value,
                id::DEVIATION => attrs.deviation = value,
                id::EFFECTIVE_MISS_COUNT => attrs.effective_miss_count = value,
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(id = key, "skipping unknown performance attribute id");
                }
            }
        }

        Ok(attrs)
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    fn from(attrs: PerformanceAttributes) -> Self {
        attrs.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_round_trip_including_infinity() {
        let attrs = PerformanceAttributes {
            difficulty: DifficultyAttributes::default(),
            pp: 0.0,
            pp_difficulty: 0.0,
            pp_acc: 0.0,
            deviation: f64::INFINITY,
            effective_miss_count: 3.5,
        };

        let imported =
            PerformanceAttributes::from_pairs(DifficultyAttributes::default(), &attrs.to_pairs())
                .unwrap();

        assert_eq!(imported, attrs);
    }
}
