use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::Accuracy;

/// The result of a difficulty calculation on an osu!standard map.
///
/// Next to the star values it carries the mod-adjusted map attributes and
/// object counts so that it can be reused for pp calculations through
/// [`OsuPP::attributes`](crate::OsuPP::attributes).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyAttributes {
    /// The difficulty of the aim skill.
    pub aim_strain: f64,
    /// The difficulty of the speed skill.
    pub speed_strain: f64,
    /// The final star rating.
    pub stars: f64,
    /// Amount of objects that are considered singletaps.
    pub n_singles: usize,
    /// Amount of circles and sliders whose distance in time to the previous
    /// object is at least the singletap threshold.
    pub n_singles_threshold: usize,
    /// The approach rate.
    pub ar: f64,
    /// The overall difficulty.
    pub od: f64,
    /// The circle size.
    pub cs: f64,
    /// The health drain rate.
    pub hp: f64,
    /// The amount of circles.
    pub n_circles: usize,
    /// The amount of sliders.
    pub n_sliders: usize,
    /// The amount of spinners.
    pub n_spinners: usize,
    /// The maximum combo.
    pub max_combo: usize,
}

impl DifficultyAttributes {
    /// Return the amount of hitobjects.
    #[inline]
    pub fn n_objects(&self) -> usize {
        self.n_circles + self.n_sliders + self.n_spinners
    }
}

impl Display for DifficultyAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{} stars ({} aim, {} speed)",
            self.stars, self.aim_strain, self.speed_strain
        )
    }
}

/// Combine aim and speed stars into the final star rating.
#[inline]
pub(crate) fn total_stars(aim: f64, speed: f64) -> f64 {
    const EXTREME_SCALING_FACTOR: f64 = 0.5;

    aim + speed + (aim - speed).abs() * EXTREME_SCALING_FACTOR
}

/// The result of a performance calculation on an osu!standard map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerformanceAttributes {
    /// The difficulty attributes that were used for the performance calculation.
    pub difficulty: DifficultyAttributes,
    /// The aim portion of the final pp.
    pub pp_aim: f64,
    /// The speed portion of the final pp.
    pub pp_speed: f64,
    /// The accuracy portion of the final pp.
    pub pp_acc: f64,
    /// The final performance points.
    pub pp: f64,
    /// The hit results the pp were calculated on.
    pub accuracy: Accuracy,
}

impl PerformanceAttributes {
    /// Return the star value.
    #[inline]
    pub fn stars(&self) -> f64 {
        self.difficulty.stars
    }

    /// Return the performance point value.
    #[inline]
    pub fn pp(&self) -> f64 {
        self.pp
    }

    /// Return the maximum combo of the map.
    #[inline]
    pub fn max_combo(&self) -> usize {
        self.difficulty.max_combo
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    #[inline]
    fn from(attributes: PerformanceAttributes) -> Self {
        attributes.difficulty
    }
}

impl Display for PerformanceAttributes {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}pp ({} aim, {} speed, {} acc) at {}%",
            self.pp,
            self.pp_aim,
            self.pp_speed,
            self.pp_acc,
            self.accuracy.value() * 100.0
        )
    }
}
