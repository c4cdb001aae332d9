use super::{attributes::total_stars, DifficultyAttributes, OsuStars, PerformanceAttributes};

use crate::{
    parse::{ApplyFlags, BeatmapAttributes},
    Accuracy, Beatmap, GameMode, Mods,
};

/// `Result<_, PpError>`
pub type PpResult<T> = Result<T, PpError>;

/// Reasons for a performance calculation to fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PpError {
    /// Only osu!standard maps can be calculated.
    #[error("unsupported mode {0}")]
    UnsupportedMode(GameMode),
    /// Only score v1 and score v2 are known.
    #[error("unsupported score version {0}")]
    UnsupportedScoreVersion(u8),
}

/// Calculator for pp on osu!standard maps.
///
/// # Example
///
/// ```
/// # use rosu_ppv2::{OsuPP, Beatmap, PpError};
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = OsuPP::new(&map)
///     .mods(8 + 64) // HDDT
///     .combo(1234)
///     .misses(1)
///     .accuracy(98.5) // should be set last
///     .calculate()?;
///
/// println!("PP: {} | Stars: {}", attrs.pp(), attrs.stars());
///
/// let next_result = OsuPP::new(&map)
///     .attributes(attrs) // reusing previous results for performance
///     .mods(8 + 64)      // has to be the same to reuse attributes
///     .accuracy(99.5)
///     .calculate()?;
///
/// println!("PP: {} | Stars: {}", next_result.pp(), next_result.stars());
/// # Ok::<_, PpError>(())
/// ```
#[derive(Clone, Debug)]
pub struct OsuPP<'m> {
    map: Option<&'m Beatmap>,
    attributes: Option<DifficultyAttributes>,
    strains: Option<(f64, f64)>,
    mods: u32,
    mode: Option<GameMode>,
    score_version: u8,

    ar: Option<f32>,
    od: Option<f32>,
    max_combo: Option<usize>,
    n_circles: Option<usize>,
    n_sliders: Option<usize>,
    n_objects: Option<usize>,

    combo: Option<usize>,
    acc: Option<f64>,
    n300: Option<usize>,
    n100: Option<usize>,
    n50: Option<usize>,
    n_misses: usize,
}

impl<'m> OsuPP<'m> {
    /// Calculator whose stars, map attributes, and object counts are taken from the map.
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self::with_source(Some(map), None)
    }

    /// Calculator on precalculated aim and speed stars.
    ///
    /// Since no map is available, attributes such as the max combo, object counts,
    /// AR, and OD should be specified through their respective methods.
    /// Otherwise AR and OD are 5, and the map is assumed to have no objects.
    #[inline]
    pub fn from_stars(aim: f64, speed: f64) -> Self {
        Self::with_source(None, Some((aim, speed)))
    }

    fn with_source(map: Option<&'m Beatmap>, strains: Option<(f64, f64)>) -> Self {
        Self {
            map,
            attributes: None,
            strains,
            mods: 0,
            mode: None,
            score_version: 1,

            ar: None,
            od: None,
            max_combo: None,
            n_circles: None,
            n_sliders: None,
            n_objects: None,

            combo: None,
            acc: None,
            n300: None,
            n100: None,
            n50: None,
            n_misses: 0,
        }
    }

    /// [`DifficultyAttributes`] of a previous calculation on the same map
    /// with the same mods so that they don't need to be recalculated.
    #[inline]
    pub fn attributes(mut self, attributes: impl Into<DifficultyAttributes>) -> Self {
        self.attributes = Some(attributes.into());

        self
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Override the mode, by default it's the map's mode or osu!standard without map.
    #[inline]
    pub fn mode(mut self, mode: GameMode) -> Self {
        self.mode = Some(mode);

        self
    }

    /// Specify the score version, either `1` (default) or `2`.
    #[inline]
    pub fn score_version(mut self, score_version: u8) -> Self {
        self.score_version = score_version;

        self
    }

    /// Override the approach rate before mods are applied.
    #[inline]
    pub fn ar(mut self, ar: f32) -> Self {
        self.ar = Some(ar);

        self
    }

    /// Override the overall difficulty before mods are applied.
    #[inline]
    pub fn od(mut self, od: f32) -> Self {
        self.od = Some(od);

        self
    }

    /// Override the maximum combo of the map.
    #[inline]
    pub fn max_combo(mut self, max_combo: usize) -> Self {
        self.max_combo = Some(max_combo);

        self
    }

    /// Override the amount of circles.
    #[inline]
    pub fn n_circles(mut self, n_circles: usize) -> Self {
        self.n_circles = Some(n_circles);

        self
    }

    /// Override the amount of sliders.
    #[inline]
    pub fn n_sliders(mut self, n_sliders: usize) -> Self {
        self.n_sliders = Some(n_sliders);

        self
    }

    /// Override the total amount of objects.
    /// Objects that are neither circles nor sliders count as spinners.
    #[inline]
    pub fn n_objects(mut self, n_objects: usize) -> Self {
        self.n_objects = Some(n_objects);

        self
    }

    /// Specify the max combo of the play.
    /// Defaults to the map's max combo minus misses.
    #[inline]
    pub fn combo(mut self, combo: usize) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of 300s of a play.
    /// Defaults to all objects that aren't 100s, 50s, or misses.
    ///
    /// Discards a previously specified [`accuracy`](OsuPP::accuracy).
    #[inline]
    pub fn n300(mut self, n300: usize) -> Self {
        self.n300 = Some(n300);
        self.acc = None;

        self
    }

    /// Specify the amount of 100s of a play.
    ///
    /// Discards a previously specified [`accuracy`](OsuPP::accuracy).
    #[inline]
    pub fn n100(mut self, n100: usize) -> Self {
        self.n100 = Some(n100);
        self.acc = None;

        self
    }

    /// Specify the amount of 50s of a play.
    ///
    /// Discards a previously specified [`accuracy`](OsuPP::accuracy).
    #[inline]
    pub fn n50(mut self, n50: usize) -> Self {
        self.n50 = Some(n50);
        self.acc = None;

        self
    }

    /// Specify the amount of misses of a play.
    #[inline]
    pub fn misses(mut self, n_misses: usize) -> Self {
        self.n_misses = n_misses;

        self
    }

    /// Generate the hit results with respect to the given accuracy between `0` and `100`.
    ///
    /// Previously specified 300s, 100s, and 50s are discarded.
    #[inline]
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc);
        self.n300 = None;
        self.n100 = None;
        self.n50 = None;

        self
    }

    /// Returns an object which contains the pp and [`DifficultyAttributes`]
    /// containing stars and other attributes.
    pub fn calculate(mut self) -> PpResult<PerformanceAttributes> {
        let mode = self
            .mode
            .or_else(|| self.map.map(|map| map.mode))
            .unwrap_or_default();

        if mode != GameMode::Osu {
            return Err(PpError::UnsupportedMode(mode));
        }

        if !matches!(self.score_version, 1 | 2) {
            return Err(PpError::UnsupportedScoreVersion(self.score_version));
        }

        let attributes = self.difficulty_attributes();

        let mut max_combo = attributes.max_combo;

        if max_combo == 0 {
            tracing::warn!("max combo must be positive, using 1 instead");
            max_combo = 1;
        }

        let n_objects = attributes.n_objects();
        let n_misses = self.n_misses;

        let combo = match self.combo {
            Some(combo) if combo > max_combo => {
                tracing::warn!(combo, max_combo, "combo exceeds max combo, clamping");

                max_combo
            }
            Some(combo) => combo,
            None => max_combo.saturating_sub(n_misses),
        };

        let accuracy = match self.acc {
            Some(acc) => Accuracy::from_percent(acc, n_objects, n_misses),
            None => Accuracy::from_counts(
                self.n300,
                self.n100.unwrap_or(0),
                self.n50.unwrap_or(0),
                n_misses,
                n_objects,
            ),
        };

        let acc = accuracy.value();

        let (real_acc, n_circles) = if self.score_version == 1 {
            // Sliders and spinners are free 300s in score v1
            let n300 = accuracy
                .n300
                .saturating_sub(attributes.n_sliders)
                .saturating_sub(attributes.n_spinners);

            let real_acc = Accuracy { n300, ..accuracy };

            (real_acc.value(), attributes.n_circles)
        } else {
            (acc, n_objects)
        };

        // Length bonus
        let n_objects_over_2k = n_objects as f64 / 2000.0;
        let mut len_bonus = 0.95 + 0.4 * n_objects_over_2k.min(1.0);

        if n_objects > 2000 {
            len_bonus += n_objects_over_2k.log10() * 0.5;
        }

        let miss_penalty = 0.97_f64.powi(n_misses as i32);
        let combo_break = (combo as f64).powf(0.8) / (max_combo as f64).powf(0.8);

        let ar = attributes.ar;
        let od = attributes.od;

        // AR bonus
        let mut ar_bonus = 1.0;

        if ar > 10.33 {
            ar_bonus += 0.45 * (ar - 10.33);
        } else if ar < 8.0 {
            let mut low_ar_bonus = 0.01 * (8.0 - ar);

            if self.mods.hd() {
                low_ar_bonus *= 2.0;
            }

            ar_bonus += low_ar_bonus;
        }

        let acc_bonus = 0.5 + acc / 2.0;
        let od_bonus = 0.98 + od * od / 2500.0;

        // Aim pp
        let mut aim_value = pp_base(attributes.aim_strain);
        aim_value *= len_bonus * miss_penalty * combo_break * ar_bonus;

        if self.mods.hd() {
            aim_value *= 1.02 + (11.0 - ar) / 50.0;
        }

        if self.mods.fl() {
            aim_value *= 1.45 * len_bonus;
        }

        aim_value *= acc_bonus * od_bonus;

        // Speed pp
        let mut speed_value = pp_base(attributes.speed_strain);
        speed_value *= len_bonus * miss_penalty * combo_break * acc_bonus * od_bonus;

        if self.mods.hd() {
            speed_value *= 1.18;
        }

        // Acc pp
        let mut acc_value = 1.52163_f64.powf(od) * real_acc.powi(24) * 2.83;
        acc_value *= (n_circles as f64 / 1000.0).powf(0.3).min(1.15);

        if self.mods.hd() {
            acc_value *= 1.02;
        }

        if self.mods.fl() {
            acc_value *= 1.02;
        }

        // Total pp
        let mut multiplier = 1.12;

        if self.mods.nf() {
            multiplier *= 0.9;
        }

        if self.mods.so() {
            multiplier *= 0.95;
        }

        let pp = (aim_value.powf(1.1) + speed_value.powf(1.1) + acc_value.powf(1.1))
            .powf(1.0 / 1.1)
            * multiplier;

        Ok(PerformanceAttributes {
            difficulty: attributes,
            pp_aim: aim_value,
            pp_speed: speed_value,
            pp_acc: acc_value,
            pp,
            accuracy,
        })
    }

    /// Difficulty attributes of the map or the specified stars with all
    /// overrides applied. AR and OD are adjusted by mods.
    fn difficulty_attributes(&mut self) -> DifficultyAttributes {
        let mut attributes = match (self.attributes.take(), self.map, self.strains) {
            (Some(attributes), ..) => attributes,
            (None, Some(map), _) => OsuStars::new(map).mods(self.mods).calculate(),
            (None, None, strains) => {
                let (aim, speed) = strains.unwrap_or_default();
                let map_attributes = BeatmapAttributes::new(5.0, 5.0, 5.0, 5.0)
                    .mods_with(self.mods, ApplyFlags::AR | ApplyFlags::OD);

                DifficultyAttributes {
                    aim_strain: aim,
                    speed_strain: speed,
                    stars: total_stars(aim, speed),
                    ar: f64::from(map_attributes.ar),
                    od: f64::from(map_attributes.od),
                    cs: f64::from(map_attributes.cs),
                    hp: f64::from(map_attributes.hp),
                    ..Default::default()
                }
            }
        };

        if self.ar.is_some() || self.od.is_some() {
            let base = BeatmapAttributes::new(
                self.ar.unwrap_or_default(),
                self.od.unwrap_or_default(),
                0.0,
                0.0,
            );

            let adjusted = base.mods_with(self.mods, ApplyFlags::AR | ApplyFlags::OD);

            if self.ar.is_some() {
                attributes.ar = f64::from(adjusted.ar);
            }

            if self.od.is_some() {
                attributes.od = f64::from(adjusted.od);
            }
        }

        if let Some(max_combo) = self.max_combo {
            attributes.max_combo = max_combo;
        }

        if let Some(n_circles) = self.n_circles {
            attributes.n_circles = n_circles;
        }

        if let Some(n_sliders) = self.n_sliders {
            attributes.n_sliders = n_sliders;
        }

        if let Some(n_objects) = self.n_objects {
            attributes.n_spinners = n_objects
                .saturating_sub(attributes.n_circles)
                .saturating_sub(attributes.n_sliders);
        }

        attributes
    }
}

#[inline]
fn pp_base(stars: f64) -> f64 {
    (5.0 * (stars / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calculator() -> OsuPP<'static> {
        OsuPP::from_stars(2.5, 2.0)
            .ar(9.0)
            .od(8.0)
            .max_combo(1200)
            .n_circles(500)
            .n_sliders(250)
            .n_objects(760)
    }

    #[test]
    fn base_pp() {
        assert!((pp_base(0.0) - 0.00001).abs() < 1e-15);
        assert!((pp_base(0.0675 * 2.0) - 6.0_f64.powi(3) / 100_000.0).abs() < 1e-12);
    }

    #[test]
    fn unsupported_mode() {
        let map = Beatmap {
            mode: GameMode::Taiko,
            ..Default::default()
        };

        let err = OsuPP::new(&map).calculate().unwrap_err();
        assert_eq!(err, PpError::UnsupportedMode(GameMode::Taiko));

        let err = calculator().mode(GameMode::Mania).calculate().unwrap_err();
        assert_eq!(err, PpError::UnsupportedMode(GameMode::Mania));
    }

    #[test]
    fn unsupported_score_version() {
        let err = calculator().score_version(3).calculate().unwrap_err();
        assert_eq!(err, PpError::UnsupportedScoreVersion(3));
    }

    #[test]
    fn object_count_overrides() {
        let attrs = calculator().calculate().unwrap();

        assert_eq!(attrs.difficulty.n_spinners, 10);
        assert_eq!(attrs.difficulty.n_objects(), 760);
        assert_eq!(attrs.accuracy.n300, 760);
        assert!((attrs.stars() - 4.75).abs() < 1e-12);
    }

    #[test]
    fn mods_adjust_overrides() {
        let attrs = calculator().mods(u32::DT).calculate().unwrap();

        // 600ms / 1.5 = 400ms
        assert!((attrs.difficulty.ar - (5.0 + 800.0 / 150.0)).abs() < 1e-4);
    }

    #[test]
    fn combo_is_clamped() {
        let clamped = calculator().combo(5000).calculate().unwrap();
        let full = calculator().calculate().unwrap();

        assert!((clamped.pp - full.pp).abs() < f64::EPSILON);
    }

    #[test]
    fn misses_and_combo_lower_pp() {
        let full = calculator().calculate().unwrap();
        let missed = calculator().misses(3).calculate().unwrap();
        let broken = calculator().combo(600).calculate().unwrap();

        assert!(missed.pp < full.pp);
        assert!(broken.pp < full.pp);
        assert_eq!(missed.accuracy.n300, 757);
    }

    #[test]
    fn accuracy_discards_counts() {
        let attrs = calculator().n100(40).accuracy(100.0).calculate().unwrap();

        assert_eq!(attrs.accuracy.n100, 0);
        assert!((attrs.accuracy.value() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn counts_discard_accuracy() {
        let attrs = calculator().accuracy(90.0).n100(5).calculate().unwrap();

        assert_eq!(attrs.accuracy, Accuracy::new(755, 5, 0, 0));

        let attrs = calculator()
            .misses(2)
            .accuracy(90.0)
            .n300(700)
            .n50(10)
            .calculate()
            .unwrap();

        assert_eq!(attrs.accuracy, Accuracy::new(700, 0, 10, 2));
    }

    #[test]
    fn mod_multipliers() {
        let nomod = calculator().calculate().unwrap();
        let nf = calculator().mods(u32::NF).calculate().unwrap();
        let so = calculator().mods(u32::SO).calculate().unwrap();

        assert!((nf.pp - nomod.pp * 0.9).abs() < 1e-9);
        assert!((so.pp - nomod.pp * 0.95).abs() < 1e-9);

        let hd = calculator().mods(u32::HD).calculate().unwrap();
        assert!((hd.pp_speed - nomod.pp_speed * 1.18).abs() < 1e-9);
        assert!((hd.pp_acc - nomod.pp_acc * 1.02).abs() < 1e-9);
        assert!((hd.pp_aim - nomod.pp_aim * (1.02 + 2.0 / 50.0)).abs() < 1e-9);
    }

    #[test]
    fn reuse_attributes() {
        let map = Beatmap::default();
        let first = OsuPP::new(&map).calculate().unwrap();
        let second = OsuPP::new(&map).attributes(first.clone()).calculate().unwrap();

        assert_eq!(first, second);
    }
}
