use super::{
    attributes::total_stars,
    osu_object::scaling_factor,
    skill_kind::is_single,
    DifficultyAttributes, DifficultyObject, OsuObject, Skill, SkillKind,
};

use crate::{Beatmap, Mods};

/// Smallest milliseconds interval between two objects that is considered
/// singletappable, e.g. 125ms correspond to 1/2 notes at 240 BPM.
pub const DEFAULT_SINGLETAP_THRESHOLD: f64 = 125.0;

const SECTION_LEN: f64 = 400.0;
const DIFFICULTY_MULTIPLIER: f64 = 0.0675;

/// Star calculation for osu!standard maps.
///
/// # Example
///
/// ```
/// use rosu_ppv2::{Beatmap, Mods, OsuStars};
///
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
/// let attrs = OsuStars::new(&map)
///     .mods(u32::HD | u32::DT)
///     .singletap_threshold(100.0)
///     .calculate();
///
/// println!("{}", attrs);
/// ```
#[derive(Clone, Debug)]
pub struct OsuStars<'m> {
    map: &'m Beatmap,
    mods: u32,
    singletap_threshold: f64,
}

impl<'m> OsuStars<'m> {
    #[inline]
    pub fn new(map: &'m Beatmap) -> Self {
        Self {
            map,
            mods: 0,
            singletap_threshold: DEFAULT_SINGLETAP_THRESHOLD,
        }
    }

    /// Specify mods through their bit values.
    ///
    /// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
    #[inline]
    pub fn mods(mut self, mods: u32) -> Self {
        self.mods = mods;

        self
    }

    /// Specify the interval in milliseconds from which on taps are counted
    /// towards [`DifficultyAttributes::n_singles_threshold`].
    #[inline]
    pub fn singletap_threshold(mut self, threshold: f64) -> Self {
        self.singletap_threshold = threshold;

        self
    }

    /// Calculate the aim, speed, and total stars as well as the singletap counts.
    pub fn calculate(self) -> DifficultyAttributes {
        let map = self.map;
        let map_attributes = map.attributes().mods(self.mods);
        let clock_rate = f64::from(map_attributes.clock_rate);

        let mut diff_attributes = DifficultyAttributes {
            ar: f64::from(map_attributes.ar),
            od: f64::from(map_attributes.od),
            cs: f64::from(map_attributes.cs),
            hp: f64::from(map_attributes.hp),
            n_circles: map.n_circles,
            n_sliders: map.n_sliders,
            n_spinners: map.n_spinners,
            max_combo: map.max_combo(),
            ..Default::default()
        };

        let scaling_factor = scaling_factor(diff_attributes.cs);

        let objects: Vec<_> = map
            .hit_objects
            .iter()
            .map(|h| OsuObject::new(h, scaling_factor))
            .collect();

        let section_len = SECTION_LEN * clock_rate;
        let mut current_section_end = section_len;

        let mut aim = Skill::new(SkillKind::Aim);
        let mut speed = Skill::new(SkillKind::Speed);

        let mut prev = None;

        for curr in objects.iter() {
            let h = DifficultyObject::new(curr, prev, clock_rate);

            aim.process(&h);
            speed.process(&h);

            while h.base.time > current_section_end {
                aim.save_current_peak();
                aim.start_new_section_from(current_section_end);
                speed.save_current_peak();
                speed.start_new_section_from(current_section_end);

                current_section_end += section_len;
            }

            aim.update_section_peak();
            speed.update_section_peak();

            if is_single(&h) {
                diff_attributes.n_singles += 1;
            }

            if h.prev_time.is_some() && !curr.is_spinner && h.delta >= self.singletap_threshold {
                diff_attributes.n_singles_threshold += 1;
            }

            prev = Some(curr);
        }

        let mut aim_strain = aim.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;
        let speed_strain = speed.difficulty_value().sqrt() * DIFFICULTY_MULTIPLIER;

        if self.mods.td() {
            aim_strain = aim_strain.powf(0.8);
        }

        diff_attributes.aim_strain = aim_strain;
        diff_attributes.speed_strain = speed_strain;
        diff_attributes.stars = total_stars(aim_strain, speed_strain);

        diff_attributes
    }
}

/// Star calculation for osu!standard maps with the default singletap threshold.
///
/// Shorthand for `OsuStars::new(map).mods(mods).calculate()`.
#[inline]
pub fn stars(map: &Beatmap, mods: u32) -> DifficultyAttributes {
    OsuStars::new(map).mods(mods).calculate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{HitObject, HitObjectKind, Pos2};

    fn circle(x: f64, y: f64, start_time: f64) -> HitObject {
        HitObject {
            pos: Pos2 { x, y },
            start_time,
            kind: HitObjectKind::Circle,
        }
    }

    fn jumps() -> Beatmap {
        let hit_objects: Vec<_> = (0..16)
            .map(|i| {
                let x = if i % 2 == 0 { 100.0 } else { 400.0 };

                circle(x, 192.0, 1000.0 + 150.0 * i as f64)
            })
            .collect();

        Beatmap {
            n_circles: hit_objects.len(),
            hit_objects,
            ..Default::default()
        }
    }

    #[test]
    fn empty_map() {
        let attrs = stars(&Beatmap::default(), 0);

        assert!(attrs.aim_strain.abs() < f64::EPSILON);
        assert!(attrs.speed_strain.abs() < f64::EPSILON);
        assert!(attrs.stars.abs() < f64::EPSILON);
        assert_eq!(attrs.n_singles, 0);
        assert_eq!(attrs.n_singles_threshold, 0);
    }

    #[test]
    fn single_object() {
        let map = Beatmap {
            n_circles: 1,
            hit_objects: vec![circle(256.0, 192.0, 5000.0)],
            ..Default::default()
        };

        let attrs = stars(&map, 0);

        assert!(attrs.stars.abs() < f64::EPSILON);
        assert_eq!(attrs.max_combo, 1);
    }

    #[test]
    fn jumps_are_singletaps() {
        let map = jumps();
        let attrs = stars(&map, 0);

        assert!(attrs.aim_strain > 0.0);
        assert!(attrs.speed_strain > 0.0);
        assert!(attrs.stars >= attrs.aim_strain.max(attrs.speed_strain));
        assert_eq!(attrs.n_singles, 15);
        assert_eq!(attrs.n_singles_threshold, 15);
    }

    #[test]
    fn threshold_depends_on_clock_rate() {
        let map = jumps();

        // 150ms / 1.5 = 100ms
        let attrs = OsuStars::new(&map).mods(u32::DT).calculate();
        assert_eq!(attrs.n_singles_threshold, 0);

        let attrs = OsuStars::new(&map)
            .mods(u32::DT)
            .singletap_threshold(100.0)
            .calculate();
        assert_eq!(attrs.n_singles_threshold, 15);
    }

    #[test]
    fn speed_up_increases_stars() {
        let map = jumps();

        let nomod = stars(&map, 0);
        let dt = stars(&map, u32::DT);
        let ht = stars(&map, u32::HT);

        assert!(dt.stars > nomod.stars);
        assert!(ht.stars < nomod.stars);
    }

    #[test]
    fn touch_device_nerfs_aim() {
        let map = jumps();

        let nomod = stars(&map, 0);
        let td = stars(&map, u32::TD);

        assert!((td.aim_strain - nomod.aim_strain.powf(0.8)).abs() < 1e-12);
        assert!((td.speed_strain - nomod.speed_strain).abs() < f64::EPSILON);
    }
}
