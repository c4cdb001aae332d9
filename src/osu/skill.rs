use super::{DifficultyObject, SkillKind};

use std::cmp::Ordering;

const DECAY_WEIGHT: f64 = 0.9;
const MIN_STRAIN_TIME: f64 = 50.0;

pub(crate) struct Skill {
    kind: SkillKind,

    current_strain: f64,
    current_section_peak: f64,

    // start time and strain of the previously processed object
    prev: Option<(f64, f64)>,
    strain_peaks: Vec<f64>,
}

impl Skill {
    #[inline]
    pub(crate) fn new(kind: SkillKind) -> Self {
        Self {
            kind,

            current_strain: 0.0,
            current_section_peak: 0.0,

            prev: None,
            strain_peaks: Vec::with_capacity(128),
        }
    }

    #[inline]
    pub(crate) fn save_current_peak(&mut self) {
        self.strain_peaks.push(self.current_section_peak);
    }

    /// Reseed the section peak with the previous object's strain decayed until `time`.
    #[inline]
    pub(crate) fn start_new_section_from(&mut self, time: f64) {
        self.current_section_peak = match self.prev {
            Some((prev_time, prev_strain)) => prev_strain * self.strain_decay(time - prev_time),
            None => 0.0,
        };
    }

    /// Accumulate the object's strain, the first object keeps a strain of zero.
    pub(crate) fn process(&mut self, current: &DifficultyObject<'_>) {
        let prev_strain = self.current_strain;

        if current.prev_time.is_some() {
            let value = self.kind.strain_value_of(current) * self.kind.skill_multiplier();

            self.current_strain *= self.strain_decay(current.delta);
            self.current_strain += value / current.delta.max(MIN_STRAIN_TIME);
        }

        self.prev = current.prev_time.map(|time| (time, prev_strain));
    }

    #[inline]
    pub(crate) fn update_section_peak(&mut self) {
        self.current_section_peak = self.current_section_peak.max(self.current_strain);
    }

    pub(crate) fn difficulty_value(&mut self) -> f64 {
        let mut difficulty = 0.0;
        let mut weight = 1.0;

        self.strain_peaks
            .sort_unstable_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

        for &strain in self.strain_peaks.iter() {
            difficulty += strain * weight;
            weight *= DECAY_WEIGHT;
        }

        difficulty
    }

    #[inline]
    fn strain_decay(&self, ms: f64) -> f64 {
        self.kind.strain_decay_base().powf(ms / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{osu::OsuObject, parse::Pos2};

    #[test]
    fn weighted_peak_sum() {
        let mut skill = Skill::new(SkillKind::Aim);
        skill.strain_peaks = vec![1.0, 4.0, 2.0];

        let expected = 4.0 + 2.0 * 0.9 + 1.0 * 0.81;
        assert!((skill.difficulty_value() - expected).abs() < 1e-12);
        assert_eq!(skill.strain_peaks, vec![4.0, 2.0, 1.0]);
    }

    #[test]
    fn strain_accumulates_and_decays() {
        let objects: Vec<_> = [(0.0, 0.0), (100.0, 100.0), (1100.0, 0.0)]
            .iter()
            .map(|&(time, x)| OsuObject {
                time,
                pos: Pos2 { x, y: 0.0 },
                is_spinner: false,
            })
            .collect();

        let mut skill = Skill::new(SkillKind::Speed);

        skill.process(&DifficultyObject::new(&objects[0], None, 1.0));
        assert!(skill.current_strain.abs() < f64::EPSILON);

        skill.process(&DifficultyObject::new(&objects[1], Some(&objects[0]), 1.0));
        // dist 100 => 1.2 + 0.4 * 10 / 20 = 1.4
        let first = 1.4 * 1400.0 / 100.0;
        assert!((skill.current_strain - first).abs() < 1e-9);

        skill.process(&DifficultyObject::new(&objects[2], Some(&objects[1]), 1.0));
        let second = first * 0.3 + 1.4 * 1400.0 / 1000.0;
        assert!((skill.current_strain - second).abs() < 1e-9);

        // reseeding uses the strain of the second object
        skill.start_new_section_from(600.0);
        skill.save_current_peak();
        let reseeded = first * 0.3_f64.powf(0.5);
        assert!((skill.strain_peaks[0] - reseeded).abs() < 1e-9);
    }
}
