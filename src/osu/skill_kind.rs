use super::DifficultyObject;

const SINGLE_SPACING_THRESHOLD: f64 = 125.0;
const STREAM_SPACING_THRESHOLD: f64 = 110.0;
const ALMOST_DIAMETER: f64 = 90.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum SkillKind {
    Aim,
    Speed,
}

impl SkillKind {
    /// Spacing weight of the object w.r.t. its predecessor.
    pub(crate) fn strain_value_of(self, current: &DifficultyObject<'_>) -> f64 {
        if current.base.is_spinner {
            return 0.0;
        }

        let dist = current.jump_dist;

        match self {
            Self::Aim => dist.powf(0.99),
            Self::Speed => {
                if dist > SINGLE_SPACING_THRESHOLD {
                    2.5
                } else if dist > STREAM_SPACING_THRESHOLD {
                    1.6 + 0.9 * (dist - STREAM_SPACING_THRESHOLD)
                        / (SINGLE_SPACING_THRESHOLD - STREAM_SPACING_THRESHOLD)
                } else if dist > ALMOST_DIAMETER {
                    1.2 + 0.4 * (dist - ALMOST_DIAMETER)
                        / (STREAM_SPACING_THRESHOLD - ALMOST_DIAMETER)
                } else if dist > ALMOST_DIAMETER / 2.0 {
                    0.95 + 0.25 * (dist - ALMOST_DIAMETER / 2.0) / (ALMOST_DIAMETER / 2.0)
                } else {
                    0.95
                }
            }
        }
    }

    #[inline]
    pub(crate) fn skill_multiplier(self) -> f64 {
        match self {
            Self::Aim => 26.25,
            Self::Speed => 1400.0,
        }
    }

    #[inline]
    pub(crate) fn strain_decay_base(self) -> f64 {
        match self {
            Self::Aim => 0.15,
            Self::Speed => 0.3,
        }
    }
}

/// Whether the object is spaced far enough from its predecessor to be singletapped.
#[inline]
pub(crate) fn is_single(current: &DifficultyObject<'_>) -> bool {
    current.prev_time.is_some()
        && !current.base.is_spinner
        && current.jump_dist > SINGLE_SPACING_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{osu::OsuObject, parse::Pos2};

    fn speed_weight(dist: f64) -> f64 {
        let prev = OsuObject {
            time: 0.0,
            pos: Pos2::zero(),
            is_spinner: false,
        };

        let curr = OsuObject {
            time: 100.0,
            pos: Pos2 { x: dist, y: 0.0 },
            is_spinner: false,
        };

        let h = DifficultyObject::new(&curr, Some(&prev), 1.0);

        SkillKind::Speed.strain_value_of(&h)
    }

    #[test]
    fn speed_weight_is_continuous() {
        for threshold in [45.0, 90.0, 110.0, 125.0] {
            let below = speed_weight(threshold);
            let above = speed_weight(threshold + 1e-9);

            assert!((below - above).abs() < 1e-6, "jump at {}", threshold);
        }

        assert!((speed_weight(10.0) - 0.95).abs() < f64::EPSILON);
        assert!((speed_weight(500.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn spinners_have_no_weight() {
        let prev = OsuObject {
            time: 0.0,
            pos: Pos2::zero(),
            is_spinner: false,
        };

        let curr = OsuObject {
            time: 100.0,
            pos: Pos2::new(300.0),
            is_spinner: true,
        };

        let h = DifficultyObject::new(&curr, Some(&prev), 1.0);

        assert!(SkillKind::Aim.strain_value_of(&h).abs() < f64::EPSILON);
        assert!(SkillKind::Speed.strain_value_of(&h).abs() < f64::EPSILON);
        assert!(!is_single(&h));
    }
}
