use crate::parse::{HitObject, Pos2};

const PLAYFIELD_WIDTH: f64 = 512.0;
const PLAYFIELD_HEIGHT: f64 = 384.0;

/// A hitobject whose position is normalized w.r.t. the circle radius so that
/// all maps can be processed as if they had the same circle size.
pub(crate) struct OsuObject {
    pub(crate) time: f64,
    pub(crate) pos: Pos2,
    pub(crate) is_spinner: bool,
}

impl OsuObject {
    /// Spinners are placed at the playfield center.
    pub(crate) fn new(h: &HitObject, scaling_factor: f64) -> Self {
        let pos = if h.is_spinner() {
            Pos2 {
                x: PLAYFIELD_WIDTH / 2.0,
                y: PLAYFIELD_HEIGHT / 2.0,
            }
        } else {
            h.pos
        };

        Self {
            time: h.start_time,
            pos: pos * scaling_factor,
            is_spinner: h.is_spinner(),
        }
    }
}

/// Scaling factor applied to positions so that the spacing of small circles
/// weighs more.
pub(crate) fn scaling_factor(cs: f64) -> f64 {
    const NORMALIZED_RADIUS: f64 = 52.0;
    const CIRCLE_SIZE_BUFF_THRESHOLD: f64 = 30.0;

    let radius = (PLAYFIELD_WIDTH / 16.0) * (1.0 - 0.7 * (cs - 5.0) / 5.0);
    let mut scaling_factor = NORMALIZED_RADIUS / radius;

    if radius < CIRCLE_SIZE_BUFF_THRESHOLD {
        let small_circle_bonus = (CIRCLE_SIZE_BUFF_THRESHOLD - radius).min(5.0) / 50.0;
        scaling_factor *= 1.0 + small_circle_bonus;
    }

    scaling_factor
}
