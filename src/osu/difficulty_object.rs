use super::OsuObject;

/// Values of an object w.r.t. its predecessor that are shared by all skills.
pub(crate) struct DifficultyObject<'h> {
    pub(crate) base: &'h OsuObject,
    /// Start time of the previous object, `None` for the first object.
    pub(crate) prev_time: Option<f64>,
    /// Distance to the previous object in normalized osu!pixels.
    pub(crate) jump_dist: f64,
    /// Elapsed time since the previous object, adjusted by the clock rate.
    pub(crate) delta: f64,
}

impl<'h> DifficultyObject<'h> {
    pub(crate) fn new(base: &'h OsuObject, prev: Option<&OsuObject>, clock_rate: f64) -> Self {
        match prev {
            Some(prev) => Self {
                base,
                prev_time: Some(prev.time),
                jump_dist: base.pos.distance(prev.pos),
                delta: (base.time - prev.time) / clock_rate,
            },
            None => Self {
                base,
                prev_time: None,
                jump_dist: 0.0,
                delta: 0.0,
            },
        }
    }
}
