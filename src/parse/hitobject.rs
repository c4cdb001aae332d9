use super::Pos2;

/// Hitobject of an osu!standard map as created through parsing.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub pos: Pos2,
    pub start_time: f64,
    pub kind: HitObjectKind,
}

impl HitObject {
    #[inline]
    pub fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner)
    }
}

/// Further data related to specific object types.
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider {
        /// Length of the slider path in osu!pixels.
        pixel_len: f64,
        /// Amount of spans, i.e. 1 for a slider without repeat.
        repeats: usize,
    },
    Spinner,
}
