/// Timing section of a beatmap.
///
/// Uninherited points define a new beat length, inherited points encode
/// a slider velocity multiplier of `-100 / beat_len` w.r.t. the last
/// uninherited point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingPoint {
    pub time: f64,
    pub beat_len: f64,
    pub uninherited: bool,
}

impl TimingPoint {
    /// The slider velocity multiplier this point applies.
    #[inline]
    pub fn slider_velocity_multiplier(&self) -> f64 {
        if !self.uninherited && self.beat_len < 0.0 {
            -100.0 / self.beat_len
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TimingPoint;

    #[test]
    fn sv_multiplier() {
        let inherited = TimingPoint {
            time: 0.0,
            beat_len: -50.0,
            uninherited: false,
        };

        let uninherited = TimingPoint {
            time: 0.0,
            beat_len: 300.0,
            uninherited: true,
        };

        assert!((inherited.slider_velocity_multiplier() - 2.0).abs() < f64::EPSILON);
        assert!((uninherited.slider_velocity_multiplier() - 1.0).abs() < f64::EPSILON);
    }
}
