use std::ops::BitOr;

use crate::Mods;

/// Selects which fields of [`BeatmapAttributes`] are adjusted by
/// [`BeatmapAttributes::mods_with`].
///
/// Fields that are not selected are passed through as-is so they don't
/// need to be initialized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ApplyFlags(u8);

impl ApplyFlags {
    pub const AR: Self = Self(1 << 0);
    pub const OD: Self = Self(1 << 1);
    pub const CS: Self = Self(1 << 2);
    pub const HP: Self = Self(1 << 3);
    pub const ALL: Self = Self(Self::AR.0 | Self::OD.0 | Self::CS.0 | Self::HP.0);

    /// Whether all bits of `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for ApplyFlags {
    #[inline]
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for ApplyFlags {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

/// Summary struct for a [`Beatmap`](crate::Beatmap)'s attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapAttributes {
    pub ar: f32,
    pub od: f32,
    pub cs: f32,
    pub hp: f32,
    pub clock_rate: f32,
}

impl BeatmapAttributes {
    const AR0_MS: f64 = 1800.0;
    const AR5_MS: f64 = 1200.0;
    const AR10_MS: f64 = 450.0;
    const AR_MS_STEP_1: f64 = (Self::AR0_MS - Self::AR5_MS) / 5.0;
    const AR_MS_STEP_2: f64 = (Self::AR5_MS - Self::AR10_MS) / 5.0;

    const OD0_MS: f64 = 79.5;
    const OD10_MS: f64 = 19.5;
    const OD_MS_STEP: f64 = (Self::OD0_MS - Self::OD10_MS) / 10.0;

    #[inline]
    pub fn new(ar: f32, od: f32, cs: f32, hp: f32) -> Self {
        Self {
            ar,
            od,
            cs,
            hp,
            clock_rate: 1.0,
        }
    }

    /// Adjusts all attributes w.r.t. mods.
    #[inline]
    pub fn mods(self, mods: impl Mods) -> Self {
        self.mods_with(mods, ApplyFlags::ALL)
    }

    /// Adjusts the attributes selected by `flags` w.r.t. mods.
    ///
    /// AR and OD are converted into their hit windows, clamped to the
    /// AR 0-10 / OD 0-10 range, scaled by the clock rate and converted back.
    /// Hence, speed changing mods may bring them beyond 10 or below 0.
    pub fn mods_with(mut self, mods: impl Mods, flags: ApplyFlags) -> Self {
        self.clock_rate = 1.0;

        if !mods.change_map() {
            return self;
        }

        let clock_rate = mods.speed();
        let multiplier = mods.od_ar_hp_multiplier();
        self.clock_rate = clock_rate;

        if flags.contains(ApplyFlags::AR) {
            let ar = self.ar * multiplier;

            let mut ar_ms = if ar < 5.0 {
                Self::AR0_MS - Self::AR_MS_STEP_1 * f64::from(ar)
            } else {
                Self::AR5_MS - Self::AR_MS_STEP_2 * (f64::from(ar) - 5.0)
            };

            ar_ms = ar_ms.clamp(Self::AR10_MS, Self::AR0_MS);
            ar_ms /= f64::from(clock_rate);

            let ar = if ar_ms > Self::AR5_MS {
                (Self::AR0_MS - ar_ms) / Self::AR_MS_STEP_1
            } else {
                5.0 + (Self::AR5_MS - ar_ms) / Self::AR_MS_STEP_2
            };

            self.ar = ar as f32;
        }

        if flags.contains(ApplyFlags::OD) {
            let od = self.od * multiplier;

            let mut od_ms = Self::OD0_MS - (Self::OD_MS_STEP * f64::from(od)).ceil();
            od_ms = od_ms.clamp(Self::OD10_MS, Self::OD0_MS);
            od_ms /= f64::from(clock_rate);

            self.od = ((Self::OD0_MS - od_ms) / Self::OD_MS_STEP) as f32;
        }

        if flags.contains(ApplyFlags::CS) {
            let mut cs = self.cs;

            if mods.hr() {
                cs *= 1.3;
            }

            if mods.ez() {
                cs *= 0.5;
            }

            self.cs = cs.min(10.0);
        }

        if flags.contains(ApplyFlags::HP) {
            self.hp = (self.hp * multiplier).min(10.0);
        }

        self
    }
}
