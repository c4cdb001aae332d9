macro_rules! impl_mods {
    ($func_name:ident, $const_name:ident) => {
        #[inline]
        fn $func_name(self) -> bool {
            self & Self::$const_name > 0
        }
    };
}

/// Bit values of gameplay modifiers and helpers around them.
///
/// See [https://github.com/ppy/osu-api/wiki#mods](https://github.com/ppy/osu-api/wiki#mods)
pub trait Mods: Copy {
    const NM: u32 = 0;
    const NF: u32 = 1 << 0;
    const EZ: u32 = 1 << 1;
    const TD: u32 = 1 << 2;
    const HD: u32 = 1 << 3;
    const HR: u32 = 1 << 4;
    const DT: u32 = 1 << 6;
    const HT: u32 = 1 << 8;
    const NC: u32 = 1 << 9;
    const FL: u32 = 1 << 10;
    const SO: u32 = 1 << 12;

    /// DT, HT, or NC.
    const SPEED_CHANGING: u32 = Self::DT | Self::HT | Self::NC;

    /// HR, EZ, or any speed changing mod.
    const MAP_CHANGING: u32 = Self::HR | Self::EZ | Self::SPEED_CHANGING;

    fn change_speed(self) -> bool;
    fn change_map(self) -> bool;
    fn speed(self) -> f32;
    fn od_ar_hp_multiplier(self) -> f32;
    fn nf(self) -> bool;
    fn ez(self) -> bool;
    fn td(self) -> bool;
    fn hd(self) -> bool;
    fn hr(self) -> bool;
    fn dt(self) -> bool;
    fn ht(self) -> bool;
    fn nc(self) -> bool;
    fn fl(self) -> bool;
    fn so(self) -> bool;

    /// Concatenated acronyms of all set mods, e.g. `"HDDT"`.
    ///
    /// NC implies DT so only `"NC"` is shown if both are set.
    fn acronyms(self) -> String;
}

impl Mods for u32 {
    #[inline]
    fn change_speed(self) -> bool {
        self & Self::SPEED_CHANGING > 0
    }

    #[inline]
    fn change_map(self) -> bool {
        self & Self::MAP_CHANGING > 0
    }

    /// The clock rate. DT and HT are not mutually exclusive here,
    /// setting both results in `1.5 * 0.75`.
    #[inline]
    fn speed(self) -> f32 {
        let mut speed = 1.0;

        if self & (Self::DT | Self::NC) > 0 {
            speed = 1.5;
        }

        if self.ht() {
            speed *= 0.75;
        }

        speed
    }

    #[inline]
    fn od_ar_hp_multiplier(self) -> f32 {
        let mut multiplier = 1.0;

        if self.hr() {
            multiplier = 1.4;
        }

        if self.ez() {
            multiplier *= 0.5;
        }

        multiplier
    }

    impl_mods!(nf, NF);
    impl_mods!(ez, EZ);
    impl_mods!(td, TD);
    impl_mods!(hd, HD);
    impl_mods!(hr, HR);
    impl_mods!(dt, DT);
    impl_mods!(ht, HT);
    impl_mods!(nc, NC);
    impl_mods!(fl, FL);
    impl_mods!(so, SO);

    fn acronyms(self) -> String {
        let mut res = String::with_capacity(8);

        if self.nf() {
            res.push_str("NF");
        }

        if self.ez() {
            res.push_str("EZ");
        }

        if self.td() {
            res.push_str("TD");
        }

        if self.hd() {
            res.push_str("HD");
        }

        if self.hr() {
            res.push_str("HR");
        }

        if self.nc() {
            res.push_str("NC");
        } else if self.dt() {
            res.push_str("DT");
        }

        if self.ht() {
            res.push_str("HT");
        }

        if self.fl() {
            res.push_str("FL");
        }

        if self.so() {
            res.push_str("SO");
        }

        res
    }
}

/// Parse a string of concatenated mod acronyms like `"HDDT"` into their bit values.
///
/// Parsing is case-insensitive. Characters that don't start a known acronym are skipped.
pub fn parse_acronyms(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut mods = 0;
    let mut i = 0;

    while i < bytes.len() {
        let bit = bytes.get(i..i + 2).and_then(|acronym| {
            let acronym = [
                acronym[0].to_ascii_uppercase(),
                acronym[1].to_ascii_uppercase(),
            ];

            let bit = match &acronym {
                b"NF" => u32::NF,
                b"EZ" => u32::EZ,
                b"TD" => u32::TD,
                b"HD" => u32::HD,
                b"HR" => u32::HR,
                b"DT" => u32::DT,
                b"HT" => u32::HT,
                b"NC" => u32::NC,
                b"FL" => u32::FL,
                b"SO" => u32::SO,
                _ => return None,
            };

            Some(bit)
        });

        match bit {
            Some(bit) => {
                mods |= bit;
                i += 2;
            }
            None => i += 1,
        }
    }

    mods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_multipliers() {
        assert!((0_u32.speed() - 1.0).abs() < f32::EPSILON);
        assert!((u32::DT.speed() - 1.5).abs() < f32::EPSILON);
        assert!((u32::NC.speed() - 1.5).abs() < f32::EPSILON);
        assert!((u32::HT.speed() - 0.75).abs() < f32::EPSILON);
        assert!(((u32::DT | u32::HT).speed() - 1.125).abs() < f32::EPSILON);
    }

    #[test]
    fn groupings() {
        assert!(!(u32::HD | u32::FL | u32::NF).change_map());
        assert!(u32::EZ.change_map());
        assert!(!u32::HR.change_speed());
        assert!(u32::NC.change_speed());
        assert!(u32::NC.change_map());
    }

    #[test]
    fn od_ar_hp() {
        assert!((u32::HR.od_ar_hp_multiplier() - 1.4).abs() < f32::EPSILON);
        assert!((u32::EZ.od_ar_hp_multiplier() - 0.5).abs() < f32::EPSILON);
        assert!(((u32::HR | u32::EZ).od_ar_hp_multiplier() - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn acronyms() {
        assert_eq!((u32::HD | u32::DT).acronyms(), "HDDT");
        assert_eq!((u32::NC | u32::DT | u32::FL).acronyms(), "NCFL");
        assert_eq!(0_u32.acronyms(), "");

        assert_eq!(parse_acronyms("HDDT"), u32::HD | u32::DT);
        assert_eq!(parse_acronyms("hd | hr"), u32::HD | u32::HR);
        assert_eq!(parse_acronyms("XNF"), u32::NF);
        assert_eq!(parse_acronyms(""), 0);
    }
}
