//! Rashi (zodiac sign) lookup.
//!
//! The ecliptic circle is divided into 12 equal signs of 30 degrees each,
//! starting from Mesha (Aries) at 0 deg sidereal.

use serde::Serialize;

use crate::util::normalize_360;

/// The 12 rashis (zodiac signs) starting from Mesha (Aries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Rashi {
    Mesha,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrischika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

/// All 12 rashis in order (0 = Mesha, 11 = Meena).
pub const ALL_RASHIS: [Rashi; 12] = [
    Rashi::Mesha,
    Rashi::Vrishabha,
    Rashi::Mithuna,
    Rashi::Karka,
    Rashi::Simha,
    Rashi::Kanya,
    Rashi::Tula,
    Rashi::Vrischika,
    Rashi::Dhanu,
    Rashi::Makara,
    Rashi::Kumbha,
    Rashi::Meena,
];

impl Rashi {
    /// Sanskrit name of the rashi.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mesha => "Mesha",
            Self::Vrishabha => "Vrishabha",
            Self::Mithuna => "Mithuna",
            Self::Karka => "Karka",
            Self::Simha => "Simha",
            Self::Kanya => "Kanya",
            Self::Tula => "Tula",
            Self::Vrischika => "Vrischika",
            Self::Dhanu => "Dhanu",
            Self::Makara => "Makara",
            Self::Kumbha => "Kumbha",
            Self::Meena => "Meena",
        }
    }

    /// Western (English) name of the rashi.
    pub const fn western_name(self) -> &'static str {
        match self {
            Self::Mesha => "Aries",
            Self::Vrishabha => "Taurus",
            Self::Mithuna => "Gemini",
            Self::Karka => "Cancer",
            Self::Simha => "Leo",
            Self::Kanya => "Virgo",
            Self::Tula => "Libra",
            Self::Vrischika => "Scorpio",
            Self::Dhanu => "Sagittarius",
            Self::Makara => "Capricorn",
            Self::Kumbha => "Aquarius",
            Self::Meena => "Pisces",
        }
    }

    /// 0-based index (Mesha=0 .. Meena=11).
    pub const fn index(self) -> u8 {
        self as u8
    }
}

/// 0-based rashi index of a sidereal longitude.
pub fn rashi_index(sidereal_lon_deg: f64) -> u8 {
    ((normalize_360(sidereal_lon_deg) / 30.0).floor() as u8).min(11)
}

/// Rashi of a sidereal longitude.
pub fn rashi_from_longitude(sidereal_lon_deg: f64) -> Rashi {
    ALL_RASHIS[rashi_index(sidereal_lon_deg) as usize]
}

/// 1-based count from one rashi to another (same sign = 1, next sign = 2).
pub fn count_signs_forward(from_index: u8, to_index: u8) -> u8 {
    ((to_index as i16 - from_index as i16).rem_euclid(12) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_order() {
        for (i, r) in ALL_RASHIS.iter().enumerate() {
            assert_eq!(r.index() as usize, i);
        }
    }

    #[test]
    fn longitude_lookup() {
        assert_eq!(rashi_from_longitude(0.0), Rashi::Mesha);
        assert_eq!(rashi_from_longitude(135.0), Rashi::Simha);
        assert_eq!(rashi_from_longitude(359.999), Rashi::Meena);
        assert_eq!(rashi_from_longitude(-1.0), Rashi::Meena);
    }

    #[test]
    fn count_forward() {
        assert_eq!(count_signs_forward(0, 0), 1);
        assert_eq!(count_signs_forward(0, 6), 7);
        assert_eq!(count_signs_forward(11, 0), 2);
        assert_eq!(count_signs_forward(3, 0), 10);
    }
}
