//! Vedic planet (graha) enum, Vimshottari order and rashi lordship.
//!
//! The 9 grahas form the foundation of every calculation in this crate.
//! Two orderings matter:
//! - the traditional order (`ALL_GRAHAS`, Sun..Ketu), used as the canonical
//!   tie-break wherever rankings need determinism;
//! - the Vimshottari order (`VIMSHOTTARI_SEQUENCE`, Ketu..Mercury), which
//!   drives nakshatra lordship, KP sub-lords and every dasha level.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rashi::{ALL_RASHIS, Rashi};

/// The 9 Vedic grahas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Graha {
    #[serde(rename = "Sun", alias = "Surya")]
    Surya,
    #[serde(rename = "Moon", alias = "Chandra")]
    Chandra,
    #[serde(rename = "Mars", alias = "Mangal")]
    Mangal,
    #[serde(rename = "Mercury", alias = "Buddh")]
    Buddh,
    #[serde(rename = "Jupiter", alias = "Guru")]
    Guru,
    #[serde(rename = "Venus", alias = "Shukra")]
    Shukra,
    #[serde(rename = "Saturn", alias = "Shani")]
    Shani,
    Rahu,
    Ketu,
}

/// All 9 grahas in traditional order. This is the canonical tie-break order.
pub const ALL_GRAHAS: [Graha; 9] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Buddh,
    Graha::Guru,
    Graha::Shukra,
    Graha::Shani,
    Graha::Rahu,
    Graha::Ketu,
];

/// Vimshottari sequence: Ketu, Venus, Sun, Moon, Mars, Rahu, Jupiter, Saturn, Mercury.
pub const VIMSHOTTARI_SEQUENCE: [Graha; 9] = [
    Graha::Ketu,
    Graha::Shukra,
    Graha::Surya,
    Graha::Chandra,
    Graha::Mangal,
    Graha::Rahu,
    Graha::Guru,
    Graha::Shani,
    Graha::Buddh,
];

/// Length of one full Vimshottari cycle in years.
pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;

impl Graha {
    /// Sanskrit name of the graha.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Surya => "Surya",
            Self::Chandra => "Chandra",
            Self::Mangal => "Mangal",
            Self::Buddh => "Buddh",
            Self::Guru => "Guru",
            Self::Shukra => "Shukra",
            Self::Shani => "Shani",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// English name of the graha.
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Surya => "Sun",
            Self::Chandra => "Moon",
            Self::Mangal => "Mars",
            Self::Buddh => "Mercury",
            Self::Guru => "Jupiter",
            Self::Shukra => "Venus",
            Self::Shani => "Saturn",
            Self::Rahu => "Rahu",
            Self::Ketu => "Ketu",
        }
    }

    /// 0-based index into ALL_GRAHAS.
    pub const fn index(self) -> u8 {
        match self {
            Self::Surya => 0,
            Self::Chandra => 1,
            Self::Mangal => 2,
            Self::Buddh => 3,
            Self::Guru => 4,
            Self::Shukra => 5,
            Self::Shani => 6,
            Self::Rahu => 7,
            Self::Ketu => 8,
        }
    }

    /// 0-based position in `VIMSHOTTARI_SEQUENCE`.
    pub const fn vimshottari_index(self) -> usize {
        match self {
            Self::Ketu => 0,
            Self::Shukra => 1,
            Self::Surya => 2,
            Self::Chandra => 3,
            Self::Mangal => 4,
            Self::Rahu => 5,
            Self::Guru => 6,
            Self::Shani => 7,
            Self::Buddh => 8,
        }
    }

    /// Vimshottari mahadasha length in years. The nine values sum to 120.
    pub const fn vimshottari_years(self) -> f64 {
        match self {
            Self::Ketu => 7.0,
            Self::Shukra => 20.0,
            Self::Surya => 6.0,
            Self::Chandra => 10.0,
            Self::Mangal => 7.0,
            Self::Rahu => 18.0,
            Self::Guru => 16.0,
            Self::Shani => 19.0,
            Self::Buddh => 17.0,
        }
    }

    /// Next graha in Vimshottari order (Mercury wraps to Ketu).
    pub const fn vimshottari_next(self) -> Graha {
        VIMSHOTTARI_SEQUENCE[(self.vimshottari_index() + 1) % 9]
    }
}

impl Display for Graha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.english_name())
    }
}

impl FromStr for Graha {
    type Err = String;

    /// Accepts English or Sanskrit names, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_GRAHAS
            .into_iter()
            .find(|g| {
                g.english_name().eq_ignore_ascii_case(wanted) || g.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| format!("unknown graha: {s}"))
    }
}

/// Natural benefic/malefic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BeneficNature {
    Benefic,
    Malefic,
}

/// Natural benefic/malefic for each graha. Moon is taken as benefic.
pub const fn natural_benefic_malefic(graha: Graha) -> BeneficNature {
    match graha {
        Graha::Chandra | Graha::Buddh | Graha::Guru | Graha::Shukra => BeneficNature::Benefic,
        Graha::Surya | Graha::Mangal | Graha::Shani | Graha::Rahu | Graha::Ketu => {
            BeneficNature::Malefic
        }
    }
}

/// Get the planetary lord of a rashi.
///
/// - Mesha/Vrischika → Mangal (Mars)
/// - Vrishabha/Tula → Shukra (Venus)
/// - Mithuna/Kanya → Buddh (Mercury)
/// - Karka → Chandra (Moon)
/// - Simha → Surya (Sun)
/// - Dhanu/Meena → Guru (Jupiter)
/// - Makara/Kumbha → Shani (Saturn)
pub const fn rashi_lord(rashi: Rashi) -> Graha {
    match rashi {
        Rashi::Mesha => Graha::Mangal,
        Rashi::Vrishabha => Graha::Shukra,
        Rashi::Mithuna => Graha::Buddh,
        Rashi::Karka => Graha::Chandra,
        Rashi::Simha => Graha::Surya,
        Rashi::Kanya => Graha::Buddh,
        Rashi::Tula => Graha::Shukra,
        Rashi::Vrischika => Graha::Mangal,
        Rashi::Dhanu => Graha::Guru,
        Rashi::Makara => Graha::Shani,
        Rashi::Kumbha => Graha::Shani,
        Rashi::Meena => Graha::Guru,
    }
}

/// Get the lord of a rashi by 0-based index.
///
/// Returns None if index >= 12.
pub fn rashi_lord_by_index(rashi_index: u8) -> Option<Graha> {
    ALL_RASHIS.get(rashi_index as usize).map(|&r| rashi_lord(r))
}
