//! Bhava (house) helpers: membership, house matters and natural karakas.
//!
//! Houses are numbered 1-12. `cusps[i]` is the sidereal longitude where
//! house `i + 1` begins; a house runs up to the next cusp, wrapping at 360.

use crate::error::VedicError;
use crate::graha::Graha;
use crate::rashi::{count_signs_forward, rashi_index};
use crate::util::normalize_360;

/// Number of houses in a chart.
pub const HOUSE_COUNT: usize = 12;

/// Keyword summary of what each house signifies, indexed by house - 1.
const HOUSE_MATTERS: [&str; 12] = [
    "self, health and vitality",
    "wealth, family and speech",
    "courage, siblings and communication",
    "home, mother and property",
    "children, creativity and education",
    "service, debts and disease",
    "marriage and partnerships",
    "longevity, transformation and inheritance",
    "fortune, dharma and higher learning",
    "career, status and authority",
    "gains, income and aspirations",
    "losses, expenses and liberation",
];

/// Natural significator (karaka) of each house, indexed by house - 1.
const NATURAL_KARAKAS: [Graha; 12] = [
    Graha::Surya,
    Graha::Guru,
    Graha::Mangal,
    Graha::Chandra,
    Graha::Guru,
    Graha::Mangal,
    Graha::Shukra,
    Graha::Shani,
    Graha::Guru,
    Graha::Surya,
    Graha::Guru,
    Graha::Shani,
];

/// Check a 1-based house number.
pub fn validate_house(house: u8) -> Result<u8, VedicError> {
    if (1..=12).contains(&house) {
        Ok(house)
    } else {
        Err(VedicError::InvalidHouse { house })
    }
}

/// What a house signifies. Returns None for house numbers outside 1..=12.
pub fn house_matter(house: u8) -> Option<&'static str> {
    HOUSE_MATTERS.get((house as usize).wrapping_sub(1)).copied()
}

/// Fixed natural significator of a house. Returns None outside 1..=12.
pub fn natural_karaka(house: u8) -> Option<Graha> {
    NATURAL_KARAKAS.get((house as usize).wrapping_sub(1)).copied()
}

/// Ordinal suffix for a house number ("1st", "2nd", ...).
pub fn ordinal(house: u8) -> String {
    let suffix = match house {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    };
    format!("{house}{suffix}")
}

/// House (1-12) that holds a sidereal longitude, given 12 cusps.
///
/// Degenerate cusp sets (zero-width houses everywhere) fall back to
/// whole-sign houses counted from the first cusp's sign.
pub fn house_of(longitude: f64, cusps: &[f64; 12]) -> u8 {
    let lon = normalize_360(longitude);
    for i in 0..HOUSE_COUNT {
        let start = cusps[i];
        let width = normalize_360(cusps[(i + 1) % HOUSE_COUNT] - start);
        let offset = normalize_360(lon - start);
        if width > 0.0 && offset < width {
            return (i + 1) as u8;
        }
    }
    count_signs_forward(rashi_index(cusps[0]), rashi_index(lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(asc: f64) -> [f64; 12] {
        std::array::from_fn(|i| normalize_360(asc + 30.0 * i as f64))
    }

    #[test]
    fn validate_bounds() {
        assert!(validate_house(0).is_err());
        assert!(validate_house(13).is_err());
        assert_eq!(validate_house(7), Ok(7));
    }

    #[test]
    fn matters_and_karakas() {
        assert_eq!(house_matter(7), Some("marriage and partnerships"));
        assert_eq!(house_matter(0), None);
        assert_eq!(natural_karaka(7), Some(Graha::Shukra));
        assert_eq!(natural_karaka(10), Some(Graha::Surya));
        assert_eq!(natural_karaka(13), None);
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(11), "11th");
    }

    #[test]
    fn house_of_equal_houses() {
        let cusps = equal_cusps(0.0);
        assert_eq!(house_of(0.0, &cusps), 1);
        assert_eq!(house_of(29.99, &cusps), 1);
        assert_eq!(house_of(30.0, &cusps), 2);
        assert_eq!(house_of(359.0, &cusps), 12);
    }

    #[test]
    fn house_of_wraps_past_360() {
        let cusps = equal_cusps(350.0);
        assert_eq!(house_of(355.0, &cusps), 1);
        assert_eq!(house_of(5.0, &cusps), 1);
        assert_eq!(house_of(20.0, &cusps), 2);
        assert_eq!(house_of(345.0, &cusps), 12);
    }

    #[test]
    fn degenerate_cusps_use_whole_signs() {
        let cusps = [15.0; 12];
        assert_eq!(house_of(20.0, &cusps), 1);
        assert_eq!(house_of(200.0, &cusps), 7);
    }
}
