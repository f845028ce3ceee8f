//! Whole-sign graha drishti (planetary aspect).
//!
//! Every graha casts a full aspect on the 7th sign from itself. Mars adds
//! the 4th and 8th, Jupiter the 5th and 9th, Saturn the 3rd and 10th.
//! Rahu and Ketu are given only the common 7th aspect.

use crate::graha::Graha;
use crate::rashi::{count_signs_forward, rashi_index};

/// Sign offsets (1-based, own sign = 1) fully aspected by a graha.
pub const fn aspected_offsets(graha: Graha) -> &'static [u8] {
    match graha {
        Graha::Mangal => &[4, 7, 8],
        Graha::Guru => &[5, 7, 9],
        Graha::Shani => &[3, 7, 10],
        _ => &[7],
    }
}

/// Whether a graha at `graha_lon` aspects the sign holding `target_lon`.
pub fn aspects_point(graha: Graha, graha_lon: f64, target_lon: f64) -> bool {
    let offset = count_signs_forward(rashi_index(graha_lon), rashi_index(target_lon));
    aspected_offsets(graha).contains(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventh_aspect_for_all() {
        assert!(aspects_point(Graha::Surya, 10.0, 190.0));
        assert!(aspects_point(Graha::Rahu, 10.0, 190.0));
        assert!(!aspects_point(Graha::Surya, 10.0, 100.0));
    }

    #[test]
    fn mars_special_aspects() {
        // Mars in Mesha aspects Karka (4th) and Vrischika (8th)
        assert!(aspects_point(Graha::Mangal, 5.0, 95.0));
        assert!(aspects_point(Graha::Mangal, 5.0, 215.0));
        assert!(!aspects_point(Graha::Mangal, 5.0, 125.0));
    }

    #[test]
    fn jupiter_special_aspects() {
        assert!(aspects_point(Graha::Guru, 0.0, 125.0));
        assert!(aspects_point(Graha::Guru, 0.0, 245.0));
    }

    #[test]
    fn saturn_special_aspects_wrap() {
        // Saturn in Makara (270) aspects Meena (3rd) and Tula (10th)
        assert!(aspects_point(Graha::Shani, 275.0, 335.0));
        assert!(aspects_point(Graha::Shani, 275.0, 185.0));
    }

    #[test]
    fn no_self_aspect() {
        assert!(!aspects_point(Graha::Guru, 0.0, 10.0));
    }
}
