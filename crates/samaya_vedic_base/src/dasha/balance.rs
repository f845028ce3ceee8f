//! Vimshottari birth balance computed from the Moon's position.
//!
//! The Moon's nakshatra picks the birth mahadasha lord; the fraction of the
//! nakshatra already traversed is the fraction of that mahadasha already
//! spent. The result is expressed both as the remaining balance of the
//! birth mahadasha and as the offset into the 120-year cycle counted from
//! the start of a Ketu mahadasha.

use serde::Serialize;

use crate::error::VedicError;
use crate::graha::{Graha, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS};
use crate::nakshatra::{NAKSHATRA_SPAN_27, Nakshatra, nakshatra_from_longitude};
use crate::util::ensure_finite;

/// Birth balance derived from the Moon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VimshottariBalance {
    /// Moon's nakshatra at birth.
    pub nakshatra: Nakshatra,
    /// Lord of the birth mahadasha.
    pub lord: Graha,
    /// Fraction of the nakshatra already traversed [0, 1].
    pub elapsed_fraction: f64,
    /// Years left in the birth mahadasha.
    pub balance_years: f64,
    /// Years elapsed in the 120-year cycle at birth, in [0, 120).
    pub cycle_elapsed_years: f64,
}

/// Years from the start of the cycle (Ketu) to the start of `lord`'s mahadasha.
pub fn cycle_start_of(lord: Graha) -> f64 {
    VIMSHOTTARI_SEQUENCE[..lord.vimshottari_index()]
        .iter()
        .map(|g| g.vimshottari_years())
        .sum()
}

/// Compute the Vimshottari birth balance from the Moon's sidereal longitude.
pub fn vimshottari_balance_from_moon(moon_sidereal_lon: f64) -> Result<VimshottariBalance, VedicError> {
    let info = nakshatra_from_longitude(ensure_finite("moon", moon_sidereal_lon)?);
    let lord = info.nakshatra.lord();
    let elapsed_fraction = info.degrees_in_nakshatra / NAKSHATRA_SPAN_27;
    let lord_years = lord.vimshottari_years();
    let spent = elapsed_fraction * lord_years;

    Ok(VimshottariBalance {
        nakshatra: info.nakshatra,
        lord,
        elapsed_fraction,
        balance_years: lord_years - spent,
        // A Moon at the very end of Revati spends all of Mercury and wraps to Ketu.
        cycle_elapsed_years: (cycle_start_of(lord) + spent).rem_euclid(VIMSHOTTARI_TOTAL_YEARS),
    })
}
