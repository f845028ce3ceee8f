//! House significators: which grahas represent the matters of a house.
//!
//! Strength is built from independent rules, summed and capped at 1.0:
//!
//! | rule | weight |
//! |---|---|
//! | occupies the house | 0.50 |
//! | lords the sign on the house cusp | 0.30 |
//! | in the star of an occupant or the cusp lord | 0.20 |
//! | aspects the cusp sign (whole-sign drishti) | 0.15 |
//!
//! Grahas that trigger no rule are not significators of the house.

use serde::Serialize;
use tracing::debug;

use crate::bhava::{HOUSE_COUNT, house_of, ordinal, validate_house};
use crate::chart::PlanetPosition;
use crate::drishti::aspects_point;
use crate::error::VedicError;
use crate::graha::{Graha, rashi_lord_by_index};
use crate::nakshatra::nakshatra_from_longitude;
use crate::rashi::rashi_index;
use crate::util::{ensure_finite, normalize_360};

pub const OCCUPANCY_WEIGHT: f64 = 0.50;
pub const OWNERSHIP_WEIGHT: f64 = 0.30;
pub const STAR_LORD_WEIGHT: f64 = 0.20;
pub const ASPECT_WEIGHT: f64 = 0.15;

/// A graha ranked as significator of a house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Significator {
    /// The significator graha.
    pub graha: Graha,
    /// House (1-12) it signifies.
    pub house: u8,
    /// Combined rule strength in [0, 1].
    pub strength: f64,
    /// Rules that fired, joined with "; ".
    pub reason: String,
}

/// Rank the significators of `house` from natal positions and 12 cusps.
///
/// Sorted by strength descending; equal strengths keep canonical graha
/// order (Sun, Moon, Mars, Mercury, Jupiter, Venus, Saturn, Rahu, Ketu).
/// An empty result is a valid answer, not an error.
pub fn get_significators_for_house(
    house: u8,
    natal_planets: &[PlanetPosition],
    house_cusps: &[f64],
) -> Result<Vec<Significator>, VedicError> {
    let house = validate_house(house)?;
    let cusps = checked_cusps(house_cusps)?;
    for p in natal_planets {
        ensure_finite(p.graha.english_name(), p.longitude)?;
    }

    let cusp = cusps[(house - 1) as usize];
    let cusp_lord = rashi_lord_by_index(rashi_index(cusp));
    let occupants: Vec<Graha> = natal_planets
        .iter()
        .filter(|p| house_of(p.longitude, &cusps) == house)
        .map(|p| p.graha)
        .collect();
    let label = ordinal(house);

    let mut ranked: Vec<Significator> = natal_planets
        .iter()
        .filter_map(|p| {
            let mut strength = 0.0;
            let mut reasons = Vec::new();

            if occupants.contains(&p.graha) {
                strength += OCCUPANCY_WEIGHT;
                reasons.push(format!("occupies the {label} house"));
            }
            if cusp_lord == Some(p.graha) {
                strength += OWNERSHIP_WEIGHT;
                reasons.push(format!("lords the {label} cusp sign"));
            }
            let star_lord = nakshatra_from_longitude(p.longitude).nakshatra.lord();
            if star_lord != p.graha
                && (occupants.contains(&star_lord) || cusp_lord == Some(star_lord))
            {
                strength += STAR_LORD_WEIGHT;
                reasons.push(format!("in the star of {star_lord}"));
            }
            if aspects_point(p.graha, p.longitude, cusp) {
                strength += ASPECT_WEIGHT;
                reasons.push(format!("aspects the {label} cusp"));
            }

            (strength > 0.0).then(|| Significator {
                graha: p.graha,
                house,
                strength: f64::min(strength, 1.0),
                reason: reasons.join("; "),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then(a.graha.index().cmp(&b.graha.index()))
    });
    debug!(house, count = ranked.len(), "significators ranked");
    Ok(ranked)
}

/// Top `n` significators of every house, indexed by house - 1.
pub fn significators_by_house(
    natal_planets: &[PlanetPosition],
    house_cusps: &[f64],
    n: usize,
) -> Result<Vec<Vec<Significator>>, VedicError> {
    (1..=HOUSE_COUNT as u8)
        .map(|h| {
            let mut list = get_significators_for_house(h, natal_planets, house_cusps)?;
            list.truncate(n);
            Ok(list)
        })
        .collect()
}

fn checked_cusps(house_cusps: &[f64]) -> Result<[f64; 12], VedicError> {
    let cusps: [f64; 12] = house_cusps
        .try_into()
        .map_err(|_| VedicError::InvalidCuspCount {
            count: house_cusps.len(),
        })?;
    for c in cusps {
        ensure_finite("house cusp", c)?;
    }
    Ok(cusps.map(normalize_360))
}
