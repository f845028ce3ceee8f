//! Natal chart record consumed by every engine in the workspace.
//!
//! The record is plain data supplied by the caller (positions come from an
//! external ephemeris). `validate()` is the single gate that turns malformed
//! input into a `VedicError` before any calculation runs.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::dasha::balance::vimshottari_balance_from_moon;
use crate::error::VedicError;
use crate::graha::{Graha, VIMSHOTTARI_TOTAL_YEARS};
use crate::util::{ensure_finite, normalize_360};

/// One natal graha position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    /// Which graha.
    pub graha: Graha,
    /// Sidereal ecliptic longitude in degrees.
    pub longitude: f64,
    /// Ecliptic latitude in degrees.
    #[serde(default)]
    pub latitude: f64,
    /// Daily motion in degrees (negative when retrograde).
    #[serde(default)]
    pub speed: f64,
    /// Retrograde flag as reported by the ephemeris.
    #[serde(default)]
    pub retrograde: bool,
}

/// Chart input: birth instant, Moon, dasha offset, natal positions and cusps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    /// Birth instant (UTC).
    pub birth_date: DateTime<Utc>,
    /// Moon's sidereal longitude at birth, in degrees.
    pub moon_longitude: f64,
    /// Years already elapsed in the 120-year Vimshottari cycle at birth,
    /// counted from the start of a Ketu mahadasha. Derived from the Moon
    /// when absent.
    #[serde(default)]
    pub dasha_balance_years: Option<f64>,
    /// Natal positions, at most one per graha.
    pub planet_positions: Vec<PlanetPosition>,
    /// Sidereal longitudes of the 12 house cusps (house 1 first).
    pub house_cusps: Vec<f64>,
}

impl ChartRecord {
    /// Reject malformed charts: bad cusp count, non-finite values,
    /// duplicate grahas, or a balance outside [0, 120).
    pub fn validate(&self) -> Result<(), VedicError> {
        ensure_finite("moon", self.moon_longitude)?;
        if self.house_cusps.len() != 12 {
            return Err(VedicError::InvalidCuspCount {
                count: self.house_cusps.len(),
            });
        }
        for &cusp in &self.house_cusps {
            ensure_finite("house cusp", cusp)?;
        }
        let mut seen = [false; 9];
        for p in &self.planet_positions {
            ensure_finite(p.graha.english_name(), p.longitude)?;
            if !p.speed.is_finite() || !p.latitude.is_finite() {
                return Err(VedicError::NonFiniteLongitude {
                    what: p.graha.english_name(),
                    value: if p.speed.is_finite() { p.latitude } else { p.speed },
                });
            }
            let slot = &mut seen[p.graha.index() as usize];
            if *slot {
                return Err(VedicError::DuplicateGraha {
                    graha: p.graha.english_name(),
                });
            }
            *slot = true;
        }
        if let Some(years) = self.dasha_balance_years {
            validate_balance(years)?;
        }
        Ok(())
    }

    /// The 12 cusps normalized to [0, 360). Call after `validate()`.
    pub fn cusps(&self) -> Result<[f64; 12], VedicError> {
        let cusps: [f64; 12] = self
            .house_cusps
            .as_slice()
            .try_into()
            .map_err(|_| VedicError::InvalidCuspCount {
                count: self.house_cusps.len(),
            })?;
        Ok(cusps.map(normalize_360))
    }

    /// Years elapsed in the Vimshottari cycle at birth.
    pub fn cycle_elapsed_years(&self) -> Result<f64, VedicError> {
        match self.dasha_balance_years {
            Some(years) => validate_balance(years),
            None => Ok(vimshottari_balance_from_moon(self.moon_longitude)?.cycle_elapsed_years),
        }
    }

    /// Natal position of one graha, if supplied.
    pub fn position_of(&self, graha: Graha) -> Option<&PlanetPosition> {
        self.planet_positions.iter().find(|p| p.graha == graha)
    }
}

/// Check a dasha cycle offset in years.
pub fn validate_balance(years: f64) -> Result<f64, VedicError> {
    if years.is_finite() && (0.0..VIMSHOTTARI_TOTAL_YEARS).contains(&years) {
        Ok(years)
    } else {
        Err(VedicError::InvalidBalance { years })
    }
}

/// Approximate sidereal positions and mean daily motions at 2000-01-01 00:00 UTC.
const DEFAULT_POSITIONS: [(Graha, f64, f64); 9] = [
    (Graha::Surya, 256.5, 1.019),
    (Graha::Chandra, 199.5, 13.18),
    (Graha::Mangal, 303.9, 0.774),
    (Graha::Buddh, 247.6, 1.534),
    (Graha::Guru, 1.3, 0.041),
    (Graha::Shukra, 217.8, 1.251),
    (Graha::Shani, 16.4, -0.020),
    (Graha::Rahu, 101.4, -0.053),
    (Graha::Ketu, 281.4, -0.053),
];

impl Default for ChartRecord {
    /// A self-consistent sample chart: equal houses from 0 deg Mesha,
    /// dasha offset derived from the Moon.
    fn default() -> Self {
        let planet_positions = DEFAULT_POSITIONS
            .iter()
            .map(|&(graha, longitude, speed)| PlanetPosition {
                graha,
                longitude,
                latitude: 0.0,
                speed,
                retrograde: speed < 0.0,
            })
            .collect();
        Self {
            birth_date: Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).single().unwrap_or_default(),
            moon_longitude: 199.5,
            dasha_balance_years: None,
            planet_positions,
            house_cusps: (0..12).map(|i| 30.0 * i as f64).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chart_is_valid() {
        let chart = ChartRecord::default();
        assert!(chart.validate().is_ok());
        assert_eq!(chart.planet_positions.len(), 9);
        assert_eq!(chart.position_of(Graha::Chandra).unwrap().longitude, chart.moon_longitude);
    }

    #[test]
    fn wrong_cusp_count_rejected() {
        let mut chart = ChartRecord::default();
        chart.house_cusps.pop();
        assert_eq!(
            chart.validate(),
            Err(VedicError::InvalidCuspCount { count: 11 })
        );
    }

    #[test]
    fn non_finite_longitude_rejected() {
        let mut chart = ChartRecord::default();
        chart.planet_positions[2].longitude = f64::INFINITY;
        assert!(matches!(
            chart.validate(),
            Err(VedicError::NonFiniteLongitude { what: "Mars", .. })
        ));
    }

    #[test]
    fn duplicate_graha_rejected() {
        let mut chart = ChartRecord::default();
        let dup = chart.planet_positions[0];
        chart.planet_positions.push(dup);
        assert_eq!(
            chart.validate(),
            Err(VedicError::DuplicateGraha { graha: "Sun" })
        );
    }

    #[test]
    fn balance_range() {
        assert!(validate_balance(0.0).is_ok());
        assert!(validate_balance(119.99).is_ok());
        assert!(validate_balance(120.0).is_err());
        assert!(validate_balance(-0.1).is_err());
        assert!(validate_balance(f64::NAN).is_err());
    }

    #[test]
    fn explicit_balance_wins_over_moon() {
        let mut chart = ChartRecord::default();
        chart.dasha_balance_years = Some(12.0);
        assert_eq!(chart.cycle_elapsed_years(), Ok(12.0));
    }

    #[test]
    fn cusps_are_normalized() {
        let mut chart = ChartRecord::default();
        chart.house_cusps[0] = 360.0;
        assert_eq!(chart.cusps().unwrap()[0], 0.0);
    }

    #[test]
    fn chart_json_round_trip_fields() {
        let json = r#"{
            "birth_date": "1990-01-15T06:30:00Z",
            "moon_longitude": 40.0,
            "planet_positions": [{"graha": "Moon", "longitude": 40.0, "speed": 13.2}],
            "house_cusps": [0,30,60,90,120,150,180,210,240,270,300,330]
        }"#;
        let chart: ChartRecord = serde_json::from_str(json).unwrap();
        assert!(chart.validate().is_ok());
        assert_eq!(chart.dasha_balance_years, None);
        assert_eq!(chart.planet_positions[0].graha, Graha::Chandra);
    }
}
