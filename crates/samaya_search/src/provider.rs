//! Position provider seam and the built-in mean-motion provider.
//!
//! The engines never compute ephemerides themselves. Everything that needs
//! a body position at an instant goes through `PositionProvider`, which the
//! caller implements over whatever ephemeris it has. `MeanMotionProvider`
//! is a dependency-free stand-in that propagates a chart's natal positions
//! linearly by their daily motions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use samaya_vedic_base::{
    ChartRecord, Graha, PlanetPosition, VedicError, days_between, normalize_360,
};

use crate::error::ProviderError;

/// Earth's rotation relative to the stars, in degrees per day. The house
/// frame of a fixed location turns at this rate.
pub const SIDEREAL_ROTATION_DEG_PER_DAY: f64 = 360.985_647_366_29;

/// Lahiri ayanamsha near J2000, used to offer tropical output.
pub const DEFAULT_AYANAMSHA_DEG: f64 = 23.853;

/// Zodiac reference for returned longitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZodiacMode {
    /// Fixed-star zodiac (ayanamsha applied).
    #[default]
    Sidereal,
    /// Equinox-based zodiac.
    Tropical,
}

impl ZodiacMode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sidereal => "Sidereal",
            Self::Tropical => "Tropical",
        }
    }
}

/// Geographic location for house computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    /// Geodetic latitude in degrees, north positive.
    pub latitude_deg: f64,
    /// Geodetic longitude in degrees, east positive.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in metres.
    #[serde(default)]
    pub altitude_m: f64,
}

/// State of one body at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    /// Which graha.
    pub graha: Graha,
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub latitude_deg: f64,
    /// Daily motion in longitude (negative when retrograde).
    pub speed_deg_per_day: f64,
    /// Apparent retrograde motion.
    pub retrograde: bool,
}

/// Source of body positions and house cusps. Consumed read-only.
pub trait PositionProvider: Send + Sync {
    /// States of every tracked body at `instant`.
    fn body_states(
        &self,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Result<Vec<BodyState>, ProviderError>;

    /// The 12 house cusps for `location` at `instant`, house 1 first.
    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        location: &GeoLocation,
        mode: ZodiacMode,
    ) -> Result<[f64; 12], ProviderError>;

    /// State of a single body.
    fn body_state(
        &self,
        graha: Graha,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Result<BodyState, ProviderError> {
        self.body_states(instant, mode)?
            .into_iter()
            .find(|s| s.graha == graha)
            .ok_or_else(|| ProviderError::MissingBody {
                graha: graha.english_name(),
                instant: instant.to_rfc3339(),
            })
    }
}

/// Linear propagation of natal positions by their daily speeds.
///
/// Good enough for exercising the engines over a few months; not an
/// ephemeris. Cusps rotate with the sidereal day, so the location passed to
/// `house_cusps` is ignored and the chart's own location is implied.
#[derive(Debug, Clone, PartialEq)]
pub struct MeanMotionProvider {
    epoch: DateTime<Utc>,
    bodies: Vec<PlanetPosition>,
    cusps: [f64; 12],
    ayanamsha_deg: f64,
}

impl MeanMotionProvider {
    /// Provider seeded from a validated chart.
    pub fn from_chart(chart: &ChartRecord) -> Result<Self, VedicError> {
        chart.validate()?;
        Ok(Self {
            epoch: chart.birth_date,
            bodies: chart.planet_positions.clone(),
            cusps: chart.cusps()?,
            ayanamsha_deg: DEFAULT_AYANAMSHA_DEG,
        })
    }

    /// Override the ayanamsha used for tropical output.
    pub fn with_ayanamsha(mut self, ayanamsha_deg: f64) -> Self {
        self.ayanamsha_deg = ayanamsha_deg;
        self
    }

    /// Epoch of the seed positions.
    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    fn mode_offset(&self, mode: ZodiacMode) -> f64 {
        match mode {
            ZodiacMode::Sidereal => 0.0,
            ZodiacMode::Tropical => self.ayanamsha_deg,
        }
    }
}

impl PositionProvider for MeanMotionProvider {
    fn body_states(
        &self,
        instant: DateTime<Utc>,
        mode: ZodiacMode,
    ) -> Result<Vec<BodyState>, ProviderError> {
        let days = days_between(self.epoch, instant);
        let offset = self.mode_offset(mode);
        Ok(self
            .bodies
            .iter()
            .map(|p| BodyState {
                graha: p.graha,
                longitude_deg: normalize_360(p.longitude + p.speed * days + offset),
                latitude_deg: p.latitude,
                speed_deg_per_day: p.speed,
                retrograde: p.speed < 0.0,
            })
            .collect())
    }

    fn house_cusps(
        &self,
        instant: DateTime<Utc>,
        _location: &GeoLocation,
        mode: ZodiacMode,
    ) -> Result<[f64; 12], ProviderError> {
        let turn = SIDEREAL_ROTATION_DEG_PER_DAY * days_between(self.epoch, instant);
        let offset = self.mode_offset(mode);
        Ok(self.cusps.map(|c| normalize_360(c + turn + offset)))
    }
}

/// The body with the largest absolute daily motion. Ties keep the
/// canonical graha order. None when `states` is empty.
pub fn fastest_body(states: &[BodyState]) -> Option<&BodyState> {
    states.iter().reduce(|best, s| {
        let (a, b) = (s.speed_deg_per_day.abs(), best.speed_deg_per_day.abs());
        if a > b || (a == b && s.graha.index() < best.graha.index()) {
            s
        } else {
            best
        }
    })
}
