//! KP (Krishnamurti Paddhati) sub-lord lookup.
//!
//! Each nakshatra is split into 9 unequal sub-arcs, one per Vimshottari
//! graha, proportional to the graha's dasha years. The first arc belongs to
//! the nakshatra's own lord and the sequence continues cyclically, so the
//! 9 arcs exactly tile the 13 deg 20' span.

use serde::Serialize;

use crate::dasha::subperiod::{Portion, SpanUnit, proportional_partition};
use crate::error::VedicError;
use crate::graha::Graha;
use crate::nakshatra::{ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, nakshatra_from_longitude};
use crate::rashi::{Rashi, rashi_from_longitude};
use crate::util::{ensure_finite, normalize_360};

/// Full KP position of a sidereal longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubLordPosition {
    /// Normalized sidereal longitude in [0, 360).
    pub longitude: f64,
    /// Sign holding the longitude.
    pub rashi: Rashi,
    /// Degrees from the start of that sign.
    pub degrees_in_rashi: f64,
    /// 1-based nakshatra number (1 = Ashwini .. 27 = Revati).
    pub nakshatra_num: u8,
    /// The nakshatra itself.
    pub nakshatra: Nakshatra,
    /// Display name of the nakshatra.
    pub nakshatra_name: &'static str,
    /// Vimshottari lord of the nakshatra (the "star lord").
    pub nakshatra_lord: Graha,
    /// Graha ruling the sub-arc holding this longitude.
    pub sub_lord: Graha,
    /// Pada within the nakshatra, 1-4.
    pub pada: u8,
    /// Degrees from the nakshatra start.
    pub position_in_nakshatra: f64,
    /// Absolute longitude where the sub-lord's arc begins.
    pub sub_lord_arc_start: f64,
    /// Absolute longitude where the sub-lord's arc ends.
    pub sub_lord_arc_end: f64,
}

/// The 9 sub-lord arcs of a nakshatra, as offsets from its start.
///
/// The walk is rotated to begin at the nakshatra's own lord rather than at Ketu.
pub fn sub_lord_arcs(nakshatra: Nakshatra) -> [Portion; 9] {
    proportional_partition(nakshatra.lord(), NAKSHATRA_SPAN_27, SpanUnit::Degrees)
}

/// Resolve the nakshatra, star lord and sub-lord of a sidereal longitude.
///
/// A position exactly on an internal arc boundary resolves to the lower arc.
pub fn get_sub_lord(longitude: f64) -> Result<SubLordPosition, VedicError> {
    let lon = normalize_360(ensure_finite("sub-lord longitude", longitude)?);
    let info = nakshatra_from_longitude(lon);
    let arcs = sub_lord_arcs(info.nakshatra);
    let position = info.degrees_in_nakshatra;

    let arc = arcs
        .iter()
        .find(|a| position <= a.end)
        .copied()
        .unwrap_or(arcs[8]);

    let base = info.nakshatra.start_deg();
    Ok(SubLordPosition {
        longitude: lon,
        rashi: rashi_from_longitude(lon),
        degrees_in_rashi: lon % 30.0,
        nakshatra_num: info.nakshatra_index + 1,
        nakshatra: info.nakshatra,
        nakshatra_name: info.nakshatra.name(),
        nakshatra_lord: info.nakshatra.lord(),
        sub_lord: arc.graha,
        pada: info.pada,
        position_in_nakshatra: position,
        sub_lord_arc_start: base + arc.start,
        sub_lord_arc_end: base + arc.end,
    })
}

/// All 243 sub-lord arcs of the zodiac in ascending longitude, as
/// `(nakshatra, sub_lord, start_deg, end_deg)`.
pub fn sub_lord_table() -> Vec<(Nakshatra, Graha, f64, f64)> {
    ALL_NAKSHATRAS_27
        .iter()
        .flat_map(|&nak| {
            let base = nak.start_deg();
            sub_lord_arcs(nak)
                .into_iter()
                .map(move |a| (nak, a.graha, base + a.start, base + a.end))
        })
        .collect()
}
