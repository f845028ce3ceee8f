//! Proportional partition of a span among the 9 Vimshottari grahas.
//!
//! One helper serves every nested division in this crate:
//! - mahadashas inside the 120-year cycle (years),
//! - antardashas inside a mahadasha (years),
//! - pratyantardashas inside an antardasha (days),
//! - KP sub-lord arcs inside a nakshatra (degrees).
//!
//! Portion length = (graha_years / 120) * span. The last portion's end is
//! snapped to the span so accumulated float drift never leaves a gap.

use serde::Serialize;

use crate::graha::{Graha, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_TOTAL_YEARS};
use crate::util::DAYS_PER_YEAR;

/// Unit of a partitioned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpanUnit {
    Years,
    Days,
    Degrees,
}

/// One graha's share of a partitioned span, as offsets from the span start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Portion {
    /// Ruling graha.
    pub graha: Graha,
    /// Offset of the portion start, inclusive.
    pub start: f64,
    /// Offset of the portion end, exclusive for time spans.
    pub end: f64,
    /// Unit of `start`/`end`.
    pub unit: SpanUnit,
}

impl Portion {
    /// Length of the portion in its own unit.
    pub fn length(&self) -> f64 {
        self.end - self.start
    }

    /// Length converted to years. Degrees have no year equivalent and return None.
    pub fn length_years(&self) -> Option<f64> {
        match self.unit {
            SpanUnit::Years => Some(self.length()),
            SpanUnit::Days => Some(self.length() / DAYS_PER_YEAR),
            SpanUnit::Degrees => None,
        }
    }
}

/// The Vimshottari sequence rotated to begin at `first`.
pub fn cyclic_sequence(first: Graha) -> [Graha; 9] {
    let start = first.vimshottari_index();
    let mut seq = VIMSHOTTARI_SEQUENCE;
    seq.rotate_left(start);
    seq
}

/// Partition `span` among the 9 grahas in Vimshottari order starting at `first`.
pub fn proportional_partition(first: Graha, span: f64, unit: SpanUnit) -> [Portion; 9] {
    let seq = cyclic_sequence(first);
    let mut portions = [Portion {
        graha: first,
        start: 0.0,
        end: 0.0,
        unit,
    }; 9];
    let mut cursor = 0.0;

    for (slot, graha) in portions.iter_mut().zip(seq) {
        // Multiply before dividing: whole-year weights over a 120-year span stay exact.
        let length = graha.vimshottari_years() * span / VIMSHOTTARI_TOTAL_YEARS;
        let end = cursor + length;
        *slot = Portion {
            graha,
            start: cursor,
            end,
            unit,
        };
        cursor = end;
    }

    snap_last_portion_end(&mut portions, span);
    portions
}

/// Snap the last portion's end to the span to absorb floating-point drift.
pub fn snap_last_portion_end(portions: &mut [Portion], span: f64) {
    if let Some(last) = portions.last_mut() {
        last.end = span;
    }
}

/// Index of the portion whose half-open range `[start, end)` holds `offset`.
///
/// An offset at or past the final end (float residue) falls back to the
/// last portion, so every offset in the span is covered.
pub fn locate_portion(portions: &[Portion], offset: f64) -> usize {
    portions
        .iter()
        .position(|p| offset < p.end)
        .unwrap_or(portions.len().saturating_sub(1))
}
