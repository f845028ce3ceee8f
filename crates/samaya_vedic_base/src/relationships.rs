//! Fixed graha friendship pairs used when weighing dasha support.
//!
//! This is a symmetric, pairwise table rather than the full naisargika
//! friend/neutral/enemy matrix: two grahas are either a listed friendly
//! pair or not.

use crate::graha::Graha;

// ---------------------------------------------------------------------------
// Friendly pairs
// ---------------------------------------------------------------------------

/// Unordered friendly pairs.
pub const FRIENDLY_PAIRS: [(Graha, Graha); 10] = [
    (Graha::Surya, Graha::Chandra),
    (Graha::Surya, Graha::Mangal),
    (Graha::Surya, Graha::Guru),
    (Graha::Chandra, Graha::Buddh),
    (Graha::Mangal, Graha::Guru),
    (Graha::Buddh, Graha::Shukra),
    (Graha::Shukra, Graha::Shani),
    (Graha::Buddh, Graha::Shani),
    (Graha::Rahu, Graha::Shani),
    (Graha::Ketu, Graha::Mangal),
];

/// Whether `a` and `b` form a listed friendly pair (order does not matter).
///
/// A graha is not its own friend here; identity is scored separately.
pub fn are_friendly(a: Graha, b: Graha) -> bool {
    FRIENDLY_PAIRS
        .iter()
        .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
}

/// Every graha listed as a friend of `graha`, in table order.
pub fn friends_of(graha: Graha) -> Vec<Graha> {
    FRIENDLY_PAIRS
        .iter()
        .filter_map(|&(x, y)| {
            if x == graha {
                Some(y)
            } else if y == graha {
                Some(x)
            } else {
                None
            }
        })
        .collect()
}
