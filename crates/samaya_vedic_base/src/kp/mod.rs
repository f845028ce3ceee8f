//! Krishnamurti Paddhati: sub-lords and house significators.

pub mod significator;
pub mod sublord;

pub use significator::{Significator, get_significators_for_house, significators_by_house};
pub use sublord::{SubLordPosition, get_sub_lord, sub_lord_arcs, sub_lord_table};
