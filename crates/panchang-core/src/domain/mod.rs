//! # Domain Models
//!
//! Canonical almanac types shared by every tier of the engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`AlmanacRecord`] | Fully populated panchang for one date and place |
//! | [`PartialRecord`] | Record under assembly from provider responses |
//! | [`Provenance`] | Per-field [`Confidence`] tags |
//! | [`PeriodEntry`] | One yoga or karana period |
//!
//! Optional timestamps and percentages are either provider values or `null`.
//! Only the offline calculator fills percentages itself.

pub mod names;
mod record;

pub use record::{
    AlmanacRecord, Confidence, LunarMonthInfo, NakshatraInfo, Paksha, PartialRecord,
    PeriodEntry, PeriodTable, Provenance, RecordField, RituInfo, TithiInfo, WeekdayInfo,
    YearInfo,
};
