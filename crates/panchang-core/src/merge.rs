//! Response merging and static gap filling.
//!
//! Provider responses are decoded into a [`PartialRecord`]; whatever is still
//! missing afterwards is replaced with a fixed placeholder and tagged
//! [`Confidence::StaticDefault`]. Each endpoint owns a disjoint set of fields,
//! so the order in which responses are absorbed does not matter.

use serde_json::Value;
use tracing::debug;

use crate::decode::{decode_into, DecodeError};
use crate::domain::names::{self, UTTARAYANAM};
use crate::domain::{
    AlmanacRecord, Confidence, LunarMonthInfo, NakshatraInfo, Paksha, PartialRecord, PeriodEntry,
    PeriodTable, Provenance, RecordField, RituInfo, TithiInfo, WeekdayInfo, YearInfo,
};
use crate::endpoints::MergeTarget;

pub const DEFAULT_SUNRISE: &str = "06:00:00";
pub const DEFAULT_SUNSET: &str = "18:00:00";

const UNKNOWN_NAME: &str = "Unknown";

/// Accumulates decoded provider responses.
#[derive(Debug, Clone, Default)]
pub struct ResponseMerger {
    partial: PartialRecord,
    rejected: Vec<(MergeTarget, DecodeError)>,
}

impl ResponseMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from fields already decoded elsewhere, e.g. an aggregate response.
    pub fn from_partial(partial: PartialRecord) -> Self {
        Self {
            partial,
            rejected: Vec::new(),
        }
    }

    /// Decodes one response into its slot. Undecodable payloads leave the slot
    /// empty and are remembered for reporting.
    pub fn absorb(&mut self, target: MergeTarget, response: &Value) {
        if let Err(error) = decode_into(target, response, &mut self.partial) {
            debug!(slot = %target, error = %error, "discarding undecodable provider payload");
            self.rejected.push((target, error));
        }
    }

    pub fn partial(&self) -> &PartialRecord {
        &self.partial
    }

    pub fn rejected(&self) -> &[(MergeTarget, DecodeError)] {
        &self.rejected
    }

    pub fn finish(self) -> AlmanacRecord {
        fill_defaults(self.partial)
    }
}

/// Completes a partial record with static placeholders.
pub fn fill_defaults(partial: PartialRecord) -> AlmanacRecord {
    let mut provenance = Provenance::uniform(Confidence::StaticDefault);
    for field in RecordField::ALL {
        if partial.has(field) {
            provenance.set(field, Confidence::Provided);
        }
    }

    AlmanacRecord {
        sunrise: partial
            .sunrise
            .unwrap_or_else(|| String::from(DEFAULT_SUNRISE)),
        sunset: partial.sunset.unwrap_or_else(|| String::from(DEFAULT_SUNSET)),
        weekday: partial.weekday.unwrap_or_else(default_weekday),
        lunar_month: partial.lunar_month.unwrap_or_else(default_lunar_month),
        ritu: partial.ritu.unwrap_or_else(default_ritu),
        aayanam: partial
            .aayanam
            .unwrap_or_else(|| String::from(UTTARAYANAM)),
        tithi: partial.tithi.unwrap_or_else(default_tithi),
        nakshatra: partial.nakshatra.unwrap_or_else(default_nakshatra),
        yoga: partial.yoga.unwrap_or_else(default_yoga),
        karana: partial.karana.unwrap_or_else(default_karana),
        year: partial.year.unwrap_or_else(default_year),
        provenance,
    }
}

pub fn default_weekday() -> WeekdayInfo {
    WeekdayInfo {
        number: 2,
        name: names::lookup(&names::WEEKDAY_NAMES, 2).to_owned(),
        vedic_number: 2,
        vedic_name: names::lookup(&names::VEDIC_WEEKDAY_NAMES, 2).to_owned(),
    }
}

pub fn default_lunar_month() -> LunarMonthInfo {
    let name = names::lookup(&names::LUNAR_MONTH_NAMES, 1);
    LunarMonthInfo {
        number: 1,
        name: name.to_owned(),
        full_name: name.to_owned(),
        adhika: 0,
        nija: 1,
        kshaya: 0,
    }
}

pub fn default_ritu() -> RituInfo {
    RituInfo {
        number: 1,
        name: names::lookup(&names::RITU_NAMES, 1).to_owned(),
    }
}

pub fn default_tithi() -> TithiInfo {
    TithiInfo {
        number: 1,
        name: names::lookup(&names::TITHI_NAMES, 1).to_owned(),
        paksha: Paksha::Shukla,
        completes_at: None,
        left_percentage: None,
    }
}

pub fn default_nakshatra() -> NakshatraInfo {
    NakshatraInfo {
        number: 1,
        name: names::lookup(&names::NAKSHATRA_NAMES, 1).to_owned(),
        starts_at: None,
        ends_at: None,
        left_percentage: None,
    }
}

fn default_period(table: &[&'static str]) -> PeriodTable {
    PeriodTable::from([(
        1,
        PeriodEntry {
            number: 1,
            name: names::lookup(table, 1).to_owned(),
            completion: None,
            left_percentage: None,
        },
    )])
}

pub fn default_yoga() -> PeriodTable {
    default_period(&names::YOGA_NAMES)
}

pub fn default_karana() -> PeriodTable {
    default_period(&names::KARANA_NAMES)
}

pub fn default_year() -> YearInfo {
    YearInfo {
        status: String::from("default"),
        timestamp: None,
        saka_salivahana_number: 0,
        saka_salivahana_name: String::from(UNKNOWN_NAME),
        saka_salivahana_name_number: 0,
        vikram_chaitradi_number: 0,
        vikram_chaitradi_name: String::from(UNKNOWN_NAME),
        vikram_chaitradi_name_number: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_partial_becomes_all_defaults() {
        let record = fill_defaults(PartialRecord::default());

        assert_eq!(record.sunrise, DEFAULT_SUNRISE);
        assert_eq!(record.sunset, DEFAULT_SUNSET);
        assert_eq!(record.weekday.name, "Monday");
        assert_eq!(record.lunar_month.full_name, "Chaitra");
        assert_eq!(record.ritu.name, "Vasanta");
        assert_eq!(record.aayanam, "Uttarayanam");
        assert_eq!(record.yoga[&1u8].name, "Vishkambha");
        assert_eq!(record.karana[&1u8].name, "Bava");
        assert_eq!(record.year.saka_salivahana_name, "Unknown");
        assert_eq!(
            record.provenance.count(Confidence::StaticDefault),
            RecordField::ALL.len()
        );
    }

    #[test]
    fn absorbed_fields_are_tagged_provided() {
        let mut merger = ResponseMerger::new();
        merger.absorb(
            MergeTarget::SunTimes,
            &json!({"output": {"sun_rise": "05:56:23", "sun_set": "18:44:10"}}),
        );
        merger.absorb(MergeTarget::Ritu, &json!({"output": {"number": 2, "name": "Grishma"}}));

        let record = merger.finish();

        assert_eq!(record.sunrise, "05:56:23");
        assert_eq!(record.ritu.name, "Grishma");
        assert_eq!(record.provenance.get(RecordField::Sunrise), Confidence::Provided);
        assert_eq!(record.provenance.get(RecordField::Ritu), Confidence::Provided);
        assert_eq!(record.provenance.get(RecordField::Tithi), Confidence::StaticDefault);
        assert_eq!(record.tithi, default_tithi());
    }

    #[test]
    fn rejected_payloads_do_not_fill_slots() {
        let mut merger = ResponseMerger::new();
        merger.absorb(MergeTarget::Nakshatra, &json!({"output": "not available"}));

        assert!(merger.partial().nakshatra.is_none());
        assert_eq!(merger.rejected().len(), 1);
        assert_eq!(merger.finish().nakshatra, default_nakshatra());
    }

    #[test]
    fn absorb_order_does_not_change_the_result() {
        let tithi = json!({"number": 5, "name": "Panchami", "paksha": "shukla"});
        let weekday = json!({"weekday_number": 3});

        let mut forward = ResponseMerger::new();
        forward.absorb(MergeTarget::Tithi, &tithi);
        forward.absorb(MergeTarget::Weekday, &weekday);

        let mut reverse = ResponseMerger::new();
        reverse.absorb(MergeTarget::Weekday, &weekday);
        reverse.absorb(MergeTarget::Tithi, &tithi);

        assert_eq!(forward.finish(), reverse.finish());
    }
}
