use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Lunar fortnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Paksha {
    Shukla,
    Krishna,
}

impl Paksha {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shukla => "shukla",
            Self::Krishna => "krishna",
        }
    }

    /// Case-insensitive parse of provider labels such as `"Shukla Paksha"`.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.starts_with("shukla") {
            Some(Self::Shukla)
        } else if normalized.starts_with("krishna") {
            Some(Self::Krishna)
        } else {
            None
        }
    }
}

impl Display for Paksha {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field of the record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Decoded from an upstream provider response.
    Provided,
    /// Fixed placeholder inserted because the provider did not deliver it.
    StaticDefault,
    /// Computed locally by the offline calculator.
    Approximated,
}

/// Top-level fields of an [`AlmanacRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordField {
    Sunrise,
    Sunset,
    Weekday,
    LunarMonth,
    Ritu,
    Aayanam,
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    Year,
}

impl RecordField {
    pub const ALL: [Self; 11] = [
        Self::Sunrise,
        Self::Sunset,
        Self::Weekday,
        Self::LunarMonth,
        Self::Ritu,
        Self::Aayanam,
        Self::Tithi,
        Self::Nakshatra,
        Self::Yoga,
        Self::Karana,
        Self::Year,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunrise => "sunrise",
            Self::Sunset => "sunset",
            Self::Weekday => "weekday",
            Self::LunarMonth => "lunarMonth",
            Self::Ritu => "ritu",
            Self::Aayanam => "aayanam",
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatra",
            Self::Yoga => "yoga",
            Self::Karana => "karana",
            Self::Year => "year",
        }
    }
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field confidence tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance(BTreeMap<RecordField, Confidence>);

impl Provenance {
    pub fn uniform(confidence: Confidence) -> Self {
        Self(
            RecordField::ALL
                .into_iter()
                .map(|field| (field, confidence))
                .collect(),
        )
    }

    pub fn set(&mut self, field: RecordField, confidence: Confidence) {
        self.0.insert(field, confidence);
    }

    pub fn get(&self, field: RecordField) -> Confidence {
        self.0
            .get(&field)
            .copied()
            .unwrap_or(Confidence::StaticDefault)
    }

    pub fn count(&self, confidence: Confidence) -> usize {
        self.0.values().filter(|value| **value == confidence).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayInfo {
    pub number: u8,
    pub name: String,
    pub vedic_number: u8,
    pub vedic_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarMonthInfo {
    pub number: u8,
    pub name: String,
    pub full_name: String,
    pub adhika: u8,
    pub nija: u8,
    pub kshaya: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RituInfo {
    pub number: u8,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TithiInfo {
    pub number: u8,
    pub name: String,
    pub paksha: Paksha,
    pub completes_at: Option<String>,
    pub left_percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NakshatraInfo {
    pub number: u8,
    pub name: String,
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
    pub left_percentage: Option<f64>,
}

/// One yoga or karana period of the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodEntry {
    pub number: u8,
    pub name: String,
    pub completion: Option<String>,
    pub left_percentage: Option<f64>,
}

/// Yoga/karana periods keyed by their 1-based position within the day.
pub type PeriodTable = BTreeMap<u8, PeriodEntry>;

/// Saka and Vikram era year numbers with their samvatsara names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearInfo {
    pub status: String,
    pub timestamp: Option<String>,
    pub saka_salivahana_number: i32,
    pub saka_salivahana_name: String,
    pub saka_salivahana_name_number: i32,
    pub vikram_chaitradi_number: i32,
    pub vikram_chaitradi_name: String,
    pub vikram_chaitradi_name_number: i32,
}

/// Canonical almanac record returned by every tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmanacRecord {
    pub sunrise: String,
    pub sunset: String,
    pub weekday: WeekdayInfo,
    pub lunar_month: LunarMonthInfo,
    pub ritu: RituInfo,
    pub aayanam: String,
    pub tithi: TithiInfo,
    pub nakshatra: NakshatraInfo,
    pub yoga: PeriodTable,
    pub karana: PeriodTable,
    pub year: YearInfo,
    pub provenance: Provenance,
}

/// Record under construction from provider responses; every field optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialRecord {
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub weekday: Option<WeekdayInfo>,
    pub lunar_month: Option<LunarMonthInfo>,
    pub ritu: Option<RituInfo>,
    pub aayanam: Option<String>,
    pub tithi: Option<TithiInfo>,
    pub nakshatra: Option<NakshatraInfo>,
    pub yoga: Option<PeriodTable>,
    pub karana: Option<PeriodTable>,
    pub year: Option<YearInfo>,
}

impl PartialRecord {
    pub fn has(&self, field: RecordField) -> bool {
        match field {
            RecordField::Sunrise => self.sunrise.is_some(),
            RecordField::Sunset => self.sunset.is_some(),
            RecordField::Weekday => self.weekday.is_some(),
            RecordField::LunarMonth => self.lunar_month.is_some(),
            RecordField::Ritu => self.ritu.is_some(),
            RecordField::Aayanam => self.aayanam.is_some(),
            RecordField::Tithi => self.tithi.is_some(),
            RecordField::Nakshatra => self.nakshatra.is_some(),
            RecordField::Yoga => self.yoga.is_some(),
            RecordField::Karana => self.karana.is_some(),
            RecordField::Year => self.year.is_some(),
        }
    }

    pub fn present_fields(&self) -> usize {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.has(*field))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.present_fields() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paksha_parse_accepts_provider_labels() {
        assert_eq!(Paksha::parse("Shukla Paksha"), Some(Paksha::Shukla));
        assert_eq!(Paksha::parse(" krishna"), Some(Paksha::Krishna));
        assert_eq!(Paksha::parse("purnimanta"), None);
    }

    #[test]
    fn provenance_serializes_with_camel_case_field_names() {
        let mut provenance = Provenance::uniform(Confidence::StaticDefault);
        provenance.set(RecordField::LunarMonth, Confidence::Provided);

        let json = serde_json::to_value(&provenance).expect("provenance serializes");
        assert_eq!(json["lunarMonth"], "provided");
        assert_eq!(json["sunrise"], "static_default");
        assert_eq!(provenance.count(Confidence::Provided), 1);
    }

    #[test]
    fn period_table_keys_serialize_as_strings() {
        let mut table = PeriodTable::new();
        table.insert(
            1,
            PeriodEntry {
                number: 1,
                name: String::from("Bava"),
                completion: None,
                left_percentage: None,
            },
        );

        let json = serde_json::to_value(&table).expect("table serializes");
        assert_eq!(json["1"]["name"], "Bava");
        assert!(json["1"]["completion"].is_null());
    }
}
