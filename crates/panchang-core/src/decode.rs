//! Lenient decoding of provider payloads into a [`PartialRecord`].
//!
//! Provider responses arrive wrapped as `{"statusCode": 200, "output": ...}`,
//! where `output` is sometimes a JSON document encoded as a string. Field
//! names follow the provider's snake_case spelling, including its
//! `left_precentage` typo. Names missing from a payload are filled from the
//! local tables by number.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::names::{
    self, KARANA_NAMES, KRISHNA_FINAL_TITHI, LUNAR_MONTH_NAMES, NAKSHATRA_NAMES, RITU_NAMES,
    TITHI_NAMES, VEDIC_WEEKDAY_NAMES, WEEKDAY_NAMES, YOGA_NAMES,
};
use crate::domain::{
    LunarMonthInfo, NakshatraInfo, Paksha, PartialRecord, PeriodEntry, PeriodTable, RituInfo,
    TithiInfo, WeekdayInfo, YearInfo,
};
use crate::endpoints::MergeTarget;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("{target} payload has unexpected shape: {message}")]
    Shape {
        target: MergeTarget,
        message: String,
    },

    #[error("{field} value {value} is out of range")]
    OutOfRange { field: &'static str, value: i64 },

    #[error("{target} payload carried no entries")]
    Empty { target: MergeTarget },
}

/// Strips the provider envelope, parsing string-encoded `output` documents.
pub fn unwrap_output(value: &Value) -> Value {
    match value.get("output") {
        Some(Value::String(raw)) => {
            serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
        }
        Some(output) => output.clone(),
        None => value.clone(),
    }
}

/// Decodes a specialized endpoint response into its merge slot.
pub fn decode_into(
    target: MergeTarget,
    response: &Value,
    partial: &mut PartialRecord,
) -> Result<(), DecodeError> {
    let output = unwrap_output(response);
    let nested = target
        .aggregate_key()
        .and_then(|key| output.get(key))
        .cloned();
    apply(target, &nested.unwrap_or(output), partial)
}

/// Decodes every slot an aggregate response carries.
///
/// Slots that are absent or malformed are reported and left empty.
pub fn decode_aggregate(response: &Value) -> (PartialRecord, Vec<(MergeTarget, DecodeError)>) {
    let output = unwrap_output(response);
    let mut partial = PartialRecord::default();
    let mut failures = Vec::new();

    for target in MergeTarget::ALL {
        let payload = match target.aggregate_key() {
            Some(key) => match output.get(key) {
                Some(nested) => nested.clone(),
                None => {
                    failures.push((
                        target,
                        DecodeError::Shape {
                            target,
                            message: format!("missing '{key}'"),
                        },
                    ));
                    continue;
                }
            },
            None => output.clone(),
        };

        if let Err(error) = apply(target, &payload, &mut partial) {
            failures.push((target, error));
        }
    }

    (partial, failures)
}

fn apply(
    target: MergeTarget,
    payload: &Value,
    partial: &mut PartialRecord,
) -> Result<(), DecodeError> {
    match target {
        MergeTarget::SunTimes => {
            let sun: SunTimesPayload = parse(target, payload)?;
            partial.sunrise = Some(normalize_clock(target, &sun.sun_rise)?);
            partial.sunset = Some(normalize_clock(target, &sun.sun_set)?);
        }
        MergeTarget::Tithi => {
            partial.tithi = Some(parse::<TithiPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::Nakshatra => {
            partial.nakshatra = Some(parse::<NakshatraPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::Yoga => partial.yoga = Some(period_table(target, payload, &YOGA_NAMES)?),
        MergeTarget::Karana => {
            partial.karana = Some(period_table(target, payload, &KARANA_NAMES)?);
        }
        MergeTarget::Weekday => {
            partial.weekday = Some(parse::<WeekdayPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::LunarMonth => {
            partial.lunar_month = Some(parse::<LunarMonthPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::Ritu => {
            partial.ritu = Some(parse::<RituPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::Year => {
            partial.year = Some(parse::<YearPayload>(target, payload)?.into_info()?);
        }
        MergeTarget::Aayanam => partial.aayanam = Some(aayanam(target, payload)?),
    }
    Ok(())
}

fn parse<T: DeserializeOwned>(target: MergeTarget, payload: &Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload.clone()).map_err(|error| DecodeError::Shape {
        target,
        message: error.to_string(),
    })
}

fn in_range(field: &'static str, value: u8, max: u8) -> Result<u8, DecodeError> {
    if (1..=max).contains(&value) {
        Ok(value)
    } else {
        Err(DecodeError::OutOfRange {
            field,
            value: i64::from(value),
        })
    }
}

fn name_or_lookup(name: Option<String>, table: &[&'static str], number: u8) -> String {
    name.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| names::lookup(table, u32::from(number)).to_owned())
}

/// Reduces `HH:MM:SS`, `YYYY-MM-DD HH:MM:SS` or ISO timestamps to `HH:MM:SS`.
fn normalize_clock(target: MergeTarget, raw: &str) -> Result<String, DecodeError> {
    let invalid = || DecodeError::Shape {
        target,
        message: format!("unrecognized time '{raw}'"),
    };

    let clock = raw
        .trim()
        .rsplit(|ch: char| ch == ' ' || ch == 'T')
        .next()
        .ok_or_else(invalid)?;
    let clock = clock
        .split(|ch: char| ch == 'Z' || ch == '+')
        .next()
        .unwrap_or(clock);

    let mut parts = clock.split(':');
    let hours = parts.next().and_then(|part| part.parse::<u8>().ok());
    let minutes = parts.next().and_then(|part| part.parse::<u8>().ok());
    let seconds = match parts.next() {
        Some(part) => part.parse::<f64>().ok().map(|value| value.floor() as u8),
        None => Some(0),
    };

    match (hours, minutes, seconds) {
        (Some(h), Some(m), Some(s)) if h < 24 && m < 60 && s < 60 => {
            Ok(format!("{h:02}:{m:02}:{s:02}"))
        }
        _ => Err(invalid()),
    }
}

#[derive(Debug, Deserialize)]
struct SunTimesPayload {
    #[serde(alias = "sunrise")]
    sun_rise: String,
    #[serde(alias = "sunset")]
    sun_set: String,
}

#[derive(Debug, Deserialize)]
struct WeekdayPayload {
    #[serde(alias = "number")]
    weekday_number: u8,
    #[serde(default, alias = "name")]
    weekday_name: Option<String>,
    #[serde(default, alias = "vedic_number")]
    vedic_weekday_number: Option<u8>,
    #[serde(default, alias = "vedic_name")]
    vedic_weekday_name: Option<String>,
}

impl WeekdayPayload {
    fn into_info(self) -> Result<WeekdayInfo, DecodeError> {
        let number = in_range("weekday.number", self.weekday_number, 7)?;
        let vedic_number = in_range(
            "weekday.vedicNumber",
            self.vedic_weekday_number.unwrap_or(number),
            7,
        )?;
        Ok(WeekdayInfo {
            number,
            name: name_or_lookup(self.weekday_name, &WEEKDAY_NAMES, number),
            vedic_number,
            vedic_name: name_or_lookup(self.vedic_weekday_name, &VEDIC_WEEKDAY_NAMES, vedic_number),
        })
    }
}

fn default_nija() -> u8 {
    1
}

#[derive(Debug, Deserialize)]
struct LunarMonthPayload {
    #[serde(alias = "number")]
    lunar_month_number: u8,
    #[serde(default, alias = "name")]
    lunar_month_name: Option<String>,
    #[serde(default, alias = "full_name")]
    lunar_month_full_name: Option<String>,
    #[serde(default)]
    adhika: u8,
    #[serde(default = "default_nija")]
    nija: u8,
    #[serde(default)]
    kshaya: u8,
}

impl LunarMonthPayload {
    fn into_info(self) -> Result<LunarMonthInfo, DecodeError> {
        let number = in_range("lunarMonth.number", self.lunar_month_number, 12)?;
        let name = name_or_lookup(self.lunar_month_name, &LUNAR_MONTH_NAMES, number);
        let full_name = self
            .lunar_month_full_name
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| name.clone());
        Ok(LunarMonthInfo {
            number,
            name,
            full_name,
            adhika: self.adhika,
            nija: self.nija,
            kshaya: self.kshaya,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RituPayload {
    number: u8,
    #[serde(default)]
    name: Option<String>,
}

impl RituPayload {
    fn into_info(self) -> Result<RituInfo, DecodeError> {
        let number = in_range("ritu.number", self.number, 6)?;
        Ok(RituInfo {
            number,
            name: name_or_lookup(self.name, &RITU_NAMES, number),
        })
    }
}

#[derive(Debug, Deserialize)]
struct TithiPayload {
    number: u8,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    paksha: Option<String>,
    #[serde(default)]
    completes_at: Option<String>,
    #[serde(default, alias = "left_precentage")]
    left_percentage: Option<f64>,
}

impl TithiPayload {
    /// Folds the 1–30 lunar-month numbering into 1–15 plus paksha.
    fn into_info(self) -> Result<TithiInfo, DecodeError> {
        let absolute = in_range("tithi.number", self.number, 30)?;
        let derived_paksha = if absolute > 15 {
            Paksha::Krishna
        } else {
            Paksha::Shukla
        };
        let paksha = self
            .paksha
            .as_deref()
            .and_then(Paksha::parse)
            .unwrap_or(derived_paksha);
        let number = (absolute - 1) % 15 + 1;

        let name = match self.name.filter(|value| !value.trim().is_empty()) {
            Some(name) => name,
            None if paksha == Paksha::Krishna && number == 15 => KRISHNA_FINAL_TITHI.to_owned(),
            None => names::lookup(&TITHI_NAMES, u32::from(number)).to_owned(),
        };

        Ok(TithiInfo {
            number,
            name,
            paksha,
            completes_at: self.completes_at,
            left_percentage: self.left_percentage,
        })
    }
}

#[derive(Debug, Deserialize)]
struct NakshatraPayload {
    number: u8,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    starts_at: Option<String>,
    #[serde(default)]
    ends_at: Option<String>,
    #[serde(default, alias = "left_precentage")]
    left_percentage: Option<f64>,
}

impl NakshatraPayload {
    fn into_info(self) -> Result<NakshatraInfo, DecodeError> {
        let number = in_range("nakshatra.number", self.number, 27)?;
        Ok(NakshatraInfo {
            number,
            name: name_or_lookup(self.name, &NAKSHATRA_NAMES, number),
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            left_percentage: self.left_percentage,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PeriodPayload {
    number: u8,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    completion: Option<String>,
    #[serde(
        default,
        alias = "left_precentage",
        alias = "yoga_left_percentage",
        alias = "karana_left_percentage"
    )]
    left_percentage: Option<f64>,
}

/// Accepts either `{"1": {...}, "2": {...}}` or a single bare entry.
fn period_table(
    target: MergeTarget,
    payload: &Value,
    table: &[&'static str],
) -> Result<PeriodTable, DecodeError> {
    let entries: BTreeMap<String, PeriodPayload> = if payload.get("number").is_some() {
        let single: PeriodPayload = parse(target, payload)?;
        BTreeMap::from([(String::from("1"), single)])
    } else {
        parse(target, payload)?
    };

    let mut periods = PeriodTable::new();
    for (key, entry) in entries {
        let position = key.trim().parse::<u8>().map_err(|_| DecodeError::Shape {
            target,
            message: format!("non-numeric period key '{key}'"),
        })?;
        periods.insert(
            position,
            PeriodEntry {
                number: entry.number,
                name: name_or_lookup(entry.name, table, entry.number),
                completion: entry.completion,
                left_percentage: entry.left_percentage,
            },
        );
    }

    if periods.is_empty() {
        return Err(DecodeError::Empty { target });
    }
    Ok(periods)
}

/// Years between the Saka era and the Gregorian calendar.
const SAKA_EPOCH_OFFSET: i32 = 78;

#[derive(Debug, Deserialize)]
struct YearPayload {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    timestamp: Option<Value>,
    saka_salivahana_number: i32,
    #[serde(default)]
    saka_salivahana_name: Option<String>,
    #[serde(default)]
    saka_salivahana_name_number: Option<i32>,
    vikram_chaitradi_number: i32,
    #[serde(default)]
    vikram_chaitradi_name: Option<String>,
    #[serde(default)]
    vikram_chaitradi_name_number: Option<i32>,
}

impl YearPayload {
    fn into_info(self) -> Result<YearInfo, DecodeError> {
        let gregorian = self
            .saka_salivahana_number
            .checked_add(SAKA_EPOCH_OFFSET)
            .ok_or(DecodeError::OutOfRange {
                field: "year.saka_salivahana_number",
                value: i64::from(self.saka_salivahana_number),
            })?;
        let samvatsara = names::samvatsara_for_year(gregorian);
        Ok(YearInfo {
            status: self
                .status
                .map(value_to_text)
                .unwrap_or_else(|| String::from("ok")),
            timestamp: self.timestamp.map(value_to_text),
            saka_salivahana_number: self.saka_salivahana_number,
            saka_salivahana_name: self
                .saka_salivahana_name
                .unwrap_or_else(|| samvatsara.to_owned()),
            saka_salivahana_name_number: self
                .saka_salivahana_name_number
                .unwrap_or_else(|| self.saka_salivahana_number.rem_euclid(60)),
            vikram_chaitradi_number: self.vikram_chaitradi_number,
            vikram_chaitradi_name: self
                .vikram_chaitradi_name
                .unwrap_or_else(|| samvatsara.to_owned()),
            vikram_chaitradi_name_number: self
                .vikram_chaitradi_name_number
                .unwrap_or_else(|| self.vikram_chaitradi_number.rem_euclid(60)),
        })
    }
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn aayanam(target: MergeTarget, payload: &Value) -> Result<String, DecodeError> {
    let text = match payload {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => map.get("name").and_then(Value::as_str),
        _ => None,
    };

    text.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| DecodeError::Shape {
            target,
            message: String::from("expected a string"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_encoded_output_is_parsed() {
        let response = json!({
            "statusCode": 200,
            "output": "{\"number\": 18, \"name\": \"Tritiya\", \"paksha\": \"krishna\", \"completes_at\": \"2024-04-15 13:24:51\", \"left_precentage\": 42.5}"
        });
        let mut partial = PartialRecord::default();

        decode_into(MergeTarget::Tithi, &response, &mut partial).expect("tithi decodes");

        let tithi = partial.tithi.expect("tithi present");
        assert_eq!(tithi.number, 3);
        assert_eq!(tithi.paksha, Paksha::Krishna);
        assert_eq!(tithi.completes_at.as_deref(), Some("2024-04-15 13:24:51"));
        assert_eq!(tithi.left_percentage, Some(42.5));
    }

    #[test]
    fn sun_times_are_reduced_to_clock_strings() {
        let response = json!({"output": {"sun_rise": "2024-04-15 05:56:23.5", "sun_set": "18:44"}});
        let mut partial = PartialRecord::default();

        decode_into(MergeTarget::SunTimes, &response, &mut partial).expect("sun times decode");

        assert_eq!(partial.sunrise.as_deref(), Some("05:56:23"));
        assert_eq!(partial.sunset.as_deref(), Some("18:44:00"));
    }

    #[test]
    fn missing_names_are_filled_from_tables() {
        let mut partial = PartialRecord::default();
        decode_into(MergeTarget::Nakshatra, &json!({"output": {"number": 4}}), &mut partial)
            .expect("nakshatra decodes");
        decode_into(MergeTarget::Weekday, &json!({"weekday_number": 2}), &mut partial)
            .expect("weekday decodes");

        assert_eq!(partial.nakshatra.expect("present").name, "Rohini");
        let weekday = partial.weekday.expect("present");
        assert_eq!(weekday.name, "Monday");
        assert_eq!(weekday.vedic_name, "Somavara");
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        let mut partial = PartialRecord::default();
        let error = decode_into(MergeTarget::Ritu, &json!({"number": 7}), &mut partial)
            .expect_err("ritu 7 does not exist");
        assert!(matches!(error, DecodeError::OutOfRange { field: "ritu.number", .. }));
        assert!(partial.ritu.is_none());
    }

    #[test]
    fn saka_years_that_overflow_the_gregorian_conversion_are_rejected() {
        let mut partial = PartialRecord::default();
        let payload = json!({"saka_salivahana_number": i32::MAX, "vikram_chaitradi_number": 1});

        let error = decode_into(MergeTarget::Year, &payload, &mut partial)
            .expect_err("saka year cannot be shifted past i32::MAX");

        assert_eq!(
            error,
            DecodeError::OutOfRange {
                field: "year.saka_salivahana_number",
                value: i64::from(i32::MAX),
            }
        );
        assert!(partial.year.is_none());
    }

    #[test]
    fn yoga_accepts_keyed_tables_and_bare_entries() {
        let mut partial = PartialRecord::default();
        let keyed = json!({"output": {
            "1": {"number": 3, "name": "Ayushman", "completion": "2024-04-15 09:00:00", "yoga_left_percentage": 12.0},
            "2": {"number": 4}
        }});
        decode_into(MergeTarget::Yoga, &keyed, &mut partial).expect("keyed yoga decodes");
        let yoga = partial.yoga.take().expect("present");
        assert_eq!(yoga.len(), 2);
        assert_eq!(yoga[&1u8].left_percentage, Some(12.0));
        assert_eq!(yoga[&2u8].name, "Saubhagya");

        decode_into(MergeTarget::Karana, &json!({"number": 1, "name": "Bava"}), &mut partial)
            .expect("bare karana decodes");
        assert_eq!(partial.karana.expect("present")[&1u8].name, "Bava");
    }

    #[test]
    fn aggregate_reports_missing_slots_without_losing_others() {
        let response = json!({"statusCode": 200, "output": {
            "sun_rise": "05:56:23",
            "sun_set": "18:44:10",
            "aayanam": "Uttarayana",
            "ritu": {"number": 1, "name": "Vasanta"}
        }});

        let (partial, failures) = decode_aggregate(&response);

        assert_eq!(partial.present_fields(), 4);
        assert_eq!(partial.aayanam.as_deref(), Some("Uttarayana"));
        assert!(failures.iter().any(|(target, _)| *target == MergeTarget::Tithi));
        assert!(!failures.iter().any(|(target, _)| *target == MergeTarget::SunTimes));
    }

    #[test]
    fn year_names_fall_back_to_samvatsara_cycle() {
        let mut partial = PartialRecord::default();
        let payload = json!({"saka_salivahana_number": 1946, "vikram_chaitradi_number": 2081, "timestamp": 1713150000});

        decode_into(MergeTarget::Year, &payload, &mut partial).expect("year decodes");

        let year = partial.year.expect("present");
        assert_eq!(year.saka_salivahana_name, "Krodhi");
        assert_eq!(year.timestamp.as_deref(), Some("1713150000"));
        assert_eq!(year.vikram_chaitradi_name_number, 2081 % 60);
    }
}
