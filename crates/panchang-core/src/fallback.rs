//! Offline almanac approximation.
//!
//! Used when no provider can be reached. The values come from calendar
//! arithmetic and a simple solar-declination model, not from an ephemeris:
//! tithi and nakshatra follow the day of month, the lunar month and season
//! follow the civil month, and sunrise/sunset are referenced to the 75°E
//! meridian.
//!
//! The calculator is a pure function. Percentage fields are drawn from a PRNG
//! seeded by the date and location, so identical inputs always produce
//! identical records.

use std::f64::consts::{FRAC_PI_2, PI};

use time::Date;

use crate::domain::names::{
    self, KARANA_NAMES, KRISHNA_FINAL_TITHI, LUNAR_MONTH_NAMES, NAKSHATRA_NAMES, RITU_NAMES,
    TITHI_NAMES, VEDIC_WEEKDAY_NAMES, WEEKDAY_NAMES, YOGA_NAMES,
};
use crate::domain::{
    AlmanacRecord, Confidence, LunarMonthInfo, NakshatraInfo, Paksha, PeriodEntry, PeriodTable,
    Provenance, RituInfo, TithiInfo, WeekdayInfo, YearInfo,
};
use crate::PanchangRequest;

/// Meridian standing in for the IST offset.
pub const REFERENCE_MERIDIAN: f64 = 75.0;

const MAX_DECLINATION_DEG: f64 = 23.45;
const SAKA_OFFSET: i32 = 78;
const VIKRAM_OFFSET: i32 = 57;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Longest clock a formatted sunset can carry, `47:59:59`.
const MAX_CLOCK_SECONDS: u32 = 48 * 3600 - 1;

/// Sunrise and sunset as fractional hours of the local civil day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDay {
    pub sunrise_hours: f64,
    pub sunset_hours: f64,
}

impl SolarDay {
    pub fn day_length_hours(self) -> f64 {
        self.sunset_hours - self.sunrise_hours
    }
}

/// Approximates sunrise and sunset for a date and location.
///
/// Uses `|latitude|`, so the southern hemisphere sees northern seasons.
/// Inside the polar circles the hour angle saturates instead of failing.
pub fn solar_day(date: Date, latitude: f64, longitude: f64) -> SolarDay {
    let day_of_year = f64::from(date.ordinal());
    let declination = MAX_DECLINATION_DEG * (2.0 * PI * (284.0 + day_of_year) / 360.0).sin();
    let cos_hour_angle = -latitude.abs().to_radians().tan() * declination.to_radians().tan();

    let hour_angle = if cos_hour_angle.is_nan() {
        FRAC_PI_2
    } else {
        cos_hour_angle.clamp(-1.0, 1.0).acos()
    };

    let half_day = hour_angle * 12.0 / PI;
    let meridian_offset = (longitude - REFERENCE_MERIDIAN) / 15.0;

    SolarDay {
        sunrise_hours: 12.0 - half_day - meridian_offset,
        sunset_hours: 12.0 + half_day - meridian_offset,
    }
}

/// Formats fractional hours as `HH:MM:SS`.
///
/// Hours are not wrapped: values past midnight keep counting (`25:10:00`)
/// and values outside `[0, 48)` saturate.
pub fn format_clock(hours: f64) -> String {
    let total_seconds = if hours.is_finite() {
        ((hours * 3600.0).floor().max(0.0) as u32).min(MAX_CLOCK_SECONDS)
    } else {
        0
    };

    format!(
        "{:02}:{:02}:{:02}",
        total_seconds / 3600,
        (total_seconds % 3600) / 60,
        total_seconds % 60
    )
}

/// Formats sunrise and sunset against the civil day holding sunrise.
///
/// Both times move by the same whole number of days, so sunrise lands in
/// `[00:00:00, 24:00:00)` and a sunset after midnight reads as `24:..` or
/// later. The pair stays ordered as strings.
pub fn format_solar_day(solar: SolarDay) -> (String, String) {
    let shift = if solar.sunrise_hours.is_finite() {
        solar.sunrise_hours.div_euclid(24.0) * 24.0
    } else {
        0.0
    };

    (
        format_clock(solar.sunrise_hours - shift),
        format_clock(solar.sunset_hours - shift),
    )
}

/// Computes a fully populated record without touching the network.
pub fn approximate(request: &PanchangRequest) -> AlmanacRecord {
    let date = request.civil_date();
    let day = u32::from(date.day());
    let month = u32::from(u8::from(date.month()));
    let mut rng = fastrand::Rng::with_seed(percentage_seed(request));

    let weekday_number = date.weekday().number_days_from_sunday() + 1;
    let weekday = WeekdayInfo {
        number: weekday_number,
        name: names::lookup(&WEEKDAY_NAMES, u32::from(weekday_number)).to_owned(),
        vedic_number: weekday_number,
        vedic_name: names::lookup(&VEDIC_WEEKDAY_NAMES, u32::from(weekday_number)).to_owned(),
    };

    let tithi_number = (day % 15) + 1;
    let paksha = if tithi_number <= 15 {
        Paksha::Shukla
    } else {
        Paksha::Krishna
    };
    let tithi = TithiInfo {
        number: tithi_number as u8,
        name: tithi_name(tithi_number, paksha).to_owned(),
        paksha,
        completes_at: None,
        left_percentage: Some(percentage(&mut rng)),
    };

    let nakshatra_number = (day % 27) + 1;
    let nakshatra = NakshatraInfo {
        number: nakshatra_number as u8,
        name: names::lookup(&NAKSHATRA_NAMES, nakshatra_number).to_owned(),
        starts_at: None,
        ends_at: None,
        left_percentage: Some(percentage(&mut rng)),
    };

    let yoga_number = (day % 27) + 1;
    let yoga = single_period(
        yoga_number,
        names::lookup(&YOGA_NAMES, yoga_number),
        percentage(&mut rng),
    );

    let karana_number = (day % 11) + 1;
    let karana = single_period(
        karana_number,
        names::lookup(&KARANA_NAMES, karana_number),
        percentage(&mut rng),
    );

    let lunar_month_number = (month % 12) + 1;
    let lunar_month_name = names::lookup(&LUNAR_MONTH_NAMES, lunar_month_number);
    let lunar_month = LunarMonthInfo {
        number: lunar_month_number as u8,
        name: lunar_month_name.to_owned(),
        full_name: lunar_month_name.to_owned(),
        adhika: 0,
        nija: 1,
        kshaya: 0,
    };

    let ritu_number = (month - 1) / 2 + 1;
    let ritu = RituInfo {
        number: ritu_number as u8,
        name: names::lookup(&RITU_NAMES, ritu_number).to_owned(),
    };

    let aayanam = if (3..=8).contains(&month) {
        names::UTTARAYANAM
    } else {
        names::DAKSHINAYANAM
    };

    let (sunrise, sunset) =
        format_solar_day(solar_day(date, request.latitude, request.longitude));

    AlmanacRecord {
        sunrise,
        sunset,
        weekday,
        lunar_month,
        ritu,
        aayanam: aayanam.to_owned(),
        tithi,
        nakshatra,
        yoga,
        karana,
        year: era_year(request),
        provenance: Provenance::uniform(Confidence::Approximated),
    }
}

fn tithi_name(number: u32, paksha: Paksha) -> &'static str {
    let within_paksha = (number - 1) % 15 + 1;
    if paksha == Paksha::Krishna && within_paksha == 15 {
        KRISHNA_FINAL_TITHI
    } else {
        names::lookup(&TITHI_NAMES, within_paksha)
    }
}

fn single_period(number: u32, name: &str, left_percentage: f64) -> PeriodTable {
    let mut table = PeriodTable::new();
    table.insert(
        1,
        PeriodEntry {
            number: number as u8,
            name: name.to_owned(),
            completion: None,
            left_percentage: Some(left_percentage),
        },
    );
    table
}

fn era_year(request: &PanchangRequest) -> YearInfo {
    let saka = request.year - SAKA_OFFSET;
    let vikram = request.year + VIKRAM_OFFSET;
    let samvatsara = names::samvatsara_for_year(request.year);

    YearInfo {
        status: String::from("approximated"),
        timestamp: Some(format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            request.year,
            request.month,
            request.date,
            request.hours,
            request.minutes,
            request.seconds
        )),
        saka_salivahana_number: saka,
        saka_salivahana_name: samvatsara.to_owned(),
        saka_salivahana_name_number: saka.rem_euclid(60),
        vikram_chaitradi_number: vikram,
        vikram_chaitradi_name: samvatsara.to_owned(),
        vikram_chaitradi_name_number: vikram.rem_euclid(60),
    }
}

/// FNV-1a over the date and the raw coordinate bits.
fn percentage_seed(request: &PanchangRequest) -> u64 {
    request
        .year
        .to_le_bytes()
        .into_iter()
        .chain([request.month, request.date])
        .chain(request.latitude.to_bits().to_le_bytes())
        .chain(request.longitude.to_bits().to_le_bytes())
        .fold(FNV_OFFSET_BASIS, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
        })
}

/// Uniform value in `[0, 100)`, truncated to two decimals.
fn percentage(rng: &mut fastrand::Rng) -> f64 {
    (rng.f64() * 10_000.0).floor() / 100.0
}
