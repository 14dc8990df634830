//! Behavior-driven tests for the offline calculator
//!
//! These tests verify the properties the approximation must keep regardless
//! of location: civil weekday, ordered sun times, day-driven lunar fields
//! and full determinism.

use panchang_core::fallback::{approximate, solar_day};
use panchang_core::{Confidence, Paksha, PanchangRequest, RecordField};
use time::{Date, Duration, Month};

fn request(year: i32, month: u8, day: u8, latitude: f64, longitude: f64) -> PanchangRequest {
    PanchangRequest::new(year, month, day, latitude, longitude).expect("valid request")
}

fn is_clock(value: &str) -> bool {
    let parts: Vec<&str> = value.split(':').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|part| part.len() == 2 && part.chars().all(|ch| ch.is_ascii_digit()))
}

// =============================================================================
// Fallback: Weekday
// =============================================================================

#[test]
fn when_date_is_a_monday_weekday_number_is_two_everywhere() {
    // Given: 2024-04-15, a Monday, at several locations
    let locations = [(0.0, 0.0), (28.6, 77.2), (-33.9, 151.2), (51.5, -0.1)];

    for (latitude, longitude) in locations {
        // When: The record is approximated
        let record = approximate(&request(2024, 4, 15, latitude, longitude));

        // Then: The weekday is the civil weekday, 1-indexed from Sunday
        assert_eq!(record.weekday.number, 2);
        assert_eq!(record.weekday.name, "Monday");
        assert_eq!(record.weekday.vedic_name, "Somavara");
    }
}

#[test]
fn when_iterating_a_fortnight_weekday_tracks_the_civil_calendar() {
    let start = Date::from_calendar_date(2024, Month::January, 1).expect("valid date");

    for offset in 0..14 {
        let date = start + Duration::days(offset);
        let record = approximate(&request(
            date.year(),
            u8::from(date.month()),
            date.day(),
            10.0,
            80.0,
        ));

        assert_eq!(
            record.weekday.number,
            date.weekday().number_days_from_sunday() + 1
        );
    }
}

// =============================================================================
// Fallback: Sun Times
// =============================================================================

#[test]
fn when_location_is_away_from_the_poles_sunrise_precedes_sunset() {
    // Given: A grid of latitudes, longitudes and dates spread over the year
    let dates = [(1, 15), (3, 21), (6, 21), (9, 23), (12, 21)];

    for latitude in (-60..=60).step_by(15) {
        for longitude in (-180..=180).step_by(15) {
            for (month, day) in dates {
                let req = request(2024, month, day, f64::from(latitude), f64::from(longitude));

                // When: Sun times are approximated
                let solar = solar_day(req.civil_date(), req.latitude, req.longitude);
                let record = approximate(&req);

                // Then: Sunrise comes strictly before sunset and both are clock strings
                assert!(
                    solar.sunrise_hours < solar.sunset_hours,
                    "sunrise after sunset at lat {latitude} lon {longitude} {month}/{day}"
                );
                assert!(is_clock(&record.sunrise), "bad sunrise {}", record.sunrise);
                assert!(is_clock(&record.sunset), "bad sunset {}", record.sunset);
                assert!(
                    record.sunrise < record.sunset,
                    "formatted {} >= {} at lat {latitude} lon {longitude} {month}/{day}",
                    record.sunrise,
                    record.sunset
                );
            }
        }
    }
}

#[test]
fn when_location_is_far_west_of_the_reference_meridian_sunset_runs_past_midnight() {
    // Given: New York, whose daylight falls across midnight on the 75°E clock
    let record = approximate(&request(2024, 4, 15, 40.7, -74.0));

    // Then: Sunset keeps counting hours instead of wrapping before sunrise
    assert!(record.sunrise.starts_with("15:"), "sunrise {}", record.sunrise);
    assert!(record.sunset.starts_with("28:"), "sunset {}", record.sunset);
    assert!(record.sunrise < record.sunset);
}

#[test]
fn when_location_is_polar_sun_times_are_still_formatted() {
    let record = approximate(&request(2024, 6, 21, 85.0, 20.0));
    assert!(is_clock(&record.sunrise));
    assert!(is_clock(&record.sunset));
}

// =============================================================================
// Fallback: Lunar Fields
// =============================================================================

#[test]
fn when_day_of_month_is_fixed_tithi_and_nakshatra_ignore_location() {
    for day in 1..=28u8 {
        let here = approximate(&request(2024, 2, day, 12.0, 77.0));
        let there = approximate(&request(2024, 2, day, -45.0, -70.0));

        assert_eq!(u32::from(here.tithi.number), u32::from(day) % 15 + 1);
        assert_eq!(u32::from(here.nakshatra.number), u32::from(day) % 27 + 1);
        assert_eq!(here.tithi.number, there.tithi.number);
        assert_eq!(here.nakshatra.number, there.nakshatra.number);
        assert_eq!(here.tithi.paksha, Paksha::Shukla);
    }
}

#[test]
fn when_month_changes_season_and_ayana_follow_it() {
    let april = approximate(&request(2024, 4, 15, 28.6, 77.2));
    assert_eq!(april.lunar_month.number, 5);
    assert_eq!(april.ritu.number, 2);
    assert_eq!(april.aayanam, "Uttarayanam");

    let november = approximate(&request(2024, 11, 15, 28.6, 77.2));
    assert_eq!(november.lunar_month.number, 12);
    assert_eq!(november.ritu.number, 6);
    assert_eq!(november.aayanam, "Dakshinayanam");

    let december = approximate(&request(2024, 12, 1, 28.6, 77.2));
    assert_eq!(december.lunar_month.number, 1);
    assert_eq!(december.lunar_month.name, "Chaitra");
}

// =============================================================================
// Fallback: Determinism and Provenance
// =============================================================================

#[test]
fn when_called_twice_with_the_same_input_the_record_is_identical() {
    let req = request(2024, 4, 15, 28.6139, 77.2090);

    let first = approximate(&req);
    let second = approximate(&req);

    assert_eq!(first, second);
    let percentage = first.tithi.left_percentage.expect("fallback fills percentages");
    assert!((0.0..100.0).contains(&percentage));
}

#[test]
fn when_location_changes_percentages_may_change_but_stay_in_range() {
    let record = approximate(&request(2024, 4, 15, -12.0, 130.0));

    for value in [
        record.tithi.left_percentage,
        record.nakshatra.left_percentage,
        record.yoga[&1u8].left_percentage,
        record.karana[&1u8].left_percentage,
    ] {
        let value = value.expect("percentage present");
        assert!((0.0..100.0).contains(&value));
    }
}

#[test]
fn when_record_is_approximated_every_field_is_tagged_approximated() {
    let record = approximate(&request(2024, 4, 15, 28.6, 77.2));

    for field in RecordField::ALL {
        assert_eq!(record.provenance.get(field), Confidence::Approximated);
    }
    assert_eq!(record.year.status, "approximated");
    assert_eq!(record.year.saka_salivahana_number, 1946);
    assert_eq!(record.year.vikram_chaitradi_number, 2081);
    assert!(record.tithi.completes_at.is_none());
}
