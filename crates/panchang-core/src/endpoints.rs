//! Declarative provider endpoint registry.
//!
//! Each [`EndpointSpec`] names a provider path and, optionally, the record
//! slot its response fills. Endpoints without a [`MergeTarget`] are still
//! fetched during fan-out and reported in the outcome, but their payload is
//! not merged.
//!
//! | Endpoint | Path | Merge target |
//! |----------|------|--------------|
//! | complete | `complete-panchang` | all fields |
//! | sun_times | `sunrise-and-set` | sunrise, sunset |
//! | tithi | `tithi-durations` | tithi |
//! | nakshatra | `nakshatra-durations` | nakshatra |
//! | yoga | `yoga-durations` | yoga |
//! | karana | `karana-durations` | karana |
//! | weekday | `vedic-weekday` | weekday |
//! | lunar_month | `lunar-month-info` | lunarMonth |
//! | ritu | `rituinfo` | ritu |
//! | samvat | `samvat-info` | year |
//! | aayanam | `aayanam` | aayanam |
//! | hora … varjyam | eleven timing tables | - |

use std::fmt::{Display, Formatter};

use crate::domain::RecordField;

/// Record slot a consumed endpoint fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MergeTarget {
    SunTimes,
    Tithi,
    Nakshatra,
    Yoga,
    Karana,
    Weekday,
    LunarMonth,
    Ritu,
    Year,
    Aayanam,
}

impl MergeTarget {
    pub const ALL: [Self; 10] = [
        Self::SunTimes,
        Self::Tithi,
        Self::Nakshatra,
        Self::Yoga,
        Self::Karana,
        Self::Weekday,
        Self::LunarMonth,
        Self::Ritu,
        Self::Year,
        Self::Aayanam,
    ];

    pub const fn fields(self) -> &'static [RecordField] {
        match self {
            Self::SunTimes => &[RecordField::Sunrise, RecordField::Sunset],
            Self::Tithi => &[RecordField::Tithi],
            Self::Nakshatra => &[RecordField::Nakshatra],
            Self::Yoga => &[RecordField::Yoga],
            Self::Karana => &[RecordField::Karana],
            Self::Weekday => &[RecordField::Weekday],
            Self::LunarMonth => &[RecordField::LunarMonth],
            Self::Ritu => &[RecordField::Ritu],
            Self::Year => &[RecordField::Year],
            Self::Aayanam => &[RecordField::Aayanam],
        }
    }

    /// Key under which the aggregate response nests this slot.
    ///
    /// Sun times sit at the top level of the aggregate document.
    pub const fn aggregate_key(self) -> Option<&'static str> {
        match self {
            Self::SunTimes => None,
            Self::Tithi => Some("tithi"),
            Self::Nakshatra => Some("nakshatra"),
            Self::Yoga => Some("yoga"),
            Self::Karana => Some("karana"),
            Self::Weekday => Some("weekday"),
            Self::LunarMonth => Some("lunar_month"),
            Self::Ritu => Some("ritu"),
            Self::Year => Some("year"),
            Self::Aayanam => Some("aayanam"),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SunTimes => "sun_times",
            Self::Tithi => "tithi",
            Self::Nakshatra => "nakshatra",
            Self::Yoga => "yoga",
            Self::Karana => "karana",
            Self::Weekday => "weekday",
            Self::LunarMonth => "lunar_month",
            Self::Ritu => "ritu",
            Self::Year => "year",
            Self::Aayanam => "aayanam",
        }
    }
}

impl Display for MergeTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointSpec {
    pub name: &'static str,
    pub path: &'static str,
    pub target: Option<MergeTarget>,
}

impl EndpointSpec {
    pub const fn consumed(name: &'static str, path: &'static str, target: MergeTarget) -> Self {
        Self {
            name,
            path,
            target: Some(target),
        }
    }

    pub const fn informational(name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            path,
            target: None,
        }
    }

    pub const fn is_consumed(&self) -> bool {
        self.target.is_some()
    }
}

/// Aggregate endpoint tried before any fan-out.
pub const COMPLETE_ENDPOINT: EndpointSpec =
    EndpointSpec::informational("complete", "complete-panchang");

/// The specialized endpoints fanned out when the aggregate call fails.
pub const STANDARD_ENDPOINTS: [EndpointSpec; 21] = [
    EndpointSpec::consumed("sun_times", "sunrise-and-set", MergeTarget::SunTimes),
    EndpointSpec::consumed("tithi", "tithi-durations", MergeTarget::Tithi),
    EndpointSpec::consumed("nakshatra", "nakshatra-durations", MergeTarget::Nakshatra),
    EndpointSpec::consumed("yoga", "yoga-durations", MergeTarget::Yoga),
    EndpointSpec::consumed("karana", "karana-durations", MergeTarget::Karana),
    EndpointSpec::consumed("weekday", "vedic-weekday", MergeTarget::Weekday),
    EndpointSpec::consumed("lunar_month", "lunar-month-info", MergeTarget::LunarMonth),
    EndpointSpec::consumed("ritu", "rituinfo", MergeTarget::Ritu),
    EndpointSpec::consumed("samvat", "samvat-info", MergeTarget::Year),
    EndpointSpec::consumed("aayanam", "aayanam", MergeTarget::Aayanam),
    EndpointSpec::informational("hora", "hora-timings"),
    EndpointSpec::informational("choghadiya", "choghadiya-timings"),
    EndpointSpec::informational("good_bad_times", "good-bad-times"),
    EndpointSpec::informational("abhijit_muhurat", "abhijit-muhurat"),
    EndpointSpec::informational("amrit_kaal", "amrit-kaal"),
    EndpointSpec::informational("brahma_muhurat", "brahma-muhurat"),
    EndpointSpec::informational("rahu_kalam", "rahu-kalam"),
    EndpointSpec::informational("yama_gandam", "yama-gandam"),
    EndpointSpec::informational("gulika_kalam", "gulika-kalam"),
    EndpointSpec::informational("dur_muhurat", "dur-muhurat"),
    EndpointSpec::informational("varjyam", "varjyam"),
];

/// Ordered set of fan-out endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    endpoints: Vec<EndpointSpec>,
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl EndpointRegistry {
    pub fn standard() -> Self {
        Self::new(STANDARD_ENDPOINTS.to_vec())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn new(endpoints: Vec<EndpointSpec>) -> Self {
        let mut registry = Self::empty();
        for endpoint in endpoints {
            registry = registry.with_endpoint(endpoint);
        }
        registry
    }

    /// Adds an endpoint, replacing any existing entry with the same name.
    pub fn with_endpoint(mut self, endpoint: EndpointSpec) -> Self {
        match self
            .endpoints
            .iter_mut()
            .find(|existing| existing.name == endpoint.name)
        {
            Some(existing) => *existing = endpoint,
            None => self.endpoints.push(endpoint),
        }
        self
    }

    pub fn without_endpoint(mut self, name: &str) -> Self {
        self.endpoints.retain(|endpoint| endpoint.name != name);
        self
    }

    pub fn get(&self, name: &str) -> Option<&EndpointSpec> {
        self.endpoints.iter().find(|endpoint| endpoint.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EndpointSpec> {
        self.endpoints.iter()
    }

    pub fn consumed(&self) -> impl Iterator<Item = &EndpointSpec> {
        self.endpoints.iter().filter(|endpoint| endpoint.is_consumed())
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
