// Holiday data as returned by the Nager.Date API and the reduced shape handed to callers

use serde::{Deserialize, Serialize};

// Full record owned by the remote API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHoliday {
    pub date: String,
    pub local_name: String,
    pub name: String,
    pub country_code: String,
    pub fixed: bool,
    pub global: bool,
    #[serde(default)]
    pub counties: Option<Vec<String>>,
    #[serde(default)]
    pub launch_year: Option<i32>,
    #[serde(default)]
    pub types: Vec<String>,
}

// Public contract of the list/next operations
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortHoliday {
    pub name: String,
    pub local_name: String,
    pub date: String,
}

impl From<&PublicHoliday> for ShortHoliday {
    fn from(holiday: &PublicHoliday) -> Self {
        Self {
            name: holiday.name.clone(),
            local_name: holiday.local_name.clone(),
            date: holiday.date.clone(),
        }
    }
}

impl From<PublicHoliday> for ShortHoliday {
    fn from(holiday: PublicHoliday) -> Self {
        Self {
            name: holiday.name,
            local_name: holiday.local_name,
            date: holiday.date,
        }
    }
}

pub fn shorten(holiday: &PublicHoliday) -> ShortHoliday {
    ShortHoliday::from(holiday)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableCountry {
    pub country_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub common_name: String,
    pub official_name: String,
    pub country_code: String,
    pub region: String,
    // Neighbours are returned without their own borders
    #[serde(default)]
    pub borders: Option<Vec<CountryInfo>>,
}
