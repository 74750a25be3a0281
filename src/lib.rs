// Client layer over the Nager.Date public holidays API

pub mod client;
pub mod model;
pub mod service;
pub mod validation;

// Re-export key types for convenience
pub use client::{ApiError, ClientConfig, ClientError, HolidayApi, NagerDateClient};
pub use model::{shorten, AvailableCountry, CountryInfo, PublicHoliday, ShortHoliday};
pub use service::PublicHolidaysService;
pub use validation::{validate_input, ValidationError, SUPPORTED_COUNTRIES};
