// Public holidays service: validates input, calls one endpoint, reshapes the result.
//
// Validation errors are returned to the caller. Transport errors never are: they
// degrade to an empty list or `false`.

use std::sync::Arc;

use tracing::warn;

use crate::client::{ClientConfig, ClientError, HolidayApi, NagerDateClient};
use crate::model::ShortHoliday;
use crate::validation::{validate_input, ValidationError};

pub struct PublicHolidaysService<C: HolidayApi> {
    api: Arc<C>,
}

impl<C: HolidayApi> Clone for PublicHolidaysService<C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
        }
    }
}

impl PublicHolidaysService<NagerDateClient> {
    pub fn from_config(config: ClientConfig) -> Result<Self, ClientError> {
        Ok(Self::new(NagerDateClient::new(config)?))
    }
}

impl<C: HolidayApi> PublicHolidaysService<C> {
    pub fn new(api: C) -> Self {
        Self { api: Arc::new(api) }
    }

    pub fn with_shared(api: Arc<C>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub async fn get_list_of_public_holidays(
        &self,
        year: i32,
        country: &str,
    ) -> Result<Vec<ShortHoliday>, ValidationError> {
        validate_input(Some(year), Some(country))?;

        match self.api.public_holidays(year, country).await {
            Ok(holidays) => Ok(holidays.into_iter().map(ShortHoliday::from).collect()),
            Err(error) => {
                warn!(year, country, %error, "failed to fetch public holidays");
                Ok(Vec::new())
            }
        }
    }

    pub async fn check_if_today_is_public_holiday(
        &self,
        country: &str,
    ) -> Result<bool, ValidationError> {
        validate_input(None, Some(country))?;

        match self.api.is_today_public_holiday(country).await {
            Ok(is_holiday) => Ok(is_holiday),
            Err(error) => {
                warn!(country, %error, "failed to check today's public holiday");
                Ok(false)
            }
        }
    }

    /// Upcoming holidays, nearest first as ordered by the API.
    pub async fn get_next_public_holidays(
        &self,
        country: &str,
    ) -> Result<Vec<ShortHoliday>, ValidationError> {
        validate_input(None, Some(country))?;

        match self.api.next_public_holidays(country).await {
            Ok(holidays) => Ok(holidays.into_iter().map(ShortHoliday::from).collect()),
            Err(error) => {
                warn!(country, %error, "failed to fetch next public holidays");
                Ok(Vec::new())
            }
        }
    }
}
