// Holiday API client: transport seam between the service and the Nager.Date API

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::{env, time::Duration};
use thiserror::Error;
use tracing::debug;

use crate::model::{AvailableCountry, CountryInfo, PublicHoliday};

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at/api/v3";
pub const BASE_URL_ENV: &str = "PUBLIC_HOLIDAYS_API_URL";
pub const TIMEOUT_ENV: &str = "PUBLIC_HOLIDAYS_TIMEOUT_MS";

// Errors raised by a remote call
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Decode error: {0}")]
    DecodeError(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    // None keeps the transport default, which never times out
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads `PUBLIC_HOLIDAYS_API_URL` and `PUBLIC_HOLIDAYS_TIMEOUT_MS`.
    ///
    /// An unset or blank base URL falls back to the public Nager.Date endpoint.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ClientError> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            let base_url = base_url.trim();
            if !base_url.is_empty() {
                config.base_url = base_url.to_string();
            }
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let timeout_ms = raw.trim().parse::<u64>().map_err(|_| {
                ClientError::ConfigError(format!("{TIMEOUT_ENV} must be a number of ms, got {raw:?}"))
            })?;
            config.timeout_ms = Some(timeout_ms);
        }

        Ok(config)
    }
}

// Remote endpoints consumed by the service
#[async_trait]
pub trait HolidayApi: Send + Sync {
    async fn public_holidays(&self, year: i32, country: &str) -> Result<Vec<PublicHoliday>, ApiError>;

    // true on 200, false on 204
    async fn is_today_public_holiday(&self, country: &str) -> Result<bool, ApiError>;

    async fn next_public_holidays(&self, country: &str) -> Result<Vec<PublicHoliday>, ApiError>;

    async fn available_countries(&self) -> Result<Vec<AvailableCountry>, ApiError>;

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ApiError>;
}

#[derive(Debug, Clone)]
pub struct NagerDateClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl NagerDateClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::ConfigError("base url is empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "base url must be http(s), got {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        let config = ClientConfig { base_url, ..config };

        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, path: &str) -> Result<reqwest::Response, ApiError> {
        let url = self.endpoint(path);
        debug!(%url, "sending holiday api request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::ApiResponseError {
                status_code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self
            .send(path)
            .await?
            .text()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_str(&body).map_err(|e| ApiError::DecodeError(e.to_string()))
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        match self.config.timeout_ms {
            Some(timeout_ms) if error.is_timeout() => ApiError::Timeout(timeout_ms),
            _ => ApiError::NetworkError(error.to_string()),
        }
    }
}

#[async_trait]
impl HolidayApi for NagerDateClient {
    async fn public_holidays(&self, year: i32, country: &str) -> Result<Vec<PublicHoliday>, ApiError> {
        self.get_json(&format!("PublicHolidays/{year}/{country}")).await
    }

    async fn is_today_public_holiday(&self, country: &str) -> Result<bool, ApiError> {
        let response = self.send(&format!("IsTodayPublicHoliday/{country}")).await?;
        Ok(response.status() == StatusCode::OK)
    }

    async fn next_public_holidays(&self, country: &str) -> Result<Vec<PublicHoliday>, ApiError> {
        self.get_json(&format!("NextPublicHolidays/{country}")).await
    }

    async fn available_countries(&self) -> Result<Vec<AvailableCountry>, ApiError> {
        self.get_json("AvailableCountries").await
    }

    async fn country_info(&self, country: &str) -> Result<CountryInfo, ApiError> {
        self.get_json(&format!("CountryInfo/{country}")).await
    }
}

// In-process stand-in for the remote API
pub mod mock_server {
    use super::*;
    use parking_lot::{Mutex, RwLock};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ServerMode {
        Normal,
        // Every request fails before a response is received
        CompleteOutage,
        // Every request is answered with this non-2xx status
        ErrorStatus(u16),
        // 2xx with a body that is not valid JSON for the endpoint
        MalformedPayload,
    }

    pub struct MockServer {
        mode: RwLock<ServerMode>,
        request_count: AtomicUsize,
        requested_paths: Mutex<Vec<String>>,
        public_holidays: RwLock<HashMap<(i32, String), Vec<PublicHoliday>>>,
        next_holidays: RwLock<HashMap<String, Vec<PublicHoliday>>>,
        holidays_today: RwLock<HashMap<String, bool>>,
        countries: RwLock<Vec<AvailableCountry>>,
        country_infos: RwLock<HashMap<String, CountryInfo>>,
    }

    impl Default for MockServer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MockServer {
        pub fn new() -> Self {
            Self {
                mode: RwLock::new(ServerMode::Normal),
                request_count: AtomicUsize::new(0),
                requested_paths: Mutex::new(Vec::new()),
                public_holidays: RwLock::new(HashMap::new()),
                next_holidays: RwLock::new(HashMap::new()),
                holidays_today: RwLock::new(HashMap::new()),
                countries: RwLock::new(Vec::new()),
                country_infos: RwLock::new(HashMap::new()),
            }
        }

        pub fn set_mode(&self, mode: ServerMode) {
            *self.mode.write() = mode;
        }

        pub fn set_public_holidays(&self, year: i32, country: &str, holidays: Vec<PublicHoliday>) {
            self.public_holidays
                .write()
                .insert((year, country.to_string()), holidays);
        }

        pub fn set_next_public_holidays(&self, country: &str, holidays: Vec<PublicHoliday>) {
            self.next_holidays
                .write()
                .insert(country.to_string(), holidays);
        }

        pub fn set_today_is_holiday(&self, country: &str, is_holiday: bool) {
            self.holidays_today
                .write()
                .insert(country.to_string(), is_holiday);
        }

        pub fn set_available_countries(&self, countries: Vec<AvailableCountry>) {
            *self.countries.write() = countries;
        }

        pub fn set_country_info(&self, info: CountryInfo) {
            self.country_infos
                .write()
                .insert(info.country_code.clone(), info);
        }

        pub fn request_count(&self) -> usize {
            self.request_count.load(Ordering::SeqCst)
        }

        pub fn requested_paths(&self) -> Vec<String> {
            self.requested_paths.lock().clone()
        }

        // Records the call and applies the server mode
        fn handle(&self, path: String) -> Result<(), ApiError> {
            self.request_count.fetch_add(1, Ordering::SeqCst);
            self.requested_paths.lock().push(path);

            match *self.mode.read() {
                ServerMode::Normal => Ok(()),
                ServerMode::CompleteOutage => {
                    Err(ApiError::NetworkError("Service unavailable".to_string()))
                }
                ServerMode::ErrorStatus(status_code) => Err(ApiError::ApiResponseError {
                    status_code,
                    message: StatusCode::from_u16(status_code)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("Unknown status")
                        .to_string(),
                }),
                ServerMode::MalformedPayload => {
                    Err(ApiError::DecodeError("expected value at line 1 column 1".to_string()))
                }
            }
        }
    }

    #[async_trait]
    impl HolidayApi for MockServer {
        async fn public_holidays(
            &self,
            year: i32,
            country: &str,
        ) -> Result<Vec<PublicHoliday>, ApiError> {
            self.handle(format!("PublicHolidays/{year}/{country}"))?;
            Ok(self
                .public_holidays
                .read()
                .get(&(year, country.to_string()))
                .cloned()
                .unwrap_or_default())
        }

        async fn is_today_public_holiday(&self, country: &str) -> Result<bool, ApiError> {
            self.handle(format!("IsTodayPublicHoliday/{country}"))?;
            Ok(self
                .holidays_today
                .read()
                .get(country)
                .copied()
                .unwrap_or(false))
        }

        async fn next_public_holidays(&self, country: &str) -> Result<Vec<PublicHoliday>, ApiError> {
            self.handle(format!("NextPublicHolidays/{country}"))?;
            Ok(self
                .next_holidays
                .read()
                .get(country)
                .cloned()
                .unwrap_or_default())
        }

        async fn available_countries(&self) -> Result<Vec<AvailableCountry>, ApiError> {
            self.handle("AvailableCountries".to_string())?;
            Ok(self.countries.read().clone())
        }

        async fn country_info(&self, country: &str) -> Result<CountryInfo, ApiError> {
            self.handle(format!("CountryInfo/{country}"))?;
            self.country_infos
                .read()
                .get(country)
                .cloned()
                .ok_or_else(|| ApiError::ApiResponseError {
                    status_code: 404,
                    message: "Not Found".to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock_server::{MockServer, ServerMode};
    use super::*;
    use crate::model::fixtures::public_holiday;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_points_at_nager_date() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_ms, None);
    }

    #[test]
    fn test_config_from_lookup() {
        let vars = HashMap::from([
            (BASE_URL_ENV, "http://localhost:8080/api/v3 "),
            (TIMEOUT_ENV, "2500"),
        ]);
        let config = ClientConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api/v3");
        assert_eq!(config.timeout_ms, Some(2500));
    }

    #[test]
    fn test_config_blank_base_url_falls_back_to_default() {
        let config = ClientConfig::from_lookup(|key| {
            (key == BASE_URL_ENV).then(|| "   ".to_string())
        })
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_config_rejects_invalid_timeout() {
        let result = ClientConfig::from_lookup(|key| (key == TIMEOUT_ENV).then(|| "soon".to_string()));
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        assert!(matches!(
            NagerDateClient::new(ClientConfig::with_base_url("")),
            Err(ClientError::ConfigError(_))
        ));
        assert!(matches!(
            NagerDateClient::new(ClientConfig::with_base_url("ftp://date.nager.at")),
            Err(ClientError::ConfigError(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        let client = NagerDateClient::new(ClientConfig::with_base_url("https://date.nager.at/api/v3/")).unwrap();

        assert_eq!(
            client.endpoint("PublicHolidays/2024/GB"),
            "https://date.nager.at/api/v3/PublicHolidays/2024/GB"
        );
        assert_eq!(
            client.endpoint("/NextPublicHolidays/GB"),
            "https://date.nager.at/api/v3/NextPublicHolidays/GB"
        );
    }

    #[tokio::test]
    async fn test_mock_server_records_paths() {
        let server = MockServer::new();
        server.set_public_holidays(2024, "GB", vec![public_holiday("2024-12-25", "Christmas Day")]);

        let holidays = server.public_holidays(2024, "GB").await.unwrap();
        assert_eq!(holidays.len(), 1);
        assert!(!server.is_today_public_holiday("FR").await.unwrap());

        assert_eq!(server.request_count(), 2);
        assert_eq!(
            server.requested_paths(),
            vec!["PublicHolidays/2024/GB", "IsTodayPublicHoliday/FR"]
        );
    }

    #[tokio::test]
    async fn test_mock_server_modes() {
        let server = MockServer::new();

        server.set_mode(ServerMode::CompleteOutage);
        assert!(matches!(
            server.next_public_holidays("GB").await,
            Err(ApiError::NetworkError(_))
        ));

        server.set_mode(ServerMode::ErrorStatus(503));
        match server.next_public_holidays("GB").await {
            Err(ApiError::ApiResponseError { status_code, message }) => {
                assert_eq!(status_code, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        server.set_mode(ServerMode::Normal);
        assert!(matches!(
            server.country_info("XX").await,
            Err(ApiError::ApiResponseError { status_code: 404, .. })
        ));
    }
}
