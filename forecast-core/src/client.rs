use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    error::{ForecastError, Result},
    model::{ApiKey, DailyForecast, LocationKey, LocationRecord, PostalCode},
    transport::{API_KEY_PARAM, ApiRequest, ReqwestTransport, Transport},
};

/// Upper bound for each provider round-trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const LOCATION_POSTAL_CODE_RESOURCE: &str =
    "http://dataservice.accuweather.com/locations/v1/postalcodes/search";
const FORECAST_ONE_DAY_RESOURCE: &str = "http://dataservice.accuweather.com/forecasts/v1/daily/1day";

/// Base URLs of the two provider resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub location_search: String,
    /// The location key is appended as the last path segment.
    pub daily_forecast: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            location_search: LOCATION_POSTAL_CODE_RESOURCE.to_string(),
            daily_forecast: FORECAST_ONE_DAY_RESOURCE.to_string(),
        }
    }
}

impl Endpoints {
    /// Parse both URLs; the forecast one must accept extra path segments.
    fn resolve(&self) -> Result<(Url, Url)> {
        let search = Url::parse(&self.location_search).map_err(|e| {
            ForecastError::Configuration(format!(
                "Invalid location search endpoint {:?}: {e}",
                self.location_search
            ))
        })?;

        let forecast = Url::parse(&self.daily_forecast).map_err(|e| {
            ForecastError::Configuration(format!(
                "Invalid forecast endpoint {:?}: {e}",
                self.daily_forecast
            ))
        })?;

        if forecast.cannot_be_a_base() {
            return Err(ForecastError::Configuration(format!(
                "Forecast endpoint {:?} cannot take a path",
                self.daily_forecast
            )));
        }

        Ok((search, forecast))
    }
}

/// Resolves a ZIP code to a location and fetches its one-day headline.
///
/// Holds no mutable state after construction, so one instance can be shared across threads.
#[derive(Debug)]
pub struct ForecastClient<T: Transport = ReqwestTransport> {
    api_key: ApiKey,
    endpoints: Endpoints,
    search_url: Url,
    forecast_base: Url,
    transport: T,
}

impl ForecastClient<ReqwestTransport> {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_transport(api_key, ReqwestTransport::new())
    }
}

impl<T: Transport> ForecastClient<T> {
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Result<Self> {
        let api_key = ApiKey::new(api_key)?;
        let endpoints = Endpoints::default();
        let (search_url, forecast_base) = endpoints.resolve()?;

        Ok(Self { api_key, endpoints, search_url, forecast_base, transport })
    }

    /// Point the client at other resources. Fails before any I/O if either URL is unusable.
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Result<Self> {
        let (search_url, forecast_base) = endpoints.resolve()?;
        self.endpoints = endpoints;
        self.search_url = search_url;
        self.forecast_base = forecast_base;
        Ok(self)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Get the headline forecast for a location by zip code.
    #[instrument(skip(self))]
    pub fn get_forecast(&self, postal_code: &str) -> Result<String> {
        let postal_code = self.validate_postal_code(postal_code)?;
        let location_key = self.location_key(&postal_code)?;
        debug!(%location_key, "resolved postal code");
        self.daily_headline(&location_key)
    }

    pub fn validate_postal_code(&self, postal_code: &str) -> Result<PostalCode> {
        postal_code.parse()
    }

    /// Resolve the provider location key for a zip code; the first candidate wins.
    pub fn location_key(&self, postal_code: &PostalCode) -> Result<LocationKey> {
        let request = ApiRequest::get(
            self.search_url.as_str(),
            vec![
                (API_KEY_PARAM, self.api_key.expose().to_owned()),
                ("q", postal_code.to_string()),
            ],
        );

        let body = self.execute(&request)?;
        let records: Vec<LocationRecord> = extract(body, &request)?;

        records.into_iter().next().map(|record| record.key).ok_or_else(|| {
            provider_failure(format!("No location found for zip code {postal_code} ({request})"))
        })
    }

    /// Fetch the one-day headline text for a resolved location, returned verbatim.
    pub fn daily_headline(&self, location_key: &LocationKey) -> Result<String> {
        let resource = self.forecast_resource(location_key)?;
        let request = ApiRequest::get(
            resource,
            vec![
                (API_KEY_PARAM, self.api_key.expose().to_owned()),
                ("details", "false".to_string()),
                ("metric", "false".to_string()),
            ],
        );

        let body = self.execute(&request)?;
        let forecast: DailyForecast = extract(body, &request)?;
        Ok(forecast.headline.text)
    }

    /// Issue a request and return the decoded JSON body of a 200 response.
    ///
    /// Every call is bounded by [`REQUEST_TIMEOUT`].
    pub fn execute(&self, request: &ApiRequest) -> Result<Value> {
        if request.method != Method::GET {
            return Err(ForecastError::Validation(format!(
                "{} is not an acceptable method for a request.",
                request.method
            )));
        }

        debug!(%request, "sending request");

        let response = self.transport.send(request, REQUEST_TIMEOUT).map_err(|e| {
            provider_failure(format!(
                "The following error was encountered when making the following request: {request}: {e}"
            ))
        })?;

        match response.status {
            200 => {}
            401 => {
                return Err(provider_failure(format!(
                    "API returned a 401 status code, did you provide the correct API key? ({request})"
                )));
            }
            status => {
                return Err(provider_failure(format!(
                    "API returned with status code {status} ({request})"
                )));
            }
        }

        serde_json::from_str(&response.body).map_err(|e| {
            provider_failure(format!("Malformed JSON in response to {request}: {e}"))
        })
    }

    fn forecast_resource(&self, location_key: &LocationKey) -> Result<String> {
        // Empty and dot segments would be dropped or collapsed by URL normalization.
        if matches!(location_key.as_str(), "" | "." | "..") {
            return Err(provider_failure(format!(
                "Location search returned an unusable location key {:?}",
                location_key.as_str()
            )));
        }

        let mut url = self.forecast_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ForecastError::Configuration(format!(
                    "Forecast endpoint {:?} cannot take a path",
                    self.endpoints.daily_forecast
                ))
            })?
            .pop_if_empty()
            .push(location_key.as_str());

        Ok(url.into())
    }
}

fn extract<D: DeserializeOwned>(body: Value, request: &ApiRequest) -> Result<D> {
    serde_json::from_value(body)
        .map_err(|e| provider_failure(format!("Unexpected response shape from {request}: {e}")))
}

fn provider_failure(message: String) -> ForecastError {
    warn!(%message, "provider request failed");
    ForecastError::Provider(message)
}
