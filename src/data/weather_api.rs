//! HTTP client for weatherapi.com.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::domain::{City, Forecast, RepositoryError, SearchRepository, Weather, WeatherRepository};

use super::dto::{CityDto, CurrentResponseDto, ForecastResponseDto};

/// Weather and search collaborator backed by the weatherapi.com REST API.
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    forecast_days: u32,
}

impl WeatherApiClient {
    /// Build a client from `[api]` settings.
    ///
    /// Fails with [`RepositoryError::MissingApiKey`] when neither the config
    /// nor `WEATHER_API_KEY` provides a key.
    pub fn new(config: &ApiConfig) -> Result<Self, RepositoryError> {
        let api_key = config.resolve_api_key().ok_or(RepositoryError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            forecast_days: config.forecast_days,
        })
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, RepositoryError> {
        let mut query = vec![("key", self.api_key.as_str())];
        query.extend_from_slice(params);
        Url::parse_with_params(&format!("{}/{path}", self.base_url), &query)
            .map_err(|e| RepositoryError::Network(format!("invalid url: {e}")))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, RepositoryError> {
        let url = self.endpoint(path, params)?;
        tracing::debug!(endpoint = path, "Weather API request");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint = path, status = status.as_u16(), "Weather API error");
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

fn city_query(city_id: i64) -> String {
    format!("id:{city_id}")
}

#[async_trait]
impl WeatherRepository for WeatherApiClient {
    async fn get_weather(&self, city_id: i64) -> Result<Weather, RepositoryError> {
        let query = city_query(city_id);
        let dto: CurrentResponseDto = self.get_json("current.json", &[("q", &query)]).await?;
        Ok(dto.current.into())
    }

    async fn get_forecast(&self, city_id: i64) -> Result<Forecast, RepositoryError> {
        let query = city_query(city_id);
        let days = self.forecast_days.to_string();
        let dto: ForecastResponseDto = self
            .get_json("forecast.json", &[("q", &query), ("days", &days)])
            .await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl SearchRepository for WeatherApiClient {
    async fn search(&self, query: &str) -> Result<Vec<City>, RepositoryError> {
        let dtos: Vec<CityDto> = self.get_json("search.json", &[("q", query)]).await?;
        Ok(dtos.into_iter().map(City::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            api_key: Some("secret".to_string()),
            ..ApiConfig::default()
        }
    }

    #[test]
    fn endpoint_includes_key_and_params() {
        let client = WeatherApiClient::new(&config()).unwrap();
        let url = client
            .endpoint("forecast.json", &[("q", "id:42"), ("days", "4")])
            .unwrap();
        assert_eq!(url.path(), "/v1/forecast.json");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0].0, "key");
        assert_eq!(
            &pairs[1..],
            &[
                ("q".to_string(), "id:42".to_string()),
                ("days".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn search_query_is_escaped() {
        let client = WeatherApiClient::new(&config()).unwrap();
        let url = client.endpoint("search.json", &[("q", "San José")]).unwrap();
        let q = url.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned());
        assert_eq!(q.as_deref(), Some("San José"));
    }
}
