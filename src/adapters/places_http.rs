use crate::domain::place::{NearbySearchResponse, SearchRequest};
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{MapError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com";
const NEARBY_SEARCH_PATH: &str = "/maps/api/place/nearbysearch/json";

/// 透過 Places web service 進行 Nearby Search
#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(client, endpoint, api_key))
    }

    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    pub fn nearby_search_url(&self, request: &SearchRequest) -> Result<Url> {
        let base = format!("{}{}", self.endpoint, NEARBY_SEARCH_PATH);
        let url = Url::parse_with_params(
            &base,
            &[
                ("location", request.location.to_string()),
                ("radius", request.radius_meters.to_string()),
                ("type", request.category.as_str().to_string()),
                ("key", self.api_key.clone()),
            ],
        )
        .map_err(|e| MapError::InvalidConfigValueError {
            field: "search.endpoint".to_string(),
            value: self.endpoint.clone(),
            reason: e.to_string(),
        })?;
        Ok(url)
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn nearby_search(&self, request: &SearchRequest) -> Result<NearbySearchResponse> {
        let url = self.nearby_search_url(request)?;
        tracing::debug!(
            "Nearby search request: {}{} type={}",
            self.endpoint,
            NEARBY_SEARCH_PATH,
            request.category
        );

        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Nearby search response status: {}", status);

        if !status.is_success() {
            return Err(MapError::ApiStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: NearbySearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            "Nearby search returned {} with {} results",
            parsed.status.as_str(),
            parsed.results.len()
        );
        Ok(parsed)
    }
}
