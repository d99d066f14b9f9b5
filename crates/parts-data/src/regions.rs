//! Client for the public Philippine administrative-division API.

use async_trait::async_trait;
use mockall::automock;
use parts_commerce::content::{CityMunicipality, Province};
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::dependency::DependencyTag;
use crate::error::DataError;
use crate::timeout::TimeoutConfig;

/// Default base URL of the division API.
pub const DEFAULT_REGIONS_URL: &str = "https://psgc.gitlab.io/api";

/// Read-only lookups used to fill address dropdowns.
///
/// Every list comes back sorted by name.
#[automock]
#[async_trait]
pub trait RegionApi: Send + Sync {
    async fn provinces(&self) -> Result<Vec<Province>, DataError>;

    async fn cities_by_province(
        &self,
        province_code: &str,
    ) -> Result<Vec<CityMunicipality>, DataError>;

    /// For regions without provinces, e.g. Metro Manila.
    async fn cities_by_region(&self, region_code: &str)
        -> Result<Vec<CityMunicipality>, DataError>;
}

#[derive(Debug, Clone)]
pub struct RegionClient {
    http: Client,
    base_url: String,
}

impl RegionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DataError> {
        Self::with_timeouts(base_url, DependencyTag::Regions.default_timeouts())
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        timeouts: TimeoutConfig,
    ) -> Result<Self, DataError> {
        let http = timeouts.apply(Client::builder()).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}/", self.base_url, path.trim_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, DataError> {
        let url = self.url(path);
        tracing::debug!(url = %url, dependency = %DependencyTag::Regions, "fetch");

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(DataError::Http {
                status,
                resource: path.to_string(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }
}

impl Default for RegionClient {
    fn default() -> Self {
        Self {
            http: Client::new(),
            base_url: DEFAULT_REGIONS_URL.to_string(),
        }
    }
}

#[async_trait]
impl RegionApi for RegionClient {
    async fn provinces(&self) -> Result<Vec<Province>, DataError> {
        let mut provinces: Vec<Province> = self.get("provinces").await?;
        provinces.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(provinces)
    }

    async fn cities_by_province(
        &self,
        province_code: &str,
    ) -> Result<Vec<CityMunicipality>, DataError> {
        let path = format!("provinces/{}/cities-municipalities", province_code);
        let mut cities: Vec<CityMunicipality> = self.get(&path).await?;
        sort_by_name(&mut cities);
        Ok(cities)
    }

    async fn cities_by_region(
        &self,
        region_code: &str,
    ) -> Result<Vec<CityMunicipality>, DataError> {
        let path = format!("regions/{}/cities-municipalities", region_code);
        let mut cities: Vec<CityMunicipality> = self.get(&path).await?;
        sort_by_name(&mut cities);
        Ok(cities)
    }
}

fn sort_by_name(cities: &mut [CityMunicipality]) {
    cities.sort_by(|a, b| a.name.cmp(&b.name));
}
