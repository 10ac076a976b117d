//! Async data-provider contract and the default REST implementation.
//!
//! Providers are "eventually resolve to an array or reject": no retries, no
//! backoff, no caching in the core. A failed fetch surfaces to whoever drove
//! the continent switch, leaving the previous map state displayed.

use crate::{
    data::records::{Base, BaseStatus, Continent, ContinentId, LatticeLink},
    Result,
};
use async_trait::async_trait;

/// Source of continent, base, lattice, and status payloads
#[async_trait]
pub trait MapDataProvider: Send + Sync {
    async fn continents(&self) -> Result<Vec<Continent>>;

    async fn bases(&self, continent: ContinentId) -> Result<Vec<Base>>;

    async fn lattice(&self, continent: ContinentId) -> Result<Vec<LatticeLink>>;

    /// Latest full ownership snapshot; the core never computes deltas
    async fn statuses(&self, continent: ContinentId) -> Result<Vec<BaseStatus>>;
}

/// REST provider hitting a JSON API with the standard route layout
pub struct RestDataProvider {
    client: reqwest::Client,
    base_url: String,
}

impl RestDataProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl MapDataProvider for RestDataProvider {
    async fn continents(&self) -> Result<Vec<Continent>> {
        self.get_json("continents").await
    }

    async fn bases(&self, continent: ContinentId) -> Result<Vec<Base>> {
        self.get_json(&format!("continents/{continent}/bases")).await
    }

    async fn lattice(&self, continent: ContinentId) -> Result<Vec<LatticeLink>> {
        self.get_json(&format!("continents/{continent}/lattice")).await
    }

    async fn statuses(&self, continent: ContinentId) -> Result<Vec<BaseStatus>> {
        self.get_json(&format!("continents/{continent}/status")).await
    }
}
