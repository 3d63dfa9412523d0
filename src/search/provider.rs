use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::{CategorySet, GeoPoint, PoiCategory};

/// A place as reported by a provider, before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub location: GeoPoint,
    #[serde(default)]
    pub category: Option<PoiCategory>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacesError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider timed out")]
    Timeout,

    #[error("malformed provider response: {0}")]
    Malformed(String),
}

/// External capability: "given a coordinate and a filter, return nearby
/// places". Failures come back as `PlacesError`, never as panics.
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn search(
        &self,
        center: GeoPoint,
        radius_meters: f64,
        categories: &CategorySet,
    ) -> Result<Vec<Candidate>, PlacesError>;

    /// Categories this provider can filter on. Queried once, when the
    /// controller is built.
    fn supported_categories(&self) -> CategorySet {
        PoiCategory::base_set()
    }
}

/// Provider backed by a JSON array of candidates on disk. Applies the
/// category filter but, like many real providers, not the radius.
pub struct FilePlacesProvider {
    path: PathBuf,
    extended: bool,
}

impl FilePlacesProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            extended: false,
        }
    }

    /// Advertise the extended category set.
    pub fn with_extended_categories(mut self, extended: bool) -> Self {
        self.extended = extended;
        self
    }
}

#[async_trait]
impl PlacesProvider for FilePlacesProvider {
    async fn search(
        &self,
        _center: GeoPoint,
        _radius_meters: f64,
        categories: &CategorySet,
    ) -> Result<Vec<Candidate>, PlacesError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| PlacesError::Unavailable(format!("{}: {e}", self.path.display())))?;
        let all: Vec<Candidate> =
            serde_json::from_str(&content).map_err(|e| PlacesError::Malformed(e.to_string()))?;

        Ok(all
            .into_iter()
            .filter(|c| c.category.is_some_and(|cat| categories.contains(&cat)))
            .collect())
    }

    fn supported_categories(&self) -> CategorySet {
        if self.extended {
            PoiCategory::extended_set()
        } else {
            PoiCategory::base_set()
        }
    }
}
