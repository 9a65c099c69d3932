//! Validated vehicle catalogs.
//!
//! A catalog is an ordered, duplicate-free list of [`Vehicle`] records. Order
//! matters: the recommender keeps catalog order in its results and breaks
//! ranking ties by it.

mod parser;

use crate::financing::{FinancingError, Vehicle, VehicleId};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const STANDARD_CATALOG: &str = include_str!("../../data/vehicles.csv");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read vehicle catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid vehicle catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid vehicle catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog row {row}: {source}")]
    InvalidRow { row: usize, source: FinancingError },
    #[error("catalog row {row}: duplicate vehicle id '{id}'")]
    DuplicateId { row: usize, id: String },
    #[error("unknown vehicle '{id}'")]
    UnknownVehicle { id: String },
    #[error("cannot reprice '{id}': {source}")]
    InvalidPrice { id: String, source: FinancingError },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleCatalog {
    vehicles: Vec<Vehicle>,
}

impl VehicleCatalog {
    /// Validates every vehicle and rejects repeated ids. Rows are numbered
    /// from 1 in error reports.
    pub fn new(vehicles: Vec<Vehicle>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(vehicles.len());

        for (index, vehicle) in vehicles.iter().enumerate() {
            let row = index + 1;
            vehicle
                .validate()
                .map_err(|source| CatalogError::InvalidRow { row, source })?;
            if !seen.insert(vehicle.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    row,
                    id: vehicle.id.to_string(),
                });
            }
        }

        Ok(Self { vehicles })
    }

    /// The twenty Toyota listings bundled with the crate.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_csv_reader(STANDARD_CATALOG.as_bytes())
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let vehicles = parser::parse_records(reader)?
            .into_iter()
            .map(|record| record.vehicle)
            .collect();
        Self::new(vehicles)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let vehicles: Vec<Vehicle> = serde_json::from_reader(reader)?;
        Self::new(vehicles)
    }

    /// Loads a `.json` file as a JSON array and anything else as CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let catalog = if is_json {
            Self::from_json_reader(file)?
        } else {
            Self::from_csv_reader(file)?
        };
        debug!(path = %path.display(), vehicles = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id.as_str() == id)
    }

    pub fn require(&self, id: &str) -> Result<&Vehicle, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownVehicle { id: id.to_string() })
    }

    /// Resolves `ids` in the order given.
    pub fn select(&self, ids: &[VehicleId]) -> Result<Vec<Vehicle>, CatalogError> {
        ids.iter()
            .map(|id| self.require(id.as_str()).cloned())
            .collect()
    }

    /// Copy of the catalog with one vehicle repriced, e.g. from a live
    /// dealer listing.
    pub fn with_price_override(
        &self,
        id: &str,
        price: f64,
        source: Option<&str>,
    ) -> Result<Self, CatalogError> {
        let mut vehicles = self.vehicles.clone();
        let vehicle = vehicles
            .iter_mut()
            .find(|vehicle| vehicle.id.as_str() == id)
            .ok_or_else(|| CatalogError::UnknownVehicle { id: id.to_string() })?;

        vehicle.base_price = price;
        if let Some(source) = source {
            vehicle.price_source = Some(source.to_string());
        }
        vehicle
            .validate()
            .map_err(|source| CatalogError::InvalidPrice {
                id: id.to_string(),
                source,
            })?;

        debug!(vehicle = id, price, "catalog price overridden");
        Ok(Self { vehicles })
    }
}

impl<'a> IntoIterator for &'a VehicleCatalog {
    type Item = &'a Vehicle;
    type IntoIter = std::slice::Iter<'a, Vehicle>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
