use crate::financing::{Vehicle, VehicleId};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// A parsed catalog row and its 1-based position below the header.
#[derive(Debug)]
pub(crate) struct CatalogRecord {
    pub(crate) row: usize,
    pub(crate) vehicle: Vehicle,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<CatalogRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        records.push(CatalogRecord {
            row: index + 1,
            vehicle: row.into_vehicle(),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    #[serde(default)]
    model: String,
    year: u16,
    base_price: f64,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    price_source: Option<String>,
}

impl CatalogRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: VehicleId::new(self.id),
            name: self.name,
            model: self.model,
            year: self.year,
            base_price: self.base_price,
            category: self.category,
            price_source: self.price_source,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
