//! CSV delivery loader.
//!
//! # CSV format
//!
//! One row per delivery, visited in file order unless an optimizer
//! reorders them.
//!
//! ```csv
//! lat,lon,item
//! 34.0712323,-118.4505969,Chicken tenders
//! 34.0687443,-118.4449195,B-Plate salmon
//! ```
//!
//! `lat` and `lon` are kept as text so they match the street map's
//! coordinates exactly; write them the way the map file does.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use nav_core::{DeliveryRequest, GeoCoord};

use crate::{PlanError, PlanResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct DeliveryRecord {
    lat:  String,
    lon:  String,
    item: String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load delivery requests from a CSV file.
pub fn load_deliveries_csv(path: &Path) -> PlanResult<Vec<DeliveryRequest>> {
    let file = std::fs::File::open(path).map_err(PlanError::Io)?;
    load_deliveries_reader(file)
}

/// Like [`load_deliveries_csv`] but accepts any `Read` source.
pub fn load_deliveries_reader<R: Read>(reader: R) -> PlanResult<Vec<DeliveryRequest>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut deliveries = Vec::new();
    for (i, result) in csv_reader.deserialize::<DeliveryRecord>().enumerate() {
        let row = result.map_err(|e| PlanError::Parse(e.to_string()))?;
        let location = GeoCoord::parse(&row.lat, &row.lon)
            // +2: 1-based, after the header row.
            .map_err(|e| PlanError::Parse(format!("row {}: {e}", i + 2)))?;
        deliveries.push(DeliveryRequest::new(row.item, location));
    }
    Ok(deliveries)
}
