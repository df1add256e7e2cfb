//! quad: smallest end-to-end delivery plan.
//!
//! Routes a courier from a depot through three stops on a four-block loop
//! around Westwood Blvd and prints the turn-by-turn plan.  Positions that
//! are not spelled exactly as on the map are snapped to the nearest
//! intersection first.
//!
//! Run with your own data:
//!
//! ```text
//! quad MAP_FILE DELIVERIES_CSV DEPOT_LAT DEPOT_LON
//! ```

use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use nav_core::{DeliveryRequest, GeoCoord};
use nav_plan::{DeliveryPlanner, load_deliveries_csv, load_deliveries_reader};
use nav_spatial::{StreetMap, load_map_file, load_map_reader};

// ── Built-in data ─────────────────────────────────────────────────────────────

// Written with fewer decimals than the map; snapped onto Le Conte & Gayley.
const DEPOT_LAT: &str = "34.063";
const DEPOT_LON: &str = "-118.447";

const MAP_TEXT: &str = "\
Le Conte Avenue
2
34.0630000 -118.4470000 34.0630000 -118.4455000
34.0630000 -118.4455000 34.0630000 -118.4440000
Westwood Boulevard
1
34.0630000 -118.4455000 34.0660000 -118.4455000
Weyburn Avenue
1
34.0660000 -118.4470000 34.0660000 -118.4455000
Gayley Avenue
1
34.0630000 -118.4470000 34.0660000 -118.4470000
";

const DELIVERIES_CSV: &str = "\
lat,lon,item
34.0660000,-118.4455000,Chicken tenders
34.0630000,-118.4440000,Sardines
34.0660000,-118.4470000,Bruin plush
";

// ── Input ─────────────────────────────────────────────────────────────────────

fn load_inputs() -> Result<(StreetMap, Vec<DeliveryRequest>, GeoCoord)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => {
            let map = load_map_reader(Cursor::new(MAP_TEXT))?;
            let deliveries = load_deliveries_reader(Cursor::new(DELIVERIES_CSV))?;
            Ok((map, deliveries, GeoCoord::parse(DEPOT_LAT, DEPOT_LON)?))
        }
        [map_path, csv_path, lat, lon] => {
            let map = load_map_file(Path::new(map_path))
                .with_context(|| format!("loading street map {map_path}"))?;
            let deliveries = load_deliveries_csv(Path::new(csv_path))
                .with_context(|| format!("loading deliveries {csv_path}"))?;
            Ok((map, deliveries, GeoCoord::parse(lat, lon)?))
        }
        _ => bail!("usage: quad [MAP_FILE DELIVERIES_CSV DEPOT_LAT DEPOT_LON]"),
    }
}

/// Move `coord` onto the nearest map coordinate unless it is already there.
fn snap_onto(map: &StreetMap, what: &str, coord: GeoCoord) -> Result<GeoCoord> {
    let Some(snapped) = map.snap(&coord) else {
        bail!("street map is empty; cannot place {what}");
    };
    if *snapped != coord {
        warn!(
            "{what} {coord} is not on the map; using {snapped} ({:.3} mi away)",
            coord.distance_miles(snapped),
        );
    }
    Ok(snapped.clone())
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    println!("=== quad: delivery route planner ===");

    let (map, mut deliveries, depot) = load_inputs()?;
    info!(
        "loaded {} coordinates, {} directed segments, {} deliveries",
        map.coord_count(),
        map.segment_count(),
        deliveries.len(),
    );

    let depot = snap_onto(&map, "depot", depot)?;
    for d in &mut deliveries {
        d.location = snap_onto(&map, &d.item, d.location.clone())?;
    }

    println!(
        "Map: {} coordinates, {} directed segments  |  Deliveries: {}  |  Depot: {depot}",
        map.coord_count(),
        map.segment_count(),
        deliveries.len(),
    );
    println!();

    let t0 = Instant::now();
    let plan = DeliveryPlanner::new(&map).plan(&depot, &deliveries)?;
    let elapsed = t0.elapsed();
    info!(
        "plan ready: {} commands, {:.2} mi in {:.3} ms",
        plan.commands.len(),
        plan.distance_miles,
        elapsed.as_secs_f64() * 1_000.0,
    );

    for (i, cmd) in plan.commands.iter().enumerate() {
        println!("{:>3}. {cmd}", i + 1);
    }
    println!();

    println!("Stops in order:");
    for stop in &plan.stops {
        println!("  {:<20} {}", stop.item, stop.location);
    }
    println!();

    println!("Total travel distance: {:.2} miles", plan.distance_miles);
    println!(
        "Crow-flight tour:      {:.2} -> {:.2} miles ({:+.2})",
        plan.crow.old_miles,
        plan.crow.new_miles,
        -plan.crow.saved_miles(),
    );
    println!("Planned in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);

    Ok(())
}
