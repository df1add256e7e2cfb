//! Text map loader.
//!
//! # Format
//!
//! One record per street: the name on its own line, the number of pieces,
//! then one line per piece holding the two endpoints.
//!
//! ```text
//! 10th Helena Drive
//! 1
//! 34.0547000 -118.4794734 34.0544590 -118.4801137
//! Broxton Avenue
//! 2
//! 34.0628610 -118.4471097 34.0630070 -118.4471700
//! 34.0630070 -118.4471700 34.0631620 -118.4472324
//! ```
//!
//! Coordinates keep their text exactly as written, so the same intersection
//! must be spelled the same way in every street that touches it.  Blank
//! lines between records are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};

use nav_core::GeoCoord;

use crate::street_map::{StreetDef, StreetMap};
use crate::{SpatialError, SpatialResult};

// ── Public entry points ───────────────────────────────────────────────────────

/// Load a street map from a text file.
///
/// # Errors
///
/// Returns [`SpatialError::Io`] on file errors and [`SpatialError::Parse`]
/// on malformed records.  No partially loaded map is ever returned.
pub fn load_map_file(path: &Path) -> SpatialResult<StreetMap> {
    let file = File::open(path)?;
    let map = load_map_reader(BufReader::new(file))?;
    info!(
        "loaded {}: {} coordinates, {} directed segments",
        path.display(),
        map.coord_count(),
        map.segment_count(),
    );
    Ok(map)
}

/// Like [`load_map_file`] but accepts any `BufRead` source.
pub fn load_map_reader<R: BufRead>(reader: R) -> SpatialResult<StreetMap> {
    let streets = parse_streets(reader)?;
    Ok(StreetMap::load_from(streets))
}

/// Parse every street record without building a map.
pub fn parse_streets<R: BufRead>(reader: R) -> SpatialResult<Vec<StreetDef>> {
    let mut lines = NumberedLines { inner: reader.lines(), line: 0 };
    let mut streets = Vec::new();

    while let Some(name) = lines.next_non_blank()? {
        let name = name.trim().to_owned();

        let (count_line, count_text) = lines
            .next_line()?
            .ok_or_else(|| lines.error(format!("missing segment count for street {name:?}")))?;
        let count: usize = count_text.trim().parse().map_err(|_| SpatialError::Parse {
            line: count_line,
            message: format!("invalid segment count {:?} for street {name:?}", count_text.trim()),
        })?;

        let mut segments = Vec::with_capacity(count);
        for _ in 0..count {
            let (line, text) = lines.next_line()?.ok_or_else(|| {
                lines.error(format!("street {name:?} ends before its {count} segments"))
            })?;
            segments.push(parse_segment(line, &text)?);
        }

        streets.push(StreetDef { name, segments });
    }

    debug!("parsed {} street records", streets.len());
    Ok(streets)
}

// ── Line handling ─────────────────────────────────────────────────────────────

struct NumberedLines<I> {
    inner: I,
    line: usize,
}

impl<I: Iterator<Item = std::io::Result<String>>> NumberedLines<I> {
    /// Next line with its 1-based number, or `None` at end of input.
    fn next_line(&mut self) -> SpatialResult<Option<(usize, String)>> {
        match self.inner.next() {
            None => Ok(None),
            Some(text) => {
                self.line += 1;
                Ok(Some((self.line, text?)))
            }
        }
    }

    fn next_non_blank(&mut self) -> SpatialResult<Option<String>> {
        while let Some((_, text)) = self.next_line()? {
            if !text.trim().is_empty() {
                return Ok(Some(text));
            }
        }
        Ok(None)
    }

    /// A parse error positioned just past the last line read.
    fn error(&self, message: String) -> SpatialError {
        SpatialError::Parse { line: self.line + 1, message }
    }
}

fn parse_segment(line: usize, text: &str) -> SpatialResult<(GeoCoord, GeoCoord)> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let &[lat1, lon1, lat2, lon2] = fields.as_slice() else {
        return Err(SpatialError::Parse {
            line,
            message: format!("expected 4 coordinate values, found {}", fields.len()),
        });
    };
    let coord = |lat: &str, lon: &str| {
        GeoCoord::parse(lat, lon).map_err(|e| SpatialError::Parse { line, message: e.to_string() })
    };
    Ok((coord(lat1, lon1)?, coord(lat2, lon2)?))
}
