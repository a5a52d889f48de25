//! Turning a filtered subset into a declarative map payload.
//!
//! The payload carries a center point and one marker per record that has
//! valid coordinates. Rendering it (tiles, zoom, icons) belongs to whatever
//! mapping widget consumes it.

use serde::Serialize;

use crate::filtering::MatchResult;
use crate::kilopost::format_kilopost;
use crate::models::Record;

/// Fallback popup title for crossings without a name
pub const DEFAULT_UNKNOWN_NAME: &str = "名称不明";

/// Link that opens Google Maps centered on a coordinate
pub fn map_link(lat: f64, lon: f64) -> String {
    format!("https://www.google.com/maps?q={:?},{:?}", lat, lon)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Text shown in a marker popup, with defaults already substituted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupFields {
    pub name: String,
    pub line_name: String,
    pub formatted_kilopost: String,
    pub map_link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDescriptor {
    pub lat: f64,
    pub lon: f64,
    pub popup: PopupFields,
    pub tooltip: String,
}

/// Center plus markers for one filtered subset.
///
/// `center` is `None` when there is nothing to put on a map; callers should
/// then omit the map entirely rather than render an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapPayload {
    pub center: Option<Coordinate>,
    pub markers: Vec<MarkerDescriptor>,
}

impl MapPayload {
    pub fn has_map(&self) -> bool {
        self.center.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    pub unknown_name: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            unknown_name: DEFAULT_UNKNOWN_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    options: MapOptions,
}

impl MapBuilder {
    pub fn new(options: MapOptions) -> Self {
        Self { options }
    }

    pub fn build(&self, matches: &MatchResult<'_>) -> MapPayload {
        if matches.is_empty() {
            return MapPayload::default();
        }

        let Some(center) = center_of(matches.iter()) else {
            tracing::debug!(
                matched = matches.len(),
                "no record in the subset has coordinates"
            );
            return MapPayload::default();
        };

        let markers: Vec<_> = matches
            .iter()
            .filter_map(|record| self.marker(record))
            .collect();

        tracing::debug!(
            matched = matches.len(),
            markers = markers.len(),
            "built map payload"
        );

        MapPayload {
            center: Some(center),
            markers,
        }
    }

    /// Marker for a record, or `None` if either coordinate is missing or invalid
    pub fn marker(&self, record: &Record) -> Option<MarkerDescriptor> {
        let (lat, lon) = record.coordinates()?;

        Some(MarkerDescriptor {
            lat,
            lon,
            popup: self.popup_fields(record, lat, lon),
            tooltip: record.name.clone().unwrap_or_default(),
        })
    }

    /// Popup text with defaults substituted for missing attributes
    pub fn popup_fields(&self, record: &Record, lat: f64, lon: f64) -> PopupFields {
        PopupFields {
            name: record
                .name
                .clone()
                .unwrap_or_else(|| self.options.unknown_name.clone()),
            line_name: record.line_name.clone().unwrap_or_default(),
            formatted_kilopost: format_kilopost(record.center_offset.as_ref()),
            map_link: map_link(lat, lon),
        }
    }
}

/// Build a payload with default display options
pub fn build_map(matches: &MatchResult<'_>) -> MapPayload {
    MapBuilder::default().build(matches)
}

/// Mean latitude and mean longitude, each over the records where that
/// coordinate is valid
pub fn center_of<'a>(records: impl Iterator<Item = &'a Record>) -> Option<Coordinate> {
    let (mut lat_sum, mut lat_count) = (0.0, 0usize);
    let (mut lon_sum, mut lon_count) = (0.0, 0usize);

    for record in records {
        if let Some(lat) = record.valid_lat() {
            lat_sum += lat;
            lat_count += 1;
        }
        if let Some(lon) = record.valid_lon() {
            lon_sum += lon;
            lon_count += 1;
        }
    }

    if lat_count == 0 || lon_count == 0 {
        return None;
    }

    Some(Coordinate {
        lat: lat_sum / lat_count as f64,
        lon: lon_sum / lon_count as f64,
    })
}
