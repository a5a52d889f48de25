use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownFacet;

/// Locale-rendered "no constraint" choice shown at the top of every facet list
pub const ALL_SENTINEL: &str = "すべて";

/// ASCII alias for [`ALL_SENTINEL`], accepted on the command line
pub const ALL_ALIAS: &str = "all";

/// One level crossing from the source table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub name: Option<String>,
    pub line_name: Option<String>,
    pub branch_name: Option<String>,
    pub location_name: Option<String>,
    pub crossing_type: Option<String>,
    pub center_offset: Option<Kilopost>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl Record {
    /// Get the value of a facet attribute, if present
    pub fn facet_value(&self, key: FacetKey) -> Option<&str> {
        let value = match key {
            FacetKey::Line => &self.line_name,
            FacetKey::Branch => &self.branch_name,
            FacetKey::Location => &self.location_name,
            FacetKey::CrossingType => &self.crossing_type,
        };
        value.as_deref()
    }

    /// Latitude, if present, finite and within [-90, 90]
    pub fn valid_lat(&self) -> Option<f64> {
        self.lat.filter(|v| v.is_finite() && (-90.0..=90.0).contains(v))
    }

    /// Longitude, if present, finite and within [-180, 180]
    pub fn valid_lon(&self) -> Option<f64> {
        self.lon.filter(|v| v.is_finite() && (-180.0..=180.0).contains(v))
    }

    /// Both coordinates, only when each of them is valid
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.valid_lat()?, self.valid_lon()?))
    }
}

/// Center position along the line, as found in the source cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Kilopost {
    /// Distance in meters
    Meters(f64),
    /// Cell text that did not parse as a number
    Raw(String),
}

impl Kilopost {
    /// Interpret a non-empty cell, keeping the text when it is not numeric
    pub fn parse(cell: &str) -> Self {
        match cell.trim().parse::<f64>() {
            Ok(meters) => Kilopost::Meters(meters),
            Err(_) => Kilopost::Raw(cell.to_string()),
        }
    }
}

impl From<f64> for Kilopost {
    fn from(meters: f64) -> Self {
        Kilopost::Meters(meters)
    }
}

impl fmt::Display for Kilopost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kilopost::Meters(meters) => write!(f, "{}", meters),
            Kilopost::Raw(text) => f.write_str(text),
        }
    }
}

/// Categorical attributes a user can narrow the dataset by.
///
/// The declaration order is the order in which facet predicates are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetKey {
    Line,
    Branch,
    Location,
    CrossingType,
}

impl FacetKey {
    pub const ALL: [FacetKey; 4] = [
        FacetKey::Line,
        FacetKey::Branch,
        FacetKey::Location,
        FacetKey::CrossingType,
    ];

    /// Column header in the source CSV
    pub fn column(self) -> &'static str {
        match self {
            FacetKey::Line => "線名",
            FacetKey::Branch => "支社名",
            FacetKey::Location => "箇所名（系統名なし）",
            FacetKey::CrossingType => "踏切種別",
        }
    }

    /// Display label; identical to the column header
    pub fn label(self) -> &'static str {
        self.column()
    }

    /// Short ASCII name used on the command line
    pub fn slug(self) -> &'static str {
        match self {
            FacetKey::Line => "line",
            FacetKey::Branch => "branch",
            FacetKey::Location => "location",
            FacetKey::CrossingType => "type",
        }
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FacetKey {
    type Err = UnknownFacet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        FacetKey::ALL
            .into_iter()
            .find(|key| key.slug() == s || key.column() == s)
            .or(match s {
                "crossing_type" | "crossing-type" => Some(FacetKey::CrossingType),
                _ => None,
            })
            .ok_or_else(|| UnknownFacet(s.to_string()))
    }
}

/// Which optional columns the source table actually carried.
///
/// Predicates on attributes whose column is missing never constrain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    pub name: bool,
    pub facets: BTreeSet<FacetKey>,
}

impl ColumnSet {
    pub fn all() -> Self {
        Self {
            name: true,
            facets: FacetKey::ALL.into_iter().collect(),
        }
    }

    pub fn has_facet(&self, key: FacetKey) -> bool {
        self.facets.contains(&key)
    }
}

impl Default for ColumnSet {
    fn default() -> Self {
        Self::all()
    }
}

/// The distinct values of one facet, computed once from the dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetDefinition {
    pub key: FacetKey,
    pub label: &'static str,
    /// Distinct non-missing values, sorted ascending
    pub options: Vec<String>,
}

/// Per-facet choice made by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FacetSelection {
    #[default]
    NoConstraint,
    Equals(String),
}

impl FacetSelection {
    /// Interpret a submitted form value. Absent, empty and the "all"
    /// sentinel all mean no constraint.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value {
            None => FacetSelection::NoConstraint,
            Some(v) if v.is_empty() || v == ALL_SENTINEL || v == ALL_ALIAS => {
                FacetSelection::NoConstraint
            }
            Some(v) => FacetSelection::Equals(v.to_string()),
        }
    }

    pub fn equals(value: impl Into<String>) -> Self {
        FacetSelection::Equals(value.into())
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            FacetSelection::NoConstraint => None,
            FacetSelection::Equals(v) => Some(v),
        }
    }
}

/// Per-request filter input: a name search plus one selection per facet
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Literal, case-sensitive substring of the crossing name; empty means no search
    pub search_name: String,
    pub selections: BTreeMap<FacetKey, FacetSelection>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search_name: impl Into<String>) -> Self {
        self.search_name = search_name.into();
        self
    }

    pub fn with_facet(mut self, key: FacetKey, selection: FacetSelection) -> Self {
        self.selections.insert(key, selection);
        self
    }

    /// The value a facet is constrained to, if any
    pub fn selected_value(&self, key: FacetKey) -> Option<&str> {
        self.selections.get(&key).and_then(FacetSelection::value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facet_key_parses_slug_and_column() {
        assert_eq!("line".parse::<FacetKey>().unwrap(), FacetKey::Line);
        assert_eq!("支社名".parse::<FacetKey>().unwrap(), FacetKey::Branch);
        assert_eq!(
            "箇所名（系統名なし）".parse::<FacetKey>().unwrap(),
            FacetKey::Location
        );
        assert_eq!("type".parse::<FacetKey>().unwrap(), FacetKey::CrossingType);
        assert_eq!(
            "crossing_type".parse::<FacetKey>().unwrap(),
            FacetKey::CrossingType
        );
        assert!("駅名".parse::<FacetKey>().is_err());
    }

    #[test]
    fn test_sentinel_is_never_a_literal_value() {
        assert_eq!(
            FacetSelection::from_form_value(Some(ALL_SENTINEL)),
            FacetSelection::NoConstraint
        );
        assert_eq!(
            FacetSelection::from_form_value(Some("all")),
            FacetSelection::NoConstraint
        );
        assert_eq!(
            FacetSelection::from_form_value(Some("")),
            FacetSelection::NoConstraint
        );
        assert_eq!(
            FacetSelection::from_form_value(None),
            FacetSelection::NoConstraint
        );
        assert_eq!(
            FacetSelection::from_form_value(Some("X線")),
            FacetSelection::equals("X線")
        );
    }

    #[test]
    fn test_coordinates_require_both_valid() {
        let mut record = Record {
            lat: Some(35.0),
            lon: Some(139.0),
            ..Default::default()
        };
        assert_eq!(record.coordinates(), Some((35.0, 139.0)));

        record.lon = None;
        assert_eq!(record.coordinates(), None);

        record.lon = Some(f64::NAN);
        assert_eq!(record.coordinates(), None);

        record.lon = Some(139.0);
        record.lat = Some(91.0);
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn test_kilopost_parse_keeps_raw_text() {
        assert_eq!(Kilopost::parse("2500"), Kilopost::Meters(2500.0));
        assert_eq!(Kilopost::parse(" 12.5 "), Kilopost::Meters(12.5));
        assert_eq!(
            Kilopost::parse("12k300m"),
            Kilopost::Raw("12k300m".to_string())
        );
    }

    #[test]
    fn test_selected_value_ignores_no_constraint() {
        let criteria = FilterCriteria::new()
            .with_facet(FacetKey::Line, FacetSelection::equals("X線"))
            .with_facet(FacetKey::Branch, FacetSelection::NoConstraint);

        assert_eq!(criteria.selected_value(FacetKey::Line), Some("X線"));
        assert_eq!(criteria.selected_value(FacetKey::Branch), None);
        assert_eq!(criteria.selected_value(FacetKey::Location), None);
    }
}
