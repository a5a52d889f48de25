use crate::models::{ColumnSet, FacetKey, FacetSelection, FilterCriteria, Record};
use std::collections::BTreeMap;

/// The subset of records that survived filtering, in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult<'a> {
    records: Vec<&'a Record>,
}

impl<'a> MatchResult<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }
}

impl<'a> FromIterator<&'a Record> for MatchResult<'a> {
    fn from_iter<T: IntoIterator<Item = &'a Record>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// A single active constraint on a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate<'c> {
    /// Name is present and contains the text literally
    NameContains(&'c str),
    /// Facet attribute is present and equal to the value
    FacetEquals(FacetKey, &'c str),
}

impl Predicate<'_> {
    pub fn matches(&self, record: &Record) -> bool {
        match *self {
            Predicate::NameContains(needle) => record
                .name
                .as_deref()
                .is_some_and(|name| name.contains(needle)),
            Predicate::FacetEquals(key, value) => record.facet_value(key) == Some(value),
        }
    }
}

/// Build the ordered list of predicates a criteria value activates.
///
/// The name search comes first, then facets in [`FacetKey::ALL`] order.
/// Constraints on columns the dataset does not carry are skipped.
pub fn active_predicates<'c>(
    criteria: &'c FilterCriteria,
    columns: &ColumnSet,
) -> Vec<Predicate<'c>> {
    let mut predicates = Vec::new();

    if !criteria.search_name.is_empty() && columns.name {
        predicates.push(Predicate::NameContains(&criteria.search_name));
    }

    for key in FacetKey::ALL {
        if let Some(value) = criteria.selected_value(key) {
            if columns.has_facet(key) {
                predicates.push(Predicate::FacetEquals(key, value));
            }
        }
    }

    predicates
}

/// Apply criteria to a sequence of records, returning only those that match.
/// AND logic across every active predicate; order is preserved.
pub fn apply_filters<'a, I>(
    records: I,
    criteria: &FilterCriteria,
    columns: &ColumnSet,
) -> MatchResult<'a>
where
    I: IntoIterator<Item = &'a Record>,
{
    let predicates = active_predicates(criteria, columns);

    let result: MatchResult<'a> = records
        .into_iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record)))
        .collect();

    tracing::debug!(
        predicates = predicates.len(),
        matched = result.len(),
        "applied filters"
    );

    result
}

/// Check if criteria constrain anything at all
pub fn has_filters(criteria: &FilterCriteria) -> bool {
    !criteria.search_name.is_empty()
        || FacetKey::ALL
            .into_iter()
            .any(|key| criteria.selected_value(key).is_some())
}

/// Facet selections parsed from "key=value" strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFacets {
    pub selections: BTreeMap<FacetKey, FacetSelection>,
    /// Entries that were not "key=value" or named an unknown facet
    pub rejected: Vec<String>,
}

/// Parse facet filter strings in the format "key=value".
/// A later value for the same key replaces an earlier one.
pub fn parse_facet_filters(facet_strings: &[String]) -> ParsedFacets {
    let mut parsed = ParsedFacets::default();

    for facet_str in facet_strings {
        let Some((key, value)) = facet_str.split_once('=') else {
            parsed.rejected.push(facet_str.clone());
            continue;
        };

        match key.parse::<FacetKey>() {
            Ok(key) => {
                parsed
                    .selections
                    .insert(key, FacetSelection::from_form_value(Some(value.trim())));
            }
            Err(_) => parsed.rejected.push(facet_str.clone()),
        }
    }

    parsed
}
