use crate::facets::build_facet_definitions;
use crate::filtering::{apply_filters, MatchResult};
use crate::models::{ColumnSet, FacetDefinition, FilterCriteria, Record};

/// The immutable crossing table plus the facet choice lists derived from it.
///
/// Built once at startup; share it behind an `Arc` and never mutate it.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    columns: ColumnSet,
    facets: Vec<FacetDefinition>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, columns: ColumnSet) -> Self {
        let facets = build_facet_definitions(&records, &columns);
        Self {
            records,
            columns,
            facets,
        }
    }

    /// Dataset whose source carried every column
    pub fn from_records(records: Vec<Record>) -> Self {
        Self::new(records, ColumnSet::all())
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn facets(&self) -> &[FacetDefinition] {
        &self.facets
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Narrow the table to the records matching `criteria`
    pub fn filter(&self, criteria: &FilterCriteria) -> MatchResult<'_> {
        apply_filters(&self.records, criteria, &self.columns)
    }
}
