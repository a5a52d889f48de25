use crate::models::{ColumnSet, FacetDefinition, FacetKey, Record};
use std::collections::BTreeSet;

/// Collect the distinct values of one facet, sorted ascending
pub fn facet_options(records: &[Record], key: FacetKey) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.facet_value(key))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Build the choice lists for every facet whose column exists in the dataset
pub fn build_facet_definitions(records: &[Record], columns: &ColumnSet) -> Vec<FacetDefinition> {
    FacetKey::ALL
        .into_iter()
        .filter(|key| columns.has_facet(*key))
        .map(|key| FacetDefinition {
            key,
            label: key.label(),
            options: facet_options(records, key),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(line: Option<&str>, kind: Option<&str>) -> Record {
        Record {
            line_name: line.map(str::to_string),
            crossing_type: kind.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_options_are_distinct_and_sorted() {
        let records = vec![
            record(Some("Y線"), Some("第4種")),
            record(Some("X線"), Some("第1種")),
            record(None, Some("第1種")),
            record(Some("Y線"), None),
        ];

        assert_eq!(facet_options(&records, FacetKey::Line), vec!["X線", "Y線"]);
        assert_eq!(
            facet_options(&records, FacetKey::CrossingType),
            vec!["第1種", "第4種"]
        );
        assert!(facet_options(&records, FacetKey::Branch).is_empty());
    }

    #[test]
    fn test_definitions_follow_facet_order_and_columns() {
        let records = vec![record(Some("X線"), Some("第1種"))];
        let mut columns = ColumnSet::all();
        columns.facets.remove(&FacetKey::Branch);

        let definitions = build_facet_definitions(&records, &columns);
        let keys: Vec<_> = definitions.iter().map(|d| d.key).collect();
        assert_eq!(
            keys,
            vec![FacetKey::Line, FacetKey::Location, FacetKey::CrossingType]
        );
        assert_eq!(definitions[0].label, "線名");
        assert_eq!(definitions[0].options, vec!["X線"]);
        assert!(definitions[1].options.is_empty());
    }
}
