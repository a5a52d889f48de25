use crossmap_core::{parse_facet_filters, FacetKey, FacetSelection, FilterCriteria};
use unicode_normalization::UnicodeNormalization;

use crate::cli::FilterArgs;

/// Criteria built from one invocation, plus the facet arguments that were ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRequest {
    pub criteria: FilterCriteria,
    pub rejected: Vec<String>,
}

/// Convert command line filter arguments into criteria.
///
/// Generic `--facet` entries are applied first; the dedicated flags
/// (`--line`, `--branch`, ...) override them for the same facet. Every value
/// is NFC-normalized and trimmed before the sentinel check, whichever flag
/// carried it.
pub fn criteria_from_args(args: &FilterArgs) -> FilterRequest {
    let facets: Vec<String> = args.facets.iter().map(|f| f.nfc().collect()).collect();
    let parsed = parse_facet_filters(&facets);

    let mut criteria = FilterCriteria {
        search_name: args.search.nfc().collect(),
        selections: parsed.selections,
    };

    let dedicated = [
        (FacetKey::Line, &args.line),
        (FacetKey::Branch, &args.branch),
        (FacetKey::Location, &args.location),
        (FacetKey::CrossingType, &args.crossing_type),
    ];
    for (key, value) in dedicated {
        if let Some(value) = value {
            let value: String = value.nfc().collect();
            criteria
                .selections
                .insert(key, FacetSelection::from_form_value(Some(value.trim())));
        }
    }

    for (key, selection) in &criteria.selections {
        if let FacetSelection::Equals(value) = selection {
            tracing::debug!(facet = key.slug(), value = %value, "facet selected");
        }
    }

    FilterRequest {
        criteria,
        rejected: parsed.rejected,
    }
}
