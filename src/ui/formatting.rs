use crossmap_core::{
    has_filters, FacetDefinition, FacetKey, FilterCriteria, MarkerDescriptor,
};
use std::fmt::Write;

use crate::state::QueryResponse;

/// Describe the active filters, one "label: value" entry per constraint
pub fn format_active_filters(criteria: &FilterCriteria) -> Vec<String> {
    let mut parts = Vec::new();

    if !criteria.search_name.is_empty() {
        parts.push(format!("踏切名: *{}*", criteria.search_name));
    }
    for key in FacetKey::ALL {
        if let Some(value) = criteria.selected_value(key) {
            parts.push(format!("{}: {}", key.label(), value));
        }
    }

    parts
}

/// Format the cached facet choice lists
pub fn format_facet_definitions(facets: &[FacetDefinition]) -> String {
    let mut out = String::from("# Facets\n\n");

    for facet in facets {
        let _ = writeln!(out, "## {} ({})\n", facet.label, facet.key.slug());
        if facet.options.is_empty() {
            out.push_str("_No values._\n");
        }
        for option in &facet.options {
            let _ = writeln!(out, "- {}", option);
        }
        out.push('\n');
    }

    out
}

/// Render a Markdown-style report of one query
pub fn render_text_report(criteria: &FilterCriteria, response: &QueryResponse<'_>) -> String {
    let mut out = String::from("# Level Crossings\n\n");

    if has_filters(criteria) {
        out.push_str("## Active Filters\n\n");
        for filter in &format_active_filters(criteria) {
            let _ = writeln!(out, "- {}", filter);
        }
        out.push('\n');
    }

    let _ = writeln!(out, "**Matching Crossings:** {}\n", response.count());

    let Some(map) = &response.map else {
        if response.count() == 0 {
            out.push_str("_No crossings match the specified filters._\n");
        } else {
            out.push_str("_None of the matching crossings have coordinates; no map._\n");
        }
        return out;
    };

    if let Some(center) = map.center {
        let _ = writeln!(out, "**Map Center:** {:.6}, {:.6}\n", center.lat, center.lon);
    }

    for marker in &map.markers {
        write_marker(&mut out, marker);
    }

    let unlocated = response.unlocated();
    if unlocated > 0 {
        let _ = writeln!(
            out,
            "_{} matching crossing(s) have no coordinates and are not on the map._",
            unlocated
        );
    }

    out
}

fn write_marker(out: &mut String, marker: &MarkerDescriptor) {
    let popup = &marker.popup;

    let _ = writeln!(out, "### {}\n", popup.name);
    if !popup.line_name.is_empty() {
        let _ = writeln!(out, "- 線名: {}", popup.line_name);
    }
    if !popup.formatted_kilopost.is_empty() {
        let _ = writeln!(out, "- キロ程: {}", popup.formatted_kilopost);
    }
    let _ = writeln!(out, "- Google Map: {}", popup.map_link);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::AppState;
    use crossmap_core::{Dataset, FacetSelection, Kilopost, MapOptions, Record};
    use std::path::PathBuf;

    fn state() -> AppState {
        let dataset = Dataset::from_records(vec![
            Record {
                name: Some("A踏切".to_string()),
                line_name: Some("X線".to_string()),
                center_offset: Some(Kilopost::Meters(2500.0)),
                lat: Some(35.0),
                lon: Some(139.0),
                ..Default::default()
            },
            Record {
                name: Some("B踏切".to_string()),
                line_name: Some("Y線".to_string()),
                ..Default::default()
            },
        ]);
        AppState::from_dataset(dataset, PathBuf::from("memory.csv"), MapOptions::default())
    }

    #[test]
    fn test_active_filters_follow_facet_order() {
        let criteria = FilterCriteria::new()
            .with_facet(FacetKey::CrossingType, FacetSelection::equals("第1種"))
            .with_facet(FacetKey::Line, FacetSelection::equals("X線"))
            .with_search("A");

        assert_eq!(
            format_active_filters(&criteria),
            vec!["踏切名: *A*", "線名: X線", "踏切種別: 第1種"]
        );
    }

    #[test]
    fn test_report_lists_markers_and_unlocated_count() {
        let state = state();
        let criteria = FilterCriteria::new();
        let report = render_text_report(&criteria, &state.query(&criteria));

        assert!(report.contains("**Matching Crossings:** 2"));
        assert!(report.contains("### A踏切"));
        assert!(report.contains("- キロ程: 2k500.0m"));
        assert!(report.contains("https://www.google.com/maps?q=35.0,139.0"));
        assert!(!report.contains("### B踏切"));
        assert!(report.contains("_1 matching crossing(s) have no coordinates"));
        assert!(!report.contains("## Active Filters"));
    }

    #[test]
    fn test_sentinel_selection_is_not_an_active_filter() {
        let state = state();
        let criteria =
            FilterCriteria::new().with_facet(FacetKey::Line, FacetSelection::NoConstraint);
        let report = render_text_report(&criteria, &state.query(&criteria));

        assert!(!report.contains("## Active Filters"));
        assert!(report.contains("**Matching Crossings:** 2"));
    }

    #[test]
    fn test_report_without_matches() {
        let state = state();
        let criteria = FilterCriteria::new().with_search("Z");
        let report = render_text_report(&criteria, &state.query(&criteria));

        assert!(report.contains("- 踏切名: *Z*"));
        assert!(report.contains("**Matching Crossings:** 0"));
        assert!(report.contains("_No crossings match the specified filters._"));
        assert!(!report.contains("Map Center"));
    }

    #[test]
    fn test_facet_definitions_listing() {
        let state = state();
        let listing = format_facet_definitions(state.facets());

        assert!(listing.contains("## 線名 (line)\n\n- X線\n- Y線\n"));
        assert!(listing.contains("## 支社名 (branch)\n\n_No values._"));
    }
}
