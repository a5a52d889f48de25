use crossmap_core::*;
use std::io::Write;

const CSV: &str = "\
踏切名,線名,支社名,箇所名（系統名なし）,踏切種別,中心位置キロ程,Lat,Lon
A踏切,X線,東京支社,品川,第1種,2500,35.0,139.0
B踏切,Y線,東京支社,大崎,第4種,500,,
";

fn load_fixture() -> Dataset {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    load_dataset(file.path()).unwrap()
}

#[test]
fn search_narrows_to_single_crossing() {
    let dataset = load_fixture();
    let matches = dataset.filter(&FilterCriteria::new().with_search("A"));

    assert_eq!(matches.len(), 1);
    assert_eq!(matches.records()[0].name.as_deref(), Some("A踏切"));

    let payload = build_map(&matches);
    assert_eq!(payload.center, Some(Coordinate { lat: 35.0, lon: 139.0 }));
    assert_eq!(payload.markers.len(), 1);
    assert_eq!(payload.markers[0].popup.formatted_kilopost, "2k500.0m");
    assert_eq!(payload.markers[0].tooltip, "A踏切");
}

#[test]
fn unlocated_crossing_counts_but_has_no_marker() {
    let dataset = load_fixture();
    let matches = dataset.filter(&FilterCriteria::new());

    assert_eq!(matches.len(), 2);
    let payload = build_map(&matches);
    assert_eq!(payload.markers.len(), 1);
    assert_eq!(payload.markers[0].popup.name, "A踏切");
}

#[test]
fn sentinel_selection_does_not_constrain() {
    let dataset = load_fixture();
    let criteria = FilterCriteria::new()
        .with_facet(
            FacetKey::Line,
            FacetSelection::from_form_value(Some(ALL_SENTINEL)),
        )
        .with_facet(
            FacetKey::Branch,
            FacetSelection::from_form_value(Some("東京支社")),
        );

    assert_eq!(dataset.filter(&criteria).len(), 2);
}

#[test]
fn facet_definitions_are_cached_from_load() {
    let dataset = load_fixture();
    let lines = &dataset.facets()[0];

    assert_eq!(lines.key, FacetKey::Line);
    assert_eq!(lines.label, "線名");
    assert_eq!(lines.options, vec!["X線", "Y線"]);
    assert_eq!(dataset.facets()[1].options, vec!["東京支社"]);
}

#[test]
fn empty_result_has_no_map() {
    let dataset = load_fixture();
    let criteria =
        FilterCriteria::new().with_facet(FacetKey::CrossingType, FacetSelection::equals("第3種"));
    let matches = dataset.filter(&criteria);

    assert!(matches.is_empty());
    assert!(!build_map(&matches).has_map());
}

fn load_sample() -> Dataset {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../data/sample_crossings.csv");
    load_dataset(path).unwrap()
}

#[test]
fn sample_data_loads_with_every_facet() {
    let dataset = load_sample();

    assert_eq!(dataset.len(), 6);
    assert_eq!(dataset.columns(), &ColumnSet::all());
    assert_eq!(dataset.facets()[0].options.len(), 4);
    assert_eq!(dataset.facets()[0].options[0], "東海道線");
}

#[test]
fn sample_search_keeps_unlocated_crossings_in_count() {
    let dataset = load_sample();
    let matches = dataset.filter(&FilterCriteria::new().with_search("踏切"));

    assert_eq!(matches.len(), 4);
    assert_eq!(build_map(&matches).markers.len(), 3);
}

#[test]
fn sample_non_numeric_kilopost_is_shown_verbatim() {
    let dataset = load_sample();
    let criteria = FilterCriteria::new()
        .with_facet(FacetKey::Location, FacetSelection::equals("相模原"));
    let matches = dataset.filter(&criteria);
    assert_eq!(matches.len(), 2);

    let payload = build_map(&matches);
    assert_eq!(payload.markers.len(), 1);
    assert_eq!(payload.markers[0].popup.formatted_kilopost, "不明");
    assert_eq!(payload.center, Some(Coordinate { lat: 35.5712, lon: 139.3731 }));
}

#[test]
fn sample_unnamed_crossing_uses_fallback() {
    let dataset = load_sample();
    let criteria =
        FilterCriteria::new().with_facet(FacetKey::Line, FacetSelection::equals("横浜線"));
    let payload = build_map(&dataset.filter(&criteria));

    assert_eq!(payload.markers.len(), 1);
    assert_eq!(payload.markers[0].popup.name, DEFAULT_UNKNOWN_NAME);
    assert_eq!(payload.markers[0].tooltip, "");
    assert_eq!(payload.markers[0].popup.formatted_kilopost, "0k980.0m");
}
