// Public modules
pub mod dataset;
pub mod error;
pub mod facets;
pub mod filtering;
pub mod io;
pub mod kilopost;
pub mod map;
pub mod models;

// Re-export commonly used types for convenience
pub use dataset::Dataset;
pub use error::{DatasetError, UnknownFacet};
pub use facets::{build_facet_definitions, facet_options};
pub use filtering::{
    active_predicates, apply_filters, has_filters, parse_facet_filters, MatchResult, ParsedFacets,
    Predicate,
};
pub use io::{load_dataset, read_dataset};
pub use kilopost::{format_kilopost, format_meters};
pub use map::{
    build_map, center_of, map_link, Coordinate, MapBuilder, MapOptions, MapPayload,
    MarkerDescriptor, PopupFields, DEFAULT_UNKNOWN_NAME,
};
pub use models::{
    ColumnSet, FacetDefinition, FacetKey, FacetSelection, FilterCriteria, Kilopost, Record,
    ALL_ALIAS, ALL_SENTINEL,
};
