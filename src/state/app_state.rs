use crossmap_core::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Process-wide state: the crossing table loaded once at startup.
///
/// The dataset is never mutated after load, so any number of queries may
/// read it concurrently through the shared `Arc`.
#[derive(Debug, Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    source: PathBuf,
    map_builder: MapBuilder,
}

/// Everything the presentation layer needs for one query
#[derive(Debug, Clone)]
pub struct QueryResponse<'a> {
    pub matches: MatchResult<'a>,
    /// `None` when nothing can be placed on a map
    pub map: Option<MapPayload>,
    pub facets: &'a [FacetDefinition],
}

impl QueryResponse<'_> {
    pub fn count(&self) -> usize {
        self.matches.len()
    }

    /// Matching crossings that have no marker
    pub fn unlocated(&self) -> usize {
        self.count() - self.map.as_ref().map_or(0, |map| map.markers.len())
    }
}

impl AppState {
    /// Load the dataset from disk
    pub fn load(path: &Path, options: MapOptions) -> Result<Self, DatasetError> {
        let dataset = load_dataset(path)?;
        Ok(Self::from_dataset(dataset, path.to_path_buf(), options))
    }

    pub fn from_dataset(dataset: Dataset, source: PathBuf, options: MapOptions) -> Self {
        Self {
            dataset: Arc::new(dataset),
            source,
            map_builder: MapBuilder::new(options),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn facets(&self) -> &[FacetDefinition] {
        self.dataset.facets()
    }

    /// Filter the table and build the map for one request
    pub fn query(&self, criteria: &FilterCriteria) -> QueryResponse<'_> {
        let matches = self.dataset.filter(criteria);
        let payload = self.map_builder.build(&matches);
        let map = payload.has_map().then_some(payload);

        tracing::info!(
            total = self.dataset.len(),
            matched = matches.len(),
            markers = map.as_ref().map_or(0, |m| m.markers.len()),
            "query complete"
        );

        QueryResponse {
            matches,
            map,
            facets: self.dataset.facets(),
        }
    }
}
