use csv::StringRecord;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::dataset::Dataset;
use crate::error::DatasetError;
use crate::models::{ColumnSet, FacetKey, Kilopost, Record};

pub const NAME_COLUMN: &str = "踏切名";
pub const OFFSET_COLUMN: &str = "中心位置キロ程";
pub const LAT_COLUMN: &str = "Lat";
pub const LON_COLUMN: &str = "Lon";

/// Cell contents treated as a missing value
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load the crossing table from a CSV file
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_dataset(file)?;
    info!(
        path = %path.display(),
        records = dataset.len(),
        "loaded crossing dataset"
    );
    Ok(dataset)
}

/// Read the crossing table from any CSV source
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(DatasetError::EmptyHeader);
    }

    let layout = ColumnLayout::from_headers(&headers);
    layout.warn_missing();

    let mut records = Vec::new();
    for row in csv_reader.records() {
        records.push(layout.record(&row?));
    }

    Ok(Dataset::new(records, layout.column_set()))
}

/// Position of each known column in the header row
#[derive(Debug, Default)]
struct ColumnLayout {
    name: Option<usize>,
    facets: [Option<usize>; 4],
    offset: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let position = |column: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == column)
        };

        Self {
            name: position(NAME_COLUMN),
            facets: FacetKey::ALL.map(|key| position(key.column())),
            offset: position(OFFSET_COLUMN),
            lat: position(LAT_COLUMN),
            lon: position(LON_COLUMN),
        }
    }

    fn warn_missing(&self) {
        let mut missing: Vec<&str> = Vec::new();
        if self.name.is_none() {
            missing.push(NAME_COLUMN);
        }
        for (key, index) in FacetKey::ALL.iter().zip(&self.facets) {
            if index.is_none() {
                missing.push(key.column());
            }
        }
        for (column, index) in [
            (OFFSET_COLUMN, self.offset),
            (LAT_COLUMN, self.lat),
            (LON_COLUMN, self.lon),
        ] {
            if index.is_none() {
                missing.push(column);
            }
        }

        if !missing.is_empty() {
            warn!(columns = ?missing, "dataset is missing columns");
        }
    }

    fn column_set(&self) -> ColumnSet {
        let facets: BTreeSet<FacetKey> = FacetKey::ALL
            .into_iter()
            .zip(self.facets)
            .filter_map(|(key, index)| index.map(|_| key))
            .collect();

        ColumnSet {
            name: self.name.is_some(),
            facets,
        }
    }

    fn record(&self, row: &StringRecord) -> Record {
        let cell = |index: Option<usize>| {
            index
                .and_then(|i| row.get(i))
                .filter(|c| !is_missing(c))
        };
        let text = |index: Option<usize>| cell(index).map(normalize);
        let number =
            |index: Option<usize>| cell(index).and_then(|c| c.trim().parse::<f64>().ok());

        let [line, branch, location, kind] = self.facets;

        Record {
            name: text(self.name),
            line_name: text(line),
            branch_name: text(branch),
            location_name: text(location),
            crossing_type: text(kind),
            center_offset: text(self.offset).map(|c| Kilopost::parse(&c)),
            lat: number(self.lat),
            lon: number(self.lon),
        }
    }
}

fn is_missing(cell: &str) -> bool {
    MISSING_MARKERS.contains(&cell)
}

fn normalize(cell: &str) -> String {
    cell.nfc().collect()
}
