use crossmap_core::DatasetError;
use std::io::ErrorKind;
use std::path::Path;

/// Map dataset loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_dataset_load_error(error: &DatasetError, path: &Path) -> (String, String, String) {
    match error {
        DatasetError::Io { source, .. } => map_io_error(source, path),
        DatasetError::Csv(csv_error) => match csv_error.kind() {
            csv::ErrorKind::Io(source) => map_io_error(source, path),
            csv::ErrorKind::Utf8 { pos, .. } => (
                "Encoding Error".to_string(),
                "The dataset is not valid UTF-8.".to_string(),
                format!(
                    "Path: {}\nFirst invalid record: {}\n\nIf the file was exported as Shift_JIS, re-save it as UTF-8.",
                    path.display(),
                    pos.as_ref()
                        .map_or_else(|| "unknown".to_string(), |p| p.line().to_string())
                ),
            ),
            _ => (
                "Malformed Dataset".to_string(),
                "The dataset could not be parsed as CSV.".to_string(),
                csv_error.to_string(),
            ),
        },
        DatasetError::EmptyHeader => (
            "Empty Dataset".to_string(),
            "The dataset has no header row.".to_string(),
            format!(
                "Path: {}\n\nThe first line must name the columns, e.g. 踏切名,線名,Lat,Lon.",
                path.display()
            ),
        ),
    }
}

fn map_io_error(error: &std::io::Error, path: &Path) -> (String, String, String) {
    match error.kind() {
        ErrorKind::NotFound => (
            "File Not Found".to_string(),
            "The file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        ),
        ErrorKind::PermissionDenied => (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        ),
        _ => (
            "Error Loading File".to_string(),
            "Failed to load the level crossing dataset.".to_string(),
            error.to_string(),
        ),
    }
}
