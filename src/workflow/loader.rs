//! Workflow Loader
//!
//! Reads a translation review sheet (CSV) into an ordered list of
//! [`WorkflowItem`]s.
//!
//! The sheet must carry the columns `Screen/Page`, `Section`, `String`,
//! `Language` and `Misc`. Column order does not matter and extra columns are
//! ignored. Rows whose page cell is blank are skipped without error.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use super::model::WorkflowItem;

/// Column holding the page label.
pub const COLUMN_PAGE: &str = "Screen/Page";
/// Column holding the section label.
pub const COLUMN_SECTION: &str = "Section";
/// Column holding the target string.
pub const COLUMN_STRING: &str = "String";
/// Column holding the language name.
pub const COLUMN_LANGUAGE: &str = "Language";
/// Column holding the highlighting hint.
pub const COLUMN_HINT: &str = "Misc";

/// All columns a sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COLUMN_PAGE,
    COLUMN_SECTION,
    COLUMN_STRING,
    COLUMN_LANGUAGE,
    COLUMN_HINT,
];

/// Errors raised while loading a sheet. All of them abort the load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input file not found: '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("Input file '{}' is missing required column(s): {}", .path.display(), .missing.join(", "))]
    InputFormat { path: PathBuf, missing: Vec<String> },

    #[error("Failed to parse CSV '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    page: usize,
    section: usize,
    string: usize,
    language: usize,
    hint: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord, path: &Path) -> Result<Self, LoadError> {
        let names: Vec<&str> = headers
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim())
            .collect();

        let position = |column: &str| names.iter().position(|name| *name == column);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| position(column).is_none())
            .map(|column| column.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(LoadError::InputFormat {
                path: path.to_path_buf(),
                missing,
            });
        }

        // Every lookup below succeeded in the check above.
        Ok(Self {
            page: position(COLUMN_PAGE).unwrap_or_default(),
            section: position(COLUMN_SECTION).unwrap_or_default(),
            string: position(COLUMN_STRING).unwrap_or_default(),
            language: position(COLUMN_LANGUAGE).unwrap_or_default(),
            hint: position(COLUMN_HINT).unwrap_or_default(),
        })
    }
}

/// Loads workflow items from a CSV file.
///
/// Rows are returned in file order. A row is skipped when its page cell is
/// empty after trimming; the `index` of later rows still reflects their
/// position in the file.
///
/// # Errors
///
/// * [`LoadError::NotFound`] - the path does not exist
/// * [`LoadError::InputFormat`] - a required column is absent from the header
/// * [`LoadError::Csv`] / [`LoadError::Io`] - the file could not be read
///
/// # Example
///
/// ```rust,no_run
/// use shotplan::workflow::load_items;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let items = load_items("sample_workflow.csv")?;
///     println!("Loaded {} items", items.len());
///     Ok(())
/// }
/// ```
pub fn load_items(path: impl AsRef<Path>) -> Result<Vec<WorkflowItem>, LoadError> {
    let path = path.as_ref();
    info!("Loading workflow sheet from: {}", path.display());

    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    read_items(file, path)
}

/// Parses workflow items from any reader. `origin` is only used in errors.
pub fn read_items<R: io::Read>(reader: R, origin: &Path) -> Result<Vec<WorkflowItem>, LoadError> {
    let csv_error = |source: csv::Error| LoadError::Csv {
        path: origin.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = ColumnMap::from_headers(reader.headers().map_err(csv_error)?, origin)?;
    debug!("Column layout: {:?}", columns);

    let mut items = Vec::new();
    let mut skipped = 0;

    for (position, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        let index = position + 1;
        let field = |column: usize| record.get(column).unwrap_or("");

        if field(columns.page).trim().is_empty() {
            debug!("Row {} has no page, skipping", index);
            skipped += 1;
            continue;
        }

        items.push(
            WorkflowItem::new(
                index,
                field(columns.page),
                field(columns.section),
                field(columns.string),
                field(columns.language),
            )
            .with_hint(field(columns.hint)),
        );
    }

    info!("Loaded {} workflow items ({} rows skipped)", items.len(), skipped);
    Ok(items)
}
