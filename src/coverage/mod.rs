//! Coverage logs written by the test runs.
//!
//! Every log is a CSV with at least the columns `interaction`, `control` and
//! `method`. A log where any of those cells is not a number is rejected as a
//! whole; callers skip whatever depended on it.

use std::fmt;
use std::io::Read;
use std::path::Path;

pub mod layout;

/// Column holding the interaction count.
pub const INTERACTION_COLUMN: &str = "interaction";

/// Coverage metric plotted or tabulated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoverageKind {
    /// Interface (control) coverage.
    Control,
    /// Method coverage.
    Method,
}

impl CoverageKind {
    /// Both kinds, in reporting order.
    pub const ALL: [Self; 2] = [Self::Control, Self::Method];

    /// CSV column name, also the lower-case prefix of output files.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Control => "control",
            Self::Method => "method",
        }
    }

    /// Capitalised name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Control => "Control",
            Self::Method => "Method",
        }
    }
}

impl fmt::Display for CoverageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One sample of a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageRow {
    /// Interactions performed so far.
    pub interaction: f64,
    /// Interface coverage percentage.
    pub control: f64,
    /// Method coverage percentage.
    pub method: f64,
}

impl CoverageRow {
    /// Value of the `kind` column.
    #[must_use]
    pub const fn value(&self, kind: CoverageKind) -> f64 {
        match kind {
            CoverageKind::Control => self.control,
            CoverageKind::Method => self.method,
        }
    }
}

/// A validated coverage log.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CoverageTable {
    /// Rows in file order.
    pub rows: Vec<CoverageRow>,
}

impl CoverageTable {
    /// `(interaction, kind)` points in file order.
    #[must_use]
    pub fn series(&self, kind: CoverageKind) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|r| (r.interaction, r.value(kind)))
            .collect()
    }

    /// Largest value of the `kind` column; `None` for an empty log.
    #[must_use]
    pub fn max(&self, kind: CoverageKind) -> Option<f64> {
        self.rows.iter().map(|r| r.value(kind)).reduce(f64::max)
    }
}

/// Why a coverage log was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidCsv {
    /// The file or a record could not be read.
    Unreadable(String),
    /// A required column is missing from the header.
    MissingColumn(&'static str),
    /// A cell is not a floating-point number.
    NotNumeric {
        /// 1-based data row (header excluded).
        row: usize,
        /// Column name.
        column: &'static str,
        /// Offending cell text.
        value: String,
    },
}

impl fmt::Display for InvalidCsv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unreadable(e) => write!(f, "unreadable: {e}"),
            Self::MissingColumn(c) => write!(f, "missing column '{c}'"),
            Self::NotNumeric { row, column, value } => {
                write!(f, "row {row}: '{value}' in column '{column}' is not a number")
            }
        }
    }
}

impl std::error::Error for InvalidCsv {}

/// What: Parse and validate a coverage log.
///
/// Inputs:
/// - `reader`: CSV source with a header row.
///
/// Output:
/// - The table, or the first reason the log is invalid.
///
/// Details:
/// - Extra columns are ignored; cells are trimmed before parsing.
///
/// # Errors
/// - `InvalidCsv` when a required column is missing, a record cannot be read, or
///   any required cell fails to parse as `f64`.
pub fn parse_coverage_csv<R: Read>(reader: R) -> Result<CoverageTable, InvalidCsv> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| InvalidCsv::Unreadable(e.to_string()))?
        .clone();
    let position = |name: &'static str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(InvalidCsv::MissingColumn(name))
    };
    let columns = [
        (INTERACTION_COLUMN, position(INTERACTION_COLUMN)?),
        (CoverageKind::Control.column(), position(CoverageKind::Control.column())?),
        (CoverageKind::Method.column(), position(CoverageKind::Method.column())?),
    ];

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| InvalidCsv::Unreadable(e.to_string()))?;
        let mut values = [0.0_f64; 3];
        for (slot, (column, idx)) in values.iter_mut().zip(columns) {
            let cell = record.get(idx).unwrap_or_default();
            *slot = cell.parse::<f64>().map_err(|_| InvalidCsv::NotNumeric {
                row: i + 1,
                column,
                value: cell.to_string(),
            })?;
        }
        rows.push(CoverageRow {
            interaction: values[0],
            control: values[1],
            method: values[2],
        });
    }
    Ok(CoverageTable { rows })
}

/// What: Load a coverage log, logging one error line if it is rejected.
///
/// Inputs:
/// - `path`: CSV file.
///
/// Output:
/// - `Some(table)` for a valid log, `None` otherwise.
#[must_use]
pub fn load_coverage(path: &Path) -> Option<CoverageTable> {
    let parsed = std::fs::File::open(path)
        .map_err(|e| InvalidCsv::Unreadable(e.to_string()))
        .and_then(parse_coverage_csv);
    match parsed {
        Ok(table) => Some(table),
        Err(reason) => {
            tracing::error!(file = %path.display(), reason = %reason, "Invalid data in coverage file");
            None
        }
    }
}

/// What: Report whether a coverage log fails the schema check.
///
/// Inputs:
/// - `path`: CSV file.
///
/// Output:
/// - `true` when the log is rejected (one error line is logged).
#[must_use]
pub fn invalid_csv(path: &Path) -> bool {
    load_coverage(path).is_none()
}
