use calamine::{open_workbook_auto, Data, Range, Reader};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::DataConfig;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("cannot parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("column \"{column}\" not found (columns: {available:?})")]
    MissingColumn { column: String, available: Vec<String> },
}

/// Displacement and load values, one entry per kept spreadsheet row.
///
/// Both vectors always have the same length and hold only finite values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSeries {
    displacement: Vec<f64>,
    load: Vec<f64>,
}

impl DataSeries {
    /// Builds a series from row pairs, skipping any pair with a missing side.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
    {
        let mut series = Self::default();
        for row in rows {
            if let (Some(displacement), Some(load)) = row {
                if displacement.is_finite() && load.is_finite() {
                    series.displacement.push(displacement);
                    series.load.push(load);
                }
            }
        }
        series
    }

    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    pub fn displacement(&self) -> &[f64] {
        &self.displacement
    }

    pub fn load(&self) -> &[f64] {
        &self.load
    }

    pub fn displacement_at(&self, index: usize) -> Option<f64> {
        self.displacement.get(index).copied()
    }

    pub fn load_at(&self, index: usize) -> Option<f64> {
        self.load.get(index).copied()
    }

    /// `(min, max)` of the load values, `None` when empty.
    pub fn load_range(&self) -> Option<(f64, f64)> {
        let first = *self.load.first()?;
        Some(self.load.iter().fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))))
    }
}

/// A header row plus already-coerced cells.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<f64>>>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    fn cell(&self, row: usize, column: usize) -> Option<f64> {
        self.rows.get(row).and_then(|r| r.get(column)).copied().flatten()
    }
}

/// Reads the first sheet of `path` and extracts the displacement/load pair.
pub fn load_series(path: &Path, config: &DataConfig) -> Result<DataSeries, LoadError> {
    let table = read_table(path)?;
    log::debug!("Spreadsheet columns: {:?}", table.headers);

    let series = select_series(&table, config)?;
    log::info!(
        "Loaded {} data rows from {} ({} rows dropped)",
        series.len(),
        path.display(),
        table.rows.len() - series.len()
    );
    Ok(series)
}

/// Picks the displacement and load columns out of a table.
pub fn select_series(table: &Table, config: &DataConfig) -> Result<DataSeries, LoadError> {
    let displacement_column = if table.column_count() > config.displacement_column {
        config.displacement_column
    } else {
        config.fallback_displacement_column
    };

    let load_column = table
        .headers
        .iter()
        .position(|h| h == &config.load_column)
        .ok_or_else(|| LoadError::MissingColumn {
            column: config.load_column.clone(),
            available: table.headers.clone(),
        })?;

    log::debug!(
        "Using column {} ({:?}) as displacement and column {} as load",
        displacement_column,
        table.headers.get(displacement_column),
        load_column
    );

    Ok(DataSeries::from_rows((0..table.rows.len()).map(|row| {
        (table.cell(row, displacement_column), table.cell(row, load_column))
    })))
}

fn read_table(path: &Path) -> Result<Table, LoadError> {
    if let Err(e) = std::fs::metadata(path) {
        return Err(LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        });
    }

    let is_csv = path
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        read_csv_table(path)
    } else {
        read_workbook_table(path)
    }
}

fn read_workbook_table(path: &Path) -> Result<Table, LoadError> {
    let parse_error = |reason: String| LoadError::Parse {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| parse_error(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| parse_error("workbook has no sheets".to_string()))?
        .map_err(|e| parse_error(e.to_string()))?;

    table_from_range(&range).ok_or_else(|| parse_error("first sheet is empty".to_string()))
}

/// Builds a table whose column indices count from sheet column A.
///
/// Calamine ranges start at the first used cell, so leading empty columns
/// are padded back in.
fn table_from_range(range: &Range<Data>) -> Option<Table> {
    let leading = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let mut rows = range.rows();
    let headers: Vec<String> = std::iter::repeat(String::new())
        .take(leading)
        .chain(rows.next()?.iter().map(|cell| cell.to_string().trim().to_string()))
        .collect();

    let rows = rows
        .map(|row| std::iter::repeat(None).take(leading).chain(row.iter().map(coerce_cell)).collect())
        .collect();
    Some(Table { headers, rows })
}

fn read_csv_table(path: &Path) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let parse_error = |e: csv::Error| LoadError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let headers: Vec<String> = reader
        .headers()
        .map_err(parse_error)?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        rows.push(record.iter().map(coerce_text).collect());
    }

    Ok(Table { headers, rows })
}

/// Numeric coercion of a workbook cell; anything non-numeric is missing.
pub fn coerce_cell(cell: &Data) -> Option<f64> {
    let value = match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => coerce_text(s),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

pub fn coerce_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
