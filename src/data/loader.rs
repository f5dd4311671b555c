use std::path::Path;
use crate::data::parser;

/// Layout of a text table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Columns separated by runs of spaces or tabs.
    Whitespace,
    /// Comma-separated values.
    Csv,
}

/// Result of loading a data file: column names and column data as strings
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub columns: Vec<String>,
    pub column_data: Vec<Vec<String>>,  // column-major: column_data[col_idx][row_idx]
    pub row_count: usize,
}

/// The numeric x and y columns picked out of a table.
#[derive(Debug, Clone)]
pub struct XyColumns {
    pub x_name: String,
    pub y_name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Rows skipped because either cell was not a finite number.
    pub dropped: usize,
}

/// Load a band table. `.csv` and Excel files are recognised by extension;
/// everything else is read as a whitespace-delimited text table.
pub fn load_file(path: &Path) -> Result<LoadedData, String> {
    let ext = path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => load_text(path, TableFormat::Csv),
        "xls" | "xlsx" | "xlsm" | "ods" => load_excel(path),
        _ => load_text(path, TableFormat::Whitespace),
    }
}

fn load_text(path: &Path, format: TableFormat) -> Result<LoadedData, String> {
    let content = std::fs::read(path).map_err(|e| format!("Cannot read file: {e}"))?;
    load_str(&parser::decode_text(content), format)
}

/// Parse an in-memory table.
pub fn load_str(text: &str, format: TableFormat) -> Result<LoadedData, String> {
    let rows = match format {
        TableFormat::Whitespace => parser::split_whitespace_rows(text),
        TableFormat::Csv => parser::split_delimited_rows(text, b','),
    };
    build_columns(rows)
}

fn load_excel(path: &Path) -> Result<LoadedData, String> {
    use calamine::{open_workbook_auto, Reader, Data};

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| format!("Cannot open Excel file: {e}"))?;

    let sheet_name = workbook.sheet_names().first()
        .ok_or("No sheets found")?
        .clone();

    let range = workbook.worksheet_range(&sheet_name)
        .map_err(|e| format!("Cannot read sheet: {e}"))?;

    let rows: Vec<Vec<String>> = range.rows().map(|row| {
        row.iter().map(|cell| {
            match cell {
                Data::Empty => String::new(),
                Data::String(s) => s.trim().to_string(),
                Data::Float(f) => f.to_string(),
                Data::Int(i) => i.to_string(),
                Data::Bool(b) => b.to_string(),
                Data::DateTime(dt) => dt.to_string(),
                Data::DateTimeIso(s) => s.clone(),
                Data::DurationIso(s) => s.clone(),
                Data::Error(e) => format!("{e:?}"),
            }
        }).collect()
    })
    .filter(|row: &Vec<String>| row.iter().any(|c| !c.is_empty()))
    .collect();

    build_columns(rows)
}

fn build_columns(all_rows: Vec<Vec<String>>) -> Result<LoadedData, String> {
    if all_rows.is_empty() {
        return Err("No data found in file".to_string());
    }

    let header_row = parser::detect_header(&all_rows);
    let num_cols = parser::dominant_width(&all_rows);

    let (columns, data_rows) = match header_row {
        Some(h) => {
            let names = all_rows[h].iter().map(|s| s.trim().to_string()).collect();
            (names, &all_rows[h + 1..])
        }
        None => (default_column_names(num_cols), &all_rows[..]),
    };

    if data_rows.is_empty() {
        return Err("No data found after header detection".to_string());
    }

    // Convert to column-major format
    let mut column_data: Vec<Vec<String>> = vec![Vec::new(); num_cols];
    let row_count = data_rows.len();

    for row in data_rows {
        for (col_idx, col_data) in column_data.iter_mut().enumerate() {
            if col_idx < row.len() {
                col_data.push(row[col_idx].clone());
            } else {
                col_data.push(String::new());
            }
        }
    }

    Ok(LoadedData { columns, column_data, row_count })
}

/// `x`, `y`, `col3`, `col4`, ...
fn default_column_names(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| match i {
            0 => "x".to_string(),
            1 => "y".to_string(),
            _ => format!("col{}", i + 1),
        })
        .collect()
}

impl LoadedData {
    /// Resolve a column by exact name, then case-insensitive name, then
    /// 1-based position.
    pub fn column_index(&self, key: &str) -> Result<usize, String> {
        let key = key.trim();
        if let Some(i) = self.columns.iter().position(|c| c == key) {
            return Ok(i);
        }
        if let Some(i) = self.columns.iter().position(|c| c.eq_ignore_ascii_case(key)) {
            return Ok(i);
        }
        match key.parse::<usize>() {
            Ok(n) if n >= 1 && n <= self.columns.len() => Ok(n - 1),
            Ok(n) => Err(format!(
                "Column {n} out of range (table has {} columns)",
                self.columns.len()
            )),
            Err(_) => Err(format!(
                "No column named '{key}' (available: {})",
                self.columns.join(", ")
            )),
        }
    }

    /// Numeric x/y columns, defaulting to the first two. Rows where either
    /// value is missing or not finite are dropped.
    pub fn xy_columns(&self, x_key: Option<&str>, y_key: Option<&str>) -> Result<XyColumns, String> {
        if self.columns.len() < 2 {
            return Err(format!(
                "Need at least 2 columns, found {}",
                self.columns.len()
            ));
        }
        let x_idx = match x_key {
            Some(k) => self.column_index(k)?,
            None => 0,
        };
        let y_idx = match y_key {
            Some(k) => self.column_index(k)?,
            None => 1,
        };
        if x_idx == y_idx {
            return Err(format!("x and y both refer to column '{}'", self.columns[x_idx]));
        }

        let x_all = self.numeric_column(x_idx)?;
        let y_all = self.numeric_column(y_idx)?;

        let mut x = Vec::with_capacity(self.row_count);
        let mut y = Vec::with_capacity(self.row_count);
        for (&xv, &yv) in x_all.iter().zip(y_all.iter()) {
            if xv.is_finite() && yv.is_finite() {
                x.push(xv);
                y.push(yv);
            }
        }
        let dropped = self.row_count - x.len();
        if dropped > 0 {
            tracing::warn!("Skipped {dropped} non-numeric row(s) of {}", self.row_count);
        }

        Ok(XyColumns {
            x_name: self.columns[x_idx].clone(),
            y_name: self.columns[y_idx].clone(),
            x,
            y,
            dropped,
        })
    }

    /// Parse one column as numbers. A column with no numeric cell at all is
    /// an error; a mostly non-numeric one is only logged.
    fn numeric_column(&self, idx: usize) -> Result<Vec<f64>, String> {
        let name = &self.columns[idx];
        let (values, frac) = column_to_f64(&self.column_data[idx]);
        if frac == 0.0 {
            return Err(format!("Column '{name}' has no numeric values"));
        }
        if frac < 0.5 {
            tracing::warn!("Column '{name}' is only {:.0}% numeric", frac * 100.0);
        }
        Ok(values)
    }
}

/// Extract numeric f64 values from a string column.
/// Returns (values, fraction_valid) where invalid entries become NaN.
pub fn column_to_f64(data: &[String]) -> (Vec<f64>, f64) {
    let mut values = Vec::with_capacity(data.len());
    let mut valid = 0usize;
    for s in data {
        match s.trim().parse::<f64>() {
            Ok(v) => {
                values.push(v);
                if v.is_finite() { valid += 1; }
            }
            Err(_) => values.push(f64::NAN),
        }
    }
    let frac = if data.is_empty() { 0.0 } else { valid as f64 / data.len() as f64 };
    (values, frac)
}
