use std::collections::HashMap;

/// Rows inspected when looking for a header.
pub const HEADER_SCAN_ROWS: usize = 50;

/// Split a whitespace-delimited table into rows of cells.
/// Blank lines and lines starting with `#` are skipped.
pub fn split_whitespace_rows(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect()
}

/// Split delimited text (CSV and friends) into rows of cells.
/// Malformed records are skipped.
pub fn split_delimited_rows(text: &str, delimiter: u8) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                if row.iter().any(|c| !c.is_empty()) {
                    rows.push(row);
                }
            }
            Err(e) => {
                tracing::debug!("Skipping malformed record: {e}");
                continue;
            }
        }
    }
    rows
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
pub fn decode_text(content: Vec<u8>) -> String {
    match String::from_utf8(content) {
        Ok(text) => text,
        // Latin-1: each byte maps to the same code point
        Err(e) => e.into_bytes().iter().map(|&b| b as char).collect(),
    }
}

/// Most common row width.
pub fn dominant_width(rows: &[Vec<String>]) -> usize {
    let mut counts: HashMap<usize, usize> = HashMap::new();
    for row in rows.iter().take(HEADER_SCAN_ROWS) {
        *counts.entry(row.len()).or_insert(0) += 1;
    }
    // Ties go to the wider row so a short title line never wins.
    counts
        .into_iter()
        .max_by_key(|&(len, c)| (c, len))
        .map(|(len, _)| len)
        .unwrap_or(0)
}

fn is_numeric(cell: &str) -> bool {
    cell.trim().parse::<f64>().is_ok()
}

/// Find the header row of a table.
///
/// The header is the last row of the dominant width with no numeric or
/// empty cell that comes before the first fully numeric row. Returns `None`
/// when the table starts directly with data.
pub fn detect_header(rows: &[Vec<String>]) -> Option<usize> {
    let width = dominant_width(rows);
    let scan = &rows[..rows.len().min(HEADER_SCAN_ROWS)];

    let first_data = scan
        .iter()
        .position(|row| row.len() == width && row.iter().all(|c| is_numeric(c)))
        .unwrap_or(scan.len());

    (0..first_data).rev().find(|&i| {
        let row = &scan[i];
        row.len() == width
            && row
                .iter()
                .all(|c| !c.trim().is_empty() && !is_numeric(c))
    })
}
