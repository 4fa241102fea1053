//! Attribute, zone and term file readers.
//!
//! Attribute files are whitespace-delimited tables: a header line naming
//! each column, then one row per node in node order. `NA` (any case)
//! marks a missing value in every kind. Set attributes are written as
//! comma-delimited element lists with no internal whitespace, `NONE` for
//! the empty set; the universe of a set column is one more than the
//! largest element seen anywhere in it.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use bitvec::vec::BitVec;

use crate::graph::{AttributeColumn, CitationTerms, SnowballZones};

use super::error::InputError;

/// A parsed whitespace-delimited table.
struct Table {
    headers: Vec<String>,
    /// One entry per node: the row's tokens, parallel to `headers`.
    rows: Vec<Vec<String>>,
    /// 1-based line number of each row, for diagnostics.
    lines: Vec<usize>,
}

fn read_table(path: &Path, expected_rows: u32) -> Result<Table, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(BufReader::new(file), path, expected_rows)
}

fn parse_table<R: BufRead>(
    reader: R,
    path: &Path,
    expected_rows: u32,
) -> Result<Table, InputError> {
    let mut headers = Vec::new();
    let mut rows = Vec::new();
    let mut lines = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
        if tokens.is_empty() {
            continue;
        }
        if headers.is_empty() {
            headers = tokens;
            continue;
        }
        if tokens.len() != headers.len() {
            return Err(InputError::Syntax {
                path: path.to_path_buf(),
                line: line_no,
                message: format!(
                    "row has {} values but the header names {} columns",
                    tokens.len(),
                    headers.len()
                ),
            });
        }
        rows.push(tokens);
        lines.push(line_no);
    }
    if headers.is_empty() {
        return Err(InputError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            message: "missing header line".to_owned(),
        });
    }
    if rows.len() != expected_rows as usize {
        return Err(InputError::NodeCount {
            path: path.to_path_buf(),
            expected: expected_rows,
            found: rows.len(),
        });
    }
    Ok(Table {
        headers,
        rows,
        lines,
    })
}

fn is_na(token: &str) -> bool {
    token.eq_ignore_ascii_case("na")
}

/// Reads a binary attribute file: one column per attribute, values `0`,
/// `1` or `NA`.
///
/// # Errors
/// Returns [`InputError`] for unreadable files, malformed rows or values.
pub fn read_binary_attributes(
    path: &Path,
    node_count: u32,
) -> Result<Vec<AttributeColumn<Option<bool>>>, InputError> {
    let table = read_table(path, node_count)?;
    parse_columns(&table, path, |token| match token {
        "0" => Some(Some(false)),
        "1" => Some(Some(true)),
        _ if is_na(token) => Some(None),
        _ => None,
    })
}

/// Reads a categorical attribute file: non-negative integers or `NA`.
///
/// # Errors
/// Returns [`InputError`] for unreadable files, malformed rows or values.
pub fn read_categorical_attributes(
    path: &Path,
    node_count: u32,
) -> Result<Vec<AttributeColumn<Option<u32>>>, InputError> {
    let table = read_table(path, node_count)?;
    parse_columns(&table, path, |token| {
        if is_na(token) {
            Some(None)
        } else {
            token.parse::<u32>().ok().map(Some)
        }
    })
}

/// Reads a continuous attribute file: C-style floating point or `NA`
/// (stored as NaN).
///
/// # Errors
/// Returns [`InputError`] for unreadable files, malformed rows or values.
pub fn read_continuous_attributes(
    path: &Path,
    node_count: u32,
) -> Result<Vec<AttributeColumn<f64>>, InputError> {
    let table = read_table(path, node_count)?;
    parse_columns(&table, path, |token| {
        if is_na(token) {
            Some(f64::NAN)
        } else {
            token.parse::<f64>().ok()
        }
    })
}

/// Reads a set attribute file: comma-delimited element lists, `NONE` for
/// the empty set, `NA` for a missing value. Every column's universe is
/// sized to its largest element.
///
/// # Errors
/// Returns [`InputError`] for unreadable files, malformed rows or values.
pub fn read_set_attributes(
    path: &Path,
    node_count: u32,
) -> Result<Vec<AttributeColumn<Option<BitVec>>>, InputError> {
    let table = read_table(path, node_count)?;
    // First pass: parse element lists and find each column's universe.
    let mut parsed: Vec<Vec<Option<Vec<u32>>>> = vec![Vec::new(); table.headers.len()];
    let mut universe: Vec<u32> = vec![0; table.headers.len()];
    for (row, &line) in table.rows.iter().zip(&table.lines) {
        for (column, token) in row.iter().enumerate() {
            let value = if is_na(token) {
                None
            } else if token.eq_ignore_ascii_case("none") {
                Some(Vec::new())
            } else {
                let mut elements = Vec::new();
                for raw in token.split(',') {
                    let element: u32 =
                        raw.parse().map_err(|_| InputError::Syntax {
                            path: path.to_path_buf(),
                            line,
                            message: format!(
                                "`{token}` is not a set value (expected elements, `NONE` or `NA`)"
                            ),
                        })?;
                    universe[column] = universe[column].max(element + 1);
                    elements.push(element);
                }
                Some(elements)
            };
            parsed[column].push(value);
        }
    }
    // Second pass: materialise fixed-width bit vectors.
    let columns = table
        .headers
        .iter()
        .zip(parsed)
        .zip(&universe)
        .map(|((name, values), &width)| {
            let values = values
                .into_iter()
                .map(|value| {
                    value.map(|elements| {
                        let mut bits = BitVec::repeat(false, width as usize);
                        for element in elements {
                            bits.set(element as usize, true);
                        }
                        bits
                    })
                })
                .collect();
            AttributeColumn::new(name.clone(), values)
        })
        .collect();
    Ok(columns)
}

fn parse_columns<T: Clone>(
    table: &Table,
    path: &Path,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<AttributeColumn<T>>, InputError> {
    let mut columns: Vec<Vec<T>> = vec![Vec::new(); table.headers.len()];
    for (row, &line) in table.rows.iter().zip(&table.lines) {
        for (column, token) in row.iter().enumerate() {
            let value = parse(token).ok_or_else(|| InputError::Syntax {
                path: path.to_path_buf(),
                line,
                message: format!("invalid value `{token}` in column `{}`", table.headers[column]),
            })?;
            columns[column].push(value);
        }
    }
    Ok(table
        .headers
        .iter()
        .zip(columns)
        .map(|(name, values)| AttributeColumn::new(name.clone(), values))
        .collect())
}

/// Reads a snowball zone file: a single `zone` column of wave numbers,
/// contiguous from zero.
///
/// # Errors
/// Returns [`InputError`] for format violations or a gap in the zone
/// numbering.
pub fn read_zones(path: &Path, node_count: u32) -> Result<SnowballZones, InputError> {
    let values = read_single_column(path, node_count, "zone")?;
    let max_zone = values.iter().copied().max().unwrap_or(0);
    for zone in 0..=max_zone {
        if !values.contains(&zone) {
            return Err(InputError::NonContiguousZones {
                path: path.to_path_buf(),
                missing: zone,
            });
        }
    }
    Ok(SnowballZones::new(values))
}

/// Reads a citation term file: a single `term` column of period numbers.
///
/// # Errors
/// Returns [`InputError`] for format violations.
pub fn read_terms(path: &Path, node_count: u32) -> Result<CitationTerms, InputError> {
    let values = read_single_column(path, node_count, "term")?;
    Ok(CitationTerms::new(values))
}

fn read_single_column(
    path: &Path,
    node_count: u32,
    header: &str,
) -> Result<Vec<u32>, InputError> {
    let table = read_table(path, node_count)?;
    if table.headers.len() != 1 || !table.headers[0].eq_ignore_ascii_case(header) {
        return Err(InputError::Syntax {
            path: path.to_path_buf(),
            line: 1,
            message: format!("expected a single `{header}` column"),
        });
    }
    let mut values = Vec::with_capacity(table.rows.len());
    for (row, &line) in table.rows.iter().zip(&table.lines) {
        let value: u32 = row[0].parse().map_err(|_| InputError::Syntax {
            path: path.to_path_buf(),
            line,
            message: format!("`{}` is not a non-negative integer", row[0]),
        })?;
        values.push(value);
    }
    Ok(values)
}
