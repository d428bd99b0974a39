//! Flattening of nested module payloads into rectangular tables.
//!
//! The upstream API wraps most numeric fields in `{ "raw": …, "fmt": …,
//! "longFmt": … }` objects. Only the raw value is useful downstream, so the
//! display renderings are dropped and the raw column takes the field's name.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::core::YsError;

/// A rectangular table produced by normalizing one report module.
///
/// Column names are unique, snake_case and carry no path separators. Cells
/// are raw JSON values; absent cells are `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// The ordered column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, each cell aligned with [`Table::columns`].
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// `true` when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All values of one column, in row order.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// A single cell, addressed by row index and column name.
    #[must_use]
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| &r[idx])
    }
}

/// Normalize one module payload into a [`Table`].
///
/// Accepts a single JSON object (one row) or an array of objects (one row
/// per element). Nested objects are flattened into dot-joined paths, display
/// columns are discarded, and the surviving names are converted to
/// snake_case. Rows missing a column present on other rows are padded with
/// `null`.
///
/// The function is pure and idempotent over its input.
///
/// # Errors
///
/// Returns [`YsError::ModuleFormat`] when the payload is neither an object
/// nor an array of objects.
pub fn normalize(module: &Value) -> Result<Table, YsError> {
    let flat_rows: Vec<Vec<(String, Value)>> = match module {
        Value::Object(obj) => vec![flatten_object(obj)],
        Value::Array(items) => {
            let mut rows = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                let Value::Object(obj) = item else {
                    return Err(YsError::ModuleFormat(format!(
                        "expected an object at row {i}, got {}",
                        type_name(item)
                    )));
                };
                rows.push(flatten_object(obj));
            }
            rows
        }
        other => {
            return Err(YsError::ModuleFormat(format!(
                "expected an object or an array of objects, got {}",
                type_name(other)
            )));
        }
    };

    let mut columns: Vec<String> = Vec::new();
    let mut row_maps: Vec<HashMap<String, Value>> = Vec::with_capacity(flat_rows.len());

    for flat in flat_rows {
        let mut cells: HashMap<String, Value> = HashMap::with_capacity(flat.len());
        for (path, value) in flat {
            let Some(name) = column_name(&path) else {
                continue; // display-only column
            };
            // First occurrence of a name wins within a row.
            if cells.contains_key(&name) {
                continue;
            }
            if !columns.contains(&name) {
                columns.push(name.clone());
            }
            cells.insert(name, value);
        }
        row_maps.push(cells);
    }

    let rows = row_maps
        .into_iter()
        .map(|mut cells| {
            columns
                .iter()
                .map(|c| cells.remove(c).unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Table { columns, rows })
}

/// Flatten one object into `(dot.joined.path, leaf)` pairs.
///
/// Uses an explicit worklist so payload nesting depth cannot exhaust the
/// stack. Array leaves are kept verbatim: repeated sub-records are rows of
/// their own module, not columns of this one. Empty objects contribute
/// nothing.
fn flatten_object(obj: &Map<String, Value>) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    let mut work: Vec<(String, &Value)> = Vec::new();

    for (key, value) in obj.iter().rev() {
        work.push((key.clone(), value));
    }

    while let Some((path, value)) = work.pop() {
        match value {
            Value::Object(inner) => {
                for (key, child) in inner.iter().rev() {
                    work.push((format!("{path}.{key}"), child));
                }
            }
            leaf => out.push((path, leaf.clone())),
        }
    }

    out
}

/// Derive the final column name for a flattened path, or `None` when the
/// path names a display-only rendering.
fn column_name(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = path.split('.').collect();
    match segments.last() {
        Some(&"fmt" | &"longFmt") => return None,
        Some(&"raw") if segments.len() > 1 => {
            segments.pop();
        }
        _ => {}
    }
    Some(
        segments
            .iter()
            .map(|s| snake_case(s))
            .collect::<Vec<_>>()
            .join("_"),
    )
}

/// camelCase → snake_case; already-snake input passes through unchanged.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

const fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
