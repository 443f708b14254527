//! ReportResult: the uniform tabular output of every catalog operation.
//!
//! Column order and names are fixed per report. Rows keep the order the
//! store returned them in. A result is produced fresh per call and owned
//! by the caller; nothing here is ever persisted.

use crate::{
    error::{PulseError, PulseResult},
    format::indian_number_format,
};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Null,
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Decimal(d) => write!(f, "{d}"),
            Value::Text(s) => f.write_str(s),
            Value::Null => Ok(()),
        }
    }
}

impl From<rusqlite::types::ValueRef<'_>> for Value {
    fn from(raw: rusqlite::types::ValueRef<'_>) -> Self {
        use rusqlite::types::ValueRef;
        match raw {
            ValueRef::Null => Value::Null,
            ValueRef::Integer(i) => Value::Integer(i),
            ValueRef::Real(r) => Value::Decimal(r),
            ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
            // The warehouse holds no blobs; surface them as text rather than drop them.
            ValueRef::Blob(b) => Value::Text(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportResult {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

/// Borrowed view of one row, addressable by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    values: &'a [Value],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Value> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| &self.values[i])
    }

    pub fn values(&self) -> &'a [Value] {
        self.values
    }

    /// (column, value) pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        let columns = self.columns;
        let values = self.values;
        columns.iter().map(String::as_str).zip(values.iter())
    }
}

impl ReportResult {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Panics if the arity does not match the column list,
    /// which would mean the store handed back a malformed result set.
    pub fn push_row(&mut self, values: Vec<Value>) {
        assert_eq!(
            values.len(),
            self.columns.len(),
            "row arity {} does not match {} columns",
            values.len(),
            self.columns.len()
        );
        self.rows.push(values);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|values| Row {
            columns: &self.columns,
            values,
        })
    }

    pub fn column_index(&self, column: &str) -> PulseResult<usize> {
        self.columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| PulseError::UnknownColumn {
                column: column.to_string(),
            })
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, column: &str) -> PulseResult<Vec<&Value>> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Numeric sum of a column. Text and null cells count as zero.
    pub fn sum_column(&self, column: &str) -> PulseResult<f64> {
        Ok(self
            .column(column)?
            .into_iter()
            .filter_map(Value::as_f64)
            .sum())
    }

    /// Replace every numeric cell of `column` with its Indian-numbering text.
    /// Used for display tables; the raw result is left to the caller to keep.
    pub fn format_column(&mut self, column: &str) -> PulseResult<()> {
        let idx = self.column_index(column)?;
        for row in &mut self.rows {
            if let Some(n) = row[idx].as_f64() {
                row[idx] = Value::Text(indian_number_format(n));
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> PulseResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Serialises as an array of objects whose keys follow column order.
impl Serialize for ReportResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in self.rows() {
            seq.serialize_element(&RowObject(row))?;
        }
        seq.end()
    }
}

struct RowObject<'a>(Row<'a>);

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.values.len()))?;
        for (k, v) in self.0.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
