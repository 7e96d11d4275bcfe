//! Tabular input for worksheet assembly.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{Result, error::XlsxExportError};

/// Declared type of a source column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Decimal,
    String,
    Char,
    Boolean,
    Date,
    DateTime,
    /// Any other runtime type, carried by name.
    Other(String),
}

/// A single value read from a source.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceValue {
    Null,
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    /// Decimal kept in its textual form.
    Decimal(String),
    Text(String),
    Char(char),
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Other(String),
}

impl SourceValue {
    /// The runtime kind of this value; `None` for nulls.
    pub fn kind(&self) -> Option<ValueKind> {
        let kind = match self {
            SourceValue::Null => return None,
            SourceValue::I16(_) => ValueKind::Int16,
            SourceValue::I32(_) => ValueKind::Int32,
            SourceValue::I64(_) => ValueKind::Int64,
            SourceValue::F32(_) => ValueKind::Float32,
            SourceValue::F64(_) => ValueKind::Float64,
            SourceValue::Decimal(_) => ValueKind::Decimal,
            SourceValue::Text(_) => ValueKind::String,
            SourceValue::Char(_) => ValueKind::Char,
            SourceValue::Bool(_) => ValueKind::Boolean,
            SourceValue::Date(_) => ValueKind::Date,
            SourceValue::DateTime(_) => ValueKind::DateTime,
            SourceValue::Other(name) => ValueKind::Other(name.clone()),
        };
        Some(kind)
    }
}

impl From<&str> for SourceValue {
    fn from(v: &str) -> Self {
        SourceValue::Text(v.to_string())
    }
}

impl From<String> for SourceValue {
    fn from(v: String) -> Self {
        SourceValue::Text(v)
    }
}

impl From<i32> for SourceValue {
    fn from(v: i32) -> Self {
        SourceValue::I32(v)
    }
}

impl From<i64> for SourceValue {
    fn from(v: i64) -> Self {
        SourceValue::I64(v)
    }
}

impl From<f64> for SourceValue {
    fn from(v: f64) -> Self {
        SourceValue::F64(v)
    }
}

impl From<bool> for SourceValue {
    fn from(v: bool) -> Self {
        SourceValue::Bool(v)
    }
}

impl From<NaiveDate> for SourceValue {
    fn from(v: NaiveDate) -> Self {
        SourceValue::Date(v)
    }
}

impl From<NaiveDateTime> for SourceValue {
    fn from(v: NaiveDateTime) -> Self {
        SourceValue::DateTime(v)
    }
}

impl<T: Into<SourceValue>> From<Option<T>> for SourceValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(SourceValue::Null)
    }
}

/// Row-major tabular data with named, typed columns.
pub trait DataSource {
    fn column_names(&self) -> Vec<&str>;

    fn column_kind(&self, name: &str) -> Option<&ValueKind>;

    fn column_index(&self, name: &str) -> Option<usize> {
        self.column_names().iter().position(|c| *c == name)
    }

    fn row_count(&self) -> usize;

    /// Values of row `row` in column order.
    fn row(&self, row: usize) -> &[SourceValue];
}

/// In-memory [`DataSource`].
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<(String, ValueKind)>,
    rows: Vec<Vec<SourceValue>>,
}

impl DataTable {
    pub fn new() -> Self {
        DataTable::default()
    }

    pub fn add_column(&mut self, name: &str, kind: ValueKind) -> Result<()> {
        if self.columns.iter().any(|(n, _)| n == name) {
            return Err(XlsxExportError::AlreadyExists(format!(
                "Column '{name}' already exists"
            )));
        }
        self.columns.push((name.to_string(), kind));
        for row in &mut self.rows {
            row.push(SourceValue::Null);
        }
        Ok(())
    }

    /// Appends a row, padding missing trailing values with nulls.
    pub fn push_row<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<SourceValue>,
    {
        let mut row: Vec<SourceValue> = values.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), SourceValue::Null);
        self.rows.push(row);
    }
}

impl DataSource for DataTable {
    fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(n, _)| n.as_str()).collect()
    }

    fn column_kind(&self, name: &str) -> Option<&ValueKind> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, k)| k)
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn row(&self, row: usize) -> &[SourceValue] {
        &self.rows[row]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_the_column_count() {
        let mut dt = DataTable::new();
        dt.add_column("Integer", ValueKind::Int32).unwrap();
        dt.add_column("String", ValueKind::String).unwrap();
        dt.push_row([7]);
        assert_eq!(dt.row(0), &[SourceValue::I32(7), SourceValue::Null]);
        assert_eq!(dt.column_index("String"), Some(1));
    }

    #[test]
    fn duplicate_column_is_rejected() {
        let mut dt = DataTable::new();
        dt.add_column("A", ValueKind::String).unwrap();
        assert!(matches!(
            dt.add_column("A", ValueKind::Int32),
            Err(XlsxExportError::AlreadyExists(_))
        ));
    }

    #[test]
    fn options_become_nulls() {
        assert_eq!(SourceValue::from(None::<i32>), SourceValue::Null);
        assert_eq!(SourceValue::from(Some("x")).kind(), Some(ValueKind::String));
    }
}
