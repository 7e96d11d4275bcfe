use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::{
    Result,
    error::XlsxExportError,
    source::{SourceValue, ValueKind},
    workbook::style::{
        alignment::Alignment, border::Border, fill::Fill, font::Font, number::NumberingFormat,
    },
};

/// `NaiveDate::num_days_from_ce` of 1899-12-30, day zero of the 1900 date
/// system.
const SERIAL_EPOCH_DAYS_FROM_CE: i32 = 693_594;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellDataType {
    Number,
    Text,
    Boolean,
    Date,
}

/// Maps a source kind onto the cell data type it renders as.
pub fn infer_type(kind: &ValueKind) -> Result<CellDataType> {
    match kind {
        ValueKind::Int16
        | ValueKind::Int32
        | ValueKind::Int64
        | ValueKind::Float32
        | ValueKind::Float64
        | ValueKind::Decimal => Ok(CellDataType::Number),
        ValueKind::String | ValueKind::Char => Ok(CellDataType::Text),
        ValueKind::Boolean => Ok(CellDataType::Boolean),
        ValueKind::Date | ValueKind::DateTime => Ok(CellDataType::Date),
        ValueKind::Other(name) => Err(XlsxExportError::UnsupportedType(name.clone())),
    }
}

/// Days since 1899-12-30.
pub fn date_serial(date: NaiveDate) -> i64 {
    (date.num_days_from_ce() - SERIAL_EPOCH_DAYS_FROM_CE) as i64
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    let text = text.trim();
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(dt.date());
        }
    }
    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
            return Ok(d);
        }
    }
    Err(XlsxExportError::InvalidDate(text.to_string()))
}

/// Decimals arrive as text and are written verbatim once they parse.
fn decimal(text: &str) -> Result<String> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(trimmed.to_string()),
        _ => Err(XlsxExportError::InvalidNumber(text.to_string())),
    }
}

/// A logical cell before style resolution: its display value, data type and
/// whichever formatting facets the author set.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub value: String,
    pub data_type: CellDataType,
    pub font: Option<Font>,
    pub fill: Option<Fill>,
    pub border: Option<Border>,
    pub number_format: Option<NumberingFormat>,
    pub alignment: Option<Alignment>,
}

impl Cell {
    pub fn new(value: impl Into<String>, data_type: CellDataType) -> Self {
        Cell {
            value: value.into(),
            data_type,
            font: None,
            fill: None,
            border: None,
            number_format: None,
            alignment: None,
        }
    }

    /// Builds a cell from the value's own runtime kind. Nulls become empty
    /// text.
    pub fn from_value(value: &SourceValue) -> Result<Self> {
        match value.kind() {
            Some(kind) => Cell::from_column(&kind, value),
            None => Ok(Cell::new("", CellDataType::Text)),
        }
    }

    /// Builds a cell typed by its column's declared kind.
    ///
    /// Date cells hold the date serial with the time of day dropped and get
    /// the built-in date format attached.
    pub fn from_column(kind: &ValueKind, value: &SourceValue) -> Result<Self> {
        let data_type = infer_type(kind)?;
        let mut cell = Cell::new(String::new(), data_type);

        if data_type == CellDataType::Date {
            cell.number_format = Some(NumberingFormat::date());
            let date = match value {
                SourceValue::Null => return Ok(cell),
                SourceValue::Date(d) => *d,
                SourceValue::DateTime(dt) => dt.date(),
                SourceValue::Text(t) if t.trim().is_empty() => return Ok(cell),
                SourceValue::Text(t) => parse_date(t)?,
                other => return Err(XlsxExportError::InvalidDate(format!("{other:?}"))),
            };
            cell.value = date_serial(date).to_string();
            return Ok(cell);
        }

        cell.value = match (data_type, value) {
            (_, SourceValue::Null) => String::new(),
            (_, SourceValue::Other(name)) => {
                return Err(XlsxExportError::UnsupportedType(name.clone()));
            }
            (CellDataType::Number, SourceValue::I16(v)) => v.to_string(),
            (CellDataType::Number, SourceValue::I32(v)) => v.to_string(),
            (CellDataType::Number, SourceValue::I64(v)) => v.to_string(),
            (CellDataType::Number, SourceValue::F32(v)) if v.is_finite() => v.to_string(),
            (CellDataType::Number, SourceValue::F64(v)) if v.is_finite() => v.to_string(),
            (CellDataType::Number, v @ (SourceValue::F32(_) | SourceValue::F64(_))) => {
                return Err(XlsxExportError::InvalidNumber(format!("{v:?}")));
            }
            (CellDataType::Number, SourceValue::Decimal(v)) => decimal(v)?,
            (CellDataType::Text, SourceValue::Text(v)) => v.clone(),
            (CellDataType::Text, SourceValue::Char(c)) => c.to_string(),
            (CellDataType::Boolean, SourceValue::Bool(b)) => {
                String::from(if *b { "1" } else { "0" })
            }
            (_, other) => {
                return Err(XlsxExportError::UnsupportedType(format!(
                    "{other:?} in {kind:?} column"
                )));
            }
        };
        Ok(cell)
    }

    pub fn has_formatting(&self) -> bool {
        self.alignment.is_some()
            || self.font.is_some()
            || self.fill.is_some()
            || self.border.is_some()
            || self.number_format.is_some()
    }

    pub fn set_number_format_code(&mut self, code: &str) {
        self.number_format = Some(NumberingFormat::from_code(code));
    }

    pub fn set_number_format_id(&mut self, id: u32) {
        self.number_format = Some(NumberingFormat::with_id(id));
    }
}

/// A cell as handed to serialization: value, type and cell format index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCell {
    pub value: String,
    pub data_type: CellDataType,
    pub style: Option<u32>,
}
