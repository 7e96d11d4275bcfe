//! Worksheet layout and assembly.
//!
//! A [`SheetSpec`] says which source columns to export and how each one is
//! headed, sized and formatted. [`assemble`] walks the source once, turns
//! every value into a [`Cell`], resolves its formatting against the shared
//! [`StyleTable`] and keeps only the resulting cell format index.

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    error::XlsxExportError,
    source::{DataSource, SourceValue, ValueKind},
    workbook::{
        cell::{Cell, CellDataType, ResolvedCell},
        style::{
            StyleTable,
            alignment::{Alignment, HorizontalAlignment},
            border::Border,
            color::Color,
            fill::Fill,
            font::Font,
        },
    },
};

/// Excel's default column width in characters.
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

fn default_column_width() -> f64 {
    DEFAULT_COLUMN_WIDTH
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnNumberFormat {
    /// Built-in or previously registered format ID.
    Id(u32),
    /// Format code; predefined codes are mapped to their built-in ID.
    Code(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Source column name.
    pub field: String,
    /// Header text; the field name when unset.
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default = "default_column_width")]
    pub width: f64,
    #[serde(default)]
    pub number_format: Option<ColumnNumberFormat>,
    #[serde(default)]
    pub border: Option<Border>,
    #[serde(default)]
    pub alignment: Option<Alignment>,
}

impl ColumnSpec {
    pub fn new(field: &str) -> Self {
        ColumnSpec {
            field: field.to_string(),
            header: None,
            width: DEFAULT_COLUMN_WIDTH,
            number_format: None,
            border: None,
            alignment: None,
        }
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn format_id(mut self, id: u32) -> Self {
        self.number_format = Some(ColumnNumberFormat::Id(id));
        self
    }

    pub fn format_code(mut self, code: &str) -> Self {
        self.number_format = Some(ColumnNumberFormat::Code(code.to_string()));
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    fn header_text(&self) -> &str {
        self.header.as_deref().unwrap_or(&self.field)
    }

    fn apply(&self, cell: &mut Cell) {
        match &self.number_format {
            Some(ColumnNumberFormat::Id(id)) => cell.set_number_format_id(*id),
            Some(ColumnNumberFormat::Code(code)) => cell.set_number_format_code(code),
            None => {}
        }
        if let Some(border) = &self.border {
            cell.border = Some(border.clone());
        }
        if let Some(alignment) = &self.alignment {
            cell.alignment = Some(alignment.clone());
        }
    }
}

/// Formatting shared by every header cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderStyle {
    pub font: Option<Font>,
    pub fill: Option<Fill>,
    pub alignment: Option<Alignment>,
}

impl Default for HeaderStyle {
    /// Bold, centered, wrapped text on the theme's second background color.
    fn default() -> Self {
        HeaderStyle {
            font: Some(Font::new().bold()),
            fill: Some(Fill::solid(Color::theme(2))),
            alignment: Some(
                Alignment::new()
                    .horizontal(HorizontalAlignment::Center)
                    .wrap_text(),
            ),
        }
    }
}

impl HeaderStyle {
    pub fn plain() -> Self {
        HeaderStyle {
            font: None,
            fill: None,
            alignment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSpec {
    pub name: String,
    /// Top-left cell of the scrolling area, e.g. `A2` to freeze the header.
    #[serde(default)]
    pub freeze_pane: Option<String>,
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub header_style: HeaderStyle,
}

impl SheetSpec {
    pub fn new(name: &str) -> Self {
        SheetSpec {
            name: name.to_string(),
            freeze_pane: None,
            columns: Vec::new(),
            header_style: HeaderStyle::default(),
        }
    }

    /// Every source column, headed by its name, without any styling.
    pub fn from_source<S: DataSource + ?Sized>(name: &str, source: &S) -> Self {
        SheetSpec {
            name: name.to_string(),
            freeze_pane: None,
            columns: source.column_names().into_iter().map(ColumnSpec::new).collect(),
            header_style: HeaderStyle::plain(),
        }
    }

    pub fn freeze_pane(mut self, top_left_cell: &str) -> Self {
        self.freeze_pane = Some(top_left_cell.to_string());
        self
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }
}

/// Width of a 1-based, inclusive column range.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub min: u32,
    pub max: u32,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<ResolvedCell>,
}

/// A fully resolved worksheet. Cell style indices point into the
/// [`StyleTable`] it was assembled against.
#[derive(Debug, Clone, PartialEq)]
pub struct Worksheet {
    pub name: String,
    pub freeze_pane: Option<String>,
    pub columns: Vec<Column>,
    pub header: Vec<ResolvedCell>,
    pub rows: Vec<Row>,
}

fn resolve_cell(table: &mut StyleTable, cell: Cell) -> Result<ResolvedCell> {
    let style = table.compose(&cell)?;
    Ok(ResolvedCell {
        value: cell.value,
        data_type: cell.data_type,
        style,
    })
}

/// Assembles the worksheet described by `spec` from `source`, registering
/// every cell's formatting in `table`.
pub fn assemble<S: DataSource + ?Sized>(
    spec: &SheetSpec,
    source: &S,
    table: &mut StyleTable,
) -> Result<Worksheet> {
    let mut layout: Vec<(usize, ValueKind)> = Vec::with_capacity(spec.columns.len());
    for col in &spec.columns {
        let idx = source
            .column_index(&col.field)
            .ok_or_else(|| XlsxExportError::MissingColumn(col.field.clone()))?;
        let kind = source
            .column_kind(&col.field)
            .ok_or_else(|| XlsxExportError::MissingColumn(col.field.clone()))?;
        layout.push((idx, kind.clone()));
    }

    let mut header = Vec::with_capacity(spec.columns.len());
    let mut columns: Vec<Column> = Vec::new();
    for (i, col) in spec.columns.iter().enumerate() {
        let mut cell = Cell::new(col.header_text(), CellDataType::Text);
        cell.font = spec.header_style.font.clone();
        cell.fill = spec.header_style.fill.clone();
        cell.alignment = spec.header_style.alignment.clone();
        header.push(resolve_cell(table, cell)?);

        let n = i as u32 + 1;
        match columns.last_mut() {
            Some(prev) if prev.width == col.width => prev.max = n,
            _ => columns.push(Column {
                min: n,
                max: n,
                width: col.width,
            }),
        }
    }

    let mut rows = Vec::with_capacity(source.row_count());
    for r in 0..source.row_count() {
        let values = source.row(r);
        let mut cells = Vec::with_capacity(layout.len());
        for ((idx, kind), col) in layout.iter().zip(&spec.columns) {
            let value = values.get(*idx).unwrap_or(&SourceValue::Null);
            let mut cell = Cell::from_column(kind, value)?;
            col.apply(&mut cell);
            cells.push(resolve_cell(table, cell)?);
        }
        rows.push(Row { cells });
    }

    log::debug!(
        "assembled sheet '{}': {} columns, {} rows, {} cell formats",
        spec.name,
        columns.len(),
        rows.len(),
        table.cell_formats().len()
    );

    Ok(Worksheet {
        name: spec.name.clone(),
        freeze_pane: spec.freeze_pane.clone(),
        columns,
        header,
        rows,
    })
}
