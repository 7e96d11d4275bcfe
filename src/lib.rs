pub mod error;
pub mod source;
pub mod workbook;

pub use error::XlsxExportError;
pub use source::{DataSource, DataTable, SourceValue, ValueKind};
pub use workbook::{
    Workbook,
    builder::WorkbookBuilder,
    cell::{Cell, CellDataType, ResolvedCell},
    style::{
        StyleComponent, StyleTable,
        alignment::{Alignment, HorizontalAlignment, VerticalAlignment},
        border::{Border, BorderStyle},
        cell_format::CellFormat,
        color::Color,
        fill::Fill,
        font::Font,
        number::NumberingFormat,
    },
    worksheet::{
        Column, ColumnNumberFormat, ColumnSpec, HeaderStyle, Row, SheetSpec, Worksheet, assemble,
    },
};

pub(crate) type Result<T> = std::result::Result<T, error::XlsxExportError>;
