use thiserror::Error;
use zip::result::ZipError;

#[derive(Error, Debug)]
pub enum XlsxExportError {
    /// A source value whose runtime kind has no cell data type.
    #[error("unsupported source value type: {0}")]
    UnsupportedType(String),

    /// A numbering format carrying neither an ID nor a format code.
    #[error("numbering format needs an explicit id or a non-empty format code")]
    InvalidNumberFormat,

    /// A numeric value with no cell representation: NaN, an infinity or an
    /// unparsable decimal.
    #[error("invalid number value: {0}")]
    InvalidNumber(String),

    #[error("invalid date value: {0}")]
    InvalidDate(String),

    #[error("column '{0}' not found in data source")]
    MissingColumn(String),

    #[error("{0}")]
    AlreadyExists(String),

    #[error("{0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] ZipError),
}
