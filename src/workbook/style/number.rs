use serde::{Deserialize, Serialize};

use crate::workbook::xml_escape;

/// IDs at or below this value belong to the predefined formats.
pub const RESERVED_NUM_FMT_ID_MAX: u32 = 163;

/// Built-in `m/d/yy` date format.
pub const DATE_NUM_FMT_ID: u32 = 14;

const BUILTIN_FORMATS: [(&str, u32); 31] = [
    ("0", 1),
    ("0.00", 2),
    ("#,##0", 3),
    ("#,##0.00", 4),
    ("$#,##0_);($#,##0)", 5),
    ("$#,##0_);[Red]($#,##0)", 6),
    ("$#,##0.00_);($#,##0.00)", 7),
    ("$#,##0.00_);[Red]($#,##0.00)", 8),
    ("0%", 9),
    ("0.00%", 10),
    ("0.00E+00", 11),
    ("# ?/?", 12),
    ("# ??/??", 13),
    ("mm/dd/yy", 14),
    ("d-mmm-yy", 15),
    ("d-mmm", 16),
    ("mmm-yy", 17),
    ("h:mm AM/PM", 18),
    ("h:mm:ss AM/PM", 19),
    ("h:mm", 20),
    ("h:mm:ss", 21),
    ("h/d/yy h:mm", 22),
    ("#,##0;(#,##0)", 37),
    ("#,##0;[Red](#,##0)", 38),
    ("#,##0.00;(#,##0.00)", 39),
    ("#,##0.00;[Red](#,##0.00)", 40),
    ("mm:ss", 45),
    ("[h]:mm:ss", 46),
    ("mmss.0", 47),
    ("##0.0E+0", 48),
    ("@", 49),
];

/// Looks up the predefined ID for a format code.
pub fn builtin_id(code: &str) -> Option<u32> {
    BUILTIN_FORMATS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, id)| *id)
}

/// A numbering format: an explicit ID, a format code, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingFormat {
    pub id: Option<u32>,
    pub code: Option<String>,
}

impl NumberingFormat {
    pub fn with_id(id: u32) -> Self {
        NumberingFormat {
            id: Some(id),
            code: None,
        }
    }

    pub fn with_code(code: &str) -> Self {
        NumberingFormat {
            id: None,
            code: Some(code.into()),
        }
    }

    /// Predefined codes become their built-in ID, anything else stays a
    /// custom code.
    pub fn from_code(code: &str) -> Self {
        match builtin_id(code) {
            Some(id) => NumberingFormat::with_id(id),
            None => NumberingFormat::with_code(code),
        }
    }

    pub fn date() -> Self {
        NumberingFormat::with_id(DATE_NUM_FMT_ID)
    }

    /// The code, if present and non-empty.
    pub fn non_empty_code(&self) -> Option<&str> {
        self.code.as_deref().filter(|c| !c.is_empty())
    }

    pub fn to_xml(&self) -> Option<String> {
        let id = self.id?;
        let code = self.non_empty_code()?;
        Some(format!(
            "<numFmt numFmtId=\"{id}\" formatCode=\"{}\"/>",
            xml_escape(code)
        ))
    }
}
