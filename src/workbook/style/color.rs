use serde::{Deserialize, Serialize};

use crate::workbook::xml_escape;

/// A color reference as it appears on `<color>`, `<fgColor>` and `<bgColor>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// ARGB hex, e.g. `FF2784F5`.
    Rgb(String),
    /// Index into the workbook theme palette.
    Theme(u32),
    /// Legacy indexed palette entry (64 is the system foreground).
    Indexed(u32),
}

impl Color {
    pub fn new(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6 {
            Color::Rgb(format!("FF{}", hex.to_uppercase()))
        } else {
            Color::Rgb(hex.to_uppercase())
        }
    }

    pub fn theme(index: u32) -> Self {
        Color::Theme(index)
    }

    pub fn indexed(index: u32) -> Self {
        Color::Indexed(index)
    }

    pub(crate) fn xml_attr(&self) -> String {
        match self {
            Color::Rgb(argb) => format!("rgb=\"{}\"", xml_escape(argb)),
            Color::Theme(i) => format!("theme=\"{i}\""),
            Color::Indexed(i) => format!("indexed=\"{i}\""),
        }
    }

    pub(crate) fn to_xml(&self, tag: &str) -> String {
        format!("<{tag} {}/>", self.xml_attr())
    }
}
