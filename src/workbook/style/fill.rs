use serde::{Deserialize, Serialize};

use crate::workbook::style::color::Color;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fill {
    None,
    /// The 12.5% gray pattern SpreadsheetML reserves at fill index 1.
    Gray125,
    Solid { fg: Color, bg: Option<Color> },
}

impl Fill {
    pub fn solid(fg: Color) -> Self {
        Fill::Solid { fg, bg: None }
    }

    pub fn solid_with_background(fg: Color, bg: Color) -> Self {
        Fill::Solid { fg, bg: Some(bg) }
    }

    pub fn to_xml(&self) -> String {
        match self {
            Fill::None => "<fill><patternFill patternType=\"none\"/></fill>".into(),
            Fill::Gray125 => "<fill><patternFill patternType=\"gray125\"/></fill>".into(),
            Fill::Solid { fg, bg } => {
                let bg = bg
                    .as_ref()
                    .map(|c| c.to_xml("bgColor"))
                    .unwrap_or_default();
                format!(
                    "<fill><patternFill patternType=\"solid\">{}{bg}</patternFill></fill>",
                    fg.to_xml("fgColor")
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_fill_markup() {
        assert_eq!(
            Fill::solid(Color::theme(2)).to_xml(),
            "<fill><patternFill patternType=\"solid\"><fgColor theme=\"2\"/></patternFill></fill>"
        );
    }

    #[test]
    fn background_color_follows_foreground() {
        let xml = Fill::solid_with_background(Color::new("FF0000"), Color::indexed(64)).to_xml();
        assert!(xml.contains("<fgColor rgb=\"FFFF0000\"/><bgColor indexed=\"64\"/>"));
    }
}
