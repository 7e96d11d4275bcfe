use serde::{Deserialize, Serialize};

use crate::workbook::{style::color::Color, xml_escape};

/// Font record. Unset fields are left out of the markup and fall back to the
/// workbook default font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Size in twentieths of a point.
    pub size: Option<u32>,
    pub color: Option<Color>,
    pub name: Option<String>,
}

impl Font {
    pub fn new() -> Self {
        Font::default()
    }

    /// Calibri 11, the font at index 0 of a fresh styles part.
    pub fn standard() -> Self {
        Font {
            size: Some(220),
            name: Some("Calibri".into()),
            ..Font::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn size_pt(mut self, pt: f64) -> Self {
        self.size = Some((pt * 20.0).round() as u32);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<font>");
        if self.bold {
            xml.push_str("<b/>");
        }
        if self.italic {
            xml.push_str("<i/>");
        }
        if self.underline {
            xml.push_str("<u/>");
        }
        if let Some(size) = self.size {
            let pt = size as f64 / 20.0;
            xml.push_str(&format!("<sz val=\"{pt}\"/>"));
        }
        if let Some(c) = &self.color {
            xml.push_str(&c.to_xml("color"));
        }
        if let Some(name) = &self.name {
            xml.push_str(&format!("<name val=\"{}\"/>", xml_escape(name)));
        }
        xml.push_str("</font>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_only_font_renders_just_the_flag() {
        assert_eq!(Font::new().bold().to_xml(), "<font><b/></font>");
    }

    #[test]
    fn standard_font_keeps_child_order() {
        let xml = Font::standard().color(Color::new("000000")).to_xml();
        assert_eq!(
            xml,
            "<font><sz val=\"11\"/><color rgb=\"FF000000\"/><name val=\"Calibri\"/></font>"
        );
    }

    #[test]
    fn fractional_point_sizes_survive() {
        assert_eq!(Font::new().size_pt(10.5).size, Some(210));
        assert!(Font::new().size_pt(10.5).to_xml().contains("<sz val=\"10.5\"/>"));
    }
}
