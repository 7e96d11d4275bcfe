use serde::{Deserialize, Serialize};

use crate::workbook::style::color::Color;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    None,
    Thin,
    Medium,
    Thick,
    Dashed,
    Dotted,
    Double,
}

impl BorderStyle {
    fn as_xml_attr(&self) -> Option<&str> {
        match self {
            BorderStyle::None => None,
            BorderStyle::Thin => Some("thin"),
            BorderStyle::Medium => Some("medium"),
            BorderStyle::Thick => Some("thick"),
            BorderStyle::Dashed => Some("dashed"),
            BorderStyle::Dotted => Some("dotted"),
            BorderStyle::Double => Some("double"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Border {
    pub left: BorderStyle,
    pub right: BorderStyle,
    pub top: BorderStyle,
    pub bottom: BorderStyle,
    pub color: Option<Color>,
}

impl Border {
    pub fn new() -> Self {
        Border::default()
    }

    pub fn all(style: BorderStyle) -> Self {
        Border {
            left: style.clone(),
            right: style.clone(),
            top: style.clone(),
            bottom: style,
            color: None,
        }
    }

    /// Thin box in the system foreground color.
    pub fn thin_box() -> Self {
        Border::all(BorderStyle::Thin).color(Color::indexed(64))
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    fn side_xml(&self, tag: &str, style: &BorderStyle) -> String {
        match style.as_xml_attr() {
            None => format!("<{tag}/>"),
            Some(s) => {
                let color = self
                    .color
                    .as_ref()
                    .map(|c| c.to_xml("color"))
                    .unwrap_or_default();
                format!("<{tag} style=\"{s}\">{color}</{tag}>")
            }
        }
    }

    pub fn to_xml(&self) -> String {
        format!(
            "<border>{}{}{}{}<diagonal/></border>",
            self.side_xml("left", &self.left),
            self.side_xml("right", &self.right),
            self.side_xml("top", &self.top),
            self.side_xml("bottom", &self.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_border_has_bare_sides() {
        assert_eq!(
            Border::new().to_xml(),
            "<border><left/><right/><top/><bottom/><diagonal/></border>"
        );
    }

    #[test]
    fn thin_box_colors_every_side() {
        let xml = Border::thin_box().to_xml();
        assert_eq!(xml.matches("<color indexed=\"64\"/>").count(), 4);
        assert!(xml.starts_with("<border><left style=\"thin\">"));
    }
}
