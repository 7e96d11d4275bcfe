use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorizontalAlignment {
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
}

impl HorizontalAlignment {
    fn as_xml_attr(&self) -> &str {
        match self {
            HorizontalAlignment::General => "general",
            HorizontalAlignment::Left => "left",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::Right => "right",
            HorizontalAlignment::Fill => "fill",
            HorizontalAlignment::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    Justify,
}

impl VerticalAlignment {
    fn as_xml_attr(&self) -> &str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
            VerticalAlignment::Justify => "justify",
        }
    }
}

/// Cell alignment. Embedded in a cell format rather than interned in its own
/// table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Alignment {
    pub horizontal: Option<HorizontalAlignment>,
    pub vertical: Option<VerticalAlignment>,
    pub wrap_text: bool,
}

impl Alignment {
    pub fn new() -> Self {
        Alignment::default()
    }

    pub fn horizontal(mut self, h: HorizontalAlignment) -> Self {
        self.horizontal = Some(h);
        self
    }

    pub fn vertical(mut self, v: VerticalAlignment) -> Self {
        self.vertical = Some(v);
        self
    }

    pub fn wrap_text(mut self) -> Self {
        self.wrap_text = true;
        self
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<alignment");
        if let Some(h) = &self.horizontal {
            xml.push_str(&format!(" horizontal=\"{}\"", h.as_xml_attr()));
        }
        if let Some(v) = &self.vertical {
            xml.push_str(&format!(" vertical=\"{}\"", v.as_xml_attr()));
        }
        if self.wrap_text {
            xml.push_str(" wrapText=\"1\"");
        }
        xml.push_str("/>");
        xml
    }
}
