use crate::workbook::style::alignment::Alignment;

/// Composite `<xf>` record in `cellXfs`.
///
/// Component fields hold indices into the style table, except `num_fmt_id`
/// which holds the numbering format's ID as written to markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellFormat {
    pub num_fmt_id: Option<u32>,
    pub font_id: Option<u32>,
    pub fill_id: Option<u32>,
    pub border_id: Option<u32>,
    pub alignment: Option<Alignment>,
    pub apply_number_format: bool,
    pub apply_font: bool,
    pub apply_fill: bool,
    pub apply_border: bool,
    pub apply_alignment: bool,
}

impl CellFormat {
    pub fn to_xml(&self) -> String {
        let mut xml = format!(
            "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
            self.num_fmt_id.unwrap_or(0),
            self.font_id.unwrap_or(0),
            self.fill_id.unwrap_or(0),
            self.border_id.unwrap_or(0),
        );
        for (flag, attr) in [
            (self.apply_number_format, "applyNumberFormat"),
            (self.apply_font, "applyFont"),
            (self.apply_fill, "applyFill"),
            (self.apply_border, "applyBorder"),
            (self.apply_alignment, "applyAlignment"),
        ] {
            if flag {
                xml.push_str(&format!(" {attr}=\"1\""));
            }
        }
        match &self.alignment {
            Some(a) => xml.push_str(&format!(">{}</xf>", a.to_xml())),
            None => xml.push_str("/>"),
        }
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::style::alignment::HorizontalAlignment;

    #[test]
    fn default_format_is_all_zero() {
        assert_eq!(
            CellFormat::default().to_xml(),
            "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\" xfId=\"0\"/>"
        );
    }

    #[test]
    fn alignment_is_a_child_element() {
        let xf = CellFormat {
            border_id: Some(1),
            apply_border: true,
            alignment: Some(Alignment::new().horizontal(HorizontalAlignment::Right)),
            apply_alignment: true,
            ..CellFormat::default()
        };
        assert_eq!(
            xf.to_xml(),
            "<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"1\" xfId=\"0\" \
             applyBorder=\"1\" applyAlignment=\"1\"><alignment horizontal=\"right\"/></xf>"
        );
    }
}
