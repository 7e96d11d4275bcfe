//! The style table and the registry that deduplicates into it.
//!
//! Every font, fill, border, numbering format and composite cell format a
//! workbook uses lives exactly once in a [`StyleTable`]. Callers build
//! components freely and hand them to [`StyleTable::resolve`] (or
//! [`StyleTable::resolve_number_format`]), which returns the index of an
//! equal entry or appends the candidate. [`StyleTable::compose`] does the
//! same for a whole [`Cell`]'s formatting.
//!
//! Lookups are linear scans in append order. The table is bounded by the
//! number of distinct formatting combinations, not by row count, so the
//! first-match-wins scan keeps indices reproducible for a given input order.

use std::fmt;

use crate::{
    Result,
    error::XlsxExportError,
    workbook::{
        cell::Cell,
        style::{
            border::Border,
            cell_format::CellFormat,
            fill::Fill,
            font::Font,
            number::{NumberingFormat, RESERVED_NUM_FMT_ID_MAX},
        },
    },
};
pub mod alignment;
pub mod border;
pub mod cell_format;
pub mod color;
pub mod fill;
pub mod font;
pub mod number;

/// A style facet stored in its own sequence of the [`StyleTable`].
pub trait StyleComponent: Clone + PartialEq + fmt::Debug {
    const KIND: &'static str;

    fn entries(table: &StyleTable) -> &[Self];
    fn entries_mut(table: &mut StyleTable) -> &mut Vec<Self>;
}

impl StyleComponent for Font {
    const KIND: &'static str = "font";

    fn entries(table: &StyleTable) -> &[Self] {
        &table.fonts
    }
    fn entries_mut(table: &mut StyleTable) -> &mut Vec<Self> {
        &mut table.fonts
    }
}

impl StyleComponent for Fill {
    const KIND: &'static str = "fill";

    fn entries(table: &StyleTable) -> &[Self] {
        &table.fills
    }
    fn entries_mut(table: &mut StyleTable) -> &mut Vec<Self> {
        &mut table.fills
    }
}

impl StyleComponent for Border {
    const KIND: &'static str = "border";

    fn entries(table: &StyleTable) -> &[Self] {
        &table.borders
    }
    fn entries_mut(table: &mut StyleTable) -> &mut Vec<Self> {
        &mut table.borders
    }
}

impl StyleComponent for CellFormat {
    const KIND: &'static str = "cell format";

    fn entries(table: &StyleTable) -> &[Self] {
        &table.cell_formats
    }
    fn entries_mut(table: &mut StyleTable) -> &mut Vec<Self> {
        &mut table.cell_formats
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleTable {
    fonts: Vec<Font>,
    fills: Vec<Fill>,
    borders: Vec<Border>,
    num_fmts: Vec<NumberingFormat>,
    cell_formats: Vec<CellFormat>,
}

impl StyleTable {
    /// An empty table.
    pub fn new() -> Self {
        StyleTable::default()
    }

    /// A table holding the entries every styles part must start with: the
    /// standard font, the `none` and `gray125` fills, an empty border and
    /// the default cell format at index 0.
    pub fn with_defaults() -> Self {
        let mut table = StyleTable::new();
        table.fonts.push(Font::standard());
        table.fills.push(Fill::None);
        table.fills.push(Fill::Gray125);
        table.borders.push(Border::default());
        table.cell_formats.push(CellFormat {
            font_id: Some(0),
            fill_id: Some(0),
            border_id: Some(0),
            num_fmt_id: Some(0),
            ..CellFormat::default()
        });
        table
    }

    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn borders(&self) -> &[Border] {
        &self.borders
    }

    pub fn number_formats(&self) -> &[NumberingFormat] {
        &self.num_fmts
    }

    pub fn cell_formats(&self) -> &[CellFormat] {
        &self.cell_formats
    }

    /// Index of the first entry equal to `candidate`, appending it when
    /// there is none.
    pub fn resolve<C: StyleComponent>(&mut self, candidate: C) -> u32 {
        if let Some(i) = C::entries(self).iter().position(|e| *e == candidate) {
            log::trace!("{} reused at index {i}", C::KIND);
            return i as u32;
        }
        let entries = C::entries_mut(self);
        let i = entries.len() as u32;
        log::debug!("{} appended at index {i}: {candidate:?}", C::KIND);
        entries.push(candidate);
        i
    }

    /// Resolves a numbering format, returning its index in the numbering
    /// format sequence.
    ///
    /// Matching runs in three passes: same explicit ID, then same format
    /// code, then full equality. A new entry without an ID is numbered past
    /// both the reserved range and every ID already in the table.
    pub fn resolve_number_format(&mut self, mut candidate: NumberingFormat) -> Result<u32> {
        let code = candidate.non_empty_code().map(str::to_owned);
        if candidate.id.is_none() && code.is_none() {
            return Err(XlsxExportError::InvalidNumberFormat);
        }

        if let Some(id) = candidate.id {
            if let Some(i) = self.num_fmts.iter().position(|f| f.id == Some(id)) {
                log::trace!("numbering format id {id} reused at index {i}");
                return Ok(i as u32);
            }
        }
        if let Some(code) = &code {
            if let Some(i) = self
                .num_fmts
                .iter()
                .position(|f| f.non_empty_code() == Some(code.as_str()))
            {
                log::trace!("numbering format code {code:?} reused at index {i}");
                return Ok(i as u32);
            }
        }
        if let Some(i) = self.num_fmts.iter().position(|f| *f == candidate) {
            return Ok(i as u32);
        }

        if candidate.id.is_none() {
            let max_observed = self.num_fmts.iter().filter_map(|f| f.id).max().unwrap_or(0);
            let id = max_observed.max(RESERVED_NUM_FMT_ID_MAX) + 1;
            log::debug!("assigned numbering format id {id} to {code:?}");
            candidate.id = Some(id);
        }
        let i = self.num_fmts.len() as u32;
        self.num_fmts.push(candidate);
        Ok(i)
    }

    /// Builds the composite cell format for `cell` and resolves it.
    ///
    /// Returns `None` for a cell without formatting; such a cell touches no
    /// sequence of the table.
    pub fn compose(&mut self, cell: &Cell) -> Result<Option<u32>> {
        if !cell.has_formatting() {
            return Ok(None);
        }

        let mut xf = CellFormat::default();
        if let Some(alignment) = &cell.alignment {
            xf.alignment = Some(alignment.clone());
            xf.apply_alignment = true;
        }
        if let Some(font) = &cell.font {
            xf.font_id = Some(self.resolve(font.clone()));
            xf.apply_font = true;
        }
        if let Some(fill) = &cell.fill {
            xf.fill_id = Some(self.resolve(fill.clone()));
            xf.apply_fill = true;
        }
        if let Some(border) = &cell.border {
            xf.border_id = Some(self.resolve(border.clone()));
            xf.apply_border = true;
        }
        if let Some(fmt) = &cell.number_format {
            xf.num_fmt_id = match fmt.id {
                Some(id) => Some(id),
                None => {
                    let i = self.resolve_number_format(fmt.clone())?;
                    self.num_fmts[i as usize].id
                }
            };
            xf.apply_number_format = true;
        }

        Ok(Some(self.resolve(xf)))
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n");
        out.push_str(
            "<styleSheet xmlns=\"http://schemas.openxmlformats.org/spreadsheetml/2006/main\">\n",
        );

        let num_fmts: Vec<String> = self.num_fmts.iter().filter_map(|f| f.to_xml()).collect();
        if !num_fmts.is_empty() {
            out.push_str(&format!("<numFmts count=\"{}\">\n", num_fmts.len()));
            for xml in &num_fmts {
                out.push_str(&format!("{xml}\n"));
            }
            out.push_str("</numFmts>\n");
        }

        out.push_str(&format!("<fonts count=\"{}\">\n", self.fonts.len()));
        for font in &self.fonts {
            out.push_str(&format!("{}\n", font.to_xml()));
        }
        out.push_str("</fonts>\n");

        out.push_str(&format!("<fills count=\"{}\">\n", self.fills.len()));
        for fill in &self.fills {
            out.push_str(&format!("{}\n", fill.to_xml()));
        }
        out.push_str("</fills>\n");

        out.push_str(&format!("<borders count=\"{}\">\n", self.borders.len()));
        for border in &self.borders {
            out.push_str(&format!("{}\n", border.to_xml()));
        }
        out.push_str("</borders>\n");

        out.push_str("<cellStyleXfs count=\"1\">\n");
        out.push_str("<xf numFmtId=\"0\" fontId=\"0\" fillId=\"0\" borderId=\"0\"/>\n");
        out.push_str("</cellStyleXfs>\n");

        out.push_str(&format!("<cellXfs count=\"{}\">\n", self.cell_formats.len()));
        for xf in &self.cell_formats {
            out.push_str(&format!("{}\n", xf.to_xml()));
        }
        out.push_str("</cellXfs>\n");

        out.push_str("<cellStyles count=\"1\">\n");
        out.push_str("<cellStyle name=\"Normal\" xfId=\"0\" builtinId=\"0\"/>\n");
        out.push_str("</cellStyles>\n");

        out.push_str("</styleSheet>");
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::workbook::{
        cell::CellDataType,
        style::{
            alignment::{Alignment, HorizontalAlignment},
            color::Color,
        },
    };

    fn text_cell(value: &str) -> Cell {
        Cell::new(value, CellDataType::Text)
    }

    #[test]
    fn resolving_an_equal_component_twice_appends_once() {
        let mut table = StyleTable::new();
        let first = table.resolve(Font::new().bold());
        let second = table.resolve(Font::new().bold());
        assert_eq!(first, second);
        assert_eq!(table.fonts().len(), 1);
    }

    #[test]
    fn first_match_wins_in_append_order() {
        let mut table = StyleTable::new();
        let a = Fill::solid(Color::theme(2));
        let b = Fill::solid(Color::new("FF0000"));
        let indices = [
            table.resolve(a.clone()),
            table.resolve(b),
            table.resolve(Fill::solid(Color::theme(2))),
        ];
        assert_eq!(indices, [0, 1, 0]);
        assert_eq!(table.fills().len(), 2);
    }

    #[test]
    fn seeded_table_reuses_the_empty_border() {
        let mut table = StyleTable::with_defaults();
        assert_eq!(table.resolve(Border::new()), 0);
        assert_eq!(table.resolve(Fill::Gray125), 1);
        assert_eq!(table.borders().len(), 1);
    }

    #[test]
    fn explicit_id_wins_over_a_different_code() {
        let mut table = StyleTable::new();
        let existing = NumberingFormat {
            id: Some(14),
            code: Some("mm/dd/yy".into()),
        };
        assert_eq!(table.resolve_number_format(existing).unwrap(), 0);

        let candidate = NumberingFormat {
            id: Some(14),
            code: Some("yyyy-mm-dd".into()),
        };
        assert_eq!(table.resolve_number_format(candidate).unwrap(), 0);
        assert_eq!(table.number_formats().len(), 1);
    }

    #[test]
    fn matching_code_wins_over_a_different_id() {
        let mut table = StyleTable::new();
        table
            .resolve_number_format(NumberingFormat::with_code("0.000"))
            .unwrap();
        let candidate = NumberingFormat {
            id: Some(170),
            code: Some("0.000".into()),
        };
        assert_eq!(table.resolve_number_format(candidate).unwrap(), 0);
    }

    #[test]
    fn auto_ids_skip_the_reserved_range_and_increase() {
        let mut table = StyleTable::new();
        let first = table
            .resolve_number_format(NumberingFormat::with_code("0.000"))
            .unwrap();
        let second = table
            .resolve_number_format(NumberingFormat::with_code("#,##0.0000"))
            .unwrap();
        assert_eq!((first, second), (0, 1));
        let ids: Vec<_> = table.number_formats().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![Some(164), Some(165)]);
    }

    #[test]
    fn explicit_ids_raise_the_next_auto_id() {
        let mut table = StyleTable::new();
        table
            .resolve_number_format(NumberingFormat {
                id: Some(200),
                code: Some("0.0".into()),
            })
            .unwrap();
        table
            .resolve_number_format(NumberingFormat::with_id(3))
            .unwrap();
        let i = table
            .resolve_number_format(NumberingFormat::with_code("0.00000"))
            .unwrap();
        assert_eq!(table.number_formats()[i as usize].id, Some(201));
        assert_eq!(table.number_formats()[1], NumberingFormat::with_id(3));
    }

    #[test]
    fn numbering_format_without_id_or_code_is_rejected() {
        let mut table = StyleTable::new();
        let err = table
            .resolve_number_format(NumberingFormat::with_code(""))
            .unwrap_err();
        assert!(matches!(err, XlsxExportError::InvalidNumberFormat));
        assert!(table.number_formats().is_empty());
    }

    #[test]
    fn unformatted_cell_leaves_the_table_untouched() {
        let mut table = StyleTable::with_defaults();
        let before = table.clone();
        assert_eq!(table.compose(&text_cell("plain")).unwrap(), None);
        assert_eq!(table, before);
    }

    #[test]
    fn composed_formats_are_shared_between_equal_cells() {
        let mut table = StyleTable::with_defaults();
        let mut a = text_cell("a");
        a.border = Some(Border::thin_box());
        a.alignment = Some(Alignment::new().horizontal(HorizontalAlignment::Right));
        let mut b = text_cell("b");
        b.border = Some(Border::thin_box());
        b.alignment = Some(Alignment::new().horizontal(HorizontalAlignment::Right));

        let ia = table.compose(&a).unwrap();
        let ib = table.compose(&b).unwrap();
        assert_eq!(ia, Some(1));
        assert_eq!(ia, ib);
        assert_eq!(table.cell_formats().len(), 2);
        assert_eq!(table.borders().len(), 2);

        let xf = &table.cell_formats()[1];
        assert_eq!(xf.border_id, Some(1));
        assert!(xf.apply_border && xf.apply_alignment);
        assert!(!xf.apply_font && !xf.apply_fill && !xf.apply_number_format);
    }

    #[test]
    fn explicit_format_id_bypasses_the_numbering_sequence() {
        let mut table = StyleTable::with_defaults();
        let mut cell = Cell::new("7", CellDataType::Number);
        cell.number_format = Some(NumberingFormat::with_id(1));
        let i = table.compose(&cell).unwrap().unwrap();
        assert!(table.number_formats().is_empty());
        assert_eq!(table.cell_formats()[i as usize].num_fmt_id, Some(1));
    }

    #[test]
    fn coded_format_stores_the_assigned_id() {
        let mut table = StyleTable::with_defaults();
        let mut cell = Cell::new("7", CellDataType::Number);
        cell.number_format = Some(NumberingFormat::with_code("0.000"));
        let i = table.compose(&cell).unwrap().unwrap();
        assert_eq!(table.cell_formats()[i as usize].num_fmt_id, Some(164));
        assert!(table.to_xml().contains("<numFmt numFmtId=\"164\" formatCode=\"0.000\"/>"));
    }

    #[test]
    fn different_apply_flags_make_different_formats() {
        let mut table = StyleTable::new();
        let mut bold = text_cell("x");
        bold.font = Some(Font::new().bold());
        let mut bold_filled = bold.clone();
        bold_filled.fill = Some(Fill::solid(Color::theme(2)));
        assert_eq!(table.compose(&bold).unwrap(), Some(0));
        assert_eq!(table.compose(&bold_filled).unwrap(), Some(1));
        assert_eq!(table.fonts().len(), 1);
    }

    #[test]
    fn styles_xml_counts_match_the_sequences() {
        let mut table = StyleTable::with_defaults();
        let mut cell = text_cell("h");
        cell.font = Some(Font::new().bold());
        table.compose(&cell).unwrap();
        let xml = table.to_xml();
        assert!(xml.contains("<fonts count=\"2\">"));
        assert!(xml.contains("<fills count=\"2\">"));
        assert!(xml.contains("<cellXfs count=\"2\">"));
        assert!(!xml.contains("<numFmts"));
    }
}
