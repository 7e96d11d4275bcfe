use std::io::{BufWriter, Write};

use tempfile::NamedTempFile;

use crate::{
    Result,
    workbook::{
        cell::ResolvedCell,
        make_cell_ref, parse_cell_ref,
        worksheet::{Column, Worksheet},
        write_cell,
    },
};

/// Streams one worksheet part to a temporary file.
pub(crate) struct SheetWriter {
    pub(crate) temp: BufWriter<NamedTempFile>,
    current_row: u32,
}

fn sheet_views_xml(freeze_pane: Option<&str>) -> String {
    let pane = freeze_pane
        .and_then(|anchor| parse_cell_ref(anchor).map(|(col, row)| (anchor, col, row - 1)))
        .filter(|(_, x_split, y_split)| *x_split > 0 || *y_split > 0)
        .map(|(anchor, x_split, y_split)| {
            let active = match (x_split > 0, y_split > 0) {
                (true, true) => "bottomRight",
                (true, false) => "topRight",
                _ => "bottomLeft",
            };
            let mut splits = String::new();
            if x_split > 0 {
                splits.push_str(&format!(" xSplit=\"{x_split}\""));
            }
            if y_split > 0 {
                splits.push_str(&format!(" ySplit=\"{y_split}\""));
            }
            format!(
                "<pane{splits} topLeftCell=\"{anchor}\" activePane=\"{active}\" state=\"frozen\"/>"
            )
        });

    match pane {
        Some(pane) => format!(
            "<sheetViews><sheetView workbookViewId=\"0\">{pane}</sheetView></sheetViews>"
        ),
        None => "<sheetViews><sheetView workbookViewId=\"0\"/></sheetViews>".to_string(),
    }
}

fn cols_xml(columns: &[Column]) -> String {
    if columns.is_empty() {
        return String::new();
    }
    let mut xml = String::from("<cols>");
    for col in columns {
        xml.push_str(&format!(
            "<col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
            col.min, col.max, col.width
        ));
    }
    xml.push_str("</cols>");
    xml
}

impl SheetWriter {
    pub(crate) fn new(worksheet: &Worksheet) -> Result<Self> {
        let temp_file = NamedTempFile::new()?;
        let mut writer = BufWriter::new(temp_file);

        write!(
            writer,
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
                "{}",
                r#"<sheetFormatPr defaultRowHeight="15"/>"#,
                "{}",
                "<sheetData>",
            ),
            sheet_views_xml(worksheet.freeze_pane.as_deref()),
            cols_xml(&worksheet.columns),
        )?;

        Ok(SheetWriter {
            temp: writer,
            current_row: 0,
        })
    }

    pub(crate) fn write_row(&mut self, cells: &[ResolvedCell]) -> Result<()> {
        self.current_row += 1;
        let row = self.current_row;

        if cells.is_empty() {
            return Ok(());
        }

        write!(self.temp, "<row r=\"{row}\">")?;

        for (col_idx, cell) in cells.iter().enumerate() {
            let cell_ref = make_cell_ref(row, col_idx as u32);
            write_cell(&mut self.temp, &cell_ref, cell)?;
        }

        writeln!(self.temp, "</row>")?;

        Ok(())
    }

    pub(crate) fn finalize(&mut self) -> Result<()> {
        write!(
            self.temp,
            "</sheetData>\
                <pageMargins left=\"0.75\" right=\"0.75\" top=\"1\" bottom=\"1\" header=\"0.5\" footer=\"0.5\"/>\
             </worksheet>"
        )?;
        self.temp.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_row_freeze() {
        assert_eq!(
            sheet_views_xml(Some("A2")),
            "<sheetViews><sheetView workbookViewId=\"0\">\
             <pane ySplit=\"1\" topLeftCell=\"A2\" activePane=\"bottomLeft\" state=\"frozen\"/>\
             </sheetView></sheetViews>"
        );
    }

    #[test]
    fn row_and_column_freeze() {
        let xml = sheet_views_xml(Some("B3"));
        assert!(xml.contains("xSplit=\"1\" ySplit=\"2\""));
        assert!(xml.contains("activePane=\"bottomRight\""));
    }

    #[test]
    fn no_pane_for_missing_or_origin_anchor() {
        let plain = "<sheetViews><sheetView workbookViewId=\"0\"/></sheetViews>";
        assert_eq!(sheet_views_xml(None), plain);
        assert_eq!(sheet_views_xml(Some("A1")), plain);
        assert_eq!(sheet_views_xml(Some("bogus")), plain);
    }

    #[test]
    fn widths_become_custom_cols() {
        let cols = [Column { min: 1, max: 1, width: 10.5 }];
        assert_eq!(
            cols_xml(&cols),
            "<cols><col min=\"1\" max=\"1\" width=\"10.5\" customWidth=\"1\"/></cols>"
        );
        assert_eq!(cols_xml(&[]), "");
    }
}
