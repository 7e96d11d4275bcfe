use std::{
    fs::File,
    io::{Read, Seek, SeekFrom, Write},
};

use zip::{ZipWriter, write::SimpleFileOptions};

use crate::{
    Result,
    error::XlsxExportError,
    source::DataSource,
    workbook::{
        cell::{CellDataType, ResolvedCell},
        sheet::SheetWriter,
        style::StyleTable,
        worksheet::{SheetSpec, Worksheet, assemble},
    },
};
pub mod builder;
pub mod cell;
pub mod sheet;
pub mod style;
pub mod worksheet;

const RELS_DOT_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
    r#"</Relationships>"#,
);

fn workbook_xml(order: &[&str]) -> String {
    let mut sheets = String::new();
    for (i, name) in order.iter().enumerate() {
        let sheet_id = i + 1;
        let r_id = format!("rId{}", i + 1);
        let escaped_name = xml_escape(name);
        sheets.push_str(&format!(
            r#"<sheet name="{escaped_name}" sheetId="{sheet_id}" r:id="{r_id}"/>"#
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<bookViews><workbookView activeTab="0"/></bookViews>"#,
            r#"<sheets>{}</sheets>"#,
            r#"</workbook>"#,
        ),
        sheets
    )
}

fn workbook_rels_xml(sheet_count: usize) -> String {
    let mut rels = String::new();

    for i in 1..=sheet_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
        ));
    }

    let styles_id = sheet_count + 1;
    rels.push_str(&format!(
        r#"<Relationship Id="rId{styles_id}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#
    ));

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"{}"#,
            r#"</Relationships>"#,
        ),
        rels
    )
}

fn content_types_xml(sheet_count: usize) -> String {
    let mut overrides = String::new();

    for i in 1..=sheet_count {
        overrides.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
        ));
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
            r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
            r#"{}"#,
            r#"</Types>"#,
        ),
        overrides
    )
}

/// A workbook being exported: one style table shared by every assembled
/// sheet.
pub struct Workbook {
    output_path: String,
    style_table: StyleTable,
    sheets: Vec<Worksheet>,
}

impl Workbook {
    pub(crate) fn new_with_builder(path: String, style_table: StyleTable) -> Self {
        Self {
            output_path: path,
            style_table,
            sheets: Vec::new(),
        }
    }

    pub fn style_table(&self) -> &StyleTable {
        &self.style_table
    }

    pub fn get_sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Assembles a sheet from `source` and registers its styles.
    pub fn add_sheet<S: DataSource + ?Sized>(
        &mut self,
        spec: &SheetSpec,
        source: &S,
    ) -> Result<&Worksheet> {
        if self.get_sheet(&spec.name).is_some() {
            return Err(XlsxExportError::AlreadyExists(format!(
                "Sheet '{}' already exists",
                spec.name
            )));
        }
        let worksheet = assemble(spec, source, &mut self.style_table)?;
        let idx = self.sheets.len();
        self.sheets.push(worksheet);
        Ok(&self.sheets[idx])
    }

    /// Writes the package with the named sheets first, the rest after them
    /// in insertion order.
    pub fn finish_by_order(mut self, sheet_order: &[&str]) -> Result<()> {
        let mut ordered = Vec::with_capacity(self.sheets.len());
        for name in sheet_order {
            match self.sheets.iter().position(|s| s.name == *name) {
                Some(i) => ordered.push(self.sheets.remove(i)),
                None => {
                    return Err(XlsxExportError::NotFound(format!("Sheet name : {name}!!")));
                }
            }
        }
        ordered.append(&mut self.sheets);
        self.sheets = ordered;
        self.finish()
    }

    pub fn finish(self) -> Result<()> {
        let output_file = File::create(&self.output_path)?;
        self.finish_to_writer(output_file)?;
        Ok(())
    }

    /// Writes the package into `writer` and hands it back.
    pub fn finish_to_writer<W: Write + Seek>(self, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let order: Vec<&str> = self.sheets.iter().map(|s| s.name.as_str()).collect();

        zip_write_str(
            &mut zip,
            "[Content_Types].xml",
            &content_types_xml(order.len()),
            options,
        )?;
        zip_write_str(&mut zip, "_rels/.rels", RELS_DOT_RELS, options)?;
        zip_write_str(&mut zip, "xl/workbook.xml", &workbook_xml(&order), options)?;
        zip_write_str(
            &mut zip,
            "xl/_rels/workbook.xml.rels",
            &workbook_rels_xml(order.len()),
            options,
        )?;

        let styles_xml = self.style_table.to_xml();
        zip_write_str(&mut zip, "xl/styles.xml", &styles_xml, options)?;

        for (i, worksheet) in self.sheets.iter().enumerate() {
            let mut sheet = SheetWriter::new(worksheet)?;
            sheet.write_row(&worksheet.header)?;
            for row in &worksheet.rows {
                sheet.write_row(&row.cells)?;
            }
            sheet.finalize()?;

            let zip_path = format!("xl/worksheets/sheet{}.xml", i + 1);
            zip.start_file(zip_path.as_str(), options)?;

            let temp_file = sheet.temp.get_mut();
            temp_file.seek(SeekFrom::Start(0))?;

            let mut buf = [0u8; 64 * 1024];
            loop {
                let n = temp_file.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                zip.write_all(&buf[..n])?;
            }
            log::debug!("packaged sheet '{}' as {zip_path}", worksheet.name);
        }

        Ok(zip.finish()?)
    }
}

/// Column count of a sheet (`XFD`).
const MAX_COLUMNS: u32 = 16_384;
const MAX_ROWS: u32 = 1_048_576;

pub(crate) fn make_cell_ref(row: u32, col: u32) -> String {
    format!("{}{}", col_to_letters(col), row)
}

pub(crate) fn col_to_letters(mut col: u32) -> String {
    let mut result = Vec::new();
    loop {
        result.push(char::from(b'A' + (col % 26) as u8));
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result.iter().rev().collect()
}

/// Splits an `A1` reference into a 0-based column and 1-based row.
pub(crate) fn parse_cell_ref(cell_ref: &str) -> Option<(u32, u32)> {
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let col = letters.chars().try_fold(0u32, |acc, c| {
        let digit = c.to_ascii_uppercase() as u32 - 'A' as u32 + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })?;
    if col > MAX_COLUMNS {
        return None;
    }
    let row = digits.parse::<u32>().ok().filter(|r| (1..=MAX_ROWS).contains(r))?;
    Some((col - 1, row))
}

pub(crate) fn xml_escape(s: &str) -> String {
    quick_xml::escape::escape(s).into_owned()
}

pub(crate) fn write_cell<W: Write>(w: &mut W, cell_ref: &str, cell: &ResolvedCell) -> Result<()> {
    let s = match cell.style {
        Some(0) | None => String::new(),
        Some(n) => format!(" s=\"{n}\""),
    };

    if cell.value.is_empty() {
        write!(w, "<c r=\"{cell_ref}\"{s}/>")?;
        return Ok(());
    }

    match cell.data_type {
        CellDataType::Number | CellDataType::Date => {
            write!(w, "<c r=\"{cell_ref}\"{s}><v>{}</v></c>", cell.value)?;
        }
        CellDataType::Text => {
            let escaped = xml_escape(&cell.value);
            let space = if cell.value.trim() != cell.value {
                " xml:space=\"preserve\""
            } else {
                ""
            };
            write!(
                w,
                "<c r=\"{cell_ref}\"{s} t=\"inlineStr\"><is><t{space}>{escaped}</t></is></c>"
            )?;
        }
        CellDataType::Boolean => {
            write!(w, "<c r=\"{cell_ref}\"{s} t=\"b\"><v>{}</v></c>", cell.value)?;
        }
    }
    Ok(())
}

pub(crate) fn zip_write_str<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &str,
    content: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(path, options)?;
    zip.write_all(content.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(col_to_letters(701), "ZZ");
        assert_eq!(make_cell_ref(2, 27), "AB2");
    }

    #[test]
    fn cell_refs_parse_back() {
        assert_eq!(parse_cell_ref("A2"), Some((0, 2)));
        assert_eq!(parse_cell_ref("ab10"), Some((27, 10)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("12"), None);
    }

    #[test]
    fn out_of_range_refs_are_rejected() {
        assert_eq!(parse_cell_ref("XFD1"), Some((16_383, 1)));
        assert_eq!(parse_cell_ref("XFE1"), None);
        assert_eq!(parse_cell_ref("ZZZZZZZZ2"), None);
        assert_eq!(parse_cell_ref("A1048577"), None);
        assert_eq!(parse_cell_ref("A99999999999"), None);
    }

    #[test]
    fn edge_whitespace_is_preserved() {
        let mut out = Vec::new();
        let padded = ResolvedCell { value: " a ".into(), data_type: CellDataType::Text, style: None };
        write_cell(&mut out, "A1", &padded).unwrap();
        let inner = ResolvedCell { value: "a b".into(), data_type: CellDataType::Text, style: None };
        write_cell(&mut out, "B1", &inner).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve"> a </t></is></c>"#,
                r#"<c r="B1" t="inlineStr"><is><t>a b</t></is></c>"#,
            )
        );
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(xml_escape("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
        assert_eq!(xml_escape("plain"), "plain");
    }

    #[test]
    fn cells_render_by_type() {
        let mut out = Vec::new();
        let cells = [
            ResolvedCell { value: "1".into(), data_type: CellDataType::Boolean, style: None },
            ResolvedCell { value: "43952".into(), data_type: CellDataType::Date, style: Some(3) },
            ResolvedCell { value: "a&b".into(), data_type: CellDataType::Text, style: Some(0) },
            ResolvedCell { value: String::new(), data_type: CellDataType::Number, style: Some(2) },
        ];
        for (i, cell) in cells.iter().enumerate() {
            write_cell(&mut out, &make_cell_ref(1, i as u32), cell).unwrap();
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            concat!(
                r#"<c r="A1" t="b"><v>1</v></c>"#,
                r#"<c r="B1" s="3"><v>43952</v></c>"#,
                r#"<c r="C1" t="inlineStr"><is><t>a&amp;b</t></is></c>"#,
                r#"<c r="D1" s="2"/>"#,
            )
        );
    }
}
