use chrono::{Duration, NaiveDate};
use xlsx_export::{
    Alignment, Border, ColumnSpec, DataTable, HorizontalAlignment, SheetSpec, SourceValue,
    ValueKind, WorkbookBuilder, XlsxExportError,
};

fn test_data(rows: usize) -> Result<DataTable, XlsxExportError> {
    let mut dt = DataTable::new();
    dt.add_column("Date", ValueKind::DateTime)?;
    dt.add_column("Integer", ValueKind::Int32)?;
    dt.add_column("Float", ValueKind::Float64)?;
    dt.add_column("Currency", ValueKind::Decimal)?;
    dt.add_column("Percent", ValueKind::Float64)?;
    dt.add_column("String", ValueKind::String)?;

    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN);
    for i in 0..rows {
        let n = i as i64;
        dt.push_row([
            SourceValue::Date(start + Duration::days(n % 365)),
            SourceValue::I32(i as i32),
            SourceValue::F64(n as f64 * 1.25),
            SourceValue::Decimal(format!("{}.{:02}", n * 3 - 5_000, n % 100)),
            SourceValue::F64((n % 100) as f64 / 100.0),
            SourceValue::Text(format!("{:08x}-{:04x}", n.wrapping_mul(2_654_435_761), n % 0xffff)),
        ]);
    }
    Ok(dt)
}

fn formatted_spec() -> SheetSpec {
    SheetSpec::new("Number Formats")
        .freeze_pane("A2")
        .column(ColumnSpec::new("Date").header("Short\nDate").width(10.5).format_id(14))
        .column(ColumnSpec::new("Integer").header("Whole\nNumber").width(9.8).format_id(1))
        .column(ColumnSpec::new("Float").header("Floating\nPoint").width(10.8).format_id(2))
        .column(ColumnSpec::new("Currency").header("Dollars").width(9.0).format_id(8))
        .column(ColumnSpec::new("Percent").header("Percentage").width(12.2).format_id(10))
        .column(
            ColumnSpec::new("String")
                .header("GUID")
                .width(42.0)
                .border(Border::thin_box())
                .alignment(Alignment::new().horizontal(HorizontalAlignment::Right)),
        )
}

fn main() -> Result<(), XlsxExportError> {
    let data = test_data(10_000)?;

    let mut wb = WorkbookBuilder::new("./WithFormatting.xlsx").build();
    wb.add_sheet(&formatted_spec(), &data)?;
    println!(
        "WithFormatting.xlsx: {} cell formats",
        wb.style_table().cell_formats().len()
    );
    wb.finish()?;

    let mut wb = WorkbookBuilder::new("./NoFormatting.xlsx").build();
    wb.add_sheet(&SheetSpec::from_source("Test", &data), &data)?;
    println!(
        "NoFormatting.xlsx: {} cell formats",
        wb.style_table().cell_formats().len()
    );
    wb.finish()?;

    Ok(())
}
