use crate::{workbook::Workbook, workbook::style::StyleTable};

pub struct WorkbookBuilder<T: Into<String>> {
    path: T,
    style_table: StyleTable,
}

impl<T> WorkbookBuilder<T>
where
    T: Into<String>,
{
    pub fn new(path: T) -> Self {
        Self {
            path,
            style_table: StyleTable::with_defaults(),
        }
    }

    /// Starts from a caller-prepared table instead of the standard defaults,
    /// e.g. to pre-register formats so their indices are fixed.
    pub fn set_style_table(mut self, style_table: StyleTable) -> Self {
        self.style_table = style_table;
        self
    }

    pub fn build(self) -> Workbook {
        Workbook::new_with_builder(self.path.into(), self.style_table)
    }
}
