/// Everything the sheets layer needs to reach its destination tab.
#[derive(Debug, Clone)]
pub struct SpreadsheetConfig {
    pub credentials_file: Box<str>,
    pub spreadsheet_id: Box<str>,
    pub sheet_title: Box<str>,
}
