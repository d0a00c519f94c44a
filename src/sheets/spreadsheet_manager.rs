use error_stack::{Context, Result, ResultExt};
use google_sheets4::{api::ValueRange, Sheets};
use serde_json::Value;

use crate::config::sheets_config::SpreadsheetConfig;
use crate::leads::record::SheetRow;

use super::auth::{self, AuthError};
use super::http_client;
use super::value_range_factory::ValueRangeFactory;

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<
        google_sheets4::hyper_rustls::HttpsConnector<google_sheets4::hyper::client::HttpConnector>,
    >,
}

#[derive(Debug)]
pub enum SpreadsheetManagerError {
    FailedToFetchRange,
    FailedToWriteHeader,
    FailedToAppendRows,
}

impl std::fmt::Display for SpreadsheetManagerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Context for SpreadsheetManagerError {}

impl SpreadsheetManager {
    /// Builds the authorized hub and probes the target spreadsheet, so
    /// bad credentials or a missing share surface here instead of at the
    /// first write.
    pub async fn new(config: SpreadsheetConfig) -> Result<Self, AuthError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config.credentials_file, client.clone()).await?;
        let hub = Sheets::new(client, auth);

        let manager = SpreadsheetManager { config, hub };
        manager.probe_access().await?;

        Ok(manager)
    }

    async fn probe_access(&self) -> Result<(), AuthError> {
        self.hub
            .spreadsheets()
            .get(&self.config.spreadsheet_id)
            .doit()
            .await
            .map(|_| ())
            .change_context_lazy(|| {
                AuthError::SpreadsheetAccess(self.config.spreadsheet_id.clone())
            })
    }

    async fn read_range(&self, range: &str) -> Result<ValueRange, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)?;

        let value_range = response.1;
        Ok(value_range)
    }

    /// The current contents of row 1, or `None` while the sheet is still
    /// empty.
    pub async fn header_row(&self) -> Result<Option<Vec<String>>, SpreadsheetManagerError> {
        let range = format!("'{}'!1:1", self.config.sheet_title);
        let value_range = self.read_range(&range).await?;

        let first_row = value_range
            .values
            .and_then(|rows| rows.into_iter().next())
            .map(|row| row.into_iter().map(cell_to_string).collect());

        Ok(first_row)
    }

    pub async fn write_header_row(&self, headers: &[String]) -> Result<(), SpreadsheetManagerError> {
        let range = format!(
            "'{}'!A1:{}1",
            self.config.sheet_title,
            column_letter(headers.len())
        );

        self.hub
            .spreadsheets()
            .values_update(
                ValueRange::from_row(headers),
                &self.config.spreadsheet_id,
                &range,
            )
            .value_input_option("RAW")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToWriteHeader)
    }

    /// Appends the rows after the sheet's existing content, in order.
    pub async fn append_rows(&self, rows: &[SheetRow]) -> Result<(), SpreadsheetManagerError> {
        if rows.is_empty() {
            return Ok(());
        }

        let width = rows.iter().map(Vec::len).max().unwrap_or(1);
        let range = format!("'{}'!A:{}", self.config.sheet_title, column_letter(width));

        self.hub
            .spreadsheets()
            .values_append(
                ValueRange::from_grid(rows),
                &self.config.spreadsheet_id,
                &range,
            )
            .value_input_option("RAW")
            .insert_data_option("INSERT_ROWS")
            .doit()
            .await
            .map(|_| ())
            .change_context(SpreadsheetManagerError::FailedToAppendRows)
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

/// A1 column letter for a 1-based column count. The fixed row layout
/// never leaves A-Z.
fn column_letter(count: usize) -> char {
    (b'A' + count.saturating_sub(1).min(25) as u8) as char
}
