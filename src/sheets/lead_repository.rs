use std::sync::Arc;

use async_trait::async_trait;
use error_stack::{Result, ResultExt};

use crate::leads::record::SheetRow;
use crate::leads::repository::{LeadRepository, WriteError};

use super::spreadsheet_manager::SpreadsheetManager;

/// [`LeadRepository`] backed by a Google Sheets tab.
pub struct SpreadsheetLeadRepository {
    pub spreadsheet_manager: Arc<SpreadsheetManager>,
}

impl SpreadsheetLeadRepository {
    pub fn new(spreadsheet_manager: Arc<SpreadsheetManager>) -> Self {
        Self {
            spreadsheet_manager,
        }
    }
}

#[async_trait]
impl LeadRepository for SpreadsheetLeadRepository {
    async fn ensure_header_row(&self, headers: &[String]) -> Result<(), WriteError> {
        let existing = self
            .spreadsheet_manager
            .header_row()
            .await
            .change_context(WriteError::HeaderRow)?;

        match existing {
            None => {
                log::info!("Sheet is empty, writing the configured header row");
                self.spreadsheet_manager
                    .write_header_row(headers)
                    .await
                    .change_context(WriteError::HeaderRow)
            }
            Some(current) if current != headers => {
                log::warn!(
                    "Sheet headers {:?} differ from configured {:?}; new rows keep the configured column order",
                    current,
                    headers
                );
                Ok(())
            }
            Some(_) => Ok(()),
        }
    }

    async fn append_rows(&self, rows: &[SheetRow]) -> Result<(), WriteError> {
        self.spreadsheet_manager
            .append_rows(rows)
            .await
            .change_context(WriteError::Append)
    }
}
