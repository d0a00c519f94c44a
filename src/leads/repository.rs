use async_trait::async_trait;
use thiserror::Error;

use super::record::SheetRow;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to verify the header row")]
    HeaderRow,
    #[error("Failed to append rows to the spreadsheet")]
    Append,
}

/// Destination for normalized lead rows.
///
/// The production implementation appends to a Google Sheets tab; tests
/// substitute an in-memory sink.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Makes sure row 1 of the destination sheet carries the configured
    /// headers, writing them if the sheet is still empty.
    async fn ensure_header_row(&self, headers: &[String])
        -> error_stack::Result<(), WriteError>;

    /// Appends the rows below the sheet's existing content, preserving
    /// their order.
    async fn append_rows(&self, rows: &[SheetRow]) -> error_stack::Result<(), WriteError>;
}
