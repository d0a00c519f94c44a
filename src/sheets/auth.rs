use error_stack::{Result, ResultExt};
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use google_sheets4::{hyper, hyper_rustls};
use thiserror::Error;

use super::http_client::HttpClient;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Service account key {0} is missing or unreadable")]
    ReadKey(Box<str>),
    #[error("Could not build the service account authenticator")]
    Authenticate,
    #[error("Spreadsheet {0} is not accessible with the provided credentials")]
    SpreadsheetAccess(Box<str>),
}

pub type SheetsAuthenticator =
    Authenticator<hyper_rustls::HttpsConnector<hyper::client::HttpConnector>>;

/// Exchanges a service account key file for an authorized Sheets session.
pub async fn auth(credentials_file: &str, client: HttpClient) -> Result<SheetsAuthenticator, AuthError> {
    let secret: oauth2::ServiceAccountKey = oauth2::read_service_account_key(credentials_file)
        .await
        .change_context_lazy(|| AuthError::ReadKey(credentials_file.into()))?;

    oauth2::ServiceAccountAuthenticator::with_client(secret, client)
        .build()
        .await
        .change_context(AuthError::Authenticate)
}
