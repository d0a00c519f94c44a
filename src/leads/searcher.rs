use async_trait::async_trait;
use thiserror::Error;

use super::query::Query;
use super::record::BusinessRecord;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to start a scraping session")]
    Session,
    #[error("Search for \"{0}\" failed")]
    QueryFailed(String),
    #[error("No results found for \"{0}\"")]
    NoResults(String),
}

impl SearchError {
    pub fn query_failed(query: &Query) -> Self {
        SearchError::QueryFailed(query.search_term())
    }

    pub fn no_results(query: &Query) -> Self {
        SearchError::NoResults(query.search_term())
    }
}

/// Runs one query against the maps data source and returns the listings
/// it produced, already normalized.
///
/// A search that completes but matches nothing is an error
/// ([`SearchError::NoResults`]), so the caller can tell an empty town
/// apart from a broken page.
#[async_trait]
pub trait BusinessSearcher: Send + Sync {
    async fn search(&self, query: &Query)
        -> error_stack::Result<Vec<BusinessRecord>, SearchError>;
}
