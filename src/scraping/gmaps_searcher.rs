use async_trait::async_trait;
use error_stack::{report, Report, Result};

use crate::leads::query::Query;
use crate::leads::record::BusinessRecord;
use crate::leads::searcher::{BusinessSearcher, SearchError};

use super::gmaps_scraper::GmapsScraper;

/// [`BusinessSearcher`] over the Google Maps UI.
///
/// Every query runs in its own WebDriver session, so one wedged page
/// cannot leak into the next query.
pub struct GmapsSearcher;

fn scrape_failure(context: SearchError, error: anyhow::Error) -> Report<SearchError> {
    report!(context).attach_printable(format!("{:#}", error))
}

#[async_trait]
impl BusinessSearcher for GmapsSearcher {
    async fn search(&self, query: &Query) -> Result<Vec<BusinessRecord>, SearchError> {
        log::info!("Searching maps for \"{}\"", query);

        let mut scraper = GmapsScraper::new()
            .await
            .map_err(|error| scrape_failure(SearchError::Session, error))?;

        let urls = scraper
            .collect_place_urls(query)
            .await
            .map_err(|error| scrape_failure(SearchError::query_failed(query), error))?;

        if urls.is_empty() {
            return Err(report!(SearchError::no_results(query)));
        }

        log::info!("Found {} places for \"{}\"", urls.len(), query);

        scraper
            .collect_listings(&urls)
            .await
            .map_err(|error| scrape_failure(SearchError::query_failed(query), error))
    }
}
