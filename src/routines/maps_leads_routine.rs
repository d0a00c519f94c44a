use std::sync::Arc;

use error_stack::ResultExt;
use indicatif::ProgressBar;

use crate::{
    cli::progress::{finish_progress, new_progress, ProgressBarExt},
    config::app_config::AppConfig,
    leads::query::{self, Query},
    leads::record::SheetRow,
    leads::repository::LeadRepository,
    leads::searcher::BusinessSearcher,
};

use super::routine::{Routine, RoutineError};

/// The whole pipeline for one run: make sure the destination sheet has
/// its header row, then walk every (location, business type) query,
/// normalize the listings and append them.
///
/// A failed query is logged and skipped; a failed append aborts the run,
/// since at that point the destination itself is broken.
pub struct MapsLeadsRoutine {
    queries: Vec<Query>,
    headers: Vec<String>,
    searcher: Arc<dyn BusinessSearcher>,
    repository: Arc<dyn LeadRepository>,
}

impl MapsLeadsRoutine {
    pub fn new(
        config: &AppConfig,
        searcher: Arc<dyn BusinessSearcher>,
        repository: Arc<dyn LeadRepository>,
    ) -> Self {
        Self {
            queries: query::plan(&config.business_types, &config.locations),
            headers: config.headers.clone(),
            searcher,
            repository,
        }
    }
}

#[async_trait::async_trait]
impl Routine for MapsLeadsRoutine {
    fn name(&self) -> &str {
        "Maps Leads"
    }

    async fn run(&self) -> error_stack::Result<(), RoutineError> {
        log::info!("Running {} with {} queries", self.name(), self.queries.len());

        self.repository
            .ensure_header_row(&self.headers)
            .await
            .change_context_lazy(|| RoutineError::failure("Could not prepare the header row"))?;

        let progress = new_progress(ProgressBar::new(self.queries.len() as u64));

        let mut succeeded = 0usize;
        let mut rows_appended = 0usize;

        for query in &self.queries {
            progress.trace(format!("🔎 Searching \"{}\"", query));

            match self.searcher.search(query).await {
                Ok(records) => {
                    let rows: Vec<SheetRow> =
                        records.iter().map(|record| record.to_sheet_row()).collect();

                    if !rows.is_empty() {
                        self.repository.append_rows(&rows).await.change_context_lazy(
                            || {
                                RoutineError::failure(format!(
                                    "Could not append rows for \"{}\"",
                                    query
                                ))
                            },
                        )?;
                    }

                    succeeded += 1;
                    rows_appended += rows.len();
                    progress.info(format!("📝 \"{}\": {} rows appended", query, rows.len()));
                }
                Err(report) => {
                    progress.warn(format!("❌ \"{}\" failed, skipping", query));
                    log::warn!("Query \"{}\" failed: {:?}", query, report);
                }
            }

            progress.inc(1);
        }

        finish_progress(&progress);
        log::info!(
            "✅ {} of {} queries succeeded, {} rows appended",
            succeeded,
            self.queries.len(),
            rows_appended
        );

        Ok(())
    }
}
