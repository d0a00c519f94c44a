mod cli;
mod config;
mod constants;
mod leads;
mod routines;
mod scraping;
mod sheets;

use std::process::ExitCode;
use std::sync::Arc;

use error_stack::ResultExt;
use thiserror::Error;

use crate::config::app_config::AppConfig;
use crate::leads::repository::LeadRepository;
use crate::leads::searcher::BusinessSearcher;
use crate::routines::maps_leads_routine::MapsLeadsRoutine;
use crate::routines::routine::Routine;
use crate::scraping::gmaps_searcher::GmapsSearcher;
use crate::sheets::lead_repository::SpreadsheetLeadRepository;
use crate::sheets::spreadsheet_manager::SpreadsheetManager;

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration stage failed")]
    Config,
    #[error("Credential stage failed")]
    Auth,
    #[error("Run failed")]
    Routine,
}

async fn run() -> error_stack::Result<(), AppError> {
    let app_config = AppConfig::load(constants::CONFIG_FILE).change_context(AppError::Config)?;
    log::info!(
        "Loaded config: {} business types, {} locations, spreadsheet {}",
        app_config.business_types.len(),
        app_config.locations.len(),
        app_config.spreadsheet_id
    );

    let spreadsheet_manager = Arc::new(
        SpreadsheetManager::new(app_config.spreadsheet())
            .await
            .change_context(AppError::Auth)?,
    );

    let repository: Arc<dyn LeadRepository> = Arc::new(SpreadsheetLeadRepository::new(
        Arc::clone(&spreadsheet_manager),
    ));
    let searcher: Arc<dyn BusinessSearcher> = Arc::new(GmapsSearcher);

    let routine = MapsLeadsRoutine::new(&app_config, searcher, repository);
    routine.run().await.change_context(AppError::Routine)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(report) => {
            log::error!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}
