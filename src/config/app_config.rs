use std::path::Path;

use config::{Config, File, FileFormat};
use error_stack::{report, Result, ResultExt};
use thiserror::Error;

use crate::constants;
use crate::leads::record;

use super::sheets_config::SpreadsheetConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file {0} is missing or unreadable")]
    Unreadable(Box<str>),
    #[error("Config file {0} is malformed")]
    Malformed(Box<str>),
    #[error("Expected {expected} column headers, found {found}")]
    HeaderCount { expected: usize, found: usize },
}

fn default_sheet_title() -> Box<str> {
    "Sheet1".into()
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub spreadsheet_id: Box<str>,
    pub business_types: Vec<String>,
    pub locations: Vec<String>,
    pub headers: Vec<String>,
    #[serde(default = "default_sheet_title")]
    pub sheet_title: Box<str>,
}

impl AppConfig {
    /// Reads and validates the run configuration from a JSON file.
    ///
    /// `business_types` and `locations` may be empty (the run then has
    /// nothing to do), but the header list must match the column layout
    /// rows are written in.
    pub fn load(path: &str) -> Result<AppConfig, ConfigError> {
        let built = Config::builder()
            .add_source(File::from(Path::new(path)).format(FileFormat::Json))
            .build()
            .map_err(|e| match e {
                config::ConfigError::FileParse { .. } => {
                    report!(e).change_context(ConfigError::Malformed(path.into()))
                }
                _ => report!(e).change_context(ConfigError::Unreadable(path.into())),
            })?;

        let app_config: AppConfig = built
            .try_deserialize()
            .change_context(ConfigError::Malformed(path.into()))?;

        if app_config.headers.len() != record::COLUMN_COUNT {
            return Err(report!(ConfigError::HeaderCount {
                expected: record::COLUMN_COUNT,
                found: app_config.headers.len(),
            }));
        }

        Ok(app_config)
    }

    /// The slice of the configuration the sheets layer cares about, with
    /// the fixed credentials path attached.
    pub fn spreadsheet(&self) -> SpreadsheetConfig {
        SpreadsheetConfig {
            credentials_file: constants::CREDENTIALS_FILE.into(),
            spreadsheet_id: self.spreadsheet_id.clone(),
            sheet_title: self.sheet_title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &tempfile::TempDir, contents: &str) -> String {
        let path = dir.path().join("config.json");
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    const VALID: &str = r#"{
        "spreadsheet_id": "sheet-123",
        "business_types": ["cafe"],
        "locations": ["Seattle, WA"],
        "headers": ["Name", "Address", "Phone", "Website", "Social Links", "Reviews"]
    }"#;

    #[test]
    fn test_loads_a_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, VALID);

        let app_config = AppConfig::load(&path).unwrap();

        assert_eq!(&*app_config.spreadsheet_id, "sheet-123");
        assert_eq!(app_config.business_types, vec!["cafe"]);
        assert_eq!(app_config.locations, vec!["Seattle, WA"]);
        assert_eq!(app_config.headers.len(), record::COLUMN_COUNT);
        assert_eq!(&*app_config.sheet_title, "Sheet1");
    }

    #[test]
    fn test_sheet_title_can_be_overridden() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "spreadsheet_id": "sheet-123",
                "business_types": [],
                "locations": [],
                "headers": ["A", "B", "C", "D", "E", "F"],
                "sheet_title": "Leads"
            }"#,
        );

        let app_config = AppConfig::load(&path).unwrap();

        assert_eq!(&*app_config.sheet_title, "Leads");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let report = AppConfig::load("definitely/not/here.json").unwrap_err();

        assert!(matches!(
            report.current_context(),
            ConfigError::Unreadable(_)
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "{ this is not json");

        let report = AppConfig::load(&path).unwrap_err();

        assert!(matches!(report.current_context(), ConfigError::Malformed(_)));
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "spreadsheet_id": "sheet-123",
                "business_types": ["cafe"],
                "headers": ["A", "B", "C", "D", "E", "F"]
            }"#,
        );

        let report = AppConfig::load(&path).unwrap_err();

        assert!(matches!(report.current_context(), ConfigError::Malformed(_)));
    }

    #[test]
    fn test_wrong_header_count_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"{
                "spreadsheet_id": "sheet-123",
                "business_types": ["cafe"],
                "locations": ["Seattle, WA"],
                "headers": ["Name", "Address"]
            }"#,
        );

        let report = AppConfig::load(&path).unwrap_err();

        assert!(matches!(
            report.current_context(),
            ConfigError::HeaderCount {
                expected: record::COLUMN_COUNT,
                found: 2
            }
        ));
    }

    #[test]
    fn test_spreadsheet_slice_carries_the_fixed_credentials_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, VALID);

        let spreadsheet = AppConfig::load(&path).unwrap().spreadsheet();

        assert_eq!(&*spreadsheet.credentials_file, constants::CREDENTIALS_FILE);
        assert_eq!(&*spreadsheet.spreadsheet_id, "sheet-123");
        assert_eq!(&*spreadsheet.sheet_title, "Sheet1");
    }
}
