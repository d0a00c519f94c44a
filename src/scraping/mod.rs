pub mod gmaps_scraper;
pub mod gmaps_searcher;
pub mod listing;
pub mod scraper_driver;
pub mod selectors;
