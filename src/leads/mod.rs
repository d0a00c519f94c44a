pub mod query;
pub mod record;
pub mod repository;
pub mod searcher;
