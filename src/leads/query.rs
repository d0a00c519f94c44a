use std::fmt;

/// One search against the maps data source: a business type looked up in
/// a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub business_type: String,
    pub location: String,
}

impl Query {
    pub fn new(business_type: impl Into<String>, location: impl Into<String>) -> Self {
        Query {
            business_type: business_type.into(),
            location: location.into(),
        }
    }

    /// The term typed into the maps search box.
    pub fn search_term(&self) -> String {
        format!("{} in {}", self.business_type, self.location)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.search_term())
    }
}

/// Expands the configured lists into the full batch of queries for one
/// run.
///
/// Locations drive the outer loop: every business type for one location
/// is searched (and its rows appended) before the next location starts,
/// so rows for the same location stay grouped in the sheet.
pub fn plan(business_types: &[String], locations: &[String]) -> Vec<Query> {
    let mut queries = Vec::with_capacity(business_types.len() * locations.len());
    for location in locations {
        for business_type in business_types {
            queries.push(Query::new(business_type, location));
        }
    }
    queries
}
