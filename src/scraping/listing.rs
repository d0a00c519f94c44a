use std::collections::BTreeSet;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::leads::record::BusinessRecord;

/// Raw fields pulled off one place page, before any shape guarantees.
///
/// Everything is optional here; the conversion below decides what is
/// usable.
#[derive(Debug, Clone, Default)]
pub struct RawListing {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<String>,
    pub review_count: Option<String>,
    pub social_links: BTreeSet<String>,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MalformedListing {
    #[error("Listing has no name")]
    MissingName,
    #[error("Listing \"{0}\" has no address")]
    MissingAddress(String),
}

impl TryFrom<RawListing> for BusinessRecord {
    type Error = MalformedListing;

    /// A listing without a usable name or address identifies nothing and
    /// is rejected; every other field degrades to absent.
    fn try_from(raw: RawListing) -> Result<Self, Self::Error> {
        let name = non_empty(raw.name).ok_or(MalformedListing::MissingName)?;
        let address =
            non_empty(raw.address).ok_or_else(|| MalformedListing::MissingAddress(name.clone()))?;
        let review_summary = review_summary(raw.rating.as_deref(), raw.review_count.as_deref());

        Ok(BusinessRecord {
            name,
            address,
            phone: non_empty(raw.phone),
            website: non_empty(raw.website),
            social_links: raw.social_links,
            review_summary,
        })
    }
}

/// Trims scraped text and turns whitespace-only values into `None`, so
/// absent data always renders as an empty cell downstream.
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}

/// Folds the scraped rating and review-count fragments into one cell,
/// e.g. `4.6 stars (1,234 reviews)`. Listings that were never rated get
/// no summary at all.
fn review_summary(rating: Option<&str>, review_count: Option<&str>) -> Option<String> {
    let rating = rating.map(str::trim).filter(|text| !text.is_empty())?;

    match review_count.and_then(extract_count) {
        Some(count) => Some(format!("{} stars ({} reviews)", rating, count)),
        None => Some(format!("{} stars", rating)),
    }
}

/// Pulls the number out of review-count text, which Maps renders in
/// shapes like `(1,234)` or `1,234 reviews`.
fn extract_count(text: &str) -> Option<String> {
    let count_regex = Regex::new(r"\d[\d,]*").unwrap();
    count_regex
        .find(text)
        .map(|matched| matched.as_str().to_owned())
}

const SOCIAL_HOSTS: [&str; 7] = [
    "facebook.com",
    "instagram.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "youtube.com",
    "tiktok.com",
];

/// True when the href points at a social platform profile worth a cell
/// in the sheet.
pub fn is_social_link(href: &str) -> bool {
    let Ok(url) = Url::parse(href) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    SOCIAL_HOSTS
        .iter()
        .any(|social| host_matches(host, social))
}

fn host_matches(host: &str, social: &str) -> bool {
    host == social
        || host
            .strip_suffix(social)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_listing() -> RawListing {
        RawListing {
            name: Some("Café Central".to_string()),
            address: Some("Praça do Comércio 1, Lisbon".to_string()),
            phone: Some("+351 21 000 0000".to_string()),
            website: Some("https://cafecentral.example".to_string()),
            rating: Some("4.6".to_string()),
            review_count: Some("(1,234)".to_string()),
            social_links: BTreeSet::from(["https://facebook.com/cafecentral".to_string()]),
        }
    }

    #[test]
    fn test_full_listing_converts_with_every_field() {
        let record = BusinessRecord::try_from(full_listing()).unwrap();

        assert_eq!(record.name, "Café Central");
        assert_eq!(record.address, "Praça do Comércio 1, Lisbon");
        assert_eq!(record.phone.as_deref(), Some("+351 21 000 0000"));
        assert_eq!(record.website.as_deref(), Some("https://cafecentral.example"));
        assert_eq!(
            record.review_summary.as_deref(),
            Some("4.6 stars (1,234 reviews)")
        );
    }

    #[test]
    fn test_listing_without_a_name_is_rejected() {
        let listing = RawListing {
            name: None,
            ..full_listing()
        };

        assert_eq!(
            BusinessRecord::try_from(listing),
            Err(MalformedListing::MissingName)
        );
    }

    #[test]
    fn test_whitespace_name_counts_as_missing() {
        let listing = RawListing {
            name: Some("   ".to_string()),
            ..full_listing()
        };

        assert_eq!(
            BusinessRecord::try_from(listing),
            Err(MalformedListing::MissingName)
        );
    }

    #[test]
    fn test_listing_without_an_address_is_rejected() {
        let listing = RawListing {
            address: None,
            ..full_listing()
        };

        assert_eq!(
            BusinessRecord::try_from(listing),
            Err(MalformedListing::MissingAddress("Café Central".to_string()))
        );
    }

    #[test]
    fn test_optional_fields_degrade_to_none() {
        let listing = RawListing {
            name: Some("Café Central".to_string()),
            address: Some("Praça do Comércio 1, Lisbon".to_string()),
            phone: Some("  ".to_string()),
            ..RawListing::default()
        };

        let record = BusinessRecord::try_from(listing).unwrap();

        assert_eq!(record.phone, None);
        assert_eq!(record.website, None);
        assert_eq!(record.review_summary, None);
        assert!(record.social_links.is_empty());
    }

    #[test]
    fn test_review_summary_includes_count_when_present() {
        assert_eq!(
            review_summary(Some("4.6"), Some("(1,234)")).as_deref(),
            Some("4.6 stars (1,234 reviews)")
        );
        assert_eq!(
            review_summary(Some("5.0"), Some("712 reviews")).as_deref(),
            Some("5.0 stars (712 reviews)")
        );
    }

    #[test]
    fn test_review_summary_without_count_keeps_the_rating() {
        assert_eq!(review_summary(Some("4.6"), None).as_deref(), Some("4.6 stars"));
    }

    #[test]
    fn test_review_summary_without_rating_is_absent() {
        assert_eq!(review_summary(None, Some("(1,234)")), None);
    }

    #[test]
    fn test_social_links_match_known_hosts_only() {
        assert!(is_social_link("https://www.facebook.com/cafecentral"));
        assert!(is_social_link("https://instagram.com/cafecentral"));
        assert!(is_social_link("https://x.com/cafecentral"));
        assert!(!is_social_link("https://maps.google.com/maps/place/x"));
        assert!(!is_social_link("https://cafecentral.example"));
        assert!(!is_social_link("not a url at all"));
    }

    #[test]
    fn test_lookalike_hosts_are_not_social_links() {
        assert!(!is_social_link("https://notfacebook.com/cafecentral"));
        assert!(!is_social_link("https://facebook.com.example.net/phish"));
    }
}
