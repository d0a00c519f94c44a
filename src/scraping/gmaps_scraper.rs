use std::collections::BTreeSet;
use std::time::Duration;

use fantoccini::Locator;
use url::Url;

use crate::leads::query::Query;
use crate::leads::record::BusinessRecord;

use super::listing::{self, RawListing};
use super::scraper_driver::ScraperDriver;
use super::selectors;

const MAPS_URL: &str = "https://www.google.com/maps";
const PLACE_URL_PREFIX: &str = "https://www.google.com/maps/place";

/// How long to wait for the search box, results feed or place heading
/// before giving up on the page.
const ELEMENT_TIMEOUT: Duration = Duration::from_secs(30);
/// The side panel keeps hydrating after the place heading shows up.
const PLACE_PAGE_SETTLE: Duration = Duration::from_secs(2);
const SCROLL_PAUSE: Duration = Duration::from_secs(1);
/// Feed scrolling stops after this many rounds even if results keep
/// loading.
const MAX_SCROLL_ROUNDS: usize = 30;
/// ...and earlier, once this many successive rounds add no new links.
const STAGNANT_ROUNDS_CUTOFF: usize = 3;
/// The WebDriver session is replaced after this many place visits.
const VISITS_PER_SESSION: usize = 10;

const SCROLL_FEED_SCRIPT: &str = r#"
    const feed = document.querySelector("div[role='feed']");
    if (feed) { feed.scrollTop = feed.scrollHeight; }
"#;

/// Drives the Google Maps UI for one query: submit the search, scroll
/// the results feed out, then visit every place page and pull its
/// listing fields.
pub struct GmapsScraper {
    driver: ScraperDriver,
    visits: usize,
}

impl GmapsScraper {
    pub async fn new() -> anyhow::Result<Self> {
        let driver = ScraperDriver::new().await?;
        Ok(GmapsScraper { driver, visits: 0 })
    }

    /// Submits the query on the maps home page and returns the place
    /// URLs its results feed links to, deduplicated, in feed order.
    pub async fn collect_place_urls(&self, query: &Query) -> anyhow::Result<Vec<String>> {
        self.open_maps().await?;
        self.submit_search(&query.search_term()).await?;

        if let Err(error) = self.scroll_results_feed().await {
            log::warn!("Scrolling the results feed failed, using what loaded: {}", error);
        }

        self.place_urls_in_feed().await
    }

    /// Visits every place URL and extracts a record from each.
    ///
    /// A page that cannot be read and a listing without a usable name or
    /// address are both logged and skipped; one bad place never sinks
    /// the rest of the batch.
    pub async fn collect_listings(&mut self, urls: &[String]) -> anyhow::Result<Vec<BusinessRecord>> {
        let mut records = Vec::with_capacity(urls.len());

        for url in urls {
            if self.visits != 0 && self.visits % VISITS_PER_SESSION == 0 {
                self.refresh_session().await?;
            }
            self.visits += 1;

            let raw = match self.extract_listing(url).await {
                Ok(raw) => raw,
                Err(error) => {
                    log::warn!("Skipping place {}: {}", url, error);
                    continue;
                }
            };

            match BusinessRecord::try_from(raw) {
                Ok(record) => records.push(record),
                Err(error) => log::warn!("Dropping listing from {}: {}", url, error),
            }
        }

        Ok(records)
    }

    async fn open_maps(&self) -> anyhow::Result<()> {
        self.driver.client.goto(MAPS_URL).await?;
        self.driver
            .client
            .wait()
            .at_most(ELEMENT_TIMEOUT)
            .for_element(Locator::Css(selectors::SEARCH_BOX))
            .await?;
        Ok(())
    }

    async fn submit_search(&self, term: &str) -> anyhow::Result<()> {
        log::trace!("Typing search term: {}", term);
        let search_box = self
            .driver
            .client
            .find(Locator::Css(selectors::SEARCH_BOX))
            .await?;
        search_box.send_keys(&format!("{}\n", term)).await?;

        self.driver
            .client
            .wait()
            .at_most(ELEMENT_TIMEOUT)
            .for_element(Locator::XPath(selectors::RESULTS_FEED))
            .await?;
        Ok(())
    }

    /// Scrolls the results feed to the bottom until the place-link count
    /// stops growing or the round budget runs out. Maps loads further
    /// results lazily as the feed scrolls.
    async fn scroll_results_feed(&self) -> anyhow::Result<()> {
        let mut seen = 0usize;
        let mut stagnant_rounds = 0usize;

        for _ in 0..MAX_SCROLL_ROUNDS {
            self.driver
                .client
                .execute(SCROLL_FEED_SCRIPT, vec![])
                .await?;
            tokio::time::sleep(SCROLL_PAUSE).await;

            let count = self
                .driver
                .client
                .find_all(Locator::XPath(selectors::RESULT_PLACE_LINKS))
                .await?
                .len();

            if count > seen {
                seen = count;
                stagnant_rounds = 0;
            } else {
                stagnant_rounds += 1;
                if stagnant_rounds >= STAGNANT_ROUNDS_CUTOFF {
                    break;
                }
            }
        }

        log::debug!("Results feed settled at {} place links", seen);
        Ok(())
    }

    async fn place_urls_in_feed(&self) -> anyhow::Result<Vec<String>> {
        let anchors = self
            .driver
            .client
            .find_all(Locator::XPath(selectors::RESULT_PLACE_LINKS))
            .await?;

        let mut urls = Vec::new();
        for anchor in anchors {
            let Some(href) = anchor.attr("href").await? else {
                continue;
            };
            if href.starts_with(PLACE_URL_PREFIX) && !urls.contains(&href) {
                urls.push(href);
            }
        }

        Ok(urls)
    }

    async fn extract_listing(&self, url: &str) -> anyhow::Result<RawListing> {
        let url = Url::parse(url)?;

        self.driver.client.goto(url.as_str()).await?;
        self.driver
            .client
            .wait()
            .at_most(ELEMENT_TIMEOUT)
            .for_element(Locator::XPath(selectors::PLACE_NAME))
            .await?;
        tokio::time::sleep(PLACE_PAGE_SETTLE).await;

        let raw = RawListing {
            name: self.text_of(Locator::XPath(selectors::PLACE_NAME)).await,
            address: self.text_of(Locator::XPath(selectors::PLACE_ADDRESS)).await,
            phone: self.text_of(Locator::XPath(selectors::PLACE_PHONE)).await,
            website: self.website_href().await,
            rating: self.text_of(Locator::XPath(selectors::PLACE_RATING)).await,
            review_count: self
                .text_of(Locator::XPath(selectors::PLACE_REVIEW_COUNT))
                .await,
            social_links: self.social_links_on_page().await,
        };

        log::trace!("Extracted {:?} from {}", raw.name, url.as_str());
        Ok(raw)
    }

    /// Best-effort text extraction. Listings simply lack many of these
    /// elements, so absence is data, not an error.
    async fn text_of(&self, locator: Locator<'_>) -> Option<String> {
        let element = self.driver.client.find(locator).await.ok()?;
        let text = element.text().await.ok()?;
        let text = text.trim();

        (!text.is_empty()).then(|| text.to_owned())
    }

    /// The website cell prefers the link target over the visible text,
    /// which Maps truncates for long domains.
    async fn website_href(&self) -> Option<String> {
        let link = self
            .driver
            .client
            .find(Locator::XPath(selectors::PLACE_WEBSITE_LINK))
            .await;

        if let Ok(element) = link {
            if let Ok(Some(href)) = element.attr("href").await {
                return Some(href);
            }
        }

        self.text_of(Locator::XPath(selectors::PLACE_WEBSITE)).await
    }

    async fn social_links_on_page(&self) -> BTreeSet<String> {
        let mut links = BTreeSet::new();

        let Ok(anchors) = self.driver.client.find_all(Locator::Css(selectors::ANCHORS)).await
        else {
            return links;
        };

        for anchor in anchors {
            if let Ok(Some(href)) = anchor.attr("href").await {
                if listing::is_social_link(&href) {
                    links.insert(href);
                }
            }
        }

        links
    }

    /// Tears the current session down and starts a fresh one. Maps visits
    /// run on a new session every [`VISITS_PER_SESSION`] pages.
    async fn refresh_session(&mut self) -> anyhow::Result<()> {
        log::debug!("Refreshing WebDriver session after {} visits", self.visits);
        let fresh = ScraperDriver::new().await?;
        drop(std::mem::replace(&mut self.driver, fresh));
        Ok(())
    }
}
