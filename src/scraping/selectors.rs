// Selectors for the Google Maps UI as currently shipped. Maps changes its
// markup without notice, so when extraction starts coming back empty this
// is the first file to revisit.

pub const SEARCH_BOX: &str = "#searchboxinput";

pub const RESULTS_FEED: &str = "//div[@role='feed']";
pub const RESULT_PLACE_LINKS: &str = "//div[@role='feed']//div//a[contains(@href, '/place/')]";

pub const PLACE_NAME: &str = "//h1";
pub const PLACE_ADDRESS: &str = "(//button[@data-item-id = 'address']//div)[4]";
pub const PLACE_WEBSITE_LINK: &str = "//a[@data-item-id = 'authority']";
pub const PLACE_WEBSITE: &str = "(//*[@aria-label[contains(., 'Website')]]//div)[4]";
pub const PLACE_PHONE: &str = "(//*[@aria-label[contains(., 'Phone')]]//div)[4]";
pub const PLACE_RATING: &str =
    "//span[@role='img' and contains(@aria-label, 'stars')]/preceding-sibling::span[1]";
pub const PLACE_REVIEW_COUNT: &str = "//span[@aria-label[contains(., 'reviews')]]";

// Any anchor on a place page; social profiles are picked out of these by
// host.
pub const ANCHORS: &str = "a[href]";
