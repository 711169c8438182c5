//! Client configuration

use std::time::Duration;

use crate::date::DateLocale;

/// Default API root, matching the development server layout
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Default host serving employee photos and barcode images
pub const DEFAULT_ASSET_BASE_URL: &str = "https://awqaf-aleppo.sy";

/// Pause between opening the front and the back badge surface
pub const DEFAULT_BACK_SURFACE_DELAY: Duration = Duration::from_millis(500);

/// Client configuration for talking to the badge API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root URL (e.g., "http://localhost:5000/api")
    pub base_url: String,

    /// Prefix joined with `photo_path` / `barcode_image_path`
    pub asset_base_url: String,

    /// Request timeout in seconds. `None` leaves requests unbounded.
    pub timeout: Option<u64>,

    /// Delay before the back surface opens in a combined generation
    pub back_surface_delay: Duration,

    /// Locale used for date fields of the public profile
    pub date_locale: DateLocale,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            asset_base_url: DEFAULT_ASSET_BASE_URL.to_string(),
            timeout: None,
            back_surface_delay: DEFAULT_BACK_SURFACE_DELAY,
            date_locale: DateLocale::default(),
        }
    }

    /// Set the asset host
    pub fn with_asset_base_url(mut self, url: impl Into<String>) -> Self {
        self.asset_base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    /// Set the inter-surface delay
    pub fn with_back_surface_delay(mut self, delay: Duration) -> Self {
        self.back_surface_delay = delay;
        self
    }

    /// Set the date locale
    pub fn with_date_locale(mut self, locale: DateLocale) -> Self {
        self.date_locale = locale;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
