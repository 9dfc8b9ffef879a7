use serde::Deserialize;

/// Main configuration structure for yelpscrap
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub search: SearchConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Search query configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Origin of the target site's search endpoint
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// City name for `find_loc` scoping; may be empty to omit it
    #[serde(default)]
    pub city: String,

    /// District list; overrides plain city scoping when non-empty
    #[serde(default)]
    pub districts: Vec<String>,

    /// Category filter codes to iterate, in order (check yelp.fr to list them)
    pub cflts: Vec<String>,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Upper bound of the randomized politeness delay (milliseconds)
    #[serde(rename = "max-sleep-ms", default = "default_max_sleep_ms")]
    pub max_sleep_ms: u64,

    /// When true, a local fixture document replaces the network fetch
    #[serde(default)]
    pub debug: bool,

    /// Path to the fixture document used in debug mode
    #[serde(rename = "fixture-path", default)]
    pub fixture_path: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Path of the XLSX workbook; defaults to a timestamped filename
    #[serde(rename = "workbook-path", default)]
    pub workbook_path: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_sleep_ms: default_max_sleep_ms(),
            debug: false,
            fixture_path: None,
        }
    }
}

fn default_base_url() -> String {
    "http://www.yelp.fr".to_string()
}

fn default_max_sleep_ms() -> u64 {
    30_000
}
