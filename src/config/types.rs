use serde::Deserialize;

/// Main configuration structure for Quotes-Scroll
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Crawler identifier (e.g. "QuotesScroll")
    pub name: String,

    /// API URL template with one `{}` slot for the page number
    #[serde(rename = "api-url")]
    pub api_url: String,

    /// Domains the crawler is allowed to request; a bare domain also
    /// matches its subdomains
    #[serde(rename = "allowed-domains")]
    pub allowed_domains: Vec<String>,

    /// First page to request (1-based)
    #[serde(rename = "start-page", default = "default_start_page")]
    pub start_page: u32,

    /// Safety cap on the number of pages fetched in one run; absent
    /// means "until has_next is false"
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<u32>,

    /// Delay between consecutive page requests (milliseconds)
    #[serde(rename = "download-delay-ms", default = "default_download_delay")]
    pub download_delay_ms: u64,

    /// Maximum retry attempts for transient HTTP failures
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay between retry attempts (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay")]
    pub retry_delay_ms: u64,
}

fn default_start_page() -> u32 {
    1
}

fn default_download_delay() -> u64 {
    500
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    1000
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Record sink selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line, appended to a file
    Jsonl,
    /// SQLite database with run bookkeeping
    Sqlite,
    /// One JSON object per line on standard output
    Stdout,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Which sink to emit records to
    pub format: OutputFormat,

    /// Destination path; unused for the stdout format
    #[serde(default)]
    pub path: String,
}
