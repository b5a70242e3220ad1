use crate::config::types::{Config, CrawlerConfig, OutputConfig, OutputFormat, UserAgentConfig};
use crate::url::{domain_allowed, extract_domain};
use crate::ConfigError;
use ::url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.name.is_empty() {
        return Err(ConfigError::Validation("name cannot be empty".to_string()));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    // The API URL template must carry exactly one page-number slot
    let slots = config.api_url.matches("{}").count();
    if slots != 1 {
        return Err(ConfigError::Validation(format!(
            "api-url must contain exactly one '{{}}' page slot, got {} in '{}'",
            slots, config.api_url
        )));
    }

    // The formatted template must be a well-formed http(s) URL
    let sample = config.api_url.replacen("{}", "1", 1);
    let url = Url::parse(&sample)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api-url '{}': {}", sample, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "api-url must use http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    // Allowed domains: at least one, each a valid pattern, and the
    // template's host must fall inside them or the very first request
    // would be refused as offsite
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed-domains must contain at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    let host = extract_domain(&url).ok_or_else(|| {
        ConfigError::InvalidUrl(format!("api-url '{}' has no host", config.api_url))
    })?;

    if !domain_allowed(&host, &config.allowed_domains) {
        return Err(ConfigError::Validation(format!(
            "api-url host '{}' is not covered by allowed-domains {:?}",
            host, config.allowed_domains
        )));
    }

    if config.start_page < 1 {
        return Err(ConfigError::Validation(format!(
            "start-page must be >= 1, got {}",
            config.start_page
        )));
    }

    if let Some(max_pages) = config.max_pages {
        if max_pages < 1 {
            return Err(ConfigError::Validation(format!(
                "max-pages must be >= 1 when set, got {}",
                max_pages
            )));
        }
    }

    if config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be <= 10, got {}",
            config.max_retries
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    // Stdout needs no destination; the file-backed sinks do
    if config.format != OutputFormat::Stdout && config.path.is_empty() {
        return Err(ConfigError::Validation(format!(
            "output path cannot be empty for format {:?}",
            config.format
        )));
    }

    Ok(())
}

/// Validates a domain string
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    // Check that it doesn't start or end with a dot or hyphen
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    // Check for consecutive dots
    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    // Must contain at least one dot (e.g., example.com, not just "example")
    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
