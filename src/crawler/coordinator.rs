//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the sequential fetch chain: seed the start page,
//! then for each response emit its records to the sink and follow the
//! cursor to the next page until a response reports no further pages.
//! The next request is only issued after the current response has been
//! fully processed, so pages are fetched and records emitted strictly
//! in page order.

use crate::config::Config;
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome, RetryPolicy};
use crate::crawler::paginator::{
    decode_page, extract_records, next_request, FetchRequest, UrlTemplate,
};
use crate::output::{CrawlStats, RecordSink};
use crate::url::{domain_allowed, extract_domain};
use crate::ScrollError;
use reqwest::Client;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    template: UrlTemplate,
    sink: Box<dyn RecordSink>,
    stats: CrawlStats,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration (already validated)
    /// * `sink` - The record sink to emit to
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(ScrollError)` - Failed to initialize
    pub fn new(config: Config, sink: Box<dyn RecordSink>) -> Result<Self, ScrollError> {
        let template = UrlTemplate::new(config.crawler.api_url.clone())?;
        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            config,
            client,
            template,
            sink,
            stats: CrawlStats::new(),
        })
    }

    /// Runs the crawl chain to completion
    ///
    /// Terminates when a page reports `has_next = false`, when the
    /// optional max-pages cap is reached, or with the first page-level
    /// error. Records emitted for earlier pages are unaffected by a
    /// later failure.
    pub async fn run(&mut self) -> Result<CrawlStats, ScrollError> {
        let start_page = self.config.crawler.start_page;
        let mut pending = Some(FetchRequest {
            url: self.template.format(start_page),
            page: start_page,
        });

        tracing::info!(
            "Starting crawl '{}' at page {}",
            self.config.crawler.name,
            start_page
        );

        let delay = Duration::from_millis(self.config.crawler.download_delay_ms);

        while let Some(request) = pending.take() {
            if let Some(max_pages) = self.config.crawler.max_pages {
                if self.stats.pages_fetched >= u64::from(max_pages) {
                    tracing::info!("Reached max-pages cap of {}, stopping", max_pages);
                    break;
                }
            }

            let next = self.process_page(&request).await?;

            if next.is_some() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            pending = next;
        }

        self.sink.finish()?;
        self.stats.mark_finished();

        tracing::info!(
            "Crawl completed: {} pages, {} records in {:.1}s",
            self.stats.pages_fetched,
            self.stats.records_emitted,
            self.stats.duration_seconds()
        );

        Ok(self.stats.clone())
    }

    /// Processes a single page request
    ///
    /// Records are emitted before the continuation decision is made, so
    /// a page whose cursor fields are broken still delivers its records
    /// before the error surfaces.
    async fn process_page(
        &mut self,
        request: &FetchRequest,
    ) -> Result<Option<FetchRequest>, ScrollError> {
        // Refuse offsite requests up front
        let url = ::url::Url::parse(&request.url)?;
        let domain = extract_domain(&url).ok_or_else(|| ScrollError::Offsite {
            url: request.url.clone(),
        })?;

        if !domain_allowed(&domain, &self.config.crawler.allowed_domains) {
            return Err(ScrollError::Offsite {
                url: request.url.clone(),
            });
        }

        tracing::debug!("Fetching page {} from {}", request.page, request.url);

        let policy = RetryPolicy {
            max_retries: self.config.crawler.max_retries,
            retry_delay: Duration::from_millis(self.config.crawler.retry_delay_ms),
        };

        match fetch_page(&self.client, &request.url, policy).await {
            FetchOutcome::Success {
                status_code,
                body,
                attempts,
            } => {
                tracing::debug!("HTTP {} for page {}", status_code, request.page);

                let doc = decode_page(&body).map_err(|source| ScrollError::Page {
                    url: request.url.clone(),
                    source,
                })?;

                let records = extract_records(&doc).map_err(|source| ScrollError::Page {
                    url: request.url.clone(),
                    source,
                })?;

                self.sink.write_records(&records)?;
                self.stats
                    .record_page(records.len() as u64, u64::from(attempts - 1));

                tracing::info!(
                    "Page {}: emitted {} records",
                    request.page,
                    records.len()
                );

                let next = next_request(&doc, &self.template).map_err(|source| {
                    ScrollError::Page {
                        url: request.url.clone(),
                        source,
                    }
                })?;

                if next.is_none() {
                    tracing::info!("Page {} reports no further pages", request.page);
                }

                Ok(next)
            }

            FetchOutcome::HttpError {
                status_code,
                attempts,
            } => {
                tracing::error!(
                    "HTTP {} for page {} after {} attempts",
                    status_code,
                    request.page,
                    attempts
                );
                Err(ScrollError::HttpStatus {
                    url: request.url.clone(),
                    status: status_code,
                })
            }

            FetchOutcome::NetworkError { error, attempts } => {
                tracing::error!(
                    "Network error for page {} after {} attempts: {}",
                    request.page,
                    attempts,
                    error
                );
                Err(ScrollError::RetriesExhausted {
                    url: request.url.clone(),
                    attempts,
                    error,
                })
            }
        }
    }
}
