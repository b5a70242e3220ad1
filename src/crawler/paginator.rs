//! Pagination-following extraction loop
//!
//! This module is the heart of the crawler: it turns one decoded page
//! of the quotes API into (a) an ordered sequence of output records and
//! (b) at most one follow-up request for the next page. Everything here
//! is a pure function of the response body, so a page can be
//! re-processed at any time with identical results.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::ConfigError;

/// Errors produced while processing a single page response
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Invalid JSON in response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Missing field '{field}' in page response")]
    MissingField { field: String },

    #[error("Field '{field}' has the wrong type, expected {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },
}

/// One quote projected to the output shape
///
/// Derived losslessly from the raw record, aside from the dropped
/// author detail fields: `author.name` becomes `author_name`, `text`
/// and `tags` pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteRecord {
    pub author_name: String,
    pub text: String,
    pub tags: Vec<String>,
}

/// A follow-up request for the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Fully formatted URL for the next page
    pub url: String,

    /// The 1-based page number the URL addresses
    pub page: u32,
}

/// Everything one page response produces
///
/// The `next` field makes the "at most one continuation" invariant
/// structural: a page either yields exactly one follow-up request or
/// terminates the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutput {
    /// Output records, in the same order as the page's `quotes` array
    pub records: Vec<QuoteRecord>,

    /// Follow-up request, present iff the page reported `has_next = true`
    pub next: Option<FetchRequest>,
}

/// An API URL template with a single integer page slot
///
/// # Example
///
/// ```
/// use quotes_scroll::UrlTemplate;
///
/// let template = UrlTemplate::new("http://quotes.toscrape.com/api/quotes?page={}").unwrap();
/// assert_eq!(
///     template.format(2),
///     "http://quotes.toscrape.com/api/quotes?page=2"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct UrlTemplate(String);

impl UrlTemplate {
    /// Creates a template, verifying it carries exactly one `{}` slot
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        let slots = template.matches("{}").count();
        if slots != 1 {
            return Err(ConfigError::Validation(format!(
                "URL template must contain exactly one '{{}}' slot, got {} in '{}'",
                slots, template
            )));
        }
        Ok(Self(template))
    }

    /// Substitutes the page number into the slot
    pub fn format(&self, page: u32) -> String {
        self.0.replacen("{}", &page.to_string(), 1)
    }

    /// The raw template string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Decodes a response body into a JSON document
///
/// # Returns
///
/// * `Ok(Value)` - The decoded document
/// * `Err(PageError::Decode)` - The body is not valid JSON
pub fn decode_page(body: &str) -> Result<Value, PageError> {
    serde_json::from_str(body).map_err(PageError::Decode)
}

/// Projects the page's `quotes` array into output records
///
/// Record order matches input order; tags pass through with their order
/// preserved. A missing or mistyped field anywhere in the array fails
/// the whole page with the offending path (e.g. `quotes[2].author.name`);
/// no default substitution is performed.
pub fn extract_records(doc: &Value) -> Result<Vec<QuoteRecord>, PageError> {
    let quotes = as_array(get_field(doc, "quotes", "quotes")?, "quotes")?;

    quotes
        .iter()
        .enumerate()
        .map(|(index, quote)| project_quote(quote, index))
        .collect()
}

/// Computes the optional follow-up request from the page's cursor fields
///
/// Reads `has_next` first; when it is `false` the `page` field is never
/// consulted, mirroring the upstream contract that only continuing
/// pages need a trustworthy cursor.
///
/// # Returns
///
/// * `Ok(Some(FetchRequest))` - `has_next` was true; the request targets `page + 1`
/// * `Ok(None)` - `has_next` was false; this chain terminates
/// * `Err(PageError)` - `has_next` or `page` missing or mistyped
pub fn next_request(doc: &Value, template: &UrlTemplate) -> Result<Option<FetchRequest>, PageError> {
    let has_next = as_bool(get_field(doc, "has_next", "has_next")?, "has_next")?;

    if !has_next {
        return Ok(None);
    }

    let page = as_page_number(get_field(doc, "page", "page")?, "page")?;
    let next_page = page + 1;

    Ok(Some(FetchRequest {
        url: template.format(next_page),
        page: next_page,
    }))
}

/// Processes one full page response body
///
/// Composes [`decode_page`], [`extract_records`] and [`next_request`].
/// The coordinator calls the pieces separately so records can be
/// emitted before the continuation decision; this single-shot form is
/// for callers that want the page as one value.
pub fn parse_page(body: &str, template: &UrlTemplate) -> Result<PageOutput, PageError> {
    let doc = decode_page(body)?;
    let records = extract_records(&doc)?;
    let next = next_request(&doc, template)?;
    Ok(PageOutput { records, next })
}

fn project_quote(quote: &Value, index: usize) -> Result<QuoteRecord, PageError> {
    let author = get_field(quote, "author", &format!("quotes[{}].author", index))?;
    let name_path = format!("quotes[{}].author.name", index);
    let author_name = as_str(get_field(author, "name", &name_path)?, &name_path)?;

    let text_path = format!("quotes[{}].text", index);
    let text = as_str(get_field(quote, "text", &text_path)?, &text_path)?;

    let tags_path = format!("quotes[{}].tags", index);
    let tags = as_array(get_field(quote, "tags", &tags_path)?, &tags_path)?
        .iter()
        .enumerate()
        .map(|(tag_index, tag)| {
            as_str(tag, &format!("{}[{}]", tags_path, tag_index)).map(str::to_string)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuoteRecord {
        author_name: author_name.to_string(),
        text: text.to_string(),
        tags,
    })
}

fn get_field<'a>(value: &'a Value, field: &str, path: &str) -> Result<&'a Value, PageError> {
    value.get(field).ok_or_else(|| PageError::MissingField {
        field: path.to_string(),
    })
}

fn as_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, PageError> {
    value.as_str().ok_or_else(|| PageError::WrongType {
        field: path.to_string(),
        expected: "string",
    })
}

fn as_bool(value: &Value, path: &str) -> Result<bool, PageError> {
    value.as_bool().ok_or_else(|| PageError::WrongType {
        field: path.to_string(),
        expected: "boolean",
    })
}

fn as_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, PageError> {
    value.as_array().ok_or_else(|| PageError::WrongType {
        field: path.to_string(),
        expected: "array",
    })
}

fn as_page_number(value: &Value, path: &str) -> Result<u32, PageError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| PageError::WrongType {
            field: path.to_string(),
            expected: "page number",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> UrlTemplate {
        UrlTemplate::new("http://quotes.toscrape.com/api/quotes?page={}").unwrap()
    }

    #[test]
    fn test_single_quote_with_continuation() {
        let body = r#"{
            "quotes": [
                {"author": {"name": "Einstein"}, "text": "Q1", "tags": ["a"]}
            ],
            "has_next": true,
            "page": 1
        }"#;

        let output = parse_page(body, &template()).unwrap();

        assert_eq!(
            output.records,
            vec![QuoteRecord {
                author_name: "Einstein".to_string(),
                text: "Q1".to_string(),
                tags: vec!["a".to_string()],
            }]
        );
        assert_eq!(
            output.next,
            Some(FetchRequest {
                url: "http://quotes.toscrape.com/api/quotes?page=2".to_string(),
                page: 2,
            })
        );
    }

    #[test]
    fn test_empty_last_page_terminates() {
        let body = r#"{"quotes": [], "has_next": false, "page": 7}"#;

        let output = parse_page(body, &template()).unwrap();

        assert!(output.records.is_empty());
        assert_eq!(output.next, None);
    }

    #[test]
    fn test_record_order_preserved() {
        let body = r#"{
            "quotes": [
                {"author": {"name": "A"}, "text": "first", "tags": []},
                {"author": {"name": "B"}, "text": "second", "tags": ["x", "y"]},
                {"author": {"name": "C"}, "text": "third", "tags": ["z"]}
            ],
            "has_next": false,
            "page": 1
        }"#;

        let output = parse_page(body, &template()).unwrap();

        let texts: Vec<&str> = output.records.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(output.records[1].tags, vec!["x", "y"]);
    }

    #[test]
    fn test_projection_is_identity() {
        let body = r#"{
            "quotes": [
                {
                    "author": {"name": "Jane Austen", "goodreads_link": "/austen", "slug": "Jane-Austen"},
                    "text": "The person, be it gentleman or lady...",
                    "tags": ["aliteracy", "books", "classic"]
                }
            ],
            "has_next": true,
            "page": 3
        }"#;

        let output = parse_page(body, &template()).unwrap();
        let record = &output.records[0];

        // Extra author fields are dropped; the projected trio is untouched
        assert_eq!(record.author_name, "Jane Austen");
        assert_eq!(record.text, "The person, be it gentleman or lady...");
        assert_eq!(record.tags, vec!["aliteracy", "books", "classic"]);
        assert_eq!(output.next.as_ref().unwrap().page, 4);
    }

    #[test]
    fn test_reprocessing_is_idempotent() {
        let body = r#"{
            "quotes": [{"author": {"name": "A"}, "text": "t", "tags": ["g"]}],
            "has_next": true,
            "page": 5
        }"#;

        let first = parse_page(body, &template()).unwrap();
        let second = parse_page(body, &template()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = parse_page("not json at all {", &template());
        assert!(matches!(result, Err(PageError::Decode(_))));
    }

    #[test]
    fn test_missing_quotes_key() {
        let body = r#"{"has_next": false, "page": 1}"#;
        let result = parse_page(body, &template());
        assert!(
            matches!(result, Err(PageError::MissingField { ref field }) if field == "quotes")
        );
    }

    #[test]
    fn test_missing_has_next_fails_continuation_only() {
        let body = r#"{
            "quotes": [{"author": {"name": "A"}, "text": "t", "tags": []}],
            "page": 1
        }"#;

        let doc = decode_page(body).unwrap();

        // Records still project cleanly...
        let records = extract_records(&doc).unwrap();
        assert_eq!(records.len(), 1);

        // ...only the continuation decision fails
        let result = next_request(&doc, &template());
        assert!(
            matches!(result, Err(PageError::MissingField { ref field }) if field == "has_next")
        );
    }

    #[test]
    fn test_page_not_consulted_when_has_next_false() {
        // No "page" key at all: termination must still succeed
        let body = r#"{"quotes": [], "has_next": false}"#;
        let doc = decode_page(body).unwrap();
        assert_eq!(next_request(&doc, &template()).unwrap(), None);
    }

    #[test]
    fn test_missing_page_with_continuation_fails() {
        let body = r#"{"quotes": [], "has_next": true}"#;
        let doc = decode_page(body).unwrap();
        let result = next_request(&doc, &template());
        assert!(matches!(result, Err(PageError::MissingField { ref field }) if field == "page"));
    }

    #[test]
    fn test_mistyped_has_next() {
        let body = r#"{"quotes": [], "has_next": "yes", "page": 1}"#;
        let doc = decode_page(body).unwrap();
        let result = next_request(&doc, &template());
        assert!(
            matches!(result, Err(PageError::WrongType { ref field, .. }) if field == "has_next")
        );
    }

    #[test]
    fn test_missing_author_name_reports_path() {
        let body = r#"{
            "quotes": [
                {"author": {"name": "A"}, "text": "ok", "tags": []},
                {"author": {}, "text": "bad", "tags": []}
            ],
            "has_next": false,
            "page": 1
        }"#;

        let result = parse_page(body, &template());
        assert!(
            matches!(result, Err(PageError::MissingField { ref field }) if field == "quotes[1].author.name")
        );
    }

    #[test]
    fn test_mistyped_tag_reports_path() {
        let body = r#"{
            "quotes": [{"author": {"name": "A"}, "text": "t", "tags": ["ok", 3]}],
            "has_next": false,
            "page": 1
        }"#;

        let result = parse_page(body, &template());
        assert!(
            matches!(result, Err(PageError::WrongType { ref field, .. }) if field == "quotes[0].tags[1]")
        );
    }

    #[test]
    fn test_template_requires_exactly_one_slot() {
        assert!(UrlTemplate::new("http://a.com/api?page={}").is_ok());
        assert!(UrlTemplate::new("http://a.com/api").is_err());
        assert!(UrlTemplate::new("http://a.com/{}/api?page={}").is_err());
    }

    #[test]
    fn test_template_format() {
        let template = UrlTemplate::new("http://a.com/api?page={}&size=10").unwrap();
        assert_eq!(template.format(42), "http://a.com/api?page=42&size=10");
    }
}
