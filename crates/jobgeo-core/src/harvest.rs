// crates/jobgeo-core/src/harvest.rs
#![cfg(feature = "harvest")]

//! # Job search harvester
//!
//! Pages through the job search GraphQL endpoint and flattens every posting
//! into the six raw columns the cleaning step consumes. This module is the
//! only network-facing code in the crate and is compiled with the `harvest`
//! feature.

use crate::config::{DatasetConfig, HarvestConfig};
use crate::dataset::write_table;
use crate::error::{JobGeoError, Result};
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Column names of the raw harvest file. `Location` is the column the
/// resolver reads back.
pub const POSTING_COLUMNS: [&str; 6] = [
    "Job Title",
    "Updated Date",
    "Location",
    "Company",
    "Min Salary",
    "Max Salary",
];

const MISSING: &str = "N/A";

const SEARCH_QUERY: &str = "query JobSearchByQuery($query: JobSearchQueryInput!, $consumer: String!, $offset: Int, $limit: Int, $sort: String, $trackRecent: Boolean, $searchMode: SearchMode) { jobSearchByQuery(query: $query, consumer: $consumer, offset: $offset, limit: $limit, sort: $sort, searchMode: $searchMode, trackRecent: $trackRecent) { total collection { jobDetail { ... on VisibleJob { title refreshedAt location { city } companyInfo { companyNameOverride } salary { ... on Salary { amount } ... on SalaryRange { minimum maximum } ... on SalaryEstimate { minimum maximum } } } } } } }";

/// One posting, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub title: String,
    pub updated: String,
    pub location: String,
    pub company: String,
    pub min_salary: String,
    pub max_salary: String,
}

impl JobPosting {
    /// Flatten one item of the search result `collection`.
    ///
    /// Any missing value becomes `N/A`. Salary ranges and estimates carry
    /// `minimum`/`maximum`; a fixed salary only has `amount`, which then
    /// fills both bounds.
    pub fn from_json(item: &Value) -> Self {
        let detail = &item["jobDetail"];
        let salary = &detail["salary"];
        let text = |v: &Value| match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => MISSING.to_string(),
        };
        let bound = |key: &str| {
            let v = &salary[key];
            if v.is_null() {
                text(&salary["amount"])
            } else {
                text(v)
            }
        };

        Self {
            title: text(&detail["title"]),
            updated: text(&detail["refreshedAt"]),
            location: text(&detail["location"]["city"]),
            company: text(&detail["companyInfo"]["companyNameOverride"]),
            min_salary: bound("minimum"),
            max_salary: bound("maximum"),
        }
    }

    pub fn into_row(self) -> Vec<String> {
        vec![
            self.title,
            self.updated,
            self.location,
            self.company,
            self.min_salary,
            self.max_salary,
        ]
    }
}

/// Request body for one page.
pub fn search_payload(limit: usize, offset: usize) -> Value {
    json!({
        "operationName": "JobSearchByQuery",
        "variables": {
            "query": {
                "filter": {
                    "careerLevel": { "id": ["2.24d1f6", "3.2ebf16"] },
                    "country": { "id": ["de.02516e"] },
                    "discipline": { "id": ["1011.6cf3f7"] },
                    "employmentType": { "id": ["FULL_TIME.ef2fe9"] },
                    "industry": { "id": ["200300.efce6c", "90100.a8b7b7"] },
                    "salary": { "max": 189000, "min": 5000 }
                }
            },
            "consumer": "loggedout.web.jobs.search_results.center",
            "sort": "date",
            "limit": limit,
            "offset": offset,
            "trackRecent": true,
            "searchMode": "NORMAL"
        },
        "query": SEARCH_QUERY,
    })
}

/// Blocking job search client.
pub struct Harvester {
    client: Client,
    config: HarvestConfig,
}

impl Harvester {
    pub fn new(config: HarvestConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(client, config)
    }

    /// Use a preconfigured HTTP client (proxy, TLS roots, ...).
    pub fn with_client(client: Client, config: HarvestConfig) -> Result<Self> {
        if config.limit == 0 {
            return Err(JobGeoError::Config("harvest.limit must be positive".into()));
        }
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Fetch a single page, no retries.
    pub fn fetch_page(&self, limit: usize, offset: usize) -> Result<Vec<JobPosting>> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Referer", "https://www.xing.com/jobs/search")
            .header("Origin", "https://www.xing.com")
            .json(&search_payload(limit, offset))
            .send()?
            .error_for_status()?;

        let body: Value = serde_json::from_str(&response.text()?)?;
        let postings = body["data"]["jobSearchByQuery"]["collection"]
            .as_array()
            .map(|items| items.iter().map(JobPosting::from_json).collect())
            .unwrap_or_default();
        Ok(postings)
    }

    /// Fetch a page, retrying up to `max_retries` times with a fixed backoff.
    pub fn fetch_page_with_retry(&self, limit: usize, offset: usize) -> Result<Vec<JobPosting>> {
        let mut attempt = 0;
        loop {
            match self.fetch_page(limit, offset) {
                Ok(page) => return Ok(page),
                Err(e) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(offset, attempt, error = %e, "page request failed, retrying");
                    thread::sleep(Duration::from_millis(self.config.backoff_ms));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Request `total` postings in pages of `limit`.
    ///
    /// A page that still fails after its retries is skipped; the loop moves
    /// on to the next offset.
    pub fn harvest(&self, total: usize, limit: usize) -> Vec<JobPosting> {
        let limit = limit.max(1);
        let mut postings = Vec::new();
        for offset in (0..total).step_by(limit) {
            let size = limit.min(total - offset);
            info!("Fetching jobs {} to {}...", offset + 1, offset + size);
            match self.fetch_page_with_retry(size, offset) {
                Ok(page) if page.is_empty() => {
                    warn!(offset, "empty page received, skipping batch");
                }
                Ok(page) => postings.extend(page),
                Err(e) => warn!(offset, error = %e, "page failed after retries, skipping batch"),
            }
        }
        info!(postings = postings.len(), "harvest complete");
        postings
    }
}

/// Write postings as a raw dataset the cleaning step can read back.
pub fn write_postings<W: Write>(
    writer: W,
    postings: Vec<JobPosting>,
    config: &DatasetConfig,
) -> Result<()> {
    let header: Vec<String> = POSTING_COLUMNS.iter().map(|c| c.to_string()).collect();
    write_table(
        writer,
        &header,
        postings.into_iter().map(JobPosting::into_row),
        config,
    )
}
