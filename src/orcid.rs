//! ORCID registry client and batch lookup.
//!
//! This module resolves researcher identifiers to raw profile documents and
//! normalizes each one. Lookups run sequentially by default; a bounded
//! concurrency can be configured and results always come back in input order.

use crate::error::{OrcidError, Result};
use crate::model::PersonRecord;
use crate::normalize::normalize;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// ORCID public site, which serves a profile as JSON on request
pub const ORCID_BASE_URL: &str = "https://orcid.org";

/// Default per-request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Source of raw profile documents
#[async_trait]
pub trait Registry: Send + Sync {
    /// Fetch the raw JSON profile for one identifier.
    ///
    /// Transport failures, non-success statuses and undecodable bodies are
    /// reported as [`OrcidError::LookupFailed`].
    async fn fetch_profile(&self, orcid: &str) -> Result<Value>;
}

/// HTTP client settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Registry root; the identifier is appended as the last path segment
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: ORCID_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("orcid-works/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// ORCID registry client backed by `reqwest`
pub struct OrcidClient {
    client: reqwest::Client,
    base_url: Url,
}

impl OrcidClient {
    /// Create a new OrcidClient
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| OrcidError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            OrcidError::Config(format!("Invalid registry URL {}: {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(OrcidError::Config(format!(
                "Invalid registry URL {}: cannot be a base",
                config.base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    /// Profile URL for an identifier
    pub fn profile_url(&self, orcid: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(orcid);
        }
        url
    }
}

#[async_trait]
impl Registry for OrcidClient {
    async fn fetch_profile(&self, orcid: &str) -> Result<Value> {
        let url = self.profile_url(orcid);
        debug!(orcid = orcid, url = %url, "Fetching ORCID record");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| OrcidError::lookup_failed(orcid, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OrcidError::lookup_failed(orcid, format!("HTTP {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| OrcidError::lookup_failed(orcid, format!("Malformed JSON body: {}", e)))
    }
}

/// What to do when one identifier cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure, emit a `found: false` record and keep going
    #[default]
    Placeholder,
    /// Stop the batch at the first failure
    Abort,
}

/// Batch lookup options
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum lookups in flight (1 = strictly sequential)
    pub concurrency: usize,
    pub on_error: FailurePolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            on_error: FailurePolicy::Placeholder,
        }
    }
}

/// A per-identifier failure that was replaced by a placeholder record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupFailure {
    pub orcid: String,
    pub reason: String,
}

/// Result of a batch lookup
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One record per requested identifier, in request order
    pub records: Vec<PersonRecord>,
    /// Identifiers whose records are placeholders, in request order
    pub failures: Vec<LookupFailure>,
}

/// Fetch and normalize one identifier.
pub async fn fetch_one<R: Registry + ?Sized>(registry: &R, orcid: &str) -> Result<PersonRecord> {
    let raw = registry.fetch_profile(orcid).await?;
    normalize(orcid, &raw)
}

/// Fetch and normalize every identifier.
///
/// The output has one record per input identifier, in input order.
///
/// # Errors
///
/// With [`FailurePolicy::Abort`], the first failing identifier's error is
/// returned and remaining lookups are cancelled. With
/// [`FailurePolicy::Placeholder`] this never fails.
pub async fn fetch_all<R: Registry + ?Sized>(
    registry: &R,
    orcids: &[String],
    options: &BatchOptions,
) -> Result<BatchReport> {
    info!(
        count = orcids.len(),
        concurrency = options.concurrency,
        "Starting batch ORCID lookup"
    );

    let mut lookups = stream::iter(orcids)
        .map(|orcid| async move { (orcid, fetch_one(registry, orcid).await) })
        .buffered(options.concurrency.max(1));

    let mut report = BatchReport {
        records: Vec::with_capacity(orcids.len()),
        failures: Vec::new(),
    };

    while let Some((orcid, result)) = lookups.next().await {
        match result {
            Ok(record) => {
                debug!(
                    orcid = %orcid,
                    found = record.found,
                    works = record.works.len(),
                    "Normalized record"
                );
                report.records.push(record);
            }
            Err(e) => match options.on_error {
                FailurePolicy::Abort => {
                    warn!(orcid = %orcid, error = %e, "Lookup failed, aborting batch");
                    return Err(e);
                }
                FailurePolicy::Placeholder => {
                    warn!(orcid = %orcid, error = %e, "Lookup failed, using placeholder record");
                    report.records.push(PersonRecord::not_found(orcid));
                    report.failures.push(LookupFailure {
                        orcid: orcid.clone(),
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    let found = report.records.iter().filter(|r| r.found).count();
    info!(
        total = orcids.len(),
        found = found,
        failed = report.failures.len(),
        "Batch lookup complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// In-memory registry: known identifiers answer with a document, others fail.
    struct StaticRegistry {
        docs: HashMap<String, Value>,
        calls: AtomicUsize,
    }

    impl StaticRegistry {
        fn new(docs: &[(&str, Value)]) -> Self {
            Self {
                docs: docs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Registry for StaticRegistry {
        async fn fetch_profile(&self, orcid: &str) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.docs
                .get(orcid)
                .cloned()
                .ok_or_else(|| OrcidError::lookup_failed(orcid, "HTTP 404 Not Found"))
        }
    }

    fn profile(orcid: &str, family: &str) -> Value {
        json!({
            "orcid-identifier": {"path": orcid},
            "person": {"name": {"given-names": {"value": "A"}, "family-name": {"value": family}}}
        })
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_all_preserves_order() {
        let registry = StaticRegistry::new(&[
            ("1", profile("1", "One")),
            ("2", profile("2", "Two")),
            ("3", profile("3", "Three")),
        ]);
        let options = BatchOptions {
            concurrency: 3,
            ..Default::default()
        };
        let report = fetch_all(&registry, &ids(&["3", "1", "2", "1"]), &options).await.unwrap();
        let order: Vec<&str> = report.records.iter().map(|r| r.orcid.as_str()).collect();
        assert_eq!(order, vec!["3", "1", "2", "1"]);
        assert!(report.failures.is_empty());
        assert_eq!(registry.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_placeholder_policy_keeps_failed_identifier() {
        let registry = StaticRegistry::new(&[
            ("1", profile("1", "One")),
            ("bad", json!("not an object")),
        ]);
        let report = fetch_all(&registry, &ids(&["missing", "1", "bad"]), &BatchOptions::default())
            .await
            .unwrap();

        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[0], PersonRecord::not_found("missing"));
        assert!(report.records[1].found);
        assert_eq!(report.records[2], PersonRecord::not_found("bad"));

        let failed: Vec<&str> = report.failures.iter().map(|f| f.orcid.as_str()).collect();
        assert_eq!(failed, vec!["missing", "bad"]);
        assert!(report.failures[0].reason.contains("404"));
        assert!(report.failures[1].reason.contains("string"));
    }

    #[tokio::test]
    async fn test_abort_policy_stops_at_first_failure() {
        let registry = StaticRegistry::new(&[("1", profile("1", "One"))]);
        let options = BatchOptions {
            concurrency: 1,
            on_error: FailurePolicy::Abort,
        };
        let err = fetch_all(&registry, &ids(&["1", "missing", "1"]), &options)
            .await
            .unwrap_err();
        assert_eq!(err.orcid(), Some("missing"));
        // sequential: the identifier after the failure is never requested
        assert_eq!(registry.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let registry = StaticRegistry::new(&[]);
        let report = fetch_all(&registry, &[], &BatchOptions::default()).await.unwrap();
        assert!(report.records.is_empty());
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_profile_url() {
        let client = OrcidClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            client.profile_url("0000-0001-2345-6789").as_str(),
            "https://orcid.org/0000-0001-2345-6789"
        );

        let config = ClientConfig {
            base_url: "http://localhost:8080/registry/".to_string(),
            ..Default::default()
        };
        let client = OrcidClient::new(&config).unwrap();
        assert_eq!(
            client.profile_url("0000-0002").as_str(),
            "http://localhost:8080/registry/0000-0002"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(OrcidClient::new(&config), Err(OrcidError::Config(_))));
    }

    #[tokio::test]
    async fn test_client_requests_json_and_normalizes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/0000-0001-2345-6789"))
            .and(header("accept", "application/json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(profile("0000-0001-2345-6789", "Lovelace")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let client = OrcidClient::new(&config).unwrap();
        let record = fetch_one(&client, "0000-0001-2345-6789").await.unwrap();
        assert!(record.found);
        assert_eq!(record.name.family_name, "Lovelace");
    }

    #[tokio::test]
    async fn test_client_http_error_is_lookup_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let client = OrcidClient::new(&config).unwrap();
        let err = client.fetch_profile("0000-0009").await.unwrap_err();
        assert!(matches!(
            err,
            OrcidError::LookupFailed { ref orcid, ref reason }
                if orcid == "0000-0009" && reason.contains("500")
        ));
    }

    #[tokio::test]
    async fn test_client_malformed_body_is_lookup_failed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let config = ClientConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        let client = OrcidClient::new(&config).unwrap();
        let err = client.fetch_profile("0000-0009").await.unwrap_err();
        assert!(matches!(err, OrcidError::LookupFailed { .. }));
    }
}
