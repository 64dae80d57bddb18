//! REST Countries client
//!
//! Fetches the full country list once per client and keeps it for the rest of
//! the session. Every request goes through [`with_retry`], which follows the
//! configured [`RetryPolicy`]. Name search and code lookups treat a 404 as "no
//! results" and do not retry it; for the list endpoints it is a failure like any
//! other non-2xx status. A body that fails to decode is never retried.

use crate::config::ApiConfig;
use crate::error::Error;
use flagdex_core::api::{
    alpha_url, all_url, classify_status, name_url, region_url, SearchOutcome, StatusClass,
};
use flagdex_core::country::{Country, REGIONS};
use flagdex_core::filter::sort_by_name;
use flagdex_core::retry::RetryPolicy;
use serde::de::DeserializeOwned;
use std::future::Future;
use tokio::sync::OnceCell;

/// Whether a 404 is an answer or a failure for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnMissing {
    NoResults,
    Fail,
}

/// Body of a single response
#[derive(Debug)]
pub enum Fetched<T> {
    Body(T),
    NotFound,
}

/// Run `op` until it succeeds or the policy runs out of attempts
pub async fn with_retry<T, F, Fut>(policy: &RetryPolicy, what: &str, mut op: F) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_transient() => return Err(err),
            Err(err) => {
                let left = policy.attempts_left(attempt);
                if left == 0 {
                    log::error!("{what} failed after {attempt} attempt(s): {err}");
                    return Err(err);
                }
                log::warn!("{what} failed, retrying... ({left} attempts left): {err}");

                attempt += 1;
                if let Some(delay) = policy.delay_before(attempt) {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

/// Session cache for the full country list
///
/// Concurrent callers share a single in-flight load. A failed load leaves the
/// cache empty so the next call tries again.
#[derive(Debug, Default)]
pub struct CountryCache {
    cell: OnceCell<Vec<Country>>,
}

impl CountryCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_warm(&self) -> bool {
        self.cell.initialized()
    }

    /// Cached list, loading it with `load` on a cold cache
    ///
    /// The loaded list is sorted by common name before it is stored.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<&[Country], Error>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Country>, Error>>,
    {
        if let Some(countries) = self.cell.get() {
            log::debug!("country cache hit ({} entries)", countries.len());
            return Ok(countries.as_slice());
        }

        let countries = self
            .cell
            .get_or_try_init(|| async move {
                let mut countries = load().await?;
                sort_by_name(&mut countries);
                log::info!("cached {} countries", countries.len());
                Ok::<_, Error>(countries)
            })
            .await?;

        Ok(countries.as_slice())
    }
}

pub struct CountriesClient {
    http: reqwest::Client,
    config: ApiConfig,
    cache: CountryCache,
}

impl CountriesClient {
    pub fn new(config: ApiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("flagdex/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            cache: CountryCache::new(),
        })
    }

    pub fn regions(&self) -> &'static [&'static str] {
        &REGIONS
    }

    /// All countries, sorted by name, fetched at most once per client
    pub async fn get_all_countries(&self) -> Result<&[Country], Error> {
        let url = all_url(&self.config.base_url);
        self.cache
            .get_or_load(|| async move {
                match self
                    .get_json_with_retry::<Vec<Country>>(&url, OnMissing::Fail)
                    .await
                {
                    Ok(Fetched::Body(countries)) => Ok(countries),
                    Ok(Fetched::NotFound) => Err(Error::Fetch(format!("{url} returned 404"))),
                    Err(err) => Err(Error::Fetch(err.to_string())),
                }
            })
            .await
    }

    /// Countries of one region, sorted by name. Not cached.
    pub async fn get_countries_by_region(&self, region: &str) -> Result<Vec<Country>, Error> {
        let url = region_url(&self.config.base_url, region);
        match self
            .get_json_with_retry::<Vec<Country>>(&url, OnMissing::Fail)
            .await
        {
            Ok(Fetched::Body(mut countries)) => {
                sort_by_name(&mut countries);
                Ok(countries)
            }
            Ok(Fetched::NotFound) => Err(Error::Fetch(format!(
                "Failed to fetch countries for region {region}: {url} returned 404"
            ))),
            Err(err) => Err(Error::Fetch(format!(
                "Failed to fetch countries for region {region}: {err}"
            ))),
        }
    }

    /// Remote name search
    pub async fn search_countries(&self, term: &str) -> SearchOutcome {
        if term.trim().is_empty() {
            return SearchOutcome::Found(Vec::new());
        }

        let url = name_url(&self.config.base_url, term);
        match self
            .get_json_with_retry::<Vec<Country>>(&url, OnMissing::NoResults)
            .await
        {
            Ok(Fetched::Body(mut countries)) => {
                sort_by_name(&mut countries);
                SearchOutcome::Found(countries)
            }
            Ok(Fetched::NotFound) => SearchOutcome::NotFound,
            Err(err) => {
                let err = Error::Search(err.to_string());
                log::error!("{err}");
                SearchOutcome::Failed(err.to_string())
            }
        }
    }

    /// Full details for one country, `None` when the code is unknown
    pub async fn get_country_details(&self, code: &str) -> Result<Option<Country>, Error> {
        let url = alpha_url(&self.config.base_url, code);
        match self
            .get_json_with_retry::<Vec<Country>>(&url, OnMissing::NoResults)
            .await
        {
            Ok(Fetched::Body(countries)) => Ok(countries.into_iter().next()),
            Ok(Fetched::NotFound) => Ok(None),
            Err(err) => Err(Error::Fetch(format!(
                "Failed to load country details for {code}: {err}"
            ))),
        }
    }

    async fn get_json_with_retry<T: DeserializeOwned>(
        &self,
        url: &str,
        on_missing: OnMissing,
    ) -> Result<Fetched<T>, Error> {
        with_retry(&self.config.retry, url, || self.get_json(url, on_missing)).await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        on_missing: OnMissing,
    ) -> Result<Fetched<T>, Error> {
        log::debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to send request: {e}")))?;

        let status = response.status();
        match classify_status(status.as_u16()) {
            StatusClass::Success => response
                .json::<T>()
                .await
                .map(Fetched::Body)
                .map_err(|e| Error::Parse(format!("Failed to parse response: {e}"))),
            StatusClass::NotFound if on_missing == OnMissing::NoResults => Ok(Fetched::NotFound),
            StatusClass::NotFound | StatusClass::Failure => Err(Error::Network(format!("HTTP error! status: {status}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use flagdex_core::retry::Backoff;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO, Backoff::Fixed)
    }

    fn country_json(common: &str, cca2: &str, region: &str, population: u64) -> serde_json::Value {
        json!({
            "name": {"common": common, "official": format!("Official {common}")},
            "cca2": cca2,
            "cca3": format!("{cca2}X"),
            "flags": {"png": format!("{cca2}.png"), "svg": format!("{cca2}.svg")},
            "capital": ["Somewhere"],
            "region": region,
            "population": population,
            "area": 100.0
        })
    }

    #[derive(Default)]
    struct FakeApi {
        healthy: AtomicBool,
        missing: AtomicBool,
        malformed: AtomicBool,
        hits: AtomicUsize,
    }

    async fn all(State(api): State<Arc<FakeApi>>) -> Response {
        api.hits.fetch_add(1, Ordering::SeqCst);
        if api.missing.load(Ordering::SeqCst) {
            return StatusCode::NOT_FOUND.into_response();
        }
        if api.malformed.load(Ordering::SeqCst) {
            return (StatusCode::OK, "[{\"name\": ").into_response();
        }
        if !api.healthy.load(Ordering::SeqCst) {
            return StatusCode::SERVICE_UNAVAILABLE.into_response();
        }
        Json(json!([
            country_json("Zambia", "ZM", "Africa", 18_000_000),
            country_json("Åland Islands", "AX", "Europe", 29_458),
            country_json("Brazil", "BR", "Americas", 213_000_000),
        ]))
        .into_response()
    }

    async fn name(State(api): State<Arc<FakeApi>>, Path(term): Path<String>) -> Response {
        api.hits.fetch_add(1, Ordering::SeqCst);
        if !api.healthy.load(Ordering::SeqCst) {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
        if term == "bra" {
            Json(json!([country_json("Brazil", "BR", "Americas", 213_000_000)])).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }

    async fn alpha(Path(code): Path<String>) -> Response {
        if code.eq_ignore_ascii_case("br") {
            Json(json!([country_json("Brazil", "BR", "Americas", 213_000_000)])).into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }

    async fn region(Path(region): Path<String>) -> Response {
        if region == "Americas" {
            Json(json!([
                country_json("Peru", "PE", "Americas", 33_000_000),
                country_json("Brazil", "BR", "Americas", 213_000_000),
            ]))
            .into_response()
        } else {
            StatusCode::NOT_FOUND.into_response()
        }
    }

    async fn serve(api: Arc<FakeApi>) -> String {
        let app = Router::new()
            .route("/all", get(all))
            .route("/name/{term}", get(name))
            .route("/alpha/{code}", get(alpha))
            .route("/region/{region}", get(region))
            .with_state(api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: String, max_attempts: u32) -> CountriesClient {
        CountriesClient::new(ApiConfig {
            base_url,
            retry: instant_policy(max_attempts),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_after_failures() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result = with_retry(&instant_policy(3), "op", move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(Error::Network("down".into()))
            } else {
                Ok(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_gives_up_after_max_attempts() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: Result<(), Error> = with_retry(&instant_policy(3), "op", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Network("down".into()))
        })
        .await;

        assert!(matches!(result, Err(Error::Network(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_with_retry_does_not_repeat_parse_errors() {
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let result: Result<(), Error> = with_retry(&instant_policy(3), "op", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::Parse("bad body".into()))
        })
        .await;

        assert!(matches!(result, Err(Error::Parse(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_waits_between_attempts() {
        let policy = RetryPolicy::new(2, Duration::from_millis(20), Backoff::Fixed);
        let started = std::time::Instant::now();
        let _: Result<(), Error> =
            with_retry(&policy, "op", || async { Err(Error::Network("down".into())) }).await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_cache_stays_empty_after_failure_then_fills() {
        let cache = CountryCache::new();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let policy = instant_policy(3);
        let policy = &policy;

        let result = cache
            .get_or_load(move || {
                with_retry(policy, "load", move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err::<Vec<Country>, _>(Error::Network("down".into()))
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(!cache.is_warm());

        let countries = cache
            .get_or_load(|| async {
                Ok(vec![
                    flagdex_core::country::fixture("Peru", "PE", "Americas", 1, 1.0),
                    flagdex_core::country::fixture("Belgium", "BE", "Europe", 1, 1.0),
                ])
            })
            .await
            .unwrap();
        assert_eq!(countries[0].name.common, "Belgium");
        assert!(cache.is_warm());
    }

    #[tokio::test]
    async fn test_get_all_countries_fetches_once_and_sorts() {
        let api = Arc::new(FakeApi::default());
        api.healthy.store(true, Ordering::SeqCst);
        let client = client(serve(Arc::clone(&api)).await, 3);

        let first: Vec<String> = client
            .get_all_countries()
            .await
            .unwrap()
            .iter()
            .map(|c| c.name.common.clone())
            .collect();
        assert_eq!(first, vec!["Åland Islands", "Brazil", "Zambia"]);

        client.get_all_countries().await.unwrap();
        assert_eq!(api.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_all_countries_fails_after_three_attempts_then_recovers() {
        let api = Arc::new(FakeApi::default());
        let client = client(serve(Arc::clone(&api)).await, 3);

        let err = client.get_all_countries().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert_eq!(api.hits.load(Ordering::SeqCst), 3);

        api.healthy.store(true, Ordering::SeqCst);
        let countries = client.get_all_countries().await.unwrap();
        assert_eq!(countries.len(), 3);
        assert_eq!(api.hits.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_get_all_countries_retries_404() {
        let api = Arc::new(FakeApi::default());
        api.missing.store(true, Ordering::SeqCst);
        let client = client(serve(Arc::clone(&api)).await, 3);

        let err = client.get_all_countries().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert_eq!(api.hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_get_all_countries_malformed_body_is_not_retried() {
        let api = Arc::new(FakeApi::default());
        api.malformed.store(true, Ordering::SeqCst);
        let client = client(serve(Arc::clone(&api)).await, 3);

        let err = client.get_all_countries().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert_eq!(api.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_search_distinguishes_not_found_from_failure() {
        let api = Arc::new(FakeApi::default());
        api.healthy.store(true, Ordering::SeqCst);
        let client = client(serve(Arc::clone(&api)).await, 2);

        let found = client.search_countries("bra").await;
        assert_eq!(found.countries().len(), 1);

        assert_eq!(client.search_countries("zzz").await, SearchOutcome::NotFound);
        // 404 is not retried
        assert_eq!(api.hits.load(Ordering::SeqCst), 2);

        api.healthy.store(false, Ordering::SeqCst);
        assert!(client.search_countries("bra").await.is_failure());
    }

    #[tokio::test]
    async fn test_search_with_empty_term_skips_request() {
        let api = Arc::new(FakeApi::default());
        let client = client(serve(Arc::clone(&api)).await, 1);

        assert_eq!(client.search_countries("  ").await, SearchOutcome::Found(vec![]));
        assert_eq!(api.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_country_details() {
        let client = client(serve(Arc::new(FakeApi::default())).await, 1);

        let brazil = client.get_country_details("br").await.unwrap().unwrap();
        assert_eq!(brazil.cca2, "BR");
        assert!(client.get_country_details("xx").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_countries_by_region_sorted() {
        let client = client(serve(Arc::new(FakeApi::default())).await, 1);

        let americas = client.get_countries_by_region("Americas").await.unwrap();
        let names: Vec<&str> = americas.iter().map(|c| c.name.common.as_str()).collect();
        assert_eq!(names, vec!["Brazil", "Peru"]);
    }

    #[tokio::test]
    async fn test_unknown_region_is_a_fetch_error() {
        let client = client(serve(Arc::new(FakeApi::default())).await, 2);

        let err = client.get_countries_by_region("Antarctic").await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert!(err.to_string().contains("Antarctic"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_fetch_error() {
        let client = client("http://127.0.0.1:9".to_string(), 1);
        assert!(matches!(client.get_all_countries().await, Err(Error::Fetch(_))));
    }
}
