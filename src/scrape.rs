use crate::extract::MetricFamilies;
use eyre::{
    Context as _,
    Result,
};
use reqwest::{
    header::CACHE_CONTROL,
    Client as HttpClient,
};
use url::Url;

/// Fetches and parses a Prometheus text exposition endpoint.
///
/// Transport errors, non-success responses and unparsable bodies all fail the
/// scrape.
pub async fn fetch_metric_families(http_client: &HttpClient, endpoint: &Url) -> Result<MetricFamilies> {
    let response = http_client
        .get(endpoint.clone())
        .header(CACHE_CONTROL, "no-cache")
        .send()
        .await
        .wrap_err("failed requesting metrics")?
        .error_for_status()
        .wrap_err("metrics endpoint returned an error")?;

    let body = response.text().await.wrap_err("failed reading metrics response")?;
    let families = MetricFamilies::parse(&body)?;
    debug!(%endpoint, families = families.len(), "scraped metrics");
    Ok(families)
}
