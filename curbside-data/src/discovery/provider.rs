//! HTTP-based [`SpatialDiscovery`] using the Overpass interpreter.

use async_trait::async_trait;
use curbside_core::discovery::CategoryTag;
use curbside_core::{
    DiscoveryError, DiscoveryQuery, RawLocation, SpatialDiscovery, TransportError,
};
use log::debug;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use super::overpass::InterpreterResponse;
use crate::http::{ClientBuildError, HttpServiceConfig};

/// Server-side query timeout in seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

/// Element types searched for each tag filter.
const ELEMENT_TYPES: [&str; 2] = ["node", "way"];

/// Discovery client for an Overpass API instance.
#[derive(Debug, Clone)]
pub struct OverpassDiscovery {
    client: Client,
    config: HttpServiceConfig,
    interpreter_url: Url,
}

impl OverpassDiscovery {
    /// Create a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpServiceConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpServiceConfig) -> Result<Self, ClientBuildError> {
        let interpreter_url = config.endpoint_url("api/interpreter")?;
        let client = config.build_client()?;
        Ok(Self {
            client,
            config,
            interpreter_url,
        })
    }

    fn convert_response(
        response: InterpreterResponse,
    ) -> Result<Vec<RawLocation>, DiscoveryError> {
        if response.elements.is_empty() {
            if let Some(remark) = response.remark {
                return Err(TransportError::Service {
                    code: "remark".to_owned(),
                    message: remark,
                }
                .into());
            }
        }
        Ok(response.elements.into_iter().map(RawLocation::from).collect())
    }
}

/// Render `query` as Overpass QL.
///
/// Every filter is tried against nodes and ways; `out center` gives areas a
/// centre point.
fn build_query(query: &DiscoveryQuery) -> String {
    let around = format!("(around:{},{})", query.radius_meters, query.center);
    let mut ql = format!("[out:json][timeout:{QUERY_TIMEOUT_SECS}];(");
    for tag in &query.tags {
        let filter = tag_filter(tag);
        for element in ELEMENT_TYPES {
            ql.push_str(&format!("{element}{filter}{around};"));
        }
    }
    ql.push_str(&format!(");out center {};", query.limit));
    ql
}

fn tag_filter(tag: &CategoryTag) -> String {
    match &tag.value {
        Some(value) => format!("[\"{}\"=\"{}\"]", escape(&tag.key), escape(value)),
        None => format!("[\"{}\"]", escape(&tag.key)),
    }
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}

#[async_trait(?Send)]
impl SpatialDiscovery for OverpassDiscovery {
    async fn query(&self, query: &DiscoveryQuery) -> Result<Vec<RawLocation>, DiscoveryError> {
        if query.tags.is_empty() || query.limit == 0 {
            return Ok(Vec::new());
        }

        let url = self.interpreter_url.as_str();
        let body = build_query(query);
        debug!("querying {url} with {body}");

        let response = self
            .client
            .post(self.interpreter_url.clone())
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(body)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| self.config.convert_reqwest_error(&err, url))?
            .json::<InterpreterResponse>()
            .await
            .map_err(|err| self.config.convert_reqwest_error(&err, url))?;

        Self::convert_response(response)
    }
}
