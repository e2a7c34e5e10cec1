use anyhow::{Context, Result, bail};
use pkg_constants::api::{AUTH_SCHEME, EXTENSIONS_API, NAM_MONITORS_API};
use pkg_types::endpoint::{EndpointConfig, ExtensionInstance, ExtensionInstancePage};
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::traits::{ApiResponse, EndpointInventory, MonitorApi};

/// Blocking client for a single tenant, authenticated with an API token.
pub struct DynatraceClient {
    http: Client,
    base_url: String,
    token: String,
}

impl DynatraceClient {
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> String {
        format!("{} {}", AUTH_SCHEME, self.token)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let resp = self
            .http
            .get(url.clone())
            .header(AUTHORIZATION, self.auth_header())
            .send()
            .with_context(|| format!("GET {} failed", url))?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            bail!("GET {} returned {}: {}", url, status, body);
        }
        serde_json::from_str(&body).with_context(|| format!("Invalid JSON from {}", url))
    }
}

impl EndpointInventory for DynatraceClient {
    fn list_instances(&self, extension_id: &str) -> Result<Vec<ExtensionInstance>> {
        let base = self.url(&format!("{}/{}/instances", EXTENSIONS_API, extension_id));
        let mut instances = Vec::new();
        let mut next_page_key: Option<String> = None;

        loop {
            // Follow-up pages take the page key as their only parameter.
            let url = match &next_page_key {
                Some(key) => Url::parse_with_params(&base, &[("nextPageKey", key.as_str())])?,
                None => Url::parse(&base)?,
            };
            let page: ExtensionInstancePage = self.get_json(url)?;
            instances.extend(page.configurations);
            match page.next_page_key {
                Some(key) if !key.is_empty() => next_page_key = Some(key),
                _ => break,
            }
        }

        debug!("{} instance(s) of {}", instances.len(), extension_id);
        Ok(instances)
    }

    fn full_configuration(&self, extension_id: &str, instance_id: &str) -> Result<EndpointConfig> {
        let url = Url::parse(&self.url(&format!(
            "{}/{}/instances/{}",
            EXTENSIONS_API, extension_id, instance_id
        )))?;
        self.get_json(url)
    }
}

impl MonitorApi for DynatraceClient {
    fn create_monitor(&self, monitor: &Value) -> Result<ApiResponse> {
        let url = self.url(NAM_MONITORS_API);
        debug!("POST {}", url);
        let resp = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.auth_header())
            .json(monitor)
            .send()
            .with_context(|| format!("POST {} failed", url))?;

        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const DNS_INSTANCES: &str = "/api/config/v1/extensions/custom.remote.python.thirdparty_dns/instances";

    #[test]
    fn lists_instances_across_pages() {
        let mut server = mockito::Server::new();
        let first = server
            .mock("GET", DNS_INSTANCES)
            .match_query(Matcher::Missing)
            .match_header("authorization", "Api-Token secret")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "configurationsList": [{ "id": "1", "name": "dns a" }],
                    "nextPageKey": "page-2",
                    "totalResults": 2
                })
                .to_string(),
            )
            .create();
        let second = server
            .mock("GET", DNS_INSTANCES)
            .match_query(Matcher::UrlEncoded("nextPageKey".into(), "page-2".into()))
            .with_status(200)
            .with_body(json!({ "configurationsList": [{ "id": "2", "name": "dns b" }] }).to_string())
            .create();

        let client = DynatraceClient::new(&server.url(), "secret").unwrap();
        let instances = client
            .list_instances("custom.remote.python.thirdparty_dns")
            .unwrap();

        assert_eq!(
            instances.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["1", "2"]
        );
        first.assert();
        second.assert();
    }

    #[test]
    fn listing_error_status_is_an_error() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", DNS_INSTANCES)
            .with_status(401)
            .with_body("unauthorized")
            .create();

        let client = DynatraceClient::new(&server.url(), "bad").unwrap();
        let err = client
            .list_instances("custom.remote.python.thirdparty_dns")
            .unwrap_err();
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn fetches_full_configuration() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("GET", format!("{}/abc", DNS_INSTANCES).as_str())
            .with_status(200)
            .with_body(
                json!({
                    "extensionId": "custom.remote.python.thirdparty_dns",
                    "endpointName": "ep1",
                    "properties": { "host": "example.com", "dns_server": "" }
                })
                .to_string(),
            )
            .create();

        // Trailing slash on the base URL is tolerated.
        let client = DynatraceClient::new(&format!("{}/", server.url()), "t").unwrap();
        let cfg = client
            .full_configuration("custom.remote.python.thirdparty_dns", "abc")
            .unwrap();
        assert_eq!(cfg.endpoint_name.as_deref(), Some("ep1"));
        assert_eq!(cfg.text("host").as_deref(), Some("example.com"));
    }

    #[test]
    fn create_monitor_posts_json_with_token() {
        let mut server = mockito::Server::new();
        let m = server
            .mock("POST", "/api/v2/synthetic/monitors")
            .match_header("authorization", "Api-Token secret")
            .match_body(Matcher::PartialJson(json!({ "name": "ep1" })))
            .with_status(200)
            .with_body(r#"{"entityId": "SYNTHETIC_TEST-1"}"#)
            .create();

        let client = DynatraceClient::new(&server.url(), "secret").unwrap();
        let resp = client.create_monitor(&json!({ "name": "ep1" })).unwrap();
        assert!(resp.is_created());
        assert!(resp.body.contains("SYNTHETIC_TEST-1"));
        m.assert();
    }

    #[test]
    fn create_monitor_returns_error_statuses() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/api/v2/synthetic/monitors")
            .with_status(400)
            .with_body(r#"{"error": {"code": 400}}"#)
            .create();

        let client = DynatraceClient::new(&server.url(), "secret").unwrap();
        let resp = client.create_monitor(&json!({})).unwrap();
        assert_eq!(resp.status, 400);
        assert!(!resp.is_created());
    }
}
