// ZIA REST client
//
// Wraps `reqwest::Client` with base URL joining, JSON request helpers and
// ZIA error-body decoding. Endpoint families (firewall, locations, DLP...)
// are inherent methods implemented in `crate::endpoints` so this module
// stays focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::ZiaCloud;
use crate::error::Error;
use crate::transport::TransportConfig;

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the ZIA API.
///
/// Authenticates with a cookie session (see [`ZiaClient::login`]) and talks
/// JSON to endpoints under `/api/v1/`. Cloning is cheap: the underlying
/// `reqwest::Client` and its cookie jar are shared.
#[derive(Clone)]
pub struct ZiaClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ZiaClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for an explicit API base URL.
    ///
    /// A cookie jar is attached if the transport config lacks one, since
    /// every call after login rides on the `JSESSIONID` cookie.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
        })
    }

    /// Build a client for one of the public ZIA clouds.
    pub fn for_cloud(cloud: ZiaCloud, transport: &TransportConfig) -> Result<Self, Error> {
        Self::new(cloud.base_url(), transport)
    }

    /// Wrap a pre-built `reqwest::Client` (caller manages cookies).
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
        }
    }

    /// The API base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"ruleLabels/12"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url} params={params:?}");

        let resp = self.http.post(url).query(params).json(body).send().await?;
        handle_empty(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        handle_empty(resp).await
    }
}

// ── Lookup helpers ───────────────────────────────────────────────────

/// Pick the entry whose name matches `name` case-insensitively.
///
/// ZIA list endpoints return every entity; name lookups are resolved
/// client-side the same way the admin portal does.
pub(crate) fn find_by_name<T>(
    items: Vec<T>,
    name: &str,
    name_of: impl Fn(&T) -> &str,
    resource: &'static str,
) -> Result<T, Error> {
    items
        .into_iter()
        .find(|item| name_of(item).eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::NotFound {
            resource,
            identifier: name.to_owned(),
        })
}

// ── Response handling ────────────────────────────────────────────────

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

pub(crate) async fn handle_response<T: DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        // Some endpoints answer 204 / empty body; let `()`-like and
        // Option targets decode from `null`.
        let body = if body.trim().is_empty() {
            "null".to_owned()
        } else {
            body
        };
        serde_json::from_str(&body).map_err(|e| {
            let preview = preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

pub(crate) async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Error::SessionExpired;
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after_secs = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split_whitespace().next())
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);
        return Error::RateLimited { retry_after_secs };
    }

    let raw = resp.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorResponse>(&raw) {
        Ok(err) => Error::Api {
            status: status.as_u16(),
            message: err.message.unwrap_or_else(|| status.to_string()),
            code: err.code,
        },
        Err(_) => Error::Api {
            status: status.as_u16(),
            code: None,
            message: if raw.is_empty() {
                status.to_string()
            } else {
                preview(&raw)
            },
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client = ZiaClient::with_client(
            reqwest::Client::new(),
            Url::parse("https://zsapi.zscaler.net/api/v1").unwrap(),
        );
        assert_eq!(client.base_url().as_str(), "https://zsapi.zscaler.net/api/v1/");
        assert_eq!(
            client.url("/ruleLabels/7").unwrap().as_str(),
            "https://zsapi.zscaler.net/api/v1/ruleLabels/7"
        );
    }

    #[test]
    fn find_by_name_ignores_case() {
        let items = vec!["Alpha".to_owned(), "Beta".to_owned()];
        let found = find_by_name(items, "beta", String::as_str, "label").unwrap();
        assert_eq!(found, "Beta");
    }

    #[test]
    fn find_by_name_miss() {
        let items: Vec<String> = Vec::new();
        let err = find_by_name(items, "gamma", String::as_str, "label").unwrap_err();
        assert!(err.is_not_found());
    }
}
