// ZIA endpoint families
//
// Each file adds inherent methods on `ZiaClient` for one API area. The
// shared pagination helper lives here.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{trace, warn};

use crate::client::ZiaClient;
use crate::error::Error;

mod activation;
mod admin;
mod dlp;
mod firewall;
mod locations;
mod rule_labels;
mod settings;
mod traffic;
mod urls;
mod users;

/// Largest page the ZIA list endpoints accept.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Upper bound on pages fetched for one listing.
pub const MAX_PAGES: usize = 1000;

impl ZiaClient {
    /// Fetch every page of a paginated list endpoint.
    ///
    /// Pages are 1-based; a short page marks the end of the listing. A page
    /// identical to the one before it also ends the listing, since a server
    /// that ignores `page` would otherwise be polled forever.
    pub(crate) async fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        extra: &[(&str, String)],
    ) -> Result<Vec<T>, Error> {
        let mut all = Vec::new();
        let mut previous: Option<Vec<Value>> = None;
        for page in 1..=MAX_PAGES {
            let mut params: Vec<(&str, String)> = extra.to_vec();
            params.push(("page", page.to_string()));
            params.push(("pageSize", MAX_PAGE_SIZE.to_string()));

            let batch: Option<Vec<Value>> = self.get_with_params(path, &params).await?;
            let batch = batch.unwrap_or_default();
            let len = batch.len();
            trace!(path, page, len, "fetched page");

            if previous.as_ref() == Some(&batch) {
                warn!(path, page, "page repeats the previous one, stopping");
                return Ok(all);
            }
            for item in &batch {
                all.push(decode_item(item)?);
            }
            if len < MAX_PAGE_SIZE {
                return Ok(all);
            }
            previous = Some(batch);
        }
        warn!(path, pages = MAX_PAGES, "page limit reached, listing truncated");
        Ok(all)
    }
}

fn decode_item<T: DeserializeOwned>(item: &Value) -> Result<T, Error> {
    serde_json::from_value(item.clone()).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: item.to_string(),
    })
}
