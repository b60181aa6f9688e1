// Tenant-wide settings singletons
//
// These have no identity of their own: reads return the whole list and
// writes replace it, except exempted URLs which are edited by delta.

use tracing::debug;

use crate::client::ZiaClient;
use crate::error::Error;
use crate::models::{ExemptedUrls, SecurityBlacklist, SecurityWhitelist};

const EXEMPTED_URLS_PATH: &str = "authSettings/exemptedUrls";

impl ZiaClient {
    // ── Security policy lists ────────────────────────────────────────

    /// `GET /security`
    pub async fn get_security_whitelist(&self) -> Result<SecurityWhitelist, Error> {
        let list: Option<SecurityWhitelist> = self.get("security").await?;
        Ok(list.unwrap_or_default())
    }

    /// `PUT /security`
    pub async fn update_security_whitelist(
        &self,
        list: &SecurityWhitelist,
    ) -> Result<SecurityWhitelist, Error> {
        debug!(count = list.whitelist_urls.len(), "replacing security whitelist");
        let updated: Option<SecurityWhitelist> = self.put("security", list).await?;
        Ok(updated.unwrap_or_else(|| list.clone()))
    }

    /// `GET /security/advanced`
    pub async fn get_security_blacklist(&self) -> Result<SecurityBlacklist, Error> {
        let list: Option<SecurityBlacklist> = self.get("security/advanced").await?;
        Ok(list.unwrap_or_default())
    }

    /// `PUT /security/advanced`
    pub async fn update_security_blacklist(
        &self,
        list: &SecurityBlacklist,
    ) -> Result<SecurityBlacklist, Error> {
        debug!(count = list.blacklist_urls.len(), "replacing security blacklist");
        let updated: Option<SecurityBlacklist> = self.put("security/advanced", list).await?;
        Ok(updated.unwrap_or_else(|| list.clone()))
    }

    // ── Authentication exemptions ────────────────────────────────────

    /// `GET /authSettings/exemptedUrls`
    pub async fn get_exempted_urls(&self) -> Result<ExemptedUrls, Error> {
        let urls: Option<ExemptedUrls> = self.get(EXEMPTED_URLS_PATH).await?;
        Ok(urls.unwrap_or_default())
    }

    /// `POST /authSettings/exemptedUrls?action=ADD_TO_LIST`
    pub async fn add_exempted_urls(&self, urls: &[String]) -> Result<(), Error> {
        self.edit_exempted_urls("ADD_TO_LIST", urls).await
    }

    /// `POST /authSettings/exemptedUrls?action=REMOVE_FROM_LIST`
    pub async fn remove_exempted_urls(&self, urls: &[String]) -> Result<(), Error> {
        self.edit_exempted_urls("REMOVE_FROM_LIST", urls).await
    }

    async fn edit_exempted_urls(&self, action: &str, urls: &[String]) -> Result<(), Error> {
        if urls.is_empty() {
            return Ok(());
        }
        debug!(action, count = urls.len(), "editing exempted urls");
        let body = ExemptedUrls {
            urls: urls.to_vec(),
        };
        let params = [("action", action.to_owned())];
        self.post_no_response(EXEMPTED_URLS_PATH, &params, &body).await
    }
}
