// Session authentication
//
// ZIA uses a cookie session: `POST /authenticatedSession` with the
// obfuscated API key sets `JSESSIONID` in the client's jar, and every
// later call rides on that cookie until `DELETE /authenticatedSession`.

use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::debug;

use crate::auth::{Credentials, obfuscate_api_key};
use crate::client::ZiaClient;
use crate::error::Error;

const SESSION_PATH: &str = "authenticatedSession";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    api_key: String,
    username: &'a str,
    password: &'a str,
    timestamp: String,
}

impl ZiaClient {
    /// Open a session with the current time as obfuscation timestamp.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), Error> {
        let now = chrono::Utc::now().timestamp_millis();
        self.login_at(credentials, now).await
    }

    /// Open a session using an explicit millisecond timestamp.
    ///
    /// `POST /authenticatedSession`
    pub async fn login_at(&self, credentials: &Credentials, timestamp_ms: i64) -> Result<(), Error> {
        let url = self.url(SESSION_PATH)?;
        debug!(username = %credentials.username, "logging in at {url}");

        let body = LoginRequest {
            api_key: obfuscate_api_key(&credentials.api_key, timestamp_ms)?,
            username: &credentials.username,
            password: credentials.password.expose_secret(),
            timestamp: timestamp_ms.to_string(),
        };

        let resp = self.http().post(url).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    ///
    /// `DELETE /authenticatedSession`
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        self.delete(SESSION_PATH).await?;
        debug!("logout complete");
        Ok(())
    }
}
