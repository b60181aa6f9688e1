// ── ZIA API models ──
//
// Request/response DTOs for the ZIA REST endpoints. Field names follow the
// API's camelCase JSON; optional and empty values are skipped on the wire
// so a PUT carries exactly what the caller set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod activation;
pub mod admin;
pub mod dlp;
pub mod firewall;
pub mod locations;
pub mod settings;
pub mod traffic;
pub mod urls;
pub mod users;

pub use activation::Activation;
pub use admin::{AdminRole, AdminUser};
pub use dlp::{DlpNotificationTemplate, WebDlpRule};
pub use firewall::{
    FirewallFilteringRule, IpDestinationGroup, IpSourceGroup, NetworkPorts, NetworkService,
    RuleLabel, TimeWindow,
};
pub use locations::{Location, LocationGroup};
pub use settings::{ExemptedUrls, SecurityBlacklist, SecurityWhitelist};
pub use traffic::{StaticIp, VpnCredential};
pub use urls::{UrlCategory, UrlCategoryScope, UrlFilteringRule, UrlKeywordCounts};
pub use users::{Department, Group, User};

/// Weak reference to another ZIA entity: `{id, name, extensions}`.
///
/// Requests only need `id`; responses fill `name` and sometimes
/// `extensions` (free-form metadata such as `externalId`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdNameExtensions {
    #[serde(default)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, serde_json::Value>,
}

impl IdNameExtensions {
    /// Reference carrying only an ID, the shape requests send.
    pub fn from_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero(v: &i64) -> bool {
    *v == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn id_only_reference_serializes_compactly() {
        let value = serde_json::to_value(IdNameExtensions::from_id(42)).unwrap();
        assert_eq!(value, json!({ "id": 42 }));
    }

    #[test]
    fn reference_tolerates_missing_fields() {
        let parsed: IdNameExtensions =
            serde_json::from_value(json!({ "id": 7, "extensions": { "externalId": "x" } }))
                .unwrap();
        assert_eq!(parsed.id, 7);
        assert!(parsed.name.is_empty());
        assert_eq!(parsed.extensions["externalId"], json!("x"));
    }
}
