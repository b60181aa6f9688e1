// ZIA resources
//
// One module per resource type. Each module declares the schema, the
// expand/flatten pair for its API model, and the CRUD operations.

use crate::resource::Resource;

mod activation_status;
mod admin_users;
mod auth_settings_urls;
mod dlp_notification_templates;
mod dlp_web_rules;
mod firewall_filtering_rule;
mod ip_destination_groups;
mod ip_source_groups;
mod location_management;
mod network_service;
mod rule_labels;
mod security_settings;
mod static_ip;
mod url_categories;
mod url_filtering_rules;
mod vpn_credentials;

pub use activation_status::ActivationStatusResource;
pub use admin_users::AdminUsersResource;
pub use auth_settings_urls::AuthSettingsUrlsResource;
pub use dlp_notification_templates::DlpNotificationTemplatesResource;
pub use dlp_web_rules::DlpWebRulesResource;
pub use firewall_filtering_rule::FirewallFilteringRuleResource;
pub use ip_destination_groups::IpDestinationGroupsResource;
pub use ip_source_groups::IpSourceGroupsResource;
pub use location_management::LocationManagementResource;
pub use network_service::NetworkServiceResource;
pub use rule_labels::RuleLabelsResource;
pub use security_settings::SecuritySettingsResource;
pub use static_ip::StaticIpResource;
pub use url_categories::UrlCategoriesResource;
pub use url_filtering_rules::UrlFilteringRulesResource;
pub use vpn_credentials::VpnCredentialsResource;

/// Every resource type, in registration order.
pub fn all() -> Vec<Box<dyn Resource>> {
    vec![
        Box::new(ActivationStatusResource),
        Box::new(AdminUsersResource),
        Box::new(AuthSettingsUrlsResource),
        Box::new(DlpNotificationTemplatesResource),
        Box::new(DlpWebRulesResource),
        Box::new(FirewallFilteringRuleResource),
        Box::new(IpDestinationGroupsResource),
        Box::new(IpSourceGroupsResource),
        Box::new(LocationManagementResource),
        Box::new(NetworkServiceResource),
        Box::new(RuleLabelsResource),
        Box::new(SecuritySettingsResource),
        Box::new(StaticIpResource),
        Box::new(UrlCategoriesResource),
        Box::new(UrlFilteringRulesResource),
        Box::new(VpnCredentialsResource),
    ]
}

/// Common rule-state values.
pub(crate) const RULE_STATES: &[&str] = &["ENABLED", "DISABLED"];
