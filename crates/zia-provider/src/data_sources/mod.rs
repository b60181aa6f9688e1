// ZIA data sources
//
// Read-only lookups of existing entities by `id` or by name. Unlike
// resources, a missing entity is an error rather than a state removal.
// Modules group data sources by API family.

use crate::error::ProviderError;
use crate::resource::DataSource;
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, AttributeType, Schema};

mod activation;
mod admin;
mod dlp;
mod firewall;
mod locations;
mod rule_labels;
mod traffic;
mod urls;
mod users;

pub use activation::ActivationStatusDataSource;
pub use admin::{AdminRolesDataSource, AdminUsersDataSource};
pub use dlp::{DlpNotificationTemplatesDataSource, DlpWebRulesDataSource};
pub use firewall::{
    FirewallFilteringRuleDataSource, IpDestinationGroupsDataSource, IpSourceGroupsDataSource,
    NetworkServiceDataSource, TimeWindowDataSource,
};
pub use locations::{LocationGroupsDataSource, LocationManagementDataSource};
pub use rule_labels::RuleLabelsDataSource;
pub use traffic::{StaticIpDataSource, VpnCredentialsDataSource};
pub use urls::{UrlCategoriesDataSource, UrlFilteringRulesDataSource};
pub use users::{DepartmentManagementDataSource, GroupManagementDataSource, UserManagementDataSource};

/// Every data source, in registration order.
pub fn all() -> Vec<Box<dyn DataSource>> {
    vec![
        Box::new(AdminRolesDataSource),
        Box::new(AdminUsersDataSource),
        Box::new(FirewallFilteringRuleDataSource),
        Box::new(NetworkServiceDataSource),
        Box::new(IpSourceGroupsDataSource),
        Box::new(IpDestinationGroupsDataSource),
        Box::new(TimeWindowDataSource),
        Box::new(RuleLabelsDataSource),
        Box::new(LocationManagementDataSource),
        Box::new(LocationGroupsDataSource),
        Box::new(VpnCredentialsDataSource),
        Box::new(StaticIpDataSource),
        Box::new(UrlCategoriesDataSource),
        Box::new(UrlFilteringRulesDataSource),
        Box::new(DlpWebRulesDataSource),
        Box::new(DlpNotificationTemplatesDataSource),
        Box::new(UserManagementDataSource),
        Box::new(GroupManagementDataSource),
        Box::new(DepartmentManagementDataSource),
        Box::new(ActivationStatusDataSource),
    ]
}

// ── Shared schema pieces ─────────────────────────────────────────────

/// `id` plus a name attribute, either of which selects the entity.
pub(crate) fn lookup_schema(name_attr: &str) -> Schema {
    Schema::new()
        .attr("id", Attribute::int().optional().computed())
        .attr(name_attr, Attribute::string().optional().computed())
}

pub(crate) fn computed_string() -> Attribute {
    Attribute::string().computed()
}

pub(crate) fn computed_int() -> Attribute {
    Attribute::int().computed()
}

pub(crate) fn computed_bool() -> Attribute {
    Attribute::boolean().computed()
}

pub(crate) fn computed_strings() -> Attribute {
    Attribute::list_of(AttributeType::String).computed()
}

/// Record the resolved entity ID both as the data source ID and as `id`.
pub(crate) fn set_identity(d: &mut ResourceData, id: i64) -> Result<(), ProviderError> {
    d.set_id(id.to_string());
    d.set("id", id)
}
