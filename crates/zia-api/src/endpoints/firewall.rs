// Cloud firewall endpoints
//
// Filtering rules, network services, source/destination IP groups and the
// read-only time windows referenced by rule schedules.

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{
    FirewallFilteringRule, IpDestinationGroup, IpSourceGroup, NetworkService, TimeWindow,
};

impl ZiaClient {
    // ── Filtering rules ──────────────────────────────────────────────

    /// `GET /firewallFilteringRules`
    pub async fn list_firewall_rules(&self) -> Result<Vec<FirewallFilteringRule>, Error> {
        self.get("firewallFilteringRules").await
    }

    /// `GET /firewallFilteringRules/{id}`
    pub async fn get_firewall_rule(&self, id: i64) -> Result<FirewallFilteringRule, Error> {
        self.get(&format!("firewallFilteringRules/{id}")).await
    }

    pub async fn get_firewall_rule_by_name(
        &self,
        name: &str,
    ) -> Result<FirewallFilteringRule, Error> {
        let rules = self.list_firewall_rules().await?;
        find_by_name(rules, name, |r| r.name.as_str(), "firewall filtering rule")
    }

    /// `POST /firewallFilteringRules`
    pub async fn create_firewall_rule(
        &self,
        rule: &FirewallFilteringRule,
    ) -> Result<FirewallFilteringRule, Error> {
        debug!(name = %rule.name, "creating firewall filtering rule");
        self.post("firewallFilteringRules", rule).await
    }

    /// `PUT /firewallFilteringRules/{id}`
    pub async fn update_firewall_rule(
        &self,
        id: i64,
        rule: &FirewallFilteringRule,
    ) -> Result<FirewallFilteringRule, Error> {
        debug!(id, "updating firewall filtering rule");
        self.put(&format!("firewallFilteringRules/{id}"), rule).await
    }

    /// `DELETE /firewallFilteringRules/{id}`
    pub async fn delete_firewall_rule(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting firewall filtering rule");
        self.delete(&format!("firewallFilteringRules/{id}")).await
    }

    // ── Network services ─────────────────────────────────────────────

    /// `GET /networkServices`
    pub async fn list_network_services(&self) -> Result<Vec<NetworkService>, Error> {
        self.get_all_pages("networkServices", &[]).await
    }

    /// `GET /networkServices/{id}`
    pub async fn get_network_service(&self, id: i64) -> Result<NetworkService, Error> {
        self.get(&format!("networkServices/{id}")).await
    }

    pub async fn get_network_service_by_name(&self, name: &str) -> Result<NetworkService, Error> {
        let services = self.list_network_services().await?;
        find_by_name(services, name, |s| s.name.as_str(), "network service")
    }

    /// `POST /networkServices`
    pub async fn create_network_service(
        &self,
        service: &NetworkService,
    ) -> Result<NetworkService, Error> {
        debug!(name = %service.name, "creating network service");
        self.post("networkServices", service).await
    }

    /// `PUT /networkServices/{id}`
    pub async fn update_network_service(
        &self,
        id: i64,
        service: &NetworkService,
    ) -> Result<NetworkService, Error> {
        debug!(id, "updating network service");
        self.put(&format!("networkServices/{id}"), service).await
    }

    /// `DELETE /networkServices/{id}`
    pub async fn delete_network_service(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting network service");
        self.delete(&format!("networkServices/{id}")).await
    }

    // ── Source IP groups ─────────────────────────────────────────────

    /// `GET /ipSourceGroups`
    pub async fn list_ip_source_groups(&self) -> Result<Vec<IpSourceGroup>, Error> {
        self.get("ipSourceGroups").await
    }

    /// `GET /ipSourceGroups/{id}`
    pub async fn get_ip_source_group(&self, id: i64) -> Result<IpSourceGroup, Error> {
        self.get(&format!("ipSourceGroups/{id}")).await
    }

    pub async fn get_ip_source_group_by_name(&self, name: &str) -> Result<IpSourceGroup, Error> {
        let groups = self.list_ip_source_groups().await?;
        find_by_name(groups, name, |g| g.name.as_str(), "ip source group")
    }

    /// `POST /ipSourceGroups`
    pub async fn create_ip_source_group(
        &self,
        group: &IpSourceGroup,
    ) -> Result<IpSourceGroup, Error> {
        debug!(name = %group.name, "creating ip source group");
        self.post("ipSourceGroups", group).await
    }

    /// `PUT /ipSourceGroups/{id}`
    pub async fn update_ip_source_group(
        &self,
        id: i64,
        group: &IpSourceGroup,
    ) -> Result<IpSourceGroup, Error> {
        debug!(id, "updating ip source group");
        self.put(&format!("ipSourceGroups/{id}"), group).await
    }

    /// `DELETE /ipSourceGroups/{id}`
    pub async fn delete_ip_source_group(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting ip source group");
        self.delete(&format!("ipSourceGroups/{id}")).await
    }

    // ── Destination IP groups ────────────────────────────────────────

    /// `GET /ipDestinationGroups`
    pub async fn list_ip_destination_groups(&self) -> Result<Vec<IpDestinationGroup>, Error> {
        self.get("ipDestinationGroups").await
    }

    /// `GET /ipDestinationGroups/{id}`
    pub async fn get_ip_destination_group(&self, id: i64) -> Result<IpDestinationGroup, Error> {
        self.get(&format!("ipDestinationGroups/{id}")).await
    }

    pub async fn get_ip_destination_group_by_name(
        &self,
        name: &str,
    ) -> Result<IpDestinationGroup, Error> {
        let groups = self.list_ip_destination_groups().await?;
        find_by_name(groups, name, |g| g.name.as_str(), "ip destination group")
    }

    /// `POST /ipDestinationGroups`
    pub async fn create_ip_destination_group(
        &self,
        group: &IpDestinationGroup,
    ) -> Result<IpDestinationGroup, Error> {
        debug!(name = %group.name, "creating ip destination group");
        self.post("ipDestinationGroups", group).await
    }

    /// `PUT /ipDestinationGroups/{id}`
    pub async fn update_ip_destination_group(
        &self,
        id: i64,
        group: &IpDestinationGroup,
    ) -> Result<IpDestinationGroup, Error> {
        debug!(id, "updating ip destination group");
        self.put(&format!("ipDestinationGroups/{id}"), group).await
    }

    /// `DELETE /ipDestinationGroups/{id}`
    pub async fn delete_ip_destination_group(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting ip destination group");
        self.delete(&format!("ipDestinationGroups/{id}")).await
    }

    // ── Time windows ─────────────────────────────────────────────────

    /// `GET /timeWindows`
    pub async fn list_time_windows(&self) -> Result<Vec<TimeWindow>, Error> {
        self.get("timeWindows").await
    }

    pub async fn get_time_window_by_name(&self, name: &str) -> Result<TimeWindow, Error> {
        let windows = self.list_time_windows().await?;
        find_by_name(windows, name, |w| w.name.as_str(), "time window")
    }
}
