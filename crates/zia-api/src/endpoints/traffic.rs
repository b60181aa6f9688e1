// Traffic forwarding endpoints: VPN credentials and static IPs

use tracing::debug;

use crate::client::{ZiaClient, find_by_name};
use crate::error::Error;
use crate::models::{StaticIp, VpnCredential};

impl ZiaClient {
    // ── VPN credentials ──────────────────────────────────────────────

    /// `GET /vpnCredentials` (paginated)
    pub async fn list_vpn_credentials(&self) -> Result<Vec<VpnCredential>, Error> {
        self.get_all_pages("vpnCredentials", &[]).await
    }

    /// `GET /vpnCredentials/{id}`
    pub async fn get_vpn_credential(&self, id: i64) -> Result<VpnCredential, Error> {
        self.get(&format!("vpnCredentials/{id}")).await
    }

    /// Find a UFQDN credential by its FQDN.
    pub async fn get_vpn_credential_by_fqdn(&self, fqdn: &str) -> Result<VpnCredential, Error> {
        let creds = self.list_vpn_credentials().await?;
        find_by_name(creds, fqdn, |c| c.fqdn.as_str(), "vpn credential")
    }

    /// Find an IP credential by its address.
    pub async fn get_vpn_credential_by_ip(&self, ip: &str) -> Result<VpnCredential, Error> {
        let creds = self.list_vpn_credentials().await?;
        find_by_name(creds, ip, |c| c.ip_address.as_str(), "vpn credential")
    }

    /// `POST /vpnCredentials`
    pub async fn create_vpn_credential(
        &self,
        credential: &VpnCredential,
    ) -> Result<VpnCredential, Error> {
        debug!(kind = %credential.credential_type, "creating vpn credential");
        self.post("vpnCredentials", credential).await
    }

    /// `PUT /vpnCredentials/{id}`
    pub async fn update_vpn_credential(
        &self,
        id: i64,
        credential: &VpnCredential,
    ) -> Result<VpnCredential, Error> {
        debug!(id, "updating vpn credential");
        self.put(&format!("vpnCredentials/{id}"), credential).await
    }

    /// `DELETE /vpnCredentials/{id}`
    pub async fn delete_vpn_credential(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting vpn credential");
        self.delete(&format!("vpnCredentials/{id}")).await
    }

    // ── Static IPs ───────────────────────────────────────────────────

    /// `GET /staticIP` (paginated)
    pub async fn list_static_ips(&self) -> Result<Vec<StaticIp>, Error> {
        self.get_all_pages("staticIP", &[]).await
    }

    /// `GET /staticIP/{id}`
    pub async fn get_static_ip(&self, id: i64) -> Result<StaticIp, Error> {
        self.get(&format!("staticIP/{id}")).await
    }

    pub async fn get_static_ip_by_address(&self, ip: &str) -> Result<StaticIp, Error> {
        let ips = self.list_static_ips().await?;
        find_by_name(ips, ip, |s| s.ip_address.as_str(), "static ip")
    }

    /// `POST /staticIP`
    pub async fn create_static_ip(&self, static_ip: &StaticIp) -> Result<StaticIp, Error> {
        debug!(ip = %static_ip.ip_address, "creating static ip");
        self.post("staticIP", static_ip).await
    }

    /// `PUT /staticIP/{id}`
    pub async fn update_static_ip(&self, id: i64, static_ip: &StaticIp) -> Result<StaticIp, Error> {
        debug!(id, "updating static ip");
        self.put(&format!("staticIP/{id}"), static_ip).await
    }

    /// `DELETE /staticIP/{id}`
    pub async fn delete_static_ip(&self, id: i64) -> Result<(), Error> {
        debug!(id, "deleting static ip");
        self.delete(&format!("staticIP/{id}")).await
    }
}
