// zia_firewall_filtering_network_service

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use tracing::info;
use zia_api::models::{NetworkPorts, NetworkService};

use crate::activation::trigger_activation;
use crate::error::ProviderError;
use crate::provider::Meta;
use crate::resource::{Resource, read_created, read_or_remove};
use crate::resource_data::ResourceData;
use crate::schema::{Attribute, Schema, Validation};

const TYPE_NAME: &str = "zia_firewall_filtering_network_service";

const SERVICE_TYPES: &[&str] = &["STANDARD", "PREDEFINED", "CUSTOM"];

const PORT_LISTS: &[&str] = &["src_tcp_ports", "dest_tcp_ports", "src_udp_ports", "dest_udp_ports"];

/// Network service: named sets of TCP/UDP port ranges.
pub struct NetworkServiceResource;

fn port_block() -> Attribute {
    Attribute::list_of_block(
        Schema::new()
            .attr(
                "start",
                Attribute::int().optional().validate(Validation::IntBetween(1, 65535)),
            )
            .attr(
                "end",
                Attribute::int().optional().validate(Validation::IntBetween(0, 65535)),
            ),
    )
    .optional()
}

fn expand_ports(blocks: &[&Map<String, Value>]) -> Result<Vec<NetworkPorts>, ProviderError> {
    blocks
        .iter()
        .map(|block| {
            let field = |name: &str| -> Result<i32, ProviderError> {
                let n = block.get(name).and_then(Value::as_i64).unwrap_or_default();
                i32::try_from(n).map_err(|_| ProviderError::invalid(name, format!("{n} is not a port")))
            };
            Ok(NetworkPorts {
                start: field("start")?,
                end: field("end")?,
            })
        })
        .collect()
}

fn flatten_ports(ports: &[NetworkPorts]) -> Value {
    if ports.is_empty() {
        return Value::Null;
    }
    Value::Array(
        ports
            .iter()
            .map(|p| {
                if p.end == 0 {
                    json!({ "start": p.start })
                } else {
                    json!({ "start": p.start, "end": p.end })
                }
            })
            .collect(),
    )
}

fn expand(d: &ResourceData) -> Result<NetworkService, ProviderError> {
    Ok(NetworkService {
        name: d.get_string("name"),
        tag: d.get_str("tag").filter(|t| !t.is_empty()).map(str::to_owned),
        src_tcp_ports: expand_ports(&d.get_blocks("src_tcp_ports"))?,
        dest_tcp_ports: expand_ports(&d.get_blocks("dest_tcp_ports"))?,
        src_udp_ports: expand_ports(&d.get_blocks("src_udp_ports"))?,
        dest_udp_ports: expand_ports(&d.get_blocks("dest_udp_ports"))?,
        service_type: d.get_string("type"),
        description: d.get_string("description"),
        is_name_l10n_tag: d.get_bool("is_name_l10n_tag"),
        ..NetworkService::default()
    })
}

fn flatten(d: &mut ResourceData, service: &NetworkService) -> Result<(), ProviderError> {
    d.set("network_service_id", service.id)?;
    d.set("name", service.name.as_str())?;
    d.set("tag", service.tag.clone())?;
    d.set("src_tcp_ports", flatten_ports(&service.src_tcp_ports))?;
    d.set("dest_tcp_ports", flatten_ports(&service.dest_tcp_ports))?;
    d.set("src_udp_ports", flatten_ports(&service.src_udp_ports))?;
    d.set("dest_udp_ports", flatten_ports(&service.dest_udp_ports))?;
    d.set("type", service.service_type.as_str())?;
    d.set("description", service.description.as_str())?;
    d.set("is_name_l10n_tag", service.is_name_l10n_tag)?;
    Ok(())
}

#[async_trait]
impl Resource for NetworkServiceResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        let mut schema = Schema::new()
            .attr("network_service_id", Attribute::int().computed())
            .attr(
                "name",
                Attribute::string()
                    .required()
                    .validate(Validation::StringLenBetween(1, 255)),
            )
            .attr("tag", Attribute::string().optional().computed())
            .attr(
                "type",
                Attribute::string()
                    .optional()
                    .computed()
                    .validate(Validation::one_of(SERVICE_TYPES)),
            )
            .attr(
                "description",
                Attribute::string()
                    .optional()
                    .validate(Validation::StringLenBetween(0, 10240)),
            )
            .attr("is_name_l10n_tag", Attribute::boolean().optional().default(false));
        for key in PORT_LISTS {
            schema = schema.attr(key, port_block());
        }
        schema
    }

    async fn create(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let service = meta.client.create_network_service(&expand(d)?).await?;
        info!(resource = TYPE_NAME, id = service.id, "created");
        d.set_id(service.id.to_string());
        trigger_activation(meta).await?;
        read_created(self, d, meta).await
    }

    async fn read(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.get_network_service(id).await;
        let Some(service) = read_or_remove(d, TYPE_NAME, result)? else {
            return Ok(());
        };
        d.set_id(service.id.to_string());
        flatten(d, &service)
    }

    async fn update(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        let result = meta.client.update_network_service(id, &expand(d)?).await;
        if read_or_remove(d, TYPE_NAME, result)?.is_none() {
            return Ok(());
        }
        info!(resource = TYPE_NAME, id, "updated");
        trigger_activation(meta).await?;
        self.read(d, meta).await
    }

    async fn delete(&self, d: &mut ResourceData, meta: &Meta) -> Result<(), ProviderError> {
        let id = d.numeric_id()?;
        meta.client.delete_network_service(id).await?;
        info!(resource = TYPE_NAME, id, "deleted");
        d.clear_id();
        trigger_activation(meta).await
    }

    async fn lookup_id(&self, name: &str, meta: &Meta) -> Result<String, ProviderError> {
        let service = meta.client.get_network_service_by_name(name).await?;
        Ok(service.id.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn single_ports_drop_the_end() {
        let ports = [
            NetworkPorts { start: 53, end: 0 },
            NetworkPorts { start: 8000, end: 8080 },
        ];
        assert_eq!(
            flatten_ports(&ports),
            json!([{"start": 53}, {"start": 8000, "end": 8080}])
        );
        assert_eq!(flatten_ports(&[]), Value::Null);
    }

    #[test]
    fn expands_port_ranges() {
        let config = json!({
            "name": "dns",
            "dest_udp_ports": [{"start": 53}],
            "dest_tcp_ports": [{"start": 5000, "end": 5010}]
        });
        let d = ResourceData::from_config(
            NetworkServiceResource.schema(),
            config.as_object().cloned().unwrap(),
        )
        .unwrap();
        let service = expand(&d).unwrap();
        assert_eq!(service.dest_udp_ports, vec![NetworkPorts { start: 53, end: 0 }]);
        assert_eq!(service.dest_tcp_ports[0].end, 5010);
        assert!(service.tag.is_none());
    }
}
