//! Resource lifecycle against the local state file: apply, refresh,
//! import, destroy, show.

use serde::Serialize;
use tabled::Tabled;
use tracing::{info, warn};

use zia_provider::{Meta, Provider, Resource, ResourceData, Schema};

use crate::cli::ApplyArgs;
use crate::error::CliError;
use crate::output;
use crate::state::{self, StateFile};

use super::{Context, util};

#[derive(Debug, Clone, Serialize, Tabled)]
struct StateRow {
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "ID")]
    id: String,
}

// ── Helpers ─────────────────────────────────────────────────────────

/// First force-new attribute whose value differs from state.
fn replacement_trigger<'a>(schema: &'a Schema, d: &ResourceData) -> Option<&'a str> {
    schema
        .iter()
        .find(|(name, attribute)| attribute.force_new && d.has_change(name))
        .map(|(name, _)| name)
}

/// Write the outcome of an operation into state: an ID keeps the entry,
/// no ID drops it.
fn record(state: &mut StateFile, address: &str, d: &ResourceData) {
    match d.id() {
        Some(id) => state.put(address.to_owned(), id.to_owned(), d.attributes().clone()),
        None => {
            state.remove(address);
        }
    }
}

fn print_resource(schema: &Schema, d: &ResourceData, ctx: &Context) -> Result<(), CliError> {
    let shown = output::redact(schema, d.attributes());
    let out = output::render_attributes(ctx.format, d.id().unwrap_or_default(), &shown)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

// ── Apply ───────────────────────────────────────────────────────────

/// Create the resource, or update it when the address is already in state.
/// A changed force-new attribute deletes and recreates it.
pub async fn apply(
    args: ApplyArgs,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    let resource = provider.resource(&args.type_name)?;
    let schema = resource.schema();
    let config = util::read_attribute_file(&args.file)?;
    let address = state::address(&args.type_name, &args.name);
    let mut state = StateFile::load(&ctx.state_path)?;

    let (verb, d, result) = match state.get(&address).cloned() {
        None => {
            let mut d = ResourceData::from_config(schema.clone(), config)?;
            let result = resource.create(&mut d, meta).await;
            ("created", d, result)
        }
        Some(entry) => {
            let mut d = ResourceData::for_update(
                schema.clone(),
                entry.id.clone(),
                entry.attributes.clone(),
                config.clone(),
            )?;
            if let Some(attribute) = replacement_trigger(&schema, &d) {
                info!(%address, attribute, "change forces replacement");
                let mut old = ResourceData::from_state(schema.clone(), entry.id, entry.attributes);
                resource.delete(&mut old, meta).await?;
                state.remove(&address);

                let mut fresh = ResourceData::from_config(schema.clone(), config)?;
                let result = resource.create(&mut fresh, meta).await;
                ("replaced", fresh, result)
            } else {
                let result = resource.update(&mut d, meta).await;
                ("updated", d, result)
            }
        }
    };

    if let Err(e) = result {
        // A create that got as far as an ID exists remotely; keep tracking it.
        if verb != "updated" && d.id().is_some() {
            record(&mut state, &address, &d);
        }
        state.save()?;
        return Err(e.into());
    }

    record(&mut state, &address, &d);
    state.save()?;

    if d.id().is_none() {
        warn!(%address, "resource disappeared while applying, dropped from state");
        return Ok(());
    }
    output::note(verb, &address, ctx.color, ctx.quiet);
    print_resource(&schema, &d, ctx)
}

// ── Refresh ─────────────────────────────────────────────────────────

/// Re-read managed resources; entities gone remotely leave state.
pub async fn refresh(
    address: Option<&str>,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    let mut state = StateFile::load(&ctx.state_path)?;

    let addresses: Vec<String> = match address {
        Some(addr) => {
            if state.get(addr).is_none() {
                return Err(CliError::NotInState {
                    address: addr.to_owned(),
                });
            }
            vec![addr.to_owned()]
        }
        None => state.state.resources.keys().cloned().collect(),
    };

    for addr in &addresses {
        let (type_name, _) = state::split_address(addr)?;
        let resource = provider.resource(type_name)?;
        let Some(entry) = state.get(addr).cloned() else {
            continue;
        };

        let mut d = ResourceData::from_state(resource.schema(), entry.id, entry.attributes);
        resource.read(&mut d, meta).await?;
        record(&mut state, addr, &d);
        if d.id().is_none() {
            output::note("removed", addr, ctx.color, ctx.quiet);
        }
    }
    state.save()?;

    print_state(&state, ctx)
}

// ── Import ──────────────────────────────────────────────────────────

/// Adopt an existing entity, by numeric ID or by name, under `type.name`.
pub async fn import(
    type_name: &str,
    name: &str,
    identifier: &str,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    let resource = provider.resource(type_name)?;
    let address = state::address(type_name, name);
    let mut state = StateFile::load(&ctx.state_path)?;
    if state.get(&address).is_some() {
        return Err(CliError::AlreadyManaged { address });
    }

    let d = resource.import(identifier, meta).await?;
    record(&mut state, &address, &d);
    state.save()?;

    output::note("imported", &address, ctx.color, ctx.quiet);
    print_resource(&resource.schema(), &d, ctx)
}

// ── Destroy ─────────────────────────────────────────────────────────

pub async fn destroy(
    type_name: &str,
    name: &str,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    let resource: &dyn Resource = provider.resource(type_name)?;
    let address = state::address(type_name, name);
    let mut state = StateFile::load(&ctx.state_path)?;
    let entry = state
        .get(&address)
        .cloned()
        .ok_or_else(|| CliError::NotInState {
            address: address.clone(),
        })?;

    if !util::confirm(
        &format!("Destroy {address} (id {})?", entry.id),
        "destroy",
        ctx.yes,
    )? {
        return Ok(());
    }

    let mut d = ResourceData::from_state(resource.schema(), entry.id, entry.attributes);
    resource.delete(&mut d, meta).await?;
    state.remove(&address);
    state.save()?;

    output::note("destroyed", &address, ctx.color, ctx.quiet);
    Ok(())
}

// ── Show ────────────────────────────────────────────────────────────

/// List state, or print one entry's attributes. Works offline.
pub fn show(provider: &Provider, address: Option<&str>, ctx: &Context) -> Result<(), CliError> {
    let state = StateFile::load(&ctx.state_path)?;

    let Some(addr) = address else {
        return print_state(&state, ctx);
    };

    let entry = state.get(addr).ok_or_else(|| CliError::NotInState {
        address: addr.to_owned(),
    })?;
    let (type_name, _) = state::split_address(addr)?;
    let shown = match provider.resource(type_name) {
        Ok(resource) => output::redact(&resource.schema(), &entry.attributes),
        Err(_) => entry.attributes.clone(),
    };
    let out = output::render_attributes(ctx.format, &entry.id, &shown)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

fn print_state(state: &StateFile, ctx: &Context) -> Result<(), CliError> {
    let rows: Vec<StateRow> = state
        .state
        .resources
        .iter()
        .map(|(address, entry)| StateRow {
            address: address.clone(),
            id: entry.id.clone(),
        })
        .collect();
    let out = output::render_list(ctx.format, &rows, Clone::clone, |r| r.address.clone())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Map, Value, json};

    use super::*;

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn force_new_change_triggers_replacement() {
        let provider = Provider::new();
        let schema = provider
            .resource("zia_traffic_forwarding_static_ip")
            .unwrap()
            .schema();

        let prior = obj(json!({"ip_address": "203.0.113.10", "comment": "old", "static_ip_id": 5}));
        let same_ip = ResourceData::for_update(
            schema.clone(),
            "5",
            prior.clone(),
            obj(json!({"ip_address": "203.0.113.10", "comment": "new"})),
        )
        .unwrap();
        assert_eq!(replacement_trigger(&schema, &same_ip), None);

        let new_ip = ResourceData::for_update(
            schema.clone(),
            "5",
            prior,
            obj(json!({"ip_address": "203.0.113.11"})),
        )
        .unwrap();
        assert_eq!(replacement_trigger(&schema, &new_ip), Some("ip_address"));
    }

    #[test]
    fn record_drops_entries_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = StateFile::load(&dir.path().join("s.json")).unwrap();
        let schema = Provider::new().resource("zia_rule_labels").unwrap().schema();

        let mut d = ResourceData::from_state(schema, "7", obj(json!({"name": "web"})));
        record(&mut state, "zia_rule_labels.web", &d);
        assert_eq!(state.get("zia_rule_labels.web").unwrap().id, "7");

        d.clear_id();
        record(&mut state, "zia_rule_labels.web", &d);
        assert!(state.get("zia_rule_labels.web").is_none());
    }
}
