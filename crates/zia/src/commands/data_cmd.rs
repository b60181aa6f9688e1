//! `zia data`: read a data source and print what it found.

use serde_json::{Map, Value};

use zia_provider::{AttributeType, Meta, Provider, ResourceData, Schema};

use crate::cli::DataArgs;
use crate::error::CliError;
use crate::output;

use super::{Context, util};

/// Attributes data sources accept as a lookup name, in preference order.
const NAME_KEYS: &[&str] = &["name", "configured_name", "login_name", "fqdn", "ip_address"];

/// The attribute `--name` fills in for this schema.
fn name_key(schema: &Schema) -> Option<&'static str> {
    NAME_KEYS.iter().copied().find(|key| schema.contains(key))
}

/// `--id` typed the way the schema declares `id`.
fn id_value(schema: &Schema, raw: &str) -> Result<Value, CliError> {
    if schema.get("id").is_some_and(|a| a.ty == AttributeType::String) {
        return Ok(Value::from(raw));
    }
    raw.parse::<i64>().map(Value::from).map_err(|_| CliError::Validation {
        field: "id".into(),
        reason: format!("expected a numeric ID, got '{raw}'"),
    })
}

fn lookup_config(args: &DataArgs, schema: &Schema) -> Result<Map<String, Value>, CliError> {
    if let Some(path) = &args.file {
        return util::read_attribute_file(path);
    }

    let mut config = Map::new();
    if let Some(id) = &args.id {
        config.insert("id".into(), id_value(schema, id)?);
    }
    if let Some(name) = &args.name {
        let key = name_key(schema).ok_or_else(|| CliError::Validation {
            field: "name".into(),
            reason: format!("{} has no name attribute, use --id or -f", args.type_name),
        })?;
        config.insert(key.into(), Value::from(name.as_str()));
    }
    Ok(config)
}

pub async fn handle(
    args: DataArgs,
    provider: &Provider,
    meta: &Meta,
    ctx: &Context,
) -> Result<(), CliError> {
    let source = provider.data_source(&args.type_name)?;
    let schema = source.schema();
    let config = lookup_config(&args, &schema)?;

    let mut d = ResourceData::from_config(schema.clone(), config)?;
    source.read(&mut d, meta).await?;

    let shown = output::redact(&schema, d.attributes());
    let out = output::render_attributes(ctx.format, d.id().unwrap_or_default(), &shown)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
