//! Type catalog: the registered resources, data sources and their schemas.

use serde::Serialize;
use tabled::Tabled;

use zia_provider::{Attribute, Provider, Schema};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Debug, Serialize, Tabled)]
struct TypeInfo {
    #[tabled(rename = "Type")]
    type_name: &'static str,
    #[tabled(rename = "Attributes")]
    attributes: usize,
}

#[derive(Tabled)]
struct AttributeRow {
    #[tabled(rename = "Attribute")]
    name: String,
    #[tabled(rename = "Type")]
    ty: String,
    #[tabled(rename = "Mode")]
    mode: &'static str,
    #[tabled(rename = "Replaces")]
    force_new: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

fn mode(attribute: &Attribute) -> &'static str {
    match (attribute.required, attribute.optional, attribute.computed) {
        (true, _, _) => "required",
        (false, true, true) => "optional, computed",
        (false, true, false) => "optional",
        (false, false, true) => "computed",
        (false, false, false) => "-",
    }
}

fn type_label(attribute: &Attribute) -> String {
    serde_json::to_value(attribute.ty)
        .ok()
        .and_then(|v| v.as_str().map(str::to_owned))
        .unwrap_or_default()
}

pub fn resources(provider: &Provider, ctx: &Context) -> Result<(), CliError> {
    let types: Vec<TypeInfo> = provider
        .resource_types()
        .map(|name| TypeInfo {
            type_name: name,
            attributes: provider.resource(name).map(|r| r.schema().len()).unwrap_or_default(),
        })
        .collect();
    print_types(&types, ctx)
}

pub fn data_sources(provider: &Provider, ctx: &Context) -> Result<(), CliError> {
    let types: Vec<TypeInfo> = provider
        .data_source_types()
        .map(|name| TypeInfo {
            type_name: name,
            attributes: provider.data_source(name).map(|d| d.schema().len()).unwrap_or_default(),
        })
        .collect();
    print_types(&types, ctx)
}

fn print_types(types: &[TypeInfo], ctx: &Context) -> Result<(), CliError> {
    let out = output::render_list(
        ctx.format,
        types,
        |t| TypeInfo {
            type_name: t.type_name,
            attributes: t.attributes,
        },
        |t| t.type_name.to_owned(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

/// Print one schema. Resource and data source names overlap, so `data`
/// selects which registry to look in.
pub fn schema(provider: &Provider, type_name: &str, data: bool, ctx: &Context) -> Result<(), CliError> {
    let schema = if data {
        provider.data_source(type_name)?.schema()
    } else {
        provider.resource(type_name)?.schema()
    };

    let out = match ctx.format {
        OutputFormat::Table => {
            let rows = attribute_rows(&schema);
            tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string()
        }
        OutputFormat::Json => serde_json::to_string_pretty(&schema)?,
        OutputFormat::JsonCompact => serde_json::to_string(&schema)?,
        OutputFormat::Yaml => serde_yaml::to_string(&schema)?,
        OutputFormat::Plain => schema.iter().map(|(name, _)| name).collect::<Vec<_>>().join("\n"),
    };
    output::print_output(&out, ctx.quiet);
    Ok(())
}

fn attribute_rows(schema: &Schema) -> Vec<AttributeRow> {
    schema
        .iter()
        .map(|(name, attribute)| AttributeRow {
            name: name.to_owned(),
            ty: type_label(attribute),
            mode: mode(attribute),
            force_new: if attribute.force_new { "yes" } else { "" },
            description: attribute.description.clone().unwrap_or_default(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn modes_describe_attribute_flags() {
        assert_eq!(mode(&Attribute::string().required()), "required");
        assert_eq!(mode(&Attribute::int().optional().computed()), "optional, computed");
        assert_eq!(mode(&Attribute::int().computed()), "computed");
    }

    #[test]
    fn rows_cover_every_attribute() {
        let provider = Provider::new();
        let schema = provider
            .resource("zia_traffic_forwarding_vpn_credentials")
            .unwrap()
            .schema();
        let rows = attribute_rows(&schema);
        assert_eq!(rows.len(), schema.len());
        let kind = rows.iter().find(|r| r.name == "type").unwrap();
        assert_eq!(kind.mode, "required");
        assert_eq!(kind.force_new, "yes");
        assert_eq!(kind.ty, "string");
    }
}
