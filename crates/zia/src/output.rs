//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde_json::{Map, Value};
use tabled::{Table, Tabled, settings::Style};

use zia_provider::Schema;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

const REDACTED: &str = "(sensitive)";

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// One-line progress note on stderr (`created zia_rule_labels.web`).
pub fn note(verb: &str, subject: &str, color: bool, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    let _ = if color {
        writeln!(stderr, "{} {}", verb.green().bold(), subject.bold())
    } else {
        writeln!(stderr, "{verb} {subject}")
    };
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render an attribute map: a two-column table, or the map itself.
///
/// Plain output is the entity ID alone.
pub fn render_attributes(
    format: OutputFormat,
    id: &str,
    attributes: &Map<String, Value>,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<AttributeRow> = attributes
                .iter()
                .map(|(name, value)| AttributeRow {
                    attribute: name.clone(),
                    value: display_value(value),
                })
                .collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(attributes)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(attributes)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(attributes)?),
        OutputFormat::Plain => Ok(id.to_owned()),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Replace values of sensitive attributes before display.
pub fn redact(schema: &Schema, attributes: &Map<String, Value>) -> Map<String, Value> {
    attributes
        .iter()
        .map(|(name, value)| {
            let sensitive = schema.get(name).is_some_and(|a| a.sensitive);
            let value = if sensitive && !value.is_null() {
                Value::String(REDACTED.into())
            } else {
                value.clone()
            };
            (name.clone(), value)
        })
        .collect()
}

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct AttributeRow {
    #[tabled(rename = "Attribute")]
    pub attribute: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Strings bare, everything else as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use zia_provider::Attribute;

    use super::*;

    fn attrs() -> Map<String, Value> {
        json!({"name": "vpn-1", "pre_shared_key": "s3cret!!", "ip_address": null})
            .as_object()
            .cloned()
            .unwrap()
    }

    #[test]
    fn sensitive_values_are_redacted() {
        let schema = Schema::new()
            .attr("name", Attribute::string().required())
            .attr("pre_shared_key", Attribute::string().optional().sensitive())
            .attr("ip_address", Attribute::string().optional().sensitive());
        let shown = redact(&schema, &attrs());
        assert_eq!(shown["name"], json!("vpn-1"));
        assert_eq!(shown["pre_shared_key"], json!(REDACTED));
        assert_eq!(shown["ip_address"], Value::Null);
    }

    #[test]
    fn plain_output_is_the_id() {
        assert_eq!(render_attributes(OutputFormat::Plain, "42", &attrs()).unwrap(), "42");
    }

    #[test]
    fn table_shows_strings_bare() {
        let table = render_attributes(OutputFormat::Table, "42", &attrs()).unwrap();
        assert!(table.contains("vpn-1"));
        assert!(!table.contains("\"vpn-1\""));
        assert!(table.contains("null"));
    }
}
